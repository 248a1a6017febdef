//! Step 4: payment details and screenshot upload.

use dioxus::prelude::*;

use touroku_core::{Field, FieldEdit, UploadTask, Wizard};

use super::field::{render_error, render_text_field};
use super::upload::UploadPanel;

/// Props for the [`PaymentStep`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PaymentStepProps {
    wizard: Signal<Wizard>,
    task: Signal<UploadTask>,
}

/// Transaction ID input and the screenshot upload panel. The
/// screenshot's required-field error renders beneath the panel.
#[component]
pub fn PaymentStep(props: PaymentStepProps) -> Element {
    let mut wizard = props.wizard;
    let current = wizard.read();
    let draft = current.draft().clone();
    let errors = current.errors().clone();
    drop(current);

    rsx! {
        div { class: "flex flex-col gap-4",
            {render_text_field(
                "transaction-id",
                "Transaction ID",
                "text",
                "UPI transaction ID",
                &draft.transaction_id,
                errors.get(&Field::TransactionId).map(String::as_str),
                move |v| wizard.write().apply(FieldEdit::TransactionId(v)),
            )}
            div { class: "flex flex-col gap-1",
                span { class: "text-sm text-[var(--text-heading)] font-medium",
                    "Payment Screenshot"
                }
                UploadPanel { wizard: props.wizard, task: props.task }
                {render_error(errors.get(&Field::Screenshot).map(String::as_str))}
            }
        }
    }
}
