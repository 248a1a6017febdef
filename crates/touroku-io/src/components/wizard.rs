//! The multi-step registration wizard.

use dioxus::prelude::*;

use touroku_core::{FormConfig, Step, UploadTask, Wizard};

use crate::api::ApiClient;
use crate::submit::submit_registration;

use super::academic::AcademicStep;
use super::confirm::ConfirmStep;
use super::handles::HandlesStep;
use super::payment::PaymentStep;
use super::personal::PersonalStep;
use super::progress::StepProgress;

/// The wizard root. Owns the session state and expects [`ApiClient`]
/// and [`FormConfig`] in context.
#[component]
pub fn RegistrationWizard() -> Element {
    let mut wizard = use_signal(Wizard::new);
    let task = use_signal(UploadTask::default);
    let api = use_context::<ApiClient>();
    let config = use_context::<FormConfig>();

    let current = wizard.read();
    let step = current.step();
    let submitting = current.is_submitting();
    let banner = current.submit_error().map(str::to_owned);
    let accepted = current.record().map(|r| r.registration_code.clone());
    drop(current);

    if let Some(code) = accepted {
        return render_success(&code);
    }

    let handle_back = move |_| wizard.write().back();
    let handle_next = {
        let config = config.clone();
        move |_| wizard.write().next(&config)
    };
    let handle_submit = {
        let api = api.clone();
        let config = config.clone();
        move |_| {
            let api = api.clone();
            let config = config.clone();
            spawn(async move {
                submit_registration(api, wizard, config).await;
            });
        }
    };

    let step_view = match step {
        Step::Personal => rsx! { PersonalStep { wizard } },
        Step::Academic => rsx! { AcademicStep { wizard } },
        Step::Handles => rsx! { HandlesStep { wizard } },
        Step::Payment => rsx! { PaymentStep { wizard, task } },
        Step::Confirm => rsx! { ConfirmStep { wizard } },
    };

    rsx! {
        div { class: "max-w-xl mx-auto p-6",
            StepProgress { current: step }

            h2 { class: "text-xl font-semibold text-[var(--text-heading)] mb-4",
                "{step.title()}"
            }

            if let Some(ref message) = banner {
                div { class: "flex items-start justify-between gap-3 rounded border border-[var(--border-error)] bg-[var(--surface-error)] px-4 py-3 mb-4",
                    p { class: "text-sm text-[var(--text-error)]", "{message}" }
                    button {
                        r#type: "button",
                        class: "text-[var(--text-error)] font-bold",
                        onclick: move |_| wizard.write().dismiss_submit_error(),
                        "\u{00d7}"
                    }
                }
            }

            {step_view}

            div { class: "flex justify-between mt-6",
                if step.index() > 0 {
                    button {
                        r#type: "button",
                        class: "px-4 py-2 rounded border border-[var(--border)] text-[var(--text-secondary)]",
                        disabled: submitting,
                        onclick: handle_back,
                        "Back"
                    }
                } else {
                    span {}
                }
                if step.is_last() {
                    button {
                        r#type: "button",
                        class: "px-4 py-2 rounded bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] text-white font-medium disabled:opacity-50",
                        disabled: submitting,
                        onclick: handle_submit,
                        if submitting { "Submitting..." } else { "Submit" }
                    }
                } else {
                    button {
                        r#type: "button",
                        class: "px-4 py-2 rounded bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] text-white font-medium",
                        onclick: handle_next,
                        "Next"
                    }
                }
            }
        }
    }
}

fn render_success(code: &str) -> Element {
    let code = code.to_string();
    rsx! {
        div { class: "max-w-xl mx-auto p-6 text-center",
            p { class: "text-2xl mb-2", "\u{1f389}" }
            h2 { class: "text-xl font-semibold text-[var(--text-heading)] mb-2",
                "Registration Complete"
            }
            p { class: "text-[var(--text-secondary)] mb-4",
                "Keep your registration code safe. You will need it at the event."
            }
            p { class: "inline-block rounded bg-[var(--surface)] border border-[var(--border-accent)] px-4 py-2 font-mono text-lg text-[var(--text-heading)]",
                "{code}"
            }
        }
    }
}
