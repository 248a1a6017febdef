//! Step 1: personal information.

use dioxus::prelude::*;

use touroku_core::{Field, FieldEdit, Wizard};

use super::field::{render_checkbox, render_text_field};

/// Props for the [`PersonalStep`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PersonalStepProps {
    wizard: Signal<Wizard>,
}

/// Full name, registration number, email, phone, and the optional
/// affiliate block.
#[component]
pub fn PersonalStep(props: PersonalStepProps) -> Element {
    let mut wizard = props.wizard;
    let current = wizard.read();
    let draft = current.draft().clone();
    let errors = current.errors().clone();
    drop(current);

    rsx! {
        div { class: "flex flex-col gap-4",
            {render_text_field(
                "full-name",
                "Full Name",
                "text",
                "Your full name",
                &draft.full_name,
                errors.get(&Field::FullName).map(String::as_str),
                move |v| wizard.write().apply(FieldEdit::FullName(v)),
            )}
            {render_text_field(
                "registration-number",
                "Registration Number",
                "text",
                "10 characters",
                &draft.registration_number,
                errors.get(&Field::RegistrationNumber).map(String::as_str),
                move |v| wizard.write().apply(FieldEdit::RegistrationNumber(v)),
            )}
            {render_text_field(
                "email",
                "Email",
                "email",
                "you@example.com",
                &draft.email,
                errors.get(&Field::Email).map(String::as_str),
                move |v| wizard.write().apply(FieldEdit::Email(v)),
            )}
            {render_text_field(
                "phone",
                "Phone",
                "tel",
                "10-digit mobile number",
                &draft.phone,
                errors.get(&Field::Phone).map(String::as_str),
                move |v| wizard.write().apply(FieldEdit::Phone(v)),
            )}
            {render_checkbox(
                "affiliate",
                "I was referred by a campus affiliate",
                draft.affiliate,
                None,
                move |v| wizard.write().apply(FieldEdit::Affiliate(v)),
            )}
            if draft.affiliate {
                {render_text_field(
                    "affiliate-id",
                    "Affiliate ID",
                    "text",
                    "Affiliate ID",
                    &draft.affiliate_id,
                    errors.get(&Field::AffiliateId).map(String::as_str),
                    move |v| wizard.write().apply(FieldEdit::AffiliateId(v)),
                )}
            }
        }
    }
}
