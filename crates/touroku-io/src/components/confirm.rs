//! Step 5: review and confirm.

use dioxus::prelude::*;

use touroku_core::{Field, FieldEdit, Wizard, OTHER_COLLEGE};

use super::field::render_checkbox;

/// Props for the [`ConfirmStep`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ConfirmStepProps {
    wizard: Signal<Wizard>,
}

/// Read-only summary of the draft plus the confirmation checkbox.
#[component]
pub fn ConfirmStep(props: ConfirmStepProps) -> Element {
    let mut wizard = props.wizard;
    let current = wizard.read();
    let draft = current.draft().clone();
    let confirm_error = current.error(Field::Confirm).map(str::to_owned);
    drop(current);

    let college = match draft.college.as_deref() {
        Some(OTHER_COLLEGE) => draft.other_college.clone(),
        Some(name) => name.to_owned(),
        None => String::new(),
    };
    let year = draft.year_of_study.map(|y| y.label().to_owned());
    let branch = draft.branch.map(|b| b.wire_name().to_owned());
    let gender = draft.gender.map(|g| g.label().to_owned());
    let screenshot = if draft.screenshot_url.is_some() {
        "Uploaded"
    } else {
        "Missing"
    };

    let mut rows: Vec<(&str, String)> = vec![
        ("Full Name", draft.full_name.clone()),
        ("Registration Number", draft.registration_number.clone()),
        ("Email", draft.email.clone()),
        ("Phone", draft.phone.clone()),
    ];
    if draft.affiliate {
        rows.push(("Affiliate ID", draft.affiliate_id.clone()));
    }
    rows.push(("College", college));
    rows.push(("Year of Study", year.unwrap_or_default()));
    rows.push(("Branch", branch.unwrap_or_default()));
    rows.push(("Gender", gender.unwrap_or_default()));
    for (label, handle) in [
        ("CodeChef", &draft.codechef_handle),
        ("LeetCode", &draft.leetcode_handle),
        ("Codeforces", &draft.codeforces_handle),
    ] {
        if !handle.trim().is_empty() {
            rows.push((label, handle.clone()));
        }
    }
    rows.push(("Transaction ID", draft.transaction_id.clone()));
    rows.push(("Payment Screenshot", screenshot.to_owned()));

    rsx! {
        div { class: "flex flex-col gap-4",
            dl { class: "rounded border border-[var(--border)] divide-y divide-[var(--border-muted)]",
                for (label, value) in rows {
                    div {
                        key: "{label}",
                        class: "flex justify-between gap-4 px-4 py-2",
                        dt { class: "text-sm text-[var(--muted)]", "{label}" }
                        dd { class: "text-sm text-[var(--text)] text-right break-all", "{value}" }
                    }
                }
            }
            {render_checkbox(
                "confirm",
                "I confirm that the information provided above is correct.",
                draft.confirmed,
                confirm_error.as_deref(),
                move |v| wizard.write().apply(FieldEdit::Confirm(v)),
            )}
        }
    }
}
