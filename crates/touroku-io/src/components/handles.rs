//! Step 3: competitive programming handles. All optional.

use dioxus::prelude::*;

use touroku_core::{FieldEdit, Wizard};

use super::field::render_text_field;

/// Props for the [`HandlesStep`] component.
#[derive(Props, Clone, PartialEq)]
pub struct HandlesStepProps {
    wizard: Signal<Wizard>,
}

/// CodeChef, LeetCode, and Codeforces handle inputs. Nothing here is
/// required, so the step never blocks advancing.
#[component]
pub fn HandlesStep(props: HandlesStepProps) -> Element {
    let mut wizard = props.wizard;
    let draft = wizard.read().draft().clone();

    rsx! {
        div { class: "flex flex-col gap-4",
            p { class: "text-sm text-[var(--text-secondary)]",
                "Share your handles if you have them. This step is optional."
            }
            {render_text_field(
                "codechef-handle",
                "CodeChef Handle",
                "text",
                "Optional",
                &draft.codechef_handle,
                None,
                move |v| wizard.write().apply(FieldEdit::CodechefHandle(v)),
            )}
            {render_text_field(
                "leetcode-handle",
                "LeetCode Handle",
                "text",
                "Optional",
                &draft.leetcode_handle,
                None,
                move |v| wizard.write().apply(FieldEdit::LeetcodeHandle(v)),
            )}
            {render_text_field(
                "codeforces-handle",
                "Codeforces Handle",
                "text",
                "Optional",
                &draft.codeforces_handle,
                None,
                move |v| wizard.write().apply(FieldEdit::CodeforcesHandle(v)),
            )}
        }
    }
}
