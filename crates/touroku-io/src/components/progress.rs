//! Step progress header.

use dioxus::prelude::*;

use touroku_core::Step;

/// Props for the [`StepProgress`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StepProgressProps {
    /// Step currently shown below the header.
    current: Step,
}

/// A numbered circle per step with the current one highlighted and
/// completed ones checked off.
#[component]
pub fn StepProgress(props: StepProgressProps) -> Element {
    let current = props.current.index();

    rsx! {
        ol { class: "flex items-center justify-between mb-8",
            for step in Step::ALL {
                {render_marker(step, current)}
            }
        }
    }
}

fn render_marker(step: Step, current: usize) -> Element {
    let index = step.index();
    let circle_class = if index < current {
        "bg-[var(--btn-primary)] text-white"
    } else if index == current {
        "border-2 border-[var(--border-accent)] text-[var(--text-heading)]"
    } else {
        "border border-[var(--border-muted)] text-[var(--muted)]"
    };
    let label_class = if index == current {
        "text-[var(--text-heading)] font-medium"
    } else {
        "text-[var(--muted)]"
    };
    let marker = if index < current {
        "\u{2713}".to_string()
    } else {
        (index + 1).to_string()
    };

    rsx! {
        li {
            key: "{index}",
            class: "flex flex-col items-center gap-1 flex-1",
            span {
                class: "w-8 h-8 rounded-full flex items-center justify-center text-sm {circle_class}",
                "{marker}"
            }
            span { class: "text-xs {label_class}", "{step.title()}" }
        }
    }
}
