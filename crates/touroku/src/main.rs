use std::rc::Rc;

use dioxus::prelude::*;
use touroku_core::{FormConfig, RegistrationWindow};
use touroku_io::session::{apply_theme, AUTH_TOKEN_KEY, THEME_KEY};
use touroku_io::{ApiClient, LocalStorage, PersistedValue, RegistrationWizard};

/// API root used when the deployment does not override it at build
/// time via `TOUROKU_API_BASE`.
const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Provides the [`ApiClient`] and [`FormConfig`] contexts, decides
/// once at mount whether registration is open, and wires the theme
/// toggle to the persisted theme store.
fn app() -> Element {
    use_context_provider(|| {
        let auth = PersistedValue::new(Rc::new(LocalStorage), AUTH_TOKEN_KEY);
        let base = option_env!("TOUROKU_API_BASE").unwrap_or(DEFAULT_API_BASE);
        ApiClient::new(base, auth)
    });
    use_context_provider(FormConfig::default);

    // Read the clock exactly once; every consumer agrees on whether
    // the window is open for the lifetime of this page view.
    let open = use_hook(|| {
        let window = option_env!("TOUROKU_OPENS_AT_MS")
            .and_then(|raw| raw.parse::<i64>().ok())
            .map_or_else(RegistrationWindow::always_open, RegistrationWindow::opens_at);
        #[allow(clippy::cast_possible_truncation)]
        let now_ms = js_sys::Date::now() as i64;
        window.is_open(now_ms)
    });

    let theme = use_hook(|| PersistedValue::new(Rc::new(LocalStorage), THEME_KEY));
    let mut dark = use_signal({
        let theme = theme.clone();
        move || theme.get().as_deref() == Some("dark")
    });
    use_effect(move || {
        let value = if dark() { "dark" } else { "light" };
        theme.set(value);
        apply_theme(value);
    });

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        link { rel: "preconnect", href: "https://fonts.googleapis.com" }
        link { rel: "preconnect", href: "https://fonts.gstatic.com", crossorigin: "anonymous" }
        link {
            rel: "stylesheet",
            href: "https://fonts.googleapis.com/css2?family=Noto+Sans:wght@400;500;600&display=swap",
        }

        div { class: "min-h-screen bg-[var(--bg)] text-[var(--text)] flex flex-col",
            button {
                class: "theme-toggle",
                aria_label: "Toggle theme",
                onclick: move |_| {
                    let next = !dark();
                    dark.set(next);
                },
                if dark() { "\u{2600}" } else { "\u{1f319}" }
            }

            header { class: "px-6 py-4 border-b border-[var(--border)]",
                h1 { class: "text-2xl font-semibold text-[var(--text-heading)]", "touroku" }
                p { class: "text-sm text-[var(--text-secondary)]", "Contest registration" }
            }

            main { class: "flex-1",
                if open {
                    RegistrationWizard {}
                } else {
                    {render_closed()}
                }
            }
        }
    }
}

fn render_closed() -> Element {
    rsx! {
        div { class: "max-w-xl mx-auto p-6 text-center",
            h2 { class: "text-xl font-semibold text-[var(--text-heading)] mb-2",
                "Registration has not opened yet"
            }
            p { class: "text-[var(--text-secondary)]",
                "Check back soon. Follow the announcements for the opening date."
            }
        }
    }
}
