//! Payment screenshot upload panel.
//!
//! Drives the full pipeline: the synchronous acceptance gate, the
//! client-side re-encode, and the network stages, with cancel, retry,
//! and remove affordances keyed off the task status.
//!
//! A generation counter guards against stale async completions: every
//! new selection, retry, or cancel bumps it, and attempt futures that
//! resolve under an old generation drop their result instead of
//! touching the superseded task.

use dioxus::html::FileData;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use touroku_core::{screenshot, UploadStatus, UploadTask, Wizard};

use crate::api::ApiClient;
use crate::http::AbortHandle;
use crate::uploader::{upload_compressed, UploadError};

/// Props for the [`UploadPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadPanelProps {
    wizard: Signal<Wizard>,
    task: Signal<UploadTask>,
}

/// File picker plus the status view for the one-at-a-time upload task.
#[component]
pub fn UploadPanel(props: UploadPanelProps) -> Element {
    let wizard = props.wizard;
    let mut task = props.task;
    let api = use_context::<ApiClient>();
    let pick_error = use_signal(|| Option::<String>::None);
    let mut generation = use_signal(|| 0_u64);
    let mut abort = use_signal(AbortHandle::new);

    let snapshot = task.read();
    let status = snapshot.status();
    let filename = snapshot.filename().to_owned();
    let progress = snapshot.progress();
    let task_error = snapshot.error().map(str::to_owned);
    drop(snapshot);

    let handle_pick = {
        let api = api.clone();
        move |evt: FormEvent| {
            let api = api.clone();
            async move {
                if let Some(file) = evt.files().into_iter().next() {
                    accept_file(api, wizard, task, generation, abort, pick_error, file).await;
                }
            }
        }
    };

    let handle_cancel = move |_| {
        abort.peek().abort();
        let next = generation() + 1;
        generation.set(next);
        task.write().cancel().ok();
    };

    let handle_retry = {
        let api = api.clone();
        move |_| {
            let jpeg = match task.peek().compressed() {
                Some(bytes) => bytes.to_vec(),
                None => return,
            };
            if task.write().begin_retry().is_err() {
                return;
            }
            let my_gen = generation() + 1;
            generation.set(my_gen);
            let handle = AbortHandle::new();
            abort.set(handle.clone());
            let api = api.clone();
            spawn(async move {
                run_attempt(api, wizard, task, generation, my_gen, handle, jpeg).await;
            });
        }
    };

    let handle_remove = {
        let mut wizard = wizard;
        move |_| {
            if task.write().remove().is_ok() {
                wizard.write().detach_screenshot();
            }
        }
    };

    let body = match status {
        UploadStatus::Idle => rsx! {
            if let Some(ref err) = pick_error() {
                p { class: "text-sm text-[var(--text-error)] mb-2", "{err}" }
            }
            label {
                class: "inline-block px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded cursor-pointer text-white font-medium",
                input {
                    r#type: "file",
                    accept: ".png,.jpg,.jpeg",
                    class: "hidden",
                    onchange: handle_pick,
                }
                "Choose Screenshot"
            }
            p { class: "text-[var(--muted)] text-sm mt-2",
                "PNG or JPG, up to 5MB"
            }
        },
        UploadStatus::Uploading => rsx! {
            p { class: "text-sm text-[var(--text-secondary)] mb-2", "{filename}" }
            div { class: "w-full h-2 rounded bg-[var(--surface)] overflow-hidden mb-1",
                div {
                    class: "h-full bg-[var(--btn-primary)] transition-all",
                    style: "width: {progress}%",
                }
            }
            p { class: "text-xs text-[var(--muted)] mb-2", "{progress}%" }
            button {
                r#type: "button",
                class: "px-3 py-1 text-sm rounded border border-[var(--border)] text-[var(--text-secondary)]",
                onclick: handle_cancel,
                "Cancel"
            }
        },
        UploadStatus::Uploaded => rsx! {
            p { class: "text-[var(--text-success)] mb-2",
                "\u{2713} {filename} uploaded"
            }
            button {
                r#type: "button",
                class: "px-3 py-1 text-sm rounded border border-[var(--border)] text-[var(--text-secondary)]",
                onclick: handle_remove,
                "Remove"
            }
        },
        UploadStatus::Failed => rsx! {
            if let Some(ref err) = task_error {
                p { class: "text-sm text-[var(--text-error)] mb-2", "{err}" }
            }
            div { class: "flex justify-center gap-2",
                button {
                    r#type: "button",
                    class: "px-3 py-1 text-sm rounded bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] text-white",
                    onclick: handle_retry,
                    "Retry"
                }
                button {
                    r#type: "button",
                    class: "px-3 py-1 text-sm rounded border border-[var(--border)] text-[var(--text-secondary)]",
                    onclick: handle_remove,
                    "Remove"
                }
            }
        },
    };

    rsx! {
        div { class: "border-2 border-dashed border-[var(--border-muted)] rounded-lg p-6 text-center",
            {body}
        }
    }
}

/// Gate, re-encode, and launch the network stages for a fresh pick.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
async fn accept_file(
    api: ApiClient,
    mut wizard: Signal<Wizard>,
    mut task: Signal<UploadTask>,
    mut generation: Signal<u64>,
    mut abort: Signal<AbortHandle>,
    mut pick_error: Signal<Option<String>>,
    file: FileData,
) {
    let name = file.name();
    #[allow(clippy::cast_possible_truncation)]
    let len = file.size() as usize;
    if let Err(err) = screenshot::check_file(&name, len) {
        pick_error.set(Some(err.to_string()));
        return;
    }
    pick_error.set(None);

    let bytes = match file.read_bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            pick_error.set(Some(format!("Failed to read file: {e}")));
            return;
        }
    };

    // Supersede whatever attempt was in flight.
    abort.peek().abort();
    let my_gen = generation() + 1;
    generation.set(my_gen);
    wizard.write().detach_screenshot();
    task.write().start(name);
    let handle = AbortHandle::new();
    abort.set(handle.clone());

    // Yield once so the progress view paints before the CPU-bound
    // decode/re-encode blocks the main thread.
    TimeoutFuture::new(0).await;
    let prepared = screenshot::prepare(&bytes);
    if *generation.peek() != my_gen {
        return;
    }
    match prepared {
        Ok(compressed) => {
            task.write().set_compressed(compressed.bytes.clone());
            run_attempt(api, wizard, task, generation, my_gen, handle, compressed.bytes).await;
        }
        Err(err) => {
            if let Err(refused) = task.write().fail(err.to_string()) {
                warn(&format!("re-encode failure dropped: {refused}"));
            }
        }
    }
}

/// Run the network stages for one attempt and resolve the task,
/// unless the attempt was superseded while in flight.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
async fn run_attempt(
    api: ApiClient,
    mut wizard: Signal<Wizard>,
    mut task: Signal<UploadTask>,
    generation: Signal<u64>,
    my_gen: u64,
    handle: AbortHandle,
    jpeg: Vec<u8>,
) {
    let progress_task = task;
    let result = upload_compressed(
        &api,
        &jpeg,
        move |percent| {
            let mut t = progress_task;
            t.write().set_progress(percent);
        },
        handle,
    )
    .await;

    if *generation.peek() != my_gen {
        return;
    }
    match result {
        Ok(url) => match task.write().complete(url.clone()) {
            Ok(()) => wizard.write().attach_screenshot(url),
            // The generation matched, so the task should still be
            // Uploading; a refusal here is a driver bug worth noting.
            Err(err) => warn(&format!("upload completion dropped: {err}")),
        },
        // Cancel already reset the task; nothing left to record.
        Err(UploadError::Cancelled) => {}
        Err(err) => {
            if let Err(refused) = task.write().fail(err.to_string()) {
                warn(&format!("upload failure dropped: {refused}"));
            }
        }
    }
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}
