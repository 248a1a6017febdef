//! Submission orchestration.
//!
//! Runs the terminal sequence behind the Submit button: the wizard's
//! `begin_submit` gate (which re-validates Confirm and Payment and
//! refuses to proceed unless the upload pipeline delivered a hosted
//! URL), payload assembly, exactly one registration call, and the
//! resolution into the accepted or rejected wizard phase.

use dioxus::prelude::*;

use touroku_core::{FormConfig, RegistrationPayload, Wizard};

use crate::api::ApiClient;

/// Execute one user-initiated submit click.
///
/// Does nothing when the gate refuses (wrong step, already in flight,
/// or stale/missing upload -- the gate leaves field errors behind in
/// that case). While the request is in flight the wizard reports
/// `is_submitting`, which the UI uses to disable the control; there is
/// no cancel. Failures surface the backend's message verbatim in the
/// banner and leave the draft and step untouched for an explicit
/// user retry.
#[allow(clippy::future_not_send)]
pub async fn submit_registration(api: ApiClient, mut wizard: Signal<Wizard>, config: FormConfig) {
    if !wizard.write().begin_submit(&config) {
        return;
    }

    // The gate just validated the draft, so assembly failure is a
    // programming error; it is still resolved as a rejection rather
    // than a panic.
    let payload_result = RegistrationPayload::from_draft(wizard.peek().draft());
    let payload = match payload_result {
        Ok(payload) => payload,
        Err(err) => {
            wizard.write().submit_rejected(err.to_string());
            return;
        }
    };

    match api.register(&payload).await {
        Ok(record) => wizard.write().submit_accepted(record),
        Err(err) => wizard.write().submit_rejected(err.to_string()),
    }
}
