//! The wizard state machine.
//!
//! Owns the current step, the draft, the visible error map for the
//! current step, and the submission phase. Forward progress is gated:
//! the step index only advances past a step whose fields validate
//! cleanly against the current draft. Backward navigation is free and
//! never discards data.

use std::fmt;

use crate::config::FormConfig;
use crate::draft::{Field, FieldEdit, RegistrationDraft};
use crate::payload::RegistrationRecord;
use crate::validate::{validate_step, ErrorMap};

/// The five wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Step {
    #[default]
    Personal,
    Academic,
    Handles,
    Payment,
    Confirm,
}

impl Step {
    /// All steps in wizard order, for the progress header.
    pub const ALL: [Self; 5] = [
        Self::Personal,
        Self::Academic,
        Self::Handles,
        Self::Payment,
        Self::Confirm,
    ];

    /// Zero-based position in the wizard.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Personal => 0,
            Self::Academic => 1,
            Self::Handles => 2,
            Self::Payment => 3,
            Self::Confirm => 4,
        }
    }

    /// Progress-header title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Info",
            Self::Academic => "Academic",
            Self::Handles => "CP Handles",
            Self::Payment => "Payment",
            Self::Confirm => "Confirm",
        }
    }

    /// Whether this is the final step (submission happens here).
    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, Self::Confirm)
    }

    /// The following step, clamped at [`Step::Confirm`].
    const fn next(self) -> Self {
        match self {
            Self::Personal => Self::Academic,
            Self::Academic => Self::Handles,
            Self::Handles => Self::Payment,
            Self::Payment | Self::Confirm => Self::Confirm,
        }
    }

    /// The preceding step, clamped at [`Step::Personal`].
    const fn prev(self) -> Self {
        match self {
            Self::Personal | Self::Academic => Self::Personal,
            Self::Handles => Self::Academic,
            Self::Payment => Self::Handles,
            Self::Confirm => Self::Payment,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Where the session is in its submission lifecycle.
///
/// `InFlight` doubles as the duplicate-submit guard: edits and repeat
/// submits are refused until the request resolves. `Accepted` is
/// absorbing -- the draft is frozen and only a page reload starts over.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmitPhase {
    #[default]
    Editing,
    InFlight,
    Accepted(RegistrationRecord),
}

/// One registration session.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: Step,
    draft: RegistrationDraft,
    errors: ErrorMap,
    phase: SubmitPhase,
    submit_error: Option<String>,
}

impl Wizard {
    /// Start a fresh session on the first step with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Read access to the draft. Mutation goes through [`Self::apply`]
    /// and the screenshot attach/detach methods only.
    #[must_use]
    pub const fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Visible errors for the current step.
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The visible message for one field, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The submission phase.
    #[must_use]
    pub const fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    /// Whether a submission request is currently in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmitPhase::InFlight)
    }

    /// The accepted registration record, once submission succeeds.
    #[must_use]
    pub const fn record(&self) -> Option<&RegistrationRecord> {
        match &self.phase {
            SubmitPhase::Accepted(record) => Some(record),
            _ => None,
        }
    }

    /// The dismissible submission banner message, if any.
    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Clear the submission banner (user dismissed it).
    pub fn dismiss_submit_error(&mut self) {
        self.submit_error = None;
    }

    /// Apply one field edit, eagerly clearing that field's visible
    /// error. Full re-validation happens at the next advance attempt.
    ///
    /// Ignored once a submission is in flight or accepted.
    pub fn apply(&mut self, edit: FieldEdit) {
        if !matches!(self.phase, SubmitPhase::Editing) {
            return;
        }
        let field = self.draft.apply(edit);
        self.errors.remove(&field);
    }

    /// Record the hosted screenshot URL after a successful upload.
    ///
    /// A successful attempt supersedes the screenshot's field error.
    pub fn attach_screenshot(&mut self, url: String) {
        self.draft.screenshot_url = Some(url);
        self.errors.remove(&Field::Screenshot);
    }

    /// Forget the hosted screenshot URL (upload removed or replaced).
    pub fn detach_screenshot(&mut self) {
        self.draft.screenshot_url = None;
    }

    /// Validate the current step and advance on success.
    ///
    /// On failure the step is unchanged and the error map holds
    /// exactly the invalid fields.
    pub fn next(&mut self, config: &FormConfig) {
        if !matches!(self.phase, SubmitPhase::Editing) {
            return;
        }
        let errors = validate_step(self.step, &self.draft, config);
        if errors.is_empty() {
            self.errors.clear();
            self.step = self.step.next();
        } else {
            self.errors = errors;
        }
    }

    /// Step backward without validating. Data entered on the step
    /// being left is retained; its errors are not.
    pub fn back(&mut self) {
        if !matches!(self.phase, SubmitPhase::Editing) {
            return;
        }
        self.errors.clear();
        self.step = self.step.prev();
    }

    /// Gate for the submission orchestrator.
    ///
    /// Only valid on the final step while editing. Re-validates the
    /// Confirm step and, defensively, the Payment step -- a removed or
    /// failed upload after back-and-forward navigation must be caught
    /// here rather than reaching the network. Returns `true` (and
    /// enters `InFlight`) when submission may proceed.
    pub fn begin_submit(&mut self, config: &FormConfig) -> bool {
        if !self.step.is_last() || !matches!(self.phase, SubmitPhase::Editing) {
            return false;
        }
        let mut errors = validate_step(Step::Confirm, &self.draft, config);
        errors.extend(validate_step(Step::Payment, &self.draft, config));
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        self.submit_error = None;
        self.phase = SubmitPhase::InFlight;
        true
    }

    /// The backend accepted the registration. Absorbing.
    pub fn submit_accepted(&mut self, record: RegistrationRecord) {
        if self.is_submitting() {
            self.phase = SubmitPhase::Accepted(record);
        }
    }

    /// The backend (or the network) rejected the submission. The
    /// message is surfaced verbatim in the banner; the step and draft
    /// are untouched so the user can retry without re-entering data.
    pub fn submit_rejected(&mut self, message: String) {
        if self.is_submitting() {
            self.phase = SubmitPhase::Editing;
            self.submit_error = Some(message);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::draft::{Branch, Gender, YearOfStudy};

    fn config() -> FormConfig {
        FormConfig::default()
    }

    fn fill_personal(wizard: &mut Wizard) {
        wizard.apply(FieldEdit::FullName("Asha Rao".into()));
        wizard.apply(FieldEdit::RegistrationNumber("AB12CD34EF".into()));
        wizard.apply(FieldEdit::Email("asha@example.com".into()));
        wizard.apply(FieldEdit::Phone("9876543210".into()));
    }

    fn fill_academic(wizard: &mut Wizard) {
        wizard.apply(FieldEdit::College(Some("Other".into())));
        wizard.apply(FieldEdit::OtherCollege("XYZ Institute".into()));
        wizard.apply(FieldEdit::YearOfStudy(Some(YearOfStudy::ThirdYear)));
        wizard.apply(FieldEdit::Branch(Some(Branch::Cse)));
        wizard.apply(FieldEdit::Gender(Some(Gender::Female)));
    }

    /// Drive a fresh wizard to the Confirm step with a fully valid draft.
    fn wizard_at_confirm() -> Wizard {
        let mut wizard = Wizard::new();
        fill_personal(&mut wizard);
        wizard.next(&config());
        fill_academic(&mut wizard);
        wizard.next(&config());
        wizard.next(&config()); // handles: nothing required
        wizard.apply(FieldEdit::TransactionId("abcd12345678".into()));
        wizard.attach_screenshot("https://host/shot.jpg".into());
        wizard.next(&config());
        assert_eq!(wizard.step(), Step::Confirm);
        wizard.apply(FieldEdit::Confirm(true));
        wizard
    }

    #[test]
    fn next_is_gated_on_the_current_step() {
        let mut wizard = Wizard::new();
        wizard.apply(FieldEdit::FullName("Asha Rao".into()));
        wizard.apply(FieldEdit::RegistrationNumber("AB12CD34EF".into()));
        wizard.apply(FieldEdit::Email("asha@example.com".into()));
        wizard.apply(FieldEdit::Phone("12345".into()));

        wizard.next(&config());
        assert_eq!(wizard.step(), Step::Personal);
        let fields: Vec<Field> = wizard.errors().keys().copied().collect();
        assert_eq!(fields, vec![Field::Phone]);
    }

    #[test]
    fn next_advances_one_step_and_clears_errors() {
        let mut wizard = Wizard::new();
        wizard.next(&config());
        assert!(!wizard.errors().is_empty());

        fill_personal(&mut wizard);
        wizard.next(&config());
        assert_eq!(wizard.step(), Step::Academic);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn back_clamps_at_the_first_step() {
        let mut wizard = Wizard::new();
        wizard.back();
        assert_eq!(wizard.step(), Step::Personal);
    }

    #[test]
    fn next_clamps_at_the_last_step() {
        let mut wizard = wizard_at_confirm();
        wizard.next(&config());
        assert_eq!(wizard.step(), Step::Confirm);
    }

    #[test]
    fn back_keeps_data_and_drops_errors() {
        let mut wizard = Wizard::new();
        fill_personal(&mut wizard);
        wizard.next(&config());
        wizard.next(&config()); // fails on academic
        assert!(!wizard.errors().is_empty());

        wizard.back();
        assert_eq!(wizard.step(), Step::Personal);
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.draft().full_name, "Asha Rao");
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut wizard = Wizard::new();
        wizard.next(&config());
        assert!(wizard.error(Field::FullName).is_some());
        assert!(wizard.error(Field::Email).is_some());

        wizard.apply(FieldEdit::FullName("Asha Rao".into()));
        assert!(wizard.error(Field::FullName).is_none());
        assert!(wizard.error(Field::Email).is_some());
    }

    #[test]
    fn submit_refused_before_the_last_step() {
        let mut wizard = Wizard::new();
        assert!(!wizard.begin_submit(&config()));
        assert!(!wizard.is_submitting());
    }

    #[test]
    fn submit_refused_when_screenshot_was_removed() {
        let mut wizard = wizard_at_confirm();
        // Simulate backing up, removing the upload, and returning.
        wizard.detach_screenshot();
        assert!(!wizard.begin_submit(&config()));
        assert!(!wizard.is_submitting());
        assert_eq!(
            wizard.error(Field::Screenshot).unwrap(),
            "Payment screenshot is required"
        );
    }

    #[test]
    fn submit_refused_while_in_flight() {
        let mut wizard = wizard_at_confirm();
        assert!(wizard.begin_submit(&config()));
        assert!(wizard.is_submitting());
        assert!(!wizard.begin_submit(&config()));
    }

    #[test]
    fn accepted_submission_is_absorbing() {
        let mut wizard = wizard_at_confirm();
        assert!(wizard.begin_submit(&config()));
        wizard.submit_accepted(RegistrationRecord {
            registration_code: "IC2K26-7F3A9B".into(),
        });
        assert_eq!(
            wizard.record().unwrap().registration_code,
            "IC2K26-7F3A9B"
        );

        // Frozen: edits and navigation are ignored.
        wizard.apply(FieldEdit::FullName("Someone Else".into()));
        wizard.back();
        assert_eq!(wizard.draft().full_name, "Asha Rao");
        assert_eq!(wizard.step(), Step::Confirm);
    }

    #[test]
    fn rejected_submission_keeps_draft_and_surfaces_message() {
        let mut wizard = wizard_at_confirm();
        let before = wizard.draft().clone();
        assert!(wizard.begin_submit(&config()));
        wizard.submit_rejected("Registration number already used".into());

        assert!(!wizard.is_submitting());
        assert_eq!(wizard.step(), Step::Confirm);
        assert_eq!(wizard.draft(), &before);
        assert_eq!(
            wizard.submit_error().unwrap(),
            "Registration number already used"
        );

        wizard.dismiss_submit_error();
        assert!(wizard.submit_error().is_none());

        // Explicit user retry is allowed.
        assert!(wizard.begin_submit(&config()));
    }

    #[test]
    fn begin_submit_clears_a_stale_banner() {
        let mut wizard = wizard_at_confirm();
        assert!(wizard.begin_submit(&config()));
        wizard.submit_rejected("transient".into());
        assert!(wizard.submit_error().is_some());
        assert!(wizard.begin_submit(&config()));
        assert!(wizard.submit_error().is_none());
    }
}
