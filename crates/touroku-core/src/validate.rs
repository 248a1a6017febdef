//! Per-step field validation.
//!
//! Pure, synchronous mapping from (step, draft snapshot) to an error
//! map. No side effects, no network. Each rule produces at most one
//! message per field; an absent key means the field is valid. Safe to
//! call repeatedly -- the wizard re-runs it on every advance attempt.
//!
//! Validation for a step never inspects fields belonging to other
//! steps; the one cross-component fact it reads is the hosted
//! screenshot URL, which the data model places on the Payment step.

use std::collections::BTreeMap;

use crate::config::FormConfig;
use crate::draft::{Field, RegistrationDraft, OTHER_COLLEGE};
use crate::wizard::Step;

/// Field-scoped validation messages for one step.
///
/// `BTreeMap` so iteration (and thus inline rendering) follows the
/// stable field order of [`Field`].
pub type ErrorMap = BTreeMap<Field, String>;

/// Validate the fields belonging to `step` against the draft.
#[must_use]
pub fn validate_step(step: Step, draft: &RegistrationDraft, config: &FormConfig) -> ErrorMap {
    let mut errors = ErrorMap::new();
    match step {
        Step::Personal => validate_personal(draft, &mut errors),
        Step::Academic => validate_academic(draft, config, &mut errors),
        // CP handles are optional free text; the step always passes.
        Step::Handles => {}
        Step::Payment => validate_payment(draft, &mut errors),
        Step::Confirm => {
            if !draft.confirmed {
                errors.insert(
                    Field::Confirm,
                    "Please confirm your information is correct".into(),
                );
            }
        }
    }
    errors
}

fn validate_personal(draft: &RegistrationDraft, errors: &mut ErrorMap) {
    if draft.full_name.trim().is_empty() {
        errors.insert(Field::FullName, "Full name is required".into());
    }

    if draft.registration_number.trim().is_empty() {
        errors.insert(
            Field::RegistrationNumber,
            "Registration number is required".into(),
        );
    } else if !is_alphanumeric_len(&draft.registration_number, 10, 10) {
        errors.insert(
            Field::RegistrationNumber,
            "Must be 10 alphanumeric characters".into(),
        );
    }

    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required".into());
    } else if !is_email_shaped(&draft.email) {
        errors.insert(Field::Email, "Invalid email format".into());
    }

    if draft.phone.trim().is_empty() {
        errors.insert(Field::Phone, "Phone number is required".into());
    } else if draft.phone.len() != 10 || !draft.phone.bytes().all(|b| b.is_ascii_digit()) {
        errors.insert(Field::Phone, "Must be 10 digits".into());
    }

    if draft.affiliate && draft.affiliate_id.trim().is_empty() {
        errors.insert(Field::AffiliateId, "Affiliate ID is required".into());
    }
}

fn validate_academic(draft: &RegistrationDraft, config: &FormConfig, errors: &mut ErrorMap) {
    match draft.college.as_deref() {
        None => {
            errors.insert(Field::College, "College is required".into());
        }
        Some(OTHER_COLLEGE) => {
            if draft.other_college.trim().is_empty() {
                errors.insert(Field::OtherCollege, "College name is required".into());
            }
        }
        Some(name) => {
            if !config.known_college(name) {
                errors.insert(Field::College, "College is required".into());
            }
        }
    }

    match draft.year_of_study {
        Some(year) if config.year_enabled(year) => {}
        _ => {
            errors.insert(Field::YearOfStudy, "Year of study is required".into());
        }
    }

    if draft.branch.is_none() {
        errors.insert(Field::Branch, "Branch is required".into());
    }

    if draft.gender.is_none() {
        errors.insert(Field::Gender, "Gender is required".into());
    }
}

fn validate_payment(draft: &RegistrationDraft, errors: &mut ErrorMap) {
    if draft.transaction_id.trim().is_empty() {
        errors.insert(Field::TransactionId, "Transaction ID is required".into());
    } else if !is_alphanumeric_len(&draft.transaction_id, 8, 12) {
        errors.insert(
            Field::TransactionId,
            "Must be 8-12 alphanumeric characters".into(),
        );
    }

    // The upload pipeline records the hosted URL only on reaching its
    // terminal uploaded state, so "URL present" doubles as the state
    // check. Absence is a field error, not a blocking condition.
    if draft.screenshot_url.is_none() {
        errors.insert(Field::Screenshot, "Payment screenshot is required".into());
    }
}

/// ASCII-alphanumeric with a length in `min..=max`.
fn is_alphanumeric_len(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// `local@domain.tld` shape: non-empty local part, a domain containing
/// a dot with non-empty text on both sides, and no whitespace or
/// second `@` anywhere.
fn is_email_shaped(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    let clean = |part: &str| !part.is_empty() && !part.contains(['@', ' ', '\t']);
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    clean(local) && clean(host) && clean(tld)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::draft::{Branch, Gender, YearOfStudy};

    fn valid_personal() -> RegistrationDraft {
        RegistrationDraft {
            full_name: "Asha Rao".into(),
            registration_number: "AB12CD34EF".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            ..RegistrationDraft::default()
        }
    }

    #[test]
    fn empty_personal_step_reports_every_required_field() {
        let errors = validate_step(
            Step::Personal,
            &RegistrationDraft::default(),
            &FormConfig::default(),
        );
        let fields: Vec<Field> = errors.keys().copied().collect();
        assert_eq!(
            fields,
            vec![
                Field::FullName,
                Field::RegistrationNumber,
                Field::Email,
                Field::Phone
            ]
        );
    }

    #[test]
    fn valid_personal_step_passes() {
        let errors = validate_step(Step::Personal, &valid_personal(), &FormConfig::default());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn short_phone_is_rejected() {
        let draft = RegistrationDraft {
            phone: "12345".into(),
            ..valid_personal()
        };
        let errors = validate_step(Step::Personal, &draft, &FormConfig::default());
        assert_eq!(errors.get(&Field::Phone).unwrap(), "Must be 10 digits");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn registration_number_must_be_exactly_ten() {
        for bad in ["AB12", "AB12CD34EF9", "AB12-D34EF"] {
            let draft = RegistrationDraft {
                registration_number: bad.into(),
                ..valid_personal()
            };
            let errors = validate_step(Step::Personal, &draft, &FormConfig::default());
            assert!(errors.contains_key(&Field::RegistrationNumber), "{bad}");
        }
    }

    #[test]
    fn email_shapes() {
        for good in ["a@b.co", "asha.rao@mail.example.com", "x+y@sub.domain.io"] {
            assert!(is_email_shaped(good), "{good}");
        }
        for bad in ["", "plain", "a@b", "@b.co", "a@.co", "a@b.", "a b@c.io", "a@@b.co"] {
            assert!(!is_email_shaped(bad), "{bad}");
        }
    }

    #[test]
    fn affiliate_id_required_only_when_flagged() {
        let mut draft = valid_personal();
        draft.affiliate = true;
        let errors = validate_step(Step::Personal, &draft, &FormConfig::default());
        assert!(errors.contains_key(&Field::AffiliateId));

        draft.affiliate_id = "CC-0042".into();
        let errors = validate_step(Step::Personal, &draft, &FormConfig::default());
        assert!(errors.is_empty());

        draft.affiliate = false;
        draft.affiliate_id = String::new();
        let errors = validate_step(Step::Personal, &draft, &FormConfig::default());
        assert!(errors.is_empty());
    }

    fn valid_academic() -> RegistrationDraft {
        RegistrationDraft {
            college: Some("SRKR Engineering College".into()),
            year_of_study: Some(YearOfStudy::ThirdYear),
            branch: Some(Branch::Cse),
            gender: Some(Gender::Female),
            ..RegistrationDraft::default()
        }
    }

    #[test]
    fn academic_step_requires_every_selection() {
        let errors = validate_step(
            Step::Academic,
            &RegistrationDraft::default(),
            &FormConfig::default(),
        );
        for field in [Field::College, Field::YearOfStudy, Field::Branch, Field::Gender] {
            assert!(errors.contains_key(&field), "{field:?}");
        }
    }

    #[test]
    fn other_college_needs_free_text() {
        let mut draft = valid_academic();
        draft.college = Some(OTHER_COLLEGE.into());
        let errors = validate_step(Step::Academic, &draft, &FormConfig::default());
        assert_eq!(
            errors.get(&Field::OtherCollege).unwrap(),
            "College name is required"
        );

        draft.other_college = "XYZ Institute".into();
        let errors = validate_step(Step::Academic, &draft, &FormConfig::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn disabled_year_fails_even_if_well_formed() {
        let config = FormConfig {
            enabled_years: &[YearOfStudy::FirstYear, YearOfStudy::SecondYear],
            ..FormConfig::default()
        };
        let draft = valid_academic();
        let errors = validate_step(Step::Academic, &draft, &config);
        assert!(errors.contains_key(&Field::YearOfStudy));
    }

    #[test]
    fn handles_step_always_passes() {
        let errors = validate_step(
            Step::Handles,
            &RegistrationDraft::default(),
            &FormConfig::default(),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn payment_requires_transaction_id_and_screenshot() {
        let errors = validate_step(
            Step::Payment,
            &RegistrationDraft::default(),
            &FormConfig::default(),
        );
        assert!(errors.contains_key(&Field::TransactionId));
        assert_eq!(
            errors.get(&Field::Screenshot).unwrap(),
            "Payment screenshot is required"
        );
    }

    #[test]
    fn transaction_id_length_bounds() {
        let mut draft = RegistrationDraft {
            screenshot_url: Some("https://host/shot.jpg".into()),
            ..RegistrationDraft::default()
        };
        for (id, ok) in [
            ("ABCD123", false),
            ("ABCD1234", true),
            ("ABCD12345678", true),
            ("ABCD123456789", false),
        ] {
            draft.transaction_id = id.into();
            let errors = validate_step(Step::Payment, &draft, &FormConfig::default());
            assert_eq!(!errors.contains_key(&Field::TransactionId), ok, "{id}");
        }
    }

    #[test]
    fn confirm_requires_the_checkbox() {
        let draft = RegistrationDraft::default();
        let errors = validate_step(Step::Confirm, &draft, &FormConfig::default());
        assert!(errors.contains_key(&Field::Confirm));

        let draft = RegistrationDraft {
            confirmed: true,
            ..draft
        };
        let errors = validate_step(Step::Confirm, &draft, &FormConfig::default());
        assert!(errors.is_empty());
    }
}
