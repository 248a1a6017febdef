//! Wire types for the registration backend.
//!
//! [`RegistrationPayload`] is the assembled outbound body; the
//! response and signed-upload-credential types live here too so the
//! IO layer decodes against one shared contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::{Branch, Gender, RegistrationDraft, YearOfStudy, OTHER_COLLEGE};

/// A required field was missing at assembly time.
///
/// Unreachable when the wizard's validation gate is honored; kept as
/// a defensive check rather than a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing required field: {0}")]
pub struct PayloadError(pub &'static str);

/// The JSON body POSTed to `/registration`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub full_name: String,
    pub registration_number: String,
    pub email: String,
    pub phone: String,
    /// The selected college; "Other" is normalized to the free-text
    /// value before assembly.
    pub college_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
    pub year_of_study: YearOfStudy,
    pub branch: Branch,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codechef_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leetcode_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codeforces_handle: Option<String>,
    pub transaction_id: String,
    pub screenshot_url: String,
}

impl RegistrationPayload {
    /// Assemble the outbound payload from a validated draft.
    ///
    /// Empty optional fields are omitted rather than sent as empty
    /// strings.
    ///
    /// # Errors
    ///
    /// [`PayloadError`] naming the first required field that is
    /// missing.
    pub fn from_draft(draft: &RegistrationDraft) -> Result<Self, PayloadError> {
        let college_name = match draft.college.as_deref() {
            Some(OTHER_COLLEGE) => {
                let name = draft.other_college.trim();
                if name.is_empty() {
                    return Err(PayloadError("collegeName"));
                }
                name.to_owned()
            }
            Some(name) => name.to_owned(),
            None => return Err(PayloadError("collegeName")),
        };

        Ok(Self {
            full_name: draft.full_name.trim().to_owned(),
            registration_number: draft.registration_number.clone(),
            email: draft.email.trim().to_owned(),
            phone: draft.phone.clone(),
            college_name,
            affiliate_id: draft
                .affiliate
                .then(|| draft.affiliate_id.trim().to_owned()),
            year_of_study: draft.year_of_study.ok_or(PayloadError("yearOfStudy"))?,
            branch: draft.branch.ok_or(PayloadError("branch"))?,
            gender: draft.gender.ok_or(PayloadError("gender"))?,
            codechef_handle: non_empty(&draft.codechef_handle),
            leetcode_handle: non_empty(&draft.leetcode_handle),
            codeforces_handle: non_empty(&draft.codeforces_handle),
            transaction_id: draft.transaction_id.clone(),
            screenshot_url: draft
                .screenshot_url
                .clone()
                .ok_or(PayloadError("screenshotUrl"))?,
        })
    }
}

/// The backend's acknowledgment of an accepted registration.
///
/// Only the human-readable code is contractual; everything else the
/// backend returns is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub registration_code: String,
}

/// Short-lived credential authorizing one signed upload to the image
/// host. Fetched fresh for every attempt, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignature {
    pub timestamp: i64,
    pub signature: String,
    pub api_key: String,
    pub cloud_name: String,
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_draft() -> RegistrationDraft {
        RegistrationDraft {
            full_name: "Asha Rao".into(),
            registration_number: "AB12CD34EF".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            college: Some(OTHER_COLLEGE.into()),
            other_college: "XYZ Institute".into(),
            year_of_study: Some(YearOfStudy::ThirdYear),
            branch: Some(Branch::Cse),
            gender: Some(Gender::Female),
            transaction_id: "ABCD12345678".into(),
            screenshot_url: Some("https://host/shot.jpg".into()),
            confirmed: true,
            ..RegistrationDraft::default()
        }
    }

    #[test]
    fn other_college_normalizes_to_free_text() {
        let payload = RegistrationPayload::from_draft(&full_draft()).unwrap();
        assert_eq!(payload.college_name, "XYZ Institute");
    }

    #[test]
    fn empty_handles_are_omitted() {
        let payload = RegistrationPayload::from_draft(&full_draft()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("codechefHandle"));
        assert!(!obj.contains_key("leetcodeHandle"));
        assert!(!obj.contains_key("codeforcesHandle"));
        assert!(!obj.contains_key("affiliateId"));
    }

    #[test]
    fn wire_form_is_camel_case_with_enum_names() {
        let mut draft = full_draft();
        draft.codechef_handle = "asha_cc".into();
        let json = serde_json::to_value(RegistrationPayload::from_draft(&draft).unwrap()).unwrap();

        assert_eq!(json["fullName"], "Asha Rao");
        assert_eq!(json["registrationNumber"], "AB12CD34EF");
        assert_eq!(json["yearOfStudy"], "THIRD_YEAR");
        assert_eq!(json["branch"], "CSE");
        assert_eq!(json["gender"], "FEMALE");
        assert_eq!(json["codechefHandle"], "asha_cc");
        assert_eq!(json["transactionId"], "ABCD12345678");
        assert_eq!(json["screenshotUrl"], "https://host/shot.jpg");
    }

    #[test]
    fn affiliate_id_sent_only_when_flagged() {
        let mut draft = full_draft();
        draft.affiliate = true;
        draft.affiliate_id = "CC-0042".into();
        let json = serde_json::to_value(RegistrationPayload::from_draft(&draft).unwrap()).unwrap();
        assert_eq!(json["affiliateId"], "CC-0042");
    }

    #[test]
    fn missing_screenshot_is_a_named_error() {
        let mut draft = full_draft();
        draft.screenshot_url = None;
        assert_eq!(
            RegistrationPayload::from_draft(&draft),
            Err(PayloadError("screenshotUrl"))
        );
    }

    #[test]
    fn missing_selections_are_named_errors() {
        let mut draft = full_draft();
        draft.college = None;
        assert_eq!(
            RegistrationPayload::from_draft(&draft),
            Err(PayloadError("collegeName"))
        );

        let mut draft = full_draft();
        draft.year_of_study = None;
        assert_eq!(
            RegistrationPayload::from_draft(&draft),
            Err(PayloadError("yearOfStudy"))
        );
    }

    #[test]
    fn signature_decodes_from_backend_shape() {
        let sig: UploadSignature = serde_json::from_str(
            r#"{"timestamp":1764000000,"signature":"deadbeef","apiKey":"key1","cloudName":"demo"}"#,
        )
        .unwrap();
        assert_eq!(sig.cloud_name, "demo");
        assert_eq!(sig.api_key, "key1");
    }

    #[test]
    fn record_ignores_extra_fields() {
        let record: RegistrationRecord = serde_json::from_str(
            r#"{"id":"u_1","registrationCode":"IC2K26-7F3A9B","paymentStatus":"PENDING"}"#,
        )
        .unwrap();
        assert_eq!(record.registration_code, "IC2K26-7F3A9B");
    }
}
