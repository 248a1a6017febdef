//! The registration draft record and its typed field edits.
//!
//! The draft is a single flat record: conditionally-required fields
//! (`other_college`, `affiliate_id`) are always present, and their
//! requiredness is purely a property of the validation rule table in
//! [`crate::validate`]. Edits arrive as a [`FieldEdit`] so input
//! sanitization (character filtering, truncation, case normalization)
//! happens in exactly one place.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel college selection that switches the free-text college
/// field on. Compared verbatim against [`RegistrationDraft::college`].
pub const OTHER_COLLEGE: &str = "Other";

/// Year of study, serialized in the backend's wire form
/// (`FIRST_YEAR`, `SECOND_YEAR`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YearOfStudy {
    FirstYear,
    SecondYear,
    ThirdYear,
    FourthYear,
}

impl YearOfStudy {
    /// All years, in academic order. Deployments may enable a subset
    /// via [`crate::config::FormConfig::enabled_years`].
    pub const ALL: [Self; 4] = [
        Self::FirstYear,
        Self::SecondYear,
        Self::ThirdYear,
        Self::FourthYear,
    ];

    /// Human-readable label for select options.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstYear => "1st Year",
            Self::SecondYear => "2nd Year",
            Self::ThirdYear => "3rd Year",
            Self::FourthYear => "4th Year",
        }
    }

    /// Wire-form name (`FIRST_YEAR`, ...), used as the select value.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::FirstYear => "FIRST_YEAR",
            Self::SecondYear => "SECOND_YEAR",
            Self::ThirdYear => "THIRD_YEAR",
            Self::FourthYear => "FOURTH_YEAR",
        }
    }

    /// Parse a wire-form name back into a year.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|y| y.wire_name() == name)
    }
}

impl fmt::Display for YearOfStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Academic branch, serialized in the backend's wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Branch {
    Cse,
    Csbs,
    Csd,
    Csit,
    It,
    AiDs,
    AiMl,
    Ece,
    Eee,
    Mech,
    Civil,
    Chem,
    Bio,
    Other,
}

impl Branch {
    /// All branches, in display order.
    pub const ALL: [Self; 14] = [
        Self::Cse,
        Self::Csbs,
        Self::Csd,
        Self::Csit,
        Self::It,
        Self::AiDs,
        Self::AiMl,
        Self::Ece,
        Self::Eee,
        Self::Mech,
        Self::Civil,
        Self::Chem,
        Self::Bio,
        Self::Other,
    ];

    /// Wire-form name, also used as the display label.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Cse => "CSE",
            Self::Csbs => "CSBS",
            Self::Csd => "CSD",
            Self::Csit => "CSIT",
            Self::It => "IT",
            Self::AiDs => "AI_DS",
            Self::AiMl => "AI_ML",
            Self::Ece => "ECE",
            Self::Eee => "EEE",
            Self::Mech => "MECH",
            Self::Civil => "CIVIL",
            Self::Chem => "CHEM",
            Self::Bio => "BIO",
            Self::Other => "OTHER",
        }
    }

    /// Parse a wire-form name back into a branch.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.wire_name() == name)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Gender, serialized in the backend's wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    /// All genders, in display order.
    pub const ALL: [Self; 4] = [Self::Male, Self::Female, Self::Other, Self::PreferNotToSay];

    /// Human-readable label for select options.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }

    /// Wire-form name, used as the select value.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
            Self::PreferNotToSay => "PREFER_NOT_TO_SAY",
        }
    }

    /// Parse a wire-form name back into a gender.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.wire_name() == name)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one draft field for error reporting.
///
/// Keys of the per-step [`crate::validate::ErrorMap`]; ordered so
/// error maps iterate in a stable field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    FullName,
    RegistrationNumber,
    Email,
    Phone,
    AffiliateId,
    College,
    OtherCollege,
    YearOfStudy,
    Branch,
    Gender,
    CodechefHandle,
    LeetcodeHandle,
    CodeforcesHandle,
    TransactionId,
    Screenshot,
    Confirm,
}

/// A single user edit to the draft.
///
/// Carries the raw input value; [`RegistrationDraft::apply`] sanitizes
/// it before writing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    FullName(String),
    RegistrationNumber(String),
    Email(String),
    Phone(String),
    Affiliate(bool),
    AffiliateId(String),
    College(Option<String>),
    OtherCollege(String),
    YearOfStudy(Option<YearOfStudy>),
    Branch(Option<Branch>),
    Gender(Option<Gender>),
    CodechefHandle(String),
    LeetcodeHandle(String),
    CodeforcesHandle(String),
    TransactionId(String),
    Confirm(bool),
}

impl FieldEdit {
    /// The field this edit touches, used to eagerly clear that
    /// field's visible error.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::FullName(_) => Field::FullName,
            Self::RegistrationNumber(_) => Field::RegistrationNumber,
            Self::Email(_) => Field::Email,
            Self::Phone(_) => Field::Phone,
            // Toggling the flag changes whether the id is required,
            // so both edits map to the id's error slot.
            Self::Affiliate(_) | Self::AffiliateId(_) => Field::AffiliateId,
            Self::College(_) => Field::College,
            Self::OtherCollege(_) => Field::OtherCollege,
            Self::YearOfStudy(_) => Field::YearOfStudy,
            Self::Branch(_) => Field::Branch,
            Self::Gender(_) => Field::Gender,
            Self::CodechefHandle(_) => Field::CodechefHandle,
            Self::LeetcodeHandle(_) => Field::LeetcodeHandle,
            Self::CodeforcesHandle(_) => Field::CodeforcesHandle,
            Self::TransactionId(_) => Field::TransactionId,
            Self::Confirm(_) => Field::Confirm,
        }
    }
}

/// One wizard session's worth of form state.
///
/// Never persisted; lives for the duration of a single page view and
/// is discarded on success or navigation away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub registration_number: String,
    pub email: String,
    pub phone: String,
    pub affiliate: bool,
    pub affiliate_id: String,
    pub college: Option<String>,
    pub other_college: String,
    pub year_of_study: Option<YearOfStudy>,
    pub branch: Option<Branch>,
    pub gender: Option<Gender>,
    pub codechef_handle: String,
    pub leetcode_handle: String,
    pub codeforces_handle: String,
    pub transaction_id: String,
    /// Hosted screenshot URL. Written exactly once per successful
    /// upload by the upload pipeline; cleared on remove.
    pub screenshot_url: Option<String>,
    pub confirmed: bool,
}

impl RegistrationDraft {
    /// Apply one edit, sanitizing the value, and return which field
    /// was touched.
    pub fn apply(&mut self, edit: FieldEdit) -> Field {
        let field = edit.field();
        match edit {
            FieldEdit::FullName(v) => self.full_name = v,
            FieldEdit::RegistrationNumber(v) => {
                self.registration_number = keep_alphanumeric(&v, 10);
            }
            FieldEdit::Email(v) => self.email = v,
            FieldEdit::Phone(v) => self.phone = keep_digits(&v, 10),
            FieldEdit::Affiliate(v) => self.affiliate = v,
            FieldEdit::AffiliateId(v) => self.affiliate_id = v,
            FieldEdit::College(v) => self.college = v,
            FieldEdit::OtherCollege(v) => self.other_college = v,
            FieldEdit::YearOfStudy(v) => self.year_of_study = v,
            FieldEdit::Branch(v) => self.branch = v,
            FieldEdit::Gender(v) => self.gender = v,
            FieldEdit::CodechefHandle(v) => self.codechef_handle = v,
            FieldEdit::LeetcodeHandle(v) => self.leetcode_handle = v,
            FieldEdit::CodeforcesHandle(v) => self.codeforces_handle = v,
            FieldEdit::TransactionId(v) => {
                self.transaction_id = keep_alphanumeric(&v, 12).to_ascii_uppercase();
            }
            FieldEdit::Confirm(v) => self.confirmed = v,
        }
        field
    }
}

/// Keep only ASCII alphanumeric characters, truncated to `max`.
fn keep_alphanumeric(s: &str, max: usize) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .take(max)
        .collect()
}

/// Keep only ASCII digits, truncated to `max`.
fn keep_digits(s: &str, max: usize) -> String {
    s.chars()
        .filter(char::is_ascii_digit)
        .take(max)
        .collect()
}
