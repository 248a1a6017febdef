//! Deployment-level form configuration.
//!
//! Captures the parts of the form that vary per event rather than per
//! session: which colleges appear in the select, and which years of
//! study are eligible.

use crate::draft::YearOfStudy;

/// Colleges offered in the select, in display order. The UI appends
/// the [`crate::draft::OTHER_COLLEGE`] sentinel after these.
pub const DEFAULT_COLLEGES: &[&str] = &[
    "SRKR Engineering College",
    "SVEC Tadepalligudem",
    "Vishnu Institute of Technology",
];

/// Which fields of the form vary per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Named colleges offered in the select (excluding "Other").
    pub colleges: &'static [&'static str],
    /// Years of study eligible to register. Selections outside this
    /// subset fail validation even if the enum value is well-formed.
    pub enabled_years: &'static [YearOfStudy],
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            colleges: DEFAULT_COLLEGES,
            enabled_years: &YearOfStudy::ALL,
        }
    }
}

impl FormConfig {
    /// Whether the given year is eligible under this configuration.
    #[must_use]
    pub fn year_enabled(&self, year: YearOfStudy) -> bool {
        self.enabled_years.contains(&year)
    }

    /// Whether the given selection names a configured college or the
    /// "Other" sentinel.
    #[must_use]
    pub fn known_college(&self, name: &str) -> bool {
        name == crate::draft::OTHER_COLLEGE || self.colleges.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_all_years() {
        let config = FormConfig::default();
        for year in YearOfStudy::ALL {
            assert!(config.year_enabled(year));
        }
    }

    #[test]
    fn restricted_years_exclude_the_rest() {
        let config = FormConfig {
            enabled_years: &[YearOfStudy::SecondYear, YearOfStudy::ThirdYear],
            ..FormConfig::default()
        };
        assert!(!config.year_enabled(YearOfStudy::FirstYear));
        assert!(config.year_enabled(YearOfStudy::ThirdYear));
        assert!(!config.year_enabled(YearOfStudy::FourthYear));
    }

    #[test]
    fn other_is_always_a_known_college() {
        let config = FormConfig::default();
        assert!(config.known_college("Other"));
        assert!(config.known_college("SRKR Engineering College"));
        assert!(!config.known_college("Made Up University"));
    }
}
