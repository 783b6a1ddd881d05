//! Label set validation.
//!
//! Every locale's `SiteStrings` is checked once at startup: labels must be
//! non-empty and carry the same `{placeholders}` as the default locale,
//! otherwise `fill` would silently leave a raw `{name}` in the page.

use crate::i18n::{LocaleCode, SiteStrings};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that must abort startup
    pub errors: Vec<String>,

    /// Suspicious but renderable labels
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for localized label sets.
pub struct StringsValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl StringsValidator {
    /// Validate every site locale against the default locale.
    pub fn validate_all() -> ValidationReport {
        let reference = LocaleCode::default_locale();
        let mut report = ValidationReport::new();

        for locale in LocaleCode::ALL {
            report.merge(Self::validate(
                reference.strings(),
                locale.strings(),
                locale.code(),
            ));
        }

        report
    }

    /// Validate `candidate` against `reference`.
    ///
    /// # Arguments
    /// * `reference` - The default locale's label set
    /// * `candidate` - The label set to check
    /// * `code` - Locale code used in report messages
    pub fn validate(
        reference: &SiteStrings,
        candidate: &SiteStrings,
        code: &str,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        for ((field, expected), (_, actual)) in
            reference.entries().into_iter().zip(candidate.entries())
        {
            if actual.trim().is_empty() {
                report
                    .errors
                    .push(format!("[{}] label '{}' is empty", code, field));
                continue;
            }

            let expected_placeholders = Self::extract_placeholders(expected);
            let actual_placeholders = Self::extract_placeholders(actual);
            if expected_placeholders != actual_placeholders {
                report.errors.push(format!(
                    "[{}] placeholder mismatch in '{}': expected {:?}, found {:?}",
                    code, field, expected_placeholders, actual_placeholders
                ));
            }

            if actual != actual.trim() {
                report.warnings.push(format!(
                    "[{}] label '{}' has leading or trailing whitespace",
                    code, field
                ));
            }
        }

        report
    }

    /// Extract the set of `{name}` placeholders from a label
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| {
            Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid")
        });

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
