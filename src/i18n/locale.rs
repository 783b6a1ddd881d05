//! LocaleCode: the closed set of locales a request can be rendered in.

use crate::i18n::{LocaleConfig, LocaleRegistry, SiteStrings, ENGLISH_STRINGS, GERMAN_STRINGS};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active locale of a request or session.
///
/// All site paths are prefixed with `/<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    De,
    En,
}

impl LocaleCode {
    /// Every locale, in language-switcher order.
    pub const ALL: [LocaleCode; 2] = [LocaleCode::De, LocaleCode::En];

    /// Parse a locale from its two-letter code.
    ///
    /// Matching is case-insensitive so `Accept-Language`-style input like
    /// "DE" is accepted.
    ///
    /// # Returns
    /// * `Ok(LocaleCode)` if the code names a site locale
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<LocaleCode> {
        match code.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(LocaleCode::De),
            "en" => Ok(LocaleCode::En),
            "" => bail!("Empty locale code"),
            other => bail!("Unknown locale code: '{}'", other),
        }
    }

    /// The locale served when a request names none.
    pub fn default_locale() -> LocaleCode {
        match LocaleRegistry::get().default_locale().code {
            "en" => LocaleCode::En,
            _ => LocaleCode::De,
        }
    }

    /// Two-letter path prefix.
    pub fn code(&self) -> &'static str {
        match self {
            LocaleCode::De => "de",
            LocaleCode::En => "en",
        }
    }

    /// The sibling locale targeted by the language switcher.
    pub fn other(&self) -> LocaleCode {
        match self {
            LocaleCode::De => LocaleCode::En,
            LocaleCode::En => LocaleCode::De,
        }
    }

    /// Registry metadata for this locale.
    ///
    /// # Panics
    /// Panics if the registry is missing an entry for a `LocaleCode`
    /// variant, which `default_locales` guarantees against.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code())
            .expect("Every LocaleCode variant is registered")
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn html_lang(&self) -> &'static str {
        self.config().html_lang
    }

    /// Localized label set for this locale.
    pub fn strings(&self) -> &'static SiteStrings {
        match self {
            LocaleCode::De => &GERMAN_STRINGS,
            LocaleCode::En => &ENGLISH_STRINGS,
        }
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
