//! Error taxonomy shared by every component.
//!
//! Nothing here is fatal to the process: each failure is scoped to the
//! component that raised it and ends up either as a degraded rendering or as
//! a localized inline message.

use crate::i18n::LocaleCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum SiteError {
    /// A required key or setting is absent. Callers normally degrade
    /// instead of surfacing this.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A collaborator call failed in a way a manual retry may fix.
    #[error("transient failure: {0}")]
    Transient(String),

    /// User input was rejected.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl SiteError {
    /// Whether the inline message should offer a retry action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SiteError::Transient(_))
    }

    /// Localized inline message for this error.
    pub fn user_message(&self, locale: LocaleCode) -> &'static str {
        let strings = locale.strings();
        match self {
            SiteError::Transient(_) => strings.error_transient,
            SiteError::Validation(_) => strings.error_validation,
            SiteError::Configuration(_) | SiteError::Unexpected(_) => strings.error_unexpected,
        }
    }
}

/// Page boundary: log a component failure and turn it into the localized
/// message rendered in its place.
pub fn render_boundary<T>(
    component: &str,
    result: Result<T, SiteError>,
    locale: LocaleCode,
) -> Result<T, &'static str> {
    result.map_err(|e| {
        error!("{} failed: {:#}", component, e);
        e.user_message(locale)
    })
}
