use crate::error::SiteError;
use crate::i18n::{fill, LocaleCode};
use anyhow::anyhow;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

/// Shortest message accepted by the form, in characters.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Payload posted by the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub lang: LocaleCode,
    /// Hidden field; humans leave it empty
    #[serde(default)]
    pub honeypot: String,
}

/// Inline error attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Success-shaped response of the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
}

/// Error body of the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{} invalid field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("submission rejected with HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("contact endpoint returned HTTP {0}")]
    Status(u16),

    #[error("failed to reach contact endpoint: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<ContactError> for SiteError {
    fn from(e: ContactError) -> Self {
        match e {
            ContactError::Validation(_) => SiteError::Validation(e.to_string()),
            ContactError::Transport(_) => SiteError::Transient(e.to_string()),
            ContactError::Status(status) | ContactError::Rejected { status, .. }
                if status >= 500 =>
            {
                SiteError::Transient(e.to_string())
            }
            ContactError::Rejected { .. } | ContactError::Status(_) => {
                SiteError::Unexpected(anyhow!(e.to_string()))
            }
        }
    }
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^\+?[0-9 ()/\-]{6,20}$").expect("phone pattern is valid")
    })
}

impl ContactSubmission {
    /// Any honeypot content, whitespace included, marks a bot.
    pub fn is_spam(&self) -> bool {
        !self.honeypot.is_empty()
    }

    /// Per-field validation with messages in the submission's locale.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let strings = self.lang.strings();
        let mut errors = Vec::new();
        let mut reject = |field: &str, message: String| {
            errors.push(FieldError {
                field: field.to_string(),
                message,
            })
        };

        if self.name.trim().is_empty() {
            reject("name", strings.form_name_required.to_string());
        }

        if !email_regex().is_match(self.email.trim()) {
            reject("email", strings.form_email_invalid.to_string());
        }

        if self.message.trim().chars().count() < MIN_MESSAGE_CHARS {
            reject(
                "message",
                fill(
                    strings.form_message_too_short,
                    &[("min", MIN_MESSAGE_CHARS.to_string().as_str())],
                ),
            );
        }

        if let Some(phone) = self.phone.as_deref().map(str::trim) {
            if !phone.is_empty() && !phone_regex().is_match(phone) {
                reject("phone", strings.form_phone_invalid.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Client for the contact endpoint. Submissions are never retried
/// automatically; the form offers a manual retry instead.
#[derive(Debug, Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Validate locally, then post the submission.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        submission.validate().map_err(ContactError::Validation)?;

        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("Contact form submitted ({})", submission.lang);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Contact endpoint returned {}: {}", status, body);
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error) if !error.fields.is_empty() => Err(ContactError::Validation(error.fields)),
            Ok(error) => Err(ContactError::Rejected {
                status: status.as_u16(),
                message: error.error,
            }),
            Err(_) => Err(ContactError::Status(status.as_u16())),
        }
    }
}
