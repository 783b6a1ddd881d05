use crate::carousel::CarouselConfig;
use crate::i18n::LocaleCode;
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub site_base_url: String,
    pub default_locale: LocaleCode,

    // Contact form
    pub contact_forward_url: Option<String>,

    // External providers (absent => degraded mode)
    pub unsplash_access_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,

    // Carousels
    pub testimonials_interval_ms: u64,
    pub career_interval_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            site_base_url: std::env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            default_locale: match std::env::var("DEFAULT_LOCALE") {
                Ok(code) => LocaleCode::from_code(&code).context("DEFAULT_LOCALE is invalid")?,
                Err(_) => LocaleCode::default_locale(),
            },

            // Contact form
            contact_forward_url: optional_var("CONTACT_FORWARD_URL"),

            // External providers
            unsplash_access_key: optional_var("UNSPLASH_ACCESS_KEY"),
            elevenlabs_api_key: optional_var("ELEVENLABS_API_KEY"),

            // Carousels
            testimonials_interval_ms: std::env::var("TESTIMONIALS_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(6000),
            career_interval_ms: std::env::var("CAREER_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(5000),
        })
    }

    pub fn testimonials_carousel(&self) -> CarouselConfig {
        CarouselConfig::new(Duration::from_millis(self.testimonials_interval_ms))
    }

    pub fn career_carousel(&self) -> CarouselConfig {
        CarouselConfig::new(Duration::from_millis(self.career_interval_ms))
    }
}

/// Read a variable, treating empty values as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
