//! Internationalization (i18n) for the German/English site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for site locales and their metadata
//! - `locale`: The `LocaleCode` enum every request is rendered in
//! - `strings`: Per-locale label sets (one struct, one constant per locale)
//! - `validator`: Startup check that every label set is complete
//! - `resolver`: Sibling-path, canonical/alternate URL and label fallback logic
//!
//! # Example
//!
//! ```rust,ignore
//! use site_kit::i18n::{resolve_sibling_path, LocaleCode};
//!
//! let locale = LocaleCode::from_code("de")?;
//! let switch_to = resolve_sibling_path("/de/karriere", locale); // "/en/karriere"
//! ```

mod locale;
mod registry;
mod resolver;
mod strings;
mod validator;

pub use locale::LocaleCode;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use resolver::{
    alternate_urls, canonical_url, label_or_default, locale_from_path, localized_path,
    resolve_sibling_path, strip_locale_segment, AlternateLink,
};
pub use strings::{fill, SiteStrings, ENGLISH_STRINGS, GERMAN_STRINGS};
pub use validator::{StringsValidator, ValidationReport};
