//! Locale-aware path resolution.
//!
//! Site paths have the shape `/<locale>/<segments...>[?query][#fragment]`.
//! The functions here derive the language-switcher target, canonical and
//! alternate URLs, and label fallbacks. None of them fail: malformed input
//! degrades to the root path.

use crate::i18n::{LocaleCode, LocaleRegistry};
use serde::Serialize;
use tracing::debug;

/// One `<link rel="alternate" hreflang=..>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

/// Path of the current page in the sibling locale.
///
/// If the first segment is a locale it is replaced by `current_locale.other()`,
/// otherwise the sibling locale is inserted as the new first segment. No
/// other segment is touched; query string, fragment and a trailing slash are
/// carried over. An empty path is treated as `/`.
///
/// # Example
/// ```ignore
/// assert_eq!(resolve_sibling_path("/de/leistungen", LocaleCode::De), "/en/leistungen");
/// assert_eq!(resolve_sibling_path("/de", LocaleCode::De), "/en");
/// ```
pub fn resolve_sibling_path(current_path: &str, current_locale: LocaleCode) -> String {
    let target = current_locale.other();
    let (path, suffix) = split_suffix(current_path);
    let rest = strip_locale_segment(path);

    if rest.is_empty() {
        format!("/{}{}", target.code(), suffix)
    } else {
        format!("/{}{}{}", target.code(), rest, suffix)
    }
}

/// Locale named by the first path segment, if any.
pub fn locale_from_path(path: &str) -> Option<LocaleCode> {
    let (path, _) = split_suffix(path);
    let (first, _) = split_first_segment(path);
    if is_locale_segment(first) {
        LocaleCode::from_code(first).ok()
    } else {
        None
    }
}

/// The path with its locale segment (if any) removed; always begins with
/// `/` unless empty.
///
/// `"/de/karriere"` becomes `"/karriere"`, `"/de"` becomes `""`.
pub fn strip_locale_segment(path: &str) -> String {
    let (first, rest) = split_first_segment(path);
    if is_locale_segment(first) {
        rest.to_string()
    } else if first.is_empty() && rest.is_empty() {
        String::new()
    } else {
        format!("/{}{}", first, rest)
    }
}

/// Prefix a locale-less path with `/<locale>`.
pub fn localized_path(locale: LocaleCode, path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        format!("/{}", locale.code())
    } else {
        format!("/{}/{}", locale.code(), trimmed)
    }
}

/// Absolute canonical URL for a path: query string and fragment dropped.
pub fn canonical_url(base_url: &str, path: &str) -> String {
    let (path, _) = split_suffix(path);
    let path = if path.is_empty() { "/" } else { path };
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// `hreflang` alternates for the page at `path` rendered in `locale`.
///
/// One entry per site locale, plus `x-default` pointing at the default
/// locale's variant.
pub fn alternate_urls(base_url: &str, path: &str, locale: LocaleCode) -> Vec<AlternateLink> {
    let (bare, _) = split_suffix(path);
    let localized = if locale_from_path(bare) == Some(locale) {
        bare.to_string()
    } else {
        localized_path(locale, &strip_locale_segment(bare))
    };

    let variant = |target: LocaleCode| {
        if target == locale {
            localized.clone()
        } else {
            resolve_sibling_path(&localized, locale)
        }
    };

    let mut links: Vec<AlternateLink> = LocaleCode::ALL
        .iter()
        .map(|target| AlternateLink {
            hreflang: target.html_lang().to_string(),
            href: canonical_url(base_url, &variant(*target)),
        })
        .collect();

    links.push(AlternateLink {
        hreflang: "x-default".to_string(),
        href: canonical_url(base_url, &variant(LocaleCode::default_locale())),
    });

    links
}

/// Use `value` unless it is missing or blank, in which case `fallback`.
pub fn label_or_default(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => {
            debug!("Label missing, using fallback '{}'", fallback);
            fallback.to_string()
        }
    }
}

/// Split `path?query#fragment` into `(path, "?query#fragment")`.
fn split_suffix(path: &str) -> (&str, &str) {
    match path.find(['?', '#']) {
        Some(index) => path.split_at(index),
        None => (path, ""),
    }
}

/// Split `/first/rest...` into `("first", "/rest...")`; a missing leading
/// slash is tolerated.
fn split_first_segment(path: &str) -> (&str, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(index) => trimmed.split_at(index),
        None => (trimmed, ""),
    }
}

/// Locale prefixes match case-insensitively, like `LocaleCode::from_code`.
fn is_locale_segment(segment: &str) -> bool {
    LocaleRegistry::get().is_supported(&segment.to_ascii_lowercase())
}
