//! Per-request composition of locale resolution and navigation.

use crate::i18n::{
    alternate_urls, canonical_url, fill, locale_from_path, localized_path, resolve_sibling_path,
    strip_locale_segment, AlternateLink, LocaleCode,
};
use crate::navigation::{active_item, default_items, derive_items, NavigationItem};
use serde::Serialize;

/// Everything a page needs to render its header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub locale: LocaleCode,
    pub html_lang: &'static str,
    /// Request path with its locale segment applied
    pub path: String,
    pub navigation: Vec<NavigationItem>,
    pub active_item: Option<String>,
    pub language_switch: LanguageSwitch,
    pub canonical_url: String,
    pub alternates: Vec<AlternateLink>,
}

/// Target of the language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSwitch {
    pub locale: LocaleCode,
    pub href: String,
    pub label: String,
}

impl PageContext {
    /// Resolve the header for `path`.
    ///
    /// The locale comes from the path prefix, else `requested`, else
    /// `default_locale`. A path without a prefix is rendered under the
    /// chosen locale.
    pub fn resolve(
        path: &str,
        requested: Option<LocaleCode>,
        default_locale: LocaleCode,
        base_url: &str,
    ) -> Self {
        let locale = locale_from_path(path)
            .or(requested)
            .unwrap_or(default_locale);

        let path = if locale_from_path(path) == Some(locale) {
            path.to_string()
        } else {
            localized_path(locale, &strip_locale_segment(path))
        };

        let navigation = derive_items(&default_items(locale), locale);
        let active = active_item(&navigation, &path).map(|item| item.id.clone());

        let sibling = locale.other();
        let language_switch = LanguageSwitch {
            locale: sibling,
            href: resolve_sibling_path(&path, locale),
            label: fill(
                locale.strings().language_switch,
                &[("language", sibling.native_name())],
            ),
        };

        Self {
            locale,
            html_lang: locale.html_lang(),
            canonical_url: canonical_url(base_url, &path),
            alternates: alternate_urls(base_url, &path, locale),
            navigation,
            active_item: active,
            language_switch,
            path,
        }
    }
}
