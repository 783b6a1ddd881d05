use crate::i18n::{localized_path, LocaleCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Id of the search entry `derive_items` appends when a page omits it.
pub const SEARCH_ID: &str = "search";

/// One entry of a page's navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    /// Unique within one list
    pub id: String,
    pub label: String,
    pub href: String,
}

impl NavigationItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("duplicate navigation id '{0}'")]
    DuplicateId(String),
}

/// Static navigation of the site for `locale`.
///
/// Slugs are shared between locales so the language switcher only has to
/// swap the locale segment.
pub fn default_items(locale: LocaleCode) -> Vec<NavigationItem> {
    let strings = locale.strings();
    vec![
        NavigationItem::new("home", strings.nav_home, localized_path(locale, "")),
        NavigationItem::new(
            "services",
            strings.nav_services,
            localized_path(locale, "services"),
        ),
        NavigationItem::new("about", strings.nav_about, localized_path(locale, "about")),
        NavigationItem::new(
            "career",
            strings.nav_career,
            localized_path(locale, "career"),
        ),
        NavigationItem::new(
            "contact",
            strings.nav_contact,
            localized_path(locale, "contact"),
        ),
    ]
}

/// Items to render: `base_items` plus any missing implicit entry.
///
/// If an item with id `"search"` is already present the list is returned
/// unchanged (as a new `Vec`); otherwise the search entry is appended with
/// the locale's label. Existing order is preserved.
pub fn derive_items(base_items: &[NavigationItem], locale: LocaleCode) -> Vec<NavigationItem> {
    let mut items = base_items.to_vec();
    if !items.iter().any(|item| item.id == SEARCH_ID) {
        items.push(NavigationItem::new(
            SEARCH_ID,
            locale.strings().nav_search,
            localized_path(locale, SEARCH_ID),
        ));
    }
    items
}

/// The item whose href is the longest segment-wise prefix of `path`.
///
/// A locale root (`/de`) only matches itself, not every page under it.
pub fn active_item<'a>(items: &'a [NavigationItem], path: &str) -> Option<&'a NavigationItem> {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    items
        .iter()
        .filter(|item| {
            let href = item.href.trim_end_matches('/');
            let is_root = href.matches('/').count() <= 1;
            if path == href {
                return true;
            }
            !is_root
                && path
                    .strip_prefix(href)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .max_by_key(|item| item.href.len())
}

/// Reject lists that reuse an id.
pub fn validate_unique_ids(items: &[NavigationItem]) -> Result<(), NavigationError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(NavigationError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== derive_items Tests ====================

    #[test]
    fn test_derive_appends_search_at_end() {
        let base = default_items(LocaleCode::De);
        let items = derive_items(&base, LocaleCode::De);

        assert_eq!(items.len(), base.len() + 1);
        assert_eq!(&items[..base.len()], &base[..]);

        let search = items.last().unwrap();
        assert_eq!(search.id, "search");
        assert_eq!(search.label, "Suche");
        assert_eq!(search.href, "/de/search");
    }

    #[test]
    fn test_derive_uses_locale_label() {
        let items = derive_items(&[], LocaleCode::En);
        assert_eq!(items, vec![NavigationItem::new("search", "Search", "/en/search")]);
    }

    #[test]
    fn test_derive_keeps_existing_search() {
        let base = vec![
            NavigationItem::new("search", "Finden", "/de/finden"),
            NavigationItem::new("home", "Start", "/de"),
        ];
        let items = derive_items(&base, LocaleCode::De);
        assert_eq!(items, base);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let once = derive_items(&default_items(LocaleCode::En), LocaleCode::En);
        let twice = derive_items(&once, LocaleCode::En);
        assert_eq!(once, twice);
    }

    // ==================== active_item Tests ====================

    #[test]
    fn test_active_item_nested_page() {
        let items = default_items(LocaleCode::De);
        let active = active_item(&items, "/de/career/junior-consultant").unwrap();
        assert_eq!(active.id, "career");
    }

    #[test]
    fn test_active_item_root_only_matches_itself() {
        let items = default_items(LocaleCode::En);
        assert_eq!(active_item(&items, "/en").unwrap().id, "home");
        assert_eq!(active_item(&items, "/en/").unwrap().id, "home");
        assert!(active_item(&items, "/en/imprint").is_none());
    }

    #[test]
    fn test_active_item_requires_segment_boundary() {
        let items = default_items(LocaleCode::En);
        assert!(active_item(&items, "/en/careerists").is_none());
        assert_eq!(active_item(&items, "/en/contact?sent=1").unwrap().id, "contact");
    }

    // ==================== Id Tests ====================

    #[test]
    fn test_default_items_have_unique_ids() {
        for locale in LocaleCode::ALL {
            assert!(validate_unique_ids(&derive_items(&default_items(locale), locale)).is_ok());
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let items = vec![
            NavigationItem::new("home", "Home", "/en"),
            NavigationItem::new("home", "Start", "/de"),
        ];
        assert_eq!(
            validate_unique_ids(&items),
            Err(NavigationError::DuplicateId("home".to_string()))
        );
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_existing_search_keeps_length_and_hrefs(
            ids in prop::collection::vec("[a-z]{1,8}", 0..6),
            position in 0usize..6,
        ) {
            let mut base: Vec<NavigationItem> = ids
                .iter()
                .map(|id| NavigationItem::new(format!("x-{}", id), id.clone(), format!("/en/{}", id)))
                .collect();
            let position = position.min(base.len());
            base.insert(position, NavigationItem::new("search", "Search", "/en/find"));

            let derived = derive_items(&base, LocaleCode::En);
            prop_assert_eq!(derived.len(), base.len());
            let hrefs: Vec<_> = derived.iter().map(|i| &i.href).collect();
            let expected: Vec<_> = base.iter().map(|i| &i.href).collect();
            prop_assert_eq!(hrefs, expected);
        }
    }
}
