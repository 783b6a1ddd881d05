//! Image provider contract and the gallery state built on top of it.
//!
//! The provider itself (request signing, pagination) is an external
//! collaborator; this module only depends on `PhotoProvider`.

use crate::error::SiteError;
use crate::i18n::{fill, LocaleCode};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use tracing::{info, warn};

/// Image served when no provider is configured.
pub const PLACEHOLDER_URL: &str = "/images/placeholder.jpg";

/// A photo as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("image provider not configured")]
    NotConfigured,

    #[error("image provider request failed: {0}")]
    Network(String),

    #[error("no photo found for '{0}'")]
    NotFound(String),
}

impl From<MediaError> for SiteError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::NotConfigured => SiteError::Configuration(e.to_string()),
            MediaError::Network(_) => SiteError::Transient(e.to_string()),
            MediaError::NotFound(_) => SiteError::Unexpected(anyhow::Error::new(e)),
        }
    }
}

/// Fetch-style image search collaborator.
pub trait PhotoProvider {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Photo>, MediaError>> + Send;
    fn get_random(&self, query: &str) -> impl Future<Output = Result<Photo, MediaError>> + Send;
}

/// Attribution line rendered below a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribution {
    pub text: String,
    pub url: String,
}

/// Render-ready photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoView {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    /// Omitted unless the provider supplied both text and URL
    pub attribution: Option<Attribution>,
}

impl PhotoView {
    pub fn from_photo(photo: &Photo, alt: &str, locale: LocaleCode) -> Self {
        let attribution = match (&photo.attribution_text, &photo.attribution_url) {
            (Some(author), Some(url)) if !author.trim().is_empty() && !url.trim().is_empty() => {
                Some(Attribution {
                    text: fill(locale.strings().photo_attribution, &[("author", author.trim())]),
                    url: url.clone(),
                })
            }
            _ => None,
        };

        Self {
            src: photo.url.clone(),
            width: photo.width,
            height: photo.height,
            alt: alt.to_string(),
            attribution,
        }
    }

    /// Placeholder shown in degraded mode.
    pub fn placeholder(locale: LocaleCode) -> Self {
        Self::from_photo(&placeholder_photo(), locale.strings().photo_placeholder_alt, locale)
    }
}

pub fn placeholder_photo() -> Photo {
    Photo {
        url: PLACEHOLDER_URL.to_string(),
        width: 1600,
        height: 900,
        attribution_text: None,
        attribution_url: None,
    }
}

/// Outcome of loading a gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GalleryState {
    Loaded { photos: Vec<PhotoView> },
    /// Inline message; `retry_label` is set when a manual retry may help
    Failed {
        message: String,
        retry_label: Option<String>,
    },
}

impl GalleryState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, GalleryState::Loaded { .. })
    }
}

/// Load photos for `query`.
///
/// An unconfigured provider (`None` or `NotConfigured`) degrades to a single
/// placeholder. Other failures become an inline message; they are never
/// retried automatically.
pub async fn load_gallery<P: PhotoProvider>(
    provider: Option<&P>,
    query: &str,
    locale: LocaleCode,
) -> GalleryState {
    let Some(provider) = provider else {
        info!("No image provider configured, using placeholder for '{}'", query);
        return GalleryState::Loaded {
            photos: vec![PhotoView::placeholder(locale)],
        };
    };

    match provider.search(query).await {
        Ok(photos) => GalleryState::Loaded {
            photos: photos
                .iter()
                .map(|photo| PhotoView::from_photo(photo, query, locale))
                .collect(),
        },
        Err(MediaError::NotConfigured) => {
            warn!("Image provider reports missing configuration, using placeholder");
            GalleryState::Loaded {
                photos: vec![PhotoView::placeholder(locale)],
            }
        }
        Err(e) => {
            warn!("Gallery '{}' failed to load: {}", query, e);
            let error = SiteError::from(e);
            GalleryState::Failed {
                message: error.user_message(locale).to_string(),
                retry_label: error
                    .is_retryable()
                    .then(|| locale.strings().error_retry.to_string()),
            }
        }
    }
}

/// One hero image per query, fetched concurrently; failures fall back to
/// the placeholder.
pub async fn load_heroes<P: PhotoProvider>(
    provider: &P,
    queries: &[&str],
    locale: LocaleCode,
) -> Vec<PhotoView> {
    let fetches = queries.iter().map(|query| provider.get_random(query));
    join_all(fetches)
        .await
        .into_iter()
        .zip(queries)
        .map(|(result, query)| match result {
            Ok(photo) => PhotoView::from_photo(&photo, query, locale),
            Err(e) => {
                warn!("Hero image for '{}' unavailable: {}", query, e);
                PhotoView::placeholder(locale)
            }
        })
        .collect()
}
