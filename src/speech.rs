//! Text-to-speech with provider fallback and per-word timing.
//!
//! The synthesis providers are external collaborators. The site's only
//! obligations are to fall back to a secondary provider when the primary is
//! unconfigured or fails, and to produce word timings for the read-along
//! highlight.

use serde::Serialize;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, warn};

/// Speaking rate used to estimate duration when the provider reports none.
pub const ESTIMATED_WORDS_PER_MINUTE: u64 = 150;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOptions {
    pub model: Option<String>,
    /// Playback speed multiplier (1.0 = normal)
    pub speed: f32,
    pub stability: f32,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            model: None,
            speed: 1.0,
            stability: 0.5,
        }
    }
}

/// Provider event marking where a word starts in the audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordBoundary {
    pub word: String,
    pub offset_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub duration_ms: Option<u64>,
    /// Empty when the provider does not emit boundary events
    pub boundaries: Vec<WordBoundary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordTiming {
    pub word: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("{provider} failed: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error("nothing to synthesize")]
    EmptyText,
}

pub trait SpeechSynthesizer {
    fn name(&self) -> &'static str;

    fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        options: &SynthesisOptions,
    ) -> impl Future<Output = Result<AudioClip, SpeechError>> + Send;
}

/// Audio plus the provider that produced it and its word timings.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub clip: AudioClip,
    pub provider: &'static str,
    pub timings: Vec<WordTiming>,
}

/// Primary provider (optional, e.g. missing API key) backed by a secondary.
pub struct FallbackSynthesizer<P, S> {
    primary: Option<P>,
    secondary: S,
}

impl<P: SpeechSynthesizer + Sync, S: SpeechSynthesizer + Sync> FallbackSynthesizer<P, S> {
    pub fn new(primary: Option<P>, secondary: S) -> Self {
        Self { primary, secondary }
    }

    /// Synthesize with the primary, falling back to the secondary.
    ///
    /// Only the secondary's error is returned when both fail.
    pub async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        options: &SynthesisOptions,
    ) -> Result<Synthesis, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        if let Some(primary) = &self.primary {
            match primary.synthesize(text, voice_id, options).await {
                Ok(clip) => return Ok(finish(text, clip, primary.name())),
                Err(e) => warn!(
                    "{} failed, falling back to {}: {}",
                    primary.name(),
                    self.secondary.name(),
                    e
                ),
            }
        } else {
            debug!(
                "No primary speech provider configured, using {}",
                self.secondary.name()
            );
        }

        let clip = self.secondary.synthesize(text, voice_id, options).await?;
        Ok(finish(text, clip, self.secondary.name()))
    }
}

fn finish(text: &str, clip: AudioClip, provider: &'static str) -> Synthesis {
    let timings = word_timings(text, &clip);
    Synthesis {
        clip,
        provider,
        timings,
    }
}

/// Estimated speaking time of `word_count` words.
pub fn estimate_duration_ms(word_count: usize) -> u64 {
    word_count as u64 * 60_000 / ESTIMATED_WORDS_PER_MINUTE
}

/// Per-word timing for read-along highlighting.
///
/// Provider boundary events are used when present, each word ending where
/// the next begins. Otherwise the known (or estimated) duration is split
/// evenly across the words of `text`.
pub fn word_timings(text: &str, clip: &AudioClip) -> Vec<WordTiming> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    if !clip.boundaries.is_empty() {
        let total = clip.duration_ms.unwrap_or_else(|| {
            let last = clip.boundaries.last().map(|b| b.offset_ms).unwrap_or(0);
            last + estimate_duration_ms(1)
        });

        return clip
            .boundaries
            .iter()
            .enumerate()
            .map(|(i, boundary)| WordTiming {
                word: boundary.word.clone(),
                start_ms: boundary.offset_ms,
                end_ms: clip
                    .boundaries
                    .get(i + 1)
                    .map(|next| next.offset_ms)
                    .unwrap_or(total)
                    .max(boundary.offset_ms),
            })
            .collect();
    }

    let duration = clip
        .duration_ms
        .unwrap_or_else(|| estimate_duration_ms(words.len()));
    let per_word = duration / words.len() as u64;

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let start_ms = per_word * i as u64;
            let end_ms = if i + 1 == words.len() {
                duration
            } else {
                start_ms + per_word
            };
            WordTiming {
                word: (*word).to_string(),
                start_ms,
                end_ms,
            }
        })
        .collect()
}
