//! Core of the bilingual (de/en) consulting site: locale-aware navigation,
//! carousel state, consent gating and the thin collaborator contracts the
//! pages call into.

pub mod carousel;
pub mod config;
pub mod consent;
pub mod contact;
pub mod error;
pub mod i18n;
pub mod media;
pub mod navigation;
pub mod page;
pub mod server;
pub mod speech;
