//! Cookie consent gate.
//!
//! The visitor's decision is read once when the gate opens, transitions at
//! most once from `Unset` to a terminal value, and is broadcast to explicit
//! subscribers (e.g., the analytics loader) exactly once per decision.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// The visitor's consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsentDecision {
    /// No decision yet; the banner is shown
    Unset,
    /// Only cookies required to run the site
    NecessaryOnly,
    /// Necessary plus analytics
    All,
}

impl ConsentDecision {
    /// Value written to the persisted slot; `None` for `Unset`.
    pub fn as_stored(&self) -> Option<&'static str> {
        match self {
            ConsentDecision::Unset => None,
            ConsentDecision::NecessaryOnly => Some("necessary"),
            ConsentDecision::All => Some("all"),
        }
    }

    /// Parse a persisted value. Unknown values are treated as no decision.
    pub fn from_stored(value: &str) -> ConsentDecision {
        match value.trim() {
            "all" => ConsentDecision::All,
            "necessary" => ConsentDecision::NecessaryOnly,
            _ => ConsentDecision::Unset,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ConsentDecision::Unset)
    }

    pub fn allows_analytics(&self) -> bool {
        matches!(self, ConsentDecision::All)
    }
}

#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("consent already decided as {0:?}")]
    AlreadyDecided(ConsentDecision),

    #[error("Unset is not a decision")]
    InvalidChoice,

    #[error("failed to persist consent: {0}")]
    Storage(#[from] std::io::Error),
}

/// The single key-value slot holding the persisted decision.
pub trait ConsentStore {
    fn load(&self) -> Result<Option<String>, ConsentError>;
    fn save(&mut self, value: &str) -> Result<(), ConsentError>;
}

/// In-memory slot, used for server-side rendering and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl ConsentStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, ConsentError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &str) -> Result<(), ConsentError> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// Slot backed by a single file containing the plain string value.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConsentStore for FileStore {
    fn load(&self) -> Result<Option<String>, ConsentError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, value: &str) -> Result<(), ConsentError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, value)?;
        Ok(())
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(ConsentDecision) + Send>;

/// Consent gate owning the persisted slot and its subscribers.
pub struct ContentGate<S: ConsentStore> {
    store: S,
    decision: ConsentDecision,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<S: ConsentStore> ContentGate<S> {
    /// Open the gate, reading the persisted decision once.
    ///
    /// An unreadable or unrecognized slot is treated as `Unset` so the
    /// banner is shown again rather than failing the page.
    pub fn open(store: S) -> Self {
        let decision = match store.load() {
            Ok(Some(value)) => {
                let decision = ConsentDecision::from_stored(&value);
                if decision == ConsentDecision::Unset {
                    warn!("Ignoring unrecognized stored consent value '{}'", value);
                }
                decision
            }
            Ok(None) => ConsentDecision::Unset,
            Err(e) => {
                warn!("Failed to read stored consent, treating as unset: {}", e);
                ConsentDecision::Unset
            }
        };

        Self {
            store,
            decision,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Current decision. No side effects.
    pub fn current(&self) -> ConsentDecision {
        self.decision
    }

    pub fn analytics_allowed(&self) -> bool {
        self.decision.allows_analytics()
    }

    /// Whether the consent banner should be rendered.
    pub fn needs_decision(&self) -> bool {
        !self.decision.is_terminal()
    }

    pub fn subscribe(&mut self, listener: impl Fn(ConsentDecision) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Record the visitor's choice.
    ///
    /// Persists, then notifies every subscriber once. Repeating the current
    /// decision is accepted without a second notification; changing a
    /// terminal decision is rejected. Returns whether subscribers were
    /// notified.
    pub fn decide(&mut self, choice: ConsentDecision) -> Result<bool, ConsentError> {
        let Some(stored) = choice.as_stored() else {
            return Err(ConsentError::InvalidChoice);
        };

        if self.decision == choice {
            return Ok(false);
        }
        if self.decision.is_terminal() {
            return Err(ConsentError::AlreadyDecided(self.decision));
        }

        self.store.save(stored)?;
        self.decision = choice;
        info!("Consent decided: {}", stored);

        for (_, listener) in &self.listeners {
            listener(choice);
        }
        Ok(true)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn recorder() -> (Arc<Mutex<Vec<ConsentDecision>>>, impl Fn(ConsentDecision) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |decision| sink.lock().unwrap().push(decision))
    }

    // ==================== Decision Tests ====================

    #[test]
    fn test_stored_values() {
        assert_eq!(ConsentDecision::All.as_stored(), Some("all"));
        assert_eq!(ConsentDecision::NecessaryOnly.as_stored(), Some("necessary"));
        assert_eq!(ConsentDecision::Unset.as_stored(), None);
        assert_eq!(ConsentDecision::from_stored("all\n"), ConsentDecision::All);
        assert_eq!(ConsentDecision::from_stored("yes"), ConsentDecision::Unset);
    }

    // ==================== Gate Tests ====================

    #[test]
    fn test_fresh_gate_is_unset() {
        let gate = ContentGate::open(MemoryStore::new());
        assert_eq!(gate.current(), ConsentDecision::Unset);
        assert!(gate.needs_decision());
        assert!(!gate.analytics_allowed());
    }

    #[test]
    fn test_decide_persists_and_notifies_once() {
        let mut gate = ContentGate::open(MemoryStore::new());
        let (seen, listener) = recorder();
        gate.subscribe(listener);

        assert!(gate.decide(ConsentDecision::All).unwrap());
        assert!(!gate.decide(ConsentDecision::All).unwrap());

        assert_eq!(*seen.lock().unwrap(), vec![ConsentDecision::All]);
        assert_eq!(gate.store().load().unwrap().as_deref(), Some("all"));
        assert!(gate.analytics_allowed());
    }

    #[test]
    fn test_terminal_decision_cannot_change() {
        let mut gate = ContentGate::open(MemoryStore::new());
        gate.decide(ConsentDecision::NecessaryOnly).unwrap();

        let err = gate.decide(ConsentDecision::All).unwrap_err();
        assert!(matches!(err, ConsentError::AlreadyDecided(ConsentDecision::NecessaryOnly)));
        assert_eq!(gate.current(), ConsentDecision::NecessaryOnly);
    }

    #[test]
    fn test_unset_is_not_a_choice() {
        let mut gate = ContentGate::open(MemoryStore::new());
        assert!(matches!(
            gate.decide(ConsentDecision::Unset),
            Err(ConsentError::InvalidChoice)
        ));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut gate = ContentGate::open(MemoryStore::new());
        let (seen, listener) = recorder();
        let id = gate.subscribe(listener);

        assert!(gate.unsubscribe(id));
        assert!(!gate.unsubscribe(id));

        gate.decide(ConsentDecision::All).unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stored_value_is_read_at_open() {
        let gate = ContentGate::open(MemoryStore::with_value("necessary"));
        assert_eq!(gate.current(), ConsentDecision::NecessaryOnly);
        assert!(!gate.needs_decision());
    }

    #[test]
    fn test_garbage_stored_value_is_unset() {
        let gate = ContentGate::open(MemoryStore::with_value("maybe"));
        assert_eq!(gate.current(), ConsentDecision::Unset);
    }

    // ==================== FileStore Tests ====================

    #[test]
    fn test_file_store_round_trip_across_gates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state").join("consent");

        let mut gate = ContentGate::open(FileStore::new(&path));
        assert_eq!(gate.current(), ConsentDecision::Unset);
        gate.decide(ConsentDecision::All).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "all");

        let reopened = ContentGate::open(FileStore::new(&path));
        assert_eq!(reopened.current(), ConsentDecision::All);
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("absent"));
        assert!(store.load().unwrap().is_none());
    }
}
