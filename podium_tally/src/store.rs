use std::error::Error;
use std::fmt::Display;

use crate::config::SessionSnapshot;

/// The persistence collaborator.
///
/// The booth calls `save` after every state transition and `load` once when it
/// opens. A snapshot that was saved must come back unchanged from `load`.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError>;

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError>;
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> StoreError {
        StoreError {
            message: message.into(),
        }
    }
}

impl Error for StoreError {}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "snapshot store: {}", self.message)
    }
}

/// Keeps the last snapshot in memory.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<SessionSnapshot>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_snapshot(snapshot: SessionSnapshot) -> MemoryStore {
        MemoryStore {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    /// How many times `save` was called.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn snapshot(&self) -> Option<&SessionSnapshot> {
        self.snapshot.as_ref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}
