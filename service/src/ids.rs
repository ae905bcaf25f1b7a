//! Monotonic idea id assignment.

use std::sync::atomic::{AtomicU64, Ordering};

use journal_store::{IdeaStore, StoreError};
use journal_types::IdeaId;

/// Hands out strictly increasing ids starting after the highest id seen at
/// startup, so ids stay unique across restarts.
#[derive(Debug)]
pub struct IdSequence {
    last: AtomicU64,
}

impl IdSequence {
    pub fn starting_after(last: Option<IdeaId>) -> Self {
        Self {
            last: AtomicU64::new(last.map_or(0, |id| id.as_u64())),
        }
    }

    /// Resume after the store's current maximum id.
    pub fn resume(store: &dyn IdeaStore) -> Result<Self, StoreError> {
        Ok(Self::starting_after(store.max_id()?))
    }

    pub fn next(&self) -> IdeaId {
        IdeaId::new(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
