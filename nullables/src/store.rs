//! Nullable store — thread-safe in-memory idea storage for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use journal_store::{IdeaStore, StoreError};
use journal_types::{Idea, IdeaId};

/// An in-memory idea store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullIdeaStore {
    ideas: Mutex<BTreeMap<IdeaId, Idea>>,
    fail_writes: AtomicBool,
}

impl NullIdeaStore {
    pub fn new() -> Self {
        Self {
            ideas: Mutex::new(BTreeMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Pre-populate with existing ideas, as if loaded from a previous run.
    pub fn with_ideas(ideas: impl IntoIterator<Item = Idea>) -> Self {
        let store = Self::new();
        store
            .ideas
            .lock()
            .unwrap()
            .extend(ideas.into_iter().map(|idea| (idea.id, idea)));
        store
    }

    /// Make every subsequent `create` and `increment_vote` fail with a
    /// backend error. Reads keep working.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("write failure injected".into()));
        }
        Ok(())
    }
}

impl Default for NullIdeaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdeaStore for NullIdeaStore {
    fn create(&self, idea: &Idea) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut ideas = self.ideas.lock().unwrap();
        if ideas.contains_key(&idea.id) {
            return Err(StoreError::Duplicate(format!("idea {}", idea.id)));
        }
        ideas.insert(idea.id, idea.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Idea>, StoreError> {
        Ok(self.ideas.lock().unwrap().values().cloned().collect())
    }

    fn get_by_id(&self, id: IdeaId) -> Result<Idea, StoreError> {
        self.ideas
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("idea {id}")))
    }

    fn increment_vote(&self, id: IdeaId) -> Result<Idea, StoreError> {
        self.check_writable()?;
        let mut ideas = self.ideas.lock().unwrap();
        let idea = ideas
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("idea {id}")))?;
        idea.votes += 1;
        Ok(idea.clone())
    }

    fn max_id(&self) -> Result<Option<IdeaId>, StoreError> {
        Ok(self.ideas.lock().unwrap().keys().next_back().copied())
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.ideas.lock().unwrap().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_types::{Timestamp, LOCAL_AUTHOR};

    fn idea(id: u64) -> Idea {
        Idea::new(
            IdeaId::new(id),
            format!("title {id}"),
            String::from("desc"),
            String::from(LOCAL_AUTHOR),
            Timestamp::new(1_700_000_000),
        )
    }

    #[test]
    fn list_is_ordered_by_id() {
        let store = NullIdeaStore::with_ideas([idea(3), idea(1), idea(2)]);
        let ids: Vec<u64> = store.list().unwrap().iter().map(|i| i.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.max_id().unwrap(), Some(IdeaId::new(3)));
    }

    #[test]
    fn duplicate_create_is_rejected() {
        let store = NullIdeaStore::new();
        store.create(&idea(1)).unwrap();
        assert!(matches!(store.create(&idea(1)), Err(StoreError::Duplicate(_))));
    }

    #[test]
    fn injected_failure_blocks_writes_only() {
        let store = NullIdeaStore::with_ideas([idea(1)]);
        store.fail_writes(true);
        assert!(matches!(store.create(&idea(2)), Err(StoreError::Backend(_))));
        assert!(matches!(
            store.increment_vote(IdeaId::new(1)),
            Err(StoreError::Backend(_))
        ));
        assert_eq!(store.get_by_id(IdeaId::new(1)).unwrap().votes, 0);
    }

    #[test]
    fn vote_on_missing_idea_is_not_found() {
        let store = NullIdeaStore::new();
        assert!(matches!(
            store.increment_vote(IdeaId::new(9)),
            Err(StoreError::NotFound(_))
        ));
    }
}
