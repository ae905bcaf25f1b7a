//! Idea storage trait.

use crate::StoreError;
use journal_types::{Idea, IdeaId};

/// Durable table of idea records.
///
/// Implementations must make `increment_vote` atomic: concurrent calls on the
/// same id each add exactly one vote.
pub trait IdeaStore: Send + Sync {
    /// Insert a fully formed idea. Fails with [`StoreError::Duplicate`] if the id exists.
    fn create(&self, idea: &Idea) -> Result<(), StoreError>;

    /// All ideas, ordered by ascending id.
    fn list(&self) -> Result<Vec<Idea>, StoreError>;

    fn get_by_id(&self, id: IdeaId) -> Result<Idea, StoreError>;

    /// Add one vote and return the updated idea.
    fn increment_vote(&self, id: IdeaId) -> Result<Idea, StoreError>;

    /// Highest stored id, or `None` for an empty store.
    fn max_id(&self) -> Result<Option<IdeaId>, StoreError>;

    fn count(&self) -> Result<u64, StoreError> {
        self.list().map(|v| v.len() as u64)
    }

    fn exists(&self, id: IdeaId) -> Result<bool, StoreError> {
        match self.get_by_id(id) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
