//! The idea record: a proposal that collects votes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ParseError, Timestamp};

/// Author recorded for ideas submitted in local mode.
pub const LOCAL_AUTHOR: &str = "0x_mok";

/// Identifier of an idea. Positive, assigned by the service, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(u64);

impl IdeaId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdeaId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseError::InvalidIdeaId(s.to_string()))
    }
}

impl From<u64> for IdeaId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A persisted idea.
///
/// The serialized form is the DTO returned over the API:
/// `{id, title, description, author, votes, timestamp}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub description: String,
    pub author: String,
    /// Only ever incremented, one per vote.
    pub votes: u64,
    /// Creation time, immutable.
    pub timestamp: Timestamp,
}

impl Idea {
    /// A freshly submitted idea with no votes.
    pub fn new(
        id: IdeaId,
        title: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            author: author.into(),
            votes: 0,
            timestamp,
        }
    }
}
