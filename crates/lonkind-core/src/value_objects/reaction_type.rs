//! Reaction types and the per-post counter map

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of reactions a user can leave on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Love,
    Laugh,
    Sad,
}

impl ReactionType {
    pub const ALL: [ReactionType; 4] = [Self::Like, Self::Love, Self::Laugh, Self::Sad];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Laugh => "laugh",
            Self::Sad => "sad",
        }
    }

    /// Case-insensitive parse, as used for path segments
    pub fn parse(s: &str) -> Result<Self, ReactionTypeParseError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ReactionTypeParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reaction type: {0}")]
pub struct ReactionTypeParseError(pub String);

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionType {
    type Err = ReactionTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Aggregate reaction counters stored on a post
///
/// Every slot is non-negative. Deltas that would drive a slot below zero
/// are floored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub like: i64,
    pub love: i64,
    pub laugh: i64,
    pub sad: i64,
}

impl ReactionCounts {
    pub fn get(&self, reaction_type: ReactionType) -> i64 {
        match reaction_type {
            ReactionType::Like => self.like,
            ReactionType::Love => self.love,
            ReactionType::Laugh => self.laugh,
            ReactionType::Sad => self.sad,
        }
    }

    fn slot_mut(&mut self, reaction_type: ReactionType) -> &mut i64 {
        match reaction_type {
            ReactionType::Like => &mut self.like,
            ReactionType::Love => &mut self.love,
            ReactionType::Laugh => &mut self.laugh,
            ReactionType::Sad => &mut self.sad,
        }
    }

    /// Apply a delta to one slot, flooring at zero
    pub fn apply_delta(&mut self, reaction_type: ReactionType, delta: i64) {
        let slot = self.slot_mut(reaction_type);
        *slot = slot.saturating_add(delta).max(0);
    }

    pub fn total(&self) -> i64 {
        self.like + self.love + self.laugh + self.sad
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReactionType, i64)> + '_ {
        ReactionType::ALL.into_iter().map(|t| (t, self.get(t)))
    }
}

impl FromIterator<ReactionType> for ReactionCounts {
    fn from_iter<I: IntoIterator<Item = ReactionType>>(iter: I) -> Self {
        let mut counts = Self::default();
        for reaction_type in iter {
            counts.apply_delta(reaction_type, 1);
        }
        counts
    }
}
