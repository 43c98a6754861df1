//! Reaction entry - one user's current reaction on one post

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ReactionCounts, ReactionType, Snowflake};

/// Ledger entry keyed by `(post_id, user_id)`
///
/// Existence of the entry means the user currently reacts to the post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEntry {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub reaction_type: ReactionType,
    pub reacted_at: DateTime<Utc>,
}

impl ReactionEntry {
    pub fn new(post_id: Snowflake, user_id: Snowflake, reaction_type: ReactionType) -> Self {
        Self {
            post_id,
            user_id,
            reaction_type,
            reacted_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_type(&self, reaction_type: ReactionType) -> bool {
        self.reaction_type == reaction_type
    }
}

/// What a toggle did to the caller's entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTransition {
    Added,
    Switched { from: ReactionType },
    Removed,
}

impl ReactionTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Switched { .. } => "switched",
            Self::Removed => "removed",
        }
    }
}

/// The caller's reaction on a post plus the post counters, as committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionState {
    pub active: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<ReactionType>,
    pub counts: ReactionCounts,
}

impl ReactionState {
    pub fn inactive(counts: ReactionCounts) -> Self {
        Self {
            active: false,
            reaction_type: None,
            counts,
        }
    }

    pub fn active(reaction_type: ReactionType, counts: ReactionCounts) -> Self {
        Self {
            active: true,
            reaction_type: Some(reaction_type),
            counts,
        }
    }

    pub fn from_entry(entry: Option<&ReactionEntry>, counts: ReactionCounts) -> Self {
        match entry {
            Some(entry) => Self::active(entry.reaction_type, counts),
            None => Self::inactive(counts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_check() {
        let entry = ReactionEntry::new(Snowflake::new(1), Snowflake::new(2), ReactionType::Love);
        assert!(entry.is_type(ReactionType::Love));
        assert!(!entry.is_type(ReactionType::Like));
    }

    #[test]
    fn test_state_from_entry() {
        let counts = ReactionCounts { love: 1, ..Default::default() };
        let entry = ReactionEntry::new(Snowflake::new(1), Snowflake::new(2), ReactionType::Love);

        let state = ReactionState::from_entry(Some(&entry), counts);
        assert!(state.active);
        assert_eq!(state.reaction_type, Some(ReactionType::Love));

        let state = ReactionState::from_entry(None, counts);
        assert!(!state.active);
        assert_eq!(state.reaction_type, None);
    }

    #[test]
    fn test_state_json_shape() {
        let state = ReactionState::active(ReactionType::Like, ReactionCounts { like: 1, ..Default::default() });
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["active"], true);
        assert_eq!(json["type"], "like");
        assert_eq!(json["counts"]["like"], 1);

        let json = serde_json::to_value(ReactionState::inactive(ReactionCounts::default())).unwrap();
        assert!(json.get("type").is_none());
    }
}
