//! Reaction entity <-> model mapper

use lonkind_core::entities::ReactionEntry;
use lonkind_core::error::DomainError;
use lonkind_core::value_objects::{ReactionType, Snowflake};

use crate::models::ReactionModel;

impl TryFrom<ReactionModel> for ReactionEntry {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let reaction_type = ReactionType::parse(&model.reaction_type)
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(ReactionEntry {
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            reaction_type,
            reacted_at: model.reacted_at,
        })
    }
}
