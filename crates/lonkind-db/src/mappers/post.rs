//! Post entity <-> model mapper

use lonkind_core::entities::Post;
use lonkind_core::error::DomainError;
use lonkind_core::value_objects::{ReactionCounts, ReactionType, Snowflake};

use crate::models::{PostModel, ReactionCountsModel, ReactionTypeCountModel};

impl From<ReactionCountsModel> for ReactionCounts {
    fn from(model: ReactionCountsModel) -> Self {
        ReactionCounts {
            like: model.like_count,
            love: model.love_count,
            laugh: model.laugh_count,
            sad: model.sad_count,
        }
    }
}

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            media_urls: model.media_urls,
            reaction_counts: ReactionCounts {
                like: model.like_count,
                love: model.love_count,
                laugh: model.laugh_count,
                sad: model.sad_count,
            },
            comment_count: model.comment_count,
            created_at: model.created_at,
        }
    }
}

/// Fold `GROUP BY reaction_type` rows into a counter map
pub fn counts_from_rows(rows: Vec<ReactionTypeCountModel>) -> Result<ReactionCounts, DomainError> {
    let mut counts = ReactionCounts::default();
    for row in rows {
        let reaction_type = ReactionType::parse(&row.reaction_type)
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        counts.apply_delta(reaction_type, row.count);
    }
    Ok(counts)
}
