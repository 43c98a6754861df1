//! Notification entity <-> model mapper

use lonkind_core::entities::{Notification, NotificationKind};
use lonkind_core::error::DomainError;
use lonkind_core::value_objects::{ReactionType, Snowflake};

use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let kind = NotificationKind::parse(&model.kind).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown notification kind: {}", model.kind))
        })?;
        let reaction_type = model
            .reaction_type
            .as_deref()
            .map(ReactionType::parse)
            .transpose()
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            kind,
            from_user: Snowflake::new(model.from_user),
            post_id: model.post_id.map(Snowflake::new),
            reaction_type,
            created_at: model.created_at,
            read: model.read,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(kind: &str, reaction_type: Option<&str>) -> NotificationModel {
        NotificationModel {
            id: 7,
            recipient_id: 1,
            kind: kind.to_string(),
            from_user: 2,
            post_id: Some(100),
            reaction_type: reaction_type.map(str::to_string),
            created_at: Utc::now(),
            read: false,
        }
    }

    #[test]
    fn test_maps_reaction_notification() {
        let n = Notification::try_from(model("new_reaction", Some("love"))).unwrap();
        assert_eq!(n.kind, NotificationKind::NewReaction);
        assert_eq!(n.reaction_type, Some(ReactionType::Love));
        assert_eq!(n.post_id, Some(Snowflake::new(100)));
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(Notification::try_from(model("poke", None)).is_err());
        assert!(Notification::try_from(model("new_reaction", Some("angry"))).is_err());
    }
}
