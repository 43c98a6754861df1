//! Notification service
//!
//! Reads a user's notification feed and flips read markers. Entries are
//! only ever appended by the reaction ledger.

use lonkind_core::traits::NotificationQuery;
use lonkind_core::Snowflake;
use tracing::{debug, instrument};

use crate::dto::{NotificationResponse, PaginatedResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

const DEFAULT_FEED_LIMIT: i64 = 50;
const MAX_FEED_LIMIT: i64 = 100;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A page of the recipient's feed, newest first
    ///
    /// `before` is an exclusive cursor on notification id.
    #[instrument(skip(self))]
    pub async fn list_for_recipient(
        &self,
        recipient_id: Snowflake,
        before: Option<Snowflake>,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<NotificationResponse>> {
        let limit = limit
            .unwrap_or(DEFAULT_FEED_LIMIT)
            .clamp(1, MAX_FEED_LIMIT);

        let notifications = self
            .ctx
            .notification_repo()
            .find_by_recipient(recipient_id, NotificationQuery { before, limit })
            .await?;

        let has_more = notifications.len() as i64 == limit;
        let next_cursor = notifications.last().map(|n| n.id.to_string());
        let data = notifications.iter().map(NotificationResponse::from).collect();

        Ok(PaginatedResponse::new(data, next_cursor, has_more, limit))
    }

    /// Mark one of the recipient's notifications read
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        recipient_id: Snowflake,
        notification_id: Snowflake,
    ) -> ServiceResult<()> {
        self.ctx
            .notification_repo()
            .mark_read(recipient_id, notification_id)
            .await?;

        debug!(
            recipient_id = %recipient_id,
            notification_id = %notification_id,
            "Notification marked read"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, recipient_id: Snowflake) -> ServiceResult<i64> {
        Ok(self
            .ctx
            .notification_repo()
            .unread_count(recipient_id)
            .await?)
    }
}
