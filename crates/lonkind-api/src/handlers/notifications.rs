//! Notification handlers
//!
//! The caller's notification feed.

use axum::{
    extract::{Path, State},
    Json,
};
use lonkind_service::dto::{NotificationResponse, PaginatedResponse, UnreadCountResponse};
use lonkind_service::NotificationService;

use crate::extractors::{AuthUser, FeedPagination, NotificationIdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /users/@me/notifications?before=&limit=
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: FeedPagination,
) -> ApiResult<Json<PaginatedResponse<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let page = service
        .list_for_recipient(auth.user_id, pagination.before, Some(pagination.limit))
        .await?;
    Ok(Json(page))
}

/// GET /users/@me/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let count = service.unread_count(auth.user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// POST /users/@me/notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<NotificationIdPath>,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service
        .mark_read(auth.user_id, path.notification_id()?)
        .await?;
    Ok(NoContent)
}
