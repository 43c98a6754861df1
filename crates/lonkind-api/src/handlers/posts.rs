//! Post handlers
//!
//! Endpoints for creating and reading posts.

use axum::{
    extract::{Path, State},
    Json,
};
use lonkind_service::dto::{CreatePostRequest, PostResponse};
use lonkind_service::PostService;

use crate::extractors::{AuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a post authored by the caller
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.create(auth.user_id, request).await?;
    Ok(Created(post))
}

/// Get a post with its reaction counters
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get_post(path.post_id()?).await?;
    Ok(Json(post))
}
