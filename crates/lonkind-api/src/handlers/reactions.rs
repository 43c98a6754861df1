//! Reaction handlers
//!
//! Endpoints for toggling and reading reactions on a post.

use axum::{
    extract::{Path, State},
    Json,
};
use lonkind_service::dto::{ReactionStateResponse, ReactorResponse};
use lonkind_service::ReactionLedger;

use crate::extractors::{AuthUser, PostIdPath, ReactionPath, ReactorsFilter};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle the caller's reaction of the given type
///
/// PUT /posts/{post_id}/reactions/{type}
pub async fn toggle_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ReactionPath>,
) -> ApiResult<Json<ReactionStateResponse>> {
    let post_id = path.post_id()?;
    let reaction_type = path.reaction_type()?;

    let ledger = ReactionLedger::new(state.service_context());
    let reaction_state = ledger
        .toggle_on_post(post_id, auth.user_id, reaction_type)
        .await?;

    Ok(Json(ReactionStateResponse::new(post_id, reaction_state)))
}

/// The caller's current reaction
///
/// GET /posts/{post_id}/reactions/@me
pub async fn get_own_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<ReactionStateResponse>> {
    let post_id = path.post_id()?;

    let ledger = ReactionLedger::new(state.service_context());
    let reaction_state = ledger.reaction_state(post_id, auth.user_id).await?;

    Ok(Json(ReactionStateResponse::new(post_id, reaction_state)))
}

/// Users who reacted, oldest first
///
/// GET /posts/{post_id}/reactions?type=&limit=
pub async fn list_reactors(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
    filter: ReactorsFilter,
) -> ApiResult<Json<Vec<ReactorResponse>>> {
    let ledger = ReactionLedger::new(state.service_context());
    let entries = ledger
        .list_reactors(path.post_id()?, filter.reaction_type, filter.limit)
        .await?;

    Ok(Json(entries.iter().map(ReactorResponse::from).collect()))
}
