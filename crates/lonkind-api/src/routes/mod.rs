//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, notifications, posts, reactions};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(post_routes())
        .merge(notification_routes())
}

/// Post and reaction routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id/reactions", get(reactions::list_reactors))
        .route("/posts/:post_id/reactions/@me", get(reactions::get_own_reaction))
        .route("/posts/:post_id/reactions/:type", put(reactions::toggle_reaction))
}

/// Notification feed routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me/notifications", get(notifications::list_notifications))
        .route(
            "/users/@me/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/users/@me/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
}
