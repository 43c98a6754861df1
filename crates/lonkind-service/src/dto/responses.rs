//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use lonkind_core::{ReactionCounts, ReactionType};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Cursor-paginated list
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, before: Option<String>, has_more: bool, limit: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                before,
                has_more,
                limit,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the next (older) page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Whether the page was full, so more results may exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i64,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub media_urls: Vec<String>,
    pub reaction_counts: ReactionCounts,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// The caller's reaction on a post, with the post's counters
#[derive(Debug, Clone, Serialize)]
pub struct ReactionStateResponse {
    pub post_id: String,
    pub active: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<ReactionType>,
    pub counts: ReactionCounts,
}

/// One user's reaction, as listed on a post
#[derive(Debug, Clone, Serialize)]
pub struct ReactorResponse {
    pub user_id: String,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub reacted_at: DateTime<Utc>,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub from_user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<ReactionType>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    /// Absent when no Redis publisher is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<String>,
}

fn health_label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    /// `redis_healthy` is `None` when Redis is not configured
    pub fn ready(store_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = store_healthy && redis_healthy.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: health_label(store_healthy),
                redis: redis_healthy.map(health_label),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
