//! Query extractors for list endpoints
//!
//! Cursor pagination for the notification feed and the type filter for
//! reactor listings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use lonkind_core::{ReactionType, Snowflake};
use lonkind_service::dto::{NotificationsQuery, ReactorsQuery};

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 50;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Validated feed pagination
#[derive(Debug, Clone, Copy)]
pub struct FeedPagination {
    /// Only entries older than this id
    pub before: Option<Snowflake>,
    /// Page size, 1..=100
    pub limit: i64,
}

impl Default for FeedPagination {
    fn default() -> Self {
        Self {
            before: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<NotificationsQuery> for FeedPagination {
    type Error = ApiError;

    fn try_from(params: NotificationsQuery) -> Result<Self, Self::Error> {
        let before = params
            .before
            .map(|s| {
                s.parse::<Snowflake>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'before' cursor format"))
            })
            .transpose()?;

        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        Ok(Self { before, limit })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for FeedPagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<NotificationsQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        FeedPagination::try_from(params)
    }
}

/// Validated reactor listing filter
#[derive(Debug, Clone, Copy)]
pub struct ReactorsFilter {
    pub reaction_type: Option<ReactionType>,
    pub limit: i64,
}

impl TryFrom<ReactorsQuery> for ReactorsFilter {
    type Error = ApiError;

    fn try_from(params: ReactorsQuery) -> Result<Self, Self::Error> {
        let reaction_type = params
            .reaction_type
            .map(|s| {
                s.parse::<ReactionType>()
                    .map_err(|_| ApiError::invalid_query(format!("Unknown reaction type: {s}")))
            })
            .transpose()?;

        Ok(Self {
            reaction_type,
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ReactorsFilter
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ReactorsQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        ReactorsFilter::try_from(params)
    }
}
