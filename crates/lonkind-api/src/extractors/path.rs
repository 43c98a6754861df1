//! Path parameter extractors
//!
//! Snowflake ids arrive as strings and are parsed here, so a malformed id
//! is a 400 rather than a routing miss.

use lonkind_core::{ReactionType, Snowflake};
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with post_id
#[derive(Debug, Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    pub fn post_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.post_id, "post_id")
    }
}

/// Path parameters for toggling a reaction
#[derive(Debug, Deserialize)]
pub struct ReactionPath {
    pub post_id: String,
    #[serde(rename = "type")]
    pub reaction_type: String,
}

impl ReactionPath {
    pub fn post_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.post_id, "post_id")
    }

    pub fn reaction_type(&self) -> Result<ReactionType, ApiError> {
        self.reaction_type
            .parse()
            .map_err(|_| ApiError::invalid_path(format!("Unknown reaction type: {}", self.reaction_type)))
    }
}

/// Path parameters with notification id
#[derive(Debug, Deserialize)]
pub struct NotificationIdPath {
    pub notification_id: String,
}

impl NotificationIdPath {
    pub fn notification_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.notification_id, "notification_id")
    }
}
