//! Value objects - immutable types identified by their value

mod reaction_type;
mod snowflake;

pub use reaction_type::{ReactionCounts, ReactionType, ReactionTypeParseError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
