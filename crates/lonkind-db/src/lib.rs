//! # lonkind-db
//!
//! Storage layer implementing the `lonkind-core` store and repository traits.
//!
//! ## Overview
//!
//! - PostgreSQL pool management and schema migrations
//! - Database models with SQLx `FromRow` derives and entity mappers
//! - Read repositories for posts, reactions, and notifications
//! - Two [`TransactionalStore`](lonkind_core::TransactionalStore)
//!   implementations: [`PgTransactionalStore`] (`SERIALIZABLE` transactions)
//!   and [`MemoryStore`] (optimistic, read-set validated at commit)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lonkind_db::{create_pool, run_migrations, DatabaseConfig, PgTransactionalStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let store = PgTransactionalStore::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgNotificationRepository, PgPostRepository, PgReactionRepository};
pub use store::{MemoryStore, PgTransactionalStore};
