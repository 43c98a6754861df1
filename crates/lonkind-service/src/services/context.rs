//! Service context - dependency container for services
//!
//! Holds the transactional store, repositories, the optional event publisher
//! and the other dependencies needed by services.

use std::sync::Arc;

use lonkind_cache::Publisher;
use lonkind_common::auth::JwtService;
use lonkind_core::traits::{
    NotificationRepository, PostRepository, ReactionRepository, TransactionalStore,
};
use lonkind_core::{Snowflake, SnowflakeGenerator};
use lonkind_db::{
    MemoryStore, PgNotificationRepository, PgPool, PgPostRepository, PgReactionRepository,
    PgTransactionalStore,
};

use super::error::{ServiceError, ServiceResult};
use super::retry::RetryPolicy;

/// Service context containing all dependencies
///
/// Cheap to clone; every handle is shared. Without a publisher, post-commit
/// events are skipped.
#[derive(Clone)]
pub struct ServiceContext {
    // Ledger store
    store: Arc<dyn TransactionalStore>,

    // Repositories
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Pub/Sub
    publisher: Option<Publisher>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    retry_policy: RetryPolicy,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // ========================================================================
    // Store and repository accessors
    // ========================================================================

    pub fn store(&self) -> &dyn TransactionalStore {
        self.store.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // ========================================================================
    // Pub/Sub accessor
    // ========================================================================

    pub fn publisher(&self) -> Option<&Publisher> {
        self.publisher.as_ref()
    }

    // ========================================================================
    // Service accessors
    // ========================================================================

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        &self.snowflake_generator
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("publisher", &self.publisher.is_some())
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn TransactionalStore>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    publisher: Option<Publisher>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    retry_policy: RetryPolicy,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            post_repo: None,
            reaction_repo: None,
            notification_repo: None,
            publisher: None,
            jwt_service: None,
            snowflake_generator: None,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn store(mut self, store: Arc<dyn TransactionalStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    /// Wire the store and every repository to one shared in-memory store
    pub fn memory_store(self, store: &MemoryStore) -> Self {
        self.store(Arc::new(store.clone()))
            .post_repo(Arc::new(store.clone()))
            .reaction_repo(Arc::new(store.clone()))
            .notification_repo(Arc::new(store.clone()))
    }

    /// Wire the store and every repository to PostgreSQL
    pub fn postgres(self, pool: PgPool) -> Self {
        self.store(Arc::new(PgTransactionalStore::new(pool.clone())))
            .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
            .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
            .notification_repo(Arc::new(PgNotificationRepository::new(pool)))
    }

    pub fn publisher(mut self, publisher: Option<Publisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Build the ServiceContext
    ///
    /// Returns an error if any required dependency is missing.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            store: self
                .store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            post_repo: self
                .post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            reaction_repo: self
                .reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            publisher: self.publisher,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            retry_policy: self.retry_policy,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_store() {
        let err = ServiceContextBuilder::new()
            .jwt_service(Arc::new(JwtService::new("secret", 60)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: store is required");
    }

    #[test]
    fn test_build_with_memory_store() {
        let store = MemoryStore::new();
        let ctx = ServiceContext::builder()
            .memory_store(&store)
            .jwt_service(Arc::new(JwtService::new("secret", 60)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(3)))
            .build()
            .unwrap();

        assert!(ctx.publisher().is_none());
        assert_eq!(ctx.generate_id().worker_id(), 3);
        assert_eq!(ctx.retry_policy(), RetryPolicy::default());
    }
}
