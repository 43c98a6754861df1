//! In-memory optimistic store
//!
//! Every document (post counters, reaction entry, first-reaction marker) has
//! a version. A transaction records the version of each document the first
//! time it reads it and stages its writes locally. `commit` takes the write
//! lock, re-checks every recorded version, and rejects the whole unit with
//! `WriteConflict` if any of them moved. Otherwise all staged writes land at
//! once and the touched documents get a fresh version.
//!
//! Used by unit tests, integration tests, and local runs without Postgres.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tokio::sync::Barrier;
use tracing::{debug, instrument};

use lonkind_core::entities::{Notification, Post, ReactionEntry};
use lonkind_core::error::DomainError;
use lonkind_core::traits::{
    LedgerTransaction, NotificationQuery, NotificationRepository, PostRepository,
    ReactionRepository, RepoResult, TransactionalStore,
};
use lonkind_core::value_objects::{ReactionCounts, ReactionType, Snowflake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DocKey {
    Post(Snowflake),
    Reaction(Snowflake, Snowflake),
    ReactionNotice(Snowflake, Snowflake),
}

#[derive(Default)]
struct MemoryState {
    posts: HashMap<Snowflake, Post>,
    reactions: BTreeMap<(Snowflake, Snowflake), ReactionEntry>,
    notifications: BTreeMap<Snowflake, Notification>,
    versions: HashMap<DocKey, u64>,
    clock: u64,
}

impl MemoryState {
    fn version(&self, key: DocKey) -> u64 {
        self.versions.get(&key).copied().unwrap_or(0)
    }

    fn bump(&mut self, key: DocKey) {
        self.clock += 1;
        self.versions.insert(key, self.clock);
    }

    fn has_reaction_notice(&self, post_id: Snowflake, from_user: Snowflake) -> bool {
        self.notifications
            .values()
            .any(|n| n.is_reaction_from(post_id, from_user))
    }
}

/// Failures queued up by tests and consumed at commit time
#[derive(Default)]
struct FaultPlan {
    conflicts: AtomicU32,
    permission_denials: AtomicU32,
}

impl FaultPlan {
    fn take(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Holds the first `slots` commits until all of them have arrived
struct CommitGate {
    slots: AtomicU32,
    barrier: Barrier,
}

impl CommitGate {
    async fn pass(&self) {
        if FaultPlan::take(&self.slots) {
            self.barrier.wait().await;
        }
    }
}

/// Shared in-memory store; clones share the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
    faults: Arc<FaultPlan>,
    gate: Arc<Mutex<Option<Arc<CommitGate>>>>,
    started: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` commits fail with `WriteConflict`
    pub fn inject_conflicts(&self, count: u32) {
        self.faults.conflicts.fetch_add(count, Ordering::AcqRel);
    }

    /// Make the next `count` commits fail with `PermissionDenied`
    pub fn inject_permission_denied(&self, count: u32) {
        self.faults.permission_denials.fetch_add(count, Ordering::AcqRel);
    }

    /// Make the next `count` commits wait for each other
    ///
    /// Every held unit has finished its reads before any of them commits,
    /// so units touching the same documents are forced to conflict.
    /// Transactions opened before this call are not held.
    pub fn hold_commits(&self, count: u32) {
        let gate = (count > 0).then(|| {
            Arc::new(CommitGate {
                slots: AtomicU32::new(count),
                barrier: Barrier::new(count as usize),
            })
        });
        *self.gate.lock() = gate;
    }

    /// Number of transactions opened so far
    pub fn transactions_started(&self) -> u64 {
        self.started.load(Ordering::Acquire)
    }

    /// Number of notifications stored, across all recipients
    pub fn notification_count(&self) -> usize {
        self.state.read().notifications.len()
    }
}

#[async_trait]
impl TransactionalStore for MemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn LedgerTransaction>> {
        self.started.fetch_add(1, Ordering::AcqRel);
        Ok(Box::new(MemoryTransaction {
            state: Arc::clone(&self.state),
            faults: Arc::clone(&self.faults),
            gate: self.gate.lock().clone(),
            reads: HashMap::new(),
            reactions: HashMap::new(),
            counts: HashMap::new(),
            notifications: Vec::new(),
            finished: false,
        }))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

/// One optimistic unit of work against a [`MemoryStore`]
pub struct MemoryTransaction {
    state: Arc<RwLock<MemoryState>>,
    faults: Arc<FaultPlan>,
    gate: Option<Arc<CommitGate>>,
    reads: HashMap<DocKey, u64>,
    /// `Some` = put, `None` = delete
    reactions: HashMap<(Snowflake, Snowflake), Option<ReactionEntry>>,
    counts: HashMap<Snowflake, ReactionCounts>,
    notifications: Vec<Notification>,
    finished: bool,
}

impl MemoryTransaction {
    fn ensure_open(&self) -> RepoResult<()> {
        if self.finished {
            return Err(DomainError::InternalError(
                "ledger transaction already finished".into(),
            ));
        }
        Ok(())
    }

    fn observe(&mut self, key: DocKey, state: &MemoryState) {
        self.reads.entry(key).or_insert_with(|| state.version(key));
    }

    fn staged_counts(&mut self, post_id: Snowflake) -> Option<ReactionCounts> {
        if let Some(counts) = self.counts.get(&post_id) {
            return Some(*counts);
        }
        let state = Arc::clone(&self.state);
        let state = state.read();
        self.observe(DocKey::Post(post_id), &state);
        state.posts.get(&post_id).map(|p| p.reaction_counts)
    }

    fn validate(&self, state: &MemoryState) -> RepoResult<()> {
        for (key, seen) in &self.reads {
            if state.version(*key) != *seen {
                return Err(DomainError::WriteConflict(format!("{key:?} changed")));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerTransaction for MemoryTransaction {
    async fn get_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ReactionEntry>> {
        self.ensure_open()?;
        if let Some(staged) = self.reactions.get(&(post_id, user_id)) {
            return Ok(staged.clone());
        }
        let state = Arc::clone(&self.state);
        let state = state.read();
        self.observe(DocKey::Reaction(post_id, user_id), &state);
        Ok(state.reactions.get(&(post_id, user_id)).cloned())
    }

    async fn read_counts(&mut self, post_id: Snowflake) -> RepoResult<Option<ReactionCounts>> {
        self.ensure_open()?;
        Ok(self.staged_counts(post_id))
    }

    async fn put_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: ReactionType,
    ) -> RepoResult<ReactionEntry> {
        self.ensure_open()?;
        let entry = ReactionEntry {
            post_id,
            user_id,
            reaction_type,
            reacted_at: Utc::now(),
        };
        self.reactions.insert((post_id, user_id), Some(entry.clone()));
        Ok(entry)
    }

    async fn delete_reaction(&mut self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        self.ensure_open()?;
        self.reactions.insert((post_id, user_id), None);
        Ok(())
    }

    async fn apply_delta(
        &mut self,
        post_id: Snowflake,
        reaction_type: ReactionType,
        delta: i64,
    ) -> RepoResult<ReactionCounts> {
        self.ensure_open()?;
        let mut counts = self
            .staged_counts(post_id)
            .ok_or(DomainError::PostNotFound(post_id))?;
        counts.apply_delta(reaction_type, delta);
        self.counts.insert(post_id, counts);
        Ok(counts)
    }

    async fn has_reaction_notification(
        &mut self,
        post_id: Snowflake,
        from_user: Snowflake,
    ) -> RepoResult<bool> {
        self.ensure_open()?;
        if self
            .notifications
            .iter()
            .any(|n| n.is_reaction_from(post_id, from_user))
        {
            return Ok(true);
        }
        let state = Arc::clone(&self.state);
        let state = state.read();
        self.observe(DocKey::ReactionNotice(post_id, from_user), &state);
        Ok(state.has_reaction_notice(post_id, from_user))
    }

    async fn append_notification(&mut self, notification: &Notification) -> RepoResult<()> {
        self.ensure_open()?;
        self.notifications.push(notification.clone());
        Ok(())
    }

    #[instrument(skip(self), fields(reads = self.reads.len()))]
    async fn commit(&mut self) -> RepoResult<()> {
        self.ensure_open()?;
        self.finished = true;

        if let Some(gate) = &self.gate {
            gate.pass().await;
        }

        let mut state = self.state.write();
        if FaultPlan::take(&self.faults.permission_denials) {
            return Err(DomainError::PermissionDenied(
                "store rejected the write".into(),
            ));
        }
        if FaultPlan::take(&self.faults.conflicts) {
            return Err(DomainError::WriteConflict("injected conflict".into()));
        }
        self.validate(&state)?;
        if let Some(missing) = self.counts.keys().find(|id| !state.posts.contains_key(id)) {
            return Err(DomainError::PostNotFound(*missing));
        }

        for ((post_id, user_id), staged) in self.reactions.drain() {
            match staged {
                Some(entry) => {
                    state.reactions.insert((post_id, user_id), entry);
                }
                None => {
                    state.reactions.remove(&(post_id, user_id));
                }
            }
            state.bump(DocKey::Reaction(post_id, user_id));
        }

        for (post_id, counts) in self.counts.drain() {
            if let Some(post) = state.posts.get_mut(&post_id) {
                post.reaction_counts = counts;
            }
            state.bump(DocKey::Post(post_id));
        }

        for notification in self.notifications.drain(..) {
            if let Some(post_id) = notification.post_id {
                state.bump(DocKey::ReactionNotice(post_id, notification.from_user));
            }
            state.notifications.insert(notification.id, notification);
        }

        debug!(version = state.clock, "Memory transaction committed");
        Ok(())
    }

    async fn rollback(&mut self) -> RepoResult<()> {
        self.finished = true;
        self.reactions.clear();
        self.counts.clear();
        self.notifications.clear();
        Ok(())
    }
}

// ============================================================================
// Repository views over the same data
// ============================================================================

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.state.read().posts.get(&id).cloned())
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.write();
        if state.posts.contains_key(&post.id) {
            return Err(DomainError::ValidationError(format!(
                "post {} already exists",
                post.id
            )));
        }
        state.posts.insert(post.id, post.clone());
        state.bump(DocKey::Post(post.id));
        Ok(())
    }

    async fn find_by_author(&self, author_id: Snowflake, limit: i64) -> RepoResult<Vec<Post>> {
        let state = self.state.read();
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| p.is_authored_by(author_id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts.truncate(limit.clamp(1, 100) as usize);
        Ok(posts)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ReactionEntry>> {
        Ok(self.state.read().reactions.get(&(post_id, user_id)).cloned())
    }

    async fn find_by_post(
        &self,
        post_id: Snowflake,
        reaction_type: Option<ReactionType>,
        limit: i64,
    ) -> RepoResult<Vec<ReactionEntry>> {
        let state = self.state.read();
        let mut entries: Vec<ReactionEntry> = state
            .reactions
            .range((post_id, Snowflake::new(i64::MIN))..=(post_id, Snowflake::new(i64::MAX)))
            .map(|(_, entry)| entry)
            .filter(|entry| reaction_type.is_none_or(|t| entry.is_type(t)))
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            a.reacted_at
                .cmp(&b.reacted_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        entries.truncate(limit.clamp(1, 100) as usize);
        Ok(entries)
    }

    async fn count_by_type(&self, post_id: Snowflake) -> RepoResult<ReactionCounts> {
        let state = self.state.read();
        Ok(state
            .reactions
            .range((post_id, Snowflake::new(i64::MIN))..=(post_id, Snowflake::new(i64::MAX)))
            .map(|(_, entry)| entry.reaction_type)
            .collect())
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(self.state.read().notifications.get(&id).cloned())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: Snowflake,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>> {
        let state = self.state.read();
        let upper = query.before.unwrap_or(Snowflake::new(i64::MAX));
        Ok(state
            .notifications
            .range(..upper)
            .rev()
            .map(|(_, n)| n)
            .filter(|n| n.recipient_id == recipient_id)
            .take(query.limit.clamp(1, 100) as usize)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, recipient_id: Snowflake, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.write();
        match state.notifications.get_mut(&id) {
            Some(n) if n.recipient_id == recipient_id => {
                n.mark_read();
                Ok(())
            }
            _ => Err(DomainError::NotificationNotFound(id)),
        }
    }

    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.read();
        Ok(state
            .notifications
            .values()
            .filter(|n| n.recipient_id == recipient_id && n.is_unread())
            .count() as i64)
    }
}
