//! Transactional stores backing the reaction ledger

mod memory;
mod postgres;

pub use memory::{MemoryStore, MemoryTransaction};
pub use postgres::{PgLedgerTransaction, PgTransactionalStore};
