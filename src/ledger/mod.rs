//! Narrow interface to accounts, game records and statistics.
//!
//! The arena never waits on the ledger. It describes what should be
//! persisted as a [`Settlement`] and the hosting shell hands that to a
//! [`Ledger`] in the background. Failures are logged, never rolled back.
//!
//! ## Backends
//!
//! - [`Memory`]: in-process book, used when no database is configured and in tests
//! - `tokio_postgres::Client`: the `users`, `games`, `statistics` and `penalties` tables
mod entry;
mod error;
mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use entry::*;
pub use error::*;
pub use memory::*;
#[cfg(feature = "database")]
pub use postgres::*;

use crate::session::Game;
use crate::*;

/// A user record as read at authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user: UserId,
    pub league: League,
    pub gold: Gold,
}

/// Read and write access to the account store.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Looks up a user. `Ok(None)` when the user does not exist.
    async fn account(&self, user: UserId) -> Result<Option<Account>, LedgerError>;
    /// Persists a single entry on behalf of `game`.
    async fn record(&self, game: ID<Game>, entry: &Entry) -> Result<(), LedgerError>;
    /// Persists entries in order, stopping at the first failure.
    async fn settle(&self, settlement: &Settlement) -> Result<(), LedgerError> {
        for entry in settlement.entries.iter() {
            self.record(settlement.game, entry).await?;
        }
        Ok(())
    }
}
