use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Balance, HistoryEntry, TransactionKind};

#[mockall::automock]
#[async_trait::async_trait]
pub trait DatabasePort {
    /// Current balance for the user
    ///
    /// Adapters with no record for the user either fall back to the empty
    /// balance or signal [`Error::BalanceNotFound`], depending on their
    /// lookup contract.
    async fn get_balance(&self, user_id: Uuid) -> Result<Balance, Error>;

    /// Upserts the stored point total for the user
    async fn put_balance(&self, user_id: Uuid, points: i64) -> Result<Balance, Error>;

    /// Appends one history entry, assigning the next sequence id
    async fn append_history(
        &self,
        user_id: Uuid,
        amount: i64,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<HistoryEntry, Error>;

    /// All history entries for the user, in insertion order
    async fn list_history(&self, user_id: Uuid) -> Result<Vec<HistoryEntry>, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain-level error when the adapter has no balance for the user
    ///
    /// Only adapters with an explicit absence contract produce this;
    /// adapters that fall back to the empty balance never do.
    #[error("no balance stored for user {0}")]
    BalanceNotFound(Uuid),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
