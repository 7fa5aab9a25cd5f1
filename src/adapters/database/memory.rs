use crate::{
    domain::{Balance, HistoryEntry, TransactionKind},
    ports::database::{DatabasePort, Error},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use uuid::Uuid;

/// In-memory store for balances and history entries
///
/// Unseen users read back as the empty balance. Use
/// [`MemoryDatabase::with_strict_lookup`] for an adapter that signals
/// absence instead.
#[derive(Clone, Debug)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
    strict_lookup: bool,
}

#[derive(Debug, Default)]
struct Tables {
    balances: HashMap<Uuid, Balance>,
    /// Global append-only log, shared by all users
    history: Vec<HistoryEntry>,
    last_sequence_id: u64,
}

#[async_trait::async_trait]
impl DatabasePort for MemoryDatabase {
    async fn get_balance(&self, user_id: Uuid) -> Result<Balance, Error> {
        let balance = self.tables.lock()?.balances.get(&user_id).cloned();

        match balance {
            Some(balance) => Ok(balance),
            None if self.strict_lookup => Err(Error::BalanceNotFound(user_id)),
            None => Ok(Balance::empty(user_id)),
        }
    }

    async fn put_balance(&self, user_id: Uuid, points: i64) -> Result<Balance, Error> {
        let balance = Balance {
            user_id,
            points,
            updated_at: Utc::now(),
        };
        self.tables.lock()?.balances.insert(user_id, balance.clone());

        Ok(balance)
    }

    async fn append_history(
        &self,
        user_id: Uuid,
        amount: i64,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<HistoryEntry, Error> {
        let mut tables = self.tables.lock()?;
        tables.last_sequence_id += 1;
        let entry = HistoryEntry {
            sequence_id: tables.last_sequence_id,
            user_id,
            amount,
            kind,
            timestamp,
        };
        tables.history.push(entry.clone());

        Ok(entry)
    }

    async fn list_history(&self, user_id: Uuid) -> Result<Vec<HistoryEntry>, Error> {
        let entries = self
            .tables
            .lock()?
            .history
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();

        Ok(entries)
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            strict_lookup: false,
        }
    }
}

impl MemoryDatabase {
    /// Store whose lookups fail with [`Error::BalanceNotFound`] for unseen
    /// users instead of falling back to the empty balance.
    pub fn with_strict_lookup() -> Self {
        Self {
            strict_lookup: true,
            ..Self::default()
        }
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

/// We need to create a custom `From` implementation here for an error that's specific to this
/// adapter.
impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
