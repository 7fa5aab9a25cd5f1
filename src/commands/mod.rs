use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

pub mod charge_points;
pub mod get_balance;
pub mod list_history;
pub mod use_points;

/// Entry point for all point operations
///
/// Cheap to clone: clones share the database handle and the mutation
/// gate, which is how concurrent callers are modeled.
pub struct DomainLogic<D> {
    database: Arc<D>,
    /// Serializes every charge and use across all users.
    ///
    /// tokio's `Mutex` queues waiters in FIFO order, so mutations are
    /// granted in arrival order and a read-modify-write sequence can
    /// never interleave with another one. Reads never take this gate.
    mutation_gate: Arc<Mutex<()>>,
}

impl<D> DomainLogic<D> {
    pub fn new(database: Arc<D>) -> Self {
        Self {
            database,
            mutation_gate: Arc::new(Mutex::new(())),
        }
    }
}

impl<D> Clone for DomainLogic<D> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            mutation_gate: self.mutation_gate.clone(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The storage adapter explicitly signalled that the user has no balance
    ///
    /// A transport layer is expected to render this as a missing-resource
    /// status.
    #[error("no point balance for user {0}")]
    NotFound(Uuid),

    /// A charge or use was rejected by the balance's transition rules
    ///
    /// A transport layer is expected to render this as an invalid-request
    /// status.
    #[error("point limit error: {0}")]
    Limit(#[from] crate::domain::Error),

    #[error("database port error: {0:?}")]
    Database(crate::ports::database::Error),
}

impl From<crate::ports::database::Error> for Error {
    fn from(err: crate::ports::database::Error) -> Self {
        match err {
            crate::ports::database::Error::BalanceNotFound(user_id) => Self::NotFound(user_id),
            err => Self::Database(err),
        }
    }
}
