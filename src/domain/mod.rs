use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Largest point total a single balance can hold.
pub const MAX_POINTS: i64 = i64::MAX;

/// A user's current point total
#[derive(Clone, Debug, PartialEq)]
pub struct Balance {
    /// Unique identifier for the owning user
    ///
    /// This is also used by other services.
    pub user_id: Uuid,
    /// Current amount of points
    ///
    /// Never negative, never above [`MAX_POINTS`].
    pub points: i64,
    /// Instant of the last change
    pub updated_at: DateTime<Utc>,
}

impl Balance {
    /// Balance for a user with no recorded points yet
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            points: 0,
            updated_at: Utc::now(),
        }
    }

    /// Returns a new balance with `amount` more points.
    ///
    /// The addition is checked: a total past [`MAX_POINTS`] is rejected,
    /// it never wraps.
    pub fn charge(&self, amount: i64) -> Result<Self, Error> {
        if amount <= 0 {
            return Err(Error::ChargeLimitExceeded {
                current_points: self.points,
                amount,
            });
        }

        let points = self
            .points
            .checked_add(amount)
            .ok_or(Error::ChargeLimitExceeded {
                current_points: self.points,
                amount,
            })?;

        Ok(Self {
            user_id: self.user_id,
            points,
            updated_at: Utc::now(),
        })
    }

    /// Returns a new balance with `amount` fewer points.
    ///
    /// Spending the exact current total is allowed and yields zero.
    pub fn use_points(&self, amount: i64) -> Result<Self, Error> {
        if amount <= 0 || amount > self.points {
            return Err(Error::UseLimitExceeded {
                current_points: self.points,
                amount,
            });
        }

        Ok(Self {
            user_id: self.user_id,
            points: self.points - amount,
            updated_at: Utc::now(),
        })
    }
}

/// Audit record of one successful charge or use
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    /// Assigned by the storage adapter, increasing in insertion order
    pub sequence_id: u64,
    pub user_id: Uuid,
    /// Magnitude of the change, always positive
    pub amount: i64,
    pub kind: TransactionKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Charge,
    Use,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Charging a non-positive amount, or past [`MAX_POINTS`]
    #[error("cannot charge {amount} point(s) on top of {current_points}")]
    ChargeLimitExceeded { current_points: i64, amount: i64 },

    /// Using a non-positive amount, or more points than the user holds
    #[error("cannot use {amount} point(s) out of {current_points}")]
    UseLimitExceeded { current_points: i64, amount: i64 },
}
