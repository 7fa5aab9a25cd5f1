use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{Balance, TransactionKind},
    ports::database::DatabasePort,
};
use log::debug;
use tower::Service;
use uuid::Uuid;

use super::{DomainLogic, Error};

pub struct UsePointsRequest {
    pub user_id: Uuid,
    /// Number of points to subtract, must be positive
    pub amount: i64,
}

impl<D> Service<UsePointsRequest> for DomainLogic<D>
where
    D: DatabasePort + Send + Sync + 'static,
{
    type Response = Balance;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: UsePointsRequest) -> Self::Future {
        let database = self.database.clone();
        let gate = self.mutation_gate.clone();
        Box::pin(async move {
            // Mirror of the charge sequence, under the same gate.
            let _gate = gate.lock().await;

            let current = database.get_balance(req.user_id).await?;
            let updated = current.use_points(req.amount)?;

            database.put_balance(updated.user_id, updated.points).await?;
            database
                .append_history(
                    updated.user_id,
                    req.amount,
                    TransactionKind::Use,
                    updated.updated_at,
                )
                .await?;

            debug!("used {} point(s) for user {}", req.amount, updated.user_id);

            Ok(updated)
        })
    }
}
