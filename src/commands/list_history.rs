use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{domain::HistoryEntry, ports::database::DatabasePort};
use tower::Service;
use uuid::Uuid;

use super::{DomainLogic, Error};

pub struct ListHistoryRequest {
    pub user_id: Uuid,
}

/// Read-only listing, never takes the mutation gate.
///
/// Entries come back in insertion order, which equals creation order.
impl<D> Service<ListHistoryRequest> for DomainLogic<D>
where
    D: DatabasePort + Send + Sync + 'static,
{
    type Response = Vec<HistoryEntry>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ListHistoryRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            let entries = database.list_history(req.user_id).await?;

            Ok(entries)
        })
    }
}
