use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{domain::Balance, ports::database::DatabasePort};
use tower::Service;
use uuid::Uuid;

use super::{DomainLogic, Error};

pub struct GetBalanceRequest {
    pub user_id: Uuid,
}

/// Read-only lookup, never takes the mutation gate.
impl<D> Service<GetBalanceRequest> for DomainLogic<D>
where
    D: DatabasePort + Send + Sync + 'static,
{
    type Response = Balance;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: GetBalanceRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            let balance = database.get_balance(req.user_id).await?;

            Ok(balance)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::memory::MemoryDatabase;
    use rstest::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    #[fixture]
    fn user_id() -> Uuid {
        Uuid::new_v4()
    }

    #[rstest]
    #[tokio::test]
    async fn test_call(user_id: Uuid) -> Result<(), BoxError> {
        // GIVEN a database with an existing balance
        let database = MemoryDatabase::default();
        database.put_balance(user_id, 500).await?;
        let mut domain_logic = DomainLogic::new(Arc::new(database));

        // WHEN fetching the balance
        let res = ServiceExt::<GetBalanceRequest>::ready(&mut domain_logic)
            .await?
            .call(GetBalanceRequest { user_id })
            .await;

        // THEN the stored balance is returned
        assert_that!(res)
            .is_ok()
            .matches(|balance| balance.user_id == user_id && balance.points == 500);

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_call_unseen_user(user_id: Uuid) {
        // GIVEN an empty database with the default lookup contract
        let database = MemoryDatabase::default();
        let mut domain_logic = DomainLogic::new(Arc::new(database));

        // WHEN fetching the balance of an unseen user
        let res = ServiceExt::<GetBalanceRequest>::ready(&mut domain_logic)
            .await
            .unwrap()
            .call(GetBalanceRequest { user_id })
            .await;

        // THEN the empty balance is returned
        assert_that!(res)
            .is_ok()
            .matches(|balance| balance.user_id == user_id && balance.points == 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_call_not_found(user_id: Uuid) {
        // GIVEN an empty database that signals absence for unseen users
        let database = MemoryDatabase::with_strict_lookup();
        let mut domain_logic = DomainLogic::new(Arc::new(database));

        // WHEN fetching the balance of an unseen user
        let res = ServiceExt::<GetBalanceRequest>::ready(&mut domain_logic)
            .await
            .unwrap()
            .call(GetBalanceRequest { user_id })
            .await;

        // THEN the absence signal surfaces as a not-found error
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::NotFound(id) if *id == user_id));
    }

    #[rstest]
    #[tokio::test]
    async fn test_call_is_idempotent(user_id: Uuid) -> Result<(), BoxError> {
        // GIVEN a database with an existing balance
        let database = MemoryDatabase::default();
        database.put_balance(user_id, 500).await?;
        let mut domain_logic = DomainLogic::new(Arc::new(database));

        // WHEN fetching the balance twice with no mutation in between
        let first = ServiceExt::<GetBalanceRequest>::ready(&mut domain_logic)
            .await?
            .call(GetBalanceRequest { user_id })
            .await?;
        let second = ServiceExt::<GetBalanceRequest>::ready(&mut domain_logic)
            .await?
            .call(GetBalanceRequest { user_id })
            .await?;

        // THEN both reads return the same balance
        assert_that!(second).is_equal_to(first);

        Ok(())
    }
}
