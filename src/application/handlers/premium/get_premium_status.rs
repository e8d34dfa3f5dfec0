//! GetPremiumStatusHandler - Query handler for the premium page.

use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::account::load_profile;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::premium::{PaymentSummary, RECENT_PAYMENTS_LIMIT};
use crate::ports::{PaymentRepository, ProfileRepository};

#[derive(Debug, Clone)]
pub struct GetPremiumStatusQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremiumStatus {
    pub is_premium: bool,
    pub premium_since: Option<Timestamp>,
    /// Most recent first.
    pub payments: Vec<PaymentSummary>,
}

pub struct GetPremiumStatusHandler {
    profiles: Arc<dyn ProfileRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl GetPremiumStatusHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { profiles, payments }
    }

    pub async fn handle(&self, query: GetPremiumStatusQuery) -> Result<PremiumStatus, DomainError> {
        let profile = load_profile(self.profiles.as_ref(), &query.user_id).await?;
        let payments = self
            .payments
            .recent_for_user(&query.user_id, RECENT_PAYMENTS_LIMIT)
            .await?;

        Ok(PremiumStatus {
            is_premium: profile.is_premium,
            premium_since: profile.premium_since,
            payments: payments.into_iter().map(PaymentSummary::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::premium::{Amount, NewPayment};
    use uuid::Uuid;

    #[tokio::test]
    async fn lists_five_newest_payments_of_the_caller() {
        let db = Arc::new(InMemoryDatabase::new());
        let me = UserId::from_uuid(Uuid::new_v4());
        let other = UserId::from_uuid(Uuid::new_v4());
        let start = Timestamp::now();
        for day in 0..7 {
            db.insert(&NewPayment::premium(me, Amount::from_db(10_000), start.add_days(day)))
                .await
                .unwrap();
        }
        db.insert(&NewPayment::premium(other, Amount::from_db(10_000), start))
            .await
            .unwrap();

        let status = GetPremiumStatusHandler::new(db.clone(), db)
            .handle(GetPremiumStatusQuery { user_id: me })
            .await
            .unwrap();

        assert!(!status.is_premium);
        assert_eq!(status.payments.len(), 5);
        let ids: Vec<i64> = status.payments.iter().map(|p| p.id.value()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn settled_payment_shows_premium() {
        let db = Arc::new(InMemoryDatabase::new());
        let me = UserId::from_uuid(Uuid::new_v4());
        let order = NewPayment::premium(me, Amount::from_db(10_000), Timestamp::now());
        db.insert(&order).await.unwrap();
        db.settle(&order.order_id, Timestamp::now()).await.unwrap();

        let status = GetPremiumStatusHandler::new(db.clone(), db)
            .handle(GetPremiumStatusQuery { user_id: me })
            .await
            .unwrap();

        assert!(status.is_premium);
        assert!(status.premium_since.is_some());
        assert_eq!(status.payments[0].status.as_str(), "paid");
    }
}
