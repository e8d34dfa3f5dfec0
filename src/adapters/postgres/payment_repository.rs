//! PostgreSQL implementation of PaymentRepository.
//!
//! Settlement locks the payment row, marks it paid and flags the owner's
//! profile premium in one transaction, so concurrent callbacks for the same
//! order settle it once.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, Timestamp, UserId};
use crate::domain::premium::{Amount, NewPayment, OrderId, Payment, PaymentStatus};
use crate::ports::{PaymentRepository, Settlement};

const PAYMENT_COLUMNS: &str =
    "id, user_id, provider, order_id, amount, status, raw_payload, created_at, updated_at";

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a payment.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    user_id: Uuid,
    provider: String,
    order_id: String,
    amount: i64,
    status: String,
    raw_payload: Option<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;
        let order_id = OrderId::parse(&row.order_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid order_id: {}", e))
        })?;

        Ok(Payment {
            id: PaymentId::from_db(row.id),
            user_id: UserId::from_uuid(row.user_id),
            provider: row.provider,
            order_id,
            amount: Amount::from_db(row.amount),
            status,
            raw_payload: row.raw_payload,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<PaymentStatus, DomainError> {
    PaymentStatus::parse(&s.to_lowercase()).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )
    })
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, payment: &NewPayment) -> Result<Payment, DomainError> {
        let row: PaymentRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO payments (user_id, provider, order_id, amount, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PAYMENT_COLUMNS
        ))
        .bind(payment.user_id.as_uuid())
        .bind(&payment.provider)
        .bind(payment.order_id.as_str())
        .bind(payment.amount.value())
        .bind(PaymentStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::new(
                ErrorCode::DuplicateOrder,
                format!("Duplicate order id {}", payment.order_id),
            ),
            _ => db_error("insert payment", e),
        })?;

        row.try_into()
    }

    async fn attach_payload(&self, order_id: &OrderId, payload: &Value) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE payments SET raw_payload = $2, updated_at = NOW() WHERE order_id = $1",
        )
        .bind(order_id.as_str())
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("store payment payload", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_order(&self, order_id: &OrderId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE order_id = $1",
            PAYMENT_COLUMNS
        ))
        .bind(order_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn settle(&self, order_id: &OrderId, at: Timestamp) -> Result<Settlement, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("start transaction", e))?;

        let current: Option<(Uuid, String)> =
            sqlx::query_as("SELECT user_id, status FROM payments WHERE order_id = $1 FOR UPDATE")
                .bind(order_id.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("lock payment", e))?;

        let Some((user_uuid, status)) = current else {
            return Ok(Settlement::UnknownOrder);
        };
        let user_id = UserId::from_uuid(user_uuid);
        if parse_status(&status)? == PaymentStatus::Paid {
            return Ok(Settlement::AlreadyPaid { user_id });
        }

        sqlx::query("UPDATE payments SET status = $2, updated_at = NOW() WHERE order_id = $1")
            .bind(order_id.as_str())
            .bind(PaymentStatus::Paid.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("mark payment paid", e))?;

        sqlx::query(
            r#"
            INSERT INTO profiles (id, is_premium, premium_since)
            VALUES ($1, TRUE, $2)
            ON CONFLICT (id) DO UPDATE SET
                is_premium = TRUE,
                premium_since = COALESCE(
                    CASE WHEN profiles.is_premium THEN profiles.premium_since END,
                    EXCLUDED.premium_since
                )
            "#,
        )
        .bind(user_uuid)
        .bind(at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("grant premium", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        Ok(Settlement::Settled { user_id })
    }

    async fn transition(&self, order_id: &OrderId, status: PaymentStatus) -> Result<bool, DomainError> {
        let current = self.find_by_order(order_id).await?;
        let Some(payment) = current else {
            return Ok(false);
        };
        if !payment.status.can_transition_to(status) {
            return Ok(false);
        }

        // Guarded on the observed status so a concurrent settlement wins.
        let result = sqlx::query(
            "UPDATE payments SET status = $3, updated_at = NOW() WHERE order_id = $1 AND status = $2",
        )
        .bind(order_id.as_str())
        .bind(payment.status.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update payment status", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn recent_for_user(&self, user_id: &UserId, limit: i64) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
            PAYMENT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }
}
