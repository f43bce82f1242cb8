//! Postgres Payment Store
//!
//! Backed by a `payments` table (see `migrations/`). Ids and timestamps are
//! generated by the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use super::PaymentStore;
use crate::error::{PaymentError, Result};
use crate::model::{Currency, NewPayment, PaymentRecord, PaymentStatus};

const INSERT_PAYMENT: &str = "\
    INSERT INTO payments (amount, currency, email, status) \
    VALUES ($1, $2, $3, $4) \
    RETURNING id, amount, currency, email, status, created_at, updated_at";

#[derive(FromRow)]
struct PaymentRow {
    id: Uuid,
    amount: Decimal,
    currency: String,
    email: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = PaymentError;

    fn try_from(row: PaymentRow) -> Result<Self> {
        let currency = Currency::parse(&row.currency)
            .ok_or_else(|| PaymentError::Storage(format!("unknown currency {:?}", row.currency)))?;
        let status = PaymentStatus::parse(&row.status)
            .ok_or_else(|| PaymentError::Storage(format!("unknown status {:?}", row.status)))?;

        Ok(Self {
            id: row.id.to_string(),
            amount: row.amount,
            currency,
            email: row.email,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed payment store
pub struct PgPaymentStore {
    pool: PgPool,
}

impl PgPaymentStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and run pending migrations
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Payments table migrated");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl PaymentStore for PgPaymentStore {
    async fn create(&self, payment: NewPayment) -> Result<PaymentRecord> {
        let row: PaymentRow = sqlx::query_as(INSERT_PAYMENT)
            .bind(payment.amount)
            .bind(payment.currency.as_str())
            .bind(&payment.email)
            .bind(payment.status.as_str())
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
