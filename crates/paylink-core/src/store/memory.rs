//! In-memory Payment Store
//!
//! For development and tests. Records live for the life of the process.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::PaymentStore;
use crate::error::{PaymentError, Result};
use crate::model::{NewPayment, PaymentRecord};

/// In-memory payment store
#[derive(Default)]
pub struct MemoryPaymentStore {
    payments: RwLock<HashMap<String, PaymentRecord>>,
}

impl MemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a payment by id
    pub fn get(&self, id: &str) -> Result<Option<PaymentRecord>> {
        let payments = self.payments.read().map_err(|_| poisoned())?;
        Ok(payments.get(id).cloned())
    }

    /// Number of stored payments
    pub fn len(&self) -> usize {
        self.payments.read().map_or(0, |p| p.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn create(&self, payment: NewPayment) -> Result<PaymentRecord> {
        let now = Utc::now();
        let record = PaymentRecord {
            id: Uuid::new_v4().to_string(),
            amount: payment.amount,
            currency: payment.currency,
            email: payment.email,
            status: payment.status,
            created_at: now,
            updated_at: now,
        };

        let mut payments = self.payments.write().map_err(|_| poisoned())?;
        payments.insert(record.id.clone(), record.clone());

        tracing::debug!(payment_id = %record.id, "Stored payment in memory");
        Ok(record)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn poisoned() -> PaymentError {
    PaymentError::Storage("payment store lock poisoned".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Currency, PaymentRequest, PaymentStatus};
    use rust_decimal_macros::dec;

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: dec!(50),
            currency: Currency::Usd,
            email: "success@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = MemoryPaymentStore::new();
        let record = store.create(NewPayment::pending(request())).await.unwrap();

        assert!(!record.id.is_empty());
        assert_eq!(record.status, PaymentStatus::Pending);
        assert_eq!(record.amount, dec!(50));
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(store.get(&record.id).unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_identical_payments_are_distinct_records() {
        let store = MemoryPaymentStore::new();
        let first = store.create(NewPayment::pending(request())).await.unwrap();
        let second = store.create(NewPayment::pending(request())).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.len(), 2);
    }
}
