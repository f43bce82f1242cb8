//! Payment Record Stores
//!
//! The checkout endpoint only ever needs one operation: create a payment
//! row and get back the stored record with its generated id and timestamps.

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use memory::MemoryPaymentStore;
#[cfg(feature = "postgres")]
pub use postgres::PgPaymentStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{NewPayment, PaymentRecord};

/// Payment store trait (Strategy pattern)
///
/// Implement this for each backing store. Constraint violations and
/// connection failures are reported as [`PaymentError::Storage`](crate::PaymentError::Storage).
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persist a new payment, assigning its id and timestamps
    async fn create(&self, payment: NewPayment) -> Result<PaymentRecord>;

    /// Check if the store is reachable
    async fn health_check(&self) -> bool;

    /// Store name
    fn name(&self) -> &str;
}
