//! # paylink-core
//!
//! Payment model, validation schema and record stores for the paylink
//! checkout flow.
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌────────────────┐   ┌─────────┐
//! │ Payment form │──▶│ Remote submit │──▶│ /api/checkout  │──▶│  Store  │
//! │  (validate)  │   │ (re-validate) │   │ (validate, 201)│   │ pending │
//! └──────────────┘   └───────────────┘   └────────────────┘   └─────────┘
//! ```
//!
//! All three layers share [`schema::validate`], so a request the form
//! accepts is exactly a request the endpoint accepts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paylink_core::{schema, MemoryPaymentStore, NewPayment, PaymentStore};
//!
//! let request = schema::validate(&body)?;
//! let store = MemoryPaymentStore::new();
//! let record = store.create(NewPayment::pending(request)).await?;
//! assert_eq!(record.status.as_str(), "pending");
//! ```

pub mod error;
pub mod model;
pub mod schema;
#[cfg(feature = "store")]
pub mod store;

pub use error::{PaymentError, Result, INTERNAL_SERVER_ERROR};
pub use model::{
    Currency, FormField, FormFields, NewPayment, PaymentRecord, PaymentRequest, PaymentStatus,
    SubmissionResult,
};
pub use schema::{ValidationErrors, ValidationIssue};
#[cfg(feature = "store")]
pub use store::{MemoryPaymentStore, PaymentStore};
#[cfg(feature = "postgres")]
pub use store::PgPaymentStore;
