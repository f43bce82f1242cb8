//! # paylink-client
//!
//! Client side of the paylink checkout: the payment form model and the
//! remote submission step that posts to `POST /api/checkout`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paylink_client::{HttpTransport, PaymentForm, RemoteSubmitter};
//! use paylink_core::FormField;
//!
//! let submitter = RemoteSubmitter::new(HttpTransport::from_env());
//! let mut form = PaymentForm::new();
//! form.set_field(FormField::Amount, "50");
//! form.set_field(FormField::Currency, "USD");
//! form.set_field(FormField::Email, "buyer@example.com");
//!
//! form.submit(&submitter).await;
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod submit;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use form::{InputStyle, PaymentForm, SubmissionState};
pub use submit::{create_payment, RemoteSubmitter, Submitter};
pub use transport::{CheckoutReply, CheckoutTransport, HttpTransport};
