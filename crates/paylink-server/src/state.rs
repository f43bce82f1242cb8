//! Application State

use std::sync::Arc;

use paylink_core::PaymentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Where checkout creates payment rows
    pub store: Arc<dyn PaymentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PaymentStore>) -> Self {
        Self { store }
    }
}
