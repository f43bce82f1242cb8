//! Payment Model
//!
//! Request, record and result types shared by the form, the remote
//! submission step and the checkout endpoint.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currencies accepted at checkout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Every accepted currency, in display order
    pub const ALL: [Self; 3] = [Self::Usd, Self::Eur, Self::Gbp];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Parse an ISO code. Matching is exact: "usd" is rejected.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment lifecycle status. Records are only ever created as pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
}

impl PaymentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated checkout attempt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount to charge, strictly positive
    pub amount: Decimal,

    /// Charge currency
    pub currency: Currency,

    /// Payer email
    pub email: String,
}

/// Fields handed to a store to create one payment row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPayment {
    pub amount: Decimal,
    pub currency: Currency,
    pub email: String,
    pub status: PaymentStatus,
}

impl NewPayment {
    /// A new pending payment for a validated request
    pub fn pending(request: PaymentRequest) -> Self {
        Self {
            amount: request.amount,
            currency: request.currency,
            email: request.email,
            status: PaymentStatus::Pending,
        }
    }
}

/// A persisted payment row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Store-assigned identifier
    pub id: String,

    pub amount: Decimal,
    pub currency: Currency,
    pub email: String,
    pub status: PaymentStatus,

    /// Creation timestamp (store-assigned)
    pub created_at: DateTime<Utc>,

    /// Last update timestamp (store-assigned)
    pub updated_at: DateTime<Utc>,
}

/// Names of the checkout form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Amount,
    Currency,
    Email,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Amount, Self::Currency, Self::Email];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Currency => "currency",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw, unvalidated form input as typed by the user
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub email: String,
}

impl FormFields {
    pub fn new(
        amount: impl Into<String>,
        currency: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            email: email.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Amount => &self.amount,
            FormField::Currency => &self.currency,
            FormField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Amount => self.amount = value,
            FormField::Currency => self.currency = value,
            FormField::Email => self.email = value,
        }
    }
}

/// Outcome of one remote submission, as seen by the form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub error: Option<String>,
    pub success: bool,
}

impl SubmissionResult {
    pub const fn succeeded() -> Self {
        Self {
            error: None,
            success: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: false,
        }
    }
}
