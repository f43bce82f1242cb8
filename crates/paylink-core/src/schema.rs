//! Payment Validation Schema
//!
//! The single set of rules a payment request must satisfy. The form runs it
//! before submitting, the remote submission step runs it again before any
//! network call, and the checkout endpoint runs it before persisting.
//!
//! | field    | rule                                  |
//! |----------|---------------------------------------|
//! | amount   | required, numeric, strictly positive  |
//! | currency | required, one of USD / EUR / GBP      |
//! | email    | required, standard address shape      |
//!
//! Every field is checked independently and all violations are reported.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::model::{Currency, FormField, FormFields, PaymentRequest};

pub const REQUIRED: &str = "Required";
pub const AMOUNT_NOT_A_NUMBER: &str = "Amount must be a number";
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than 0";
pub const INVALID_CURRENCY: &str = "Invalid currency. Expected 'USD' | 'EUR' | 'GBP'";
pub const INVALID_EMAIL: &str = "Invalid email address";

const SMALLEST_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 28);

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Machine-readable reason for a validation issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    InvalidType,
    TooSmall,
    InvalidEnumValue,
    InvalidString,
}

/// One field-level violation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: FormField,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: FormField, code: IssueCode, message: &str) -> Self {
        Self {
            field,
            code,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All violations found in one input, in field order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Message per field, for inline display next to each input
    pub fn field_errors(&self) -> BTreeMap<FormField, String> {
        self.issues
            .iter()
            .map(|issue| (issue.field, issue.message.clone()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate an arbitrary JSON input into a payment request.
///
/// Missing and `null` fields are both reported as required. Input that is
/// not an object has every field missing.
pub fn validate(input: &Value) -> Result<PaymentRequest, ValidationErrors> {
    let mut issues = Vec::new();

    let amount = check_amount(field(input, FormField::Amount))
        .map_err(|issue| issues.push(issue))
        .ok();
    let currency = check_currency(field(input, FormField::Currency))
        .map_err(|issue| issues.push(issue))
        .ok();
    let email = check_email(field(input, FormField::Email))
        .map_err(|issue| issues.push(issue))
        .ok();

    match (amount, currency, email) {
        (Some(amount), Some(currency), Some(email)) => Ok(PaymentRequest {
            amount,
            currency,
            email,
        }),
        _ => Err(ValidationErrors { issues }),
    }
}

/// Coerce raw form input and validate it
pub fn validate_fields(fields: &FormFields) -> Result<PaymentRequest, ValidationErrors> {
    validate(&coerce(fields))
}

/// Turn raw form strings into the JSON shape `validate` expects.
///
/// Blank fields are dropped so they report as required. An amount that
/// parses as a finite number becomes a JSON number; anything else stays a
/// string and fails the numeric check.
pub fn coerce(fields: &FormFields) -> Value {
    let mut object = Map::new();

    let amount = fields.amount.trim();
    if !amount.is_empty() {
        object.insert(FormField::Amount.name().into(), coerce_amount(amount));
    }

    for field in [FormField::Currency, FormField::Email] {
        let value = fields.get(field).trim();
        if !value.is_empty() {
            object.insert(field.name().into(), Value::String(value.to_string()));
        }
    }

    Value::Object(object)
}

/// Whether `email` has a standard address shape
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}

fn coerce_amount(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(raw.to_string()), Value::Number)
}

fn field(input: &Value, field: FormField) -> Option<&Value> {
    input.get(field.name()).filter(|v| !v.is_null())
}

fn check_amount(value: Option<&Value>) -> Result<Decimal, ValidationIssue> {
    let issue = |code, message| ValidationIssue::new(FormField::Amount, code, message);

    let Some(value) = value else {
        return Err(issue(IssueCode::Required, REQUIRED));
    };
    let Value::Number(number) = value else {
        return Err(issue(IssueCode::InvalidType, AMOUNT_NOT_A_NUMBER));
    };

    // Sign is judged on the number itself, before any precision loss
    let raw = number.as_f64().unwrap_or_default();
    if raw <= 0.0 {
        return Err(issue(IssueCode::TooSmall, AMOUNT_NOT_POSITIVE));
    }
    Ok(positive_decimal(number, raw))
}

/// Nearest `Decimal` to a positive JSON number.
///
/// Values beyond `Decimal`'s 28 digits saturate: tiny amounts become the
/// smallest positive `Decimal`, huge ones `Decimal::MAX`.
fn positive_decimal(number: &Number, raw: f64) -> Decimal {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .or_else(|| Decimal::from_f64(raw))
        .filter(|amount| *amount > Decimal::ZERO)
        .unwrap_or(if raw >= 1.0 { Decimal::MAX } else { SMALLEST_AMOUNT })
}

fn check_currency(value: Option<&Value>) -> Result<Currency, ValidationIssue> {
    match value {
        None => Err(ValidationIssue::new(
            FormField::Currency,
            IssueCode::Required,
            REQUIRED,
        )),
        Some(value) => value.as_str().and_then(Currency::parse).ok_or_else(|| {
            ValidationIssue::new(
                FormField::Currency,
                IssueCode::InvalidEnumValue,
                INVALID_CURRENCY,
            )
        }),
    }
}

fn check_email(value: Option<&Value>) -> Result<String, ValidationIssue> {
    match value {
        None => Err(ValidationIssue::new(
            FormField::Email,
            IssueCode::Required,
            REQUIRED,
        )),
        Some(Value::String(email)) if is_valid_email(email) => Ok(email.clone()),
        Some(_) => Err(ValidationIssue::new(
            FormField::Email,
            IssueCode::InvalidString,
            INVALID_EMAIL,
        )),
    }
}
