//! Checkout Form State
//!
//! Everything the payment form renders, independent of any UI toolkit.
//! Field edits are stored as typed; validation only runs on submit.

use std::collections::BTreeMap;

use paylink_core::{schema, FormField, FormFields, SubmissionResult};

use crate::error::SOMETHING_WENT_WRONG;
use crate::submit::Submitter;

pub const PAY_NOW: &str = "Pay Now";
pub const PROCESSING: &str = "Processing...";

/// Where the form is in its submit cycle
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Editable, nothing in flight
    #[default]
    Idle,

    /// Remote submission outstanding; the submit control is disabled
    Pending,

    /// Payment accepted; the form is replaced by a confirmation
    Succeeded,

    /// Last submission failed with a top-level message
    Failed(String),
}

/// Visual treatment of an input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputStyle {
    Normal,
    Invalid,
}

impl InputStyle {
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "input",
            Self::Invalid => "input input-invalid",
        }
    }
}

/// Payment form model
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentForm {
    fields: FormFields,
    field_errors: BTreeMap<FormField, String>,
    state: SubmissionState,
    last_result: SubmissionResult,
}

impl PaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn value(&self, field: FormField) -> &str {
        self.fields.get(field)
    }

    /// Record a field edit. Does not re-validate.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// Inline message for `field` from the last submit, if any
    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub const fn field_errors(&self) -> &BTreeMap<FormField, String> {
        &self.field_errors
    }

    pub const fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self.state, SubmissionState::Pending)
    }

    pub const fn is_succeeded(&self) -> bool {
        matches!(self.state, SubmissionState::Succeeded)
    }

    /// Top-level error banner text
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Result of the most recent remote submission
    pub const fn last_result(&self) -> &SubmissionResult {
        &self.last_result
    }

    /// Validate the current fields and, when valid, enter `Pending`.
    ///
    /// Returns the fields to hand to the remote submission, or `None` when
    /// validation failed (field errors are populated), a submission is
    /// already pending, or the payment already succeeded.
    pub fn begin_submit(&mut self) -> Option<FormFields> {
        if matches!(self.state, SubmissionState::Pending | SubmissionState::Succeeded) {
            return None;
        }

        match schema::validate_fields(&self.fields) {
            Ok(_) => {
                self.field_errors.clear();
                self.state = SubmissionState::Pending;
                Some(self.fields.clone())
            }
            Err(errors) => {
                tracing::debug!(issues = errors.len(), "Payment form failed validation");
                self.field_errors = errors.field_errors();
                None
            }
        }
    }

    /// Apply the outcome of the remote submission started by `begin_submit`
    pub fn finish(&mut self, result: SubmissionResult) {
        self.state = if result.success {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed(
                result
                    .error
                    .clone()
                    .unwrap_or_else(|| SOMETHING_WENT_WRONG.into()),
            )
        };
        self.last_result = result;
    }

    /// Validate, submit and apply the result in one step
    pub async fn submit<S>(&mut self, submitter: &S) -> &SubmissionState
    where
        S: Submitter + ?Sized,
    {
        if let Some(fields) = self.begin_submit() {
            let result = submitter.submit(&self.last_result, &fields).await;
            self.finish(result);
        }
        &self.state
    }

    /// Close the error banner, leaving the fields as they were
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, SubmissionState::Failed(_)) {
            self.state = SubmissionState::Idle;
        }
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.is_pending() { PROCESSING } else { PAY_NOW }
    }

    pub fn input_style(&self, field: FormField) -> InputStyle {
        if self.field_errors.contains_key(&field) {
            InputStyle::Invalid
        } else {
            InputStyle::Normal
        }
    }
}
