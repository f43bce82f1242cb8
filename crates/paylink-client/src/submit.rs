//! Remote Payment Submission
//!
//! Re-validates raw form input, posts it to the checkout endpoint and folds
//! every outcome (validation, transport, server) into a [`SubmissionResult`].

use async_trait::async_trait;
use paylink_core::{schema, FormFields, SubmissionResult};
use serde_json::Value;

use crate::transport::{CheckoutReply, CheckoutTransport};

/// Fallback for a failed response without a readable error message
pub const PAYMENT_FAILED: &str = "Payment failed";

/// Submit one payment attempt.
///
/// Never fails: every error path becomes `{ error: Some(..), success: false }`.
/// No request is sent when `fields` fail validation. `_previous` is the
/// result of the prior attempt and is accepted so this can be driven as a
/// form action, but it does not influence the outcome.
pub async fn create_payment<T>(
    _previous: &SubmissionResult,
    fields: &FormFields,
    transport: &T,
) -> SubmissionResult
where
    T: CheckoutTransport + ?Sized,
{
    let request = match schema::validate_fields(fields) {
        Ok(request) => request,
        Err(errors) => {
            tracing::debug!(issues = errors.len(), "Submission rejected before sending");
            return SubmissionResult::failed(errors.to_string());
        }
    };

    match transport.post_checkout(&request).await {
        Ok(reply) if reply.is_success() => {
            tracing::info!(status = reply.status, "Payment submitted");
            SubmissionResult::succeeded()
        }
        Ok(reply) => {
            tracing::warn!(status = reply.status, "Checkout endpoint rejected payment");
            SubmissionResult::failed(error_message(&reply))
        }
        Err(e) => {
            tracing::warn!("Checkout request failed: {}", e);
            SubmissionResult::failed(e.user_message())
        }
    }
}

/// Pull the user-facing message out of a failed reply.
///
/// A string `error` is used as is; a list of validation issues is joined;
/// anything else, including an unparsable body, is [`PAYMENT_FAILED`].
fn error_message(reply: &CheckoutReply) -> String {
    let Ok(body) = serde_json::from_str::<Value>(&reply.body) else {
        return PAYMENT_FAILED.into();
    };

    match body.get("error") {
        Some(Value::String(msg)) if !msg.is_empty() => msg.clone(),
        Some(Value::Array(issues)) => {
            let messages: Vec<String> = issues
                .iter()
                .filter_map(|issue| {
                    let message = issue.get("message")?.as_str()?;
                    Some(match issue.get("field").and_then(Value::as_str) {
                        Some(field) => format!("{field}: {message}"),
                        None => message.to_string(),
                    })
                })
                .collect();

            if messages.is_empty() {
                PAYMENT_FAILED.into()
            } else {
                messages.join("; ")
            }
        }
        _ => PAYMENT_FAILED.into(),
    }
}

/// Something the form can hand its fields to
#[async_trait(?Send)]
pub trait Submitter {
    async fn submit(&self, previous: &SubmissionResult, fields: &FormFields) -> SubmissionResult;
}

/// Submits through [`create_payment`] over a transport
#[derive(Clone, Debug)]
pub struct RemoteSubmitter<T> {
    transport: T,
}

impl<T: CheckoutTransport> RemoteSubmitter<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait(?Send)]
impl<T: CheckoutTransport> Submitter for RemoteSubmitter<T> {
    async fn submit(&self, previous: &SubmissionResult, fields: &FormFields) -> SubmissionResult {
        create_payment(previous, fields, &self.transport).await
    }
}
