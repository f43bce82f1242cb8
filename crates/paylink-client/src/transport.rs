//! Checkout Transport
//!
//! How a validated request reaches `POST /api/checkout`. The HTTP
//! implementation uses reqwest, which runs natively and in the browser.

use async_trait::async_trait;
use paylink_core::PaymentRequest;

use crate::config::ClientConfig;
use crate::error::Result;

/// Status and raw body of a checkout response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutReply {
    pub status: u16,
    pub body: String,
}

impl CheckoutReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport trait (Strategy pattern)
///
/// Futures are not required to be `Send` so the same code drives both a
/// tokio runtime and the single-threaded browser event loop.
#[async_trait(?Send)]
pub trait CheckoutTransport {
    /// POST a validated request as JSON and return the reply, whatever its status
    async fn post_checkout(&self, request: &PaymentRequest) -> Result<CheckoutReply>;
}

/// reqwest-backed transport
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.checkout_url(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::new(&ClientConfig::from_env())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl CheckoutTransport for HttpTransport {
    async fn post_checkout(&self, request: &PaymentRequest) -> Result<CheckoutReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(status, "Checkout response body unreadable: {}", e);
                String::new()
            }
        };

        tracing::debug!(status, endpoint = %self.endpoint, "Checkout response received");
        Ok(CheckoutReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SOMETHING_WENT_WRONG;
    use crate::submit::{create_payment, PAYMENT_FAILED};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use paylink_core::{FormFields, SubmissionResult};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    /// Serve `app` on an ephemeral local port
    async fn serve(app: Router) -> ClientConfig {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        ClientConfig::new(format!("http://{addr}"))
    }

    /// Checkout endpoint that always answers with `status` and `body`
    async fn canned_endpoint(status: StatusCode, body: Value) -> HttpTransport {
        let app = Router::new().route(
            "/api/checkout",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        HttpTransport::new(&serve(app).await)
    }

    async fn pay(transport: &HttpTransport) -> SubmissionResult {
        let fields = FormFields::new("50", "USD", "success@example.com");
        create_payment(&SubmissionResult::default(), &fields, transport).await
    }

    #[test]
    fn test_reply_success_range() {
        assert!(CheckoutReply::new(201, "").is_success());
        assert!(!CheckoutReply::new(400, "").is_success());
        assert!(!CheckoutReply::new(500, "").is_success());
    }

    #[test]
    fn test_http_transport_endpoint() {
        let transport = HttpTransport::new(&ClientConfig::new("http://127.0.0.1:9999"));
        assert_eq!(transport.endpoint(), "http://127.0.0.1:9999/api/checkout");
    }

    #[tokio::test]
    async fn test_http_created_is_success() {
        let app = Router::new().route(
            "/api/checkout",
            post(|Json(payload): Json<Value>| async move {
                let echoed = payload["amount"].as_f64() == Some(50.0)
                    && payload["currency"] == "USD"
                    && payload["email"] == "success@example.com";
                if echoed {
                    (StatusCode::CREATED, Json(json!({ "success": true, "payment": {} })))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({ "success": false, "error": "unexpected body" })))
                }
            }),
        );
        let transport = HttpTransport::new(&serve(app).await);

        assert_eq!(pay(&transport).await, SubmissionResult::succeeded());
    }

    #[tokio::test]
    async fn test_http_validation_failure_passed_through() {
        let transport = canned_endpoint(
            StatusCode::BAD_REQUEST,
            json!({
                "success": false,
                "error": [{ "field": "email", "code": "invalid_string", "message": "Invalid email address" }]
            }),
        )
        .await;

        let result = pay(&transport).await;
        assert_eq!(result, SubmissionResult::failed("email: Invalid email address"));
    }

    #[tokio::test]
    async fn test_http_server_error_passed_through() {
        let transport = canned_endpoint(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "success": false, "error": "Internal server error" }),
        )
        .await;
        assert_eq!(pay(&transport).await, SubmissionResult::failed("Internal server error"));

        let transport = canned_endpoint(StatusCode::BAD_GATEWAY, json!("upstream down")).await;
        assert_eq!(pay(&transport).await, SubmissionResult::failed(PAYMENT_FAILED));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&ClientConfig::new(format!("http://{addr}")));
        let fields = FormFields::new("50", "USD", "success@example.com");
        let request = paylink_core::schema::validate_fields(&fields).unwrap();

        let err = transport.post_checkout(&request).await.unwrap_err();
        assert!(matches!(err, crate::error::ClientError::Network(_)), "{err:?}");

        let result = pay(&transport).await;
        assert!(!result.success);
        let message = result.error.unwrap();
        assert_eq!(message, err.user_message());
        assert_ne!(message, SOMETHING_WENT_WRONG);
    }
}
