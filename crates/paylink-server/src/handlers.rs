//! HTTP Handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use paylink_core::{schema, NewPayment, PaymentError, PaymentRecord, ValidationIssue};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: String,
    pub store_connected: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckoutCreated {
    pub success: bool,
    pub payment: PaymentRecord,
}

/// Either the validation issues or a fixed message
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckoutErrorDetail {
    Issues(Vec<ValidationIssue>),
    Message(&'static str),
}

#[derive(Debug, Serialize)]
pub struct CheckoutFailure {
    pub success: bool,
    pub error: CheckoutErrorDetail,
}

impl CheckoutFailure {
    fn invalid(issues: Vec<ValidationIssue>) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                success: false,
                error: CheckoutErrorDetail::Issues(issues),
            }),
        )
    }

    fn internal(message: &'static str) -> (StatusCode, Json<Self>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Self {
                success: false,
                error: CheckoutErrorDetail::Message(message),
            }),
        )
    }
}

/// Schema failures become 400 with the issue list; everything else is a
/// 500 whose detail stays in the log
fn checkout_error(err: PaymentError) -> (StatusCode, Json<CheckoutFailure>) {
    match err {
        PaymentError::Validation(errors) => {
            tracing::debug!(issues = %errors, "Checkout rejected");
            CheckoutFailure::invalid(errors.into_issues())
        }
        other => {
            tracing::error!("Checkout failed: {}", other);
            CheckoutFailure::internal(other.user_message())
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.name().to_string(),
        store_connected: state.store.health_check().await,
    })
}

/// Create a pending payment
///
/// The body is validated against the shared payment schema. A body that is
/// not JSON at all, and store failures of any kind, are reported as a bare
/// "Internal server error".
pub async fn create_checkout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CheckoutCreated>), (StatusCode, Json<CheckoutFailure>)> {
    let input: Value =
        serde_json::from_slice(&body).map_err(|e| checkout_error(PaymentError::from(e)))?;

    let request =
        schema::validate(&input).map_err(|e| checkout_error(PaymentError::from(e)))?;

    let payment = state
        .store
        .create(NewPayment::pending(request))
        .await
        .map_err(checkout_error)?;

    tracing::info!(
        payment_id = %payment.id,
        amount = %payment.amount,
        currency = %payment.currency,
        "Created pending payment"
    );

    Ok((
        StatusCode::CREATED,
        Json(CheckoutCreated {
            success: true,
            payment,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request},
        Router,
    };
    use paylink_core::{
        MemoryPaymentStore, PaymentError, PaymentStore, Result as StoreResult,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    /// Store that rejects every insert like a unique-constraint violation
    struct FailingStore;

    #[async_trait]
    impl PaymentStore for FailingStore {
        async fn create(&self, _payment: NewPayment) -> StoreResult<PaymentRecord> {
            Err(PaymentError::Storage(
                "duplicate key value violates unique constraint \"payments_pkey\"".into(),
            ))
        }

        async fn health_check(&self) -> bool {
            false
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn app_with(store: Arc<dyn PaymentStore>) -> Router {
        crate::app(AppState::new(store), "static")
    }

    fn memory_app() -> (Router, Arc<MemoryPaymentStore>) {
        let store = Arc::new(MemoryPaymentStore::new());
        (app_with(store.clone()), store)
    }

    async fn post_checkout(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/checkout")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_create_payment_successfully() {
        let (app, store) = memory_app();
        let body = json!({ "amount": 50, "currency": "USD", "email": "success@example.com" });

        let (status, data) = post_checkout(app, body.to_string()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(data["success"], true);
        assert!(data["payment"]["id"].is_string());
        assert_eq!(data["payment"]["amount"].as_f64(), Some(50.0));
        assert_eq!(data["payment"]["currency"], "USD");
        assert_eq!(data["payment"]["email"], "success@example.com");
        assert_eq!(data["payment"]["status"], "pending");
        assert!(data["payment"]["createdAt"].is_string());
        assert!(data["payment"]["updatedAt"].is_string());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_invalid_payloads() {
        let payloads = [
            json!({ "amount": -100, "currency": "USD", "email": "test@example.com" }),
            json!({ "amount": 100, "currency": "USDD", "email": "test@example.com" }),
            json!({ "amount": 100, "currency": "USD", "email": "invalid-email" }),
            json!({ "amount": "100", "currency": "USD", "email": "test@example.com" }),
        ];

        for payload in payloads {
            let (app, store) = memory_app();
            let (status, data) = post_checkout(app, payload.to_string()).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
            assert_eq!(data["success"], false);
            assert!(data["error"][0]["message"].is_string());
            assert!(store.is_empty());
        }
    }

    #[tokio::test]
    async fn test_missing_fields_listed() {
        let (app, _) = memory_app();
        let (status, data) = post_checkout(app, json!({ "amount": 100 }).to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let issues = data["error"].as_array().unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0]["field"], "currency");
        assert_eq!(issues[1]["field"], "email");
        assert!(issues.iter().all(|i| i["message"] == "Required"));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_generic_500() {
        for body in ["{not json", "", "amount=100&currency=USD"] {
            let (app, store) = memory_app();
            let (status, data) = post_checkout(app, body.into()).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{body}");
            assert_eq!(data, json!({ "success": false, "error": "Internal server error" }));
            assert!(store.is_empty());
        }
    }

    #[tokio::test]
    async fn test_json_null_body_lists_every_field() {
        let (app, _) = memory_app();
        let (status, data) = post_checkout(app, "null".into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(data["error"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let app = app_with(Arc::new(FailingStore));
        let body = json!({ "amount": 100, "currency": "USD", "email": "test@example.com" });

        let (status, data) = post_checkout(app, body.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(data, json!({ "success": false, "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_duplicate_submissions_create_distinct_records() {
        let (app, store) = memory_app();
        let body = json!({ "amount": 25.5, "currency": "EUR", "email": "twice@example.com" });

        let (_, first) = post_checkout(app.clone(), body.to_string()).await;
        let (_, second) = post_checkout(app, body.to_string()).await;

        assert_ne!(first["payment"]["id"], second["payment"]["id"]);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_cors_open_to_any_origin() {
        let (app, _) = memory_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/checkout")
                    .header(header::ORIGIN, "https://shop.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_health_reports_store() {
        let (app, _) = memory_app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let data: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(data["store"], "memory");
        assert_eq!(data["store_connected"], true);
    }
}
