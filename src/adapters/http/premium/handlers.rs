//! HTTP handlers for premium endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::status_for;
use crate::adapters::http::middleware::BearerSession;
use crate::adapters::http::state::AppState;
use crate::application::handlers::premium::{
    CreatePremiumPaymentCommand, GetPremiumStatusQuery, HandlePaymentWebhookCommand,
    PremiumError,
};
use crate::domain::foundation::ErrorCode;
use crate::domain::premium::{WebhookError, CALLBACK_TOKEN_HEADER};

use super::dto::{CreatePaymentRequest, PaymentErrorBody, WebhookAck};

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Payment-route error wrapper with the `{error, detail?}` body.
#[derive(Debug)]
pub struct PaymentApiError(pub PremiumError);

impl From<PremiumError> for PaymentApiError {
    fn from(err: PremiumError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PremiumError::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
            PremiumError::AlreadyPremium => StatusCode::CONFLICT,
            PremiumError::Gateway { .. } => StatusCode::BAD_GATEWAY,
            PremiumError::Domain(e) => status_for(e.code),
        };

        let body = match self.0 {
            PremiumError::Gateway { detail } => PaymentErrorBody {
                error: "Xendit create QR failed".to_string(),
                detail: Some(detail),
            },
            PremiumError::Domain(e)
                if matches!(e.code, ErrorCode::DatabaseError | ErrorCode::InternalError) =>
            {
                tracing::error!(error = %e, "Payment request failed");
                PaymentErrorBody::new("Internal server error")
            }
            other => PaymentErrorBody::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Webhook rejection with the status the gateway's retry policy reads.
#[derive(Debug)]
pub struct WebhookApiError(pub WebhookError);

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let message = match &self.0 {
            WebhookError::Database(detail) => {
                tracing::error!(error = %detail, "Payment callback failed");
                "Database error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(PaymentErrorBody::new(message))).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/create
///
/// The body is optional and an unreadable one uses the default amount. A
/// present `amount` must be a number or numeric string of at least the
/// minimum.
pub async fn create_payment(
    State(state): State<AppState>,
    BearerSession(user): BearerSession,
    body: Bytes,
) -> Result<impl IntoResponse, PaymentApiError> {
    let request = CreatePaymentRequest::from_body(&body);

    let created = state
        .create_payment_handler()
        .handle(CreatePremiumPaymentCommand {
            user_id: user.id,
            amount: request.requested_amount(),
        })
        .await?;
    Ok(Json(created))
}

/// POST /api/payments/webhook
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let callback_token = headers
        .get(CALLBACK_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let outcome = state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand {
            callback_token,
            body: body.to_vec(),
        })
        .await
        .map_err(WebhookApiError)?;

    Ok(Json(WebhookAck::from(&outcome)))
}

/// GET /api/premium
pub async fn premium_status(
    State(state): State<AppState>,
    BearerSession(user): BearerSession,
) -> Result<impl IntoResponse, PaymentApiError> {
    let status = state
        .premium_status_handler()
        .handle(GetPremiumStatusQuery { user_id: user.id })
        .await
        .map_err(PremiumError::Domain)?;
    Ok(Json(status))
}
