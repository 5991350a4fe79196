use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::errors::AppError;

/// POST /webhooks/stripe
///
/// Inbound payment-event endpoint. Stripe is not wired up yet, so every
/// event is rejected with 503 until keys are configured; no signature
/// verification and no event parsing happen on this path.
#[utoipa::path(
    post,
    path = "/webhooks/stripe",
    request_body(content = String, description = "Raw Stripe webhook payload", content_type = "application/json"),
    responses(
        (status = 503, description = "Stripe integration is not configured"),
        (status = 400, description = "Webhook processing failed"),
    ),
    tag = "webhooks"
)]
pub async fn stripe_webhook(body: web::Bytes) -> HttpResponse {
    match process_event(&body) {
        Ok(response) => response,
        Err(err) => HttpResponse::BadRequest().json(json!({
            "error": format!("Webhook Error: {err}")
        })),
    }
}

fn process_event(_payload: &[u8]) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::ServiceUnavailable().json(json!({
        "error": "Stripe not configured"
    })))
}
