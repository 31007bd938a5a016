//! Endpoint orchestration for form submissions.
//!
//! Each submission walks an admission pipeline with terminal exits at every
//! step:
//!
//! ```text
//! received → rate_checked → parsed → honeypot_checked → token_checked
//!          → validated → accepted
//! ```
//!
//! Suspected-bot exits (honeypot, too-fast token) terminate with a *success*
//! response and no side effect, denying the operator feedback. Benign token
//! issues (absent, expired, malformed) pass through: a long-idle tab must
//! still be able to submit.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::identity::client_identity;
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::rate_limit::RateLimitResult;
use crate::security::{is_honeypot_triggered, token, TokenVerdict};
use crate::submission::{ContactForm, ContactSubmission, NewsletterForm};

/// `POST /api/contact`: the full pipeline.
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let client = client_identity(&headers);

    let rate = check_rate(&state, "contact", &client).await;
    if !rate.allowed {
        return response::rate_limited(rate.retry_after_secs());
    }

    let Ok(form) = serde_json::from_slice::<ContactForm>(&body) else {
        return response::invalid_body();
    };

    if is_honeypot_triggered(form.honeypot.as_deref()) {
        tracing::info!(client = %client, "Honeypot triggered, masking as success");
        metrics::record_bot_masked("honeypot");
        return response::success();
    }

    if let Some(tok) = form.token.as_deref() {
        let verdict = token::validate(tok, state.config.token.min_age(), state.config.token.max_age());
        if verdict == TokenVerdict::SubmittedTooFast {
            tracing::info!(client = %client, "Form submitted too fast, masking as success");
            metrics::record_bot_masked("token_too_fast");
            return response::success();
        }
        // Expired and malformed tokens are benign: proceed.
    }

    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!(client = %client, error = %e, "Contact validation failed");
            metrics::record_rejected("contact");
            return response::error(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    record_contact(&submission, &client);
    metrics::record_submission("contact");
    response::success()
}

/// `POST /api/newsletter`: reduced pipeline, no honeypot or token step.
pub async fn subscribe_newsletter(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let client = client_identity(&headers);

    let rate = check_rate(&state, "newsletter", &client).await;
    if !rate.allowed {
        return response::rate_limited(rate.retry_after_secs());
    }

    let Ok(form) = serde_json::from_slice::<NewsletterForm>(&body) else {
        return response::invalid_body();
    };

    let subscription = match form.validate() {
        Ok(subscription) => subscription,
        Err(e) => {
            metrics::record_rejected("newsletter");
            return response::error(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    tracing::info!(
        email = %subscription.email,
        client = %client,
        "Newsletter subscription received"
    );
    metrics::record_submission("newsletter");
    response::success()
}

/// `GET /api/form-token`: mint a token for clients that render forms
/// outside the browser page that would normally generate one.
pub async fn issue_form_token() -> Response {
    Json(json!({ "token": token::issue() })).into_response()
}

/// `GET /healthz`: liveness probe.
pub async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

/// Run the admission gate for an endpoint and log denials.
async fn check_rate(state: &AppState, endpoint: &'static str, client: &str) -> RateLimitResult {
    let limit = match endpoint {
        "newsletter" => state.config.rate_limit.newsletter,
        _ => state.config.rate_limit.contact,
    };
    let key = format!("{endpoint}:{client}");
    let result = state
        .rate_limiter
        .check(&key, limit.max_requests, limit.window())
        .await;

    if !result.allowed {
        tracing::warn!(client = %client, endpoint, "Rate limit exceeded");
        metrics::record_rate_limited(endpoint);
    }
    result
}

/// Record an accepted submission. Forwarding to the CRM is a future
/// integration; until then the structured log is the system of record.
fn record_contact(submission: &ContactSubmission, client: &str) {
    let preview: String = submission.message.chars().take(100).collect();
    tracing::info!(
        submission_id = %uuid::Uuid::new_v4(),
        name = %submission.name,
        email = %submission.email,
        phone = submission.phone.as_deref().unwrap_or(""),
        subject = %submission.subject,
        message = %preview,
        client = %client,
        "Contact submission received"
    );
}
