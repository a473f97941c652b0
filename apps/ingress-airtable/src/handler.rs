use std::sync::Arc;
use std::time::Instant;

use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use qn_core::{
    CredentialsError, CredentialsSource, TemplateMessage, TemplateSender, WhatsAppError,
    mask_phone, normalize_phone,
};
use qn_ingress_common::{RequestId, json_error, json_error_with_details, success};
use qn_telemetry::{TelemetryLabels, record_counter, record_histogram, with_common_fields};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{Instrument, field::Empty};

pub const WEBHOOK_ROUTE: &str = "/api/airtable-webhook";

const REQUESTS_COUNTER: &str = "quote_notify_requests";
const SEND_SECONDS_HISTOGRAM: &str = "quote_notify_send_seconds";
const INGRESS_SPAN_NAME: &str = "ingress.airtable";

#[derive(Clone)]
pub struct AppState {
    pub sender: Arc<dyn TemplateSender>,
    pub credentials: Arc<dyn CredentialsSource>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook payload has no phone number")]
    MissingPhone,
    #[error(transparent)]
    Config(#[from] CredentialsError),
    #[error("whatsapp api rejected the message with {status}")]
    Provider { status: StatusCode, details: Value },
    #[error("no response from whatsapp api: {0}")]
    NoResponse(String),
    #[error("error processing request: {0}")]
    Processing(String),
}

impl From<WhatsAppError> for NotifyError {
    fn from(err: WhatsAppError) -> Self {
        match err {
            WhatsAppError::Provider { status, details } => NotifyError::Provider { status, details },
            WhatsAppError::NoResponse(source) => NotifyError::NoResponse(source.to_string()),
            WhatsAppError::Request(source) => NotifyError::Processing(source.to_string()),
        }
    }
}

impl NotifyError {
    pub fn outcome(&self) -> &'static str {
        match self {
            NotifyError::MissingPhone => "bad_request",
            NotifyError::Config(_) => "config_error",
            NotifyError::Provider { .. } => "provider_error",
            NotifyError::NoResponse(_) => "no_response",
            NotifyError::Processing(_) => "processing_error",
        }
    }

    fn log(&self) {
        match self {
            NotifyError::MissingPhone => tracing::warn!("rejecting webhook without phone"),
            NotifyError::Config(err) => {
                tracing::error!(error = %err, "whatsapp credentials are not configured")
            }
            NotifyError::Provider { status, details } => tracing::error!(
                status = status.as_u16(),
                details = %details,
                "whatsapp api returned an error"
            ),
            NotifyError::NoResponse(err) => {
                tracing::error!(error = %err, "whatsapp api did not respond")
            }
            NotifyError::Processing(err) => {
                tracing::error!(error = %err, "failed to prepare whatsapp request")
            }
        }
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        match self {
            NotifyError::MissingPhone => {
                json_error(StatusCode::BAD_REQUEST, "Phone number is required").into_response()
            }
            NotifyError::Config(_) => {
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
                    .into_response()
            }
            NotifyError::Provider { status, details } => {
                json_error_with_details(status, "Failed to send WhatsApp message", details)
                    .into_response()
            }
            NotifyError::NoResponse(_) => json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "No response from WhatsApp API",
            )
            .into_response(),
            NotifyError::Processing(_) => {
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Error processing request")
                    .into_response()
            }
        }
    }
}

#[derive(Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    phone: Option<Value>,
}

/// Pulls `phone` out of a JSON object body.
///
/// Absent, `null`, `""`, `0` and `false` count as missing. Any other string,
/// blank ones included, goes on to normalization. Remaining non-string
/// values cannot be normalized and fail as a processing error.
pub fn extract_phone(body: &[u8]) -> Result<String, NotifyError> {
    let Ok(payload) = serde_json::from_slice::<WebhookPayload>(body) else {
        return Err(NotifyError::MissingPhone);
    };
    match payload.phone {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(NotifyError::MissingPhone),
        Some(Value::String(phone)) if phone.is_empty() => Err(NotifyError::MissingPhone),
        Some(Value::String(phone)) => Ok(phone),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => {
            Err(NotifyError::MissingPhone)
        }
        Some(other) => Err(NotifyError::Processing(format!(
            "phone must be a string, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Counter labels for a finished request; provider failures carry the
/// upstream status.
fn request_labels(result: &Result<(), NotifyError>) -> TelemetryLabels {
    match result {
        Ok(()) => TelemetryLabels::new(WEBHOOK_ROUTE).with_outcome("sent"),
        Err(err) => {
            let mut labels = TelemetryLabels::new(WEBHOOK_ROUTE).with_outcome(err.outcome());
            if let NotifyError::Provider { status, .. } = err {
                labels
                    .extra
                    .push(("status".into(), status.as_u16().to_string()));
            }
            labels
        }
    }
}

/// `POST /api/airtable-webhook`
pub async fn receive(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    body: Bytes,
) -> Response {
    let span = tracing::info_span!(INGRESS_SPAN_NAME, request_id = Empty, outcome = Empty);
    let rid = request_id.map(|Extension(rid)| rid.0).unwrap_or_default();
    with_common_fields(&span, &rid, None);

    let result = notify(&state, &body).instrument(span.clone()).await;
    let labels = request_labels(&result);
    with_common_fields(&span, &rid, labels.outcome.as_deref());
    record_counter(REQUESTS_COUNTER, 1, &labels);

    match result {
        Ok(()) => success().into_response(),
        Err(err) => {
            let _entered = span.enter();
            err.log();
            err.into_response()
        }
    }
}

async fn notify(state: &AppState, body: &[u8]) -> Result<(), NotifyError> {
    let phone = extract_phone(body)?;
    let to = normalize_phone(&phone);
    let creds = state.credentials.load()?;

    let message = TemplateMessage::quote_preparing(to.as_str());
    let started = Instant::now();
    let result = state.sender.send_template(&creds, &message).await;
    record_histogram(
        SEND_SECONDS_HISTOGRAM,
        started.elapsed().as_secs_f64(),
        &TelemetryLabels::new(WEBHOOK_ROUTE),
    );

    let receipt = result?;
    tracing::info!(
        to = %mask_phone(&to),
        message_id = receipt.message_id.as_deref().unwrap_or("-"),
        template = %message.template.name,
        "whatsapp template sent"
    );
    Ok(())
}

/// Any method other than POST on the webhook route.
pub async fn method_not_allowed(method: Method) -> Response {
    tracing::warn!(%method, "method not allowed on webhook route");
    record_counter(
        REQUESTS_COUNTER,
        1,
        &TelemetryLabels::new(WEBHOOK_ROUTE).with_outcome("method_not_allowed"),
    );
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(json!({ "error": "Method not allowed. Use POST." })),
    )
        .into_response()
}
