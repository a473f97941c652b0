use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use super::creds::WhatsAppCreds;
use super::payload::TemplateMessage;

pub const DEFAULT_API_BASE: &str = "https://graph.facebook.com/v20.0";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum WhatsAppError {
    /// The Cloud API answered with a non-2xx status.
    #[error("whatsapp api returned {status}: {details}")]
    Provider { status: StatusCode, details: Value },
    /// The request went out but no response came back.
    #[error("no response from whatsapp api: {0}")]
    NoResponse(#[source] reqwest::Error),
    /// The request could not be built.
    #[error("failed to build whatsapp request: {0}")]
    Request(#[source] reqwest::Error),
}

#[async_trait]
pub trait TemplateSender: Send + Sync {
    async fn send_template(
        &self,
        creds: &WhatsAppCreds,
        msg: &TemplateMessage,
    ) -> Result<SendReceipt, WhatsAppError>;
}

#[derive(Clone)]
pub struct WhatsAppClient {
    http: reqwest::Client,
    api_base: String,
}

impl WhatsAppClient {
    pub fn new(http: reqwest::Client, api_base: Option<String>) -> Self {
        let base = api_base.unwrap_or_else(|| DEFAULT_API_BASE.into());
        Self {
            http,
            api_base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn messages_url(&self, number_id: &str) -> String {
        format!("{}/{}/messages", self.api_base, number_id)
    }

    /// Posts one template message. No retry, no timeout beyond the client's.
    pub async fn send_message(
        &self,
        creds: &WhatsAppCreds,
        msg: &TemplateMessage,
    ) -> Result<SendReceipt, WhatsAppError> {
        let request = self
            .http
            .post(self.messages_url(&creds.number_id))
            .bearer_auth(&creds.token)
            .json(msg)
            .build()
            .map_err(WhatsAppError::Request)?;

        let response = self
            .http
            .execute(request)
            .await
            .map_err(WhatsAppError::NoResponse)?;

        classify_response(response).await
    }
}

#[async_trait]
impl TemplateSender for WhatsAppClient {
    async fn send_template(
        &self,
        creds: &WhatsAppCreds,
        msg: &TemplateMessage,
    ) -> Result<SendReceipt, WhatsAppError> {
        tracing::debug!(
            number_id = %creds.number_id,
            template = %msg.template.name,
            "sending whatsapp template"
        );
        self.send_message(creds, msg).await
    }
}

async fn classify_response(response: reqwest::Response) -> Result<SendReceipt, WhatsAppError> {
    let status = response.status();
    let body = response.bytes().await;

    if !status.is_success() {
        let details = match body {
            Ok(bytes) => body_to_details(&bytes),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read whatsapp error body");
                Value::Null
            }
        };
        return Err(WhatsAppError::Provider { status, details });
    }

    let message_id = body
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
        .and_then(|raw| {
            raw.get("messages")
                .and_then(|v| v.get(0))
                .and_then(|v| v.get("id"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        });

    Ok(SendReceipt { message_id })
}

fn body_to_details(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
