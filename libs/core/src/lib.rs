//! Quote-notify core contracts.
//!
//! Exposes the pieces shared by the ingress binaries: phone normalization,
//! request-time credential loading and the WhatsApp Cloud API template client.
pub mod config;
pub mod phone;
pub mod platforms;

pub use config::*;
pub use phone::*;
pub use platforms::whatsapp::{
    DEFAULT_API_BASE, QUOTE_PREPARING_TEMPLATE, SendReceipt, TEMPLATE_LANGUAGE, TemplateMessage,
    TemplateSender, WhatsAppClient, WhatsAppCreds, WhatsAppError,
};

