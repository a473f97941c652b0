//! WhatsApp Business Cloud API: credentials, template payloads and the
//! outbound client.

pub mod creds;
pub mod payload;
pub mod sender;

pub use creds::WhatsAppCreds;
pub use payload::{QUOTE_PREPARING_TEMPLATE, TEMPLATE_LANGUAGE, TemplateMessage};
pub use sender::{DEFAULT_API_BASE, SendReceipt, TemplateSender, WhatsAppClient, WhatsAppError};
