use serde::Serialize;

pub const QUOTE_PREPARING_TEMPLATE: &str = "quote_preparing";
pub const TEMPLATE_LANGUAGE: &str = "en";

/// Body of a `type=template` message sent to `/{number_id}/messages`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TemplateMessage {
    pub messaging_product: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub template: Template,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Language {
    pub code: String,
}

impl TemplateMessage {
    pub fn new(to: impl Into<String>, name: &str, language: &str) -> Self {
        Self {
            messaging_product: "whatsapp".into(),
            to: to.into(),
            kind: "template".into(),
            template: Template {
                name: name.into(),
                language: Language {
                    code: language.into(),
                },
            },
        }
    }

    /// The "your quote is being prepared" notification.
    pub fn quote_preparing(to: impl Into<String>) -> Self {
        Self::new(to, QUOTE_PREPARING_TEMPLATE, TEMPLATE_LANGUAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_preparing_serializes_to_cloud_api_shape() {
        let msg = TemplateMessage::quote_preparing("+15551234567");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "messaging_product": "whatsapp",
                "to": "+15551234567",
                "type": "template",
                "template": {
                    "name": "quote_preparing",
                    "language": { "code": "en" }
                }
            })
        );
    }
}
