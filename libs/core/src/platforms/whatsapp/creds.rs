use std::fmt;

/// Access token and sender phone-number id for the Cloud API.
#[derive(Clone, PartialEq, Eq)]
pub struct WhatsAppCreds {
    pub token: String,
    pub number_id: String,
}

impl fmt::Debug for WhatsAppCreds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatsAppCreds")
            .field("token", &"<redacted>")
            .field("number_id", &self.number_id)
            .finish()
    }
}
