use thiserror::Error;

use crate::platforms::whatsapp::creds::WhatsAppCreds;

pub const TOKEN_VAR: &str = "WHATSAPP_TOKEN";
pub const NUMBER_ID_VAR: &str = "WHATSAPP_NUMBER_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("missing environment variables: {}", vars.join(", "))]
    Missing { vars: Vec<&'static str> },
}

/// Supplies WhatsApp credentials at request time.
pub trait CredentialsSource: Send + Sync {
    fn load(&self) -> Result<WhatsAppCreds, CredentialsError>;
}

/// Reads `WHATSAPP_TOKEN` and `WHATSAPP_NUMBER_ID` from the process
/// environment on every call. Unset and empty values count as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialsSource for EnvCredentials {
    fn load(&self) -> Result<WhatsAppCreds, CredentialsError> {
        load_with(|name| std::env::var(name).ok())
    }
}

/// Fixed credentials, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    pub token: Option<String>,
    pub number_id: Option<String>,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>, number_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            number_id: Some(number_id.into()),
        }
    }
}

impl CredentialsSource for StaticCredentials {
    fn load(&self) -> Result<WhatsAppCreds, CredentialsError> {
        load_with(|name| match name {
            TOKEN_VAR => self.token.clone(),
            NUMBER_ID_VAR => self.number_id.clone(),
            _ => None,
        })
    }
}

fn load_with<F>(lookup: F) -> Result<WhatsAppCreds, CredentialsError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|value| !value.is_empty());
    let token = read(TOKEN_VAR);
    let number_id = read(NUMBER_ID_VAR);

    match (token, number_id) {
        (Some(token), Some(number_id)) => Ok(WhatsAppCreds { token, number_id }),
        (token, number_id) => {
            let mut vars = Vec::new();
            if token.is_none() {
                vars.push(TOKEN_VAR);
            }
            if number_id.is_none() {
                vars.push(NUMBER_ID_VAR);
            }
            Err(CredentialsError::Missing { vars })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn loads_both_values() {
        let creds = load_with(lookup(&[(TOKEN_VAR, "tok"), (NUMBER_ID_VAR, "123")])).unwrap();
        assert_eq!(creds.token, "tok");
        assert_eq!(creds.number_id, "123");
    }

    #[test]
    fn reports_every_missing_var() {
        let err = load_with(lookup(&[])).unwrap_err();
        assert_eq!(
            err,
            CredentialsError::Missing {
                vars: vec![TOKEN_VAR, NUMBER_ID_VAR]
            }
        );
        assert_eq!(
            err.to_string(),
            "missing environment variables: WHATSAPP_TOKEN, WHATSAPP_NUMBER_ID"
        );
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = load_with(lookup(&[(TOKEN_VAR, ""), (NUMBER_ID_VAR, "123")])).unwrap_err();
        assert_eq!(
            err,
            CredentialsError::Missing {
                vars: vec![TOKEN_VAR]
            }
        );
    }

    #[test]
    fn static_source_without_number_id_fails() {
        let source = StaticCredentials {
            token: Some("tok".into()),
            number_id: None,
        };
        let err = source.load().unwrap_err();
        assert_eq!(
            err,
            CredentialsError::Missing {
                vars: vec![NUMBER_ID_VAR]
            }
        );
    }
}
