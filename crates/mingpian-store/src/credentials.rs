//! Airtable credentials.

use std::fmt;

use crate::{Result, StoreError};

/// Environment variable holding the personal access token.
pub const API_KEY_VAR: &str = "AIRTABLE_API_KEY";

/// Environment variable holding the base identifier.
pub const BASE_ID_VAR: &str = "AIRTABLE_BASE_ID";

/// API key and base identifier for one Airtable base.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    base_id: String,
}

impl Credentials {
    /// Build credentials from explicit values. Blank values are rejected.
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        let base_id = base_id.into().trim().to_string();

        if api_key.is_empty() {
            return Err(StoreError::MissingCredential(API_KEY_VAR));
        }
        if base_id.is_empty() {
            return Err(StoreError::MissingCredential(BASE_ID_VAR));
        }

        Ok(Self { api_key, base_id })
    }

    /// Read `AIRTABLE_API_KEY` and `AIRTABLE_BASE_ID` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).unwrap_or_default();
        let base_id = lookup(BASE_ID_VAR).unwrap_or_default();
        Self::new(api_key, base_id)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_id(&self) -> &str {
        &self.base_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("base_id", &self.base_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let creds =
            Credentials::from_lookup(lookup(&[(API_KEY_VAR, "pat123"), (BASE_ID_VAR, " appABC ")]))
                .unwrap();
        assert_eq!(creds.api_key(), "pat123");
        assert_eq!(creds.base_id(), "appABC");
    }

    #[test]
    fn test_missing_values_name_the_variable() {
        let err = Credentials::from_lookup(lookup(&[(BASE_ID_VAR, "appABC")])).unwrap_err();
        assert!(matches!(err, StoreError::MissingCredential(API_KEY_VAR)));

        let err = Credentials::from_lookup(lookup(&[(API_KEY_VAR, "pat123"), (BASE_ID_VAR, "  ")]))
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingCredential(BASE_ID_VAR)));
        assert_eq!(err.to_string(), "missing credential: AIRTABLE_BASE_ID is not set");
    }

    #[test]
    fn test_debug_hides_key() {
        let creds = Credentials::new("pat-secret", "appABC").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("pat-secret"));
        assert!(debug.contains("appABC"));
    }
}
