//! Credential store. Maps `(provider, field)` onto the key-value store as
//! `"{provider}-{field}"`, plus the login-form visibility flag.

use crate::domain::{DomainError, ProviderDescriptor};
use crate::ports::KeyValueStore;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Key of the login-form visibility flag (`"true"` / `"false"`).
pub const SHOW_FORM_KEY: &str = "showForm";

/// Storage key of one credential field.
pub fn credential_key(provider: &str, field: &str) -> String {
    format!("{}-{}", provider, field)
}

/// Values of every declared field of one provider, read at a single point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub provider: &'static str,
    /// Declared field order; `None` = never saved.
    pub values: Vec<(&'static str, Option<String>)>,
}

impl ProviderCredentials {
    /// First declared field that is absent or empty.
    pub fn first_missing(&self) -> Option<&'static str> {
        self.values
            .iter()
            .find(|(_, v)| v.as_deref().is_none_or(str::is_empty))
            .map(|(name, _)| *name)
    }

    /// Request body `{field: value}`. Errs with the first missing field name.
    pub fn to_body(&self) -> Result<Map<String, Value>, &'static str> {
        if let Some(missing) = self.first_missing() {
            return Err(missing);
        }
        Ok(self
            .values
            .iter()
            .map(|(name, v)| {
                (
                    (*name).to_string(),
                    Value::String(v.clone().unwrap_or_default()),
                )
            })
            .collect())
    }
}

/// Credential store over a [`KeyValueStore`].
pub struct CredentialStore {
    kv: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub async fn get(&self, provider: &str, field: &str) -> Option<String> {
        self.kv.get(&credential_key(provider, field)).await
    }

    pub async fn set(&self, provider: &str, field: &str, value: &str) {
        self.kv.set(&credential_key(provider, field), value).await;
    }

    /// Read all declared fields of `descriptor`.
    pub async fn snapshot(&self, descriptor: &ProviderDescriptor) -> ProviderCredentials {
        let mut values = Vec::with_capacity(descriptor.fields.len());
        for field in descriptor.fields {
            values.push((field.name, self.get(descriptor.name, field.name).await));
        }
        ProviderCredentials {
            provider: descriptor.name,
            values,
        }
    }

    /// Save the given field values of one provider. Does not fetch.
    ///
    /// # Errors
    /// `DomainError::Input` if a field is not declared by the provider; nothing is written then.
    pub async fn save_provider(
        &self,
        descriptor: &ProviderDescriptor,
        values: &[(&str, String)],
    ) -> Result<(), DomainError> {
        if let Some((unknown, _)) = values
            .iter()
            .find(|(name, _)| !descriptor.fields.iter().any(|f| f.name == *name))
        {
            return Err(DomainError::Input(format!(
                "{} has no field '{}'",
                descriptor.name, unknown
            )));
        }
        for (name, value) in values {
            self.set(descriptor.name, name, value).await;
        }
        info!(
            provider = descriptor.name,
            fields = values.len(),
            "credentials saved"
        );
        Ok(())
    }

    /// Whether the login form should be shown. Absent flag = shown.
    pub async fn show_form(&self) -> bool {
        self.kv.get(SHOW_FORM_KEY).await.as_deref() != Some("false")
    }

    pub async fn set_show_form(&self, show: bool) {
        self.kv
            .set(SHOW_FORM_KEY, if show { "true" } else { "false" })
            .await;
    }
}
