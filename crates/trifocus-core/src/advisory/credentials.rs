//! API credential lookup.
//!
//! Order: the env var named in `advisory.api_key_env`, then `API_KEY`, then
//! the OS keyring. Empty values count as absent.

use crate::storage::AdvisoryConfig;

/// Keyring entry holding the advisory API key.
pub const KEYRING_KEY: &str = "gemini_api_key";

/// Fallback env var shared with the web build.
pub const FALLBACK_ENV: &str = "API_KEY";

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "trifocus";

    pub fn get(key: &str) -> Result<Option<String>, keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)
    }

    pub fn delete(key: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Where a resolved credential came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Env(String),
    Keyring,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Resolve the API key from environment variables only.
pub fn from_env(config: &AdvisoryConfig) -> Option<(String, CredentialSource)> {
    [config.api_key_env.as_str(), FALLBACK_ENV]
        .into_iter()
        .filter(|name| !name.is_empty())
        .find_map(|name| {
            std::env::var(name)
                .ok()
                .and_then(non_empty)
                .map(|key| (key, CredentialSource::Env(name.to_string())))
        })
}

/// Resolve the API key from the environment, falling back to the keyring.
pub fn resolve(config: &AdvisoryConfig) -> Option<(String, CredentialSource)> {
    if let Some(found) = from_env(config) {
        return Some(found);
    }
    match keyring_store::get(KEYRING_KEY) {
        Ok(value) => value
            .and_then(non_empty)
            .map(|key| (key, CredentialSource::Keyring)),
        Err(e) => {
            tracing::debug!("keyring lookup failed: {e}");
            None
        }
    }
}

/// Resolve the API key, discarding its source.
pub fn resolve_api_key(config: &AdvisoryConfig) -> Option<String> {
    resolve(config).map(|(key, _)| key)
}
