use anyhow::{Result, anyhow};
use keyring::{Entry, Error as KeyringError};

const SERVICE: &str = "webmail_client";
const API_KEY_ENV: &str = "WEBMAIL_API_KEY";

/// Save the backend API key into the OS keyring for the given account address
pub fn save_api_key(address: &str, api_key: &str) -> Result<()> {
    let entry = Entry::new(SERVICE, address);
    entry?
        .set_password(api_key)
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(())
}

/// Load the API key from the keyring for the given account address
pub fn load_api_key(address: &str) -> Result<Option<String>> {
    let entry = Entry::new(SERVICE, address);
    match entry?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(KeyringError::NoEntry) => Ok(None),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}

/// Keyring first, then the environment.
pub fn resolve_api_key(address: &str) -> Result<String> {
    let from_keyring = match load_api_key(address) {
        Ok(k) => k,
        Err(e) => {
            log::warn!("Keyring unavailable: {e}");
            None
        }
    };
    from_keyring
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            anyhow!("No API key for {address}: run `webmail_client set-api-key` or set {API_KEY_ENV}")
        })
}
