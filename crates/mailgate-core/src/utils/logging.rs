/// Logging utilities for keeping credentials and payloads out of logs
use secrecy::{ExposeSecret, SecretString};

/// Masks a secret for logging, keeping a short prefix for identification
///
/// # Examples
/// ```
/// use mailgate_core::utils::logging::mask_secret;
///
/// assert_eq!(mask_secret("SG.abcdefghijkl"), "SG.a...[15 chars]");
/// assert_eq!(mask_secret("short"), "***");
/// ```
pub fn mask_secret(secret: &str) -> String {
    const MAX_VISIBLE_CHARS: usize = 4;
    const MIN_LENGTH_TO_SHOW: usize = 12;

    let len = secret.chars().count();
    if len < MIN_LENGTH_TO_SHOW {
        "***".to_string()
    } else {
        let visible: String = secret.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}...[{} chars]", visible, len)
    }
}

/// Masked fingerprint of a configured credential, for startup logs
pub fn fingerprint(secret: &SecretString) -> String {
    mask_secret(secret.expose_secret())
}

/// Redacts a request or response body for logging (shows length only)
pub fn redact_body(body: &[u8]) -> String {
    format!("[{} bytes]", body.len())
}
