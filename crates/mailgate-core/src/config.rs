/// Configuration - loaded once from environment variables at startup
use crate::constants::{
    DEFAULT_PORT, DEFAULT_UPSTREAM_BASE_URL, ENV_EMAIL_API_KEY, ENV_PORT, ENV_PROXY_SECRET,
    ENV_UPSTREAM_BASE_URL, ENV_UPSTREAM_TIMEOUT_SECS, ENV_VALIDATION_API_KEY,
};
use crate::error::MailgateError;
use secrecy::SecretString;
use std::time::Duration;

/// Proxy configuration, immutable for the lifetime of the process
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Credential for the mail send endpoint
    pub email_api_key: SecretString,

    /// Credential for the email validation endpoint
    pub validation_api_key: SecretString,

    /// Shared secret callers must present in `x-proxy-key`; gate is off when unset
    pub proxy_secret: Option<SecretString>,

    /// Listen port
    pub port: u16,

    /// Upstream API base URL, without trailing slash
    pub upstream_base_url: String,

    /// Outbound request timeout; transport default when unset
    pub request_timeout: Option<Duration>,
}

impl ProxyConfig {
    /// Load configuration from the process environment
    ///
    /// Fails when either SendGrid credential is missing, so callers can
    /// abort before binding a port.
    pub fn from_env() -> Result<Self, MailgateError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailgateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values are treated the same as unset ones
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let email_api_key = var(ENV_EMAIL_API_KEY)
            .map(SecretString::from)
            .ok_or_else(|| missing(ENV_EMAIL_API_KEY))?;

        let validation_api_key = var(ENV_VALIDATION_API_KEY)
            .map(SecretString::from)
            .ok_or_else(|| missing(ENV_VALIDATION_API_KEY))?;

        let proxy_secret = var(ENV_PROXY_SECRET).map(SecretString::from);

        let port = match var(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                MailgateError::Config(format!("Invalid {} value '{}': {}", ENV_PORT, raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        let upstream_base_url = var(ENV_UPSTREAM_BASE_URL)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string());

        let request_timeout = var(ENV_UPSTREAM_TIMEOUT_SECS)
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    MailgateError::Config(format!(
                        "Invalid {} value '{}': {}",
                        ENV_UPSTREAM_TIMEOUT_SECS, raw, e
                    ))
                })
            })
            .transpose()?;

        let config = Self {
            email_api_key,
            validation_api_key,
            proxy_secret,
            port,
            upstream_base_url,
            request_timeout,
        };

        tracing::debug!(?config, "Configuration loaded");

        Ok(config)
    }

    /// Whether the shared-secret gate is active
    pub fn auth_enabled(&self) -> bool {
        self.proxy_secret.is_some()
    }
}

fn missing(name: &str) -> MailgateError {
    MailgateError::Config(format!("Missing {} env var", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = ProxyConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", "SG.send"),
            ("SENDGRID_VALIDATION_KEY", "SG.validate"),
        ]))
        .unwrap();

        assert_eq!(config.email_api_key.expose_secret(), "SG.send");
        assert_eq!(config.validation_api_key.expose_secret(), "SG.validate");
        assert!(config.proxy_secret.is_none());
        assert!(!config.auth_enabled());
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream_base_url, "https://api.sendgrid.com");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_missing_email_key() {
        let err = ProxyConfig::from_lookup(lookup(&[("SENDGRID_VALIDATION_KEY", "SG.validate")]))
            .unwrap_err();
        assert!(matches!(err, MailgateError::Config(_)));
        assert!(err.to_string().contains("SENDGRID_API_KEY"));
    }

    #[test]
    fn test_missing_validation_key() {
        let err =
            ProxyConfig::from_lookup(lookup(&[("SENDGRID_API_KEY", "SG.send")])).unwrap_err();
        assert!(err.to_string().contains("SENDGRID_VALIDATION_KEY"));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let err = ProxyConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", ""),
            ("SENDGRID_VALIDATION_KEY", "SG.validate"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SENDGRID_API_KEY"));
    }

    #[test]
    fn test_full_config() {
        let config = ProxyConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", "SG.send"),
            ("SENDGRID_VALIDATION_KEY", "SG.validate"),
            ("PROXY_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("SENDGRID_API_BASE", "http://127.0.0.1:9000/"),
            ("UPSTREAM_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert!(config.auth_enabled());
        assert_eq!(config.proxy_secret.unwrap().expose_secret(), "s3cret");
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_empty_secret_disables_gate() {
        let config = ProxyConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", "SG.send"),
            ("SENDGRID_VALIDATION_KEY", "SG.validate"),
            ("PROXY_SECRET", ""),
        ]))
        .unwrap();
        assert!(!config.auth_enabled());
    }

    #[test]
    fn test_invalid_port() {
        let err = ProxyConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", "SG.send"),
            ("SENDGRID_VALIDATION_KEY", "SG.validate"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("Invalid PORT value 'http'"));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ProxyConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", "SG.send"),
            ("SENDGRID_VALIDATION_KEY", "SG.validate"),
            ("UPSTREAM_TIMEOUT_SECS", "-1"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_TIMEOUT_SECS"));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = ProxyConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", "SG.abcdefghijklmnop"),
            ("SENDGRID_VALIDATION_KEY", "SG.qrstuvwxyz"),
            ("PROXY_SECRET", "shared-s3cret"),
        ]))
        .unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("abcdefghijklmnop"));
        assert!(!debug.contains("qrstuvwxyz"));
        assert!(!debug.contains("shared-s3cret"));
    }
}
