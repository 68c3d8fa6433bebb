/// Constants shared across the Mailgate crates

// Environment variables
pub const ENV_EMAIL_API_KEY: &str = "SENDGRID_API_KEY";
pub const ENV_VALIDATION_API_KEY: &str = "SENDGRID_VALIDATION_KEY";
pub const ENV_PROXY_SECRET: &str = "PROXY_SECRET";
pub const ENV_PORT: &str = "PORT";
pub const ENV_UPSTREAM_BASE_URL: &str = "SENDGRID_API_BASE";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";

// Defaults
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.sendgrid.com";

// Upstream endpoints
pub const MAIL_SEND_PATH: &str = "/v3/mail/send";
pub const EMAIL_VALIDATION_PATH: &str = "/v3/validations/email";

// Inbound request handling
pub const PROXY_KEY_HEADER: &str = "x-proxy-key";
pub const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024; // 10 MB
pub const EMPTY_JSON_BODY: &[u8] = b"{}";

// Fixed response texts
pub const LIVENESS_MESSAGE: &str = "SendGrid Proxy Running ✅";
pub const FORBIDDEN_MESSAGE: &str = "Forbidden: invalid proxy key";
pub const PROXY_ERROR_MESSAGE: &str = "Proxy error";
