/// Upstream client - forwards request bodies to the SendGrid API
use crate::config::ProxyConfig;
use crate::constants::{EMAIL_VALIDATION_PATH, EMPTY_JSON_BODY, MAIL_SEND_PATH};
use crate::error::MailgateError;
use crate::utils::logging::redact_body;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use std::error::Error as StdError;
use std::time::Instant;
use tracing::{debug, error};

/// Upstream endpoints the proxy can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Mail send, authenticated with the email credential
    MailSend,
    /// Email address validation, authenticated with the validation credential
    EmailValidation,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::MailSend => MAIL_SEND_PATH,
            Self::EmailValidation => EMAIL_VALIDATION_PATH,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MailSend => "mail_send",
            Self::EmailValidation => "email_validation",
        }
    }
}

/// Upstream reply, copied verbatim back to the caller
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// SendGrid API client holding both credential sets
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    email_api_key: SecretString,
    validation_api_key: SecretString,
}

impl UpstreamClient {
    /// Create a client from the proxy configuration
    pub fn new(config: &ProxyConfig) -> Result<Self, MailgateError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| MailgateError::Upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.upstream_base_url.clone(),
            email_api_key: config.email_api_key.clone(),
            validation_api_key: config.validation_api_key.clone(),
        })
    }

    /// Full upstream URL for an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Credential injected for an endpoint
    pub fn credential(&self, endpoint: Endpoint) -> &SecretString {
        match endpoint {
            Endpoint::MailSend => &self.email_api_key,
            Endpoint::EmailValidation => &self.validation_api_key,
        }
    }

    /// Forward a JSON body to an endpoint and return the raw upstream reply
    ///
    /// Any upstream status, including 4xx/5xx, is a successful forward.
    /// Only transport failures are errors.
    pub async fn forward(
        &self,
        endpoint: Endpoint,
        body: Bytes,
    ) -> Result<UpstreamResponse, MailgateError> {
        let url = self.url(endpoint);
        let body = if body.is_empty() {
            Bytes::from_static(EMPTY_JSON_BODY)
        } else {
            body
        };

        debug!(
            endpoint = endpoint.name(),
            url = %url,
            body = %redact_body(&body),
            "Forwarding request upstream"
        );

        let start = Instant::now();
        let result = self.send(&url, self.credential(endpoint), body).await;

        match &result {
            Ok(response) => debug!(
                endpoint = endpoint.name(),
                status = response.status,
                body = %redact_body(&response.body),
                duration_ms = %start.elapsed().as_millis(),
                "Upstream responded"
            ),
            Err(e) => error!(
                endpoint = endpoint.name(),
                url = %url,
                error = %e,
                "Upstream request failed"
            ),
        }

        result
    }

    async fn send(
        &self,
        url: &str,
        credential: &SecretString,
        body: Bytes,
    ) -> Result<UpstreamResponse, MailgateError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(credential.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(transport_error)?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Flattens a reqwest error and its causes into one message
fn transport_error(err: reqwest::Error) -> MailgateError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    MailgateError::Upstream(message)
}
