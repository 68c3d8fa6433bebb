/// Error types for the Mailgate proxy
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailgateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MailgateError {
    /// Failure detail without the variant prefix, as reported to API callers
    pub fn details(&self) -> String {
        match self {
            Self::Config(msg) | Self::Upstream(msg) => msg.clone(),
            Self::Io(err) => err.to_string(),
        }
    }
}

impl From<reqwest::Error> for MailgateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}
