use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenewError {
    #[error("transient failure, retry next cycle: {0}")]
    Transient(String),

    #[error("credentials rejected by issuance API: {0}")]
    Auth(String),

    #[error("no certificate with mark '{0}' in this account")]
    NotFound(String),

    #[error("issuance API declined the renewal (response id {0})")]
    RenewalRejected(String),

    #[error("downloaded artifact is incomplete: {0}")]
    IncompleteArtifact(String),

    #[error("failed to persist artifact: {0}")]
    Persistence(String),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidConfigValue { field: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RenewError {
    pub fn transient(err: impl std::fmt::Display) -> Self {
        Self::Transient(err.to_string())
    }

    /// True when the next scheduled invocation may succeed without operator
    /// intervention. Everything else is a configuration or vendor problem
    /// that re-running will not fix.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::RenewalRejected(_))
    }

    /// Process exit code for the scheduler: 2 retryable, 1 fatal.
    pub fn exit_code(&self) -> i32 {
        if self.is_retryable() {
            2
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, RenewError>;
