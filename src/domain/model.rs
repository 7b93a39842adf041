use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where a resolved timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// One of the remote time providers, identified by name.
    Remote(&'static str),
    /// Host wall clock, used only when every remote provider failed.
    LocalClock,
}

/// A single "now" reading produced once per run by the time resolver.
#[derive(Debug, Clone)]
pub struct TimeSample {
    pub timestamp: NaiveDateTime,
    pub source: TimeSource,
    /// How long the resolver spent acquiring this sample.
    pub acquired_in: Duration,
}

impl TimeSample {
    pub fn is_local_fallback(&self) -> bool {
        self.source == TimeSource::LocalClock
    }
}

/// Point-in-time snapshot of one managed certificate, as reported by the
/// issuance API. Not kept across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateStatus {
    pub domain_id: String,
    pub domains: Vec<String>,
    pub valid_until: NaiveDateTime,
    pub mark: String,
}

/// Outcome of a renewal request. `succeeded == false` means the vendor
/// answered but declined the reissue; it is not an error at this layer.
#[derive(Debug, Clone)]
pub struct RenewalResult {
    pub response_id: String,
    pub succeeded: bool,
}

/// Renewed certificate material as delivered by the download call.
#[derive(Debug, Clone)]
pub struct CertificateArtifact {
    /// Leaf certificate plus intermediates, PEM concatenated.
    pub full_chain: String,
    pub private_key: String,
}

impl CertificateArtifact {
    pub fn is_complete(&self) -> bool {
        !self.full_chain.trim().is_empty() && !self.private_key.trim().is_empty()
    }
}

/// Filesystem locations of a persisted artifact.
#[derive(Debug, Clone)]
pub struct StoredPaths {
    pub full_chain: PathBuf,
    pub private_key: PathBuf,
}

/// Result of the expiry policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub renew: bool,
    pub remaining: chrono::Duration,
}
