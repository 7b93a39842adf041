use crate::domain::model::{CertificateArtifact, CertificateStatus, RenewalResult, StoredPaths};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// One remote time source. Providers make exactly one bounded-timeout
/// attempt per call; retry across providers is the resolver's job.
#[async_trait]
pub trait TimeProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn attempt(&self) -> Result<NaiveDateTime>;
}

/// The three vendor operations the renewal workflow needs. Implementations
/// are stateless beyond shared credentials; each call stands on its own.
#[async_trait]
pub trait IssuanceApi: Send + Sync {
    /// Look up the certificate whose mark matches `mark`.
    async fn fetch_status(&self, mark: &str) -> Result<CertificateStatus>;
    /// Request reissuance for an order. A vendor-side refusal surfaces as
    /// `succeeded == false`, not as an error.
    async fn renew(&self, domain_id: &str) -> Result<RenewalResult>;
    /// Retrieve the renewed chain and private key.
    async fn download(&self, domain_id: &str) -> Result<CertificateArtifact>;
}

pub trait ArtifactStore: Send + Sync {
    /// Write both artifact parts durably; both land or neither does.
    fn persist(
        &self,
        artifact: &CertificateArtifact,
    ) -> impl std::future::Future<Output = Result<StoredPaths>> + Send;
}
