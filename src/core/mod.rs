pub mod orchestrator;
pub mod policy;
pub mod time;

pub use crate::domain::model::{
    CertificateArtifact, CertificateStatus, Decision, RenewalResult, StoredPaths, TimeSample,
    TimeSource,
};
pub use crate::domain::ports::{ArtifactStore, IssuanceApi, TimeProvider};
pub use crate::utils::error::Result;
