pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{AppConfig, CliArgs};
pub use core::{orchestrator::RenewalOrchestrator, time::TimeResolver};
pub use utils::error::{RenewError, Result};
