use crate::utils::error::{RenewError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "certkeeper")]
#[command(about = "Checks a managed TLS certificate and renews it near expiry")]
pub struct CliArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "certkeeper.toml")]
    pub config: PathBuf,

    #[arg(long, help = "Override target_mark from the config file")]
    pub mark: Option<String>,

    #[arg(long, help = "Override output_dir from the config file")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Immutable run configuration, loaded once per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub username: String,
    pub token: String,
    /// Human-readable label of the certificate to watch.
    pub target_mark: String,
    #[serde(default)]
    pub apihz_id: String,
    #[serde(default)]
    pub apihz_key: String,
    /// Vendor request style: order id as path segment instead of query param.
    #[serde(default)]
    pub is_path: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_renew_threshold_days")]
    pub renew_threshold_days: i64,
    #[serde(default = "default_courtesy_pause_secs")]
    pub courtesy_pause_secs: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./certs")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_renew_threshold_days() -> i64 {
    crate::core::policy::DEFAULT_RENEW_THRESHOLD_DAYS
}

fn default_courtesy_pause_secs() -> u64 {
    2
}

/// Written on first run so the user has something to fill in.
const DEFAULT_CONFIG: &str = r#"# certkeeper configuration
api_url = "https://api.xwamp.com"
username = "user@example.com"
token = "your_token_here"
target_mark = ""

# Credentials for the apihz time provider (optional).
apihz_id = "88888888"
apihz_key = "88888888"

# Vendor request style: order id as path segment instead of ?id= query.
is_path = false

output_dir = "./certs"
timeout_secs = 30
renew_threshold_days = 14
courtesy_pause_secs = 2
"#;

pub struct LoadedConfig {
    pub config: AppConfig,
    /// The file did not exist and a default template was just written.
    pub newly_created: bool,
}

impl AppConfig {
    /// Load the configuration, creating a default file first if none exists.
    /// A newly created file is reported so the caller can stop and ask the
    /// user to fill in credentials instead of running with placeholders.
    pub fn load_or_init(path: &Path) -> Result<LoadedConfig> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, DEFAULT_CONFIG)?;
            return Ok(LoadedConfig {
                config: Self::from_toml_str(DEFAULT_CONFIG)?,
                newly_created: true,
            });
        }

        let content = std::fs::read_to_string(path)?;
        Ok(LoadedConfig {
            config: Self::from_toml_str(&content)?,
            newly_created: false,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| RenewError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with the environment value; unknown variables
    /// are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn courtesy_pause(&self) -> Duration {
        Duration::from_secs(self.courtesy_pause_secs)
    }

    pub fn renew_threshold(&self) -> chrono::Duration {
        chrono::Duration::days(self.renew_threshold_days)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_url", &self.api_url)?;
        validation::validate_non_empty_string("username", &self.username)?;
        validation::validate_non_empty_string("token", &self.token)?;
        validation::validate_non_empty_string("target_mark", &self.target_mark)?;

        if self.renew_threshold_days <= 0 {
            return Err(RenewError::InvalidConfigValue {
                field: "renew_threshold_days".to_string(),
                reason: "Threshold must be at least one day".to_string(),
            });
        }
        Ok(())
    }
}
