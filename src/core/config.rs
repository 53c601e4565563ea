use crate::core::profile::BusinessProfile;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FileSourceConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpSourceConfig {
    pub base_url: String,
}

/// Where the transaction log comes from. The two forms are distinguished by
/// their field names, matching the config file shape.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum TransactionsConfig {
    File(FileSourceConfig),
    Http(HttpSourceConfig),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// The business profile as filled in by the user. Absent or empty means
    /// no profile summary can be computed.
    pub profile: Option<BusinessProfile>,
    pub transactions: Option<TransactionsConfig>,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "bizpulse", "bizpulse")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "bizpulse", "bizpulse")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{EmployeeBand, RevenueBand};

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
profile:
  business_name: "Akos Fresh Produce"
  business_type: "Retail"
  location: "Accra"
  region: "Greater Accra"
  description: "Fresh produce stall supplying local restaurants."
  year_established: 2019
  employee_band: "1-5"
  revenue_band: "5k-20k"
  funding_needed: 15000
  email_verified: true
transactions:
  path: "./transactions.json"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        let profile = config.profile.expect("Expected a profile");
        assert_eq!(profile.business_name.as_deref(), Some("Akos Fresh Produce"));
        assert_eq!(profile.year_established, Some(2019));
        assert_eq!(profile.employee_band, Some(EmployeeBand::OneToFive));
        assert_eq!(profile.revenue_band, Some(RevenueBand::FiveToTwentyK));
        assert_eq!(profile.funding_needed, Some(15000.0));
        assert!(profile.email_verified);
        assert!(!profile.phone_verified);

        match config.transactions.expect("Expected a transaction source") {
            TransactionsConfig::File(f) => assert_eq!(f.path, "./transactions.json"),
            TransactionsConfig::Http(_) => panic!("Expected a file source"),
        }
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_config_with_http_source() {
        let yaml_str = r#"
transactions:
  base_url: "http://localhost:9000"
data_path: "/tmp/bizpulse-data"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/bizpulse-data")
        );
        assert!(config.profile.is_none());
        match config.transactions.expect("Expected a transaction source") {
            TransactionsConfig::Http(h) => assert_eq!(h.base_url, "http://localhost:9000"),
            TransactionsConfig::File(_) => panic!("Expected an http source"),
        }
    }
}
