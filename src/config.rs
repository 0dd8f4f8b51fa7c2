//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::service::DEFAULT_BASE_URL;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "VAULT_API_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OnboardingConfig {
    /// Vault API base URL
    pub api_base_url: Option<String>,
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl OnboardingConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "vault", "onboarding-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Where the log file goes, if the platform has a data directory
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("onboarding-tui.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: OnboardingConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Base URL to use: environment, then config file, then the default
    pub fn resolve_api_base_url(&self) -> String {
        self.api_base_url_with_env(std::env::var(API_URL_ENV).ok())
    }

    fn api_base_url_with_env(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn log_filter_or_default(&self) -> &str {
        self.log_filter.as_deref().unwrap_or("onboarding_tui=info")
    }
}
