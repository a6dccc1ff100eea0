#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::{DEFAULT_SERVICES_PATH, DEFAULT_SLOTS_PATH};
use crate::core::messages::Locale;
use crate::core::ConfigProvider;
use crate::domain::model::SelectOption;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Effective configuration after merging the TOML file and command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub base_url: String,
    pub services_path: String,
    pub slots_path: String,
    pub timeout_seconds: Option<u64>,
    pub locale: Locale,
    pub professionals: Vec<SelectOption>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            services_path: DEFAULT_SERVICES_PATH.to_string(),
            slots_path: DEFAULT_SLOTS_PATH.to_string(),
            timeout_seconds: None,
            locale: Locale::default(),
            professionals: vec![],
        }
    }
}

impl From<TomlConfig> for AppConfig {
    fn from(config: TomlConfig) -> Self {
        Self {
            services_path: config.services_path().to_string(),
            slots_path: config.slots_path().to_string(),
            locale: config.locale(),
            base_url: config.api.base_url,
            timeout_seconds: config.api.timeout_seconds,
            professionals: config.form.professionals,
        }
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn services_path(&self) -> &str {
        &self.services_path
    }

    fn slots_path(&self) -> &str {
        &self.slots_path
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn locale(&self) -> Locale {
        self.locale
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_endpoint_path("services_path", &self.services_path)?;
        validation::validate_endpoint_path("slots_path", &self.slots_path)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        // 空值保留給佔位選項
        for professional in &self.professionals {
            validation::validate_non_empty_string("professionals.value", &professional.value)?;
        }
        Ok(())
    }
}
