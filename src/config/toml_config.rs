use crate::adapters::http::{DEFAULT_SERVICES_PATH, DEFAULT_SLOTS_PATH};
use crate::core::messages::Locale;
use crate::core::ConfigProvider;
use crate::domain::model::SelectOption;
use crate::utils::error::{CascadeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub services_path: Option<String>,
    pub slots_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    pub locale: Option<Locale>,
    #[serde(default)]
    pub professionals: Vec<SelectOption>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CascadeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CascadeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOOKING_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CascadeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn professionals(&self) -> &[SelectOption] {
        &self.form.professionals
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn services_path(&self) -> &str {
        self.api
            .services_path
            .as_deref()
            .unwrap_or(DEFAULT_SERVICES_PATH)
    }

    fn slots_path(&self) -> &str {
        self.api.slots_path.as_deref().unwrap_or(DEFAULT_SLOTS_PATH)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    fn locale(&self) -> Locale {
        self.form.locale.unwrap_or_default()
    }
}
