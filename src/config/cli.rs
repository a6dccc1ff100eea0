use super::toml_config::TomlConfig;
use super::AppConfig;
use crate::core::messages::Locale;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "booking-cascade")]
#[command(about = "Drive the booking form cascade (professional → services → time slots) against a booking server")]
pub struct CliConfig {
    /// TOML configuration file; command line flags override its values
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub services_path: Option<String>,

    #[arg(long)]
    pub slots_path: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Placeholder language: en or pt-br
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Professional to select (empty clears the selection)
    #[arg(long, default_value = "")]
    pub professional: String,

    /// Date to enter in the date field
    #[arg(long, default_value = "")]
    pub date: String,

    /// Service to pick once services are loaded
    #[arg(long)]
    pub service: Option<String>,

    /// Time slot to pick once slots are loaded
    #[arg(long)]
    pub time: Option<String>,

    /// Print the final form as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併 TOML 檔案與命令列參數
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                AppConfig::from(TomlConfig::from_file(path)?)
            }
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(path) = &self.services_path {
            config.services_path = path.clone();
        }
        if let Some(path) = &self.slots_path {
            config.slots_path = path.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }

        Ok(config)
    }
}
