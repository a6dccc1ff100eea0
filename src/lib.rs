pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpBookingApi;
pub use config::{toml_config::TomlConfig, AppConfig};
pub use crate::core::{controller::CascadeController, event_loop::spawn_event_loop, events::UiEvent};
pub use crate::core::{form::BookingForm, messages::Messages};
pub use utils::error::{CascadeError, Result};
