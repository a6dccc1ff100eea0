pub mod controller;
pub mod event_loop;
pub mod events;
pub mod form;
pub mod messages;

#[cfg(test)]
pub(crate) mod mock_api;

pub use crate::domain::model::{Control, FormSnapshot, SelectOption, SelectionState};
pub use crate::domain::ports::{BookingApi, ConfigProvider};
pub use crate::utils::error::Result;
