use crate::core::messages::Locale;
use crate::domain::model::{ServiceOption, Slot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The two read-only queries the booking form depends on.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn fetch_services(&self, professional_id: &str) -> Result<Vec<ServiceOption>>;
    async fn fetch_slots(&self, date: &str, professional_id: &str) -> Result<Vec<Slot>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn services_path(&self) -> &str;
    fn slots_path(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn locale(&self) -> Locale;
}
