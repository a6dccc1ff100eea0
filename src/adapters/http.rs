use crate::domain::model::{ServiceOption, Slot};
use crate::domain::ports::{BookingApi, ConfigProvider};
use crate::utils::error::{CascadeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SERVICES_PATH: &str = "/api/servicos";
pub const DEFAULT_SLOTS_PATH: &str = "/api/horarios";

#[derive(Debug, Deserialize)]
struct ServicesResponse {
    #[serde(default)]
    services: Option<Vec<ServiceOption>>,
}

#[derive(Debug, Deserialize)]
struct SlotsResponse {
    #[serde(default)]
    slots: Option<Vec<Slot>>,
}

/// [`BookingApi`] over the booking site's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    client: Client,
    services_url: Url,
    slots_url: Url,
    timeout: Option<Duration>,
}

impl HttpBookingApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_paths(base_url, DEFAULT_SERVICES_PATH, DEFAULT_SLOTS_PATH)
    }

    pub fn with_paths(base_url: &str, services_path: &str, slots_path: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            services_url: endpoint_url(base_url, services_path)?,
            slots_url: endpoint_url(base_url, slots_path)?,
            timeout: None,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api = Self::with_paths(
            config.base_url(),
            config.services_path(),
            config.slots_path(),
        )?;
        Ok(api.with_timeout(config.request_timeout()))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn services_url(&self, professional_id: &str) -> Url {
        let mut url = self.services_url.clone();
        url.query_pairs_mut()
            .append_pair("professional_id", professional_id);
        url
    }

    pub fn slots_url(&self, date: &str, professional_id: &str) -> Url {
        let mut url = self.slots_url.clone();
        url.query_pairs_mut()
            .append_pair("date", date)
            .append_pair("professional_id", professional_id);
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CascadeError::HttpStatusError {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| CascadeError::MalformedResponseError {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn fetch_services(&self, professional_id: &str) -> Result<Vec<ServiceOption>> {
        let response: ServicesResponse = self.get_json(self.services_url(professional_id)).await?;
        Ok(response.services.unwrap_or_default())
    }

    async fn fetch_slots(&self, date: &str, professional_id: &str) -> Result<Vec<Slot>> {
        let response: SlotsResponse = self
            .get_json(self.slots_url(date, professional_id))
            .await?;
        Ok(response.slots.unwrap_or_default())
    }
}

/// 將端點路徑接在 base URL 之後，保留 base 本身的路徑前綴
fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}
