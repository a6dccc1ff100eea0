use crate::domain::model::{ServiceOption, Slot};
use crate::domain::ports::BookingApi;
use crate::utils::error::{CascadeError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Services(String),
    Slots { date: String, professional_id: String },
}

#[derive(Debug, Clone)]
enum Reply<T> {
    Ok(T),
    Transport,
    Malformed,
    Panic,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self, url: &str) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Transport => Err(CascadeError::HttpStatusError {
                url: url.to_string(),
                status: 503,
            }),
            Reply::Malformed => Err(CascadeError::MalformedResponseError {
                url: url.to_string(),
                source: serde_json::from_str::<serde_json::Value>("<html>")
                    .expect_err("html is not json"),
            }),
            Reply::Panic => panic!("backend crashed while answering {}", url),
        }
    }
}

/// Scripted backend. Unscripted queries answer with an empty list.
#[derive(Clone, Default)]
pub struct MockBookingApi {
    services: HashMap<String, Reply<Vec<ServiceOption>>>,
    slots: HashMap<(String, String), Reply<Vec<Slot>>>,
    delays: HashMap<String, Duration>,
    calls: Arc<Mutex<Vec<ApiCall>>>,
}

impl MockBookingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(mut self, professional_id: &str, services: Vec<ServiceOption>) -> Self {
        self.services
            .insert(professional_id.to_string(), Reply::Ok(services));
        self
    }

    pub fn failing_services(mut self, professional_id: &str) -> Self {
        self.services
            .insert(professional_id.to_string(), Reply::Transport);
        self
    }

    pub fn malformed_services(mut self, professional_id: &str) -> Self {
        self.services
            .insert(professional_id.to_string(), Reply::Malformed);
        self
    }

    pub fn panicking_services(mut self, professional_id: &str) -> Self {
        self.services
            .insert(professional_id.to_string(), Reply::Panic);
        self
    }

    pub fn with_slots(mut self, date: &str, professional_id: &str, slots: &[&str]) -> Self {
        let slots = slots.iter().map(|s| s.to_string()).collect();
        self.slots.insert(
            (date.to_string(), professional_id.to_string()),
            Reply::Ok(slots),
        );
        self
    }

    pub fn failing_slots(mut self, date: &str, professional_id: &str) -> Self {
        self.slots.insert(
            (date.to_string(), professional_id.to_string()),
            Reply::Transport,
        );
        self
    }

    /// Delay every answer concerning `professional_id`.
    pub fn with_delay(mut self, professional_id: &str, delay: Duration) -> Self {
        self.delays.insert(professional_id.to_string(), delay);
        self
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().await.clone()
    }

    pub async fn slot_calls(&self) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| matches!(c, ApiCall::Slots { .. }))
            .count()
    }

    async fn wait(&self, professional_id: &str) {
        if let Some(delay) = self.delays.get(professional_id) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn fetch_services(&self, professional_id: &str) -> Result<Vec<ServiceOption>> {
        self.calls
            .lock()
            .await
            .push(ApiCall::Services(professional_id.to_string()));
        self.wait(professional_id).await;

        match self.services.get(professional_id) {
            Some(reply) => reply.resolve("mock://api/servicos"),
            None => Ok(vec![]),
        }
    }

    async fn fetch_slots(&self, date: &str, professional_id: &str) -> Result<Vec<Slot>> {
        self.calls.lock().await.push(ApiCall::Slots {
            date: date.to_string(),
            professional_id: professional_id.to_string(),
        });
        self.wait(professional_id).await;

        match self
            .slots
            .get(&(date.to_string(), professional_id.to_string()))
        {
            Some(reply) => reply.resolve("mock://api/horarios"),
            None => Ok(vec![]),
        }
    }
}
