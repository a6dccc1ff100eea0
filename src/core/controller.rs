use crate::core::events::{dispatch, CascadeOutcome, PendingQueries, UiEvent};
use crate::core::form::{BookingForm, QueryOutcome};
use crate::core::messages::Messages;
use crate::domain::ports::BookingApi;
use crate::utils::error::Result;

/// Drives a [`BookingForm`] against a [`BookingApi`], awaiting each query in turn.
pub struct CascadeController<A: BookingApi> {
    api: A,
    form: BookingForm,
}

impl<A: BookingApi> CascadeController<A> {
    pub fn new(api: A, messages: Messages) -> Self {
        Self::with_form(api, BookingForm::new(messages))
    }

    pub fn with_form(api: A, form: BookingForm) -> Self {
        Self { api, form }
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn into_form(self) -> BookingForm {
        self.form
    }

    pub async fn on_professional_changed(&mut self, professional_id: &str) -> CascadeOutcome {
        self.run_event(UiEvent::ProfessionalChanged(professional_id.to_string()))
            .await
    }

    pub async fn on_date_changed(&mut self, value: &str) -> CascadeOutcome {
        self.run_event(UiEvent::DateChanged(value.to_string())).await
    }

    pub async fn on_date_blurred(&mut self) -> CascadeOutcome {
        self.run_event(UiEvent::DateBlurred).await
    }

    pub async fn on_date_key_up(&mut self, key: &str) -> CascadeOutcome {
        self.run_event(UiEvent::DateKeyUp(key.to_string())).await
    }

    /// Re-read the date and professional and reload the time control.
    pub async fn refresh_slots(&mut self) -> QueryOutcome {
        match self.form.begin_slot_refresh() {
            Some(query) => {
                let result = self.api.fetch_slots(&query.date, &query.professional_id).await;
                self.form.apply_slots(&query, result)
            }
            None => QueryOutcome::Skipped,
        }
    }

    pub fn select_service(&mut self, value: &str) -> Result<()> {
        self.form.select_service(value)
    }

    pub fn select_time(&mut self, value: &str) -> Result<()> {
        self.form.select_time(value)
    }

    /// Handle any event. Only rejected selections return an error; query
    /// failures are absorbed into the affected control.
    pub async fn handle(&mut self, event: UiEvent) -> Result<CascadeOutcome> {
        let pending = dispatch(&mut self.form, event)?;
        Ok(self.complete(pending).await)
    }

    async fn run_event(&mut self, event: UiEvent) -> CascadeOutcome {
        match dispatch(&mut self.form, event) {
            Ok(pending) => self.complete(pending).await,
            // 只有選擇事件會被拒絕
            Err(e) => {
                tracing::warn!("Event rejected: {}", e);
                CascadeOutcome::default()
            }
        }
    }

    async fn complete(&mut self, pending: PendingQueries) -> CascadeOutcome {
        let mut outcome = CascadeOutcome::default();

        if pending.service_refresh {
            outcome.services = Some(match pending.services {
                Some(query) => {
                    let result = self.api.fetch_services(&query.professional_id).await;
                    self.form.apply_services(&query, result)
                }
                None => QueryOutcome::Skipped,
            });
        }

        if pending.slot_refresh {
            outcome.slots = Some(match pending.slots {
                Some(query) => {
                    let result = self.api.fetch_slots(&query.date, &query.professional_id).await;
                    self.form.apply_slots(&query, result)
                }
                None => QueryOutcome::Skipped,
            });
        }

        outcome
    }
}
