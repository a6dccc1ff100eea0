use crate::core::messages::Messages;
use crate::domain::model::{
    BookingRequest, Control, ControlRole, FormSnapshot, SelectOption, SelectionState,
    ServiceOption, Slot,
};
use crate::utils::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};

/// Ticket for an issued Service Query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceQuery {
    pub generation: u64,
    pub professional_id: String,
}

/// Ticket for an issued Slot Query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub generation: u64,
    pub professional_id: String,
    pub date: String,
}

/// What happened to a dependent control as the result of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum QueryOutcome {
    /// Inputs incomplete: no query was issued and the control was reset.
    Skipped,
    /// Query succeeded with this many options.
    Populated(usize),
    /// Query succeeded with an empty list.
    Empty,
    /// Query failed; the control was reset to its error placeholder.
    Failed(FailureKind),
    /// A newer request superseded this one; the response was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    MalformedResponse,
    Other,
}

impl From<ErrorKind> for FailureKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Transport => FailureKind::Transport,
            ErrorKind::MalformedResponse => FailureKind::MalformedResponse,
            _ => FailureKind::Other,
        }
    }
}

/// State of the booking form: the professional, service and time controls plus the date field.
///
/// Each dependent control carries a request generation. Starting a query or
/// resetting the control bumps it, and a response is applied only when its
/// ticket still carries the current generation.
#[derive(Debug, Clone)]
pub struct BookingForm {
    messages: Messages,
    professional: Control,
    service: Control,
    date: String,
    time: Control,
    service_generation: u64,
    slot_generation: u64,
}

impl BookingForm {
    pub fn new(messages: Messages) -> Self {
        let mut professional = Control::new(ControlRole::Professional, messages.select_professional);
        professional.enable();

        Self {
            service: Control::new(ControlRole::Service, messages.select_professional_first),
            time: Control::new(ControlRole::Time, messages.select_date_and_professional),
            professional,
            date: String::new(),
            service_generation: 0,
            slot_generation: 0,
            messages,
        }
    }

    /// Professionals rendered by the page.
    pub fn with_professionals(mut self, professionals: Vec<SelectOption>) -> Self {
        self.professional
            .populate(self.messages.select_professional, professionals);
        self.professional.enable();
        self
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn professional(&self) -> &Control {
        &self.professional
    }

    pub fn service(&self) -> &Control {
        &self.service
    }

    pub fn time(&self) -> &Control {
        &self.time
    }

    /// Raw contents of the date field.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn selection(&self) -> SelectionState {
        SelectionState {
            professional_id: self.professional.value().to_string(),
            service_id: self.service.value().to_string(),
            date_value: self.date.trim().to_string(),
            time_value: self.time.value().to_string(),
        }
    }

    /// Handle a professional change: resets the time control and returns the
    /// Service Query to issue, if any. The caller follows up with
    /// [`BookingForm::begin_slot_refresh`].
    pub fn begin_professional_change(&mut self, professional_id: &str) -> Option<ServiceQuery> {
        self.professional.set_value(professional_id);
        self.reset_time(self.messages.select_date_and_professional);

        self.service_generation += 1;
        if professional_id.is_empty() {
            self.service.reset(self.messages.select_professional_first);
            return None;
        }

        self.service.reset(self.messages.loading_services);
        tracing::debug!(
            generation = self.service_generation,
            "Issuing service query for professional {}",
            professional_id
        );
        Some(ServiceQuery {
            generation: self.service_generation,
            professional_id: professional_id.to_string(),
        })
    }

    pub fn apply_services(
        &mut self,
        query: &ServiceQuery,
        result: Result<Vec<ServiceOption>>,
    ) -> QueryOutcome {
        if query.generation != self.service_generation {
            tracing::debug!(
                generation = query.generation,
                current = self.service_generation,
                "Discarding stale service response for professional {}",
                query.professional_id
            );
            return QueryOutcome::Stale;
        }

        match result {
            Ok(services) if services.is_empty() => {
                self.service.reset(self.messages.no_services);
                QueryOutcome::Empty
            }
            Ok(services) => {
                let count = services.len();
                self.service.populate(
                    self.messages.select_service,
                    services.into_iter().map(SelectOption::from),
                );
                tracing::info!(
                    "Loaded {} services for professional {}",
                    count,
                    query.professional_id
                );
                QueryOutcome::Populated(count)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load services for professional {}: {}",
                    query.professional_id,
                    e
                );
                self.service.reset(self.messages.select_professional_first);
                QueryOutcome::Failed(e.kind().into())
            }
        }
    }

    /// Update the date field without refreshing (typing).
    pub fn set_date(&mut self, value: &str) {
        self.date = value.to_string();
    }

    /// Start a slot refresh from the current date and professional.
    ///
    /// Returns `None` when either one is empty; the time control is then reset
    /// and no query must be issued.
    pub fn begin_slot_refresh(&mut self) -> Option<SlotQuery> {
        let date = self.date.trim().to_string();
        let professional_id = self.professional.value().to_string();

        if date.is_empty() || professional_id.is_empty() {
            self.reset_time(self.messages.select_date_and_professional);
            return None;
        }

        self.reset_time(self.messages.loading_slots);
        tracing::debug!(
            generation = self.slot_generation,
            "Issuing slot query for professional {} on {}",
            professional_id,
            date
        );
        Some(SlotQuery {
            generation: self.slot_generation,
            professional_id,
            date,
        })
    }

    pub fn apply_slots(&mut self, query: &SlotQuery, result: Result<Vec<Slot>>) -> QueryOutcome {
        if query.generation != self.slot_generation {
            tracing::debug!(
                generation = query.generation,
                current = self.slot_generation,
                "Discarding stale slot response for professional {} on {}",
                query.professional_id,
                query.date
            );
            return QueryOutcome::Stale;
        }

        match result {
            Ok(slots) if slots.is_empty() => {
                self.time.reset(self.messages.no_slots);
                QueryOutcome::Empty
            }
            Ok(slots) => {
                let count = slots.len();
                self.time.populate(
                    self.messages.select_time,
                    slots.into_iter().map(|slot| SelectOption::new(slot.clone(), slot)),
                );
                tracing::info!(
                    "Loaded {} slots for professional {} on {}",
                    count,
                    query.professional_id,
                    query.date
                );
                QueryOutcome::Populated(count)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load slots for professional {} on {}: {}",
                    query.professional_id,
                    query.date,
                    e
                );
                self.time.reset(self.messages.slots_error);
                QueryOutcome::Failed(e.kind().into())
            }
        }
    }

    pub fn select_service(&mut self, value: &str) -> Result<()> {
        self.service.select(value)
    }

    pub fn select_time(&mut self, value: &str) -> Result<()> {
        self.time.select(value)
    }

    /// The booking to submit, once every field holds a real selection.
    pub fn booking_request(&self) -> Option<BookingRequest> {
        let selection = self.selection();
        if selection.professional_id.is_empty()
            || selection.service_id.is_empty()
            || selection.date_value.is_empty()
            || selection.time_value.is_empty()
        {
            return None;
        }

        Some(BookingRequest {
            professional_id: selection.professional_id,
            service_id: selection.service_id,
            date: selection.date_value,
            time: selection.time_value,
        })
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            professional: self.professional.clone(),
            service: self.service.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }

    fn reset_time(&mut self, placeholder: &str) {
        self.slot_generation += 1;
        self.time.reset(placeholder);
    }
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new(Messages::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CascadeError;

    fn transport_failure() -> CascadeError {
        CascadeError::HttpStatusError {
            url: "http://localhost/api/servicos".to_string(),
            status: 503,
        }
    }

    #[test]
    fn test_initial_state() {
        let form = BookingForm::default();

        assert!(form.professional().is_enabled());
        assert!(!form.service().is_enabled());
        assert_eq!(form.service().placeholder(), "select a professional first");
        assert!(!form.time().is_enabled());
        assert_eq!(form.time().placeholder(), "select date and professional");
        assert_eq!(form.selection(), SelectionState::default());
    }

    #[test]
    fn test_empty_professional_issues_nothing() {
        let mut form = BookingForm::default();
        form.set_date("2024-06-01");

        assert!(form.begin_professional_change("").is_none());
        assert!(form.begin_slot_refresh().is_none());
        assert_eq!(form.service().placeholder(), "select a professional first");
        assert!(!form.service().is_enabled());
        assert_eq!(form.time().placeholder(), "select date and professional");
        assert!(!form.time().is_enabled());
    }

    #[test]
    fn test_query_in_flight_shows_loading() {
        let mut form = BookingForm::default();
        let query = form.begin_professional_change("5").unwrap();

        assert_eq!(query.professional_id, "5");
        assert!(!form.service().is_enabled());
        assert_eq!(form.service().placeholder(), "loading modules...");
    }

    #[test]
    fn test_stale_service_response_is_discarded() {
        let mut form = BookingForm::default();
        let first = form.begin_professional_change("1").unwrap();
        let second = form.begin_professional_change("2").unwrap();

        let outcome = form.apply_services(&second, Ok(vec![ServiceOption::new("20", "Barba")]));
        assert_eq!(outcome, QueryOutcome::Populated(1));

        let outcome = form.apply_services(&first, Ok(vec![ServiceOption::new("10", "Corte")]));
        assert_eq!(outcome, QueryOutcome::Stale);
        assert_eq!(form.service().choices(), &[SelectOption::new("20", "Barba")]);
    }

    #[test]
    fn test_professional_change_invalidates_slot_response() {
        let mut form = BookingForm::default();
        form.set_date("2024-06-01");
        form.begin_professional_change("1");
        let slots = form.begin_slot_refresh().unwrap();

        form.begin_professional_change("");
        let outcome = form.apply_slots(&slots, Ok(vec!["09:00".to_string()]));

        assert_eq!(outcome, QueryOutcome::Stale);
        assert!(!form.time().is_enabled());
        assert_eq!(form.time().placeholder(), "select date and professional");
    }

    #[test]
    fn test_failures_reset_controls() {
        let mut form = BookingForm::default();
        form.set_date("2024-06-01");
        let services = form.begin_professional_change("5").unwrap();
        let slots = form.begin_slot_refresh().unwrap();

        let outcome = form.apply_services(&services, Err(transport_failure()));
        assert_eq!(outcome, QueryOutcome::Failed(FailureKind::Transport));
        assert_eq!(form.service().placeholder(), "select a professional first");
        assert!(!form.service().is_enabled());

        let malformed = CascadeError::MalformedResponseError {
            url: "http://localhost/api/horarios".to_string(),
            source: serde_json::from_str::<serde_json::Value>("oops").unwrap_err(),
        };
        let outcome = form.apply_slots(&slots, Err(malformed));
        assert_eq!(outcome, QueryOutcome::Failed(FailureKind::MalformedResponse));
        assert_eq!(form.time().placeholder(), "error loading times");
        assert!(!form.time().is_enabled());
    }

    #[test]
    fn test_date_is_trimmed_for_queries() {
        let mut form = BookingForm::default();
        form.begin_professional_change("5");
        form.set_date("  2024-06-01 ");

        let query = form.begin_slot_refresh().unwrap();
        assert_eq!(query.date, "2024-06-01");

        form.set_date("   ");
        assert!(form.begin_slot_refresh().is_none());
    }

    #[test]
    fn test_booking_request_requires_every_field() {
        let mut form = BookingForm::default();
        form.set_date("2024-06-01");
        let services = form.begin_professional_change("5").unwrap();
        let slots = form.begin_slot_refresh().unwrap();
        form.apply_services(&services, Ok(vec![ServiceOption::new("1", "Corte")]));
        form.apply_slots(&slots, Ok(vec!["09:00".to_string(), "10:00".to_string()]));

        form.select_service("1").unwrap();
        assert!(form.booking_request().is_none());

        form.select_time("10:00").unwrap();
        assert_eq!(
            form.booking_request(),
            Some(BookingRequest {
                professional_id: "5".to_string(),
                service_id: "1".to_string(),
                date: "2024-06-01".to_string(),
                time: "10:00".to_string(),
            })
        );
    }

    #[test]
    fn test_with_professionals() {
        let form = BookingForm::new(Messages::portuguese()).with_professionals(vec![
            SelectOption::new("5", "Ana"),
            SelectOption::new("6", "Bruno"),
        ]);

        assert!(form.professional().is_enabled());
        assert_eq!(form.professional().placeholder(), "Selecione um profissional");
        assert_eq!(form.professional().choices().len(), 2);
        assert_eq!(
            form.service().placeholder(),
            "Selecione primeiro um profissional"
        );
    }
}
