use crate::core::form::{BookingForm, QueryOutcome, ServiceQuery, SlotQuery};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// User interaction events the booking form reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "value")]
pub enum UiEvent {
    ProfessionalChanged(String),
    /// Date field `change`.
    DateChanged(String),
    /// Typing in the date field; no refresh.
    DateInput(String),
    DateBlurred,
    DateKeyUp(String),
    ServiceSelected(String),
    TimeSelected(String),
}

/// Queries an event asks the caller to issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingQueries {
    pub services: Option<ServiceQuery>,
    pub slots: Option<SlotQuery>,
    /// `true` when the service control was refreshed.
    pub service_refresh: bool,
    /// `true` when the time control was refreshed, even if no Slot Query was needed.
    pub slot_refresh: bool,
}

/// Per-control result of handling one event. `None` means the event did not touch that control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub services: Option<QueryOutcome>,
    pub slots: Option<QueryOutcome>,
}

/// Apply the synchronous part of an event to the form.
///
/// Selection events that the form rejects surface as errors; everything else
/// succeeds and reports the queries still to issue.
pub fn dispatch(form: &mut BookingForm, event: UiEvent) -> Result<PendingQueries> {
    let mut pending = PendingQueries::default();

    match event {
        UiEvent::ProfessionalChanged(id) => {
            pending.services = form.begin_professional_change(&id);
            pending.service_refresh = true;
            pending.slots = form.begin_slot_refresh();
            pending.slot_refresh = true;
        }
        UiEvent::DateChanged(value) => {
            form.set_date(&value);
            pending.slots = form.begin_slot_refresh();
            pending.slot_refresh = true;
        }
        UiEvent::DateInput(value) => form.set_date(&value),
        UiEvent::DateBlurred => {
            pending.slots = form.begin_slot_refresh();
            pending.slot_refresh = true;
        }
        UiEvent::DateKeyUp(key) => {
            if key == "Enter" {
                pending.slots = form.begin_slot_refresh();
                pending.slot_refresh = true;
            }
        }
        UiEvent::ServiceSelected(value) => form.select_service(&value)?,
        UiEvent::TimeSelected(value) => form.select_time(&value)?,
    }

    Ok(pending)
}
