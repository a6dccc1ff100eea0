use crate::core::events::{dispatch, PendingQueries, UiEvent};
use crate::core::form::{BookingForm, ServiceQuery, SlotQuery};
use crate::domain::model::{FormSnapshot, ServiceOption, Slot};
use crate::domain::ports::BookingApi;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};

const EVENT_QUEUE_SIZE: usize = 64;

enum Completion {
    Services(ServiceQuery, Result<Vec<ServiceOption>>),
    Slots(SlotQuery, Result<Vec<Slot>>),
}

/// Handle to a running event loop.
pub struct EventLoopHandle {
    pub events: mpsc::Sender<UiEvent>,
    pub snapshots: watch::Receiver<FormSnapshot>,
    pub task: JoinHandle<BookingForm>,
}

/// Spawn the form's event loop on the current runtime.
///
/// Dropping every event sender ends the loop once in-flight queries complete;
/// the task then yields the final form.
pub fn spawn_event_loop<A>(form: BookingForm, api: Arc<A>) -> EventLoopHandle
where
    A: BookingApi + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
    let (snapshot_tx, snapshot_rx) = watch::channel(form.snapshot());
    let task = tokio::spawn(run_event_loop(form, api, event_rx, snapshot_tx));

    EventLoopHandle {
        events: event_tx,
        snapshots: snapshot_rx,
        task,
    }
}

/// Single owner of the form: applies events in arrival order and query
/// completions as they resolve. Queries run concurrently in a `JoinSet`.
pub async fn run_event_loop<A>(
    mut form: BookingForm,
    api: Arc<A>,
    mut events: mpsc::Receiver<UiEvent>,
    snapshots: watch::Sender<FormSnapshot>,
) -> BookingForm
where
    A: BookingApi + 'static,
{
    let mut queries: JoinSet<Completion> = JoinSet::new();
    let mut events_open = true;

    loop {
        if !events_open && queries.is_empty() {
            break;
        }

        tokio::select! {
            event = events.recv(), if events_open => match event {
                Some(event) => {
                    tracing::debug!("UI event: {:?}", event);
                    match dispatch(&mut form, event) {
                        Ok(pending) => issue(&api, &mut queries, pending),
                        Err(e) => tracing::warn!("Event rejected: {}", e),
                    }
                }
                None => {
                    tracing::debug!("Event channel closed, {} queries still in flight", queries.len());
                    events_open = false;
                }
            },
            Some(joined) = queries.join_next(), if !queries.is_empty() => match joined {
                Ok(Completion::Services(query, result)) => {
                    form.apply_services(&query, result);
                }
                Ok(Completion::Slots(query, result)) => {
                    form.apply_slots(&query, result);
                }
                // 查詢任務崩潰時控制項停留在載入中狀態，等待下一次使用者操作
                Err(e) => tracing::error!("❌ Query task failed: {}", e),
            },
        }

        snapshots.send_replace(form.snapshot());
    }

    form
}

fn issue<A>(api: &Arc<A>, queries: &mut JoinSet<Completion>, pending: PendingQueries)
where
    A: BookingApi + 'static,
{
    if let Some(query) = pending.services {
        let api = Arc::clone(api);
        queries.spawn(async move {
            let result = api.fetch_services(&query.professional_id).await;
            Completion::Services(query, result)
        });
    }

    if let Some(query) = pending.slots {
        let api = Arc::clone(api);
        queries.spawn(async move {
            let result = api.fetch_slots(&query.date, &query.professional_id).await;
            Completion::Slots(query, result)
        });
    }
}
