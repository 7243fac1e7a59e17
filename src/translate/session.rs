use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::error::TranslateError;
use super::interface::TranslateInterface;
use super::presenter::{Submission, TranslatorView, ViewSnapshot};
use crate::language::LanguagePair;

/// User input delivered to a mounted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SetSourceText(String),
    SetLanguagePair(LanguagePair),
    Submit,
}

struct Settlement {
    generation: u64,
    outcome: Result<String, TranslateError>,
}

/// Handle to one mounted translator view.
///
/// The view state lives on a single task; every event, including the
/// settlement of a call, is applied there and followed by one published
/// snapshot. Dropping the handle unmounts the view and aborts any call
/// still in flight.
pub struct ViewSession {
    events: mpsc::UnboundedSender<ViewEvent>,
    state: watch::Receiver<ViewSnapshot>,
    task: JoinHandle<()>,
}

impl ViewSession {
    pub fn mount(backend: Arc<dyn TranslateInterface>) -> Self {
        let view = TranslatorView::new();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(view.snapshot());
        let task = tokio::spawn(run_view(view, backend, events_rx, state_tx));

        Self {
            events: events_tx,
            state: state_rx,
            task,
        }
    }

    /// Queue an event. Returns false once the view has stopped.
    pub fn dispatch(&self, event: ViewEvent) -> bool {
        self.events.send(event).is_ok()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.borrow().clone()
    }

    /// Unmount and wait for the view task to finish.
    pub async fn unmount(self) {
        let Self { events, task, .. } = self;
        drop(events);
        let _ = task.await;
    }
}

async fn run_view(
    mut view: TranslatorView,
    backend: Arc<dyn TranslateInterface>,
    mut events: mpsc::UnboundedReceiver<ViewEvent>,
    state: watch::Sender<ViewSnapshot>,
) {
    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<Settlement>();
    let mut in_flight: Option<(u64, JoinHandle<()>)> = None;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match event {
                    ViewEvent::SetSourceText(text) => view.set_source_text(text),
                    ViewEvent::SetLanguagePair(pair) => view.set_language_pair(pair),
                    ViewEvent::Submit => {
                        if let Some(submission) = view.submit() {
                            if let Some((generation, handle)) = in_flight.take() {
                                debug!("Aborting superseded translation call {}", generation);
                                handle.abort();
                            }
                            let generation = submission.generation;
                            let handle = spawn_call(backend.clone(), submission, settled_tx.clone());
                            in_flight = Some((generation, handle));
                        }
                    }
                }
            }
            Some(settlement) = settled_rx.recv() => {
                if in_flight.as_ref().map(|(g, _)| *g) == Some(settlement.generation) {
                    in_flight = None;
                }
                if !view.settle(settlement.generation, settlement.outcome) {
                    continue;
                }
            }
        }

        state.send_replace(view.snapshot());
    }

    if let Some((generation, handle)) = in_flight.take() {
        info!("View unmounted; aborting translation call {}", generation);
        handle.abort();
    }
}

fn spawn_call(
    backend: Arc<dyn TranslateInterface>,
    submission: Submission,
    settled: mpsc::UnboundedSender<Settlement>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = backend
            .translate(&submission.text, submission.language)
            .await;
        let _ = settled.send(Settlement {
            generation: submission.generation,
            outcome,
        });
    })
}
