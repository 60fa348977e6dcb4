use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// Sent whenever a hill climb reaches a new global best.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyReport {
    pub key: String,
    pub len: usize,
    pub nbr_keys: u64,
    pub plain: String,
    pub rate: f64,
    pub rounds: u64,
    pub runtime: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub nbr_keys: u64,
    pub rate: f64,
    pub rounds: u64,
    pub runtime: f64,
}

/// Outbound messages, tagged by `resp` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resp", rename_all = "lowercase")]
pub enum SolverEvent {
    Key(KeyReport),
    Update(RunStats),
    Done(RunStats),
}

impl SolverEvent {
    pub fn runtime(&self) -> f64 {
        match self {
            SolverEvent::Key(k) => k.runtime,
            SolverEvent::Update(s) | SolverEvent::Done(s) => s.runtime,
        }
    }
}

/// Receives solver events. The solver never waits on a sink.
pub trait EventSink {
    fn on_event(&mut self, event: SolverEvent);
}

impl EventSink for Vec<SolverEvent> {
    fn on_event(&mut self, event: SolverEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<SolverEvent> {
    fn on_event(&mut self, event: SolverEvent) {
        // A hung-up receiver just stops listening; the solve carries on.
        let _ = self.send(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_event(&mut self, event: SolverEvent) {
        (**self).on_event(event);
    }
}
