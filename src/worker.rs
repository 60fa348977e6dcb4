use crate::config::SolverParams;
use crate::error::CfResult;
use crate::protocol::{parse_command, Command};
use crate::scorer::QuadgramModel;
use crate::solver::{CancelToken, Solver, SolverEvent};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

/// A solver running on its own thread.
///
/// The only traffic is one-way: raw JSON commands go in, events come out.
/// Nothing is shared with the caller except the model and a cancel flag.
pub struct SolverWorker {
    inbox: Option<Sender<String>>,
    events: Receiver<SolverEvent>,
    cancel: CancelToken,
    handle: Option<JoinHandle<()>>,
}

impl SolverWorker {
    pub fn spawn(
        model: Arc<QuadgramModel>,
        params: SolverParams,
        seed: Option<u64>,
    ) -> CfResult<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<String>();
        let (event_tx, event_rx) = mpsc::channel::<SolverEvent>();
        let cancel = CancelToken::new();

        let mut solver = Solver::new(params, seed).with_cancel_token(cancel.clone());
        solver.configure(model);

        let handle = thread::Builder::new()
            .name("cipherforge-solver".to_string())
            .spawn(move || run_loop(solver, cmd_rx, event_tx))?;

        Ok(Self {
            inbox: Some(cmd_tx),
            events: event_rx,
            cancel,
            handle: Some(handle),
        })
    }

    /// Queues a raw payload. Returns `false` once the worker is gone.
    pub fn post_message(&self, payload: impl Into<String>) -> bool {
        match &self.inbox {
            Some(tx) => tx.send(payload.into()).is_ok(),
            None => false,
        }
    }

    pub fn start(&self, cipher_text: &str) -> CfResult<bool> {
        let payload = serde_json::to_string(&Command::start(cipher_text))?;
        Ok(self.post_message(payload))
    }

    /// Another handle on the inbox, e.g. for a reader thread.
    pub fn sender(&self) -> Option<Sender<String>> {
        self.inbox.clone()
    }

    /// Drops this handle on the inbox without cancelling. Once every
    /// sender is gone the worker finishes its queue and exits, which
    /// disconnects `events`.
    pub fn close(&mut self) {
        self.inbox.take();
    }

    pub fn events(&self) -> &Receiver<SolverEvent> {
        &self.events
    }

    /// Stops the worker: the running solve ends after its current round
    /// without a `done`, queued commands are dropped, and the thread is
    /// joined. Start a new worker to solve again.
    pub fn terminate(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.cancel.cancel();
        self.inbox.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Solver thread panicked");
            }
        }
    }
}

impl Drop for SolverWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(mut solver: Solver, inbox: Receiver<String>, mut events: Sender<SolverEvent>) {
    debug!("Solver worker started");
    let cancel = solver.cancel_token();

    for payload in inbox.iter() {
        if cancel.is_cancelled() {
            break;
        }

        match parse_command(&payload) {
            Ok(Some(Command::Start { cipher_text })) => {
                if let Err(e) = solver.solve(&cipher_text, &mut events) {
                    error!("Solve failed: {}", e);
                }
            }
            Ok(None) => debug!("Ignoring payload: {}", payload),
            Err(e) => warn!("Ignoring malformed payload: {}", e),
        }
    }

    debug!("Solver worker stopped");
}
