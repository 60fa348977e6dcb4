use cipherforge::config::SolverParams;
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::protocol::JsonLinesSink;
use cipherforge::scorer::QuadgramModel;
use cipherforge::solver::EventSink;
use cipherforge::worker::SolverWorker;
use clap::Args;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub params: SolverParams,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

/// JSON lines in on stdin, JSON lines out on stdout. Exits once stdin is
/// closed and every queued solve has finished.
pub fn run(args: &ServeArgs, params: SolverParams, model: Arc<QuadgramModel>) -> CfResult<()> {
    let mut worker = SolverWorker::spawn(model, params, args.seed)?;
    let inbox = worker
        .sender()
        .ok_or_else(|| CipherForgeError::Config("solver worker has no inbox".to_string()))?;
    worker.close();

    info!("📡 Serving on stdin/stdout");

    let reader = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!("stdin: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            if inbox.send(line).is_err() {
                break;
            }
        }
    });

    let mut sink = JsonLinesSink::new(io::stdout().lock());
    for event in worker.events().iter() {
        sink.on_event(event);
    }

    if reader.join().is_err() {
        warn!("stdin reader panicked");
    }
    worker.terminate();
    Ok(())
}
