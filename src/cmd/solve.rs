use super::read_input;
use crate::reports;
use cipherforge::config::SolverParams;
use cipherforge::error::CfResult;
use cipherforge::protocol::JsonLinesSink;
use cipherforge::scorer::QuadgramModel;
use cipherforge::solver::{EventSink, Solver, SolverEvent};
use clap::Args;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub params: SolverParams,

    /// Ciphertext file (stdin when omitted)
    pub input: Option<PathBuf>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Print raw protocol events instead of logs and a report
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Logs events as they arrive.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn on_event(&mut self, event: SolverEvent) {
        match event {
            SolverEvent::Key(k) => info!(
                "🔑 Round {:5} | Score {:7.2} | {} | {}",
                k.rounds,
                k.score,
                k.key,
                preview(&k.plain, 60)
            ),
            SolverEvent::Update(s) => info!(
                "   .. {} keys | {:.0} keys/s | round {} | {:.1}s",
                s.nbr_keys, s.rate, s.rounds, s.runtime
            ),
            SolverEvent::Done(_) => {}
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .take(max_chars)
        .collect();
    flat
}

pub fn run(args: &SolveArgs, params: SolverParams, model: Arc<QuadgramModel>) -> CfResult<()> {
    let raw = read_input(args.input.as_deref())?;

    let mut solver = Solver::new(params, args.seed);
    solver.configure(model);

    if args.json {
        let mut sink = JsonLinesSink::new(io::stdout().lock());
        solver.solve(&raw, &mut sink)?;
        return Ok(());
    }

    let report = solver.solve(&raw, &mut ConsoleSink)?;
    let normalized = solver.normalize(report.best_score, report.len);
    reports::print_solution(&report, normalized);
    Ok(())
}
