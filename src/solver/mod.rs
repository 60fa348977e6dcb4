pub mod clock;
pub mod events;

pub use self::clock::Clock;
pub use self::events::{EventSink, KeyReport, RunStats, SolverEvent};

use crate::ciphertext::CipherText;
use crate::config::SolverParams;
use crate::error::{CfResult, CipherForgeError};
use crate::key::{CipherKey, ALPHABET_LEN};
use crate::scorer::engine::{normalized_score, score_cipher};
use crate::scorer::QuadgramModel;
use fastrand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use strum_macros::Display;
use tracing::{debug, info};

/// Exchanges tried per full sweep: every pair `i < j` of 26 positions.
pub const PAIRS_PER_SWEEP: u64 = (ALPHABET_LEN * (ALPHABET_LEN - 1) / 2) as u64;

/// Shared flag checked between restart rounds.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-solve counters. Reset at the start of every `solve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    pub best_score: u64,
    pub keys_tried: u64,
    pub rounds: u64,
    /// How many rounds have ended on `best_score`.
    pub best_hits: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Termination {
    /// The best score came back `convergence_hits` times.
    Converged,
    RoundCap,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Letters in the ciphertext.
    pub len: usize,
    pub best_score: u64,
    pub best_key: Option<CipherKey>,
    pub plain: Option<String>,
    pub stats: RunStats,
    pub termination: Termination,
}

/// Random-restart hill climber over substitution keys.
///
/// Each round shuffles a fresh key and climbs it with first-improvement
/// pair exchanges until no exchange helps. Rounds repeat until the round
/// cap is hit or the same best score turns up `convergence_hits` times.
pub struct Solver {
    model: Option<Arc<QuadgramModel>>,
    params: SolverParams,
    rng: Rng,
    cancel: CancelToken,
    state: RunState,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverParams::default(), None)
    }
}

impl Solver {
    /// `seed` makes the shuffles reproducible; `None` seeds from entropy.
    pub fn new(params: SolverParams, seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };

        Self {
            model: None,
            params,
            rng,
            cancel: CancelToken::new(),
            state: RunState::default(),
        }
    }

    pub fn configure(&mut self, model: Arc<QuadgramModel>) {
        self.model = Some(model);
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// The reported form of a raw score for `letters` letters.
    pub fn normalize(&self, score: u64, letters: usize) -> f64 {
        normalized_score(score, letters, self.params.score_offset)
    }

    pub fn solve<S: EventSink + ?Sized>(
        &mut self,
        raw: &str,
        sink: &mut S,
    ) -> CfResult<SolveReport> {
        let text = CipherText::parse(raw);
        self.solve_text(&text, sink)
    }

    /// Runs the restart loop to completion and emits exactly one `done`,
    /// unless the cancel token trips first.
    pub fn solve_text<S: EventSink + ?Sized>(
        &mut self,
        text: &CipherText,
        sink: &mut S,
    ) -> CfResult<SolveReport> {
        let model = self.model.clone().ok_or_else(|| {
            CipherForgeError::Config("no quadgram model configured".to_string())
        })?;
        self.params.validate()?;

        self.state = RunState::default();
        let mut clock = Clock::start();
        let mut best_key = None;
        let mut termination = Termination::RoundCap;

        info!(
            "Solving {} letters (max {} rounds, stop after {} hits)",
            text.len(),
            self.params.max_rounds,
            self.params.convergence_hits
        );

        for _ in 0..self.params.max_rounds {
            if self.cancel.is_cancelled() {
                termination = Termination::Cancelled;
                break;
            }

            self.state.rounds += 1;

            let mut key = CipherKey::identity();
            key.shuffle(&mut self.rng);

            let score = self.hill_climb(&mut key, text, &model, &clock, sink);

            if score > self.state.best_score {
                self.state.best_score = score;
                self.state.best_hits = 1;
                best_key = Some(key);
                debug!(
                    "   Round {}: new best {} ({})",
                    self.state.rounds,
                    score,
                    key.render()
                );
            } else if score == self.state.best_score {
                self.state.best_hits += 1;
                if self.state.best_hits >= self.params.convergence_hits {
                    termination = Termination::Converged;
                    break;
                }
            }

            self.tick(&mut clock, sink);
        }

        let stats = self.stats(&clock);
        info!(
            "{} after {} rounds ({} keys, {:.0} keys/s)",
            termination, stats.rounds, stats.nbr_keys, stats.rate
        );

        if termination != Termination::Cancelled {
            sink.on_event(SolverEvent::Done(stats));
        }

        Ok(SolveReport {
            len: text.len(),
            best_score: self.state.best_score,
            plain: best_key.as_ref().map(|k| text.decode(k)),
            best_key,
            stats,
            termination,
        })
    }

    /// First-improvement climb over all pairs `(i, j)`, `i < j`, in order.
    ///
    /// An exchange is kept when it beats the best score of this climb and
    /// undone otherwise. Full sweeps repeat until one keeps nothing.
    fn hill_climb<S: EventSink + ?Sized>(
        &mut self,
        key: &mut CipherKey,
        text: &CipherText,
        model: &QuadgramModel,
        clock: &Clock,
        sink: &mut S,
    ) -> u64 {
        let cipher = text.cipher();
        let mut score = 0u64;

        loop {
            let mut improved = false;

            for i in 0..ALPHABET_LEN - 1 {
                for j in (i + 1)..ALPHABET_LEN {
                    key.exchange(i, j);
                    self.state.keys_tried += 1;

                    let new_score = score_cipher(model, key, cipher);

                    if new_score > score {
                        score = new_score;
                        improved = true;
                        self.emit_key(score, key, text, clock, sink);
                    } else {
                        key.exchange(i, j);
                    }
                }
            }

            if !improved {
                break;
            }
        }

        score
    }

    /// Only scores above the global best of earlier rounds reach observers.
    fn emit_key<S: EventSink + ?Sized>(
        &self,
        score: u64,
        key: &CipherKey,
        text: &CipherText,
        clock: &Clock,
        sink: &mut S,
    ) {
        if score <= self.state.best_score {
            return;
        }

        let runtime = clock.runtime();
        sink.on_event(SolverEvent::Key(KeyReport {
            key: key.render(),
            len: text.len(),
            nbr_keys: self.state.keys_tried,
            plain: text.decode(key),
            rate: clock::rate(self.state.keys_tried, runtime),
            rounds: self.state.rounds,
            runtime,
            score: self.normalize(score, text.len()),
        }));
    }

    fn tick<S: EventSink + ?Sized>(&self, clock: &mut Clock, sink: &mut S) {
        if clock.since_tick() >= self.params.tick_interval() {
            let stats = self.stats(clock);
            clock.mark_tick();
            sink.on_event(SolverEvent::Update(stats));
        }
    }

    fn stats(&self, clock: &Clock) -> RunStats {
        let runtime = clock.runtime();
        RunStats {
            nbr_keys: self.state.keys_tried,
            rate: clock::rate(self.state.keys_tried, runtime),
            rounds: self.state.rounds,
            runtime,
        }
    }
}
