use crate::error::{CfResult, CipherForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Tuning for the restart loop. The defaults are the stock behavior.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Hard cap on restart rounds
    #[arg(long, default_value_t = 100_000)]
    pub max_rounds: usize,

    /// Stop once the best score has been reached this many times
    #[arg(long, default_value_t = 3)]
    pub convergence_hits: usize,

    /// Minimum time between progress updates
    #[arg(long, default_value_t = 1_000)]
    pub tick_interval_ms: u64,

    /// Subtracted from the per-quadgram average in reported scores
    #[arg(long, default_value_t = 35.0)]
    pub score_offset: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            max_rounds: 100_000,
            convergence_hits: 3,
            tick_interval_ms: 1_000,
            score_offset: 35.0,
        }
    }
}

impl SolverParams {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> CfResult<()> {
        if self.max_rounds == 0 {
            return Err(CipherForgeError::Config(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        if self.convergence_hits == 0 {
            return Err(CipherForgeError::Config(
                "convergence_hits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies over only the values the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli_params: &SolverParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field;
                }
            };
        }

        update_if_present!(max_rounds);
        update_if_present!(convergence_hits);
        update_if_present!(tick_interval_ms);
        update_if_present!(score_offset);
    }
}
