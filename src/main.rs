use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use cipherforge::config::SolverParams;
use cipherforge::error::CfResult;
use cipherforge::scorer::{loader, QuadgramModel};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/quadgrams.bin")]
    model: PathBuf,

    /// JSON file with solver params; command line flags win
    #[arg(global = true, long)]
    params: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Solve(cmd::solve::SolveArgs),
    Serve(cmd::serve::ServeArgs),
    Encrypt(cmd::encrypt::EncryptArgs),
    BuildModel(cmd::build_model::BuildModelArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // stdout carries results and protocol lines, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let sub_matches = matches.subcommand().map(|(_, m)| m);

    let result = match &cli.command {
        Commands::Solve(args) => resolve_params(&cli, &args.params, sub_matches)
            .and_then(|params| cmd::solve::run(args, params, load_model(&cli)?)),
        Commands::Serve(args) => resolve_params(&cli, &args.params, sub_matches)
            .and_then(|params| cmd::serve::run(args, params, load_model(&cli)?)),
        Commands::Encrypt(args) => cmd::encrypt::run(args),
        Commands::BuildModel(args) => cmd::build_model::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn load_model(cli: &Cli) -> CfResult<Arc<QuadgramModel>> {
    info!("📂 Loading Quadgrams: {:?}", cli.model);
    Ok(Arc::new(loader::load_model(&cli.model)?))
}

fn resolve_params(
    cli: &Cli,
    cli_params: &SolverParams,
    sub_matches: Option<&clap::ArgMatches>,
) -> CfResult<SolverParams> {
    let Some(path) = &cli.params else {
        return Ok(cli_params.clone());
    };

    info!("⚖️  Loading Params from: {:?}", path);
    let mut params = SolverParams::load_from_file(path)?;
    if let Some(m) = sub_matches {
        params.merge_from_cli(cli_params, m);
    }
    Ok(params)
}
