use cipherforge::error::CfResult;
use cipherforge::scorer::loader;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BuildModelArgs {
    /// Quadgram count list, one `QUAD COUNT` per line
    pub counts: PathBuf,

    /// Where to write the binary table
    pub output: PathBuf,
}

pub fn run(args: &BuildModelArgs) -> CfResult<()> {
    info!("📚 Reading counts: {:?}", args.counts);
    let model = loader::load_counts(&args.counts)?;

    loader::write_binary(&model, &args.output)?;
    info!(
        "💾 Wrote {:?} ({} populated cells)",
        args.output,
        model.populated()
    );
    Ok(())
}
