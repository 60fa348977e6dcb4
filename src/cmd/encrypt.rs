use super::read_input;
use cipherforge::ciphertext::encipher;
use cipherforge::error::CfResult;
use cipherforge::key::CipherKey;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    /// Plaintext file (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Substitution key as 26 letters; random when omitted
    #[arg(short = 'K', long)]
    pub key: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: &EncryptArgs) -> CfResult<()> {
    let plain = read_input(args.input.as_deref())?;

    let key = match &args.key {
        Some(k) => k.parse::<CipherKey>()?,
        None => {
            let mut rng = if let Some(s) = args.seed {
                fastrand::Rng::with_seed(s)
            } else {
                fastrand::Rng::new()
            };
            let mut key = CipherKey::identity();
            key.shuffle(&mut rng);
            key
        }
    };

    info!("🔑 Key: {} (decode with {})", key, key.inverse());
    print!("{}", encipher(&plain, &key));
    Ok(())
}
