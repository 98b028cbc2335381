//! fragment — split a file or directory into encrypted share fragments.
//!
//! ```bash
//! fragment encrypt --shares 5 --threshold 3 ./secrets
//! fragment decrypt share-1.fragment share-3.fragment share-5.fragment
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fragment",
    version,
    about = "Creates fragmented files: any threshold of shares recovers the original"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt a file or directory into share fragments
    Encrypt {
        /// Number of shares to issue
        #[arg(long, default_value_t = 2)]
        shares: usize,

        /// Number of shares required to recover
        #[arg(long, default_value_t = 2)]
        threshold: usize,

        /// Directory the share-<i>.fragment artifacts are written into
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// File or directory to protect
        path: PathBuf,
    },
    /// Recover the original archive from share fragments
    Decrypt {
        /// Path for the recovered tar.gz archive
        #[arg(long, short, default_value = "out.tar.gz")]
        output: PathBuf,

        /// Share artifacts (need at least the recorded threshold)
        #[arg(required = true)]
        fragments: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encrypt {
            shares,
            threshold,
            output_dir,
            path,
        } => {
            let written = fragment_cli::encrypt(&path, shares, threshold, &output_dir)
                .with_context(|| format!("failed to encrypt {}", path.display()))?;
            println!(
                "Wrote {} fragments ({} required to recover)",
                written.len(),
                threshold
            );
        }
        Command::Decrypt { output, fragments } => {
            fragment_cli::decrypt(&fragments, &output)
                .context("failed to decrypt fragments")?;
            println!("Recovered archive written to {}", output.display());
        }
    }

    Ok(())
}
