use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use bindhints::config::HintsConfig;
use bindhints::scan::{scan_sites, BindingKind};

#[derive(Parser)]
#[command(name = "bindhints", about = "Find binding sites that deserve an inline type hint.")]
struct Cli {
    /// Explicit config file (defaults to project + user config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every hint anchor in a source file
    Scan {
        file: PathBuf,
        /// Emit JSON instead of one anchor per line
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved configuration
    Config,
}

#[derive(Serialize)]
struct Anchor {
    line: u32,
    character: u32,
    kind: BindingKind,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bindhints=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => HintsConfig::load_from(path),
        None => HintsConfig::load(),
    };

    match cli.command {
        Command::Scan { file, json } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let anchors: Vec<Anchor> = scan_sites(&text)
                .into_iter()
                .map(|site| Anchor {
                    line: site.position.line,
                    character: site.position.character,
                    kind: site.kind,
                })
                .collect();
            info!("{} binding sites in {}", anchors.len(), file.display());

            if json {
                println!("{}", serde_json::to_string_pretty(&anchors)?);
            } else {
                for a in &anchors {
                    println!("{}:{}:{}\t{}", file.display(), a.line + 1, a.character + 1, a.kind);
                }
            }
        }
        Command::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}
