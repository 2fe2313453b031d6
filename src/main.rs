use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use ord_explorer::{Network, PageClient, Settings};

#[derive(Parser)]
#[command(name = "ord_explorer", about = "Read blocks, sats and inscriptions from an ord explorer")]
struct Cli {
    /// Use the testnet explorer
    #[arg(long, global = true)]
    testnet: bool,
    /// Explorer base URL (overrides ORD_BASE_URL and --testnet)
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the explorer answers
    Health,
    /// Print the indexed block count
    BlockCount,
    /// Show a block by height
    Block { height: u64 },
    /// Show a sat
    Sat { id: String },
    /// Show an inscription
    Inscription { id: String },
    /// Show the first output of a transaction
    Tx { id: String },
    /// Dump raw inscription content
    Content {
        id: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the rendered preview HTML
    Preview { id: String },
    /// List inscription ids, newest first
    Inscriptions {
        #[arg(long, default_value = "0")]
        start: u64,
        #[arg(long, default_value = "10")]
        stop: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load().context("Failed to load settings")?;
    if cli.testnet {
        settings.network = Network::Testnet;
        settings.base_url = None;
    }
    if let Some(base) = cli.base_url {
        settings.base_url = Some(base);
    }
    let client = PageClient::from_settings(&settings)?;

    match cli.command {
        Commands::Health => {
            if client.is_node_healthy() {
                println!("ok");
            } else {
                match &settings.base_url {
                    Some(base) => anyhow::bail!("{base} is not healthy"),
                    None => anyhow::bail!("{} explorer is not healthy", settings.network),
                }
            }
        }
        Commands::BlockCount => println!("{}", client.get_block_count()?),
        Commands::Block { height } => print_json(&client.get_block(height)?)?,
        Commands::Sat { id } => print_json(&client.get_sat(&id)?)?,
        Commands::Inscription { id } => print_json(&client.get_inscription(&id)?)?,
        Commands::Tx { id } => print_json(&client.get_tx(&id)?)?,
        Commands::Content { id, out } => {
            let bytes = client.get_content(&id)?;
            match out {
                Some(path) => std::fs::write(&path, &bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => std::io::stdout().lock().write_all(&bytes)?,
            }
        }
        Commands::Preview { id } => print!("{}", client.get_preview(&id)?),
        Commands::Inscriptions { start, stop } => {
            let pb = ProgressBar::new(stop.saturating_sub(start));
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40} {pos}/{len}")?
                    .progress_chars("=> "),
            );
            for item in client.inscriptions(start, stop) {
                let (index, id) = item?;
                pb.suspend(|| println!("{index}\t{id}"));
                pb.inc(1);
            }
            pb.finish_and_clear();
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
