//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Tessera replay - feed recorded streams through the snapshot engine
#[derive(Debug, Parser)]
#[command(name = "tessera-replay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration (TOML); defaults apply when omitted
    #[arg(short, long, env = "TESSERA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference data file: a JSON array of instrument and yield curve records
    #[arg(short, long)]
    pub reference_data: PathBuf,

    /// Market events, one JSON object per line
    #[arg(short, long)]
    pub events: PathBuf,

    /// Override the minimum publish interval (milliseconds)
    #[arg(long)]
    pub min_publish_interval_ms: Option<u64>,

    /// Pretty-print published snapshots
    #[arg(long)]
    pub pretty: bool,
}
