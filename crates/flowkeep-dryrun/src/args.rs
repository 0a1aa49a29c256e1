use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Walk the managed job flow lifecycle against an in-memory provider", long_about = None)]
pub struct Args {
    /// JSON configuration file. Missing fields take their defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter expression.
    #[arg(short, long, default_value = "flowkeep_core=debug,info")]
    pub log_level: String,
}
