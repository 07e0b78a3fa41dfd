use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{get::GetCommand, release::ReleaseCommand};

#[derive(Parser)]
#[command(name = "relfetch")]
#[command(about = "Download a file unless a local copy already matches its MD5")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args, Clone)]
pub struct GlobalArgs {
    /// Directory to write downloads into (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a URL, named after its last path segment
    #[command(alias = "url")]
    Get(GetCommand),

    /// Download the pinned release tarball linked from the latest release page
    #[command(alias = "libskia")]
    Release(ReleaseCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Get(cmd) => cmd.run(self.global_args).await,
            Commands::Release(cmd) => cmd.run(self.global_args).await,
        }
    }
}
