pub mod init;
pub mod session;
pub mod start;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Run a single cycle with a live countdown", arg_required_else_help = true)]
    Start(start::StartArgs),
    #[command(about = "Run cycles interactively and review the session history")]
    Session,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Start(args) => start::cmd(args).await,
            Commands::Session => session::cmd().await,
        }
    }
}
