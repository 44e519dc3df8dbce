use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "chaosctl")]
#[command(about = "Submit chaos workflows to a chaos engineering backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(subcommand)]
    Create(CreateCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum CreateCommand {
    /// Create a chaos workflow from a manifest file
    Workflow(CreateWorkflowCommand),
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CreateWorkflowCommand {
    /// Workflow manifest (YAML or JSON)
    #[arg(short = 'f', long = "file")]
    pub file: PathBuf,
    /// Project to create the workflow in; prompted for when omitted
    #[arg(long)]
    pub project_id: Option<String>,
    /// Target cluster; prompted for when omitted
    #[arg(long)]
    pub cluster_id: Option<String>,
    /// Credentials file, defaults to ~/.chaosctl.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Create(CreateCommand::Workflow(command)) => command.verbose,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
