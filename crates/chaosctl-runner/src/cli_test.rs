use super::{Cli, Commands, CreateCommand, OutputFormat};
use clap::{CommandFactory, Parser};
use std::path::Path;

#[test]
fn cli_help_lists_create() {
    let mut command = Cli::command();
    let help = command.render_long_help().to_string();
    assert!(help.contains("create"));
}

#[test]
fn cli_parses_create_workflow_with_all_flags() {
    let cli = Cli::try_parse_from([
        "chaosctl",
        "create",
        "workflow",
        "-f",
        "workflow.yaml",
        "--project-id",
        "P",
        "--cluster-id",
        "C",
        "--config",
        "creds.yaml",
        "--dry-run",
        "--verbose",
        "--format",
        "json",
    ])
    .expect("create workflow must parse");
    assert!(cli.command.verbose());
    match cli.command {
        Commands::Create(CreateCommand::Workflow(command)) => {
            assert_eq!(command.file, Path::new("workflow.yaml"));
            assert_eq!(command.project_id.as_deref(), Some("P"));
            assert_eq!(command.cluster_id.as_deref(), Some("C"));
            assert_eq!(command.config.as_deref(), Some(Path::new("creds.yaml")));
            assert!(command.dry_run);
            assert_eq!(command.format, OutputFormat::Json);
        }
    }
}

#[test]
fn cli_defaults_optional_flags() {
    let cli = Cli::try_parse_from(["chaosctl", "create", "workflow", "--file", "wf.yaml"])
        .expect("long file flag must parse");
    match cli.command {
        Commands::Create(CreateCommand::Workflow(command)) => {
            assert!(command.project_id.is_none());
            assert!(command.cluster_id.is_none());
            assert!(command.config.is_none());
            assert!(!command.dry_run);
            assert!(!command.verbose);
            assert_eq!(command.format, OutputFormat::Text);
        }
    }
}

#[test]
fn cli_requires_manifest_file() {
    assert!(Cli::try_parse_from(["chaosctl", "create", "workflow"]).is_err());
}
