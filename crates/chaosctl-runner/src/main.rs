use chaosctl_runner::{execute_create_workflow, init_logging, Cli, Commands, CreateCommand};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.command.verbose());
    let result = match &cli.command {
        Commands::Create(CreateCommand::Workflow(command)) => execute_create_workflow(command),
    };

    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
