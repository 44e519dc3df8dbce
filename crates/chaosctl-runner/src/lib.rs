mod cli;
mod config;
mod logging;
mod prompt;
mod run;

pub use cli::{Cli, Commands, CreateCommand, CreateWorkflowCommand, OutputFormat};
pub use config::{
    default_config_path, load_config, resolve_credentials, validate_config, AccountConfig,
    ChaosctlConfig, ConfigError, Credentials, CredentialsError, UserConfig, DEFAULT_CONFIG_FILE,
};
pub use logging::{default_log_filter, init_logging};
pub use prompt::{LinePrompter, Prompter};
pub use run::{
    execute_create_workflow, execute_create_workflow_with, resolve_identifier, RunnerError,
};
