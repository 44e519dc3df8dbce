use crate::cli::{CreateWorkflowCommand, OutputFormat};
use crate::config::{
    default_config_path, load_config, resolve_credentials, ConfigError, Credentials,
    CredentialsError,
};
use crate::prompt::{LinePrompter, Prompter};
use chaosctl_client::{
    BackendClient, BackendCredentials, BackendEndpoint, ClientError, EndpointError,
};
use chaosctl_engine::{
    prepare_submission, submit_prepared, MembershipSource, PrepareOptions, PreparedSubmission,
    SubmissionOutcome, SubmitError, WorkflowSubmitter,
};
use chaosctl_sdk::{load_workflow_manifest, LoadError, SubmissionTarget};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

const REPORT_SCHEMA: &str = "chaosctl-create-workflow/0.0.1";

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("{field} is required")]
    MissingIdentifier { field: &'static str },
    #[error("prompt for {field} failed: {source}")]
    Prompt {
        field: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("credentials rejected: {0}")]
    Credentials(#[from] CredentialsError),
    #[error("backend endpoint invalid: {0}")]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("json encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

pub fn execute_create_workflow(command: &CreateWorkflowCommand) -> Result<String, RunnerError> {
    let mut prompter = LinePrompter::stdio();
    execute_create_workflow_with(command, &mut prompter, unix_now(), connect_backend)
}

/// Runs `create workflow` with the prompt source, clock and backend supplied
/// by the caller.
pub fn execute_create_workflow_with<B, F>(
    command: &CreateWorkflowCommand,
    prompter: &mut dyn Prompter,
    now_unix: u64,
    connect: F,
) -> Result<String, RunnerError>
where
    B: MembershipSource + WorkflowSubmitter,
    F: FnOnce(&Credentials) -> Result<B, RunnerError>,
{
    let document = load_workflow_manifest(&command.file)?;
    let project_id = resolve_identifier(
        command.project_id.as_deref(),
        "project id",
        "Enter the Project ID",
        prompter,
    )?;
    let cluster_id = resolve_identifier(
        command.cluster_id.as_deref(),
        "cluster id",
        "Enter the Cluster ID",
        prompter,
    )?;

    let target = SubmissionTarget::new(project_id, cluster_id);
    let prepared = prepare_submission(&document, &target, &PrepareOptions::default())?;

    if command.dry_run {
        info!(workflow = %prepared.payload.workflow_name, "dry run, nothing submitted");
        return render_dry_run(&prepared, &command.format);
    }

    let config_path = match &command.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = load_config(&config_path)?;
    let credentials = resolve_credentials(&config, now_unix)?;
    let backend = connect(&credentials)?;
    let outcome = submit_prepared(prepared, &backend, &backend)?;
    render_outcome(&outcome, &command.format)
}

/// Uses the flag when it is present and non-blank, otherwise asks.
pub fn resolve_identifier(
    flag: Option<&str>,
    field: &'static str,
    question: &str,
    prompter: &mut dyn Prompter,
) -> Result<String, RunnerError> {
    if let Some(value) = flag.map(str::trim).filter(|value| !value.is_empty()) {
        return Ok(value.to_string());
    }
    let answer = prompter
        .ask(question)
        .map_err(|source| RunnerError::Prompt { field, source })?;
    if answer.trim().is_empty() {
        return Err(RunnerError::MissingIdentifier { field });
    }
    Ok(answer.trim().to_string())
}

fn connect_backend(credentials: &Credentials) -> Result<BackendClient, RunnerError> {
    let endpoint = BackendEndpoint::new(credentials.endpoint.clone())?;
    let client = BackendClient::new(
        endpoint,
        BackendCredentials {
            username: credentials.username.clone(),
            token: credentials.token.clone(),
        },
    )?;
    Ok(client)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

fn render_dry_run(
    prepared: &PreparedSubmission,
    format: &OutputFormat,
) -> Result<String, RunnerError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "schema": REPORT_SCHEMA,
            "dry_run": true,
            "fingerprint": prepared.fingerprint,
            "experiments": prepared.experiments,
            "summary": prepared.summary,
            "payload": prepared.payload,
        }))?),
        OutputFormat::Text => {
            let mut lines = vec![format!(
                "dry run: workflow `{}` was not submitted",
                prepared.payload.workflow_name
            )];
            lines.extend(prepared_lines(prepared));
            lines.push("payload:".to_string());
            lines.push(serde_json::to_string_pretty(&prepared.payload)?);
            Ok(lines.join("\n"))
        }
    }
}

fn render_outcome(
    outcome: &SubmissionOutcome,
    format: &OutputFormat,
) -> Result<String, RunnerError> {
    let prepared = &outcome.prepared;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "schema": REPORT_SCHEMA,
            "dry_run": false,
            "fingerprint": prepared.fingerprint,
            "experiments": prepared.experiments,
            "summary": prepared.summary,
            "role": outcome.role,
            "receipt": outcome.receipt,
        }))?),
        OutputFormat::Text => {
            let mut lines = vec![
                format!("workflow `{}` created", outcome.receipt.workflow_name),
                format!("workflow id: {}", outcome.receipt.workflow_id),
            ];
            lines.extend(prepared_lines(prepared));
            Ok(lines.join("\n"))
        }
    }
}

fn prepared_lines(prepared: &PreparedSubmission) -> Vec<String> {
    let payload = &prepared.payload;
    let summary = &prepared.summary;
    let mut lines = vec![
        format!("project: {}", payload.project_id),
        format!("cluster: {}", payload.cluster_id),
    ];
    if payload.weightages.is_empty() {
        lines.push("experiments: none".to_string());
    } else {
        lines.push("experiments:".to_string());
        for entry in &payload.weightages {
            lines.push(format!(
                "  - {} (weight {})",
                entry.experiment_name, entry.weightage
            ));
        }
    }
    lines.push(format!(
        "skipped: {} engine spec(s), {} without payload",
        summary.engine_specs, summary.without_payload
    ));
    lines.push(format!("malformed: {}", summary.malformed.len()));
    for malformed in &summary.malformed {
        lines.push(format!("  - {}: {}", malformed.field_path, malformed.reason));
    }
    lines.push(format!("fingerprint: {}", prepared.fingerprint));
    lines
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
