use crate::documents::WorkflowDocument;
use crate::parse::{parse_workflow_manifest_with_options, DocumentFormat, ParseManifestOptions};
use crate::validate::validate_workflow_manifest;
use chaosctl_core::Diagnostic;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("read manifest failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("manifest `{path}` is invalid:\n{}", Diagnostic::render_list(.issues))]
    Invalid {
        path: String,
        issues: Vec<Diagnostic>,
    },
}

impl LoadError {
    pub fn issues(&self) -> &[Diagnostic] {
        match self {
            LoadError::ReadFile { .. } => &[],
            LoadError::Invalid { issues, .. } => issues,
        }
    }
}

/// Reads, parses, and checks a workflow manifest from disk.
///
/// Warnings are logged and do not fail the load.
pub fn load_workflow_manifest(path: &Path) -> Result<WorkflowDocument, LoadError> {
    let manifest_path = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
        path: manifest_path.clone(),
        source,
    })?;

    let options = ParseManifestOptions {
        format: DocumentFormat::from_extension(path.extension().and_then(|ext| ext.to_str())),
        validate_schema: true,
    };
    let document = parse_workflow_manifest_with_options(text.as_str(), options).map_err(|issues| {
        LoadError::Invalid {
            path: manifest_path.clone(),
            issues,
        }
    })?;

    let (errors, warnings): (Vec<_>, Vec<_>) = validate_workflow_manifest(&document)
        .into_iter()
        .partition(Diagnostic::is_error);
    for warning in &warnings {
        tracing::warn!(manifest = %manifest_path, "{warning}");
    }
    if !errors.is_empty() {
        return Err(LoadError::Invalid {
            path: manifest_path,
            issues: errors,
        });
    }

    tracing::debug!(
        manifest = %manifest_path,
        templates = document.templates().len(),
        "loaded workflow manifest"
    );
    Ok(document)
}

#[cfg(test)]
#[path = "load_test.rs"]
mod tests;
