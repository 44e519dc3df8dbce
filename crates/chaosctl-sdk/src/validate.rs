use crate::documents::WorkflowDocument;
use chaosctl_core::{Diagnostic, FieldPath};
use regex::Regex;
use std::collections::BTreeMap;

pub const WORKFLOW_KIND: &str = "Workflow";

const DNS_SUBDOMAIN_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";
const DNS_SUBDOMAIN_MAX_LEN: usize = 253;

/// Checks the manifest rules the backend would otherwise reject late.
///
/// Errors make the manifest unusable for submission; warnings are advisory.
pub fn validate_workflow_manifest(document: &WorkflowDocument) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let name_path = FieldPath::root().key("metadata").key("name");

    match document.name() {
        None => diagnostics.push(Diagnostic::error(
            "manifest.metadata.name.required",
            name_path,
            "workflow manifest must set a non-empty metadata.name",
        )),
        Some(name) => {
            let pattern = Regex::new(DNS_SUBDOMAIN_PATTERN).expect("valid regex");
            if name.len() > DNS_SUBDOMAIN_MAX_LEN || !pattern.is_match(name) {
                diagnostics.push(Diagnostic::error(
                    "manifest.metadata.name.format",
                    name_path,
                    format!("workflow name `{name}` must be a lowercase RFC 1123 subdomain"),
                ));
            }
        }
    }

    if let Some(kind) = document.kind.as_deref() {
        if kind != WORKFLOW_KIND {
            diagnostics.push(Diagnostic::error(
                "manifest.kind.unsupported",
                FieldPath::root().key("kind"),
                format!("manifest kind `{kind}` is not supported (expected `{WORKFLOW_KIND}`)"),
            ));
        }
    }

    if document.templates().is_empty() {
        diagnostics.push(Diagnostic::warning(
            "manifest.templates.empty",
            FieldPath::root().key("spec").key("templates"),
            "workflow manifest declares no templates",
        ));
    }

    let mut first_seen = BTreeMap::<&str, usize>::new();
    for (index, template) in document.templates().iter().enumerate() {
        let first = *first_seen.entry(template.name.as_str()).or_insert(index);
        if first != index {
            diagnostics.push(Diagnostic::error(
                "manifest.templates.duplicate_name",
                FieldPath::root()
                    .key("spec")
                    .key("templates")
                    .index(index)
                    .key("name"),
                format!(
                    "template name `{}` is already used by template {first}",
                    template.name
                ),
            ));
        }
    }

    Diagnostic::sort_stable(&mut diagnostics);
    diagnostics
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
