use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An Argo-style workflow manifest.
///
/// Only the fields the submission pipeline reads are typed. Everything else is
/// captured in `extensions` maps so re-serializing the document loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: WorkflowSpec,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl WorkflowDocument {
    /// `metadata.name`, if present and not blank.
    pub fn name(&self) -> Option<&str> {
        self.metadata
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    pub fn templates(&self) -> &[Template] {
        &self.spec.templates
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSpec {
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

/// One node of the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Inputs>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl Template {
    pub fn artifacts(&self) -> &[Artifact] {
        self.inputs
            .as_ref()
            .map(|inputs| inputs.artifacts.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawArtifact>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl Artifact {
    pub fn raw_data(&self) -> Option<&str> {
        self.raw.as_ref().map(|raw| raw.data.as_str())
    }
}

/// Inline artifact content; for chaos templates this is a YAML resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArtifact {
    pub data: String,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}
