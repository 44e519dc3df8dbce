//! Finds chaos experiments embedded in workflow templates.
//!
//! Every inspected artifact is classified into an [`ArtifactOutcome`], so an
//! engine spec that is deliberately skipped stays distinguishable from a
//! payload that failed to decode.

use crate::documents::{Artifact, Template, WorkflowDocument};
use crate::parse::decode_chaos_resource;
use chaosctl_core::FieldPath;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which artifacts of a template are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactScan {
    /// Only the first artifact of each template.
    #[default]
    FirstOnly,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    pub scan: ArtifactScan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentDescriptor {
    pub name: String,
    pub kind: String,
    pub template_index: usize,
    pub template_name: String,
    pub artifact_index: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The payload is a `ChaosEngine`, not an experiment.
    EngineSpec,
    /// The artifact has no inline `raw.data`.
    NoRawPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedArtifact {
    pub template_index: usize,
    pub template_name: String,
    pub artifact_index: usize,
    pub field_path: FieldPath,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutcome {
    Experiment(ExperimentDescriptor),
    Skipped {
        template_index: usize,
        artifact_index: usize,
        reason: SkipReason,
    },
    Malformed(MalformedArtifact),
}

/// Lazy walk over a document's artifacts in template order.
///
/// Cloning the iterator restarts from the clone's position, so a fresh call to
/// [`artifact_outcomes`] always replays the full sequence.
#[derive(Debug, Clone)]
pub struct ArtifactOutcomes<'a> {
    templates: &'a [Template],
    scan: ArtifactScan,
    template_index: usize,
    artifact_index: usize,
}

impl<'a> Iterator for ArtifactOutcomes<'a> {
    type Item = ArtifactOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(template) = self.templates.get(self.template_index) {
            let artifacts = template.artifacts();
            let limit = match self.scan {
                ArtifactScan::FirstOnly => artifacts.len().min(1),
                ArtifactScan::All => artifacts.len(),
            };
            if self.artifact_index < limit {
                let artifact_index = self.artifact_index;
                self.artifact_index += 1;
                return Some(classify_artifact(
                    self.template_index,
                    template,
                    artifact_index,
                    &artifacts[artifact_index],
                ));
            }
            self.template_index += 1;
            self.artifact_index = 0;
        }
        None
    }
}

/// The experiment descriptors of a document, in template order.
#[derive(Debug, Clone)]
pub struct Experiments<'a> {
    outcomes: ArtifactOutcomes<'a>,
}

impl<'a> Iterator for Experiments<'a> {
    type Item = ExperimentDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        self.outcomes.by_ref().find_map(|outcome| match outcome {
            ArtifactOutcome::Experiment(descriptor) => Some(descriptor),
            _ => None,
        })
    }
}

pub fn artifact_outcomes<'a>(
    document: &'a WorkflowDocument,
    options: &ExtractOptions,
) -> ArtifactOutcomes<'a> {
    ArtifactOutcomes {
        templates: document.templates(),
        scan: options.scan,
        template_index: 0,
        artifact_index: 0,
    }
}

pub fn experiments<'a>(document: &'a WorkflowDocument, options: &ExtractOptions) -> Experiments<'a> {
    Experiments {
        outcomes: artifact_outcomes(document, options),
    }
}

/// Counts of what extraction found, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    pub experiments: usize,
    pub engine_specs: usize,
    pub without_payload: usize,
    pub malformed: Vec<MalformedArtifact>,
}

impl ExtractionSummary {
    pub fn record(&mut self, outcome: &ArtifactOutcome) {
        match outcome {
            ArtifactOutcome::Experiment(_) => self.experiments += 1,
            ArtifactOutcome::Skipped {
                reason: SkipReason::EngineSpec,
                ..
            } => self.engine_specs += 1,
            ArtifactOutcome::Skipped {
                reason: SkipReason::NoRawPayload,
                ..
            } => self.without_payload += 1,
            ArtifactOutcome::Malformed(malformed) => self.malformed.push(malformed.clone()),
        }
    }

    pub fn from_outcomes<'o>(outcomes: impl IntoIterator<Item = &'o ArtifactOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }
}

fn classify_artifact(
    template_index: usize,
    template: &Template,
    artifact_index: usize,
    artifact: &Artifact,
) -> ArtifactOutcome {
    let Some(data) = artifact.raw_data() else {
        return ArtifactOutcome::Skipped {
            template_index,
            artifact_index,
            reason: SkipReason::NoRawPayload,
        };
    };

    match decode_chaos_resource(data) {
        Ok(header) if header.is_engine() => ArtifactOutcome::Skipped {
            template_index,
            artifact_index,
            reason: SkipReason::EngineSpec,
        },
        Ok(header) => ArtifactOutcome::Experiment(ExperimentDescriptor {
            name: header.metadata.name,
            kind: header.kind,
            template_index,
            template_name: template.name.clone(),
            artifact_index,
            annotations: header.metadata.annotations,
        }),
        Err(reason) => ArtifactOutcome::Malformed(MalformedArtifact {
            template_index,
            template_name: template.name.clone(),
            artifact_index,
            field_path: FieldPath::root()
                .key("spec")
                .key("templates")
                .index(template_index)
                .key("inputs")
                .key("artifacts")
                .index(artifact_index)
                .key("raw")
                .key("data"),
            reason,
        }),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
