//! Weight assignment for extracted experiments.

use crate::extract::ExperimentDescriptor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weight given to every experiment when nothing more specific is known.
pub const DEFAULT_EXPERIMENT_WEIGHT: u32 = 10;

/// Annotation on an experiment resource that overrides its weight.
pub const WEIGHT_ANNOTATION: &str = "chaosctl.io/weightage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub experiment_name: String,
    pub weightage: u32,
}

pub trait WeightPolicy {
    fn weigh(&self, experiment: &ExperimentDescriptor) -> WeightEntry;
}

/// Gives every experiment the same weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWeight(pub u32);

impl Default for FixedWeight {
    fn default() -> Self {
        Self(DEFAULT_EXPERIMENT_WEIGHT)
    }
}

impl WeightPolicy for FixedWeight {
    fn weigh(&self, experiment: &ExperimentDescriptor) -> WeightEntry {
        WeightEntry {
            experiment_name: experiment.name.clone(),
            weightage: self.0,
        }
    }
}

/// Reads the weight from an experiment annotation, using `fallback` when the
/// annotation is absent or not an unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationWeight {
    pub annotation_key: String,
    pub fallback: FixedWeight,
}

impl Default for AnnotationWeight {
    fn default() -> Self {
        Self {
            annotation_key: WEIGHT_ANNOTATION.to_string(),
            fallback: FixedWeight::default(),
        }
    }
}

impl WeightPolicy for AnnotationWeight {
    fn weigh(&self, experiment: &ExperimentDescriptor) -> WeightEntry {
        let Some(raw) = experiment.annotations.get(&self.annotation_key) else {
            return self.fallback.weigh(experiment);
        };
        match raw.trim().parse::<u32>() {
            Ok(weightage) => WeightEntry {
                experiment_name: experiment.name.clone(),
                weightage,
            },
            Err(_) => {
                debug!(
                    experiment = %experiment.name,
                    annotation = %self.annotation_key,
                    value = %raw,
                    "ignoring unparsable weight annotation"
                );
                self.fallback.weigh(experiment)
            }
        }
    }
}

/// One entry per descriptor, in input order. Duplicate names are kept.
pub fn assign_weights(
    descriptors: impl IntoIterator<Item = ExperimentDescriptor>,
    policy: &dyn WeightPolicy,
) -> Vec<WeightEntry> {
    descriptors
        .into_iter()
        .map(|descriptor| policy.weigh(&descriptor))
        .collect()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
