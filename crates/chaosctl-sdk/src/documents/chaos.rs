use serde::Deserialize;
use std::collections::BTreeMap;

/// Kind carried by execution-engine specs, which are not experiments.
pub const CHAOS_ENGINE_KIND: &str = "ChaosEngine";

/// The part of an embedded chaos resource the extractor depends on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosResourceHeader {
    #[serde(default)]
    pub api_version: Option<String>,
    /// Empty when the payload omits `kind`.
    #[serde(default)]
    pub kind: String,
    pub metadata: ChaosResourceMeta,
}

impl ChaosResourceHeader {
    /// Header for an engine spec; nothing past `kind` is read from it.
    pub fn engine(api_version: Option<String>) -> Self {
        Self {
            api_version,
            kind: CHAOS_ENGINE_KIND.to_string(),
            metadata: ChaosResourceMeta::default(),
        }
    }

    pub fn is_engine(&self) -> bool {
        self.kind == CHAOS_ENGINE_KIND
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChaosResourceMeta {
    pub name: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}
