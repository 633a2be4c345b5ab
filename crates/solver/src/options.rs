//! Solver options mapping.

use anyhow::{Context, Result};
use fftforge_kernels::{ElementType, Layout, TargetBackend};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Immutable per-solver options. Keys this crate does not interpret are kept
/// verbatim in `passthrough` for the surrounding framework.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_type: Option<String>,
    #[serde(default)]
    pub column_major: bool,
    #[serde(default)]
    pub platform: TargetBackend,
    #[serde(flatten)]
    pub passthrough: BTreeMap<String, Value>,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value).context("invalid solver options")
    }

    pub fn with_real_type<S: Into<String>>(mut self, real_type: S) -> Self {
        self.real_type = Some(real_type.into());
        self
    }

    pub fn with_column_major(mut self, column_major: bool) -> Self {
        self.column_major = column_major;
        self
    }

    pub fn with_platform(mut self, platform: TargetBackend) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_passthrough<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.passthrough.insert(key.into(), value);
        self
    }

    pub fn element_type(&self) -> ElementType {
        ElementType::from_real_type(self.real_type.as_deref())
    }

    pub fn layout(&self) -> Layout {
        Layout::from_column_major(self.column_major)
    }

    pub fn target(&self) -> TargetBackend {
        self.platform
    }

    pub fn passthrough(&self, key: &str) -> Option<&Value> {
        self.passthrough.get(key)
    }
}
