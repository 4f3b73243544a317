//! GL instance configuration.
//!
//! `GlConfig` is plain data with serde support so hosts can keep it next to
//! their other settings. Missing keys fall back to [`GlConfig::default`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default float precision declared at the top of every fragment shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Precision {
    #[serde(rename = "lowp")]
    Low,
    #[serde(rename = "mediump")]
    Medium,
    #[default]
    #[serde(rename = "highp")]
    High,
}

impl Precision {
    /// The GLSL qualifier keyword.
    pub fn qualifier(self) -> &'static str {
        match self {
            Precision::Low => "lowp",
            Precision::Medium => "mediump",
            Precision::High => "highp",
        }
    }

    /// The full pragma line, e.g. `precision highp float;`.
    pub fn pragma(self) -> String {
        format!("precision {} float;", self.qualifier())
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualifier())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlConfig {
    /// Enable `SRC_ALPHA, ONE_MINUS_SRC_ALPHA` blending at construction.
    pub blend: bool,
    /// Fragment shader float precision.
    pub precision: Precision,
    /// Drop declaration blocks with no entries from generated source.
    /// When `false`, every block is emitted and an empty block leaves a
    /// blank line.
    pub omit_empty_blocks: bool,
}

impl Default for GlConfig {
    fn default() -> Self {
        Self {
            blend: true,
            precision: Precision::High,
            omit_empty_blocks: true,
        }
    }
}

impl GlConfig {
    /// Parses a JSON config; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
