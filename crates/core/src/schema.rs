//! Program interface schema.
//!
//! A [`ProgramSchema`] names every attribute, uniform, fragment-only
//! uniform, varying and texture a program exposes, each with its declared
//! type. Tables are `BTreeMap`s: lookup is by caller-chosen name and
//! iteration is always in sorted name order, which keeps generated source
//! and per-draw binding order deterministic.
//!
//! Schemas deserialize from JSON; absent tables are empty:
//!
//! ```
//! use typed_gl_core::ProgramSchema;
//!
//! let schema = ProgramSchema::from_json(
//!     r#"{ "attributes": { "position": "vec2" }, "uniforms": { "view": "mat3" } }"#,
//! ).unwrap();
//! assert_eq!(schema.attributes.len(), 1);
//! assert!(schema.textures.is_empty());
//! ```

use crate::types::{AttributeType, TextureType, UniformType, VaryingType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramSchema {
    /// Per-vertex inputs, declared in the vertex stage.
    pub attributes: BTreeMap<String, AttributeType>,
    /// Per-draw constants declared in the vertex stage.
    pub uniforms: BTreeMap<String, UniformType>,
    /// Per-draw constants declared in the fragment stage only.
    pub fragment_uniforms: BTreeMap<String, UniformType>,
    /// Values interpolated from the vertex to the fragment stage.
    #[serde(alias = "varying")]
    pub varyings: BTreeMap<String, VaryingType>,
    /// Sampler uniforms declared in the fragment stage.
    pub textures: BTreeMap<String, TextureType>,
}

impl ProgramSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: impl Into<String>, ty: AttributeType) -> Self {
        self.attributes.insert(name.into(), ty);
        self
    }

    pub fn uniform(mut self, name: impl Into<String>, ty: UniformType) -> Self {
        self.uniforms.insert(name.into(), ty);
        self
    }

    pub fn fragment_uniform(mut self, name: impl Into<String>, ty: UniformType) -> Self {
        self.fragment_uniforms.insert(name.into(), ty);
        self
    }

    pub fn varying(mut self, name: impl Into<String>, ty: VaryingType) -> Self {
        self.varyings.insert(name.into(), ty);
        self
    }

    pub fn texture(mut self, name: impl Into<String>, ty: TextureType) -> Self {
        self.textures.insert(name.into(), ty);
        self
    }

    /// Parses a JSON schema. Table keys are `attributes`, `uniforms`,
    /// `fragmentUniforms`, `varyings` (or `varying`) and `textures`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total number of declared names across all tables.
    pub fn len(&self) -> usize {
        self.attributes.len()
            + self.uniforms.len()
            + self.fragment_uniforms.len()
            + self.varyings.len()
            + self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
