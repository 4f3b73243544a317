//! Type catalog: the closed set of GLSL type keywords a schema may use.
//!
//! Each shader role gets its own enum so that a schema can only hold types
//! that are legal for that role. Attributes are float-encoded scalars,
//! vectors and matrices; uniforms additionally admit `bool`, `int` and
//! `sampler2D`; varyings are float scalars and vectors; textures are
//! `sampler2D` only.
//!
//! Every enum (de)serialises as its GLSL keyword, so `"vec2"` in a JSON
//! schema file is `AttributeType::Vec2` in Rust.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A keyword that does not name a type of the requested role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {role} type '{keyword}'")]
pub struct TypeParseError {
    /// Role the keyword was parsed for (e.g. "attribute").
    pub role: &'static str,
    /// The rejected keyword.
    pub keyword: String,
}

/// Element type of a per-vertex attribute stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Float,
    BVec2,
    BVec3,
    BVec4,
    IVec2,
    IVec3,
    IVec4,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AttributeType {
    /// Every attribute type, in catalog order.
    pub const ALL: [AttributeType; 13] = [
        AttributeType::Float,
        AttributeType::BVec2,
        AttributeType::BVec3,
        AttributeType::BVec4,
        AttributeType::IVec2,
        AttributeType::IVec3,
        AttributeType::IVec4,
        AttributeType::Vec2,
        AttributeType::Vec3,
        AttributeType::Vec4,
        AttributeType::Mat2,
        AttributeType::Mat3,
        AttributeType::Mat4,
    ];

    /// Number of 32-bit float components one element of this type occupies
    /// in an attribute buffer.
    pub fn component_count(self) -> usize {
        match self {
            AttributeType::Float => 1,
            AttributeType::BVec2 | AttributeType::IVec2 | AttributeType::Vec2 => 2,
            AttributeType::BVec3 | AttributeType::IVec3 | AttributeType::Vec3 => 3,
            AttributeType::BVec4 | AttributeType::IVec4 | AttributeType::Vec4 => 4,
            AttributeType::Mat2 => 4,
            AttributeType::Mat3 => 9,
            AttributeType::Mat4 => 16,
        }
    }

    /// Column count for matrix types, `None` for scalars and vectors.
    ///
    /// A matrix attribute occupies one vertex-attribute slot per column.
    pub fn matrix_columns(self) -> Option<usize> {
        match self {
            AttributeType::Mat2 => Some(2),
            AttributeType::Mat3 => Some(3),
            AttributeType::Mat4 => Some(4),
            _ => None,
        }
    }

    /// The GLSL declaration keyword.
    pub fn glsl_name(self) -> &'static str {
        match self {
            AttributeType::Float => "float",
            AttributeType::BVec2 => "bvec2",
            AttributeType::BVec3 => "bvec3",
            AttributeType::BVec4 => "bvec4",
            AttributeType::IVec2 => "ivec2",
            AttributeType::IVec3 => "ivec3",
            AttributeType::IVec4 => "ivec4",
            AttributeType::Vec2 => "vec2",
            AttributeType::Vec3 => "vec3",
            AttributeType::Vec4 => "vec4",
            AttributeType::Mat2 => "mat2",
            AttributeType::Mat3 => "mat3",
            AttributeType::Mat4 => "mat4",
        }
    }
}

/// Type of a per-draw uniform value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniformType {
    Bool,
    Int,
    Float,
    BVec2,
    BVec3,
    BVec4,
    IVec2,
    IVec3,
    IVec4,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
    #[serde(rename = "sampler2D")]
    Sampler2D,
}

impl UniformType {
    /// Every uniform type, in catalog order. This is also the full keyword set.
    pub const ALL: [UniformType; 16] = [
        UniformType::Bool,
        UniformType::Int,
        UniformType::Float,
        UniformType::BVec2,
        UniformType::BVec3,
        UniformType::BVec4,
        UniformType::IVec2,
        UniformType::IVec3,
        UniformType::IVec4,
        UniformType::Vec2,
        UniformType::Vec3,
        UniformType::Vec4,
        UniformType::Mat2,
        UniformType::Mat3,
        UniformType::Mat4,
        UniformType::Sampler2D,
    ];

    /// The GLSL declaration keyword.
    pub fn glsl_name(self) -> &'static str {
        match self {
            UniformType::Bool => "bool",
            UniformType::Int => "int",
            UniformType::Float => "float",
            UniformType::BVec2 => "bvec2",
            UniformType::BVec3 => "bvec3",
            UniformType::BVec4 => "bvec4",
            UniformType::IVec2 => "ivec2",
            UniformType::IVec3 => "ivec3",
            UniformType::IVec4 => "ivec4",
            UniformType::Vec2 => "vec2",
            UniformType::Vec3 => "vec3",
            UniformType::Vec4 => "vec4",
            UniformType::Mat2 => "mat2",
            UniformType::Mat3 => "mat3",
            UniformType::Mat4 => "mat4",
            UniformType::Sampler2D => "sampler2D",
        }
    }
}

/// Type of a value interpolated from the vertex to the fragment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaryingType {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VaryingType {
    pub const ALL: [VaryingType; 4] = [
        VaryingType::Float,
        VaryingType::Vec2,
        VaryingType::Vec3,
        VaryingType::Vec4,
    ];

    /// The GLSL declaration keyword.
    pub fn glsl_name(self) -> &'static str {
        match self {
            VaryingType::Float => "float",
            VaryingType::Vec2 => "vec2",
            VaryingType::Vec3 => "vec3",
            VaryingType::Vec4 => "vec4",
        }
    }
}

/// Sampler type of a texture uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureType {
    #[serde(rename = "sampler2D")]
    Sampler2D,
}

impl TextureType {
    pub const ALL: [TextureType; 1] = [TextureType::Sampler2D];

    /// The GLSL declaration keyword.
    pub fn glsl_name(self) -> &'static str {
        match self {
            TextureType::Sampler2D => "sampler2D",
        }
    }
}

macro_rules! keyword_impls {
    ($ty:ident, $role:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.glsl_name())
            }
        }

        impl FromStr for $ty {
            type Err = TypeParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|t| t.glsl_name() == s)
                    .ok_or_else(|| TypeParseError {
                        role: $role,
                        keyword: s.to_string(),
                    })
            }
        }
    };
}

keyword_impls!(AttributeType, "attribute");
keyword_impls!(UniformType, "uniform");
keyword_impls!(VaryingType, "varying");
keyword_impls!(TextureType, "texture");

/// One row of the type catalog: a keyword and the roles it may fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub keyword: &'static str,
    /// Float components per attribute element; `None` when the keyword is
    /// not attribute-eligible.
    pub components: Option<usize>,
    pub attribute: bool,
    pub uniform: bool,
    pub varying: bool,
    pub texture: bool,
}

/// Lists every type keyword with its component count and role eligibility.
pub fn catalog() -> Vec<CatalogEntry> {
    UniformType::ALL
        .iter()
        .map(|ty| {
            let keyword = ty.glsl_name();
            let attribute = keyword.parse::<AttributeType>().ok();
            CatalogEntry {
                keyword,
                components: attribute.map(AttributeType::component_count),
                attribute: attribute.is_some(),
                uniform: true,
                varying: keyword.parse::<VaryingType>().is_ok(),
                texture: keyword.parse::<TextureType>().is_ok(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_counts_match_glsl_layout() {
        let expected = [
            ("float", 1),
            ("bvec2", 2),
            ("ivec2", 2),
            ("vec2", 2),
            ("bvec3", 3),
            ("ivec3", 3),
            ("vec3", 3),
            ("bvec4", 4),
            ("ivec4", 4),
            ("vec4", 4),
            ("mat2", 4),
            ("mat3", 9),
            ("mat4", 16),
        ];
        for (keyword, count) in expected {
            let ty: AttributeType = keyword.parse().unwrap();
            assert_eq!(ty.component_count(), count, "wrong count for {keyword}");
        }
    }

    #[test]
    fn matrix_columns_only_for_matrices() {
        assert_eq!(AttributeType::Mat2.matrix_columns(), Some(2));
        assert_eq!(AttributeType::Mat3.matrix_columns(), Some(3));
        assert_eq!(AttributeType::Mat4.matrix_columns(), Some(4));
        assert_eq!(AttributeType::Vec4.matrix_columns(), None);
        assert_eq!(AttributeType::Float.matrix_columns(), None);
    }

    #[test]
    fn matrix_components_are_columns_squared() {
        for ty in AttributeType::ALL {
            if let Some(cols) = ty.matrix_columns() {
                assert_eq!(ty.component_count(), cols * cols, "{ty}");
            }
        }
    }

    #[test]
    fn keywords_round_trip_through_from_str() {
        for ty in UniformType::ALL {
            assert_eq!(ty.glsl_name().parse::<UniformType>().unwrap(), ty);
        }
        for ty in AttributeType::ALL {
            assert_eq!(ty.to_string().parse::<AttributeType>().unwrap(), ty);
        }
    }

    #[test]
    fn role_restrictions_are_enforced_by_parsing() {
        assert!("bool".parse::<AttributeType>().is_err());
        assert!("int".parse::<AttributeType>().is_err());
        assert!("sampler2D".parse::<AttributeType>().is_err());
        assert!("mat2".parse::<VaryingType>().is_err());
        assert!("ivec2".parse::<VaryingType>().is_err());
        assert!("vec2".parse::<TextureType>().is_err());
    }

    #[test]
    fn parse_error_names_role_and_keyword() {
        let err = "vec5".parse::<VaryingType>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("varying"), "missing role in: {msg}");
        assert!(msg.contains("vec5"), "missing keyword in: {msg}");
    }

    #[test]
    fn serde_uses_glsl_keywords() {
        assert_eq!(
            serde_json::to_string(&UniformType::Sampler2D).unwrap(),
            "\"sampler2D\""
        );
        assert_eq!(
            serde_json::to_string(&AttributeType::BVec3).unwrap(),
            "\"bvec3\""
        );
        let ty: TextureType = serde_json::from_str("\"sampler2D\"").unwrap();
        assert_eq!(ty, TextureType::Sampler2D);
        let ty: UniformType = serde_json::from_str("\"mat4\"").unwrap();
        assert_eq!(ty, UniformType::Mat4);
    }

    #[test]
    fn serde_keywords_agree_with_glsl_name() {
        for ty in UniformType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.glsl_name()));
        }
        for ty in AttributeType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.glsl_name()));
        }
    }

    #[test]
    fn catalog_covers_every_keyword_once() {
        let entries = catalog();
        assert_eq!(entries.len(), 16);
        let vec2 = entries.iter().find(|e| e.keyword == "vec2").unwrap();
        assert_eq!(vec2.components, Some(2));
        assert!(vec2.attribute && vec2.uniform && vec2.varying && !vec2.texture);

        let sampler = entries.iter().find(|e| e.keyword == "sampler2D").unwrap();
        assert_eq!(sampler.components, None);
        assert!(!sampler.attribute && sampler.uniform && sampler.texture);

        let boolean = entries.iter().find(|e| e.keyword == "bool").unwrap();
        assert!(!boolean.attribute && !boolean.varying);
    }
}
