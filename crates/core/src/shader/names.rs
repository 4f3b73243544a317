//! Role prefixes that namespace schema names inside generated GLSL.
//!
//! Every caller-chosen name is exposed to shader bodies, emitted in
//! declarations and looked up after linking under its prefixed form:
//! attributes `a_`, uniforms `u_`, varyings `v_`, textures `t_`.

use std::collections::BTreeMap;
use std::fmt;

/// Caller-chosen name to prefixed shader identifier.
pub type NameTable = BTreeMap<String, String>;

/// The role a declared name plays in the program interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Attribute,
    Uniform,
    Varying,
    Texture,
}

impl Role {
    pub fn prefix(self) -> &'static str {
        match self {
            Role::Attribute => "a_",
            Role::Uniform => "u_",
            Role::Varying => "v_",
            Role::Texture => "t_",
        }
    }

    /// The shader identifier for `name` in this role.
    pub fn prefixed(self, name: &str) -> String {
        format!("{}{name}", self.prefix())
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Attribute => "attribute",
            Role::Uniform => "uniform",
            Role::Varying => "varying",
            Role::Texture => "texture",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the name table for every key of `table`.
pub fn name_table<T>(role: Role, table: &BTreeMap<String, T>) -> NameTable {
    table
        .keys()
        .map(|name| (name.clone(), role.prefixed(name)))
        .collect()
}

/// Identifiers visible to the vertex body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexNames {
    pub attributes: NameTable,
    pub uniforms: NameTable,
    pub varyings: NameTable,
}

/// Identifiers visible to the fragment body. `uniforms` holds the
/// fragment-only uniforms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentNames {
    pub varyings: NameTable,
    pub textures: NameTable,
    pub uniforms: NameTable,
}
