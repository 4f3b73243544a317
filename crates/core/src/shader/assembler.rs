//! Shader source assembly: declaration blocks plus caller-supplied bodies.
//!
//! Pure text work, no context calls. Given the same schema, bodies and
//! config the output is byte-identical.
//!
//! Vertex source, one item per line:
//!
//! ```text
//! attribute <type> a_<name>;   (per attribute)
//! uniform <type> u_<name>;     (per uniform)
//! varying <type> v_<name>;     (per varying)
//! <vertex body>
//! ```
//!
//! Fragment source:
//!
//! ```text
//! precision <p> float;
//! varying <type> v_<name>;     (per varying)
//! uniform sampler2D t_<name>;  (per texture)
//! uniform <type> u_<name>;     (per fragment uniform, except `texture`)
//! <fragment body>
//! ```

use super::names::{name_table, FragmentNames, Role, VertexNames};
use crate::config::GlConfig;
use crate::schema::ProgramSchema;
use std::collections::BTreeMap;

/// Fragment-uniform name that is never declared: a uniform spelled
/// `u_texture` would shadow the GLSL `texture` builtin in some dialects.
pub const RESERVED_FRAGMENT_UNIFORM: &str = "texture";

/// Generated vertex and fragment sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

/// Prefixed name tables for both stages.
pub fn stage_names(schema: &ProgramSchema) -> (VertexNames, FragmentNames) {
    let varyings = name_table(Role::Varying, &schema.varyings);
    let vertex = VertexNames {
        attributes: name_table(Role::Attribute, &schema.attributes),
        uniforms: name_table(Role::Uniform, &schema.uniforms),
        varyings: varyings.clone(),
    };
    let fragment = FragmentNames {
        varyings,
        textures: name_table(Role::Texture, &schema.textures),
        uniforms: name_table(Role::Uniform, &schema.fragment_uniforms),
    };
    (vertex, fragment)
}

/// One `<qualifier> <type> <prefix><name>;` line per entry, newline-joined.
fn declarations<T: std::fmt::Display>(
    qualifier: &str,
    role: Role,
    table: &BTreeMap<String, T>,
    skip: Option<&str>,
) -> String {
    table
        .iter()
        .filter(|(name, _)| Some(name.as_str()) != skip)
        .map(|(name, ty)| format!("{qualifier} {ty} {};", role.prefixed(name)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_blocks(blocks: Vec<String>, omit_empty: bool) -> String {
    blocks
        .into_iter()
        .filter(|block| !omit_empty || !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assembles both stages from `schema` and the two body generators.
pub fn assemble<V, F>(
    schema: &ProgramSchema,
    vertex_body: V,
    fragment_body: F,
    config: &GlConfig,
) -> ShaderSources
where
    V: FnOnce(&VertexNames) -> String,
    F: FnOnce(&FragmentNames) -> String,
{
    let (vertex_names, fragment_names) = stage_names(schema);
    let varyings = declarations("varying", Role::Varying, &schema.varyings, None);

    let vertex = join_blocks(
        vec![
            declarations("attribute", Role::Attribute, &schema.attributes, None),
            declarations("uniform", Role::Uniform, &schema.uniforms, None),
            varyings.clone(),
            vertex_body(&vertex_names),
        ],
        config.omit_empty_blocks,
    );

    let fragment = join_blocks(
        vec![
            config.precision.pragma(),
            varyings,
            declarations("uniform", Role::Texture, &schema.textures, None),
            declarations(
                "uniform",
                Role::Uniform,
                &schema.fragment_uniforms,
                Some(RESERVED_FRAGMENT_UNIFORM),
            ),
            fragment_body(&fragment_names),
        ],
        config.omit_empty_blocks,
    );

    ShaderSources { vertex, fragment }
}
