//! Program building: assemble, compile, link and resolve every location once.
//!
//! A [`Program`] is immutable after construction. Every declared attribute,
//! uniform, fragment uniform and texture has a resolved location, or the
//! build fails naming the first one that did not resolve.

use crate::config::GlConfig;
use crate::context::{GraphicsContext, ShaderStage};
use crate::registry::InstanceId;
use crate::schema::ProgramSchema;
use crate::shader::{assemble, compile_shader, FragmentNames, Role, VertexNames};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while building a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// The context could not allocate a program object.
    #[error("failed to create program")]
    ProgramCreation,

    /// The context could not allocate a shader object for `stage`.
    #[error("failed to create {stage} shader")]
    ShaderCreation { stage: ShaderStage },

    /// A declared attribute has no slot in the linked program.
    #[error("failed to bind attribute '{0}': not found in the linked program")]
    AttributeBinding(String),

    /// A declared uniform or texture has no location in the linked program.
    #[error("failed to bind {role} '{name}': not found in the linked program")]
    UniformBinding { role: Role, name: String },
}

type VertexBody = Box<dyn Fn(&VertexNames) -> String>;
type FragmentBody = Box<dyn Fn(&FragmentNames) -> String>;

/// A schema together with the two shader body generators.
///
/// The generators receive the prefixed identifiers for their stage and
/// return the GLSL that follows the generated declarations.
pub struct ProgramSource {
    pub schema: ProgramSchema,
    vertex: VertexBody,
    fragment: FragmentBody,
}

impl ProgramSource {
    pub fn new<V, F>(schema: ProgramSchema, vertex: V, fragment: F) -> Self
    where
        V: Fn(&VertexNames) -> String + 'static,
        F: Fn(&FragmentNames) -> String + 'static,
    {
        Self {
            schema,
            vertex: Box::new(vertex),
            fragment: Box::new(fragment),
        }
    }

    /// Generated sources for `config`, without touching a context.
    pub fn assemble(&self, config: &GlConfig) -> crate::shader::ShaderSources {
        assemble(
            &self.schema,
            |names| (self.vertex)(names),
            |names| (self.fragment)(names),
            config,
        )
    }
}

impl fmt::Debug for ProgramSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramSource")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// A linked program with every location resolved. See
/// [`Program::draw_triangles`] for per-frame dispatch.
pub struct Program<C: GraphicsContext> {
    pub(crate) raw: C::Program,
    /// Tag of the GL instance that built this program.
    pub(crate) instance: InstanceId,
    pub(crate) schema: ProgramSchema,
    pub(crate) attribute_locations: BTreeMap<String, u32>,
    pub(crate) uniform_locations: BTreeMap<String, C::UniformLocation>,
    pub(crate) fragment_uniform_locations: BTreeMap<String, C::UniformLocation>,
    pub(crate) texture_locations: BTreeMap<String, C::UniformLocation>,
}

impl<C: GraphicsContext> Program<C> {
    /// Builds a program from `source` on `ctx`.
    ///
    /// # Errors
    ///
    /// - `ProgramCreation` if no program object can be allocated. Nothing is
    ///   compiled in that case.
    /// - `ShaderCreation` if a shader object cannot be allocated.
    /// - `AttributeBinding` / `UniformBinding` for the first declared name
    ///   the linked program does not expose.
    pub(crate) fn build(
        ctx: &C,
        instance: InstanceId,
        config: &GlConfig,
        source: ProgramSource,
    ) -> Result<Self, ProgramError> {
        let raw = ctx.create_program().ok_or(ProgramError::ProgramCreation)?;
        let sources = source.assemble(config);

        let vertex = compile_shader(ctx, ShaderStage::Vertex, &sources.vertex)?;
        ctx.attach_shader(raw, vertex);
        let fragment = compile_shader(ctx, ShaderStage::Fragment, &sources.fragment)?;
        ctx.attach_shader(raw, fragment);
        ctx.link_program(raw);
        ctx.use_program(raw);

        let schema = source.schema;

        let mut attribute_locations = BTreeMap::new();
        for name in schema.attributes.keys() {
            let slot = ctx
                .attrib_location(raw, &Role::Attribute.prefixed(name))
                .ok_or_else(|| ProgramError::AttributeBinding(name.clone()))?;
            attribute_locations.insert(name.clone(), slot);
        }

        let uniform_locations = resolve_uniforms(ctx, raw, Role::Uniform, schema.uniforms.keys())?;
        let fragment_uniform_locations =
            resolve_uniforms(ctx, raw, Role::Uniform, schema.fragment_uniforms.keys())?;
        let texture_locations = resolve_uniforms(ctx, raw, Role::Texture, schema.textures.keys())?;

        log::debug!(
            "built program {raw:?}: {} attributes, {} uniforms, {} fragment uniforms, {} textures",
            attribute_locations.len(),
            uniform_locations.len(),
            fragment_uniform_locations.len(),
            texture_locations.len()
        );

        Ok(Self {
            raw,
            instance,
            schema,
            attribute_locations,
            uniform_locations,
            fragment_uniform_locations,
            texture_locations,
        })
    }

    pub fn raw(&self) -> C::Program {
        self.raw
    }

    pub fn schema(&self) -> &ProgramSchema {
        &self.schema
    }

    /// Resolved slot of attribute `name`.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attribute_locations.get(name).copied()
    }
}

impl<C: GraphicsContext> fmt::Debug for Program<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("raw", &self.raw)
            .field("instance", &self.instance)
            .field("schema", &self.schema)
            .field("attribute_locations", &self.attribute_locations)
            .finish_non_exhaustive()
    }
}

fn resolve_uniforms<'a, C: GraphicsContext>(
    ctx: &C,
    program: C::Program,
    role: Role,
    names: impl Iterator<Item = &'a String>,
) -> Result<BTreeMap<String, C::UniformLocation>, ProgramError> {
    names
        .map(|name| {
            ctx.uniform_location(program, &role.prefixed(name))
                .map(|location| (name.clone(), location))
                .ok_or_else(|| ProgramError::UniformBinding {
                    role,
                    name: name.clone(),
                })
        })
        .collect()
}
