//! Per-frame draw dispatch.
//!
//! A [`DrawCall`] names the buffers, uniform values and textures for one
//! draw. [`Program::draw_triangles`] validates it against the program and
//! the owning [`Gl`] registries, rebinds everything in sorted name order and
//! issues an indexed or array draw. A failed draw leaves the registries
//! untouched; context bindings made before the failure stay in place.

use crate::context::{BufferTarget, GraphicsContext, Topology};
use crate::gl::Gl;
use crate::program::Program;
use crate::registry::{
    AttributeBuffer, BufferId, BufferKind, IndexBuffer, InstanceId, TextureBuffer, TextureId,
};
use crate::types::AttributeType;
use crate::uniform::{self, UniformValue};
use std::collections::BTreeMap;
use thiserror::Error;

/// Texture units addressable by one draw (`TEXTURE0` through `TEXTURE31`).
pub const MAX_TEXTURE_UNITS: usize = 32;

/// Bytes per float component.
const FLOAT_BYTES: usize = 4;

/// Errors that abort a single draw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// A buffer handle this instance did not issue, or of the wrong kind.
    #[error("invalid buffer reference: {0}")]
    InvalidBufferReference(BufferId),

    /// A texture handle this instance did not issue.
    #[error("invalid texture reference: {0}")]
    InvalidTextureReference(TextureId),

    /// The program was built by a different GL instance.
    #[error("program was built by {program}, not {gl}")]
    ForeignProgram { program: InstanceId, gl: InstanceId },

    /// Attribute buffers disagree on vertex count.
    #[error(
        "attribute buffer size mismatch: '{name}' holds {found} vertices, \
         earlier attributes hold {expected}"
    )]
    AttributeSizeMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// The draw supplied no attribute buffers.
    #[error("no attribute buffer data supplied")]
    NoAttributeData,

    /// An attribute name the program does not declare.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// A texture name the program does not declare.
    #[error("unknown texture '{0}'")]
    UnknownTexture(String),

    /// A buffer whose element type differs from the declared attribute type.
    #[error("attribute '{name}' is declared {declared} but the buffer holds {found}")]
    AttributeTypeMismatch {
        name: String,
        declared: AttributeType,
        found: AttributeType,
    },

    /// More textures than there are texture units.
    #[error("{count} textures supplied, at most {} texture units are available", MAX_TEXTURE_UNITS)]
    TextureUnitsExhausted { count: usize },
}

/// Inputs for one [`Program::draw_triangles`] call.
///
/// ```
/// use typed_gl_core::{DrawCall, Gl, RecordingContext, AttributeType};
///
/// let mut gl = Gl::new(RecordingContext::new()).unwrap();
/// let positions = gl
///     .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]))
///     .unwrap();
/// let call = DrawCall::new()
///     .attribute("position", &positions)
///     .uniform("opacity", 0.5_f32)
///     .strip(false);
/// assert_eq!(call.attributes().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DrawCall {
    attributes: BTreeMap<String, AttributeBuffer>,
    uniforms: BTreeMap<String, UniformValue>,
    fragment_uniforms: BTreeMap<String, UniformValue>,
    textures: BTreeMap<String, TextureBuffer>,
    indices: Option<IndexBuffer>,
    strip: bool,
}

impl DrawCall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: impl Into<String>, buffer: &AttributeBuffer) -> Self {
        self.attributes.insert(name.into(), *buffer);
        self
    }

    pub fn uniform(mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> Self {
        self.uniforms.insert(name.into(), value.into());
        self
    }

    pub fn fragment_uniform(
        mut self,
        name: impl Into<String>,
        value: impl Into<UniformValue>,
    ) -> Self {
        self.fragment_uniforms.insert(name.into(), value.into());
        self
    }

    pub fn texture(mut self, name: impl Into<String>, texture: &TextureBuffer) -> Self {
        self.textures.insert(name.into(), *texture);
        self
    }

    /// Draws indexed from `buffer` instead of sequentially.
    pub fn indices(mut self, buffer: &IndexBuffer) -> Self {
        self.indices = Some(*buffer);
        self
    }

    /// Selects triangle-strip topology instead of a triangle list.
    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeBuffer)> {
        self.attributes.iter().map(|(name, b)| (name.as_str(), b))
    }

    pub fn topology(&self) -> Topology {
        if self.strip {
            Topology::TriangleStrip
        } else {
            Topology::Triangles
        }
    }
}

impl<C: GraphicsContext> Program<C> {
    /// Binds the inputs of `call` and issues one draw.
    ///
    /// Attributes, uniforms and textures are processed in sorted name order.
    /// The n-th texture in that order is bound to texture unit n. Uniform
    /// values that do not fit their declared type, and uniform names the
    /// program does not declare, are logged and skipped.
    ///
    /// # Errors
    ///
    /// Any [`DrawError`]; nothing is drawn in that case.
    pub fn draw_triangles(&self, gl: &Gl<C>, call: &DrawCall) -> Result<(), DrawError> {
        if self.instance != gl.instance() {
            return Err(DrawError::ForeignProgram {
                program: self.instance,
                gl: gl.instance(),
            });
        }
        let ctx = gl.context();
        ctx.use_program(self.raw);

        let mut vertex_count: Option<usize> = None;
        for (name, handle) in &call.attributes {
            let (&declared, &slot) = self
                .schema
                .attributes
                .get(name)
                .zip(self.attribute_locations.get(name))
                .ok_or_else(|| DrawError::UnknownAttribute(name.clone()))?;

            let entry = gl
                .buffer_entry(handle.id)
                .ok_or(DrawError::InvalidBufferReference(handle.id))?;
            let found = match entry.kind {
                BufferKind::Attribute(ty) => ty,
                BufferKind::Indices => return Err(DrawError::InvalidBufferReference(handle.id)),
            };
            if found != declared {
                return Err(DrawError::AttributeTypeMismatch {
                    name: name.clone(),
                    declared,
                    found,
                });
            }

            match vertex_count {
                None => vertex_count = Some(entry.size),
                Some(expected) if expected != entry.size => {
                    return Err(DrawError::AttributeSizeMismatch {
                        name: name.clone(),
                        expected,
                        found: entry.size,
                    });
                }
                Some(_) => {}
            }

            ctx.bind_buffer(BufferTarget::Array, entry.raw);
            bind_attribute(ctx, slot, declared);
        }

        for (name, value) in &call.uniforms {
            self.set_uniform(ctx, name, value, false);
        }
        for (name, value) in &call.fragment_uniforms {
            self.set_uniform(ctx, name, value, true);
        }

        if call.textures.len() > MAX_TEXTURE_UNITS {
            return Err(DrawError::TextureUnitsExhausted {
                count: call.textures.len(),
            });
        }
        for (unit, (name, handle)) in call.textures.iter().enumerate() {
            let location = self
                .texture_locations
                .get(name)
                .ok_or_else(|| DrawError::UnknownTexture(name.clone()))?;
            let entry = gl
                .texture_entry(handle.id)
                .ok_or(DrawError::InvalidTextureReference(handle.id))?;
            ctx.active_texture(unit as u32);
            ctx.bind_texture(entry.raw);
            ctx.uniform_1_i32(location, unit as i32);
        }

        let count = vertex_count.ok_or(DrawError::NoAttributeData)?;
        let topology = call.topology();

        match call.indices {
            Some(handle) => {
                let entry = gl
                    .buffer_entry(handle.id)
                    .filter(|entry| entry.kind == BufferKind::Indices)
                    .ok_or(DrawError::InvalidBufferReference(handle.id))?;
                ctx.bind_buffer(BufferTarget::ElementArray, entry.raw);
                ctx.draw_elements_u32(topology, entry.size as i32, 0);
            }
            None => ctx.draw_arrays(topology, 0, count as i32),
        }
        Ok(())
    }

    fn set_uniform(&self, ctx: &C, name: &str, value: &UniformValue, fragment: bool) {
        let (types, locations) = if fragment {
            (&self.schema.fragment_uniforms, &self.fragment_uniform_locations)
        } else {
            (&self.schema.uniforms, &self.uniform_locations)
        };
        match types.get(name).zip(locations.get(name)) {
            Some((&declared, location)) => {
                uniform::apply(ctx, location, name, declared, value);
            }
            None => {
                let role = if fragment { "fragment uniform" } else { "uniform" };
                log::warn!("failed to set {role} '{name}': not declared by the program");
            }
        }
    }
}

/// Enables and describes the vertex slots of one attribute.
///
/// Matrices take one slot per column, each column `rows` floats wide, with
/// the whole matrix as stride. Everything else is tightly packed.
fn bind_attribute<C: GraphicsContext>(ctx: &C, slot: u32, ty: AttributeType) {
    match ty.matrix_columns() {
        Some(columns) => {
            let rows = ty.component_count() / columns;
            let stride = ty.component_count() * FLOAT_BYTES;
            for column in 0..columns {
                let column_slot = slot + column as u32;
                ctx.enable_vertex_attrib_array(column_slot);
                ctx.vertex_attrib_pointer_f32(
                    column_slot,
                    rows as i32,
                    stride as i32,
                    (column * rows * FLOAT_BYTES) as i32,
                );
            }
        }
        None => {
            ctx.enable_vertex_attrib_array(slot);
            ctx.vertex_attrib_pointer_f32(slot, ty.component_count() as i32, 0, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::recording::RecordingContext;
    use crate::program::ProgramSource;
    use crate::schema::ProgramSchema;
    use crate::types::{TextureType, UniformType};
    use glam::{Mat2, Vec4};

    fn mock_source(schema: ProgramSchema) -> ProgramSource {
        ProgramSource::new(
            schema,
            |_| "mock vertex shader".to_string(),
            |_| "mock fragment shader".to_string(),
        )
    }

    fn minimal_schema() -> ProgramSchema {
        ProgramSchema::new()
            .attribute("at1", AttributeType::Vec2)
            .uniform("un1", UniformType::Mat2)
    }

    const BUILD_CALLS: [&str; 8] = [
        "shader_source(vertex-shader-1, \"attribute vec2 a_at1;\\nuniform mat2 u_un1;\\nmock vertex shader\")",
        "compile_shader(vertex-shader-1)",
        "attach_shader(program-1, vertex-shader-1)",
        "shader_source(fragment-shader-2, \"precision highp float;\\nmock fragment shader\")",
        "compile_shader(fragment-shader-2)",
        "attach_shader(program-1, fragment-shader-2)",
        "link_program(program-1)",
        "use_program(program-1)",
    ];

    fn setup(schema: ProgramSchema) -> (Gl<RecordingContext>, Program<RecordingContext>) {
        let gl = Gl::new(RecordingContext::new()).unwrap();
        let program = gl.create_program(mock_source(schema)).unwrap();
        gl.context().take_calls();
        (gl, program)
    }

    #[test]
    fn can_draw_triangles() {
        let mut gl = Gl::new(RecordingContext::new()).unwrap();
        gl.clear(None);
        let program = gl.create_program(mock_source(minimal_schema())).unwrap();
        let at1 = gl.create_attribute_buffer(AttributeType::Vec2, None).unwrap();
        gl.buffer_attribute_data(&at1, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap();

        let call = DrawCall::new()
            .attribute("at1", &at1)
            .uniform("un1", Mat2::IDENTITY);
        program.draw_triangles(&gl, &call).unwrap();

        let mut expected = vec![
            "request_extension(\"OES_element_index_uint\")",
            "enable_alpha_blending()",
            "clear([0.0, 0.0, 0.0, 1.0])",
        ];
        expected.extend(BUILD_CALLS);
        expected.extend([
            "bind_buffer(Array, buffer-1)",
            "buffer_data_f32(Array, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0])",
            "use_program(program-1)",
            "bind_buffer(Array, buffer-1)",
            "enable_vertex_attrib_array(0)",
            "vertex_attrib_pointer_f32(0, 2, 0, 0)",
            "uniform_matrix_2_f32_slice(u_un1@program-1, [1.0, 0.0, 0.0, 1.0])",
            "draw_arrays(Triangles, 0, 3)",
        ]);
        assert_eq!(gl.context().calls(), expected);
    }

    #[test]
    fn can_draw_triangles_with_indices() {
        let (mut gl, program) = setup(minimal_schema());
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]))
            .unwrap();
        let indices = gl.create_index_buffer(Some(&[1, 2, 3])).unwrap();

        let call = DrawCall::new()
            .attribute("at1", &at1)
            .uniform("un1", Vec4::new(1.0, 0.0, 0.0, 1.0))
            .indices(&indices);
        program.draw_triangles(&gl, &call).unwrap();

        assert_eq!(
            gl.context().calls(),
            vec![
                "bind_buffer(Array, buffer-1)",
                "buffer_data_f32(Array, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0])",
                "bind_buffer(ElementArray, buffer-2)",
                "buffer_data_u32(ElementArray, [1, 2, 3])",
                "use_program(program-1)",
                "bind_buffer(Array, buffer-1)",
                "enable_vertex_attrib_array(0)",
                "vertex_attrib_pointer_f32(0, 2, 0, 0)",
                "uniform_matrix_2_f32_slice(u_un1@program-1, [1.0, 0.0, 0.0, 1.0])",
                "bind_buffer(ElementArray, buffer-2)",
                "draw_elements_u32(Triangles, 3, 0)",
            ]
        );
    }

    #[test]
    fn can_draw_triangles_with_texture() {
        let (mut gl, program) = setup(minimal_schema().texture("tx1", TextureType::Sampler2D));
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]))
            .unwrap();
        let tx1 = gl.create_texture(TextureType::Sampler2D).unwrap();
        gl.context().take_calls();

        let call = DrawCall::new()
            .attribute("at1", &at1)
            .uniform("un1", Mat2::IDENTITY)
            .texture("tx1", &tx1);
        program.draw_triangles(&gl, &call).unwrap();

        assert_eq!(
            gl.context().calls(),
            vec![
                "use_program(program-1)",
                "bind_buffer(Array, buffer-1)",
                "enable_vertex_attrib_array(0)",
                "vertex_attrib_pointer_f32(0, 2, 0, 0)",
                "uniform_matrix_2_f32_slice(u_un1@program-1, [1.0, 0.0, 0.0, 1.0])",
                "active_texture(0)",
                "bind_texture(texture-1)",
                "uniform_1_i32(t_tx1@program-1, 0)",
                "draw_arrays(Triangles, 0, 3)",
            ]
        );
    }

    #[test]
    fn strip_selects_triangle_strip() {
        let (mut gl, program) = setup(minimal_schema());
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 8]))
            .unwrap();
        let call = DrawCall::new().attribute("at1", &at1).strip(true);
        program.draw_triangles(&gl, &call).unwrap();
        assert_eq!(
            gl.context().calls().last().map(String::as_str),
            Some("draw_arrays(TriangleStrip, 0, 4)")
        );
    }

    #[test]
    fn textures_take_units_in_name_order() {
        let schema = minimal_schema()
            .texture("normal", TextureType::Sampler2D)
            .texture("albedo", TextureType::Sampler2D);
        let (mut gl, program) = setup(schema);
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        let normal = gl.create_texture(TextureType::Sampler2D).unwrap();
        let albedo = gl.create_texture(TextureType::Sampler2D).unwrap();
        gl.context().take_calls();

        let call = DrawCall::new()
            .attribute("at1", &at1)
            .texture("normal", &normal)
            .texture("albedo", &albedo);
        program.draw_triangles(&gl, &call).unwrap();

        let calls = gl.context().calls();
        let texture_calls: Vec<&str> = calls
            .iter()
            .map(String::as_str)
            .filter(|c| c.starts_with("active_texture") || c.starts_with("uniform_1_i32"))
            .collect();
        assert_eq!(
            texture_calls,
            vec![
                "active_texture(0)",
                "uniform_1_i32(t_albedo@program-1, 0)",
                "active_texture(1)",
                "uniform_1_i32(t_normal@program-1, 1)",
            ]
        );
    }

    #[test]
    fn attribute_size_mismatch_fails_before_drawing() {
        let schema = minimal_schema().attribute("at2", AttributeType::Float);
        let (mut gl, program) = setup(schema);
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        let at2 = gl
            .create_attribute_buffer(AttributeType::Float, Some(&[0.0; 4]))
            .unwrap();
        let call = DrawCall::new().attribute("at1", &at1).attribute("at2", &at2);
        let err = program.draw_triangles(&gl, &call).unwrap_err();
        assert_eq!(
            err,
            DrawError::AttributeSizeMismatch {
                name: "at2".into(),
                expected: 3,
                found: 4
            }
        );
        assert!(!gl.context().calls().iter().any(|c| c.starts_with("draw_")));
    }

    #[test]
    fn no_attributes_is_an_error() {
        let (gl, program) = setup(minimal_schema());
        let call = DrawCall::new().uniform("un1", Mat2::IDENTITY);
        assert_eq!(
            program.draw_triangles(&gl, &call).unwrap_err(),
            DrawError::NoAttributeData
        );
        assert!(!gl.context().calls().iter().any(|c| c.starts_with("draw_")));
    }

    #[test]
    fn colliding_buffer_id_from_another_instance_is_invalid() {
        let (mut gl, program) = setup(minimal_schema());
        let local = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        let mut other = Gl::new(RecordingContext::new()).unwrap();
        let foreign = other
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 10]))
            .unwrap();
        assert_eq!(local.id().get(), foreign.id().get());
        gl.context().take_calls();

        let call = DrawCall::new().attribute("at1", &foreign);
        assert_eq!(
            program.draw_triangles(&gl, &call).unwrap_err(),
            DrawError::InvalidBufferReference(foreign.id())
        );
        assert!(!gl.context().calls().iter().any(|c| c.starts_with("draw_")));

        let call = DrawCall::new().attribute("at1", &local);
        program.draw_triangles(&gl, &call).unwrap();
        assert_eq!(
            gl.context().calls().last().unwrap(),
            "draw_arrays(Triangles, 0, 3)"
        );
    }

    #[test]
    fn colliding_index_buffer_id_from_another_instance_is_invalid() {
        let (mut gl, program) = setup(minimal_schema());
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        let local = gl.create_index_buffer(Some(&[0, 1, 2])).unwrap();
        let mut other = Gl::new(RecordingContext::new()).unwrap();
        other.create_attribute_buffer(AttributeType::Float, None).unwrap();
        let foreign = other.create_index_buffer(Some(&[0, 1, 2, 0, 2, 1])).unwrap();
        assert_eq!(local.id().get(), foreign.id().get());

        let call = DrawCall::new().attribute("at1", &at1).indices(&foreign);
        assert_eq!(
            program.draw_triangles(&gl, &call).unwrap_err(),
            DrawError::InvalidBufferReference(foreign.id())
        );
    }

    #[test]
    fn colliding_texture_id_from_another_instance_is_invalid() {
        let (mut gl, program) = setup(minimal_schema().texture("tx1", TextureType::Sampler2D));
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        let local = gl.create_texture(TextureType::Sampler2D).unwrap();
        let mut other = Gl::new(RecordingContext::new()).unwrap();
        let foreign = other.create_texture(TextureType::Sampler2D).unwrap();
        assert_eq!(local.id().get(), foreign.id().get());

        let call = DrawCall::new().attribute("at1", &at1).texture("tx1", &foreign);
        assert_eq!(
            program.draw_triangles(&gl, &call).unwrap_err(),
            DrawError::InvalidTextureReference(foreign.id())
        );
    }

    #[test]
    fn program_only_draws_through_its_own_instance() {
        let (_gl, program) = setup(minimal_schema());
        let mut other = Gl::new(RecordingContext::new()).unwrap();
        let at1 = other
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        other.context().take_calls();

        let call = DrawCall::new().attribute("at1", &at1);
        let err = program.draw_triangles(&other, &call).unwrap_err();
        assert!(matches!(err, DrawError::ForeignProgram { .. }), "got {err:?}");
        assert!(other.context().calls().is_empty());
    }

    #[test]
    fn undeclared_names_are_rejected() {
        let (mut gl, program) = setup(minimal_schema());
        let buf = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        let tex = gl.create_texture(TextureType::Sampler2D).unwrap();

        let call = DrawCall::new().attribute("nope", &buf);
        assert_eq!(
            program.draw_triangles(&gl, &call).unwrap_err(),
            DrawError::UnknownAttribute("nope".into())
        );

        let call = DrawCall::new().attribute("at1", &buf).texture("nope", &tex);
        assert_eq!(
            program.draw_triangles(&gl, &call).unwrap_err(),
            DrawError::UnknownTexture("nope".into())
        );
    }

    #[test]
    fn attribute_type_must_match_declaration() {
        let (mut gl, program) = setup(minimal_schema());
        let buf = gl
            .create_attribute_buffer(AttributeType::Vec3, Some(&[0.0; 9]))
            .unwrap();
        let call = DrawCall::new().attribute("at1", &buf);
        assert_eq!(
            program.draw_triangles(&gl, &call).unwrap_err(),
            DrawError::AttributeTypeMismatch {
                name: "at1".into(),
                declared: AttributeType::Vec2,
                found: AttributeType::Vec3
            }
        );
    }

    #[test]
    fn too_many_textures_exhaust_units() {
        let mut schema = minimal_schema();
        for i in 0..=MAX_TEXTURE_UNITS {
            schema = schema.texture(format!("t{i:02}"), TextureType::Sampler2D);
        }
        let (mut gl, program) = setup(schema);
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        let mut call = DrawCall::new().attribute("at1", &at1);
        for i in 0..=MAX_TEXTURE_UNITS {
            let tex = gl.create_texture(TextureType::Sampler2D).unwrap();
            call = call.texture(format!("t{i:02}"), &tex);
        }
        assert_eq!(
            program.draw_triangles(&gl, &call).unwrap_err(),
            DrawError::TextureUnitsExhausted { count: 33 }
        );
    }

    #[test]
    fn mismatched_and_unknown_uniforms_are_skipped() {
        let (mut gl, program) = setup(minimal_schema());
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        gl.context().take_calls();
        let call = DrawCall::new()
            .attribute("at1", &at1)
            .uniform("un1", 1.0_f32)
            .uniform("missing", 2.0_f32)
            .fragment_uniform("un1", 3.0_f32);
        program.draw_triangles(&gl, &call).unwrap();
        assert!(!gl.context().calls().iter().any(|c| c.starts_with("uniform")));
    }

    #[test]
    fn fragment_uniforms_use_their_own_table() {
        let schema = minimal_schema().fragment_uniform("tint", UniformType::Vec4);
        let (mut gl, program) = setup(schema);
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        gl.context().take_calls();
        let call = DrawCall::new()
            .attribute("at1", &at1)
            .fragment_uniform("tint", Vec4::new(1.0, 0.5, 0.25, 1.0));
        program.draw_triangles(&gl, &call).unwrap();
        assert!(gl
            .context()
            .calls()
            .contains(&"uniform_4_f32_slice(u_tint@program-1, [1.0, 0.5, 0.25, 1.0])".to_string()));
    }

    #[test]
    fn matrix_attributes_span_one_slot_per_column() {
        let schema = ProgramSchema::new().attribute("model", AttributeType::Mat3);
        let (mut gl, program) = setup(schema);
        let model = gl
            .create_attribute_buffer(AttributeType::Mat3, Some(&[0.0; 18]))
            .unwrap();
        gl.context().take_calls();
        program
            .draw_triangles(&gl, &DrawCall::new().attribute("model", &model))
            .unwrap();
        assert_eq!(
            gl.context().calls(),
            vec![
                "use_program(program-1)",
                "bind_buffer(Array, buffer-1)",
                "enable_vertex_attrib_array(0)",
                "vertex_attrib_pointer_f32(0, 3, 36, 0)",
                "enable_vertex_attrib_array(1)",
                "vertex_attrib_pointer_f32(1, 3, 36, 12)",
                "enable_vertex_attrib_array(2)",
                "vertex_attrib_pointer_f32(2, 3, 36, 24)",
                "draw_arrays(Triangles, 0, 2)",
            ]
        );
    }

    #[test]
    fn failed_draw_leaves_registry_usable() {
        let (mut gl, program) = setup(minimal_schema());
        let at1 = gl
            .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0; 6]))
            .unwrap();
        assert!(program.draw_triangles(&gl, &DrawCall::new()).is_err());
        assert_eq!(gl.buffer_size(at1.id()), Some(3));
        assert!(program
            .draw_triangles(&gl, &DrawCall::new().attribute("at1", &at1))
            .is_ok());
    }
}
