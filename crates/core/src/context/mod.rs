//! The graphics-context capability surface the core is written against.
//!
//! [`GraphicsContext`] is the black box: it allocates GPU objects, compiles
//! and links programs, resolves locations, uploads data, sets uniforms and
//! issues draws. Methods take `&self` like `glow::HasContext`; the context
//! carries exactly one implicit "current" program, one binding per buffer
//! target, one active texture unit and one bound 2D texture, and every
//! `use_*`/`bind_*`/`active_*` call overwrites that slot. Callers sharing a
//! context must therefore serialize their draws.
//!
//! # Implementations
//!
//! - [`recording::RecordingContext`] -- headless context that logs every call.
//! - [`glow_context::GlowContext`] -- `glow::Context` adapter (feature `render`).

#[cfg(feature = "render")]
pub mod glow_context;
pub mod recording;

use std::fmt;

/// Shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Lowercase stage name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Buffer binding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (`ARRAY_BUFFER`).
    Array,
    /// Index data (`ELEMENT_ARRAY_BUFFER`).
    ElementArray,
}

/// Primitive topology of a triangle draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    Triangles,
    TriangleStrip,
}

/// Sampling state applied to the currently bound 2D texture after an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSampling {
    /// Power-of-two images: `LINEAR_MIPMAP_LINEAR` minification after
    /// mipmap generation.
    Mipmapped,
    /// Any other size: `CLAMP_TO_EDGE` on both axes, `LINEAR` minification.
    ClampLinear,
}

/// Immediate-mode graphics operations consumed by [`Gl`](crate::Gl) and
/// [`Program`](crate::Program).
///
/// Allocation methods return `None` when the context cannot provide the
/// object. Location lookups return `None` when the name is absent from the
/// linked program (a negative attribute slot counts as absent).
pub trait GraphicsContext {
    type Program: Copy + fmt::Debug;
    type Shader: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type Texture: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    /// Enables the named extension, returning whether it is available.
    fn request_extension(&self, name: &str) -> bool;
    /// Enables blending with `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`.
    fn enable_alpha_blending(&self);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Clears color and depth, color to `rgba`.
    fn clear(&self, rgba: [f32; 4]);

    fn create_program(&self) -> Option<Self::Program>;
    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    /// Compiler diagnostics; empty when the compiler had nothing to say.
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn use_program(&self, program: Self::Program);
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Self::Buffer);
    /// Uploads to the buffer bound at `target` with a static-usage hint.
    fn buffer_data_f32(&self, target: BufferTarget, data: &[f32]);
    /// Uploads to the buffer bound at `target` with a static-usage hint.
    fn buffer_data_u32(&self, target: BufferTarget, data: &[u32]);

    fn create_texture(&self) -> Option<Self::Texture>;
    /// Selects texture unit `unit` (0 is `TEXTURE0`).
    fn active_texture(&self, unit: u32);
    /// Binds `texture` to `TEXTURE_2D` on the active unit.
    fn bind_texture(&self, texture: Self::Texture);
    /// Uploads tightly packed RGBA8 pixels to the bound 2D texture.
    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]);
    fn generate_mipmap(&self);
    fn tex_parameters(&self, sampling: TextureSampling);

    fn enable_vertex_attrib_array(&self, slot: u32);
    /// Describes the float layout of `slot` within the bound array buffer.
    /// `stride` and `offset` are in bytes; data is never normalized.
    fn vertex_attrib_pointer_f32(&self, slot: u32, size: i32, stride: i32, offset: i32);

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    fn uniform_2_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]);
    fn uniform_3_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]);
    fn uniform_4_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]);
    fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32);
    fn uniform_2_i32_slice(&self, location: &Self::UniformLocation, v: &[i32]);
    fn uniform_3_i32_slice(&self, location: &Self::UniformLocation, v: &[i32]);
    fn uniform_4_i32_slice(&self, location: &Self::UniformLocation, v: &[i32]);
    /// Column-major, never transposed.
    fn uniform_matrix_2_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]);
    /// Column-major, never transposed.
    fn uniform_matrix_3_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]);
    /// Column-major, never transposed.
    fn uniform_matrix_4_f32_slice(&self, location: &Self::UniformLocation, v: &[f32]);

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);
    /// Indexed draw from the bound element buffer with `u32` indices.
    fn draw_elements_u32(&self, topology: Topology, count: i32, offset: i32);
}
