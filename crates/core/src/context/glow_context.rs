//! `glow::Context` adapter.
//!
//! This module is only available when the `render` feature is enabled.
//! `GlowContext` wraps a live `glow::Context` and implements
//! [`GraphicsContext`] by forwarding to the raw GL calls.

use super::{BufferTarget, GraphicsContext, ShaderStage, TextureSampling, Topology};
use glow::HasContext;

/// Wraps a `glow::Context` so the typed program layer can drive it.
pub struct GlowContext {
    gl: glow::Context,
}

impl GlowContext {
    /// Wraps the given GL context.
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Consumes this wrapper and returns the underlying `glow::Context`.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }

    /// Whether this context provides unsigned 32-bit element indices without
    /// an extension: desktop GL always does, GLES/WebGL from 3.0 on.
    fn has_core_u32_indices(&self) -> bool {
        let version = self.gl.version();
        !version.is_embedded || version.major >= 3
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn draw_mode(topology: Topology) -> u32 {
    match topology {
        Topology::Triangles => glow::TRIANGLES,
        Topology::TriangleStrip => glow::TRIANGLE_STRIP,
    }
}

fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

#[allow(unsafe_code)]
impl GraphicsContext for GlowContext {
    type Program = glow::Program;
    type Shader = glow::Shader;
    type Buffer = glow::Buffer;
    type Texture = glow::Texture;
    type UniformLocation = glow::UniformLocation;

    fn request_extension(&self, name: &str) -> bool {
        if name == crate::gl::INDEX_UINT_EXTENSION && self.has_core_u32_indices() {
            return true;
        }
        self.gl.supported_extensions().contains(name)
    }

    fn enable_alpha_blending(&self) {
        // SAFETY: fixed capability and blend-factor enums.
        unsafe {
            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        // SAFETY: plain state setter; GL rejects negative sizes itself.
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear(&self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        // SAFETY: plain state setters with fixed buffer-bit masks.
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn create_program(&self) -> Option<glow::Program> {
        // SAFETY: allocation call with no preconditions.
        unsafe { self.gl.create_program() }
            .map_err(|e| log::error!("glCreateProgram failed: {e}"))
            .ok()
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<glow::Shader> {
        // SAFETY: allocation call with no preconditions.
        unsafe { self.gl.create_shader(shader_type(stage)) }
            .map_err(|e| log::error!("glCreateShader({stage}) failed: {e}"))
            .ok()
    }

    fn shader_source(&self, shader: glow::Shader, source: &str) {
        // SAFETY: the handle was issued by this context.
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: glow::Shader) {
        // SAFETY: the handle was issued by this context.
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        // SAFETY: the handle was issued by this context.
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        // SAFETY: the handle was issued by this context.
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: glow::Program) {
        // SAFETY: the handle was issued by this context.
        unsafe { self.gl.link_program(program) }
    }

    fn use_program(&self, program: glow::Program) {
        // SAFETY: the handle was issued by this context.
        unsafe { self.gl.use_program(Some(program)) }
    }

    fn attrib_location(&self, program: glow::Program, name: &str) -> Option<u32> {
        // SAFETY: query on a program handle issued by this context.
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: glow::Program, name: &str) -> Option<glow::UniformLocation> {
        // SAFETY: query on a program handle issued by this context.
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn create_buffer(&self) -> Option<glow::Buffer> {
        // SAFETY: allocation call with no preconditions.
        unsafe { self.gl.create_buffer() }
            .map_err(|e| log::error!("glCreateBuffer failed: {e}"))
            .ok()
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: glow::Buffer) {
        // SAFETY: the handle was issued by this context.
        unsafe { self.gl.bind_buffer(buffer_target(target), Some(buffer)) }
    }

    fn buffer_data_f32(&self, target: BufferTarget, data: &[f32]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        // SAFETY: `bytes` borrows `data` for the duration of the call and GL
        // copies it into the buffer bound to `target` before returning.
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), bytes, glow::STATIC_DRAW)
        }
    }

    fn buffer_data_u32(&self, target: BufferTarget, data: &[u32]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        // SAFETY: `bytes` borrows `data` for the duration of the call and GL
        // copies it into the buffer bound to `target` before returning.
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), bytes, glow::STATIC_DRAW)
        }
    }

    fn create_texture(&self) -> Option<glow::Texture> {
        // SAFETY: allocation call with no preconditions.
        unsafe { self.gl.create_texture() }
            .map_err(|e| log::error!("glCreateTexture failed: {e}"))
            .ok()
    }

    fn active_texture(&self, unit: u32) {
        // SAFETY: `unit` is below the 32 units a draw may address.
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, texture: glow::Texture) {
        // SAFETY: the handle was issued by this context.
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, Some(texture)) }
    }

    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            log::error!("texture upload skipped: {width}x{height} exceeds GLsizei");
            return;
        };
        // SAFETY: `pixels` holds exactly `width * height * 4` bytes (checked by
        // `TextureImage::validate`), matching RGBA/UNSIGNED_BYTE with the
        // default unpack alignment, and outlives the call.
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                w,
                h,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );
        }
    }

    fn generate_mipmap(&self) {
        // SAFETY: only called after a power-of-two image was uploaded to the
        // bound texture.
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    fn tex_parameters(&self, sampling: TextureSampling) {
        // SAFETY: fixed parameter enums on the bound TEXTURE_2D.
        unsafe {
            match sampling {
                TextureSampling::Mipmapped => {
                    self.gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_MIN_FILTER,
                        glow::LINEAR_MIPMAP_LINEAR as i32,
                    );
                }
                TextureSampling::ClampLinear => {
                    self.gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_WRAP_S,
                        glow::CLAMP_TO_EDGE as i32,
                    );
                    self.gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_WRAP_T,
                        glow::CLAMP_TO_EDGE as i32,
                    );
                    self.gl.tex_parameter_i32(
                        glow::TEXTURE_2D,
                        glow::TEXTURE_MIN_FILTER,
                        glow::LINEAR as i32,
                    );
                }
            }
        }
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        // SAFETY: `slot` was resolved on the linked program.
        unsafe { self.gl.enable_vertex_attrib_array(slot) }
    }

    fn vertex_attrib_pointer_f32(&self, slot: u32, size: i32, stride: i32, offset: i32) {
        // SAFETY: an ARRAY_BUFFER is bound before every call, so `offset`
        // is a byte offset into that buffer.
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(slot, size, glow::FLOAT, false, stride, offset)
        }
    }

    fn uniform_1_f32(&self, location: &glow::UniformLocation, x: f32) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_1_f32(Some(location), x) }
    }

    fn uniform_2_f32_slice(&self, location: &glow::UniformLocation, v: &[f32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_2_f32_slice(Some(location), v) }
    }

    fn uniform_3_f32_slice(&self, location: &glow::UniformLocation, v: &[f32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_3_f32_slice(Some(location), v) }
    }

    fn uniform_4_f32_slice(&self, location: &glow::UniformLocation, v: &[f32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_4_f32_slice(Some(location), v) }
    }

    fn uniform_1_i32(&self, location: &glow::UniformLocation, x: i32) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_1_i32(Some(location), x) }
    }

    fn uniform_2_i32_slice(&self, location: &glow::UniformLocation, v: &[i32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_2_i32_slice(Some(location), v) }
    }

    fn uniform_3_i32_slice(&self, location: &glow::UniformLocation, v: &[i32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_3_i32_slice(Some(location), v) }
    }

    fn uniform_4_i32_slice(&self, location: &glow::UniformLocation, v: &[i32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_4_i32_slice(Some(location), v) }
    }

    fn uniform_matrix_2_f32_slice(&self, location: &glow::UniformLocation, v: &[f32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_matrix_2_f32_slice(Some(location), false, v) }
    }

    fn uniform_matrix_3_f32_slice(&self, location: &glow::UniformLocation, v: &[f32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_matrix_3_f32_slice(Some(location), false, v) }
    }

    fn uniform_matrix_4_f32_slice(&self, location: &glow::UniformLocation, v: &[f32]) {
        // SAFETY: `location` was resolved on the program this context is using.
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(location), false, v) }
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        // SAFETY: every enabled attribute slot points into a bound buffer
        // holding `count` vertices.
        unsafe { self.gl.draw_arrays(draw_mode(topology), first, count) }
    }

    fn draw_elements_u32(&self, topology: Topology, count: i32, offset: i32) {
        // SAFETY: the caller binds an ELEMENT_ARRAY_BUFFER holding at least
        // `count` u32 indices first, so `offset` addresses buffer memory and
        // never a client pointer.
        unsafe {
            self.gl
                .draw_elements(draw_mode(topology), count, glow::UNSIGNED_INT, offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_context_implements_graphics_context() {
        // Compile-time check; passes if the module compiles.
        fn _assert_impl<C: GraphicsContext>() {}
        _assert_impl::<GlowContext>();
    }

    #[test]
    fn enum_mappings_use_gl_constants() {
        assert_eq!(buffer_target(BufferTarget::Array), glow::ARRAY_BUFFER);
        assert_eq!(
            buffer_target(BufferTarget::ElementArray),
            glow::ELEMENT_ARRAY_BUFFER
        );
        assert_eq!(draw_mode(Topology::Triangles), glow::TRIANGLES);
        assert_eq!(draw_mode(Topology::TriangleStrip), glow::TRIANGLE_STRIP);
        assert_eq!(shader_type(ShaderStage::Vertex), glow::VERTEX_SHADER);
        assert_eq!(shader_type(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn gl_instance_builds_on_live_context() {
        // Would test: Gl::new(GlowContext::new(gl)) succeeds and a
        // one-attribute program links and draws without GL errors.
    }
}
