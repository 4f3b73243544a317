//! Headless context that records every state-changing call.
//!
//! `RecordingContext` never touches a GPU. Allocations hand out
//! deterministic handles (`program-1`, `vertex-shader-1`, `buffer-1`,
//! `texture-1`, ...) and every bind/upload/uniform/draw call is appended to a
//! log as one readable line, so a whole build-and-draw sequence can be
//! asserted with a single `assert_eq!`. Allocation and location queries are
//! not logged.
//!
//! [`RecordingOptions`] injects the failures a real driver can produce.

use super::{BufferTarget, GraphicsContext, ShaderStage, TextureSampling, Topology};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Failure injection for [`RecordingContext`].
#[derive(Debug, Clone, Default)]
pub struct RecordingOptions {
    /// Extensions reported as unavailable.
    pub unsupported_extensions: BTreeSet<String>,
    pub fail_program_creation: bool,
    /// Stage whose shader object cannot be allocated.
    pub fail_shader_creation: Option<ShaderStage>,
    pub fail_buffer_creation: bool,
    pub fail_texture_creation: bool,
    /// Shader identifiers (e.g. `a_position`, `u_view`) the "linker" dropped.
    /// Location queries for them return `None`.
    pub inactive_names: BTreeSet<String>,
    /// Info log returned for every compiled shader.
    pub info_log: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordedProgram(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordedShader {
    pub stage: ShaderStage,
    pub id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordedBuffer(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordedTexture(pub u32);

/// Uniform location: the program it belongs to plus the shader identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordedUniform {
    pub program: RecordedProgram,
    pub name: String,
}

impl fmt::Display for RecordedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program-{}", self.0)
    }
}

impl fmt::Display for RecordedShader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-shader-{}", self.stage, self.id)
    }
}

impl fmt::Display for RecordedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer-{}", self.0)
    }
}

impl fmt::Display for RecordedTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture-{}", self.0)
    }
}

impl fmt::Display for RecordedUniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.program)
    }
}

/// A [`GraphicsContext`] that logs calls instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingContext {
    options: RecordingOptions,
    calls: RefCell<Vec<String>>,
    next_program: Cell<u32>,
    next_shader: Cell<u32>,
    next_buffer: Cell<u32>,
    next_texture: Cell<u32>,
    /// Attribute slots handed out so far, per program.
    slots: RefCell<BTreeMap<(RecordedProgram, String), u32>>,
}

impl RecordingContext {
    /// A context on which every extension and allocation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with the given failures injected.
    pub fn with_options(options: RecordingOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Snapshot of the call log.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Drains the call log.
    pub fn take_calls(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    fn record(&self, line: String) {
        self.calls.borrow_mut().push(line);
    }

    fn next(counter: &Cell<u32>) -> u32 {
        let id = counter.get() + 1;
        counter.set(id);
        id
    }

    fn is_active(&self, name: &str) -> bool {
        !self.options.inactive_names.contains(name)
    }
}

impl GraphicsContext for RecordingContext {
    type Program = RecordedProgram;
    type Shader = RecordedShader;
    type Buffer = RecordedBuffer;
    type Texture = RecordedTexture;
    type UniformLocation = RecordedUniform;

    fn request_extension(&self, name: &str) -> bool {
        self.record(format!("request_extension({name:?})"));
        !self.options.unsupported_extensions.contains(name)
    }

    fn enable_alpha_blending(&self) {
        self.record("enable_alpha_blending()".to_string());
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(format!("viewport({x}, {y}, {width}, {height})"));
    }

    fn clear(&self, rgba: [f32; 4]) {
        self.record(format!("clear({rgba:?})"));
    }

    fn create_program(&self) -> Option<RecordedProgram> {
        if self.options.fail_program_creation {
            return None;
        }
        Some(RecordedProgram(Self::next(&self.next_program)))
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<RecordedShader> {
        if self.options.fail_shader_creation == Some(stage) {
            return None;
        }
        Some(RecordedShader {
            stage,
            id: Self::next(&self.next_shader),
        })
    }

    fn shader_source(&self, shader: RecordedShader, source: &str) {
        self.record(format!("shader_source({shader}, {source:?})"));
    }

    fn compile_shader(&self, shader: RecordedShader) {
        self.record(format!("compile_shader({shader})"));
    }

    fn shader_info_log(&self, _shader: RecordedShader) -> String {
        self.options.info_log.clone()
    }

    fn attach_shader(&self, program: RecordedProgram, shader: RecordedShader) {
        self.record(format!("attach_shader({program}, {shader})"));
    }

    fn link_program(&self, program: RecordedProgram) {
        self.record(format!("link_program({program})"));
    }

    fn use_program(&self, program: RecordedProgram) {
        self.record(format!("use_program({program})"));
    }

    fn attrib_location(&self, program: RecordedProgram, name: &str) -> Option<u32> {
        if !self.is_active(name) {
            return None;
        }
        let mut slots = self.slots.borrow_mut();
        let taken = slots.keys().filter(|(p, _)| *p == program).count() as u32;
        Some(*slots.entry((program, name.to_string())).or_insert(taken))
    }

    fn uniform_location(&self, program: RecordedProgram, name: &str) -> Option<RecordedUniform> {
        self.is_active(name).then(|| RecordedUniform {
            program,
            name: name.to_string(),
        })
    }

    fn create_buffer(&self) -> Option<RecordedBuffer> {
        if self.options.fail_buffer_creation {
            return None;
        }
        Some(RecordedBuffer(Self::next(&self.next_buffer)))
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: RecordedBuffer) {
        self.record(format!("bind_buffer({target:?}, {buffer})"));
    }

    fn buffer_data_f32(&self, target: BufferTarget, data: &[f32]) {
        self.record(format!("buffer_data_f32({target:?}, {data:?})"));
    }

    fn buffer_data_u32(&self, target: BufferTarget, data: &[u32]) {
        self.record(format!("buffer_data_u32({target:?}, {data:?})"));
    }

    fn create_texture(&self) -> Option<RecordedTexture> {
        if self.options.fail_texture_creation {
            return None;
        }
        Some(RecordedTexture(Self::next(&self.next_texture)))
    }

    fn active_texture(&self, unit: u32) {
        self.record(format!("active_texture({unit})"));
    }

    fn bind_texture(&self, texture: RecordedTexture) {
        self.record(format!("bind_texture({texture})"));
    }

    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        self.record(format!(
            "tex_image_rgba8({width}, {height}, {} bytes)",
            pixels.len()
        ));
    }

    fn generate_mipmap(&self) {
        self.record("generate_mipmap()".to_string());
    }

    fn tex_parameters(&self, sampling: TextureSampling) {
        self.record(format!("tex_parameters({sampling:?})"));
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        self.record(format!("enable_vertex_attrib_array({slot})"));
    }

    fn vertex_attrib_pointer_f32(&self, slot: u32, size: i32, stride: i32, offset: i32) {
        self.record(format!(
            "vertex_attrib_pointer_f32({slot}, {size}, {stride}, {offset})"
        ));
    }

    fn uniform_1_f32(&self, location: &RecordedUniform, x: f32) {
        self.record(format!("uniform_1_f32({location}, {x:?})"));
    }

    fn uniform_2_f32_slice(&self, location: &RecordedUniform, v: &[f32]) {
        self.record(format!("uniform_2_f32_slice({location}, {v:?})"));
    }

    fn uniform_3_f32_slice(&self, location: &RecordedUniform, v: &[f32]) {
        self.record(format!("uniform_3_f32_slice({location}, {v:?})"));
    }

    fn uniform_4_f32_slice(&self, location: &RecordedUniform, v: &[f32]) {
        self.record(format!("uniform_4_f32_slice({location}, {v:?})"));
    }

    fn uniform_1_i32(&self, location: &RecordedUniform, x: i32) {
        self.record(format!("uniform_1_i32({location}, {x})"));
    }

    fn uniform_2_i32_slice(&self, location: &RecordedUniform, v: &[i32]) {
        self.record(format!("uniform_2_i32_slice({location}, {v:?})"));
    }

    fn uniform_3_i32_slice(&self, location: &RecordedUniform, v: &[i32]) {
        self.record(format!("uniform_3_i32_slice({location}, {v:?})"));
    }

    fn uniform_4_i32_slice(&self, location: &RecordedUniform, v: &[i32]) {
        self.record(format!("uniform_4_i32_slice({location}, {v:?})"));
    }

    fn uniform_matrix_2_f32_slice(&self, location: &RecordedUniform, v: &[f32]) {
        self.record(format!("uniform_matrix_2_f32_slice({location}, {v:?})"));
    }

    fn uniform_matrix_3_f32_slice(&self, location: &RecordedUniform, v: &[f32]) {
        self.record(format!("uniform_matrix_3_f32_slice({location}, {v:?})"));
    }

    fn uniform_matrix_4_f32_slice(&self, location: &RecordedUniform, v: &[f32]) {
        self.record(format!("uniform_matrix_4_f32_slice({location}, {v:?})"));
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(format!("draw_arrays({topology:?}, {first}, {count})"));
    }

    fn draw_elements_u32(&self, topology: Topology, count: i32, offset: i32) {
        self.record(format!("draw_elements_u32({topology:?}, {count}, {offset})"));
    }
}
