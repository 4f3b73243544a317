//! GLSL generation and compilation.
//!
//! - [`names`] -- role prefixes and the name tables handed to shader bodies.
//! - [`assembler`] -- declaration blocks plus bodies, pure text.
//! - [`compile`] -- per-stage compilation with diagnostic logging.

pub mod assembler;
pub mod compile;
pub mod names;

pub use assembler::{assemble, stage_names, ShaderSources, RESERVED_FRAGMENT_UNIFORM};
pub use compile::{compile_shader, format_shader_error};
pub use names::{FragmentNames, NameTable, Role, VertexNames};
