#![deny(unsafe_code)]
//! Typed shader programs over an immediate-mode graphics context.
//!
//! Declare a program's interface once as a [`ProgramSchema`], let the
//! crate generate the GLSL declarations, compile and link, and resolve every
//! location up front. Each frame, [`Program::draw_triangles`] rebinds the
//! buffers, uniforms and textures named in a [`DrawCall`] and issues the
//! draw.
//!
//! ```
//! use typed_gl_core::{
//!     AttributeType, DrawCall, Gl, ProgramSchema, ProgramSource, RecordingContext, UniformType,
//! };
//!
//! let mut gl = Gl::new(RecordingContext::new()).unwrap();
//! let schema = ProgramSchema::new()
//!     .attribute("position", AttributeType::Vec2)
//!     .uniform("scale", UniformType::Float);
//! let program = gl
//!     .create_program(ProgramSource::new(
//!         schema,
//!         |n| format!(
//!             "void main() {{ gl_Position = vec4({} * {}, 0.0, 1.0); }}",
//!             n.attributes["position"], n.uniforms["scale"]
//!         ),
//!         |_| "void main() { gl_FragColor = vec4(1.0); }".to_string(),
//!     ))
//!     .unwrap();
//!
//! let positions = gl
//!     .create_attribute_buffer(AttributeType::Vec2, Some(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]))
//!     .unwrap();
//! program
//!     .draw_triangles(&gl, &DrawCall::new().attribute("position", &positions).uniform("scale", 0.5_f32))
//!     .unwrap();
//! assert_eq!(gl.context().calls().last().unwrap(), "draw_arrays(Triangles, 0, 3)");
//! ```
//!
//! # Modules
//!
//! - [`types`] -- the closed GLSL type catalog.
//! - [`schema`] -- program interface declaration.
//! - [`shader`] -- source assembly and compilation.
//! - [`program`] -- build and location resolution.
//! - [`draw`] -- per-frame dispatch.
//! - [`gl`] -- context ownership and resource registries.
//! - [`context`] -- the graphics capability trait and its implementations.

pub mod config;
pub mod context;
pub mod draw;
pub mod error;
pub mod gl;
pub mod program;
pub mod registry;
pub mod schema;
pub mod shader;
pub mod texture;
pub mod types;
pub mod uniform;

pub use config::{GlConfig, Precision};
#[cfg(feature = "render")]
pub use context::glow_context::GlowContext;
pub use context::recording::{RecordingContext, RecordingOptions};
pub use context::{GraphicsContext, ShaderStage, Topology};
pub use draw::{DrawCall, DrawError};
pub use error::GlError;
pub use gl::Gl;
pub use program::{Program, ProgramError, ProgramSource};
pub use registry::{AttributeBuffer, BufferId, IndexBuffer, InstanceId, TextureBuffer, TextureId};
pub use schema::ProgramSchema;
pub use shader::{FragmentNames, ShaderSources, VertexNames};
pub use texture::TextureImage;
pub use types::{AttributeType, TextureType, TypeParseError, UniformType, VaryingType};
pub use uniform::UniformValue;
