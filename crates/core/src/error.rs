//! Errors raised by the GL instance: construction, allocation and uploads.
//!
//! Program building and drawing have their own error types,
//! [`ProgramError`](crate::program::ProgramError) and
//! [`DrawError`](crate::draw::DrawError).

use crate::registry::{BufferId, TextureId};
use crate::types::AttributeType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlError {
    /// A capability the instance depends on is missing.
    #[error("Device does not support 32-bit indices ({extension} unavailable)")]
    UnsupportedExtension { extension: String },

    /// The context could not allocate a buffer object.
    #[error("failed to create buffer")]
    BufferCreation,

    /// The context could not allocate a texture object.
    #[error("failed to create texture")]
    TextureCreation,

    /// Attribute data whose length is not a whole number of elements.
    #[error(
        "buffer data for attribute does not contain a multiple of {components} elements \
         which is required for attributes of type {ty} (got {len})"
    )]
    AttributeDataLength {
        ty: AttributeType,
        components: usize,
        len: usize,
    },

    /// RGBA8 pixel data whose length does not match the image dimensions.
    /// `expected` is `None` when the dimensions themselves are too large to
    /// upload.
    #[error(
        "texture data for a {width}x{height} RGBA image must be {}, got {len}",
        expected_bytes(.expected)
    )]
    TextureDataLength {
        width: u32,
        height: u32,
        expected: Option<usize>,
        len: usize,
    },

    /// A buffer handle that this instance did not issue, or of the wrong kind.
    #[error("invalid buffer reference: {0}")]
    InvalidBufferReference(BufferId),

    /// A texture handle that this instance did not issue.
    #[error("invalid texture reference: {0}")]
    InvalidTextureReference(TextureId),
}

fn expected_bytes(expected: &Option<usize>) -> String {
    match expected {
        Some(n) => format!("{n} bytes"),
        None => "addressable, but its dimensions exceed the GL size limit".to_string(),
    }
}
