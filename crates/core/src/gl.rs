//! The GL instance: context ownership, resource registries and uploads.

use crate::config::GlConfig;
use crate::context::{BufferTarget, GraphicsContext, TextureSampling};
use crate::error::GlError;
use crate::program::{Program, ProgramError, ProgramSource};
use crate::registry::{
    AttributeBuffer, BufferEntry, BufferId, BufferKind, IndexBuffer, InstanceId, Registry,
    TextureBuffer, TextureEntry, TextureId, FIRST_BUFFER_ID, FIRST_TEXTURE_ID,
};
use crate::texture::TextureImage;
use crate::types::{AttributeType, TextureType};
use std::fmt;

/// Extension that provides `UNSIGNED_INT` element indices on GLES2/WebGL1.
pub const INDEX_UINT_EXTENSION: &str = "OES_element_index_uint";

/// Clear color used when none is given: opaque black.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// One graphics context plus everything allocated through it.
///
/// Buffer and texture handles are only meaningful to the instance that
/// issued them. Ids are never reused.
pub struct Gl<C: GraphicsContext> {
    ctx: C,
    instance: InstanceId,
    config: GlConfig,
    buffers: Registry<BufferEntry<C::Buffer>>,
    textures: Registry<TextureEntry<C::Texture>>,
}

impl<C: GraphicsContext> Gl<C> {
    /// Wraps `ctx` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `GlError::UnsupportedExtension` if 32-bit indices are not
    /// available. No other context call is made in that case.
    pub fn new(ctx: C) -> Result<Self, GlError> {
        Self::with_config(ctx, GlConfig::default())
    }

    /// Wraps `ctx` with `config`.
    ///
    /// # Errors
    ///
    /// See [`Gl::new`].
    pub fn with_config(ctx: C, config: GlConfig) -> Result<Self, GlError> {
        if !ctx.request_extension(INDEX_UINT_EXTENSION) {
            return Err(GlError::UnsupportedExtension {
                extension: INDEX_UINT_EXTENSION.to_string(),
            });
        }
        if config.blend {
            ctx.enable_alpha_blending();
        }
        Ok(Self {
            ctx,
            instance: InstanceId::next(),
            config,
            buffers: Registry::new(FIRST_BUFFER_ID),
            textures: Registry::new(FIRST_TEXTURE_ID),
        })
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn into_context(self) -> C {
        self.ctx
    }

    pub fn config(&self) -> &GlConfig {
        &self.config
    }

    /// Tag carried by every handle and program this instance issues.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.ctx.viewport(x, y, width, height);
    }

    /// Clears color and depth. `None` clears to opaque black.
    pub fn clear(&self, color: Option<[f32; 4]>) {
        self.ctx.clear(color.unwrap_or(DEFAULT_CLEAR_COLOR));
    }

    /// Allocates a buffer for attributes of type `ty`, uploading `data` if
    /// given.
    ///
    /// # Errors
    ///
    /// `GlError::AttributeDataLength` if `data` is not a whole number of
    /// elements (checked before allocating), `GlError::BufferCreation` if
    /// the context cannot allocate.
    pub fn create_attribute_buffer(
        &mut self,
        ty: AttributeType,
        data: Option<&[f32]>,
    ) -> Result<AttributeBuffer, GlError> {
        if let Some(data) = data {
            check_attribute_len(ty, data)?;
        }
        let raw = self.ctx.create_buffer().ok_or(GlError::BufferCreation)?;
        let index = self.buffers.insert(BufferEntry {
            raw,
            kind: BufferKind::Attribute(ty),
            size: 0,
        });
        let id = BufferId::new(self.instance, index);
        log::debug!("created {ty} attribute {id}");

        let handle = AttributeBuffer {
            id,
            element_type: ty,
        };
        if let Some(data) = data {
            self.buffer_attribute_data(&handle, data)?;
        }
        Ok(handle)
    }

    /// Allocates an index buffer, uploading `data` if given.
    ///
    /// # Errors
    ///
    /// `GlError::BufferCreation` if the context cannot allocate.
    pub fn create_index_buffer(&mut self, data: Option<&[u32]>) -> Result<IndexBuffer, GlError> {
        let raw = self.ctx.create_buffer().ok_or(GlError::BufferCreation)?;
        let index = self.buffers.insert(BufferEntry {
            raw,
            kind: BufferKind::Indices,
            size: 0,
        });
        let id = BufferId::new(self.instance, index);
        log::debug!("created index {id}");

        let handle = IndexBuffer { id };
        if let Some(data) = data {
            self.buffer_index_data(&handle, data)?;
        }
        Ok(handle)
    }

    /// Replaces the contents of an attribute buffer. Its size becomes the
    /// number of whole elements in `data`.
    ///
    /// # Errors
    ///
    /// `GlError::AttributeDataLength` if `data.len()` is not a multiple of
    /// the element's component count; nothing is uploaded.
    /// `GlError::InvalidBufferReference` if the handle is not from this
    /// instance.
    pub fn buffer_attribute_data(
        &mut self,
        handle: &AttributeBuffer,
        data: &[f32],
    ) -> Result<(), GlError> {
        let entry = self
            .buffers
            .get_mut(handle.id.index)
            .filter(|_| handle.id.instance == self.instance)
            .ok_or(GlError::InvalidBufferReference(handle.id))?;
        let BufferKind::Attribute(ty) = entry.kind else {
            return Err(GlError::InvalidBufferReference(handle.id));
        };
        entry.size = check_attribute_len(ty, data)?;
        self.ctx.bind_buffer(BufferTarget::Array, entry.raw);
        self.ctx.buffer_data_f32(BufferTarget::Array, data);
        Ok(())
    }

    /// Replaces the contents of an index buffer. Its size becomes
    /// `data.len()`.
    ///
    /// # Errors
    ///
    /// `GlError::InvalidBufferReference` if the handle is not from this
    /// instance.
    pub fn buffer_index_data(&mut self, handle: &IndexBuffer, data: &[u32]) -> Result<(), GlError> {
        let entry = self
            .buffers
            .get_mut(handle.id.index)
            .filter(|entry| {
                handle.id.instance == self.instance && entry.kind == BufferKind::Indices
            })
            .ok_or(GlError::InvalidBufferReference(handle.id))?;
        entry.size = data.len();
        self.ctx.bind_buffer(BufferTarget::ElementArray, entry.raw);
        self.ctx.buffer_data_u32(BufferTarget::ElementArray, data);
        Ok(())
    }

    /// Elements last uploaded to buffer `id`: vertices for attribute
    /// buffers, indices for index buffers.
    pub fn buffer_size(&self, id: BufferId) -> Option<usize> {
        self.buffer_entry(id).map(|entry| entry.size)
    }

    /// Allocates an empty texture.
    ///
    /// # Errors
    ///
    /// `GlError::TextureCreation` if the context cannot allocate.
    pub fn create_texture(&mut self, ty: TextureType) -> Result<TextureBuffer, GlError> {
        let raw = self.ctx.create_texture().ok_or(GlError::TextureCreation)?;
        let index = self.textures.insert(TextureEntry {
            raw,
            texture_type: ty,
            dimensions: None,
        });
        let id = TextureId::new(self.instance, index);
        log::debug!("created {ty} {id}");
        Ok(TextureBuffer {
            id,
            texture_type: ty,
        })
    }

    /// Uploads `image` to a texture and sets its sampling state.
    ///
    /// # Errors
    ///
    /// `GlError::TextureDataLength` if the pixel data does not match the
    /// dimensions, `GlError::InvalidTextureReference` if the handle is not
    /// from this instance.
    pub fn upload_texture(
        &mut self,
        handle: &TextureBuffer,
        image: &TextureImage<'_>,
    ) -> Result<(), GlError> {
        image.validate()?;
        let entry = self
            .textures
            .get_mut(handle.id.index)
            .filter(|_| handle.id.instance == self.instance)
            .ok_or(GlError::InvalidTextureReference(handle.id))?;

        self.ctx.bind_texture(entry.raw);
        self.ctx.tex_image_rgba8(image.width, image.height, image.pixels);
        let sampling = image.sampling();
        if sampling == TextureSampling::Mipmapped {
            self.ctx.generate_mipmap();
        }
        self.ctx.tex_parameters(sampling);
        entry.dimensions = Some((image.width, image.height));
        Ok(())
    }

    /// `(width, height)` of the last upload to texture `id`.
    pub fn texture_dimensions(&self, id: TextureId) -> Option<(u32, u32)> {
        self.texture_entry(id).and_then(|entry| entry.dimensions)
    }

    /// Assembles, compiles and links `source`, resolving every location.
    /// The program can only draw through this instance.
    ///
    /// # Errors
    ///
    /// Any [`ProgramError`].
    pub fn create_program(&self, source: ProgramSource) -> Result<Program<C>, ProgramError> {
        Program::build(&self.ctx, self.instance, &self.config, source)
    }

    pub(crate) fn buffer_entry(&self, id: BufferId) -> Option<&BufferEntry<C::Buffer>> {
        if id.instance != self.instance {
            return None;
        }
        self.buffers.get(id.index)
    }

    pub(crate) fn texture_entry(&self, id: TextureId) -> Option<&TextureEntry<C::Texture>> {
        if id.instance != self.instance {
            return None;
        }
        self.textures.get(id.index)
    }
}

impl<C: GraphicsContext + fmt::Debug> fmt::Debug for Gl<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gl")
            .field("ctx", &self.ctx)
            .field("instance", &self.instance)
            .field("config", &self.config)
            .field("buffers", &self.buffers.len())
            .field("textures", &self.textures.len())
            .finish()
    }
}

/// Number of whole `ty` elements in `data`.
fn check_attribute_len(ty: AttributeType, data: &[f32]) -> Result<usize, GlError> {
    let components = ty.component_count();
    if data.len() % components != 0 {
        return Err(GlError::AttributeDataLength {
            ty,
            components,
            len: data.len(),
        });
    }
    Ok(data.len() / components)
}
