//! Resource registry: opaque integer handles over context-owned objects.
//!
//! A [`Registry`] is an arena. Inserting appends to a growable store and
//! returns `first_id + index`, so ids are issued monotonically and are never
//! reused (there is no disposal). The GL instance owns one registry per
//! resource class: buffers start at id 1, textures at id 0.
//!
//! Handles ([`AttributeBuffer`], [`IndexBuffer`], [`TextureBuffer`]) are small
//! `Copy` values. Their ids carry the [`InstanceId`] of the GL instance that
//! issued them, so two instances never resolve each other's handles even
//! when the per-instance counters coincide. The registry entry behind a handle is the only owner of
//! the underlying context object and of the element count last uploaded.

use crate::types::{AttributeType, TextureType};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// First id issued for buffers.
pub const FIRST_BUFFER_ID: u32 = 1;
/// First id issued for textures.
pub const FIRST_TEXTURE_ID: u32 = 0;

/// Growable indexed store with monotonically increasing ids.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    first_id: u32,
    entries: Vec<T>,
}

impl<T> Registry<T> {
    /// Creates an empty registry whose first issued id is `first_id`.
    pub fn new(first_id: u32) -> Self {
        Self {
            first_id,
            entries: Vec::new(),
        }
    }

    /// Stores `value` and returns its id.
    pub fn insert(&mut self, value: T) -> u32 {
        let id = self.first_id + self.entries.len() as u32;
        self.entries.push(value);
        id
    }

    fn index(&self, id: u32) -> Option<usize> {
        id.checked_sub(self.first_id).map(|i| i as usize)
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.index(id).and_then(|i| self.entries.get(i))
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.index(id).and_then(move |i| self.entries.get_mut(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(1);

/// Process-unique tag of one GL instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u32);

impl InstanceId {
    /// Issues a tag no other instance in this process holds.
    pub(crate) fn next() -> Self {
        InstanceId(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gl-{}", self.0)
    }
}

/// Registry key of a buffer, scoped to the issuing instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId {
    pub(crate) instance: InstanceId,
    pub(crate) index: u32,
}

/// Registry key of a texture, scoped to the issuing instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId {
    pub(crate) instance: InstanceId,
    pub(crate) index: u32,
}

impl BufferId {
    pub(crate) fn new(instance: InstanceId, index: u32) -> Self {
        Self { instance, index }
    }

    /// The per-instance counter value.
    pub fn get(self) -> u32 {
        self.index
    }

    pub fn instance(self) -> InstanceId {
        self.instance
    }
}

impl TextureId {
    pub(crate) fn new(instance: InstanceId, index: u32) -> Self {
        Self { instance, index }
    }

    /// The per-instance counter value.
    pub fn get(self) -> u32 {
        self.index
    }

    pub fn instance(self) -> InstanceId {
        self.instance
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer #{}", self.index)
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture #{}", self.index)
    }
}

/// What a buffer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Per-vertex float data of the given element type.
    Attribute(AttributeType),
    /// Unsigned 32-bit element indices.
    Indices,
}

/// Registry entry for a buffer.
#[derive(Debug, Clone)]
pub struct BufferEntry<B> {
    pub raw: B,
    pub kind: BufferKind,
    /// Elements last uploaded: vertices for attribute buffers, indices for
    /// index buffers.
    pub size: usize,
}

/// Registry entry for a texture.
#[derive(Debug, Clone)]
pub struct TextureEntry<T> {
    pub raw: T,
    pub texture_type: TextureType,
    /// `(width, height)` of the last upload, if any.
    pub dimensions: Option<(u32, u32)>,
}

/// Handle to a per-vertex attribute buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeBuffer {
    pub(crate) id: BufferId,
    pub(crate) element_type: AttributeType,
}

impl AttributeBuffer {
    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn element_type(&self) -> AttributeType {
        self.element_type
    }
}

/// Handle to an element index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexBuffer {
    pub(crate) id: BufferId,
}

impl IndexBuffer {
    pub fn id(&self) -> BufferId {
        self.id
    }
}

/// Handle to a 2D texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureBuffer {
    pub(crate) id: TextureId,
    pub(crate) texture_type: TextureType,
}

impl TextureBuffer {
    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn texture_type(&self) -> TextureType {
        self.texture_type
    }
}
