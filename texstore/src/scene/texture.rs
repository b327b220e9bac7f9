//! Texture trait and per-container texture registry.

use crate::color::ColorSpace;
use crate::scene::next_unique_id;
use crate::tile::TileData;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Identifier of a texture within the scene.
///
/// Allocated from a process-wide counter, so every texture id is unique
/// across all containers of all scenes built in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub(crate) u64);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors surfaced by texture implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// Requested tile coordinates outside the texture's tile grid
    #[error("tile ({x}, {y}) out of range for texture \"{path}\"")]
    TileOutOfRange { x: usize, y: usize, path: String },

    /// The texture failed to produce pixel data for the tile
    #[error("failed to decode tile ({x}, {y}) of texture \"{path}\": {reason}")]
    Decode {
        x: usize,
        y: usize,
        path: String,
        reason: String,
    },
}

/// A tiled texture resource.
///
/// Implementors expose decoded pixel blocks on demand; how the pixels
/// are produced (file formats, procedural generation) is outside the
/// store's concern. Implementations must be safe to share across
/// rendering threads.
pub trait Texture: Send + Sync {
    /// Decodes the pixels of tile `(tile_x, tile_y)`.
    ///
    /// # Returns
    ///
    /// A freshly allocated tile in the texture's native color space.
    fn decode_tile(&self, tile_x: usize, tile_y: usize) -> Result<TileData, TextureError>;

    /// Notifies the texture that a previously decoded tile is being
    /// dropped from the store.
    ///
    /// The default implementation does nothing; textures that track
    /// decoded tiles can override it.
    fn release_tile(&self, tile_x: usize, tile_y: usize, tile: &TileData) {
        let _ = (tile_x, tile_y, tile);
    }

    /// The color space the decoded pixels are expressed in.
    fn color_space(&self) -> ColorSpace;

    /// Path or name used to identify the texture in logs and errors.
    fn display_path(&self) -> &str;
}

/// Texture registry owned by the scene or by an assembly.
#[derive(Default)]
pub struct TextureContainer {
    textures: HashMap<TextureId, Box<dyn Texture>>,
}

impl TextureContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture and return its freshly allocated id.
    pub fn insert(&mut self, texture: Box<dyn Texture>) -> TextureId {
        let id = TextureId(next_unique_id());
        self.textures.insert(id, texture);
        id
    }

    /// Look up a texture by id.
    pub fn get(&self, id: TextureId) -> Option<&dyn Texture> {
        self.textures.get(&id).map(|texture| texture.as_ref())
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the container holds no textures.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
