//! Core types and errors for the texture store.

use crate::color::ColorError;
use crate::scene::{AssemblyId, TextureError, TextureId};
use std::fmt;
use thiserror::Error;

/// The namespace a texture lives in: the scene itself or one of its
/// assemblies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerId {
    /// The scene-level texture namespace.
    Scene,
    /// The local namespace of the assembly with the given id.
    Assembly(AssemblyId),
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Scene => write!(f, "scene"),
            ContainerId::Assembly(id) => write!(f, "assembly {}", id),
        }
    }
}

/// Key identifying one tile of one texture in the store.
///
/// Keys are ordered and hashable so they can index the resident map and
/// iterate deterministically; equality requires all four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    /// Namespace the texture belongs to
    pub container: ContainerId,
    /// Texture within that namespace
    pub texture: TextureId,
    /// Tile column in the texture's tile grid
    pub tile_x: usize,
    /// Tile row in the texture's tile grid
    pub tile_y: usize,
}

impl TileKey {
    /// Create a key for a tile of a scene-level texture.
    pub fn scene(texture: TextureId, tile_x: usize, tile_y: usize) -> Self {
        Self {
            container: ContainerId::Scene,
            texture,
            tile_x,
            tile_y,
        }
    }

    /// Create a key for a tile of an assembly-local texture.
    pub fn assembly(assembly: AssemblyId, texture: TextureId, tile_x: usize, tile_y: usize) -> Self {
        Self {
            container: ContainerId::Assembly(assembly),
            texture,
            tile_x,
            tile_y,
        }
    }
}

/// Errors raised while loading tiles into the store.
///
/// All of these are fatal for the render interaction that triggered
/// them: configuration errors mean the texture setup is unusable, and
/// lookup failures mean the scene and the requested key disagree.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store configuration is unusable
    #[error("invalid texture store configuration: {0}")]
    InvalidConfig(String),

    /// The key names an assembly the scene does not contain
    #[error("assembly {0} not found in the scene")]
    AssemblyNotFound(AssemblyId),

    /// The key names a texture its container does not hold
    #[error("texture {texture} not found in {container}")]
    TextureNotFound {
        texture: TextureId,
        container: ContainerId,
    },

    /// The texture failed to decode the requested tile
    #[error("texture decode failed: {0}")]
    Texture(#[from] TextureError),

    /// The decoded tile could not be converted to the working space
    #[error("color conversion failed for texture \"{path}\": {source}")]
    Conversion { path: String, source: ColorError },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture_id(raw: u64) -> TextureId {
        TextureId(raw)
    }

    fn assembly_id(raw: u64) -> AssemblyId {
        AssemblyId(raw)
    }

    #[test]
    fn test_scene_key_equality() {
        let a = TileKey::scene(texture_id(7), 1, 2);
        let b = TileKey::scene(texture_id(7), 1, 2);
        let c = TileKey::scene(texture_id(7), 2, 1);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_keys_differ_across_containers() {
        let scene_key = TileKey::scene(texture_id(7), 0, 0);
        let assembly_key = TileKey::assembly(assembly_id(3), texture_id(7), 0, 0);
        assert_ne!(scene_key, assembly_key);
    }

    #[test]
    fn test_keys_differ_across_assemblies() {
        let a = TileKey::assembly(assembly_id(3), texture_id(7), 0, 0);
        let b = TileKey::assembly(assembly_id(4), texture_id(7), 0, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_ordering_is_total_and_deterministic() {
        let mut keys = vec![
            TileKey::assembly(assembly_id(2), texture_id(5), 0, 0),
            TileKey::scene(texture_id(9), 0, 0),
            TileKey::scene(texture_id(5), 1, 0),
            TileKey::scene(texture_id(5), 0, 0),
        ];
        keys.sort();

        // Scene keys sort before assembly keys, then by texture and
        // tile coordinates.
        assert_eq!(keys[0], TileKey::scene(texture_id(5), 0, 0));
        assert_eq!(keys[1], TileKey::scene(texture_id(5), 1, 0));
        assert_eq!(keys[2], TileKey::scene(texture_id(9), 0, 0));
        assert_eq!(keys[3], TileKey::assembly(assembly_id(2), texture_id(5), 0, 0));
    }

    #[test]
    fn test_container_display() {
        assert_eq!(ContainerId::Scene.to_string(), "scene");
        assert_eq!(ContainerId::Assembly(assembly_id(12)).to_string(), "assembly 12");
    }

    #[test]
    fn test_store_error_messages() {
        let err = StoreError::TextureNotFound {
            texture: texture_id(8),
            container: ContainerId::Scene,
        };
        assert_eq!(err.to_string(), "texture 8 not found in scene");

        let err = StoreError::AssemblyNotFound(assembly_id(4));
        assert_eq!(err.to_string(), "assembly 4 not found in the scene");
    }
}
