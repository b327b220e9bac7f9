//! Assemblies: nested scene containers with their own texture namespace.

use crate::scene::next_unique_id;
use crate::scene::texture::{Texture, TextureContainer, TextureId};
use std::fmt;
use std::sync::Arc;

/// Identifier of an assembly within the scene.
///
/// Allocated from the same process-wide counter as texture ids, so
/// assembly ids are unique across the whole scene tree regardless of
/// nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(pub(crate) u64);

impl fmt::Display for AssemblyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A nested container of textures and child assemblies.
///
/// Assemblies are built single-threaded, attached to their parent (or
/// to the scene) by value, and never mutated once the scene is shared
/// with rendering threads.
pub struct Assembly {
    id: AssemblyId,
    textures: TextureContainer,
    assemblies: Vec<Arc<Assembly>>,
}

impl Default for Assembly {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembly {
    /// Create an empty assembly with a fresh id.
    pub fn new() -> Self {
        Self {
            id: AssemblyId(next_unique_id()),
            textures: TextureContainer::new(),
            assemblies: Vec::new(),
        }
    }

    /// This assembly's id.
    pub fn id(&self) -> AssemblyId {
        self.id
    }

    /// The assembly's local texture namespace.
    pub fn textures(&self) -> &TextureContainer {
        &self.textures
    }

    /// Register a texture in this assembly's namespace.
    pub fn add_texture(&mut self, texture: Box<dyn Texture>) -> TextureId {
        self.textures.insert(texture)
    }

    /// Child assemblies nested under this one.
    pub fn assemblies(&self) -> &[Arc<Assembly>] {
        &self.assemblies
    }

    /// Attach a child assembly and return its id.
    pub fn add_assembly(&mut self, child: Assembly) -> AssemblyId {
        let id = child.id();
        self.assemblies.push(Arc::new(child));
        id
    }
}
