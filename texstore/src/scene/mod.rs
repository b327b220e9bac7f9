//! Scene model: top-level texture namespace and nested assemblies.
//!
//! A scene is built single-threaded, wrapped in an [`Arc`], and shared
//! immutably with the texture store and the rendering threads. The type
//! system enforces the build-then-freeze lifecycle: once the scene is
//! behind an `Arc` there is no way to obtain `&mut` access again.

mod assembly;
mod procedural;
mod texture;

pub use assembly::{Assembly, AssemblyId};
pub use procedural::{CheckerTexture, GradientTexture};
pub use texture::{Texture, TextureContainer, TextureError, TextureId};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Allocate the next scene-entity id from the process-wide counter.
pub(crate) fn next_unique_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// The root container of textures and assemblies.
pub struct Scene {
    textures: TextureContainer,
    assemblies: Vec<Arc<Assembly>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            textures: TextureContainer::new(),
            assemblies: Vec::new(),
        }
    }

    /// The scene-level texture namespace.
    pub fn textures(&self) -> &TextureContainer {
        &self.textures
    }

    /// Register a texture in the scene-level namespace.
    pub fn add_texture(&mut self, texture: Box<dyn Texture>) -> TextureId {
        self.textures.insert(texture)
    }

    /// Top-level assemblies attached to the scene.
    pub fn assemblies(&self) -> &[Arc<Assembly>] {
        &self.assemblies
    }

    /// Attach a top-level assembly and return its id.
    pub fn add_assembly(&mut self, assembly: Assembly) -> AssemblyId {
        let id = assembly.id();
        self.assemblies.push(Arc::new(assembly));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_are_monotonic() {
        let first = next_unique_id();
        let second = next_unique_id();
        assert!(second > first);
    }

    #[test]
    fn test_scene_level_texture_lookup() {
        let mut scene = Scene::new();
        let id = scene.add_texture(Box::new(GradientTexture::new("ground.exr", 4, 4)));

        let texture = scene.textures().get(id).unwrap();
        assert_eq!(texture.display_path(), "ground.exr");
    }

    #[test]
    fn test_scene_holds_nested_assemblies() {
        let mut scene = Scene::new();
        let mut outer = Assembly::new();
        let inner = Assembly::new();
        let inner_id = inner.id();

        outer.add_assembly(inner);
        let outer_id = scene.add_assembly(outer);

        assert_eq!(scene.assemblies().len(), 1);
        let outer_ref = &scene.assemblies()[0];
        assert_eq!(outer_ref.id(), outer_id);
        assert_eq!(outer_ref.assemblies()[0].id(), inner_id);
    }

    #[test]
    fn test_texture_ids_unique_across_containers() {
        let mut scene = Scene::new();
        let mut assembly = Assembly::new();

        let scene_texture = scene.add_texture(Box::new(GradientTexture::new("a.exr", 4, 4)));
        let assembly_texture = assembly.add_texture(Box::new(GradientTexture::new("b.exr", 4, 4)));

        assert_ne!(scene_texture, assembly_texture);
    }
}
