//! Resolution of tile keys to the textures that own them.

use crate::scene::{Assembly, AssemblyId, Scene, Texture};
use crate::store::types::{ContainerId, StoreError, TileKey};
use std::collections::HashMap;
use std::sync::Arc;

/// Maps tile keys to their owning textures.
///
/// Assemblies can nest arbitrarily, so the resolver flattens the whole
/// assembly tree into one id-indexed map with a depth-first walk at
/// construction time. The walk runs once, before any rendering thread
/// touches the store; afterwards the map is read-only and lookups are
/// constant time at any nesting depth.
pub struct TextureResolver {
    scene: Arc<Scene>,
    assemblies: HashMap<AssemblyId, Arc<Assembly>>,
}

impl TextureResolver {
    /// Build a resolver over the given scene.
    pub fn new(scene: Arc<Scene>) -> Self {
        let mut assemblies = HashMap::new();
        for assembly in scene.assemblies() {
            gather_assemblies(assembly, &mut assemblies);
        }
        Self { scene, assemblies }
    }

    /// Find the texture that owns the keyed tile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AssemblyNotFound`] or
    /// [`StoreError::TextureNotFound`] if the key and the scene
    /// disagree. Both indicate an inconsistency upstream and are fatal.
    pub fn resolve(&self, key: &TileKey) -> Result<&dyn Texture, StoreError> {
        let textures = match key.container {
            ContainerId::Scene => self.scene.textures(),
            ContainerId::Assembly(id) => self
                .assemblies
                .get(&id)
                .ok_or(StoreError::AssemblyNotFound(id))?
                .textures(),
        };

        textures.get(key.texture).ok_or(StoreError::TextureNotFound {
            texture: key.texture,
            container: key.container,
        })
    }

    /// Number of assemblies reachable from the scene.
    pub fn assembly_count(&self) -> usize {
        self.assemblies.len()
    }
}

fn gather_assemblies(assembly: &Arc<Assembly>, map: &mut HashMap<AssemblyId, Arc<Assembly>>) {
    map.insert(assembly.id(), Arc::clone(assembly));
    for child in assembly.assemblies() {
        gather_assemblies(child, map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GradientTexture;

    #[test]
    fn test_resolves_scene_level_texture() {
        let mut scene = Scene::new();
        let texture_id = scene.add_texture(Box::new(GradientTexture::new("ground.exr", 4, 4)));

        let resolver = TextureResolver::new(Arc::new(scene));
        let texture = resolver.resolve(&TileKey::scene(texture_id, 0, 0)).unwrap();

        assert_eq!(texture.display_path(), "ground.exr");
    }

    #[test]
    fn test_resolves_assembly_local_texture() {
        let mut scene = Scene::new();
        let mut assembly = Assembly::new();
        let texture_id = assembly.add_texture(Box::new(GradientTexture::new("bark.exr", 4, 4)));
        let assembly_id = scene.add_assembly(assembly);

        let resolver = TextureResolver::new(Arc::new(scene));
        let key = TileKey::assembly(assembly_id, texture_id, 0, 0);

        assert_eq!(resolver.resolve(&key).unwrap().display_path(), "bark.exr");
    }

    #[test]
    fn test_resolves_deeply_nested_assembly() {
        let mut scene = Scene::new();
        let mut outer = Assembly::new();
        let mut inner = Assembly::new();
        let texture_id = inner.add_texture(Box::new(GradientTexture::new("leaf.exr", 4, 4)));
        let inner_id = outer.add_assembly(inner);
        scene.add_assembly(outer);

        let resolver = TextureResolver::new(Arc::new(scene));
        let key = TileKey::assembly(inner_id, texture_id, 0, 0);

        assert_eq!(resolver.resolve(&key).unwrap().display_path(), "leaf.exr");
        assert_eq!(resolver.assembly_count(), 2);
    }

    #[test]
    fn test_unknown_assembly_is_an_error() {
        let scene = Scene::new();
        let resolver = TextureResolver::new(Arc::new(scene));

        let bogus_assembly = AssemblyId(u64::MAX);
        let bogus_texture = crate::scene::TextureId(u64::MAX - 1);
        let key = TileKey::assembly(bogus_assembly, bogus_texture, 0, 0);

        assert!(matches!(
            resolver.resolve(&key),
            Err(StoreError::AssemblyNotFound(id)) if id == bogus_assembly
        ));
    }

    #[test]
    fn test_unknown_texture_is_an_error() {
        let mut scene = Scene::new();
        scene.add_texture(Box::new(GradientTexture::new("ground.exr", 4, 4)));

        let resolver = TextureResolver::new(Arc::new(scene));
        let bogus = crate::scene::TextureId(u64::MAX);
        let key = TileKey::scene(bogus, 0, 0);

        assert!(matches!(
            resolver.resolve(&key),
            Err(StoreError::TextureNotFound { texture, .. }) if texture == bogus
        ));
    }

    #[test]
    fn test_texture_id_is_scoped_to_its_container() {
        // A texture registered in an assembly is not visible through a
        // scene-level key, even though ids are globally unique.
        let mut scene = Scene::new();
        let mut assembly = Assembly::new();
        let texture_id = assembly.add_texture(Box::new(GradientTexture::new("bark.exr", 4, 4)));
        scene.add_assembly(assembly);

        let resolver = TextureResolver::new(Arc::new(scene));
        let key = TileKey::scene(texture_id, 0, 0);

        assert!(matches!(
            resolver.resolve(&key),
            Err(StoreError::TextureNotFound { .. })
        ));
    }
}
