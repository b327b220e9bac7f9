//! Load and unload policy for texture tiles.

use crate::color::convert_tile_to_linear;
use crate::scene::Scene;
use crate::store::cache::Swapper;
use crate::store::config::TileStoreConfig;
use crate::store::record::TileRecord;
use crate::store::resolver::TextureResolver;
use crate::store::size::format_bytes;
use crate::store::types::{StoreError, TileKey};
use crate::tile::TileData;
use std::sync::Arc;

/// Swapper that decodes texture tiles and converts them to linear RGB.
///
/// Loading resolves the key to its texture, decodes the tile, converts
/// the color channels in place, and adds the tile's footprint to the
/// running store size. Unloading is the mirror image and refuses while
/// the record still has owners. The cache serializes all calls, so the
/// footprint counters are plain integers.
pub struct TextureTileSwapper {
    resolver: TextureResolver,
    config: TileStoreConfig,
    memory_size: usize,
    peak_memory_size: usize,
}

impl TextureTileSwapper {
    /// Create a swapper over the given scene.
    ///
    /// Flattens the scene's assembly hierarchy up front; the scene must
    /// not gain assemblies or textures afterwards.
    pub fn new(scene: Arc<Scene>, config: TileStoreConfig) -> Self {
        Self {
            resolver: TextureResolver::new(scene),
            config,
            memory_size: 0,
            peak_memory_size: 0,
        }
    }

    fn trace_store_size(&self) {
        let limit = self.config.max_size;
        if self.memory_size > limit {
            tracing::debug!(
                "texture store size is {}, exceeding capacity {} by {}",
                format_bytes(self.memory_size),
                format_bytes(limit),
                format_bytes(self.memory_size - limit)
            );
        } else {
            tracing::debug!(
                "texture store size is {}, below capacity {} by {}",
                format_bytes(self.memory_size),
                format_bytes(limit),
                format_bytes(limit - self.memory_size)
            );
        }
    }
}

impl Swapper for TextureTileSwapper {
    type Key = TileKey;
    type Payload = TileData;
    type Error = StoreError;

    fn load(&mut self, key: &TileKey) -> Result<TileData, StoreError> {
        let texture = self.resolver.resolve(key)?;

        if self.config.track_tile_loading {
            tracing::debug!(
                "loading tile ({}, {}) from texture \"{}\"...",
                key.tile_x,
                key.tile_y,
                texture.display_path()
            );
        }

        let mut tile = texture.decode_tile(key.tile_x, key.tile_y)?;

        convert_tile_to_linear(texture.color_space(), &mut tile).map_err(|source| {
            StoreError::Conversion {
                path: texture.display_path().to_string(),
                source,
            }
        })?;

        self.memory_size += tile.memory_size();
        self.peak_memory_size = self.peak_memory_size.max(self.memory_size);

        if self.config.track_store_size {
            self.trace_store_size();
        }

        Ok(tile)
    }

    fn unload(&mut self, key: &TileKey, record: &TileRecord<TileData>) -> bool {
        if record.owners() > 0 {
            return false;
        }

        let tile_size = record.data().memory_size();
        debug_assert!(self.memory_size >= tile_size);
        self.memory_size -= tile_size;

        // The scene is frozen while the store exists, so resolution can
        // only fail here if the record outlived its scene. The memory
        // accounting above already happened either way.
        let texture = match self.resolver.resolve(key) {
            Ok(texture) => texture,
            Err(err) => {
                tracing::error!("texture missing during tile unload: {}", err);
                return true;
            }
        };

        if self.config.track_tile_unloading {
            tracing::debug!(
                "unloading tile ({}, {}) from texture \"{}\"...",
                key.tile_x,
                key.tile_y,
                texture.display_path()
            );
        }

        texture.release_tile(key.tile_x, key.tile_y, record.data());
        true
    }

    fn memory_size(&self) -> usize {
        self.memory_size
    }

    fn peak_memory_size(&self) -> usize {
        self.peak_memory_size
    }

    fn over_budget(&self) -> bool {
        self.memory_size > self.config.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSpace;
    use crate::scene::{GradientTexture, Texture, TextureError, TextureId};
    use crate::store::types::ContainerId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Texture producing constant-value tiles and counting decode and
    /// release calls.
    struct CountingTexture {
        width: usize,
        height: usize,
        channels: usize,
        value: f32,
        decodes: Arc<AtomicUsize>,
        releases: Arc<AtomicUsize>,
    }

    impl CountingTexture {
        fn new(width: usize, height: usize, channels: usize, value: f32) -> Self {
            Self {
                width,
                height,
                channels,
                value,
                decodes: Arc::new(AtomicUsize::new(0)),
                releases: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl Texture for CountingTexture {
        fn decode_tile(&self, _tile_x: usize, _tile_y: usize) -> Result<TileData, TextureError> {
            self.decodes.fetch_add(1, Ordering::Relaxed);
            let count = self.width * self.height * self.channels;
            Ok(TileData::from_pixels(
                self.width,
                self.height,
                self.channels,
                vec![self.value; count],
            ))
        }

        fn release_tile(&self, _tile_x: usize, _tile_y: usize, _tile: &TileData) {
            self.releases.fetch_add(1, Ordering::Relaxed);
        }

        fn color_space(&self) -> ColorSpace {
            ColorSpace::LinearRgb
        }

        fn display_path(&self) -> &str {
            "counting"
        }
    }

    fn scene_with_texture(texture: impl Texture + 'static) -> (Arc<Scene>, TextureId) {
        let mut scene = Scene::new();
        let id = scene.add_texture(Box::new(texture));
        (Arc::new(scene), id)
    }

    #[test]
    fn test_load_decodes_and_accounts_footprint() {
        let (scene, id) = scene_with_texture(CountingTexture::new(4, 4, 3, 0.25));
        let mut swapper = TextureTileSwapper::new(scene, TileStoreConfig::default());

        let key = TileKey::scene(id, 0, 0);
        let tile = swapper.load(&key).unwrap();

        assert_eq!(tile.pixel_count(), 16);
        assert_eq!(swapper.memory_size(), tile.memory_size());
        assert_eq!(swapper.peak_memory_size(), tile.memory_size());
        assert!(!swapper.over_budget());
    }

    #[test]
    fn test_load_converts_srgb_to_linear() {
        // A 3x1 gradient tile carries a mid-gray sample that changes
        // under the sRGB transfer function.
        let texture = GradientTexture::new("grad.exr", 3, 1).with_color_space(ColorSpace::Srgb);
        let (scene, id) = scene_with_texture(texture);
        let mut swapper = TextureTileSwapper::new(scene, TileStoreConfig::default());

        let tile = swapper.load(&TileKey::scene(id, 0, 0)).unwrap();

        let [red, _, _] = tile.pixel3(1);
        assert!((red - 0.214_041).abs() < 1e-5);
    }

    #[test]
    fn test_load_unknown_texture_fails() {
        let (scene, _) = scene_with_texture(CountingTexture::new(4, 4, 3, 0.0));
        let mut swapper = TextureTileSwapper::new(scene, TileStoreConfig::default());

        let key = TileKey::scene(TextureId(999), 0, 0);
        let err = swapper.load(&key).unwrap_err();

        assert!(matches!(err, StoreError::TextureNotFound { .. }));
        assert_eq!(swapper.memory_size(), 0);
    }

    #[test]
    fn test_load_unknown_assembly_fails() {
        let (scene, id) = scene_with_texture(CountingTexture::new(4, 4, 3, 0.0));
        let mut swapper = TextureTileSwapper::new(scene, TileStoreConfig::default());

        let key = TileKey {
            container: ContainerId::Assembly(crate::scene::AssemblyId(42)),
            texture: id,
            tile_x: 0,
            tile_y: 0,
        };
        let err = swapper.load(&key).unwrap_err();

        assert!(matches!(err, StoreError::AssemblyNotFound(_)));
    }

    #[test]
    fn test_load_rejects_unconvertible_channel_count() {
        let texture = CountingTexture::new(4, 4, 1, 0.5);
        let (scene, id) = scene_with_texture(texture);
        let mut swapper = TextureTileSwapper::new(scene, TileStoreConfig::default());

        let err = swapper.load(&TileKey::scene(id, 0, 0)).unwrap_err();

        assert!(matches!(err, StoreError::Conversion { .. }));
        assert!(err.to_string().contains("channel count 1"));
        // The failed tile never reached the footprint counters.
        assert_eq!(swapper.memory_size(), 0);
    }

    #[test]
    fn test_unload_refuses_referenced_record() {
        let (scene, id) = scene_with_texture(CountingTexture::new(4, 4, 3, 0.0));
        let mut swapper = TextureTileSwapper::new(scene, TileStoreConfig::default());

        let key = TileKey::scene(id, 0, 0);
        let tile = swapper.load(&key).unwrap();
        let size = swapper.memory_size();

        let record = TileRecord::new(tile);
        record.add_owner();

        assert!(!swapper.unload(&key, &record));
        assert_eq!(swapper.memory_size(), size);

        record.remove_owner();
    }

    #[test]
    fn test_unload_subtracts_footprint_and_releases() {
        let texture = CountingTexture::new(4, 4, 3, 0.0);
        let releases = Arc::clone(&texture.releases);
        let (scene, id) = scene_with_texture(texture);
        let mut swapper = TextureTileSwapper::new(scene, TileStoreConfig::default());

        let key = TileKey::scene(id, 0, 0);
        let tile = swapper.load(&key).unwrap();
        let peak = swapper.peak_memory_size();
        let record = TileRecord::new(tile);

        assert!(swapper.unload(&key, &record));
        assert_eq!(swapper.memory_size(), 0);
        assert_eq!(swapper.peak_memory_size(), peak);
        assert_eq!(releases.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_footprint_sums_over_resident_tiles() {
        let (scene, id) = scene_with_texture(CountingTexture::new(8, 8, 4, 0.0));
        let mut swapper = TextureTileSwapper::new(scene, TileStoreConfig::default());

        let first = swapper.load(&TileKey::scene(id, 0, 0)).unwrap();
        let second = swapper.load(&TileKey::scene(id, 1, 0)).unwrap();

        assert_eq!(
            swapper.memory_size(),
            first.memory_size() + second.memory_size()
        );
    }

    #[test]
    fn test_over_budget_reflects_configured_limit() {
        let (scene, id) = scene_with_texture(CountingTexture::new(8, 8, 3, 0.0));
        // One 8x8x3 float tile is 768 bytes.
        let config = TileStoreConfig::default().with_max_size(1000);
        let mut swapper = TextureTileSwapper::new(scene, config);

        let _first = swapper.load(&TileKey::scene(id, 0, 0)).unwrap();
        assert!(!swapper.over_budget());

        let _second = swapper.load(&TileKey::scene(id, 1, 0)).unwrap();
        assert!(swapper.over_budget());
    }
}
