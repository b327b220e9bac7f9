//! The texture store facade.

use crate::scene::Scene;
use crate::store::cache::TileCache;
use crate::store::config::TileStoreConfig;
use crate::store::record::TileHandle;
use crate::store::stats::StoreStatistics;
use crate::store::swapper::TextureTileSwapper;
use crate::store::types::{StoreError, TileKey};
use crate::tile::TileData;
use std::fmt;
use std::sync::Arc;

/// Shared, memory-bounded store of decoded texture tiles.
///
/// The store hands out reference-counted handles to tiles that have
/// been decoded and converted to linear RGB. Tiles stay resident while
/// any handle is alive; once all handles are dropped a tile becomes a
/// candidate for least-recently-used eviction the next time the store
/// runs over its memory budget.
///
/// The store is safe to share across render threads behind an `Arc`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use texstore::scene::{GradientTexture, Scene};
/// use texstore::store::{TextureStore, TileKey};
///
/// let mut scene = Scene::new();
/// let texture = scene.add_texture(Box::new(GradientTexture::new("grad.exr", 16, 16)));
/// let store = TextureStore::new(Arc::new(scene))?;
///
/// let tile = store.acquire(TileKey::scene(texture, 0, 0))?;
/// assert_eq!(tile.width(), 16);
/// # Ok::<(), texstore::store::StoreError>(())
/// ```
pub struct TextureStore {
    cache: TileCache<TextureTileSwapper>,
    config: TileStoreConfig,
}

impl fmt::Debug for TextureStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TextureStore {
    /// Create a store over the given scene with the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the default
    /// configuration has been made invalid, which cannot happen through
    /// this constructor.
    pub fn new(scene: Arc<Scene>) -> Result<Self, StoreError> {
        Self::with_config(scene, TileStoreConfig::default())
    }

    /// Create a store over the given scene with an explicit
    /// configuration.
    ///
    /// The scene's assembly hierarchy is flattened here, before any
    /// render thread touches the store; the scene must not change for
    /// the store's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the configuration fails
    /// validation, for example a zero memory budget.
    pub fn with_config(scene: Arc<Scene>, config: TileStoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let swapper = TextureTileSwapper::new(scene, config.clone());
        Ok(Self {
            cache: TileCache::new(swapper),
            config,
        })
    }

    /// Get a handle to the given tile, decoding it on a cache miss.
    ///
    /// The tile's pixels are in linear RGB regardless of the source
    /// texture's color space. The handle keeps the tile resident until
    /// dropped.
    ///
    /// # Errors
    ///
    /// Fails if the key does not resolve to a texture in the scene, if
    /// the texture cannot decode the tile, or if the tile's channel
    /// count supports no color conversion. All of these indicate an
    /// unusable scene and abort the render interaction that hit them.
    pub fn acquire(&self, key: TileKey) -> Result<TileHandle<TileData>, StoreError> {
        self.cache.acquire(key)
    }

    /// Whether the given tile is currently resident.
    pub fn contains(&self, key: &TileKey) -> bool {
        self.cache.contains(key)
    }

    /// Number of tiles currently resident.
    pub fn resident_tiles(&self) -> usize {
        self.cache.resident_count()
    }

    /// Total footprint of resident tiles in bytes.
    pub fn memory_size(&self) -> usize {
        self.cache.memory_size()
    }

    /// Highest footprint observed since the store was created.
    pub fn peak_memory_size(&self) -> usize {
        self.cache.peak_memory_size()
    }

    /// The configured memory budget in bytes.
    pub fn max_size(&self) -> usize {
        self.config.max_size
    }

    /// The configuration the store was created with.
    pub fn config(&self) -> &TileStoreConfig {
        &self.config
    }

    /// Take a consistent snapshot of the store's statistics.
    pub fn statistics(&self) -> StoreStatistics {
        self.cache.statistics()
    }
}
