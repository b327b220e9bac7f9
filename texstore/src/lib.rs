//! TexStore - Memory-bounded texture tile storage for renderers
//!
//! This library decodes texture tiles on demand, converts them to the
//! linear RGB working space, and keeps the decoded set under a memory
//! budget with reference-counted LRU eviction. Textures live either at
//! scene level or inside nested assemblies; the store resolves both
//! through a single key type.
//!
//! # High-Level API
//!
//! For most use cases, the [`store::TextureStore`] facade is the entry
//! point:
//!
//! ```
//! use std::sync::Arc;
//! use texstore::scene::{CheckerTexture, Scene};
//! use texstore::store::{TextureStore, TileKey, TileStoreConfig};
//!
//! let mut scene = Scene::new();
//! let checker = scene.add_texture(Box::new(CheckerTexture::new("check.exr", 64, 64)));
//!
//! let config = TileStoreConfig::default().with_max_size(64 * 1024 * 1024);
//! let store = TextureStore::with_config(Arc::new(scene), config)?;
//!
//! // Tiles come back in linear RGB and stay resident while held.
//! let tile = store.acquire(TileKey::scene(checker, 0, 0))?;
//! assert_eq!(tile.channels(), 3);
//! # Ok::<(), texstore::store::StoreError>(())
//! ```

pub mod color;
pub mod logging;
pub mod scene;
pub mod store;
pub mod tile;

/// Version of the TexStore library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
