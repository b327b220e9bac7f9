//! Memory-bounded storage of decoded texture tiles.
//!
//! The store is layered: [`TextureResolver`] maps tile keys to textures
//! across the scene's flattened assembly hierarchy, [`TextureTileSwapper`]
//! decodes and color-converts tiles while accounting for their memory
//! footprint, and the generic [`TileCache`] keeps the resident set
//! bounded with reference-counted LRU eviction. [`TextureStore`] wires
//! the three together behind one handle-based API.

mod cache;
mod config;
mod record;
mod resolver;
mod size;
mod stats;
mod swapper;
mod system;
mod types;

pub use cache::{Swapper, TileCache};
pub use config::{ParamMetadata, TileStoreConfig, DEFAULT_MAX_SIZE, SUGGESTED_UI_MAX_SIZE};
pub use record::{TileHandle, TileRecord};
pub use resolver::TextureResolver;
pub use size::{format_bytes, format_size, parse_size, Size, SizeParseError};
pub use stats::{StoreStats, StoreStatistics};
pub use swapper::TextureTileSwapper;
pub use system::TextureStore;
pub use types::{ContainerId, StoreError, TileKey};
