//! Procedural textures for tools and tests.
//!
//! These generate deterministic pixel data without touching the
//! filesystem, standing in for image-backed textures wherever the store
//! needs something to decode.

use crate::color::ColorSpace;
use crate::scene::texture::{Texture, TextureError};
use crate::tile::TileData;

/// A texture whose tiles are filled with a coordinate-driven gradient.
///
/// Red follows the x axis, green the y axis, and blue encodes the tile's
/// position in the grid, so every tile of every texture is distinct and
/// reproducible.
pub struct GradientTexture {
    path: String,
    color_space: ColorSpace,
    channels: usize,
    tile_width: usize,
    tile_height: usize,
    tiles_x: usize,
    tiles_y: usize,
}

impl GradientTexture {
    /// Create a single-tile RGB gradient texture in sRGB.
    pub fn new(path: impl Into<String>, tile_width: usize, tile_height: usize) -> Self {
        Self {
            path: path.into(),
            color_space: ColorSpace::Srgb,
            channels: 3,
            tile_width,
            tile_height,
            tiles_x: 1,
            tiles_y: 1,
        }
    }

    /// Set the color space the generated pixels claim to be in.
    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Set the channel count (3 or 4).
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Set the number of tiles along each axis.
    pub fn with_grid(mut self, tiles_x: usize, tiles_y: usize) -> Self {
        self.tiles_x = tiles_x;
        self.tiles_y = tiles_y;
        self
    }

    /// Number of tiles along the x axis.
    pub fn tiles_x(&self) -> usize {
        self.tiles_x
    }

    /// Number of tiles along the y axis.
    pub fn tiles_y(&self) -> usize {
        self.tiles_y
    }
}

impl Texture for GradientTexture {
    fn decode_tile(&self, tile_x: usize, tile_y: usize) -> Result<TileData, TextureError> {
        if tile_x >= self.tiles_x || tile_y >= self.tiles_y {
            return Err(TextureError::TileOutOfRange {
                x: tile_x,
                y: tile_y,
                path: self.path.clone(),
            });
        }

        let mut tile = TileData::new(self.tile_width, self.tile_height, self.channels);
        let x_denom = (self.tile_width - 1).max(1) as f32;
        let y_denom = (self.tile_height - 1).max(1) as f32;
        let tile_count = (self.tiles_x * self.tiles_y).max(1) as f32;
        let blue = (tile_y * self.tiles_x + tile_x) as f32 / tile_count;

        for y in 0..self.tile_height {
            for x in 0..self.tile_width {
                let index = y * self.tile_width + x;
                let red = x as f32 / x_denom;
                let green = y as f32 / y_denom;
                if self.channels == 4 {
                    tile.set_pixel4(index, [red, green, blue, 1.0]);
                } else {
                    tile.set_pixel3(index, [red, green, blue]);
                }
            }
        }

        Ok(tile)
    }

    fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    fn display_path(&self) -> &str {
        &self.path
    }
}

/// A texture whose tiles are filled with a two-color checkerboard.
pub struct CheckerTexture {
    path: String,
    color_space: ColorSpace,
    tile_width: usize,
    tile_height: usize,
    tiles_x: usize,
    tiles_y: usize,
    cell_size: usize,
    color_a: [f32; 3],
    color_b: [f32; 3],
}

impl CheckerTexture {
    /// Create a single-tile black and white checkerboard in linear RGB.
    pub fn new(path: impl Into<String>, tile_width: usize, tile_height: usize) -> Self {
        Self {
            path: path.into(),
            color_space: ColorSpace::LinearRgb,
            tile_width,
            tile_height,
            tiles_x: 1,
            tiles_y: 1,
            cell_size: 8,
            color_a: [0.0, 0.0, 0.0],
            color_b: [1.0, 1.0, 1.0],
        }
    }

    /// Set the color space the generated pixels claim to be in.
    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Set the number of tiles along each axis.
    pub fn with_grid(mut self, tiles_x: usize, tiles_y: usize) -> Self {
        self.tiles_x = tiles_x;
        self.tiles_y = tiles_y;
        self
    }

    /// Set the checker cell edge length in pixels.
    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size.max(1);
        self
    }

    /// Set the two checker colors.
    pub fn with_colors(mut self, color_a: [f32; 3], color_b: [f32; 3]) -> Self {
        self.color_a = color_a;
        self.color_b = color_b;
        self
    }
}

impl Texture for CheckerTexture {
    fn decode_tile(&self, tile_x: usize, tile_y: usize) -> Result<TileData, TextureError> {
        if tile_x >= self.tiles_x || tile_y >= self.tiles_y {
            return Err(TextureError::TileOutOfRange {
                x: tile_x,
                y: tile_y,
                path: self.path.clone(),
            });
        }

        let mut tile = TileData::new(self.tile_width, self.tile_height, 3);
        // Cell parity continues seamlessly across tile boundaries.
        let base_x = tile_x * self.tile_width;
        let base_y = tile_y * self.tile_height;

        for y in 0..self.tile_height {
            for x in 0..self.tile_width {
                let cell_x = (base_x + x) / self.cell_size;
                let cell_y = (base_y + y) / self.cell_size;
                let color = if (cell_x + cell_y) % 2 == 0 {
                    self.color_a
                } else {
                    self.color_b
                };
                tile.set_pixel3(y * self.tile_width + x, color);
            }
        }

        Ok(tile)
    }

    fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    fn display_path(&self) -> &str {
        &self.path
    }
}
