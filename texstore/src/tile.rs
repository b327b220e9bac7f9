//! Decoded texture tile pixel storage.

/// A decoded block of texture pixels in row-major interleaved layout.
///
/// Tiles hold `f32` samples with 3 (RGB) or 4 (RGBA) channels per pixel.
/// They are filled once by a texture's decode step and treated as
/// immutable after the owning record becomes visible to other threads.
#[derive(Debug, Clone, PartialEq)]
pub struct TileData {
    width: usize,
    height: usize,
    channels: usize,
    pixels: Vec<f32>,
}

impl TileData {
    /// Create a zero-filled tile.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            pixels: vec![0.0; width * height * channels],
        }
    }

    /// Create a tile from an existing pixel buffer.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height * channels`.
    pub fn from_pixels(width: usize, height: usize, channels: usize, pixels: Vec<f32>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height * channels,
            "pixel buffer length must match tile dimensions"
        );
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Tile width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Tile height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channels per pixel (3 or 4 for renderable tiles).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of pixels in the tile.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Size of the backing pixel storage in bytes.
    pub fn memory_size(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<f32>()
    }

    /// Read the first three channels of the pixel at `index`.
    ///
    /// Works for both 3- and 4-channel tiles; on 4-channel tiles the
    /// alpha channel is not touched.
    #[inline]
    pub fn pixel3(&self, index: usize) -> [f32; 3] {
        let offset = index * self.channels;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }

    /// Write the first three channels of the pixel at `index`.
    #[inline]
    pub fn set_pixel3(&mut self, index: usize, value: [f32; 3]) {
        let offset = index * self.channels;
        self.pixels[offset] = value[0];
        self.pixels[offset + 1] = value[1];
        self.pixels[offset + 2] = value[2];
    }

    /// Read all four channels of the pixel at `index`.
    #[inline]
    pub fn pixel4(&self, index: usize) -> [f32; 4] {
        debug_assert_eq!(self.channels, 4);
        let offset = index * self.channels;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }

    /// Write all four channels of the pixel at `index`.
    #[inline]
    pub fn set_pixel4(&mut self, index: usize, value: [f32; 4]) {
        debug_assert_eq!(self.channels, 4);
        let offset = index * self.channels;
        self.pixels[offset..offset + 4].copy_from_slice(&value);
    }

    /// The raw interleaved sample buffer.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Mutable access to the raw sample buffer.
    pub fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.pixels
    }
}
