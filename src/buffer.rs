//! Rendering buffer

/// Rendering Buffer
///
/// Data is stored as row-major order (C-format)
#[derive(Debug,Default,Clone,PartialEq)]
pub struct RenderingBuffer {
    /// Pixel / Component level data of Image
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
    /// Bytes per pixel or number of color components
    pub bpp: usize,
}

impl RenderingBuffer {
    /// Create a new buffer of width, height, and bpp
    ///
    /// All bytes start at zero
    pub fn new(width: usize, height: usize, bpp: usize) -> Self {
        RenderingBuffer {
            width, height, bpp, data: vec![0u8; width * height * bpp]
        }
    }
    /// Wrap existing pixel data, None if the length does not match
    pub fn from_vec(data: Vec<u8>, width: usize, height: usize, bpp: usize) -> Option<Self> {
        if data.len() != width * height * bpp {
            return None;
        }
        Some(RenderingBuffer { data, width, height, bpp })
    }
    /// Size of underlying Rendering Buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width * self.bpp
    }
    /// Bytes of row `y`
    pub fn row(&self, y: usize) -> &[u8] {
        let s = self.stride();
        &self.data[y * s .. (y + 1) * s]
    }
    /// Bytes of row `y`, mutable
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let s = self.stride();
        &mut self.data[y * s .. (y + 1) * s]
    }
    /// Byte offset of pixel (x,y)
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.bpp
    }
    /// Set every byte to `v`
    pub fn fill(&mut self, v: u8) {
        self.data.iter_mut().for_each(|b| *b = v);
    }
}

use std::ops::Index;
use std::ops::IndexMut;

impl Index<(usize,usize)> for RenderingBuffer {
    type Output = [u8];
    fn index(&self, index: (usize, usize)) -> &[u8] {
        debug_assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        debug_assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        let i = self.offset(index.0, index.1);
        &self.data[i .. i + self.bpp]
    }
}
impl IndexMut<(usize,usize)> for RenderingBuffer {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut [u8] {
        debug_assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        debug_assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        let i = self.offset(index.0, index.1);
        let n = self.bpp;
        &mut self.data[i .. i + n]
    }
}
