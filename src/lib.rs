//! Anti-aliased 2D vector rasterization and compositing
//!
//! How does this work
//!
//! ```text
//!     ren = RenderingScanlineAASolid( RenderingBase( Pixfmt( data ) ) )
//!     ras = RasterizerScanline()
//!     sl  = ScanlineU8()
//!
//!  Raster Operations
//!    move_to_d, line_to_d, add_path
//!      clip.line_to()
//!        clip.line_clip_y()
//!          cell.line()
//!            render_hline()
//!              set_curr_cell() / add_curr_cell()
//!      Output: Cells with x, y, cover and area
//!
//!  Render to Image
//!    render_scanlines(ras, sl, ren)
//!      rewind_scanlines
//!        close_polygon()
//!        sort_cells()
//!      sweep_scanline()
//!        render() - Individual horizontal (y) rows
//!          blend_solid_hspan / blend_hline (base, clipped)
//!            blend_solid_hspan / blend_hline (pixfmt, composite op)
//! ```
//!
//! A minimal example, filling a square
//!
//!     use vraster::*;
//!
//!     let pix = Pixfmt::<Rgb8>::new(20, 20);
//!     let mut ren_base = RenderingBase::new(pix);
//!     ren_base.clear(Rgba8::white());
//!
//!     let mut path = Path::new();
//!     path.move_to(0.0, 0.0);
//!     path.line_to(10.0, 0.0);
//!     path.line_to(10.0, 10.0);
//!     path.line_to(0.0, 10.0);
//!     path.close_polygon();
//!
//!     let mut ras = RasterizerScanline::new();
//!     ras.add_path(&mut path, 0);
//!
//!     let mut ren = RenderingScanlineAASolid::with_base(&mut ren_base);
//!     ren.color(&Rgba8::black());
//!     let mut sl = ScanlineU8::new();
//!     render_scanlines(&mut ras, &mut sl, &mut ren);
//!
//!     assert_eq!(ren_base.pixf.get((5, 5)), Rgba8::black());
//!     assert_eq!(ren_base.pixf.get((15, 5)), Rgba8::white());

#[macro_use]
extern crate log;

pub mod paths;
pub mod transform;
pub mod arc;
pub mod ellipse;
pub mod curve;
pub mod color;
pub mod math;
pub mod comp;
pub mod buffer;
pub mod pixfmt;
pub mod base;
pub mod clip;
pub mod cell;
pub mod raster;
pub mod scan;
pub mod render;
pub mod ppm;
pub mod error;
pub mod font;

pub use crate::paths::*;
pub use crate::transform::*;
pub use crate::arc::*;
pub use crate::ellipse::*;
pub use crate::curve::*;
pub use crate::color::*;
pub use crate::comp::*;
pub use crate::buffer::*;
pub use crate::pixfmt::*;
pub use crate::base::*;
pub use crate::clip::*;
pub use crate::cell::*;
pub use crate::raster::*;
pub use crate::scan::*;
pub use crate::render::*;
pub use crate::error::*;
pub use crate::font::*;

/// Number of fractional bits in subpixel coordinates (24.8)
pub const POLY_SUBPIXEL_SHIFT : i64 = 8;
/// Subpixel coordinates per pixel
pub const POLY_SUBPIXEL_SCALE : i64 = 1<<POLY_SUBPIXEL_SHIFT;
/// Mask of the fractional part of a subpixel coordinate
pub const POLY_SUBPIXEL_MASK  : i64 = POLY_SUBPIXEL_SCALE - 1;

/// Full coverage value
pub const COVER_FULL : u64 = 255;

/// Source of vertices
///
/// A restartable, finite pull-iterator of `(x, y, command)`.
/// `rewind(path_id)` repositions the cursor, `vertex()` returns vertices
/// until the stream ends or a [Stop] separator is reached, after which it
/// returns `None`.
///
/// [Stop]: enum.PathCommand.html
pub trait VertexSource {
    /// Move the cursor to the start of path `path_id`
    fn rewind(&mut self, path_id: usize);
    /// Next vertex, or `None` at the end of the current path
    fn vertex(&mut self) -> Option<Vertex<f64>>;
}

impl<T: VertexSource + ?Sized> VertexSource for &mut T {
    fn rewind(&mut self, path_id: usize) {
        (**self).rewind(path_id);
    }
    fn vertex(&mut self) -> Option<Vertex<f64>> {
        (**self).vertex()
    }
}

/// Access Color properties and compoents
pub trait Color: std::fmt::Debug + Copy {
    /// Get red value [0,1] as f64
    fn red(&self) -> f64;
    /// Get green value [0,1] as f64
    fn green(&self) -> f64;
    /// Get blue value [0,1] as f64
    fn blue(&self) -> f64;
    /// Get alpha value [0,1] as f64
    fn alpha(&self) -> f64;
    /// Get red value [0,255] as u8
    fn red8(&self) -> u8;
    /// Get green value [0,255] as u8
    fn green8(&self) -> u8;
    /// Get blue value [0,255] as u8
    fn blue8(&self) -> u8;
    /// Get alpha value [0,255] as u8
    fn alpha8(&self) -> u8;
    /// Return if the color is completely transparent, alpha = 0.0
    fn is_transparent(&self) -> bool { self.alpha8() == 0 }
    /// Return if the color is completely opaque, alpha = 1.0
    fn is_opaque(&self) -> bool { self.alpha8() == 255 }
}

/// Read pixels as Rgba8
pub trait Source {
    fn get(&self, id: (usize, usize)) -> Rgba8;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
}

/// Low level pixel access of a pixel format
pub trait Pixel: Source {
    /// Bytes per pixel
    fn bpp() -> usize;
    /// Write color `c` to pixel `id` without blending
    fn set<C: Color>(&mut self, id: (usize, usize), c: C);
    /// Blend color `c` onto pixel `id` with coverage `cover`
    fn blend_pix<C: Color>(&mut self, id: (usize, usize), c: C, cover: u64);
    /// Underlying rendering buffer
    fn rbuf(&self) -> &RenderingBuffer;
    /// Underlying rendering buffer, mutable
    fn rbuf_mut(&mut self) -> &mut RenderingBuffer;

    /// Copy color `c` to pixel (`x`,`y`)
    ///
    /// Locations outside of the buffer are ignored
    fn copy_pixel<C: Color>(&mut self, x: usize, y: usize, c: C) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        self.set((x,y), c);
    }
    /// Copy color `c` to pixels (`x`,`y`) .. (`x+n-1`,`y`)
    ///
    /// Locations outside of the buffer are ignored
    fn copy_hline<C: Color>(&mut self, x: usize, y: usize, n: usize, c: C) {
        if y >= self.height() || x >= self.width() || n == 0 {
            return;
        }
        let n = n.min(self.width() - x);
        for i in 0 .. n {
            self.set((x+i,y), c);
        }
    }
    /// Copy color `c` to every pixel
    fn fill<C: Color>(&mut self, c: C) {
        for y in 0 .. self.height() {
            self.copy_hline(0, y, self.width(), c);
        }
    }
    /// Blend `len` pixels from (`x`,`y`) with a single coverage value
    ///
    /// Coordinates must lie inside the buffer
    fn blend_hline<C: Color>(&mut self, x: i64, y: i64, len: i64, c: C, cover: u64) {
        for i in 0 .. len {
            self.blend_pix(((x+i) as usize, y as usize), c, cover);
        }
    }
    /// Blend `len` pixels from (`x`,`y`) with one coverage value per pixel
    fn blend_solid_hspan<C: Color>(&mut self, x: i64, y: i64, len: i64, c: C, covers: &[u64]) {
        for (i, &cover) in covers.iter().take(len as usize).enumerate() {
            self.blend_pix((x as usize + i, y as usize), c, cover);
        }
    }
    /// Blend `len` pixels of individual colors from (`x`,`y`)
    ///
    /// Uses one coverage value per pixel from `covers`, or `cover` for
    /// every pixel when `covers` is empty
    fn blend_color_hspan<C: Color>(&mut self, x: i64, y: i64, len: i64,
                                   colors: &[C], covers: &[u64], cover: u64) {
        for (i, &c) in colors.iter().take(len as usize).enumerate() {
            let cover = covers.get(i).copied().unwrap_or(cover);
            self.blend_pix((x as usize + i, y as usize), c, cover);
        }
    }
}

/// Access raw pixel data
pub trait PixelData {
    fn pixeldata(&self) -> &[u8];
}

/// Rasterizer consumed by the scanline renderers
pub trait Rasterize {
    /// Remove all geometry
    fn reset(&mut self);
    /// Add geometry from a vertex source, starting at path `path_id`
    fn add_path<VS: VertexSource>(&mut self, path: &mut VS, path_id: usize);
    /// Close and sort the geometry; false if there is nothing to render
    fn rewind_scanlines(&mut self) -> bool;
    /// Produce the next non-empty scanline; false once exhausted
    fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool;
    fn min_x(&self) -> i64;
    fn max_x(&self) -> i64;
}

/// Receiver of coverage values produced by a row sweep
pub trait Scanline {
    /// Prepare for rows spanning `min_x` to `max_x`
    fn reset(&mut self, min_x: i64, max_x: i64);
    /// Remove all spans of the current row
    fn reset_spans(&mut self);
    /// Single pixel of coverage at `x`
    fn add_cell(&mut self, x: i64, cover: u64);
    /// `len` pixels of identical coverage starting at `x`
    fn add_span(&mut self, x: i64, len: i64, cover: u64);
    /// Complete the current row at `y`
    fn finalize(&mut self, y: i64);
    fn num_spans(&self) -> usize;
}

/// Render scanlines to a surface
pub trait Render {
    /// Render a single scanline
    fn render(&mut self, sl: &ScanlineU8);
    /// Set the current color
    fn color<C: Color>(&mut self, color: &C);
    /// Called once before the first scanline of a shape
    fn prepare(&mut self) { }
}
