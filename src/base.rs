//! Rendering Base
//!
//! Clips span and blit operations to a rectangle and optionally to an
//! arbitrary path before handing them to the pixel format.

use crate::clip::Rectangle;
use crate::paths::bounding_rect;
use crate::raster::{FillingRule, RasterizerScanline};

use crate::Color;
use crate::Pixel;
use crate::PixelData;
use crate::Rasterize;
use crate::Source;
use crate::VertexSource;

use std::cmp::min;
use std::cmp::max;

/// Renderer over a pixel format with rectangle and path clipping
///
/// Without a clip path, span operations are clamped to the clip box and
/// passed on whole. With a clip path every pixel is tested against the
/// path before it is touched.
#[derive(Debug)]
pub struct RenderingBase<T> {
    /// Pixel Format
    pub pixf: T,
    clip_box: Rectangle<i64>,
    clip_path: Option<RasterizerScanline>,
}

/// Source / destination origin and size of a clipped blit
#[derive(Debug,Copy,Clone,PartialEq)]
struct Blit {
    sx: i64,
    sy: i64,
    dx: i64,
    dy: i64,
    w: i64,
    h: i64,
}

impl Blit {
    /// Row order safe for overlapping source and destination
    fn rows(&self) -> Box<dyn Iterator<Item=i64>> {
        if self.dy > self.sy {
            Box::new((0 .. self.h).rev())
        } else {
            Box::new(0 .. self.h)
        }
    }
    /// Column order safe for overlapping source and destination
    fn cols(&self) -> Box<dyn Iterator<Item=i64>> {
        if self.dx > self.sx {
            Box::new((0 .. self.w).rev())
        } else {
            Box::new(0 .. self.w)
        }
    }
}

fn full_box(width: usize, height: usize) -> Rectangle<i64> {
    Rectangle { x1: 0, y1: 0, x2: width as i64 - 1, y2: height as i64 - 1 }
}

impl<T> RenderingBase<T> where T: Pixel {
    /// Create new Rendering Base from Pixel Format
    ///
    /// The clip box covers the whole buffer
    pub fn new(pixf: T) -> RenderingBase<T> {
        let clip_box = full_box(pixf.width(), pixf.height());
        RenderingBase { pixf, clip_box, clip_path: None }
    }
    /// Replace the pixel format, returning the previous one
    ///
    /// Clipping is reset to the new buffer
    pub fn attach(&mut self, pixf: T) -> T {
        let old = std::mem::replace(&mut self.pixf, pixf);
        self.reset_clipping();
        old
    }
    pub fn width(&self) -> usize {
        self.pixf.width()
    }
    pub fn height(&self) -> usize {
        self.pixf.height()
    }
    /// Current clip box, inclusive
    pub fn get_clip_box(&self) -> Rectangle<i64> {
        self.clip_box
    }
    /// Limits of the clip box as (xmin, xmax, ymin, ymax)
    pub fn limits(&self) -> (i64,i64,i64,i64) {
        (self.clip_box.x1, self.clip_box.x2, self.clip_box.y1, self.clip_box.y2)
    }
    /// Set the clip box, inclusive of (x2,y2)
    ///
    /// The box is limited to the buffer. If nothing of it remains the
    /// clip box becomes empty and false is returned.
    pub fn clip_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) -> bool {
        let mut cb = Rectangle::new(x1, y1, x2, y2);
        if cb.clip(&full_box(self.width(), self.height())) {
            debug!("clip rect {:?}", cb);
            self.clip_box = cb;
            return true;
        }
        debug!("clip rect ({},{}) ({},{}) outside of buffer", x1, y1, x2, y2);
        self.clip_box = Rectangle { x1: 1, y1: 1, x2: 0, y2: 0 };
        false
    }
    /// Restrict drawing to the interior of a path
    ///
    /// The clip box is intersected with the bounding box of the path
    pub fn add_clipping<VS: VertexSource>(&mut self, vs: &mut VS, rule: FillingRule) {
        let mut ras = RasterizerScanline::new();
        ras.filling_rule(rule);
        ras.add_path(vs, 0);
        if let Some(r) = bounding_rect(vs, 0) {
            let cb = Rectangle::new(r.x1.floor() as i64, r.y1.floor() as i64,
                                    r.x2.floor() as i64, r.y2.floor() as i64);
            self.clip_box.clip(&cb);
        }
        debug!("path clip {:?} {:?}", rule, self.clip_box);
        self.clip_path = Some(ras);
    }
    /// Clip box covers the whole buffer and the clip path is removed
    pub fn reset_clipping(&mut self) {
        self.clip_box = full_box(self.width(), self.height());
        self.clip_path = None;
    }
    pub fn has_clip_path(&self) -> bool {
        self.clip_path.is_some()
    }
    /// Pixel (`x`,`y`) lies inside the clip box and the clip path
    pub fn in_clip(&mut self, x: i64, y: i64) -> bool {
        if ! self.clip_box.hit_test(x, y) {
            return false;
        }
        match self.clip_path.as_mut() {
            Some(path) => path.hit_test(x, y),
            None => true,
        }
    }
    /// Set every pixel inside the clip region to `color`
    pub fn clear<C: Color>(&mut self, color: C) {
        if self.has_clip_path() {
            for y in 0 .. self.height() {
                for x in 0 .. self.width() {
                    if self.in_clip(x as i64, y as i64) {
                        self.pixf.copy_pixel(x, y, color);
                    }
                }
            }
            return;
        }
        let (xmin,xmax,ymin,ymax) = self.limits();
        if xmin > xmax {
            return;
        }
        let w = (xmax - xmin + 1) as usize;
        for y in ymin ..= ymax {
            self.pixf.copy_hline(xmin as usize, y as usize, w, color);
        }
    }
    /// Blend pixels from `x1` to `x2` inclusive with a single coverage
    pub fn blend_hline<C: Color>(&mut self, x1: i64, y: i64, x2: i64, c: &C, cover: u64) {
        let (x1,x2) = if x2 > x1 { (x1,x2) } else { (x2,x1) };
        if self.has_clip_path() {
            for x in x1 ..= x2 {
                if self.in_clip(x, y) {
                    self.pixf.blend_pix((x as usize, y as usize), *c, cover);
                }
            }
            return;
        }
        let (xmin,xmax,ymin,ymax) = self.limits();
        if y > ymax || y < ymin || x1 > xmax || x2 < xmin {
            return;
        }
        let x1 = max(x1, xmin);
        let x2 = min(x2, xmax);
        self.pixf.blend_hline(x1, y, x2 - x1 + 1, *c, cover);
    }
    /// Blend `len` pixels from (`x`,`y`), one coverage value each
    pub fn blend_solid_hspan<C: Color>(&mut self, x: i64, y: i64, len: i64, c: &C, covers: &[u64]) {
        if self.has_clip_path() {
            for (i, &cover) in covers.iter().take(len.max(0) as usize).enumerate() {
                let xi = x + i as i64;
                if self.in_clip(xi, y) {
                    self.pixf.blend_pix((xi as usize, y as usize), *c, cover);
                }
            }
            return;
        }
        if let Some((x, len, off)) = self.clip_span(x, y, len) {
            self.pixf.blend_solid_hspan(x, y, len, *c, &covers[off ..]);
        }
    }
    /// Blend `len` pixels of individual colors from (`x`,`y`)
    ///
    /// `covers` holds one value per pixel, or is empty to use `cover`
    pub fn blend_color_hspan<C: Color>(&mut self, x: i64, y: i64, len: i64,
                                       colors: &[C], covers: &[u64], cover: u64) {
        if self.has_clip_path() {
            for (i, &c) in colors.iter().take(len.max(0) as usize).enumerate() {
                let xi = x + i as i64;
                if self.in_clip(xi, y) {
                    let cover = covers.get(i).copied().unwrap_or(cover);
                    self.pixf.blend_pix((xi as usize, y as usize), c, cover);
                }
            }
            return;
        }
        if let Some((x, len, off)) = self.clip_span(x, y, len) {
            let covers = if covers.is_empty() { covers } else { &covers[off ..] };
            self.pixf.blend_color_hspan(x, y, len, &colors[off ..], covers, cover);
        }
    }
    /// Clamp a span to the clip box
    ///
    /// Returns the new start, length and the offset into per pixel data
    fn clip_span(&self, x: i64, y: i64, len: i64) -> Option<(i64, i64, usize)> {
        let (xmin,xmax,ymin,ymax) = self.limits();
        if y > ymax || y < ymin {
            return None;
        }
        let (mut x, mut len, mut off) = (x, len, 0);
        if x < xmin {
            len -= xmin - x;
            off = (xmin - x) as usize;
            x = xmin;
        }
        if x + len > xmax {
            len = xmax - x + 1;
        }
        if len <= 0 {
            return None;
        }
        Some((x, len, off))
    }
    /// Clip a blit of `src` (inclusive, or the whole source) moved by
    /// (`dx`,`dy`) against the source size and the clip box
    fn blit_area(&self, src: Option<Rectangle<i64>>, wsrc: usize, hsrc: usize,
                 dx: i64, dy: i64) -> Option<Blit> {
        let (mut sx1, mut sy1, mut sx2, mut sy2) = match src {
            Some(r) => (r.x1, r.y1, r.x2 + 1, r.y2 + 1),
            None => (0, 0, wsrc as i64, hsrc as i64),
        };
        let (mut dx1, mut dy1) = (sx1 + dx, sy1 + dy);
        let (mut dx2, mut dy2) = (sx2 + dx, sy2 + dy);
        if sx1 < 0 {
            dx1 -= sx1;
            sx1 = 0;
        }
        if sy1 < 0 {
            dy1 -= sy1;
            sy1 = 0;
        }
        sx2 = min(sx2, wsrc as i64);
        sy2 = min(sy2, hsrc as i64);

        let cb = self.clip_box;
        if dx1 < cb.x1 {
            sx1 += cb.x1 - dx1;
            dx1 = cb.x1;
        }
        if dy1 < cb.y1 {
            sy1 += cb.y1 - dy1;
            dy1 = cb.y1;
        }
        dx2 = min(dx2, cb.x2 + 1);
        dy2 = min(dy2, cb.y2 + 1);

        let w = min(dx2 - dx1, sx2 - sx1);
        let h = min(dy2 - dy1, sy2 - sy1);
        if w <= 0 || h <= 0 {
            return None;
        }
        let b = Blit { sx: sx1, sy: sy1, dx: dx1, dy: dy1, w, h };
        trace!("blit {:?}", b);
        Some(b)
    }
    /// Copy pixels of `src` moved by (`dx`,`dy`)
    ///
    /// `rect` selects an inclusive source region, None copies everything.
    /// Rows are copied raw when both formats share a layout.
    pub fn copy_from<S: Pixel>(&mut self, src: &S, rect: Option<Rectangle<i64>>, dx: i64, dy: i64) {
        let b = match self.blit_area(rect, src.width(), src.height(), dx, dy) {
            Some(b) => b,
            None => return,
        };
        if self.has_clip_path() || S::bpp() != T::bpp() {
            for j in b.rows() {
                for i in b.cols() {
                    let (x, y) = (b.dx + i, b.dy + j);
                    if self.in_clip(x, y) {
                        let c = src.get(((b.sx + i) as usize, (b.sy + j) as usize));
                        self.pixf.set((x as usize, y as usize), c);
                    }
                }
            }
            return;
        }
        let bpp = T::bpp();
        let n = b.w as usize * bpp;
        for j in b.rows() {
            let from = src.rbuf().offset(b.sx as usize, (b.sy + j) as usize);
            let to = self.pixf.rbuf().offset(b.dx as usize, (b.dy + j) as usize);
            let row = &src.rbuf().data[from .. from + n];
            self.pixf.rbuf_mut().data[to .. to + n].copy_from_slice(row);
        }
    }
    /// Blend pixels of `src` moved by (`dx`,`dy`) with coverage `cover`
    ///
    /// `rect` selects an inclusive source region, None blends everything
    pub fn blend_from<S: Source>(&mut self, src: &S, rect: Option<Rectangle<i64>>,
                                 dx: i64, dy: i64, cover: u64) {
        let b = match self.blit_area(rect, src.width(), src.height(), dx, dy) {
            Some(b) => b,
            None => return,
        };
        let path = self.has_clip_path();
        for j in b.rows() {
            for i in b.cols() {
                let (x, y) = (b.dx + i, b.dy + j);
                if path && ! self.in_clip(x, y) {
                    continue;
                }
                let c = src.get(((b.sx + i) as usize, (b.sy + j) as usize));
                self.pixf.blend_pix((x as usize, y as usize), c, cover);
            }
        }
    }
    /// Move a region of the attached buffer by (`dx`,`dy`)
    ///
    /// Source and destination may overlap; rows and columns are visited
    /// in the order that reads every source pixel before it is written.
    pub fn move_area(&mut self, rect: Option<Rectangle<i64>>, dx: i64, dy: i64) {
        let b = match self.blit_area(rect, self.width(), self.height(), dx, dy) {
            Some(b) => b,
            None => return,
        };
        let bpp = T::bpp();
        if self.has_clip_path() {
            for j in b.rows() {
                for i in b.cols() {
                    let (x, y) = (b.dx + i, b.dy + j);
                    if self.in_clip(x, y) {
                        let rbuf = self.pixf.rbuf_mut();
                        let from = rbuf.offset((b.sx + i) as usize, (b.sy + j) as usize);
                        let to = rbuf.offset(x as usize, y as usize);
                        rbuf.data.copy_within(from .. from + bpp, to);
                    }
                }
            }
            return;
        }
        let n = b.w as usize * bpp;
        for j in b.rows() {
            let rbuf = self.pixf.rbuf_mut();
            let from = rbuf.offset(b.sx as usize, (b.sy + j) as usize);
            let to = rbuf.offset(b.dx as usize, (b.dy + j) as usize);
            rbuf.data.copy_within(from .. from + n, to);
        }
    }
}

impl<T> PixelData for RenderingBase<T> where T: PixelData {
    fn pixeldata(&self) -> &[u8] {
        self.pixf.pixeldata()
    }
}
