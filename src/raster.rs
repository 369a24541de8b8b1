//! Rasterizer

use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_SCALE;

use crate::clip::Clip;
use crate::scan::ScanlineHitTest;
use crate::cell::RasterizerCell;
use crate::paths::PathCommand;

use crate::Rasterize;
use crate::Scanline;
use crate::VertexSource;

/// Coverage resolution
const AA_SHIFT  : i64 = 8;
const AA_SCALE  : i64 = 1 << AA_SHIFT;
const AA_MASK   : i64 = AA_SCALE - 1;
const AA_SCALE2 : i64 = AA_SCALE * 2;
const AA_MASK2  : i64 = AA_SCALE2 - 1;

/// Conversion between floating point and subpixel coordinates
pub struct RasConvInt {
}
impl RasConvInt {
    pub fn upscale(v: f64) -> i64 {
        (v * POLY_SUBPIXEL_SCALE as f64).round() as i64
    }
    pub fn downscale(v: i64) -> i64 {
        v
    }
}

/// Winding rule
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}
impl Default for FillingRule {
    fn default() -> FillingRule {
        FillingRule::NonZero
    }
}

/// Position in the contour state machine
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum PathStatus {
    Initial,
    Closed,
    MoveTo,
    LineTo
}
impl Default for PathStatus {
    fn default() -> PathStatus {
        PathStatus::Initial
    }
}

/// Anti-aliased polygon rasterizer
///
/// Contours are fed through [move_to_d] / [line_to_d] or [add_path],
/// passed through the device [Clip] into a [RasterizerCell] and read back
/// one row at a time with [sweep_scanline].
///
/// With auto close on (the default) every contour is closed back to its
/// first point when the next contour starts or the scanlines are rewound.
/// Adding geometry after the cells have been sorted starts a new shape.
///
/// [move_to_d]: #method.move_to_d
/// [line_to_d]: #method.line_to_d
/// [add_path]: ../trait.Rasterize.html#tymethod.add_path
/// [sweep_scanline]: ../trait.Rasterize.html#tymethod.sweep_scanline
/// [Clip]: ../clip/struct.Clip.html
/// [RasterizerCell]: ../cell/struct.RasterizerCell.html
#[derive(Debug)]
pub struct RasterizerScanline {
    pub clipper: Clip,
    pub outline: RasterizerCell,
    status: PathStatus,
    start_x: i64,
    start_y: i64,
    scan_y: i64,
    filling_rule: FillingRule,
    auto_close: bool,
    gamma: Vec<u64>,
}

impl Default for RasterizerScanline {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterize for RasterizerScanline {
    /// Remove all geometry
    ///
    /// The current point returns to the origin
    fn reset(&mut self) {
        self.outline.reset();
        self.status = PathStatus::Initial;
        self.start_x = 0;
        self.start_y = 0;
        self.clipper.move_to(0, 0);
    }
    /// Add all vertices of path `path_id`
    fn add_path<VS: VertexSource>(&mut self, path: &mut VS, path_id: usize) {
        path.rewind(path_id);
        if self.outline.sorted() {
            self.reset();
        }
        while let Some(v) = path.vertex() {
            self.add_vertex(v.x, v.y, v.cmd);
        }
        trace!("add path: {} cells, status {:?}", self.outline.total_cells(), self.status);
    }
    /// Close, sort and move to the first row
    fn rewind_scanlines(&mut self) -> bool {
        self.sort();
        if self.outline.total_cells() == 0 {
            false
        } else {
            self.scan_y = self.outline.min_y();
            true
        }
    }
    /// Sweep the next row with coverage into `sl`
    ///
    /// Cells sharing an x are summed before the coverage is computed, the
    /// gap up to the next cell becomes a single span. Rows without any
    /// coverage are skipped.
    fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool {
        loop {
            if self.scan_y > self.outline.max_y() {
                return false;
            }
            sl.reset_spans();
            let mut cells = self.outline.scanline_cells(self.scan_y).peekable();
            let mut cover = 0;
            while let Some(cur) = cells.next() {
                let mut x = cur.x;
                let mut area = cur.area;
                cover += cur.cover;
                while let Some(same) = cells.next_if(|c| c.x == x) {
                    area += same.area;
                    cover += same.cover;
                }
                if area != 0 {
                    let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha > 0 {
                        sl.add_cell(x, alpha);
                    }
                    x += 1;
                }
                if let Some(next) = cells.peek() {
                    if next.x > x {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha > 0 {
                            sl.add_span(x, next.x - x, alpha);
                        }
                    }
                }
            }
            if sl.num_spans() != 0 {
                break;
            }
            self.scan_y += 1;
        }
        sl.finalize(self.scan_y);
        trace!("sweep scanline: y {} spans {}", self.scan_y, sl.num_spans());
        self.scan_y += 1;
        true
    }
    fn min_x(&self) -> i64 {
        self.outline.min_x()
    }
    fn max_x(&self) -> i64 {
        self.outline.max_x()
    }
}

impl RasterizerScanline {
    /// Create a new rasterizer, non-zero fill, identity gamma, auto close
    pub fn new() -> Self {
        Self { clipper: Clip::new(), status: PathStatus::Initial,
               outline: RasterizerCell::new(),
               start_x: 0, start_y: 0, scan_y: 0,
               filling_rule: FillingRule::NonZero,
               auto_close: true,
               gamma: (0..AA_SCALE as u64).collect(),
        }
    }
    /// Set the gamma function
    ///
    /// `gfunc` maps coverage in [0,1] to [0,1] and is sampled into a
    /// lookup table owned by this rasterizer
    pub fn gamma<F>(&mut self, gfunc: F)
        where F: Fn(f64) -> f64
    {
        let aa_mask = AA_MASK as f64;
        self.gamma = (0..AA_SCALE)
            .map(|i| gfunc(i as f64 / aa_mask))
            .map(|v| (v * aa_mask).round().max(0.0).min(aa_mask) as u64)
            .collect();
    }
    pub fn new_with_gamma<F>(gfunc: F) -> Self
        where F: Fn(f64) -> f64
    {
        let mut new = Self::new();
        new.gamma( gfunc );
        new
    }
    /// Gamma corrected value of `cover`
    pub fn apply_gamma(&self, cover: u64) -> u64 {
        self.gamma[cover.min(AA_MASK as u64) as usize]
    }
    pub fn filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule;
    }
    pub fn auto_close(&mut self, flag: bool) {
        self.auto_close = flag;
    }
    /// No geometry has been added since the last reset
    pub fn initial(&self) -> bool {
        self.status == PathStatus::Initial
    }
    pub fn status(&self) -> PathStatus {
        self.status
    }
    pub fn min_y(&self) -> i64 {
        self.outline.min_y()
    }
    pub fn max_y(&self) -> i64 {
        self.outline.max_y()
    }
    /// Clip incoming edges to the rectangle, in pixels
    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.reset();
        self.clipper.clip_box(RasConvInt::upscale(x1),
                              RasConvInt::upscale(y1),
                              RasConvInt::upscale(x2),
                              RasConvInt::upscale(y2));
    }
    /// Remove the clip rectangle
    pub fn reset_clipping(&mut self) {
        self.reset();
        self.clipper.reset_clipping();
    }
    /// Start a contour at (`x`,`y`) in subpixel coordinates
    pub fn move_to(&mut self, x: i64, y: i64) {
        if self.outline.sorted() {
            self.reset();
        }
        if self.auto_close {
            self.close_polygon();
        }
        self.start_x = RasConvInt::downscale(x);
        self.start_y = RasConvInt::downscale(y);
        self.clipper.move_to(self.start_x, self.start_y);
        self.status = PathStatus::MoveTo;
    }
    /// Continue the contour to (`x`,`y`) in subpixel coordinates
    pub fn line_to(&mut self, x: i64, y: i64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.clipper.line_to(&mut self.outline,
                             RasConvInt::downscale(x),
                             RasConvInt::downscale(y));
        self.status = PathStatus::LineTo;
    }
    /// Start a contour at (`x`,`y`) in pixels
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        self.move_to(RasConvInt::upscale(x), RasConvInt::upscale(y));
    }
    /// Continue the contour to (`x`,`y`) in pixels
    pub fn line_to_d(&mut self, x: f64, y: f64) {
        self.line_to(RasConvInt::upscale(x), RasConvInt::upscale(y));
    }
    /// Close the current contour back to its first point
    pub fn close_polygon(&mut self) {
        if self.status == PathStatus::LineTo {
            self.clipper.line_to(&mut self.outline, self.start_x, self.start_y);
            self.status = PathStatus::Closed;
        }
    }
    /// Add a vertex with its command
    ///
    /// Curve points are treated as line_to; flatten curves beforehand
    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: PathCommand) {
        if cmd.is_move_to() {
            self.move_to_d(x, y);
        } else if cmd.is_vertex() {
            self.line_to_d(x, y);
        } else if cmd.is_close() {
            self.close_polygon();
        }
    }
    /// Add a single edge in subpixel coordinates, not closed
    pub fn edge(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.clipper.move_to(RasConvInt::downscale(x1), RasConvInt::downscale(y1));
        self.clipper.line_to(&mut self.outline,
                             RasConvInt::downscale(x2),
                             RasConvInt::downscale(y2));
        self.status = PathStatus::MoveTo;
    }
    /// Add a single edge in pixels, not closed
    pub fn edge_d(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.edge(RasConvInt::upscale(x1), RasConvInt::upscale(y1),
                  RasConvInt::upscale(x2), RasConvInt::upscale(y2));
    }
    /// Close the open contour and sort the cells
    pub fn sort(&mut self) {
        if self.auto_close {
            self.close_polygon();
        }
        self.outline.sort_cells();
    }
    /// Prepare to sweep row `y` only
    ///
    /// False if there is no geometry or `y` is outside it
    pub fn navigate_scanline(&mut self, y: i64) -> bool {
        self.sort();
        if self.outline.total_cells() == 0 ||
            y < self.outline.min_y() ||
            y > self.outline.max_y() {
                return false;
            }
        self.scan_y = y;
        true
    }
    /// Convert an accumulated area to a coverage value
    ///
    /// The area is shifted down to 8 bits and made positive. Even-odd
    /// folds the value into a tent around 256. The result is clamped to 255
    /// and passed through the gamma table.
    pub fn calculate_alpha(&self, area: i64) -> u64 {
        let mut cover = area >> (POLY_SUBPIXEL_SHIFT*2 + 1 - AA_SHIFT);
        cover = cover.abs();
        if self.filling_rule == FillingRule::EvenOdd {
            cover &= AA_MASK2;
            if cover > AA_SCALE {
                cover = AA_SCALE2 - cover;
            }
        }
        cover = cover.min(AA_MASK);
        self.gamma[cover as usize]
    }
    /// Sweep the current row until pixel `sl.x()` is resolved
    ///
    /// Returns false if the row ends before reaching `sl.x()`
    pub fn sweep_scanline_hit(&self, sl: &mut ScanlineHitTest) -> bool {
        if self.scan_y > self.outline.max_y() {
            return false;
        }
        let tx = sl.x();
        let mut cells = self.outline.scanline_cells(self.scan_y).peekable();
        let mut cover = 0;
        while let Some(cur) = cells.next() {
            let mut x = cur.x;
            let mut area = cur.area;
            if tx < x {
                return false;
            }
            cover += cur.cover;
            while let Some(same) = cells.next_if(|c| c.x == x) {
                area += same.area;
                cover += same.cover;
            }
            if area != 0 {
                if tx == x {
                    let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha > 0 {
                        sl.add_cell(x, alpha);
                        if sl.hit() {
                            break;
                        }
                    }
                }
                x += 1;
            }
            if let Some(next) = cells.peek() {
                let sx = next.x - x;
                if next.x > x && tx >= x && tx < x + sx {
                    let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                    if alpha > 0 {
                        sl.add_span(x, sx, alpha);
                        if sl.hit() {
                            break;
                        }
                    }
                }
            }
        }
        true
    }
    /// Pixel (`tx`,`ty`) has non-zero coverage
    pub fn hit_test(&mut self, tx: i64, ty: i64) -> bool {
        if ! self.navigate_scanline(ty) {
            return false;
        }
        let mut sl = ScanlineHitTest::new(tx);
        self.sweep_scanline_hit(&mut sl);
        sl.hit()
    }
}
