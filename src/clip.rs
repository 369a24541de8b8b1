//! Clipping Region

use crate::cell::RasterizerCell;

/// Rectangle
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}
impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2,x1) } else { (x1,x2) };
        let (y1, y2) = if y1 > y2 { (y2,y1) } else { (y1,y2) };
        Self { x1,y1,x2,y2 }
    }
    /// Get location of point relative to rectangle
    ///
    /// Returned is an a u8 made up of the following bits:
    /// - [INSIDE](constant.INSIDE.html)
    /// - [LEFT](constant.LEFT.html)
    /// - [RIGHT](constant.RIGHT.html)
    /// - [BOTTOM](constant.BOTTOM.html)
    /// - [TOP](constant.TOP.html)
    ///
    pub fn clip_flags(&self, x: T, y: T) -> u8 {
        clip_flags(&x,&y, &self.x1, &self.y1, &self.x2, &self.y2)
    }
    /// Expand if the point (x,y) is outside
    pub fn expand(&mut self, x: T, y: T) {
        if x < self.x1 { self.x1 = x; }
        if x > self.x2 { self.x2 = x; }
        if y < self.y1 { self.y1 = y; }
        if y > self.y2 { self.y2 = y; }
    }
    /// Expand if the rectangle is outside
    pub fn expand_rect(&mut self, r: &Rectangle<T>) {
        self.expand(r.x1, r.y1);
        self.expand(r.x2, r.y2);
    }
    /// Shrink to the intersection with `r`
    ///
    /// Returns false if the result is empty, the rectangle is then invalid
    pub fn clip(&mut self, r: &Rectangle<T>) -> bool {
        if self.x2 > r.x2 { self.x2 = r.x2; }
        if self.y2 > r.y2 { self.y2 = r.y2; }
        if self.x1 < r.x1 { self.x1 = r.x1; }
        if self.y1 < r.y1 { self.y1 = r.y1; }
        self.is_valid()
    }
    /// Minimum values do not exceed maximum values
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }
    /// Point lies inside or on the boundary
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// Inside Region
///
/// See https://en.wikipedia.org/wiki/Cohen%E2%80%93Sutherland_algorithm
pub const INSIDE : u8 = 0b0000;
/// Left of Region, x < x1
pub const LEFT   : u8 = 0b0000_0001;
/// Right of Region, x > x2
pub const RIGHT  : u8 = 0b0000_0010;
/// Below Region, y < y1
pub const BOTTOM : u8 = 0b0000_0100;
/// Above Region, y > y2
pub const TOP    : u8 = 0b0000_1000;

/// Determine the location of a point to a broken-down rectangle or range
///
/// Returned is an a u8 made up of the following bits:
/// - [INSIDE](constant.INSIDE.html)
/// - [LEFT](constant.LEFT.html)
/// - [RIGHT](constant.RIGHT.html)
/// - [BOTTOM](constant.BOTTOM.html)
/// - [TOP](constant.TOP.html)
///
fn clip_flags<T: std::cmp::PartialOrd>(x: &T, y: &T, x1: &T, y1: &T, x2: &T, y2: &T) -> u8 {
    let mut code = INSIDE;
    if x < x1 { code |= LEFT; }
    if x > x2 { code |= RIGHT; }
    if y < y1 { code |= BOTTOM; }
    if y > y2 { code |= TOP; }
    code
}

/// Compute `a * b / c` in floating point, rounded to nearest
pub fn mul_div(a: i64, b: i64, c: i64) -> i64 {
    let (a,b,c) = (a as f64, b as f64, c as f64);
    (a * b / c).round() as i64
}

/// Clip Region
///
/// Clips edges in subpixel coordinates against a rectangle before they
/// reach the cell accumulator. Parts of an edge left or right of the
/// rectangle are moved onto its vertical sides so the cover they
/// contribute is kept; parts above or below are dropped.
#[derive(Debug,Default)]
pub struct Clip {
    /// Current x Point
    x1: i64,
    /// Current y Point
    y1: i64,
    /// Rectangle to clip on
    clip_box: Option<Rectangle<i64>>,
    /// Current clip flag for point (x1,y1)
    clip_flag: u8,
}

impl Clip {
    /// Create new Clipping region
    pub fn new() -> Self {
        Self {x1: 0, y1: 0,
              clip_box: None,
              clip_flag: INSIDE }
    }
    /// Clip a line along the top and bottom of the region
    fn line_clip_y(&self, ras: &mut RasterizerCell,
                   x1: i64, y1: i64,
                   x2: i64, y2: i64,
                   f1: u8, f2: u8) {
        let b = match self.clip_box {
            None => return,
            Some(ref b) => b,
        };
        let f1 = f1 & (TOP|BOTTOM);
        let f2 = f2 & (TOP|BOTTOM);
        // Fully Visible in y
        if f1 == INSIDE && f2 == INSIDE {
            ras.line(x1,y1,x2,y2);
        } else {
            // Both points above or below clip box
            if f1 == f2 {
                return;
            }
            let (mut tx1, mut ty1, mut tx2, mut ty2) = (x1,y1,x2,y2);
            if f1 == BOTTOM {
                tx1 = x1 + mul_div(b.y1-y1, x2-x1, y2-y1);
                ty1 = b.y1;
            }
            if f1 == TOP {
                tx1 = x1 + mul_div(b.y2-y1, x2-x1, y2-y1);
                ty1 = b.y2;
            }
            if f2 == BOTTOM {
                tx2 = x1 + mul_div(b.y1-y1, x2-x1, y2-y1);
                ty2 = b.y1;
            }
            if f2 == TOP {
                tx2 = x1 + mul_div(b.y2-y1, x2-x1, y2-y1);
                ty2 = b.y2;
            }
            ras.line(tx1,ty1,tx2,ty2);
        }
    }

    /// Draw a line from (x1,y1) to (x2,y2) into a RasterizerCell
    ///
    /// Final point (x2,y2) is saved internally as (x1,y1))
    pub fn line_to(&mut self, ras: &mut RasterizerCell, x2: i64, y2: i64) {
        if let Some(b) = self.clip_box {
            let f2 = b.clip_flags(x2,y2);
            // Both points above or below clip box
            let fy1 = (TOP | BOTTOM) & self.clip_flag;
            let fy2 = (TOP | BOTTOM) & f2;
            if fy1 != INSIDE && fy1 == fy2 {
                self.x1 = x2;
                self.y1 = y2;
                self.clip_flag = f2;
                return;
            }
            let (x1,y1,f1) = (self.x1, self.y1, self.clip_flag);
            match (f1 & (LEFT|RIGHT), f2 & (LEFT|RIGHT)) {
                (INSIDE,RIGHT) => {
                    let y3 = y1 + mul_div(b.x2-x1, y2-y1, x2-x1);
                    let f3 = b.clip_flags(b.x2, y3);
                    self.line_clip_y(ras, x1,   y1, b.x2, y3, f1, f3);
                    self.line_clip_y(ras, b.x2, y3, b.x2, y2, f3, f2);
                },
                (RIGHT,INSIDE) => {
                    let y3 = y1 + mul_div(b.x2-x1, y2-y1, x2-x1);
                    let f3 = b.clip_flags(b.x2, y3);
                    self.line_clip_y(ras, b.x2, y1, b.x2, y3, f1, f3);
                    self.line_clip_y(ras, b.x2, y3,   x2, y2, f3, f2);
                },
                (INSIDE,LEFT) => {
                    let y3 = y1 + mul_div(b.x1-x1, y2-y1, x2-x1);
                    let f3 = b.clip_flags(b.x1, y3);
                    self.line_clip_y(ras, x1,   y1, b.x1, y3, f1, f3);
                    self.line_clip_y(ras, b.x1, y3, b.x1, y2, f3, f2);
                },
                (RIGHT,LEFT) => {
                    let y3 = y1 + mul_div(b.x2-x1, y2-y1, x2-x1);
                    let y4 = y1 + mul_div(b.x1-x1, y2-y1, x2-x1);
                    let f3 = b.clip_flags(b.x2, y3);
                    let f4 = b.clip_flags(b.x1, y4);
                    self.line_clip_y(ras, b.x2, y1, b.x2, y3, f1, f3);
                    self.line_clip_y(ras, b.x2, y3, b.x1, y4, f3, f4);
                    self.line_clip_y(ras, b.x1, y4, b.x1, y2, f4, f2);
                },
                (LEFT,INSIDE) => {
                    let y3 = y1 + mul_div(b.x1-x1, y2-y1, x2-x1);
                    let f3 = b.clip_flags(b.x1, y3);
                    self.line_clip_y(ras, b.x1, y1, b.x1, y3, f1, f3);
                    self.line_clip_y(ras, b.x1, y3,   x2, y2, f3, f2);
                },
                (LEFT,RIGHT) => {
                    let y3 = y1 + mul_div(b.x1-x1, y2-y1, x2-x1);
                    let y4 = y1 + mul_div(b.x2-x1, y2-y1, x2-x1);
                    let f3 = b.clip_flags(b.x1, y3);
                    let f4 = b.clip_flags(b.x2, y4);
                    self.line_clip_y(ras, b.x1, y1, b.x1, y3, f1, f3);
                    self.line_clip_y(ras, b.x1, y3, b.x2, y4, f3, f4);
                    self.line_clip_y(ras, b.x2, y4, b.x2, y2, f4, f2);
                },
                (LEFT,LEFT)   => self.line_clip_y(ras, b.x1,y1,b.x1,y2,f1,f2),
                (RIGHT,RIGHT) => self.line_clip_y(ras, b.x2,y1,b.x2,y2,f1,f2),
                // Both inside in x; LEFT and RIGHT never occur together
                (_,_) => self.line_clip_y(ras, x1,y1,x2,y2,f1,f2),
            }
            self.clip_flag = f2;
        } else {
            ras.line(self.x1, self.y1, x2, y2);
        }
        self.x1 = x2;
        self.y1 = y2;
    }
    /// Move to point (x2,y2)
    ///
    /// Point is saved internally as (x1,y1)
    pub fn move_to(&mut self, x2: i64, y2: i64) {
        self.x1 = x2;
        self.y1 = y2;
        self.clip_flag = match self.clip_box {
            Some(ref b) => b.clip_flags(x2, y2),
            None => INSIDE,
        };
    }
    /// Define the clipping region
    pub fn clip_box(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let b = Rectangle::new(x1, y1, x2, y2);
        debug!("clip box {:?}", b);
        self.clip_flag = b.clip_flags(self.x1, self.y1);
        self.clip_box = Some(b);
    }
    /// Remove the clipping region
    pub fn reset_clipping(&mut self) {
        self.clip_box = None;
        self.clip_flag = INSIDE;
    }
    pub fn get_clip_box(&self) -> Option<Rectangle<i64>> {
        self.clip_box
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::POLY_SUBPIXEL_SCALE as S;
    use quickcheck_macros::quickcheck;

    fn cells_in(ras: &mut RasterizerCell) -> Vec<(i64, i64)> {
        ras.sort_cells();
        let mut out = vec![];
        if ras.total_cells() == 0 {
            return out;
        }
        for y in ras.min_y() ..= ras.max_y() {
            out.extend(ras.scanline_cells(y).map(|c| (c.x, c.y)));
        }
        out
    }

    #[test]
    fn rectangle_normalizes() {
        let r = Rectangle::new(5, 7, 1, 2);
        assert_eq!(r, Rectangle { x1: 1, y1: 2, x2: 5, y2: 7 });
        // y sorted independently of x
        let r = Rectangle::new(0, 9, 10, 3);
        assert_eq!((r.y1, r.y2), (3, 9));
    }

    #[test]
    fn rectangle_flags_and_clip() {
        let r = Rectangle::new(0, 0, 10, 10);
        assert_eq!(r.clip_flags(5, 5), INSIDE);
        assert_eq!(r.clip_flags(-1, 5), LEFT);
        assert_eq!(r.clip_flags(11, 11), RIGHT | TOP);
        assert_eq!(r.clip_flags(5, -3), BOTTOM);

        let mut a = Rectangle::new(-5, -5, 5, 5);
        assert!(a.clip(&r));
        assert_eq!(a, Rectangle::new(0, 0, 5, 5));
        let mut b = Rectangle::new(20, 20, 30, 30);
        assert!(! b.clip(&r));
        assert!(! b.is_valid());
        assert!(r.hit_test(10, 0));
        assert!(! r.hit_test(11, 0));
    }

    #[test]
    fn mul_div_rounds() {
        assert_eq!(mul_div(3, 3, 2), 5);
        assert_eq!(mul_div(-3, 3, 2), -5);
        assert_eq!(mul_div(10, 0, 7), 0);
    }

    #[test]
    fn no_box_passes_through() {
        let mut clip = Clip::new();
        let mut ras = RasterizerCell::new();
        clip.move_to(-10 * S, 0);
        clip.line_to(&mut ras, -10 * S, 3 * S);
        assert_eq!(ras.min_x(), -10);
    }

    #[test]
    fn edge_outside_in_y_is_dropped() {
        let mut clip = Clip::new();
        clip.clip_box(0, 0, 10 * S, 10 * S);
        let mut ras = RasterizerCell::new();
        clip.move_to(S, 20 * S);
        clip.line_to(&mut ras, 5 * S, 30 * S);
        clip.line_to(&mut ras, -5 * S, -30 * S);
        assert!(cells_in(&mut ras).iter().all(|&(x, y)| x <= 10 && (0 ..= 10).contains(&y)));
    }

    #[test]
    fn edge_left_of_box_moves_to_side() {
        let mut clip = Clip::new();
        clip.clip_box(0, 0, 10 * S, 10 * S);
        let mut ras = RasterizerCell::new();
        clip.move_to(-5 * S, S);
        clip.line_to(&mut ras, -5 * S, 4 * S);
        let cells = cells_in(&mut ras);
        assert_eq!(cells, vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[quickcheck]
    fn clipped_cells_stay_in_box(pts: Vec<(i16, i16)>) -> bool {
        let (bx1, by1, bx2, by2) = (10 * S, 20 * S, 200 * S, 120 * S);
        let mut clip = Clip::new();
        clip.clip_box(bx1, by1, bx2, by2);
        let mut ras = RasterizerCell::new();
        let mut it = pts.iter().map(|&(x, y)| (i64::from(x) * 7, i64::from(y) * 5));
        if let Some((x, y)) = it.next() {
            clip.move_to(x, y);
        }
        for (x, y) in it {
            clip.line_to(&mut ras, x, y);
        }
        cells_in(&mut ras).iter().all(|&(x, y)| {
            x >= bx1 / S && x <= bx2 / S && y >= by1 / S && y <= by2 / S
        })
    }

    /// Rounded a * b / c, half away from zero, in wide integers
    fn mul_div_exact(a: i64, b: i64, c: i64) -> i64 {
        let (mut n, mut d) = (i128::from(a) * i128::from(b), i128::from(c));
        if d < 0 {
            n = -n;
            d = -d;
        }
        let q = (2 * n.abs() + d) / (2 * d);
        (if n < 0 { -q } else { q }) as i64
    }

    #[quickcheck]
    fn mul_div_matches_integer_rounding(a: i16, b: i16, c: i16) -> bool {
        if c == 0 {
            return true;
        }
        let (a, b, c) = (i64::from(a) * S, i64::from(b) * S, i64::from(c));
        mul_div(a, b, c) == mul_div_exact(a, b, c)
    }
}
