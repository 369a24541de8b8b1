//! Cell accumulator
//!
//! Edges in 24.8 subpixel coordinates are broken into per pixel cells
//! holding the signed area and cover contributed by each edge. Cells live in
//! fixed size blocks that are kept across [reset](struct.RasterizerCell.html#method.reset)
//! and are indexed per row once the geometry is complete.

use crate::POLY_SUBPIXEL_SCALE;
use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_MASK;

use std::cmp::min;
use std::cmp::max;

/// Cells per block is 1 << CELL_BLOCK_SHIFT
pub const CELL_BLOCK_SHIFT : usize = 12;
pub const CELL_BLOCK_SIZE  : usize = 1 << CELL_BLOCK_SHIFT;
const CELL_BLOCK_MASK      : usize = CELL_BLOCK_SIZE - 1;
/// Growth of the block table
const CELL_BLOCK_POOL      : usize = 256;
/// Maximum number of blocks, further cells are dropped
pub const CELL_BLOCK_LIMIT : usize = 1024;

/// Horizontal extent above which a line is split in two
const DX_LIMIT : i64 = 16384 << POLY_SUBPIXEL_SHIFT;

/// Coverage accumulated for a single pixel
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
    /// Net vertical crossing, in subpixels
    pub cover: i64,
    /// Signed area, twice the subpixel area
    pub area: i64,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// Cell located nowhere
    pub fn new() -> Self {
        Cell { x: i64::MAX,
               y: i64::MAX,
               cover: 0,
               area: 0
        }
    }
    pub fn at(x: i64, y: i64) -> Self {
        Cell { x, y, cover: 0, area: 0 }
    }
    pub fn equal(&self, x: i64, y: i64) -> bool {
        self.x == x && self.y == y
    }
    pub fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
}

/// Start and length of a row of cells within the sorted index
#[derive(Debug,Default,Copy,Clone,PartialEq)]
struct SortedY {
    start: usize,
    num: usize,
}

/// Cell storage and row index
#[derive(Debug)]
pub struct RasterizerCell {
    /// Cell blocks, allocated on demand and reused after reset
    blocks: Vec<Vec<Cell>>,
    num_cells: usize,
    curr_cell: Cell,
    /// Cell indices ordered by row, then by x within a row
    sorted_cells: Vec<u32>,
    sorted_y: Vec<SortedY>,
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
    sorted: bool,
    overflow: bool,
}

impl Default for RasterizerCell {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterizerCell {
    pub fn new() -> Self {
        Self { blocks: vec![],
               num_cells: 0,
               curr_cell: Cell::new(),
               sorted_cells: vec![],
               sorted_y: vec![],
               min_x: i64::MAX,
               min_y: i64::MAX,
               max_x: i64::MIN,
               max_y: i64::MIN,
               sorted: false,
               overflow: false,
        }
    }
    /// Remove all cells, keeping allocated blocks
    pub fn reset(&mut self) {
        self.num_cells = 0;
        self.curr_cell = Cell::new();
        self.sorted = false;
        self.overflow = false;
        self.min_x = i64::MAX;
        self.min_y = i64::MAX;
        self.max_x = i64::MIN;
        self.max_y = i64::MIN;
    }
    pub fn min_x(&self) -> i64 { self.min_x }
    pub fn min_y(&self) -> i64 { self.min_y }
    pub fn max_x(&self) -> i64 { self.max_x }
    pub fn max_y(&self) -> i64 { self.max_y }
    pub fn sorted(&self) -> bool { self.sorted }
    pub fn total_cells(&self) -> usize {
        self.num_cells
    }
    /// Block limit was reached and cells were dropped since the last reset
    pub fn overflowed(&self) -> bool {
        self.overflow
    }
    /// Number of allocated blocks
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }
    fn cell(&self, idx: u32) -> &Cell {
        let idx = idx as usize;
        &self.blocks[idx >> CELL_BLOCK_SHIFT][idx & CELL_BLOCK_MASK]
    }
    fn cells(&self) -> impl Iterator<Item=&Cell> + '_ {
        self.blocks.iter().flat_map(|b| b.iter()).take(self.num_cells)
    }

    /// Store the current cell if it has any coverage
    fn add_curr_cell(&mut self) {
        if self.curr_cell.is_empty() {
            return;
        }
        let block = self.num_cells >> CELL_BLOCK_SHIFT;
        if self.num_cells & CELL_BLOCK_MASK == 0 {
            if block >= CELL_BLOCK_LIMIT {
                if ! self.overflow {
                    warn!("cell limit reached, {} cells in {} blocks; dropping cells",
                          self.num_cells, block);
                    self.overflow = true;
                }
                return;
            }
            if block == self.blocks.len() {
                if self.blocks.len() == self.blocks.capacity() {
                    self.blocks.reserve(CELL_BLOCK_POOL);
                }
                self.blocks.push(Vec::with_capacity(CELL_BLOCK_SIZE));
            }
            self.blocks[block].clear();
        }
        self.blocks[block].push(self.curr_cell);
        self.num_cells += 1;
    }
    fn set_curr_cell(&mut self, x: i64, y: i64) {
        if ! self.curr_cell.equal(x, y) {
            self.add_curr_cell();
            self.curr_cell = Cell::at(x, y);
        }
    }
    fn incr_curr_cell(&mut self, cover: i64, area: i64) {
        self.curr_cell.cover += cover;
        self.curr_cell.area += area;
    }

    /// Line segment within row `ey`, y values are subpixels within the row
    fn render_hline(&mut self, ey: i64, x1: i64, y1: i64, x2: i64, y2: i64) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1  & POLY_SUBPIXEL_MASK;
        let fx2 = x2  & POLY_SUBPIXEL_MASK;

        // Horizontal Line
        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }

        // Single Cell
        if ex1 == ex2 {
            let delta = y2 - y1;
            self.incr_curr_cell(delta, (fx1 + fx2) * delta);
            return;
        }

        // Adjacent Cells on Same Line
        let (p, first, incr, dx) = if x2 - x1 < 0 {
            (fx1 * (y2-y1), 0, -1, x1-x2)
        } else {
            ((POLY_SUBPIXEL_SCALE - fx1) * (y2-y1), POLY_SUBPIXEL_SCALE, 1, x2-x1)
        };
        let mut delta = p / dx;
        let mut xmod  = p % dx;
        if xmod < 0 {
            delta -= 1;
            xmod += dx;
        }
        self.incr_curr_cell(delta, (fx1 + first) * delta);

        let mut ex1 = ex1 + incr;
        self.set_curr_cell(ex1, ey);
        let mut y1 = y1 + delta;

        if ex1 != ex2 {
            let p = POLY_SUBPIXEL_SCALE * (y2 - y1 + delta);
            let mut lift = p / dx;
            let mut rem  = p % dx;
            if rem < 0 {
                lift -= 1;
                rem += dx;
            }
            xmod -= dx;

            while ex1 != ex2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dx;
                    delta += 1;
                }
                self.incr_curr_cell(delta, POLY_SUBPIXEL_SCALE * delta);
                y1 += delta;
                ex1 += incr;
                self.set_curr_cell(ex1, ey);
            }
        }
        let delta = y2 - y1;
        self.incr_curr_cell(delta, (fx2 + POLY_SUBPIXEL_SCALE - first) * delta);
    }

    /// Add a line in subpixel coordinates
    pub fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let dx = x2 - x1;
        // Split long lines in half
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = (x1 + x2) >> 1;
            let cy = (y1 + y2) >> 1;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }
        let dy = y2 - y1;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 &  POLY_SUBPIXEL_MASK;
        let fy2 = y2 &  POLY_SUBPIXEL_MASK;

        self.min_x = min(ex2, min(ex1, self.min_x));
        self.min_y = min(ey2, min(ey1, self.min_y));
        self.max_x = max(ex2, max(ex1, self.max_x));
        self.max_y = max(ey2, max(ey1, self.max_y));

        self.set_curr_cell(ex1, ey1);

        // Single row
        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        // Vertical line, one cell per row with identical values
        if dx == 0 {
            let two_fx = (x1 - (ex1 << POLY_SUBPIXEL_SHIFT)) << 1;
            let (first, incr) = if dy < 0 {
                (0, -1)
            } else {
                (POLY_SUBPIXEL_SCALE, 1)
            };
            let delta = first - fy1;
            self.incr_curr_cell(delta, two_fx * delta);

            let mut ey1 = ey1 + incr;
            self.set_curr_cell(ex1, ey1);
            let delta = first + first - POLY_SUBPIXEL_SCALE;
            let area = two_fx * delta;
            while ey1 != ey2 {
                self.curr_cell.cover = delta;
                self.curr_cell.area = area;
                ey1 += incr;
                self.set_curr_cell(ex1, ey1);
            }
            let delta = fy2 - POLY_SUBPIXEL_SCALE + first;
            self.incr_curr_cell(delta, two_fx * delta);
            return;
        }

        // Multiple rows
        let (p, first, incr, dy) = if dy < 0 {
            (fy1 * dx, 0, -1, -dy)
        } else {
            ((POLY_SUBPIXEL_SCALE - fy1) * dx, POLY_SUBPIXEL_SCALE, 1, dy)
        };
        let mut delta = p / dy;
        let mut xmod  = p % dy;
        if xmod < 0 {
            delta -= 1;
            xmod += dy;
        }
        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);
        let mut ey1 = ey1 + incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
        if ey1 != ey2 {
            let p = POLY_SUBPIXEL_SCALE * dx;
            let mut lift = p / dy;
            let mut rem  = p % dy;
            if rem < 0 {
                lift -= 1;
                rem += dy;
            }
            xmod -= dy;
            while ey1 != ey2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dy;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x_to, first);
                x_from = x_to;
                ey1 += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x2, fy2);
    }

    /// Build the row index
    ///
    /// Cells are counted per row, the counts turned into row offsets and the
    /// cell indices scattered into place; each row is then ordered by x.
    /// Equal x values are left in any order. Only the first call after a
    /// reset does any work.
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }
        self.add_curr_cell();
        self.curr_cell = Cell::new();
        if self.num_cells == 0 {
            self.sorted_y.clear();
            self.sorted_cells.clear();
            self.sorted = true;
            return;
        }
        let rows = (self.max_y - self.min_y + 1) as usize;
        let min_y = self.min_y;
        let mut sorted_y = std::mem::take(&mut self.sorted_y);
        sorted_y.clear();
        sorted_y.resize(rows, SortedY::default());

        // Histogram
        for c in self.cells() {
            sorted_y[(c.y - min_y) as usize].start += 1;
        }
        // Histogram to row offsets
        let mut start = 0;
        for row in sorted_y.iter_mut() {
            let n = row.start;
            row.start = start;
            start += n;
        }
        // Scatter cell indices
        let mut sorted_cells = std::mem::take(&mut self.sorted_cells);
        sorted_cells.clear();
        sorted_cells.resize(self.num_cells, 0);
        for (i, c) in self.cells().enumerate() {
            let row = &mut sorted_y[(c.y - min_y) as usize];
            sorted_cells[row.start + row.num] = i as u32;
            row.num += 1;
        }
        // Order each row by x
        for row in sorted_y.iter().filter(|r| r.num > 0) {
            let run = &mut sorted_cells[row.start .. row.start + row.num];
            run.sort_unstable_by_key(|&i| self.cell(i).x);
        }
        self.sorted_y = sorted_y;
        self.sorted_cells = sorted_cells;
        self.sorted = true;
        debug!("sort cells: {} cells, rows {}..={}, x {}..={}",
               self.num_cells, self.min_y, self.max_y, self.min_x, self.max_x);
    }
    fn row(&self, y: i64) -> Option<&SortedY> {
        if ! self.sorted || y < self.min_y || y > self.max_y {
            return None;
        }
        self.sorted_y.get((y - self.min_y) as usize)
    }
    /// Number of cells in row `y`, 0 outside the sorted range
    pub fn scanline_num_cells(&self, y: i64) -> usize {
        self.row(y).map(|r| r.num).unwrap_or(0)
    }
    /// Cells of row `y` ordered by x
    pub fn scanline_cells(&self, y: i64) -> impl Iterator<Item=&Cell> + '_ {
        let run : &[u32] = match self.row(y) {
            Some(r) => &self.sorted_cells[r.start .. r.start + r.num],
            None => &[],
        };
        run.iter().map(move |&i| self.cell(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S : i64 = POLY_SUBPIXEL_SCALE;

    fn square(c: &mut RasterizerCell, x1: i64, y1: i64, x2: i64, y2: i64) {
        c.line(x1, y1, x2, y1);
        c.line(x2, y1, x2, y2);
        c.line(x2, y2, x1, y2);
        c.line(x1, y2, x1, y1);
    }

    fn row(c: &RasterizerCell, y: i64) -> Vec<Cell> {
        c.scanline_cells(y).cloned().collect()
    }

    #[test]
    fn vertical_line_cells() {
        let mut c = RasterizerCell::new();
        c.line(S / 2, 0, S / 2, 3 * S);
        c.sort_cells();
        assert_eq!(c.total_cells(), 3);
        for y in 0 .. 3 {
            let cells = row(&c, y);
            assert_eq!(cells, vec![Cell { x: 0, y, cover: S, area: S * S }]);
        }
        assert_eq!(c.scanline_num_cells(3), 0);
    }

    #[test]
    fn horizontal_line_has_no_cells() {
        let mut c = RasterizerCell::new();
        c.line(0, 10, 10 * S, 10);
        c.sort_cells();
        assert_eq!(c.total_cells(), 0);
        assert!(c.sorted());
        assert_eq!(c.scanline_num_cells(0), 0);
        assert_eq!(c.scanline_cells(0).count(), 0);
    }

    #[test]
    fn square_cover_cancels() {
        let mut c = RasterizerCell::new();
        square(&mut c, 0, 0, 4 * S, 2 * S);
        c.sort_cells();
        assert_eq!((c.min_x(), c.max_x(), c.min_y(), c.max_y()), (0, 4, 0, 2));
        for y in 0 .. 2 {
            let cells = row(&c, y);
            assert_eq!(cells.len(), 2);
            assert_eq!(cells[0].x, 0);
            assert_eq!(cells[1].x, 4);
            assert_eq!(cells[0].cover + cells[1].cover, 0);
            assert_eq!(cells[0].cover.abs(), S);
        }
    }

    #[test]
    fn diagonal_line_area() {
        let mut c = RasterizerCell::new();
        // Crosses one pixel corner to corner
        c.line(0, 0, S, S);
        c.sort_cells();
        let cells = row(&c, 0);
        let cover : i64 = cells.iter().map(|c| c.cover).sum();
        let area : i64 = cells.iter().map(|c| c.area).sum();
        assert_eq!(cover, S);
        assert_eq!(area, S * S);
    }

    #[test]
    fn rows_sorted_by_x() {
        let mut c = RasterizerCell::new();
        square(&mut c, 5 * S, 0, 6 * S, S);
        square(&mut c, 0, 0, S, S);
        square(&mut c, 10 * S, 0, 11 * S, S);
        c.sort_cells();
        let xs : Vec<_> = row(&c, 0).iter().map(|c| c.x).collect();
        let mut sorted = xs.clone();
        sorted.sort();
        assert_eq!(xs, sorted);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut c = RasterizerCell::new();
        square(&mut c, 3, 7, 5 * S + 20, 3 * S + 100);
        c.line(S, S, 4 * S, 2 * S + 5);
        c.sort_cells();
        let first : Vec<Vec<Cell>> = (c.min_y() ..= c.max_y()).map(|y| row(&c, y)).collect();
        let n = c.total_cells();
        c.sort_cells();
        let second : Vec<Vec<Cell>> = (c.min_y() ..= c.max_y()).map(|y| row(&c, y)).collect();
        assert_eq!(first, second);
        assert_eq!(n, c.total_cells());
    }

    #[test]
    fn long_lines_are_split() {
        let mut c = RasterizerCell::new();
        let w = 20_000 * S;
        c.line(0, 0, w, S);
        c.line(w, S, 0, 0);
        c.sort_cells();
        let cover : i64 = row(&c, 0).iter().map(|c| c.cover).sum();
        assert_eq!(cover, 0);
        assert_eq!(c.max_x(), 20_000);
    }

    #[test]
    fn reset_reuses_blocks() {
        let mut c = RasterizerCell::new();
        for i in 0 .. 10 {
            c.line(i * S + 3, 0, i * S + 3, 100 * S);
        }
        let blocks = c.num_blocks();
        assert!(blocks >= 1);
        c.reset();
        assert_eq!(c.total_cells(), 0);
        assert_eq!(c.min_x(), i64::MAX);
        c.line(3, 0, 3, 10 * S);
        c.sort_cells();
        assert_eq!(c.total_cells(), 10);
        assert_eq!(c.num_blocks(), blocks);
    }

    #[test]
    fn overflow_drops_cells() {
        let mut c = RasterizerCell::new();
        let rows = (CELL_BLOCK_LIMIT * CELL_BLOCK_SIZE) as i64;
        // One cell per row, vertical line through every row and beyond
        c.line(S / 2, 0, S / 2, (rows + 10) * S);
        assert!(c.overflowed());
        assert_eq!(c.total_cells(), rows as usize);
        c.reset();
        assert!(! c.overflowed());
    }
}
