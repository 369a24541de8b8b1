//! Scanlines

use crate::Scanline;

/// Run of pixels in a scanline
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Span {
    /// Starting x
    pub x: i64,
    /// Number of pixels
    pub len: i64,
    /// Offset of the first coverage value in the scanline covers
    start: usize,
}

/// Row of coverage spans with one coverage value per pixel
///
/// Adjacent cells and spans are merged into a single span
#[derive(Debug,Default)]
pub struct ScanlineU8 {
    last_x: i64,
    spans: Vec<Span>,
    covers: Vec<u64>,
    y: i64,
}

const LAST_X: i64 = 0x7FFF_FFF0;

impl ScanlineU8 {
    pub fn new() -> Self {
        Self { last_x: LAST_X, y: 0,
               spans: vec![], covers: vec![] }
    }
    /// Row of the completed scanline
    pub fn y(&self) -> i64 {
        self.y
    }
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }
    /// Coverage values of span `span`, one per pixel
    pub fn covers(&self, span: &Span) -> &[u64] {
        &self.covers[span.start .. span.start + span.len as usize]
    }
    /// Spans paired with their coverage values
    pub fn iter(&self) -> impl Iterator<Item=(&Span, &[u64])> + '_ {
        self.spans.iter().map(move |s| (s, self.covers(s)))
    }
    fn extends_last(&self, x: i64) -> bool {
        x == self.last_x + 1 && ! self.spans.is_empty()
    }
}

impl Scanline for ScanlineU8 {
    /// Spans keep absolute x; the bounds are not needed for packed covers
    fn reset(&mut self, _min_x: i64, _max_x: i64) {
        self.reset_spans();
    }
    fn reset_spans(&mut self) {
        self.last_x = LAST_X;
        self.spans.clear();
        self.covers.clear();
    }
    fn finalize(&mut self, y: i64) {
        self.y = y;
    }
    fn num_spans(&self) -> usize {
        self.spans.len()
    }
    fn add_span(&mut self, x: i64, len: i64, cover: u64) {
        if len <= 0 {
            return;
        }
        let start = self.covers.len();
        self.covers.extend(std::iter::repeat(cover).take(len as usize));
        if self.extends_last(x) {
            if let Some(cur) = self.spans.last_mut() {
                cur.len += len;
            }
        } else {
            self.spans.push( Span { x, len, start } );
        }
        self.last_x = x + len - 1;
    }
    fn add_cell(&mut self, x: i64, cover: u64) {
        let start = self.covers.len();
        self.covers.push(cover);
        if self.extends_last(x) {
            if let Some(cur) = self.spans.last_mut() {
                cur.len += 1;
            }
        } else {
            self.spans.push( Span { x, len: 1, start } );
        }
        self.last_x = x;
    }
}

/// Point containment query
///
/// Receives the sweep of a single row and records whether pixel `x` has
/// any coverage
#[derive(Debug,Copy,Clone)]
pub struct ScanlineHitTest {
    x: i64,
    hit: bool,
}

impl ScanlineHitTest {
    pub fn new(x: i64) -> Self {
        Self { x, hit: false }
    }
    pub fn x(&self) -> i64 {
        self.x
    }
    pub fn hit(&self) -> bool {
        self.hit
    }
}

impl Scanline for ScanlineHitTest {
    fn reset(&mut self, _min_x: i64, _max_x: i64) { }
    fn reset_spans(&mut self) { }
    fn finalize(&mut self, _y: i64) { }
    fn num_spans(&self) -> usize {
        1
    }
    fn add_cell(&mut self, x: i64, _cover: u64) {
        if self.x == x {
            self.hit = true;
        }
    }
    fn add_span(&mut self, x: i64, len: i64, _cover: u64) {
        if self.x >= x && self.x < x + len {
            self.hit = true;
        }
    }
}
