//! Curve flattening

use crate::paths::{PathCommand, Vertex};
use crate::VertexSource;

use std::collections::VecDeque;

/// Minimum number of line segments per curve
const CURVE_MIN_STEPS : usize = 4;

fn num_steps(len: f64, scale: f64) -> usize {
    ((len * 0.25 * scale).round() as usize).max(CURVE_MIN_STEPS)
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

/// Points along a quadratic Bezier curve, excluding the start point
pub fn curve3_points(p1: (f64, f64), p2: (f64, f64), p3: (f64, f64),
                     scale: f64) -> Vec<(f64, f64)> {
    let n = num_steps(dist(p1, p2) + dist(p2, p3), scale);
    let mut out = Vec::with_capacity(n);
    for i in 1 .. n {
        let t = i as f64 / n as f64;
        let mt = 1.0 - t;
        let (a, b, c) = (mt * mt, 2.0 * mt * t, t * t);
        out.push((a * p1.0 + b * p2.0 + c * p3.0,
                  a * p1.1 + b * p2.1 + c * p3.1));
    }
    out.push(p3);
    out
}

/// Points along a cubic Bezier curve, excluding the start point
pub fn curve4_points(p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), p4: (f64, f64),
                     scale: f64) -> Vec<(f64, f64)> {
    let n = num_steps(dist(p1, p2) + dist(p2, p3) + dist(p3, p4), scale);
    let mut out = Vec::with_capacity(n);
    for i in 1 .. n {
        let t = i as f64 / n as f64;
        let mt = 1.0 - t;
        let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
        out.push((a * p1.0 + b * p2.0 + c * p3.0 + d * p4.0,
                  a * p1.1 + b * p2.1 + c * p3.1 + d * p4.1));
    }
    out.push(p4);
    out
}

/// Replace curve3 and curve4 commands by line_to segments
///
/// Curves start at the previous vertex. The number of segments follows the
/// curve length and [approximation_scale](#method.approximation_scale),
/// which should match the scale of any transform applied afterwards.
#[derive(Debug)]
pub struct ConvCurve<VS> {
    source: VS,
    scale: f64,
    last: (f64, f64),
    pending: VecDeque<(f64, f64)>,
}

impl<VS: VertexSource> ConvCurve<VS> {
    pub fn new(source: VS) -> Self {
        Self { source, scale: 1.0, last: (0.0, 0.0), pending: VecDeque::new() }
    }
    pub fn approximation_scale(&mut self, scale: f64) {
        self.scale = scale;
    }
    pub fn source(&self) -> &VS {
        &self.source
    }
    /// Next vertex of the source, None at the end of the path
    fn point(&mut self) -> Option<(f64, f64)> {
        self.source.vertex().map(|v| (v.x, v.y))
    }
}

impl<VS: VertexSource> VertexSource for ConvCurve<VS> {
    fn rewind(&mut self, path_id: usize) {
        self.source.rewind(path_id);
        self.last = (0.0, 0.0);
        self.pending.clear();
    }
    fn vertex(&mut self) -> Option<Vertex<f64>> {
        if let Some((x, y)) = self.pending.pop_front() {
            self.last = (x, y);
            return Some(Vertex::line_to(x, y));
        }
        let v = self.source.vertex()?;
        let pts = match v.cmd {
            PathCommand::Curve3 => {
                let end = self.point().unwrap_or((v.x, v.y));
                curve3_points(self.last, (v.x, v.y), end, self.scale)
            },
            PathCommand::Curve4 => {
                let c2 = self.point().unwrap_or((v.x, v.y));
                let end = self.point().unwrap_or(c2);
                curve4_points(self.last, (v.x, v.y), c2, end, self.scale)
            },
            _ => {
                if v.cmd.is_vertex() {
                    self.last = (v.x, v.y);
                }
                return Some(v);
            }
        };
        self.pending.extend(pts);
        self.vertex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::Path;

    fn collect<VS: VertexSource>(vs: &mut VS) -> Vec<Vertex<f64>> {
        vs.rewind(0);
        std::iter::from_fn(|| vs.vertex()).collect()
    }

    #[test]
    fn lines_pass_through() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(5.0, 0.0);
        p.close_polygon();
        let out = collect(&mut ConvCurve::new(&mut p));
        assert_eq!(out, p.vertices().to_vec());
    }

    #[test]
    fn curve3_is_flattened() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.curve3(50.0, 100.0, 100.0, 0.0);
        let out = collect(&mut ConvCurve::new(&mut p));
        assert!(out.len() > CURVE_MIN_STEPS);
        assert!(out[1..].iter().all(|v| v.cmd == PathCommand::LineTo));
        let last = out[out.len()-1];
        assert_eq!((last.x, last.y), (100.0, 0.0));
        // Apex of the parabola at t = 0.5
        let top = out.iter().map(|v| v.y).fold(0.0, f64::max);
        assert!(top <= 50.0 + 1e-9 && top > 49.0);
    }

    #[test]
    fn curve4_follows_scale() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.curve4(0.0, 50.0, 100.0, 50.0, 100.0, 0.0);
        p.line_to(0.0, 0.0);
        let coarse = collect(&mut ConvCurve::new(&mut p));
        let mut fine = ConvCurve::new(&mut p);
        fine.approximation_scale(4.0);
        let fine = collect(&mut fine);
        assert!(fine.len() > coarse.len());
        let last = coarse[coarse.len()-1];
        assert_eq!(last, Vertex::line_to(0.0, 0.0));
    }
}
