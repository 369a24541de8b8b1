//! Elliptical arcs as cubic Bezier curves

use crate::paths::{PathCommand, Vertex};
use crate::transform::Transform;
use crate::VertexSource;

use std::f64::consts::PI;

/// Sweep tolerance when splitting an arc into quadrants
///
/// A final piece slightly larger than pi/2 is accepted instead of adding
/// a degenerate curve
const ARC_ANGLE_EPSILON : f64 = 0.01;

/// Sweep below which an arc is a straight line
const ARC_SWEEP_MIN : f64 = 1e-10;

/// Approximate an arc of at most pi/2 by a single cubic Bezier curve
///
/// Returns start point, two control points and end point
pub fn arc_to_bezier(cx: f64, cy: f64, rx: f64, ry: f64,
                     start_angle: f64, sweep_angle: f64) -> [(f64, f64); 4] {
    let (y0, x0) = (sweep_angle / 2.0).sin_cos();
    let tx = (1.0 - x0) * 4.0 / 3.0;
    let ty = y0 - tx * x0 / y0;
    let px = [x0, x0 + tx, x0 + tx, x0];
    let py = [-y0, -ty, ty, y0];
    let (sn, cs) = (start_angle + sweep_angle / 2.0).sin_cos();

    let mut out = [(0.0, 0.0); 4];
    for (i, p) in out.iter_mut().enumerate() {
        *p = (cx + rx * (px[i] * cs - py[i] * sn),
              cy + ry * (px[i] * sn + py[i] * cs));
    }
    out
}

/// Arc from center, radii, start angle and sweep
///
/// Produces a move_to followed by up to four curve4 segments, or a single
/// line_to when the sweep is negligible.
#[derive(Debug,Clone,Default)]
pub struct BezierArc {
    points: Vec<(f64, f64)>,
    cmd: PathCommand,
    pos: usize,
}

impl BezierArc {
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, start_angle: f64, sweep_angle: f64) -> Self {
        let mut arc = Self::default();
        arc.init(x, y, rx, ry, start_angle, sweep_angle);
        arc
    }
    pub fn init(&mut self, x: f64, y: f64, rx: f64, ry: f64,
                start_angle: f64, sweep_angle: f64) {
        let mut start_angle = start_angle % (2.0 * PI);
        let sweep_angle = sweep_angle.max(-2.0 * PI).min(2.0 * PI);
        self.points.clear();
        self.pos = 0;

        if sweep_angle.abs() < ARC_SWEEP_MIN {
            self.cmd = PathCommand::LineTo;
            self.points.push((x + rx * start_angle.cos(), y + ry * start_angle.sin()));
            let end = start_angle + sweep_angle;
            self.points.push((x + rx * end.cos(), y + ry * end.sin()));
            return;
        }

        self.cmd = PathCommand::Curve4;
        let quarter = if sweep_angle < 0.0 { -PI * 0.5 } else { PI * 0.5 };
        let mut total_sweep = 0.0;
        for _ in 0 .. 4 {
            let prev_sweep = total_sweep;
            let mut local_sweep = quarter;
            total_sweep += quarter;
            let done = if sweep_angle < 0.0 {
                total_sweep <= sweep_angle + ARC_ANGLE_EPSILON
            } else {
                total_sweep >= sweep_angle - ARC_ANGLE_EPSILON
            };
            if done {
                local_sweep = sweep_angle - prev_sweep;
            }
            let curve = arc_to_bezier(x, y, rx, ry, start_angle, local_sweep);
            if self.points.is_empty() {
                self.points.push(curve[0]);
            }
            self.points.extend_from_slice(&curve[1..]);
            start_angle += local_sweep;
            if done {
                break;
            }
        }
    }
    /// Number of generated points, including the start point
    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
    fn points_mut(&mut self) -> &mut [(f64, f64)] {
        &mut self.points
    }
}

impl VertexSource for BezierArc {
    fn rewind(&mut self, _path_id: usize) {
        self.pos = 0;
    }
    fn vertex(&mut self) -> Option<Vertex<f64>> {
        let (x, y) = *self.points.get(self.pos)?;
        let cmd = if self.pos == 0 { PathCommand::MoveTo } else { self.cmd };
        self.pos += 1;
        Some(Vertex::new(x, y, cmd))
    }
}

/// Arc between two points, SVG style
///
/// Computes center and angles from the end points, radii, x-axis rotation
/// and the large arc and sweep flags. The generated arc starts and ends
/// exactly at the given points.
#[derive(Debug,Clone,Default)]
pub struct BezierArcSvg {
    arc: BezierArc,
    radii_ok: bool,
}

impl BezierArcSvg {
    #[allow(clippy::too_many_arguments)]
    pub fn new(x0: f64, y0: f64, rx: f64, ry: f64, angle: f64,
               large_arc: bool, sweep: bool, x2: f64, y2: f64) -> Self {
        let mut a = Self::default();
        a.init(x0, y0, rx, ry, angle, large_arc, sweep, x2, y2);
        a
    }
    #[allow(clippy::too_many_arguments)]
    pub fn init(&mut self, x0: f64, y0: f64, rx: f64, ry: f64, angle: f64,
                large_arc: bool, sweep: bool, x2: f64, y2: f64) {
        self.radii_ok = true;
        let mut rx = rx.abs();
        let mut ry = ry.abs();

        // Midpoint in the rotated frame
        let dx2 = (x0 - x2) / 2.0;
        let dy2 = (y0 - y2) / 2.0;
        let (sin_a, cos_a) = angle.sin_cos();
        let x1 =  cos_a * dx2 + sin_a * dy2;
        let y1 = -sin_a * dx2 + cos_a * dy2;

        let mut prx = rx * rx;
        let mut pry = ry * ry;
        let px1 = x1 * x1;
        let py1 = y1 * y1;

        // Radii too small for the chord are scaled up
        let radii_check = px1 / prx + py1 / pry;
        if radii_check > 1.0 {
            rx *= radii_check.sqrt();
            ry *= radii_check.sqrt();
            prx = rx * rx;
            pry = ry * ry;
            if radii_check > 10.0 {
                self.radii_ok = false;
            }
        }

        // Center in the rotated frame
        let sign = if large_arc == sweep { -1.0 } else { 1.0 };
        let sq = (prx * pry - prx * py1 - pry * px1) / (prx * py1 + pry * px1);
        let coef = sign * sq.max(0.0).sqrt();
        let cx1 = coef *  ((rx * y1) / ry);
        let cy1 = coef * -((ry * x1) / rx);

        let sx2 = (x0 + x2) / 2.0;
        let sy2 = (y0 + y2) / 2.0;
        let cx = sx2 + (cos_a * cx1 - sin_a * cy1);
        let cy = sy2 + (sin_a * cx1 + cos_a * cy1);

        let ux =  (x1 - cx1) / rx;
        let uy =  (y1 - cy1) / ry;
        let vx = (-x1 - cx1) / rx;
        let vy = (-y1 - cy1) / ry;

        let n = (ux * ux + uy * uy).sqrt();
        let sign = if uy < 0.0 { -1.0 } else { 1.0 };
        let start_angle = sign * (ux / n).max(-1.0).min(1.0).acos();

        let n = ((ux * ux + uy * uy) * (vx * vx + vy * vy)).sqrt();
        let p = ux * vx + uy * vy;
        let sign = if ux * vy - uy * vx < 0.0 { -1.0 } else { 1.0 };
        let mut sweep_angle = sign * (p / n).max(-1.0).min(1.0).acos();
        if ! sweep && sweep_angle > 0.0 {
            sweep_angle -= PI * 2.0;
        } else if sweep && sweep_angle < 0.0 {
            sweep_angle += PI * 2.0;
        }

        self.arc.init(0.0, 0.0, rx, ry, start_angle, sweep_angle);
        let mut mtx = Transform::new_rotate(angle);
        mtx.translate(cx, cy);
        let pts = self.arc.points_mut();
        let n = pts.len();
        for p in pts.iter_mut().take(n.saturating_sub(1)).skip(1) {
            *p = mtx.transform(p.0, p.1);
        }
        if let Some(first) = pts.first_mut() {
            *first = (x0, y0);
        }
        if n > 1 {
            pts[n-1] = (x2, y2);
        }
        trace!("svg arc: center ({:.3},{:.3}) start {:.4} sweep {:.4} radii_ok {}",
               cx, cy, start_angle, sweep_angle, self.radii_ok);
    }
    /// Radii were usable, or needed only a modest scale up
    pub fn radii_ok(&self) -> bool {
        self.radii_ok
    }
    pub fn num_vertices(&self) -> usize {
        self.arc.num_vertices()
    }
}

impl VertexSource for BezierArcSvg {
    fn rewind(&mut self, path_id: usize) {
        self.arc.rewind(path_id);
    }
    fn vertex(&mut self) -> Option<Vertex<f64>> {
        self.arc.vertex()
    }
}
