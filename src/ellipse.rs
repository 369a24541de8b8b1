//! Ellipse

use crate::paths::{PathCommand, PathOrientation, Vertex};
use crate::VertexSource;

use std::f64::consts::PI;

/// Closed polygonal approximation of an ellipse
///
/// Without an explicit step count the number of points is derived from the
/// radii so the chord error stays near 1/8 pixel, scaled by
/// [approximation_scale](#method.approximation_scale)
#[derive(Debug,Clone)]
pub struct Ellipse {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    scale: f64,
    num: usize,
    step: usize,
    cw: bool,
}

impl Ellipse {
    /// Ellipse centered at (`x`,`y`); `num_steps` of 0 picks a count
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, num_steps: usize, cw: bool) -> Self {
        let mut e = Self { x, y, rx, ry, scale: 1.0, num: num_steps, step: 0, cw };
        if e.num == 0 {
            e.calc_num_steps();
        }
        e
    }
    pub fn approximation_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.calc_num_steps();
    }
    pub fn num_steps(&self) -> usize {
        self.num
    }
    fn calc_num_steps(&mut self) {
        let ra = (self.rx.abs() + self.ry.abs()) / 2.0;
        let da = (ra / (ra + 0.125 / self.scale)).acos() * 2.0;
        self.num = ((2.0 * PI / da).round() as usize).max(3);
    }
}

impl VertexSource for Ellipse {
    fn rewind(&mut self, _path_id: usize) {
        self.step = 0;
    }
    fn vertex(&mut self) -> Option<Vertex<f64>> {
        if self.step == self.num {
            self.step += 1;
            let o = if self.cw {
                PathOrientation::Clockwise
            } else {
                PathOrientation::CounterClockwise
            };
            return Some(Vertex::new(0.0, 0.0, PathCommand::close().with_orientation(o)));
        }
        if self.step > self.num {
            return None;
        }
        let mut angle = self.step as f64 / self.num as f64 * 2.0 * PI;
        if self.cw {
            angle = 2.0 * PI - angle;
        }
        let x = self.x + angle.cos() * self.rx;
        let y = self.y + angle.sin() * self.ry;
        let cmd = if self.step == 0 { PathCommand::MoveTo } else { PathCommand::LineTo };
        self.step += 1;
        Some(Vertex::new(x, y, cmd))
    }
}
