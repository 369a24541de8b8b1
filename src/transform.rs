//! Transformations

use crate::paths::Vertex;
use crate::VertexSource;

use std::ops::Mul;

/// Affine transformation
///
/// Maps a point by
///
/// ```text
///     x' = x * sx  + y * shx + tx
///     y' = x * shy + y * sy  + ty
/// ```
///
/// Composition follows the order of application: `a.multiply(&b)` applies
/// `a` then `b`.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub shx: f64,
    pub shy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a new identity Transform
    pub fn new() -> Self {
        Self { sx: 1.0,  sy: 1.0,
               shx: 0.0, shy: 0.0,
               tx: 0.0,  ty: 0.0,
        }
    }
    /// Creates a Transform from its coefficients
    pub fn from_parts(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self { sx, shy, shx, sy, tx, ty }
    }
    /// Add a translation to the transform
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }
    /// Add a scaling to the transform
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.sx  *= sx;
        self.shx *= sx;
        self.tx  *= sx;
        self.sy  *= sy;
        self.shy *= sy;
        self.ty  *= sy;
    }
    /// Add a rotation to the transform
    ///
    /// angle is in radians
    pub fn rotate(&mut self, angle: f64) {
        let (sa, ca) = angle.sin_cos();
        let t0   = self.sx  * ca - self.shy * sa;
        let t2   = self.shx * ca - self.sy  * sa;
        let t4   = self.tx  * ca - self.ty  * sa;
        self.shy = self.sx  * sa + self.shy * ca;
        self.sy  = self.shx * sa + self.sy  * ca;
        self.ty  = self.tx  * sa + self.ty  * ca;
        self.sx  = t0;
        self.shx = t2;
        self.tx  = t4;
    }
    /// Shear points before the current transform is applied
    pub fn shear(&mut self, x: f64, y: f64) {
        self.premultiply(&Self::new_shear(x, y));
    }
    /// Mirror about the y axis after the current transform
    pub fn flip_x(&mut self) {
        self.sx  = -self.sx;
        self.shy = -self.shy;
        self.tx  = -self.tx;
    }
    /// Mirror about the x axis after the current transform
    pub fn flip_y(&mut self) {
        self.shx = -self.shx;
        self.sy  = -self.sy;
        self.ty  = -self.ty;
    }
    /// Reset to identity
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Perform the transform
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx  + y * self.shx + self.tx,
         x * self.shy + y * self.sy  + self.ty)
    }
    /// Perform the transform without translation
    pub fn transform_2x2(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx  + y * self.shx,
         x * self.shy + y * self.sy)
    }
    /// Perform the inverse transform
    ///
    /// A singular matrix yields non-finite values
    pub fn inverse_transform(&self, x: f64, y: f64) -> (f64, f64) {
        let d = 1.0 / self.determinant();
        let a = (x - self.tx) * d;
        let b = (y - self.ty) * d;
        (a * self.sy - b * self.shx,
         b * self.sx - a * self.shy)
    }
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }
    /// Invert the transform in place
    ///
    /// A singular matrix yields non-finite coefficients
    pub fn invert(&mut self) {
        let d = 1.0 / self.determinant();
        let t0 = self.sy * d;
        self.sy = self.sx * d;
        self.shy = -self.shy * d;
        self.shx = -self.shx * d;
        let t4  = -self.tx * t0  - self.ty * self.shx;
        self.ty = -self.tx * self.shy - self.ty * self.sy;

        self.sx = t0;
        self.tx = t4;
    }
    /// Apply `m` after the current transform
    pub fn multiply(&mut self, m: &Transform) {
        *self = self.mul_transform(m);
    }
    /// Apply `m` before the current transform
    pub fn premultiply(&mut self, m: &Transform) {
        *self = m.mul_transform(self);
    }
    pub fn mul_transform(&self, m: &Transform) -> Self {
        let t0  = self.sx  * m.sx  + self.shy * m.shx;
        let t2  = self.shx * m.sx  + self.sy  * m.shx;
        let t4  = self.tx  * m.sx  + self.ty  * m.shx + m.tx;
        let shy = self.sx  * m.shy + self.shy * m.sy;
        let sy  = self.shx * m.shy + self.sy  * m.sy;
        let ty  = self.tx  * m.shy + self.ty  * m.sy + m.ty;
        let sx  = t0;
        let shx = t2;
        let tx  = t4;
        Transform { sx, sy, tx, ty, shx, shy }
    }
    /// Coefficients match identity within `eps`
    pub fn is_identity(&self, eps: f64) -> bool {
        self.is_equal(&Self::new(), eps)
    }
    /// Coefficients match `m` within `eps`
    pub fn is_equal(&self, m: &Transform, eps: f64) -> bool {
        self.store_to().iter()
            .zip(m.store_to().iter())
            .all(|(a,b)| (a-b).abs() <= eps)
    }
    /// Rotation angle in radians
    pub fn rotation(&self) -> f64 {
        let (x1, y1) = self.transform(0.0, 0.0);
        let (x2, y2) = self.transform(1.0, 0.0);
        (y2-y1).atan2(x2-x1)
    }
    pub fn translation(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }
    /// Scaling along each axis once rotation is removed
    pub fn scaling(&self) -> (f64, f64) {
        let t = self.mul_transform(&Self::new_rotate(-self.rotation()));
        let (x1, y1) = t.transform(0.0, 0.0);
        let (x2, y2) = t.transform(1.0, 1.0);
        (x2 - x1, y2 - y1)
    }
    /// Average scale factor
    pub fn average_scale(&self) -> f64 {
        let x = std::f64::consts::FRAC_1_SQRT_2 * (self.sx + self.shx);
        let y = std::f64::consts::FRAC_1_SQRT_2 * (self.shy + self.sy);
        (x * x + y * y).sqrt()
    }
    /// Coefficients in the order sx, shy, shx, sy, tx, ty
    pub fn store_to(&self) -> [f64; 6] {
        [self.sx, self.shy, self.shx, self.sy, self.tx, self.ty]
    }
    /// Load coefficients in the order sx, shy, shx, sy, tx, ty
    pub fn load_from(&mut self, m: &[f64; 6]) {
        *self = Self::from_parts(m[0], m[1], m[2], m[3], m[4], m[5]);
    }
    pub fn new_scale(sx: f64, sy: f64) -> Transform {
        let mut t = Self::new();
        t.scale(sx,sy);
        t
    }
    pub fn new_translate(tx: f64, ty: f64) -> Transform {
        let mut t = Self::new();
        t.translate(tx,ty);
        t
    }
    pub fn new_rotate(ang: f64) -> Transform {
        let mut t = Self::new();
        t.rotate(ang);
        t
    }
    pub fn new_shear(x: f64, y: f64) -> Transform {
        Self::from_parts(1.0, y, x, 1.0, 0.0, 0.0)
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Self {
        self.mul_transform(&rhs)
    }
}

/// Path Transform
///
/// Applies a [Transform] to every vertex command of a source
///
/// [Transform]: struct.Transform.html
#[derive(Debug)]
pub struct ConvTransform<VS> {
    /// Source to Transform
    pub source: VS,
    /// Transform to apply
    pub trans: Transform,
}

impl<VS: VertexSource> ConvTransform<VS> {
    /// Create a new Path Transform
    pub fn new(source: VS, trans: Transform) -> Self {
        Self { source, trans }
    }
}

impl<VS: VertexSource> VertexSource for ConvTransform<VS> {
    fn rewind(&mut self, path_id: usize) {
        self.source.rewind(path_id);
    }
    fn vertex(&mut self) -> Option<Vertex<f64>> {
        let mut v = self.source.vertex()?;
        if v.cmd.is_vertex() {
            let (x,y) = self.trans.transform(v.x, v.y);
            v.x = x;
            v.y = y;
        }
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{Path, PathCommand};
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn compose_order() {
        let mut t = Transform::new_scale(2.0, 3.0);
        t.multiply(&Transform::new_translate(1.0, 1.0));
        assert_eq!(t.transform(1.0, 1.0), (3.0, 4.0));

        let mut t = Transform::new_scale(2.0, 3.0);
        t.premultiply(&Transform::new_translate(1.0, 1.0));
        assert_eq!(t.transform(1.0, 1.0), (4.0, 6.0));

        let t = Transform::new_rotate(PI / 2.0) * Transform::new_translate(10.0, 0.0);
        assert!(close(t.transform(1.0, 0.0), (10.0, 1.0)));
    }

    #[test]
    fn invert_round_trip() {
        let mut t = Transform::new_rotate(0.3);
        t.scale(2.0, 0.5);
        t.translate(5.0, -7.0);
        t.shear(0.2, 0.1);
        let (x, y) = t.transform(3.0, 4.0);
        assert!(close(t.inverse_transform(x, y), (3.0, 4.0)));

        let mut inv = t;
        inv.invert();
        assert!(close(inv.transform(x, y), (3.0, 4.0)));
        assert!((t * inv).is_identity(1e-9));
    }

    #[test]
    fn singular_matrix_is_not_finite() {
        let mut t = Transform::new_scale(0.0, 1.0);
        t.invert();
        assert!(! t.sx.is_finite());
        let (x, _) = Transform::new_scale(0.0, 0.0).inverse_transform(1.0, 1.0);
        assert!(! x.is_finite());
    }

    #[test]
    fn shear_applies_first() {
        let mut t = Transform::new_translate(5.0, 0.0);
        t.shear(1.0, 0.0);
        assert_eq!(t.transform(0.0, 2.0), (7.0, 2.0));
        assert_eq!(Transform::new_shear(0.0, 0.5).transform(2.0, 0.0), (2.0, 1.0));
    }

    #[test]
    fn flips_and_reset() {
        let mut t = Transform::new_translate(1.0, 2.0);
        t.flip_x();
        assert_eq!(t.transform(1.0, 1.0), (-2.0, 3.0));
        t.flip_y();
        assert_eq!(t.transform(1.0, 1.0), (-2.0, -3.0));
        t.reset();
        assert!(t.is_identity(EPS));
    }

    #[test]
    fn queries() {
        let mut t = Transform::new_scale(2.0, 3.0);
        t.rotate(0.5);
        t.translate(4.0, 5.0);
        assert!((t.rotation() - 0.5).abs() < 1e-12);
        assert_eq!(t.translation(), (t.tx, t.ty));
        let (sx, sy) = t.scaling();
        assert!((sx - 2.0).abs() < 1e-9);
        assert!((sy - 3.0).abs() < 1e-9);
        assert!((Transform::new_scale(2.0, 2.0).average_scale() - 2.0).abs() < 1e-12);
        assert!((t.determinant() - 6.0).abs() < 1e-9);
        assert_eq!(t.transform_2x2(0.0, 0.0), (0.0, 0.0));

        let mut u = Transform::new();
        u.load_from(&t.store_to());
        assert!(u.is_equal(&t, 0.0));
        assert!(! u.is_equal(&Transform::new(), EPS));
    }

    #[test]
    fn conv_transform_skips_commands() {
        let mut p = Path::new();
        p.move_to(1.0, 1.0);
        p.line_to(2.0, 1.0);
        p.close_polygon();
        let mut t = ConvTransform::new(&mut p, Transform::new_translate(1.0, 0.0));
        t.rewind(0);
        assert_eq!(t.vertex(), Some(Vertex::move_to(2.0, 1.0)));
        assert_eq!(t.vertex(), Some(Vertex::line_to(3.0, 1.0)));
        assert_eq!(t.vertex(), Some(Vertex::new(0.0, 0.0, PathCommand::close())));
        assert_eq!(t.vertex(), None);
    }
}
