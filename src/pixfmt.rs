//! Pixel Format

use crate::buffer::RenderingBuffer;
use crate::color::*;
use crate::comp::CompOp;
use crate::math::*;

use crate::Color;
use crate::Source;
use crate::Pixel;
use crate::PixelData;

use std::marker::PhantomData;

/// Pixel Format Wrapper around raw pixel component data
///
/// Blending goes through the active [CompOp] and the global alpha.
/// Source over uses 8-bit fixed point arithmetic, the other operators
/// are computed in floating point.
///
/// [CompOp]: ../comp/enum.CompOp.html
#[derive(Debug,Clone)]
pub struct Pixfmt<T> {
    rbuf: RenderingBuffer,
    comp_op: CompOp,
    alpha: u8,
    phantom: PhantomData<T>,
}

impl<T> Pixfmt<T> where Pixfmt<T>: Pixel {
    /// Create new Pixel Format of width * height * bpp
    ///
    /// Allocates memory of width * height * bpp, all components zero
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_buffer(RenderingBuffer::new(width, height, Self::bpp()))
    }
    /// Wrap existing pixel data, None if the length does not match
    pub fn from_vec(data: Vec<u8>, width: usize, height: usize) -> Option<Self> {
        RenderingBuffer::from_vec(data, width, height, Self::bpp())
            .map(Self::with_buffer)
    }
    fn with_buffer(rbuf: RenderingBuffer) -> Self {
        Self { rbuf, comp_op: CompOp::default(), alpha: 255, phantom: PhantomData }
    }
    /// Size of Rendering Buffer in bytes; width * height * bpp
    pub fn size(&self) -> usize {
        self.rbuf.len()
    }
    /// Clear the Image
    ///
    /// All color components are set to 255, including `alpha` if present
    ///
    ///     use vraster::{Source,Pixfmt,Rgb8,Rgba8};
    ///
    ///     let mut pix = Pixfmt::<Rgb8>::new(2,2);
    ///     pix.clear();
    ///     assert_eq!(pix.get((1,1)), Rgba8::white());
    ///
    pub fn clear(&mut self) {
        self.rbuf.fill(255);
    }
    /// Set the composite operator used by blending
    pub fn comp_op(&mut self, op: CompOp) {
        self.comp_op = op;
    }
    pub fn get_comp_op(&self) -> CompOp {
        self.comp_op
    }
    /// Set the global alpha [0,1], multiplied into every source color
    pub fn alpha(&mut self, alpha: f64) {
        self.alpha = cu8(alpha);
    }
    pub fn get_alpha(&self) -> f64 {
        f64::from(self.alpha) / 255.0
    }
    /// Source color with the global alpha applied, as [0,1] components
    fn source<C: Color>(&self, c: &C) -> ([u8; 3], u8) {
        ([c.red8(), c.green8(), c.blue8()], multiply_u8(c.alpha8(), self.alpha))
    }
    /// Blend through the floating point operators
    ///
    /// Returns the premultiplied result
    fn composite(&self, s: ([u8; 3], u8), d: Rgba8, cover: u64) -> [f64; 4] {
        let f = |v: u8| f64::from(v) / 255.0;
        let src = [f(s.0[0]), f(s.0[1]), f(s.0[2]), f(s.1)];
        let dst = [f(d.r), f(d.g), f(d.b), f(d.a)];
        self.comp_op.composite(src, dst, cover.min(255) as f64 / 255.0)
    }
}

impl<T> PixelData for Pixfmt<T> {
    fn pixeldata(&self) -> &[u8] {
        &self.rbuf.data
    }
}

impl Source for Pixfmt<Rgba8> {
    fn get(&self, id: (usize, usize)) -> Rgba8 {
        let p = &self.rbuf[id];
        Rgba8::new(p[0], p[1], p[2], p[3])
    }
    fn width(&self) -> usize {
        self.rbuf.width
    }
    fn height(&self) -> usize {
        self.rbuf.height
    }
}

impl Source for Pixfmt<Rgb8> {
    fn get(&self, id: (usize, usize)) -> Rgba8 {
        let p = &self.rbuf[id];
        Rgba8::new(p[0], p[1], p[2], 255)
    }
    fn width(&self) -> usize {
        self.rbuf.width
    }
    fn height(&self) -> usize {
        self.rbuf.height
    }
}

impl Pixel for Pixfmt<Rgba8> {
    fn bpp() -> usize { 4 }
    fn set<C: Color>(&mut self, id: (usize, usize), c: C) {
        let p = &mut self.rbuf[id];
        p[0] = c.red8();
        p[1] = c.green8();
        p[2] = c.blue8();
        p[3] = c.alpha8();
    }
    fn blend_pix<C: Color>(&mut self, id: (usize, usize), c: C, cover: u64) {
        let s = self.source(&c);
        let p = self.get(id);
        let pix = if self.comp_op == CompOp::SrcOver {
            let alpha = multiply_u8(s.1, cover.min(255) as u8);
            Rgba8::new(lerp_u8(p.r, s.0[0], alpha),
                       lerp_u8(p.g, s.0[1], alpha),
                       lerp_u8(p.b, s.0[2], alpha),
                       prelerp_u8(p.a, alpha, alpha))
        } else {
            let r = self.composite(s, p, cover);
            if r[3] <= 0.0 {
                Rgba8::transparent()
            } else {
                Rgba8::from_f64(r[0] / r[3], r[1] / r[3], r[2] / r[3], r[3])
            }
        };
        self.set(id, pix);
    }
    fn rbuf(&self) -> &RenderingBuffer {
        &self.rbuf
    }
    fn rbuf_mut(&mut self) -> &mut RenderingBuffer {
        &mut self.rbuf
    }
}

impl Pixel for Pixfmt<Rgb8> {
    fn bpp() -> usize { 3 }
    fn set<C: Color>(&mut self, id: (usize, usize), c: C) {
        let p = &mut self.rbuf[id];
        p[0] = c.red8();
        p[1] = c.green8();
        p[2] = c.blue8();
    }
    /// Blend onto an opaque destination
    ///
    /// Operators leaving a partially transparent result are stored
    /// premultiplied, as if composited onto black
    fn blend_pix<C: Color>(&mut self, id: (usize, usize), c: C, cover: u64) {
        let s = self.source(&c);
        let p = self.get(id);
        let pix = if self.comp_op == CompOp::SrcOver {
            let alpha = multiply_u8(s.1, cover.min(255) as u8);
            Rgb8::new(lerp_u8(p.r, s.0[0], alpha),
                      lerp_u8(p.g, s.0[1], alpha),
                      lerp_u8(p.b, s.0[2], alpha))
        } else {
            let r = self.composite(s, p, cover);
            Rgb8::new(cu8(r[0]), cu8(r[1]), cu8(r[2]))
        };
        self.set(id, pix);
    }
    fn rbuf(&self) -> &RenderingBuffer {
        &self.rbuf
    }
    fn rbuf_mut(&mut self) -> &mut RenderingBuffer {
        &mut self.rbuf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixfmt_test() {
        let mut p = Pixfmt::<Rgb8>::new(10,10);
        assert_eq!(p.size(), 300);

        p.copy_pixel(0,0, Rgb8::black());
        assert_eq!(p.get((0,0)), Rgba8::black());

        assert_ne!(p.get((1,0)), Rgba8::white());
        p.copy_pixel(1,0, Rgb8::white());
        assert_eq!(p.get((1,0)), Rgba8::white());

        let red = Rgba8::new(255,0,0,255);
        p.copy_hline(0,1,10, red);
        for i in 0 .. 10 {
            assert_eq!(p.get((i,1)), red);
        }
        // Clamped to the buffer
        p.copy_hline(5,2,100, red);
        assert_eq!(p.get((9,2)), red);
        assert_eq!(p.get((4,2)), Rgba8::new(0,0,0,255));
        // Ignored, outside
        p.copy_hline(0,10,10, red);
        p.copy_pixel(10,0, red);

        p.clear();
        for j in 0 .. 10 {
            for i in 0 .. 10 {
                assert_eq!(p.get((i,j)), Rgba8::white());
            }
        }
        p.fill(Rgba8::black());
        assert_eq!(p.get((9,9)), Rgba8::black());
    }

    #[test]
    fn pixfmt_rgb8_test() {
        let mut pix = Pixfmt::<Rgb8>::new(1,1);
        let black  = Rgba8::black();
        let white  = Rgba8::white();

        pix.copy_pixel(0,0,Rgba8::new(0,0,0,255));
        assert_eq!(pix.get((0,0)), black);

        let (alpha, beta, cover) = (255, 255, 255); // Copy Pixel
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), white);

        let (alpha, beta, cover) = (255, 255, 0); // Do Nothing, No Coverage
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), black);

        let (alpha, beta, cover) = (255, 0, 255); // Do Nothing, Transparent
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), black);

        let (alpha, beta, cover) = (255, 255, 128); // Partial Coverage, Blend
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), Rgba8::new(128,128,128,255));

        let (alpha, beta, cover) = (255, 128, 255); // Full Coverage, Alpha Color
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), Rgba8::new(128,128,128,255));

        let (alpha, beta, cover) = (128, 128, 255); // Partial Coverage, Blend
        pix.copy_pixel(0,0,Rgba8::new(255,255,255,alpha));
        assert_eq!(pix.get((0,0)), Rgba8::new(255,255,255,255)); // Alpha channel is ignored
        pix.blend_pix((0,0), Rgba8::new(0,0,0,beta), cover);
        assert_eq!(pix.get((0,0)), Rgba8::new(127,127,127,255));

        let (alpha, beta, cover) = (128, 128, 128); // Partial Coverage, Blend
        pix.copy_pixel(0,0,Rgba8::new(255,255,255,alpha));
        assert_eq!(pix.get((0,0)), Rgba8::new(255,255,255,255)); // Alpha channel is ignored
        pix.blend_pix((0,0), Rgba8::new(0,0,0,beta), cover);
        assert_eq!(pix.get((0,0)), Rgba8::new(191,191,191,255));
    }

    #[test]
    fn pixfmt_rgba8_test() {
        let mut pix = Pixfmt::<Rgba8>::new(1,1);
        let black  = Rgba8::black();
        let white  = Rgba8::white();

        pix.copy_pixel(0,0,Rgba8::new(0,0,0,255));
        assert_eq!(pix.get((0,0)), black);

        let (alpha, beta, cover) = (255, 255, 255); // Copy Pixel
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), white);

        let (alpha, beta, cover) = (255, 255, 0); // Do Nothing, No Coverage
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), black);

        let (alpha, beta, cover) = (255, 0, 255); // Do Nothing, Transparent
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), black);

        let (alpha, beta, cover) = (255, 255, 128); // Partial Coverage, Blend
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), Rgba8::new(128,128,128,255));

        let (alpha, beta, cover) = (255, 128, 255); // Full Coverage, Alpha Color
        pix.copy_pixel(0,0,Rgba8::new(0,0,0,alpha));
        pix.blend_pix((0,0), Rgba8::new(255,255,255,beta), cover);
        assert_eq!(pix.get((0,0)), Rgba8::new(128,128,128,255));

        let (alpha, beta, cover) = (128, 128, 255); // Partial Coverage, Blend
        pix.copy_pixel(0,0,Rgba8::new(255,255,255,alpha));
        assert_eq!(pix.get((0,0)), Rgba8::new(255,255,255,128));
        pix.blend_pix((0,0), Rgba8::new(0,0,0,beta), cover);
        assert_eq!(pix.get((0,0)), Rgba8::new(127,127,127,192));

        let (alpha, beta, cover) = (128, 128, 128); // Partial Coverage, Blend
        pix.copy_pixel(0,0,Rgba8::new(255,255,255,alpha));
        assert_eq!(pix.get((0,0)), Rgba8::new(255,255,255,128));
        pix.blend_pix((0,0), Rgba8::new(0,0,0,beta), cover);
        assert_eq!(pix.get((0,0)), Rgba8::new(191,191,191,160));
    }

    #[test]
    fn global_alpha_scales_source() {
        let mut pix = Pixfmt::<Rgb8>::new(1,1);
        pix.alpha(0.5);
        assert!((pix.get_alpha() - 128.0/255.0).abs() < 1e-12);
        pix.blend_pix((0,0), Rgba8::white(), 255);
        assert_eq!(pix.get((0,0)), Rgba8::new(128,128,128,255));
        pix.alpha(0.0);
        pix.blend_pix((0,0), Rgba8::black(), 255);
        assert_eq!(pix.get((0,0)), Rgba8::new(128,128,128,255));
    }

    #[test]
    fn composite_operators() {
        let mut pix = Pixfmt::<Rgba8>::new(2,1);
        pix.fill(Rgba8::new(0,0,255,255));
        pix.comp_op(CompOp::Clear);
        assert_eq!(pix.get_comp_op(), CompOp::Clear);
        pix.blend_pix((0,0), Rgba8::white(), 255);
        assert_eq!(pix.get((0,0)), Rgba8::transparent());
        pix.blend_pix((1,0), Rgba8::white(), 0);
        assert_eq!(pix.get((1,0)), Rgba8::new(0,0,255,255));

        pix.comp_op(CompOp::Src);
        pix.blend_pix((0,0), Rgba8::new(255,0,0,128), 255);
        assert_eq!(pix.get((0,0)), Rgba8::new(255,0,0,128));

        pix.comp_op(CompOp::Multiply);
        pix.fill(Rgba8::new(128,128,128,255));
        pix.blend_pix((0,0), Rgba8::new(255,0,255,255), 255);
        assert_eq!(pix.get((0,0)), Rgba8::new(128,0,128,255));

        let mut rgb = Pixfmt::<Rgb8>::new(1,1);
        rgb.fill(Rgb8::white());
        rgb.comp_op(CompOp::Clear);
        rgb.blend_hline(0, 0, 1, Rgba8::black(), 255);
        assert_eq!(rgb.get((0,0)), Rgba8::black());
        rgb.comp_op(CompOp::Difference);
        rgb.fill(Rgb8::gray(200));
        rgb.blend_hline(0, 0, 1, Rgb8::gray(50), 255);
        assert_eq!(rgb.get((0,0)), Rgba8::new(150,150,150,255));
    }

    #[test]
    fn spans() {
        let mut pix = Pixfmt::<Rgb8>::new(4,1);
        pix.fill(Rgb8::black());
        pix.blend_solid_hspan(0, 0, 3, Rgb8::white(), &[255, 128, 0, 255]);
        assert_eq!(pix.get((0,0)), Rgba8::white());
        assert_eq!(pix.get((1,0)), Rgba8::new(128,128,128,255));
        assert_eq!(pix.get((2,0)), Rgba8::black());
        assert_eq!(pix.get((3,0)), Rgba8::black());

        let colors = [Rgb8::new(255,0,0), Rgb8::new(0,255,0)];
        pix.blend_color_hspan(2, 0, 2, &colors, &[], 255);
        assert_eq!(pix.get((2,0)), Rgba8::new(255,0,0,255));
        assert_eq!(pix.get((3,0)), Rgba8::new(0,255,0,255));
        pix.blend_color_hspan(2, 0, 2, &colors[..1], &[0], 255);
        assert_eq!(pix.get((2,0)), Rgba8::new(255,0,0,255));
        assert_eq!(pix.pixeldata().len(), 12);
        assert!(Pixfmt::<Rgba8>::from_vec(vec![1; 8], 2, 1).is_some());
        assert!(Pixfmt::<Rgba8>::from_vec(vec![1; 7], 2, 1).is_none());
    }
}
