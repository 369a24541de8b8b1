//! Colors

use crate::Color;
use crate::math::cu8;

fn color_u8_to_f64(x: u8) -> f64 {
    f64::from(x) / 255.0
}

/// Color as Red, Green, Blue, and Alpha
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Fully transparent black (0,0,0,0)
    pub fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// Create a color from [0,1] components
    pub fn from_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(cu8(r), cu8(g), cu8(b), cu8(a))
    }
    /// Convert any color
    pub fn from_trait<C: Color>(c: C) -> Self {
        Self::new(c.red8(), c.green8(), c.blue8(), c.alpha8())
    }
    /// Same color with alpha replaced
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, .. self }
    }
}

impl Color for Rgba8 {
    fn   red(&self) -> f64 { color_u8_to_f64(self.r) }
    fn green(&self) -> f64 { color_u8_to_f64(self.g) }
    fn  blue(&self) -> f64 { color_u8_to_f64(self.b) }
    fn alpha(&self) -> f64 { color_u8_to_f64(self.a) }
    fn alpha8(&self) -> u8 { self.a }
    fn red8(&self) -> u8 { self.r }
    fn green8(&self) -> u8 { self.g }
    fn blue8(&self) -> u8 { self.b }
}

/// Color as Red, Green, Blue
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub fn white() -> Self {
        Self::new(255,255,255)
    }
    pub fn black() -> Self {
        Self::new(0,0,0)
    }
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }
    pub fn gray(g: u8) -> Self {
        Self::new(g,g,g)
    }
    /// Convert any color, alpha is dropped
    pub fn from_trait<C: Color>(c: C) -> Self {
        Self::new(c.red8(), c.green8(), c.blue8())
    }
}

impl Color for Rgb8 {
    fn   red(&self) -> f64 { color_u8_to_f64(self.r) }
    fn green(&self) -> f64 { color_u8_to_f64(self.g) }
    fn  blue(&self) -> f64 { color_u8_to_f64(self.b) }
    fn alpha(&self) -> f64 { 1.0 }
    fn alpha8(&self) -> u8 { 255 }
    fn red8(&self) -> u8   { self.r }
    fn green8(&self) -> u8 { self.g }
    fn blue8(&self) -> u8  { self.b }
}

/// Gray scale with alpha
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Gray8 {
    pub value: u8,
    pub alpha: u8,
}

impl Gray8 {
    /// Create a new opaque gray scale value
    pub fn new(value: u8) -> Self {
        Self::new_with_alpha(value, 255)
    }
    pub fn new_with_alpha(value: u8, alpha: u8) -> Self {
        Gray8 { value, alpha }
    }
    /// Luminance of a color, weights 0.299 / 0.587 / 0.114
    pub fn from_trait<C: Color>(c: C) -> Self {
        let v = (77 * u32::from(c.red8()) + 150 * u32::from(c.green8())
                 + 29 * u32::from(c.blue8())) >> 8;
        Self::new_with_alpha(v as u8, c.alpha8())
    }
}

impl Color for Gray8 {
    fn   red(&self) -> f64 { color_u8_to_f64(self.value) }
    fn green(&self) -> f64 { color_u8_to_f64(self.value) }
    fn  blue(&self) -> f64 { color_u8_to_f64(self.value) }
    fn alpha(&self) -> f64 { color_u8_to_f64(self.alpha) }
    fn alpha8(&self) -> u8 { self.alpha }
    fn red8(&self) -> u8   { self.value }
    fn green8(&self) -> u8 { self.value }
    fn blue8(&self) -> u8  { self.value }
}

impl From<Rgba8> for Rgb8 {
    fn from(c: Rgba8) -> Rgb8 {
        Rgb8::new( c.r, c.g, c.b )
    }
}
impl From<Rgb8> for Rgba8 {
    fn from(c: Rgb8) -> Rgba8 {
        Rgba8::new( c.r, c.g, c.b, 255 )
    }
}
impl From<Gray8> for Rgba8 {
    fn from(c: Gray8) -> Rgba8 {
        Rgba8::new( c.value, c.value, c.value, c.alpha )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        let c = Rgba8::new(10, 20, 30, 40);
        assert_eq!(Rgb8::from(c), Rgb8::new(10, 20, 30));
        assert_eq!(Rgba8::from(Rgb8::new(10, 20, 30)), c.with_alpha(255));
        assert_eq!(Rgba8::from_trait(Rgb8::gray(7)), Rgba8::new(7, 7, 7, 255));
        assert_eq!(Rgba8::from(Gray8::new_with_alpha(9, 3)), Rgba8::new(9, 9, 9, 3));
        assert_eq!(Gray8::from_trait(Rgba8::white()), Gray8::new(255));
        assert_eq!(Gray8::from_trait(Rgba8::black()).value, 0);
        assert_eq!(Rgba8::from_f64(1.0, 0.5, 0.0, 1.0), Rgba8::new(255, 128, 0, 255));
    }

    #[test]
    fn opacity() {
        assert!(Rgba8::transparent().is_transparent());
        assert!(Rgba8::white().is_opaque());
        assert!(Rgb8::black().is_opaque());
        assert!(! Gray8::new_with_alpha(1, 128).is_opaque());
        assert_eq!(Rgba8::new(255, 0, 0, 255).red(), 1.0);
    }
}
