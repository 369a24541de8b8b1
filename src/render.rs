//! Renderer

use crate::scan::ScanlineU8;
use crate::base::RenderingBase;
use crate::color::Rgba8;
use crate::COVER_FULL;

use crate::PixelData;
use crate::VertexSource;
use crate::Render;
use crate::Rasterize;
use crate::Color;
use crate::Pixel;
use crate::Scanline;

/// Aliased Renderer
///
/// Every pixel with any coverage is drawn at full coverage
#[derive(Debug)]
pub struct RenderingScanlineBinSolid<'a,T> {
    pub base: &'a mut RenderingBase<T>,
    pub color: Rgba8,
}
/// Anti-Aliased Renderer
#[derive(Debug)]
pub struct RenderingScanlineAASolid<'a,T> {
    pub base: &'a mut RenderingBase<T>,
    pub color: Rgba8,
}

/// Render a single Scanline (y-row) without Anti-Aliasing
fn render_scanline_bin_solid<T,C: Color>(sl: &ScanlineU8,
                                         ren: &mut RenderingBase<T>,
                                         color: &C)
    where T: Pixel
{
    for span in sl.spans() {
        trace!("bin solid: x,y,len {} {} {}", span.x, sl.y(), span.len);
        ren.blend_hline(span.x, sl.y(), span.x - 1 + span.len, color, COVER_FULL);
    }
}

/// Render a single Scanline (y-row) with Anti Aliasing
fn render_scanline_aa_solid<T,C: Color>(sl: &ScanlineU8,
                                        ren: &mut RenderingBase<T>,
                                        color: &C)
    where T: Pixel
{
    let y = sl.y();
    for (span, covers) in sl.iter() {
        trace!("aa solid: x,y,len {} {} {}", span.x, y, span.len);
        ren.blend_solid_hspan(span.x, y, span.len, color, covers);
    }
}

impl<'a,T> Render for RenderingScanlineAASolid<'a,T> where T: Pixel {
    /// Render a single Scanline Row
    fn render(&mut self, sl: &ScanlineU8) {
        render_scanline_aa_solid(sl, self.base, &self.color);
    }
    /// Set the current color
    fn color<C: Color>(&mut self, color: &C) {
        self.color = Rgba8::from_trait(*color);
    }
}
impl<'a,T> Render for RenderingScanlineBinSolid<'a,T> where T: Pixel {
    /// Render a single Scanline Row
    fn render(&mut self, sl: &ScanlineU8) {
        render_scanline_bin_solid(sl, self.base, &self.color);
    }
    /// Set the current Color
    fn color<C: Color>(&mut self, color: &C) {
        self.color = Rgba8::from_trait(*color);
    }
}
impl<'a,T> RenderingScanlineBinSolid<'a,T> where T: Pixel {
    /// Create a new Renderer from a Rendering Base, drawing in black
    pub fn with_base(base: &'a mut RenderingBase<T>) -> Self {
        let color = Rgba8::black();
        Self { base, color }
    }
}
impl<'a,T> RenderingScanlineAASolid<'a,T> where T: Pixel {
    /// Create a new Renderer from a Rendering Base, drawing in black
    pub fn with_base(base: &'a mut RenderingBase<T>) -> Self {
        let color = Rgba8::black();
        Self { base, color }
    }
}
impl<'a,T> PixelData for RenderingScanlineAASolid<'a,T> where T: Pixel + PixelData {
    fn pixeldata(&self) -> &[u8] {
        self.base.pixf.pixeldata()
    }
}
impl<'a,T> PixelData for RenderingScanlineBinSolid<'a,T> where T: Pixel + PixelData {
    fn pixeldata(&self) -> &[u8] {
        self.base.pixf.pixeldata()
    }
}

/// Render rasterized data to an image using the current color
pub fn render_scanlines<REN, RAS>(ras: &mut RAS,
                                  sl: &mut ScanlineU8,
                                  ren: &mut REN)
    where REN: Render,
          RAS: Rasterize
{
    if ras.rewind_scanlines() {
        sl.reset( ras.min_x(), ras.max_x() );
        ren.prepare();
        let mut rows = 0;
        while ras.sweep_scanline(sl) {
            ren.render(sl);
            rows += 1;
        }
        trace!("rendered {} scanlines", rows);
    }
}

/// Render paths after rasterizing to an image using a set of colors
///
/// Path `i` is drawn in color `i`; extra paths or colors are ignored
pub fn render_all_paths<REN,RAS,VS,C>(ras: &mut RAS,
                                      sl: &mut ScanlineU8,
                                      ren: &mut REN,
                                      paths: &mut [VS],
                                      colors: &[C])
    where C: Color,
          REN: Render,
          RAS: Rasterize,
          VS: VertexSource
{
    debug_assert!(paths.len() == colors.len());
    for (path, color) in paths.iter_mut().zip(colors.iter()) {
        ras.reset();
        ras.add_path(path, 0);
        ren.color(color);
        render_scanlines(ras, sl, ren);
    }
}
