//! Font adapters
//!
//! A font decomposes glyphs into path commands which are then filled like
//! any other path. Glyphs are placed with the baseline at y = 0 and y
//! growing downward.

use crate::error::Error;
use crate::paths::Path;

/// Source of glyph outlines
pub trait GlyphOutline {
    /// Append the outline of `ch` to `path`
    ///
    /// Returns false if the font has no outline for the glyph, `path` is
    /// then unchanged
    fn glyph_outline(&self, ch: char, path: &mut Path) -> Result<bool, Error>;
    /// Horizontal advance of `ch` in pixels
    fn advance(&self, ch: char) -> Result<f64, Error>;
}

/// Append the outlines of `text` starting at (`x`,`y`) to `path`
///
/// Returns the x position after the last glyph
pub fn text_outline<F: GlyphOutline>(font: &F, text: &str, x: f64, y: f64,
                                     path: &mut Path) -> Result<f64, Error> {
    let mut x = x;
    let mut glyph = Path::new();
    for ch in text.chars() {
        glyph.remove_all();
        if font.glyph_outline(ch, &mut glyph)? {
            glyph.translate_all_paths(x, y);
            path.concat_path(&mut glyph, 0);
        }
        x += font.advance(ch)?;
    }
    trace!("text {:?}: {} vertices", text, path.total_vertices());
    Ok(x)
}

#[cfg(feature = "font")]
pub use self::truetype::TrueTypeFont;

#[cfg(feature = "font")]
mod truetype {
    use super::GlyphOutline;
    use crate::error::Error;
    use crate::paths::Path;

    /// TrueType / OpenType font scaled to a pixel height
    #[derive(Debug,Clone)]
    pub struct TrueTypeFont {
        data: Vec<u8>,
        index: u32,
        height: f64,
    }

    impl TrueTypeFont {
        /// Parse face `index` of a font file's contents
        pub fn from_data(data: Vec<u8>, index: u32, height: f64) -> Result<Self, Error> {
            ttf_parser::Face::parse(&data, index)
                .map_err(|e| Error::Font(e.to_string()))?;
            debug!("font face {} loaded, {} bytes", index, data.len());
            Ok(Self { data, index, height })
        }
        /// Load the first face of a font file
        pub fn from_file<P: AsRef<std::path::Path>>(filename: P, height: f64) -> Result<Self, Error> {
            let data = std::fs::read(filename.as_ref())
                .map_err(|e| Error::Font(format!("{}: {}", filename.as_ref().display(), e)))?;
            Self::from_data(data, 0, height)
        }
        /// Pixel height of one em
        pub fn height(&self) -> f64 {
            self.height
        }
        pub fn set_height(&mut self, height: f64) {
            self.height = height;
        }
        fn face(&self) -> Result<ttf_parser::Face<'_>, Error> {
            ttf_parser::Face::parse(&self.data, self.index)
                .map_err(|e| Error::Font(e.to_string()))
        }
        fn scale(&self, face: &ttf_parser::Face<'_>) -> f64 {
            self.height / f64::from(face.units_per_em())
        }
    }

    /// Feeds outline callbacks into a path, scaled and flipped
    struct PathBuilder<'a> {
        path: &'a mut Path,
        scale: f64,
    }

    impl PathBuilder<'_> {
        fn pt(&self, x: f32, y: f32) -> (f64, f64) {
            (f64::from(x) * self.scale, -f64::from(y) * self.scale)
        }
    }

    impl ttf_parser::OutlineBuilder for PathBuilder<'_> {
        fn move_to(&mut self, x: f32, y: f32) {
            let (x, y) = self.pt(x, y);
            self.path.move_to(x, y);
        }
        fn line_to(&mut self, x: f32, y: f32) {
            let (x, y) = self.pt(x, y);
            self.path.line_to(x, y);
        }
        fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
            let (x1, y1) = self.pt(x1, y1);
            let (x, y) = self.pt(x, y);
            self.path.curve3(x1, y1, x, y);
        }
        fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
            let (x1, y1) = self.pt(x1, y1);
            let (x2, y2) = self.pt(x2, y2);
            let (x, y) = self.pt(x, y);
            self.path.curve4(x1, y1, x2, y2, x, y);
        }
        fn close(&mut self) {
            self.path.close_polygon();
        }
    }

    impl GlyphOutline for TrueTypeFont {
        fn glyph_outline(&self, ch: char, path: &mut Path) -> Result<bool, Error> {
            let face = self.face()?;
            let id = match face.glyph_index(ch) {
                Some(id) => id,
                None => return Ok(false),
            };
            let scale = self.scale(&face);
            let mut glyph = Path::new();
            let mut builder = PathBuilder { path: &mut glyph, scale };
            if face.outline_glyph(id, &mut builder).is_none() {
                return Ok(false);
            }
            path.concat_path(&mut glyph, 0);
            Ok(true)
        }
        fn advance(&self, ch: char) -> Result<f64, Error> {
            let face = self.face()?;
            let adv = face.glyph_index(ch)
                .and_then(|id| face.glyph_hor_advance(id))
                .unwrap_or(0);
            Ok(f64::from(adv) * self.scale(&face))
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathCommand;

    /// Every glyph is a unit square scaled to `size`, spaces are empty
    struct BlockFont {
        size: f64,
    }

    impl GlyphOutline for BlockFont {
        fn glyph_outline(&self, ch: char, path: &mut Path) -> Result<bool, Error> {
            if ch == '\u{0}' {
                return Err(Error::Font("nul".into()));
            }
            if ch.is_whitespace() {
                return Ok(false);
            }
            let s = self.size;
            path.move_to(0.0, -s);
            path.line_to(s, -s);
            path.line_to(s, 0.0);
            path.line_to(0.0, 0.0);
            path.close_polygon();
            Ok(true)
        }
        fn advance(&self, _ch: char) -> Result<f64, Error> {
            Ok(self.size + 2.0)
        }
    }

    #[test]
    fn text_is_laid_out_left_to_right() -> Result<(), Error> {
        let font = BlockFont { size: 4.0 };
        let mut path = Path::new();
        let end = text_outline(&font, "a b", 10.0, 20.0, &mut path)?;
        assert_eq!(end, 10.0 + 3.0 * 6.0);
        let moves : Vec<_> = path.vertices().iter()
            .filter(|v| v.cmd == PathCommand::MoveTo)
            .map(|v| (v.x, v.y))
            .collect();
        assert_eq!(moves, vec![(10.0, 16.0), (22.0, 16.0)]);
        assert_eq!(path.vertices().iter().filter(|v| v.cmd.is_end_poly()).count(), 2);
        Ok(())
    }

    #[test]
    fn font_errors_propagate() {
        let font = BlockFont { size: 1.0 };
        let mut path = Path::new();
        assert!(matches!(text_outline(&font, "a\u{0}", 0.0, 0.0, &mut path),
                         Err(Error::Font(_))));
    }
}
