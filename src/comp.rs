//! Composite operators
//!
//! Porter-Duff operators and separable / non-separable blend modes
//! computed on [0,1] components. Inputs are straight (non-premultiplied)
//! colors, results are premultiplied `[r, g, b, a]`.

/// Composite operator applied by a pixel format when blending
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CompOp {
    Clear,
    Src,
    Dst,
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcAtop,
    DstAtop,
    Xor,
    Plus,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl Default for CompOp {
    fn default() -> Self {
        CompOp::SrcOver
    }
}

impl CompOp {
    /// Every operator
    pub const ALL : [CompOp; 28] = [
        CompOp::Clear, CompOp::Src, CompOp::Dst, CompOp::SrcOver,
        CompOp::DstOver, CompOp::SrcIn, CompOp::DstIn, CompOp::SrcOut,
        CompOp::DstOut, CompOp::SrcAtop, CompOp::DstAtop, CompOp::Xor,
        CompOp::Plus, CompOp::Multiply, CompOp::Screen, CompOp::Overlay,
        CompOp::Darken, CompOp::Lighten, CompOp::ColorDodge, CompOp::ColorBurn,
        CompOp::HardLight, CompOp::SoftLight, CompOp::Difference, CompOp::Exclusion,
        CompOp::Hue, CompOp::Saturation, CompOp::Color, CompOp::Luminosity,
    ];

    /// Porter-Duff fractions (Fa, Fb) for source and destination alpha
    fn fractions(self, sa: f64, da: f64) -> Option<(f64, f64)> {
        use CompOp::*;
        let f = match self {
            Clear   => (0.0, 0.0),
            Src     => (1.0, 0.0),
            Dst     => (0.0, 1.0),
            SrcOver => (1.0, 1.0 - sa),
            DstOver => (1.0 - da, 1.0),
            SrcIn   => (da, 0.0),
            DstIn   => (0.0, sa),
            SrcOut  => (1.0 - da, 0.0),
            DstOut  => (0.0, 1.0 - sa),
            SrcAtop => (da, 1.0 - sa),
            DstAtop => (1.0 - da, sa),
            Xor     => (1.0 - da, 1.0 - sa),
            Plus    => (1.0, 1.0),
            _ => return None,
        };
        Some(f)
    }

    /// Composite straight source `s` onto straight destination `d`
    ///
    /// `cover` in [0,1] interpolates between the destination and the
    /// operator result. Returns a premultiplied color.
    pub fn composite(self, s: [f64; 4], d: [f64; 4], cover: f64) -> [f64; 4] {
        let (sa, da) = (s[3], d[3]);
        let dp = [d[0] * da, d[1] * da, d[2] * da, da];
        let r = if let Some((fa, fb)) = self.fractions(sa, da) {
            let mut r = [0.0; 4];
            for i in 0 .. 3 {
                r[i] = s[i] * sa * fa + d[i] * da * fb;
            }
            r[3] = sa * fa + da * fb;
            r
        } else {
            let cs = [s[0], s[1], s[2]];
            let cb = [d[0], d[1], d[2]];
            let b = self.blend(cs, cb);
            let mut r = [0.0; 4];
            for i in 0 .. 3 {
                r[i] = cs[i] * sa * (1.0 - da) + cb[i] * da * (1.0 - sa) + sa * da * b[i];
            }
            r[3] = sa + da - sa * da;
            r
        };
        let mut out = [0.0; 4];
        for i in 0 .. 4 {
            let v = r[i].max(0.0).min(1.0);
            out[i] = dp[i] + (v - dp[i]) * cover;
        }
        out
    }

    /// Blend function B(cs, cb) of the separable and non-separable modes
    fn blend(self, cs: [f64; 3], cb: [f64; 3]) -> [f64; 3] {
        use CompOp::*;
        match self {
            Hue        => set_lum(set_sat(cs, sat(cb)), lum(cb)),
            Saturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
            Color      => set_lum(cs, lum(cb)),
            Luminosity => set_lum(cb, lum(cs)),
            _ => {
                let f = |s: f64, b: f64| self.blend_channel(s, b);
                [f(cs[0], cb[0]), f(cs[1], cb[1]), f(cs[2], cb[2])]
            }
        }
    }

    fn blend_channel(self, s: f64, b: f64) -> f64 {
        use CompOp::*;
        match self {
            Multiply => s * b,
            Screen => s + b - s * b,
            Overlay => hard_light(b, s),
            Darken => s.min(b),
            Lighten => s.max(b),
            ColorDodge => {
                if b == 0.0 {
                    0.0
                } else if s >= 1.0 {
                    1.0
                } else {
                    (b / (1.0 - s)).min(1.0)
                }
            },
            ColorBurn => {
                if b >= 1.0 {
                    1.0
                } else if s <= 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - b) / s).min(1.0)
                }
            },
            HardLight => hard_light(s, b),
            SoftLight => {
                if s <= 0.5 {
                    b - (1.0 - 2.0 * s) * b * (1.0 - b)
                } else {
                    let d = if b <= 0.25 {
                        ((16.0 * b - 12.0) * b + 4.0) * b
                    } else {
                        b.sqrt()
                    };
                    b + (2.0 * s - 1.0) * (d - b)
                }
            },
            Difference => (s - b).abs(),
            Exclusion => s + b - 2.0 * s * b,
            _ => s,
        }
    }
}

fn hard_light(s: f64, b: f64) -> f64 {
    if s <= 0.5 {
        b * 2.0 * s
    } else {
        let s = 2.0 * s - 1.0;
        s + b - s * b
    }
}

fn lum(c: [f64; 3]) -> f64 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: [f64; 3]) -> [f64; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut c = c;
    if n < 0.0 {
        for v in c.iter_mut() {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        for v in c.iter_mut() {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    c
}

fn set_lum(c: [f64; 3], l: f64) -> [f64; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn sat(c: [f64; 3]) -> f64 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: [f64; 3], s: f64) -> [f64; 3] {
    let mut idx = [0, 1, 2];
    idx.sort_by(|&a, &b| c[a].partial_cmp(&c[b]).unwrap_or(std::cmp::Ordering::Equal));
    let (min, mid, max) = (idx[0], idx[1], idx[2]);
    let mut out = [0.0; 3];
    if c[max] > c[min] {
        out[mid] = (c[mid] - c[min]) * s / (c[max] - c[min]);
        out[max] = s;
    }
    out
}
