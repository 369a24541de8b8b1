use vraster::*;
use quickcheck_macros::quickcheck;

fn sweep(ras: &mut RasterizerScanline) -> Vec<(i64, Vec<(i64, i64, Vec<u64>)>)> {
    let mut out = vec![];
    let mut sl = ScanlineU8::new();
    if ras.rewind_scanlines() {
        sl.reset(ras.min_x(), ras.max_x());
        while ras.sweep_scanline(&mut sl) {
            let spans = sl.iter().map(|(s, c)| (s.x, s.len, c.to_vec())).collect();
            out.push((sl.y(), spans));
        }
    }
    out
}

fn rasterize(path: &mut Path, rule: FillingRule) -> RasterizerScanline {
    let mut ras = RasterizerScanline::new();
    ras.filling_rule(rule);
    ras.add_path(path, 0);
    ras
}

fn pentagram() -> Path {
    let mut p = Path::new();
    for k in 0 .. 5 {
        let a = (-90.0 + 144.0 * k as f64).to_radians();
        let (x, y) = (50.0 + 40.0 * a.cos(), 50.0 + 40.0 * a.sin());
        if k == 0 {
            p.move_to(x, y);
        } else {
            p.line_to(x, y);
        }
    }
    p.close_polygon();
    p
}

/// Single contour looping through two overlapping squares
///
/// The lead-in and lead-out diagonals between the loops cancel; the overlap
/// (3,3)-(6,6) is wound twice
fn figure_eight() -> Path {
    let mut p = Path::new();
    p.move_to(0.0, 0.0);
    for &(x, y) in &[(6.0, 0.0), (6.0, 6.0), (0.0, 6.0), (0.0, 0.0),
                     (3.0, 3.0), (9.0, 3.0), (9.0, 9.0), (3.0, 9.0), (3.0, 3.0)] {
        p.line_to(x, y);
    }
    p.close_polygon();
    p
}

/// Single contour crossing itself at (4,4), lobes wound opposite ways
fn bow_tie() -> Path {
    let mut p = Path::new();
    p.move_to(0.0, 0.0);
    p.line_to(8.0, 8.0);
    p.line_to(8.0, 0.0);
    p.line_to(0.0, 8.0);
    p.close_polygon();
    p
}

/// Two overlapping squares wound the same way, as separate contours
fn two_squares() -> Path {
    let mut p = Path::new();
    for &(x1, y1, x2, y2) in &[(0.0, 0.0, 6.0, 6.0), (3.0, 3.0, 9.0, 9.0)] {
        p.move_to(x1, y1);
        p.line_to(x2, y1);
        p.line_to(x2, y2);
        p.line_to(x1, y2);
        p.close_polygon();
    }
    p
}

#[test]
fn crossing_region_depends_on_rule() {
    let mut p = figure_eight();
    let mut nz = rasterize(&mut p, FillingRule::NonZero);
    let mut eo = rasterize(&mut p, FillingRule::EvenOdd);
    assert!(nz.hit_test(4, 4));
    assert!(! eo.hit_test(4, 4));
    for &(x, y) in &[(1, 1), (7, 7), (5, 1), (1, 5)] {
        assert!(nz.hit_test(x, y));
        assert!(eo.hit_test(x, y));
    }
    let rows = sweep(&mut eo);
    // Row 4 of even-odd: x = 0..3 then 6..9, hollow in between
    let (_, spans) = rows.iter().find(|r| r.0 == 4).cloned().unwrap_or_default();
    assert_eq!(spans, vec![(0, 3, vec![255; 3]), (6, 3, vec![255; 3])]);
}

#[test]
fn separate_contours_overlap_like_a_loop() {
    let mut p = two_squares();
    let mut nz = rasterize(&mut p, FillingRule::NonZero);
    let mut eo = rasterize(&mut p, FillingRule::EvenOdd);
    assert!(nz.hit_test(4, 4));
    assert!(! eo.hit_test(4, 4));
    let rows = sweep(&mut eo);
    let (_, spans) = rows.iter().find(|r| r.0 == 4).cloned().unwrap_or_default();
    assert_eq!(spans, vec![(0, 3, vec![255; 3]), (6, 3, vec![255; 3])]);
}

#[test]
fn bow_tie_lobes_fill_under_both_rules() {
    let mut p = bow_tie();
    let mut nz = rasterize(&mut p, FillingRule::NonZero);
    let mut eo = rasterize(&mut p, FillingRule::EvenOdd);
    for &(x, y) in &[(1, 4), (6, 4)] {
        assert!(nz.hit_test(x, y));
        assert!(eo.hit_test(x, y));
    }
    assert!(! nz.hit_test(4, 1));
    assert!(! eo.hit_test(4, 6));
    assert_eq!(sweep(&mut nz), sweep(&mut eo));
}

#[test]
fn pentagram_center() {
    let mut p = pentagram();
    let mut nz = rasterize(&mut p, FillingRule::NonZero);
    let mut eo = rasterize(&mut p, FillingRule::EvenOdd);
    assert!(nz.hit_test(50, 50));
    assert!(! eo.hit_test(50, 50));
    assert!(nz.hit_test(50, 20));
    assert!(eo.hit_test(50, 20));
    assert!(! nz.hit_test(5, 5));
}

#[test]
fn reversed_winding_cancels_under_nonzero() {
    let mut p = two_squares();
    let second = p.vertices().iter().rposition(|v| v.cmd.is_move_to()).unwrap_or(0);
    p.invert_polygon_at(second);
    let mut nz = rasterize(&mut p, FillingRule::NonZero);
    assert!(! nz.hit_test(4, 4));
    assert!(nz.hit_test(1, 1));
}

/// A triangle never overlaps itself, so both rules agree
#[quickcheck]
fn simple_polygons_agree(pts: Vec<(u8, u8)>) -> bool {
    if pts.len() < 3 {
        return true;
    }
    let mut p = Path::new();
    let tri = &pts[..3];
    p.move_to(f64::from(tri[0].0) / 4.0, f64::from(tri[0].1) / 4.0);
    for &(x, y) in &tri[1..] {
        p.line_to(f64::from(x) / 4.0, f64::from(y) / 4.0);
    }
    p.close_polygon();
    let a = sweep(&mut rasterize(&mut p, FillingRule::NonZero));
    let b = sweep(&mut rasterize(&mut p, FillingRule::EvenOdd));
    a == b
}

#[quickcheck]
fn convex_ellipses_agree(cx: u8, cy: u8, rx: u8, ry: u8, cw: bool) -> bool {
    let mut e = Ellipse::new(f64::from(cx), f64::from(cy),
                             f64::from(rx) / 3.0 + 0.5, f64::from(ry) / 3.0 + 0.5, 0, cw);
    let mut nz = RasterizerScanline::new();
    nz.add_path(&mut e, 0);
    let mut eo = RasterizerScanline::new();
    eo.filling_rule(FillingRule::EvenOdd);
    eo.add_path(&mut e, 0);
    sweep(&mut nz) == sweep(&mut eo)
}
