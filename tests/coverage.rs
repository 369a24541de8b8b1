use vraster::*;

/// Every scanline of a rasterizer as (y, [(x, len, covers)])
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

fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Path {
    let mut p = Path::new();
    p.move_to(x1, y1);
    p.line_to(x2, y1);
    p.line_to(x2, y2);
    p.line_to(x1, y2);
    p.close_polygon();
    p
}

#[test]
fn unit_square_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut path = rect(0.0, 0.0, 10.0, 10.0);
    let mut ras = RasterizerScanline::new();
    ras.filling_rule(FillingRule::NonZero);
    ras.add_path(&mut ConvTransform::new(&mut path, Transform::new()), 0);
    let rows = sweep(&mut ras);
    assert_eq!(rows.len(), 10);
    for (i, (y, spans)) in rows.iter().enumerate() {
        assert_eq!(*y, i as i64);
        assert_eq!(spans, &vec![(0, 10, vec![255; 10])]);
    }
}

#[test]
fn integer_rectangle_is_fully_covered() {
    let mut ras = RasterizerScanline::new();
    ras.add_path(&mut rect(2.0, 3.0, 7.0, 8.0), 0);
    let rows = sweep(&mut ras);
    assert_eq!(rows.iter().map(|r| r.0).collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
    for (_, spans) in rows {
        assert_eq!(spans, vec![(2, 5, vec![255; 5])]);
    }
}

#[test]
fn subpixel_rectangle_is_partial_on_edges_only() {
    let mut ras = RasterizerScanline::new();
    ras.add_path(&mut rect(2.5, 3.25, 7.5, 8.75), 0);
    let rows = sweep(&mut ras);
    assert_eq!(rows.len(), 6);
    let (first, last) = (rows[0].0, rows[rows.len()-1].0);
    assert_eq!((first, last), (3, 8));
    for (y, spans) in &rows {
        assert_eq!(spans.len(), 1);
        let (x, len, covers) = &spans[0];
        assert_eq!((*x, *len), (2, 6));
        let edge_row = *y == first || *y == last;
        for (i, &c) in covers.iter().enumerate() {
            let edge_col = i == 0 || i == covers.len() - 1;
            if edge_row || edge_col {
                assert!(c > 0 && c < 255, "row {} col {} cover {}", y, i, c);
            } else {
                assert_eq!(c, 255, "row {} col {}", y, i);
            }
        }
    }
    // Three quarters of a row, half a column
    assert_eq!(rows[0].1[0].2[2], 192);
    assert_eq!(rows[1].1[0].2[0], 128);
}

#[test]
fn curves_and_arcs_flatten_into_coverage() {
    let mut path = Path::new();
    path.move_to(0.0, 10.0);
    path.arc_to(10.0, 10.0, 0.0, false, true, 20.0, 10.0);
    path.close_polygon();
    let mut ras = RasterizerScanline::new();
    ras.add_path(&mut ConvCurve::new(&mut path), 0);
    let rows = sweep(&mut ras);
    // Upper half disc of radius 10 sitting on y = 10
    assert_eq!(rows.first().map(|r| r.0), Some(0));
    assert_eq!(rows.last().map(|r| r.0), Some(9));
    let (_, spans) = &rows[9];
    let covered : usize = spans.iter().map(|s| s.2.iter().filter(|&&c| c == 255).count()).sum();
    assert!(covered >= 16, "{:?}", spans);
}

#[test]
fn gamma_table_applies_to_coverage() {
    let mut ras = RasterizerScanline::new_with_gamma(|x| if x < 0.5 { 0.0 } else { 1.0 });
    ras.add_path(&mut rect(0.25, 0.0, 3.75, 1.0), 0);
    let rows = sweep(&mut ras);
    assert_eq!(rows, vec![(0, vec![(0, 4, vec![255, 255, 255, 255])])]);

    let mut ras = RasterizerScanline::new_with_gamma(|x| if x < 0.5 { 0.0 } else { 1.0 });
    ras.add_path(&mut rect(0.75, 0.0, 3.25, 1.0), 0);
    let rows = sweep(&mut ras);
    assert_eq!(rows, vec![(0, vec![(1, 2, vec![255, 255])])]);
}
