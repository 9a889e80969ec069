// File: crates/chart-core/tests/snapshot.rs
// Purpose: Golden snapshots with bless flow for each series type.
// Behavior:
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use chart_core::{Axis, Chart, RenderOptions, Series, SeriesType};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(name: &str, bytes: &[u8]) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(&path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(&path).expect("read snapshot");
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "Pixels differ: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

fn render_to_bytes<F: FnOnce(&mut Chart)>(build: F) -> Vec<u8> {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", 0.0, 9.0);
    chart.y_axis = Axis::new("Y", -2.0, 6.0);
    build(&mut chart);

    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    let img = image::load_from_memory(&bytes).expect("decode");
    assert_eq!((img.width(), img.height()), (960, 540));
    bytes
}

#[test]
fn golden_line() {
    let data = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.5), (4.0, 1.0)];
    let bytes = render_to_bytes(|c| c.add_series(Series::with_data(SeriesType::Line, data)));
    write_or_compare("line.png", &bytes);
}

#[test]
fn golden_area() {
    let data = vec![(0.0, 1.0), (1.0, 1.2), (2.0, 0.8), (3.0, 1.8), (4.0, 1.0)];
    let bytes = render_to_bytes(|c| c.add_series(Series::with_data(SeriesType::Area, data).with_baseline(0.0)));
    write_or_compare("area.png", &bytes);
}

#[test]
fn golden_bars() {
    let data = (0..10).map(|i| (i as f64, ((i as f64) - 4.0) * 0.4)).collect::<Vec<_>>();
    let bytes = render_to_bytes(|c| c.add_series(Series::with_data(SeriesType::Bar, data).with_baseline(0.0)));
    write_or_compare("bars.png", &bytes);
}
