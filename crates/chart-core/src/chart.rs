// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless PNG rendering pipeline using Skia CPU raster surfaces.

use std::path::Path;

use skia_safe as skia;

use crate::axis::evenly_spaced;
use crate::error::{RenderError, Result};
use crate::series::{Series, SeriesType};
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::view::ViewState;
use crate::Axis;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Title, tick labels, and legend. Off for pixel-stable snapshots.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit every non-fixed axis to the data, padding Y by `margin` of its span.
    pub fn autoscale_axes(&mut self, margin: f64) {
        ViewState::from_chart(self, margin).apply_to_chart(self);
    }

    /// Render the chart and encode it as PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or(RenderError::Surface { width: opts.width, height: opts.height })?;
        self.draw(surface.canvas(), opts);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(RenderError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path`. The parent directory
    /// must already exist.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;
        std::fs::write(path, bytes).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = PlotRect {
            l: opts.insets.left as f32,
            t: opts.insets.top as f32,
            r: (opts.width - opts.insets.right as i32) as f32,
            b: (opts.height - opts.insets.bottom as i32) as f32,
        };

        draw_grid(canvas, &plot, theme);

        canvas.save();
        canvas.clip_rect(skia::Rect::from_ltrb(plot.l, plot.t, plot.r, plot.b), None, None);
        for (index, s) in self.series.iter().enumerate() {
            let color = theme.series_color(index);
            match s.series_type {
                SeriesType::Line => draw_line_series(canvas, &plot, &self.x_axis, &self.y_axis, s, color),
                SeriesType::Area => {
                    draw_area_fill(canvas, &plot, &self.x_axis, &self.y_axis, s, color, theme.area_alpha);
                    draw_line_series(canvas, &plot, &self.x_axis, &self.y_axis, s, color);
                }
                SeriesType::Bar => draw_bar_series(canvas, &plot, &self.x_axis, &self.y_axis, s, color),
            }
        }
        canvas.restore();

        draw_axes(canvas, &plot, theme);

        if opts.draw_labels {
            draw_ticks(canvas, &plot, &self.x_axis, &self.y_axis, theme);
            draw_titles(canvas, &plot, opts, &self.title, &self.x_axis, &self.y_axis);
            draw_legend(canvas, &plot, &self.series, theme);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

struct PlotRect {
    l: f32,
    t: f32,
    r: f32,
    b: f32,
}

impl PlotRect {
    fn sx(&self, axis: &Axis, x: f64) -> f32 {
        self.l + ((x - axis.min) / axis.span()) as f32 * (self.r - self.l)
    }

    fn sy(&self, axis: &Axis, y: f64) -> f32 {
        self.b - ((y - axis.min) / axis.span()) as f32 * (self.b - self.t)
    }
}

fn label_font(size: f32) -> skia::Font {
    match skia::FontMgr::default().legacy_make_typeface(None, skia::FontStyle::default()) {
        Some(typeface) => skia::Font::new(typeface, size),
        None => {
            let mut font = skia::Font::default();
            font.set_size(size);
            font
        }
    }
}

fn text_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = text_paint(color);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn draw_grid(canvas: &skia::Canvas, plot: &PlotRect, theme: &Theme) {
    let paint = stroke_paint(theme.grid, 1.0);

    for x in evenly_spaced(plot.l as f64, plot.r as f64, 7) {
        canvas.draw_line((x as f32, plot.t), (x as f32, plot.b), &paint);
    }
    for y in evenly_spaced(plot.t as f64, plot.b as f64, 6) {
        canvas.draw_line((plot.l, y as f32), (plot.r, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, plot: &PlotRect, theme: &Theme) {
    let paint = stroke_paint(theme.axis_line, 1.5);
    canvas.draw_line((plot.l, plot.b), (plot.r, plot.b), &paint);
    canvas.draw_line((plot.l, plot.t), (plot.l, plot.b), &paint);
}

fn draw_ticks(canvas: &skia::Canvas, plot: &PlotRect, x: &Axis, y: &Axis, theme: &Theme) {
    let font = label_font(11.0);
    let paint = text_paint(theme.tick);

    for value in x.tick_values(7) {
        let label = x.format_tick(value);
        let (w, _) = font.measure_str(&label, Some(&paint));
        canvas.draw_str(&label, (plot.sx(x, value) - w * 0.5, plot.b + 16.0), &font, &paint);
    }

    for value in y.tick_values(6) {
        let label = y.format_tick(value);
        let (w, _) = font.measure_str(&label, Some(&paint));
        canvas.draw_str(&label, (plot.l - w - 6.0, plot.sy(y, value) + 4.0), &font, &paint);
    }
}

fn draw_titles(canvas: &skia::Canvas, plot: &PlotRect, opts: &RenderOptions, title: &str, x: &Axis, y: &Axis) {
    let theme = &opts.theme;
    if !title.is_empty() {
        let font = label_font(16.0);
        let paint = text_paint(theme.title);
        let (w, _) = font.measure_str(title, Some(&paint));
        canvas.draw_str(title, ((opts.width as f32 - w) * 0.5, 26.0), &font, &paint);
    }

    let font = label_font(12.0);
    let paint = text_paint(theme.axis_label);
    if !x.label.is_empty() {
        let (w, _) = font.measure_str(&x.label, Some(&paint));
        canvas.draw_str(&x.label, (plot.r - w, plot.b + 34.0), &font, &paint);
    }
    if !y.label.is_empty() {
        canvas.draw_str(&y.label, (8.0, plot.t - 8.0), &font, &paint);
    }
}

fn draw_legend(canvas: &skia::Canvas, plot: &PlotRect, series: &[Series], theme: &Theme) {
    let font = label_font(11.0);
    let paint = text_paint(theme.axis_label);
    let y = plot.b + 56.0;
    let mut x = plot.l;

    for (index, s) in series.iter().enumerate() {
        if s.name.is_empty() {
            continue;
        }
        let (w, _) = font.measure_str(&s.name, Some(&paint));
        if x + 14.0 + w > plot.r {
            break;
        }
        let swatch = text_paint(theme.series_color(index));
        canvas.draw_rect(skia::Rect::from_xywh(x, y - 9.0, 10.0, 10.0), &swatch);
        canvas.draw_str(&s.name, (x + 14.0, y), &font, &paint);
        x += 14.0 + w + 16.0;
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    plot: &PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    color: skia::Color,
) {
    let data = &series.data_xy;
    if data.len() < 2 {
        return;
    }

    let mut path = skia::Path::new();
    let (x0, y0) = data[0];
    path.move_to((plot.sx(x_axis, x0), plot.sy(y_axis, y0)));
    for &(x, y) in data.iter().skip(1) {
        path.line_to((plot.sx(x_axis, x), plot.sy(y_axis, y)));
    }

    canvas.draw_path(&path, &stroke_paint(color, 2.0));
}

fn draw_area_fill(
    canvas: &skia::Canvas,
    plot: &PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    color: skia::Color,
    alpha: u8,
) {
    let data = &series.data_xy;
    if data.len() < 2 {
        return;
    }

    let base = plot.sy(y_axis, series.baseline_value());
    let mut path = skia::Path::new();
    path.move_to((plot.sx(x_axis, data[0].0), base));
    for &(x, y) in data {
        path.line_to((plot.sx(x_axis, x), plot.sy(y_axis, y)));
    }
    path.line_to((plot.sx(x_axis, data[data.len() - 1].0), base));
    path.close();

    let mut fill = text_paint(color.with_a(alpha));
    fill.set_style(skia::paint::Style::Fill);
    canvas.draw_path(&path, &fill);
}

fn draw_bar_series(
    canvas: &skia::Canvas,
    plot: &PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    color: skia::Color,
) {
    if series.data_xy.is_empty() {
        return;
    }

    // One slot per unit of X; bars take 70% of a slot.
    let slot_px = (plot.r - plot.l) / x_axis.span() as f32;
    let half = (slot_px * 0.35).max(1.5);
    let base = plot.sy(y_axis, series.baseline_value());
    let fill = text_paint(color);

    for &(x, y) in series.data_xy.iter().filter(|(_, y)| y.is_finite()) {
        let cx = plot.sx(x_axis, x);
        let top = plot.sy(y_axis, y);
        let rect = skia::Rect::from_ltrb(cx - half, top.min(base), cx + half, top.max(base));
        canvas.draw_rect(rect, &fill);
    }
}
