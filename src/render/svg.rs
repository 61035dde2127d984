// SVG rendering of chart configurations
use super::chart::{Axis, ChartConfig, ChartKind, DataValue, Dataset, PointStyle};
use super::overlay;
use std::fmt::Write;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 520.0;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 70.0;
const MARGIN_TOP: f64 = 80.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TICKS: usize = 5;

/// Maps data values onto one pixel axis
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    min: f64,
    max: f64,
    px_start: f64,
    px_end: f64,
}

impl LinearScale {
    fn new(min: f64, max: f64, px_start: f64, px_end: f64) -> Self {
        Self {
            min,
            max,
            px_start,
            px_end,
        }
    }

    pub fn pixel(&self, value: f64) -> f64 {
        if self.max == self.min {
            return (self.px_start + self.px_end) / 2.0;
        }
        self.px_start + (value - self.min) / (self.max - self.min) * (self.px_end - self.px_start)
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=TICKS).map(move |i| self.min + (self.max - self.min) * i as f64 / TICKS as f64)
    }
}

/// Drawing context handed to overlays after the datasets are painted
pub struct Frame {
    out: String,
    pub x: LinearScale,
    pub y: LinearScale,
    pub y1: Option<LinearScale>,
}

impl Frame {
    pub fn push(&mut self, element: &str) {
        self.out.push_str(element);
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn plot_bounds() -> (f64, f64, f64, f64) {
    (
        MARGIN_LEFT,
        MARGIN_TOP,
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
    )
}

fn values_on(datasets: &[Dataset], axis_id: &str, pick: impl Fn(&DataValue) -> Option<f64>) -> Vec<f64> {
    datasets
        .iter()
        .filter(|d| d.y_axis() == axis_id)
        .flat_map(|d| d.data.iter().filter_map(&pick))
        .collect()
}

/// Axis bounds when set, otherwise the padded data range
fn axis_range(axis: &Axis, values: &[f64]) -> (f64, f64) {
    let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (data_min, data_max) = if data_min.is_finite() && data_max.is_finite() {
        if data_min == data_max {
            (data_min - 1.0, data_max + 1.0)
        } else {
            let pad = (data_max - data_min) * 0.05;
            (data_min - pad, data_max + pad)
        }
    } else {
        (0.0, 1.0)
    };

    (axis.min.unwrap_or(data_min), axis.max.unwrap_or(data_max))
}

fn xy_x(v: &DataValue) -> Option<f64> {
    match v {
        DataValue::Xy { x, .. } => Some(*x),
        DataValue::Value(_) => None,
    }
}

fn xy_y(v: &DataValue) -> Option<f64> {
    match v {
        DataValue::Xy { y, .. } => Some(*y),
        DataValue::Value(value) => Some(*value),
    }
}

fn format_tick(value: f64, span: f64) -> String {
    if span.abs() >= 10.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn begin(config: &ChartConfig) -> Frame {
    let (left, top, width, height) = plot_bounds();
    let scales = &config.options.scales;
    let datasets = &config.data.datasets;

    let x = match config.kind {
        ChartKind::Scatter => {
            let xs = values_on(datasets, "y", xy_x);
            let (min, max) = axis_range(&scales.x, &xs);
            LinearScale::new(min, max, left, left + width)
        }
        // Category axis: one slot per label, centred
        ChartKind::Line => {
            let n = config.data.labels.len().max(1) as f64;
            LinearScale::new(-0.5, n - 0.5, left, left + width)
        }
    };

    let ys = values_on(datasets, "y", xy_y);
    let (y_min, y_max) = axis_range(&scales.y, &ys);
    let y = LinearScale::new(y_min, y_max, top + height, top);

    let y1 = scales.y1.as_ref().map(|axis| {
        let values = values_on(datasets, "y1", xy_y);
        let (min, max) = axis_range(axis, &values);
        LinearScale::new(min, max, top + height, top)
    });

    let mut out = String::new();
    let _ = writeln!(
        out,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Arial, sans-serif">"##,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = writeln!(out, r##"<rect width="{}" height="{}" fill="white"/>"##, WIDTH, HEIGHT);
    let _ = writeln!(
        out,
        r##"<defs><clipPath id="plot-area"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"##,
        left, top, width, height
    );

    Frame { out, x, y, y1 }
}

fn draw_title_and_legend(frame: &mut Frame, config: &ChartConfig) {
    let title = &config.options.plugins.title;
    if title.display {
        let size = title.font.as_ref().map_or(14, |f| f.size);
        frame.push(&format!(
            r##"<text x="{}" y="24" text-anchor="middle" font-size="{}" font-weight="bold">{}</text>"##,
            WIDTH / 2.0,
            size,
            escape(&title.text)
        ));
    }

    if !config.options.plugins.legend.display {
        return;
    }
    let mut cursor = MARGIN_LEFT;
    let mut row = 46.0;
    for dataset in &config.data.datasets {
        let advance = dataset.label.chars().count() as f64 * 7.0 + 34.0;
        if cursor + advance > WIDTH - MARGIN_RIGHT && cursor > MARGIN_LEFT {
            cursor = MARGIN_LEFT;
            row += 16.0;
        }
        frame.push(&format!(
            r##"<rect x="{}" y="{}" width="18" height="10" fill="{}" stroke="{}"/>"##,
            cursor,
            row - 9.0,
            dataset.background_color,
            dataset.border_color
        ));
        frame.push(&format!(
            r##"<text x="{}" y="{}" font-size="12">{}</text>"##,
            cursor + 24.0,
            row,
            escape(&dataset.label)
        ));
        cursor += advance;
    }
}

fn draw_axes(frame: &mut Frame, config: &ChartConfig) {
    let (left, top, width, height) = plot_bounds();
    let bottom = top + height;
    let right = left + width;
    let scales = &config.options.scales;

    frame.push(&format!(
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#999"/>"##,
        left, top, width, height
    ));

    // x ticks
    let x = frame.x;
    match config.kind {
        ChartKind::Scatter => {
            let span = x.max - x.min;
            for value in x.ticks() {
                let px = x.pixel(value);
                frame.push(&format!(
                    r##"<line x1="{px}" y1="{top}" x2="{px}" y2="{bottom}" stroke="#eee"/><text x="{px}" y="{}" text-anchor="middle" font-size="11">{}</text>"##,
                    bottom + 16.0,
                    format_tick(value, span)
                ));
            }
        }
        ChartKind::Line => {
            for (i, label) in config.data.labels.iter().enumerate() {
                let px = x.pixel(i as f64);
                frame.push(&format!(
                    r##"<text x="{}" y="{}" text-anchor="middle" font-size="11">{}</text>"##,
                    px,
                    bottom + 16.0,
                    escape(label)
                ));
            }
        }
    }

    let y = frame.y;
    let span = y.max - y.min;
    for value in y.ticks() {
        let py = y.pixel(value);
        frame.push(&format!(
            r##"<line x1="{left}" y1="{py}" x2="{right}" y2="{py}" stroke="#eee"/><text x="{}" y="{}" text-anchor="end" font-size="11">{}</text>"##,
            left - 6.0,
            py + 4.0,
            format_tick(value, span)
        ));
    }

    if let (Some(y1), Some(axis)) = (frame.y1, scales.y1.as_ref()) {
        let span = y1.max - y1.min;
        let grid = axis.grid.as_ref().map_or(true, |g| g.draw_on_chart_area);
        for value in y1.ticks() {
            let py = y1.pixel(value);
            if grid {
                frame.push(&format!(
                    r##"<line x1="{left}" y1="{py}" x2="{right}" y2="{py}" stroke="#eee"/>"##
                ));
            }
            frame.push(&format!(
                r##"<text x="{}" y="{}" text-anchor="start" font-size="11">{}</text>"##,
                right + 6.0,
                py + 4.0,
                format_tick(value, span)
            ));
        }
        if axis.title.display {
            frame.push(&format!(
                r##"<text x="{x}" y="{y}" text-anchor="middle" font-size="12" transform="rotate(90 {x} {y})">{}</text>"##,
                escape(&axis.title.text),
                x = WIDTH - 16.0,
                y = top + height / 2.0
            ));
        }
    }

    if scales.x.title.display {
        frame.push(&format!(
            r##"<text x="{}" y="{}" text-anchor="middle" font-size="12">{}</text>"##,
            left + width / 2.0,
            HEIGHT - 16.0,
            escape(&scales.x.title.text)
        ));
    }
    if scales.y.title.display {
        frame.push(&format!(
            r##"<text x="{x}" y="{y}" text-anchor="middle" font-size="12" transform="rotate(-90 {x} {y})">{}</text>"##,
            escape(&scales.y.title.text),
            x = 18.0,
            y = top + height / 2.0
        ));
    }
}

fn marker(dataset: &Dataset, px: f64, py: f64) -> Option<String> {
    let r = dataset.radius() as f64;
    if r <= 0.0 {
        return None;
    }
    let stroke_width = dataset.border_width.unwrap_or(1);
    let shape = match dataset.point_style.unwrap_or(PointStyle::Circle) {
        PointStyle::Circle => format!(
            r##"<circle cx="{:.1}" cy="{:.1}" r="{}""##,
            px, py, r
        ),
        PointStyle::RectRot => format!(
            r##"<polygon points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1} {:.1},{:.1}""##,
            px,
            py - r,
            px + r,
            py,
            px,
            py + r,
            px - r,
            py
        ),
    };
    Some(format!(
        r##"{} fill="{}" stroke="{}" stroke-width="{}"/>"##,
        shape, dataset.background_color, dataset.border_color, stroke_width
    ))
}

/// Datasets in paint order: lowest `order` first
fn paint_order(datasets: &[Dataset]) -> Vec<&Dataset> {
    let mut ordered: Vec<&Dataset> = datasets.iter().collect();
    ordered.sort_by_key(|d| d.order.unwrap_or(0));
    ordered
}

fn draw_scatter(frame: &mut Frame, config: &ChartConfig) {
    frame.push(r##"<g clip-path="url(#plot-area)">"##);
    for dataset in paint_order(&config.data.datasets) {
        for value in &dataset.data {
            if let DataValue::Xy { x, y } = value {
                let (px, py) = (frame.x.pixel(*x), frame.y.pixel(*y));
                if let Some(element) = marker(dataset, px, py) {
                    frame.push(&element);
                }
            }
        }
    }
    frame.push("</g>");
}

fn draw_lines(frame: &mut Frame, config: &ChartConfig) {
    frame.push(r##"<g clip-path="url(#plot-area)">"##);
    for dataset in paint_order(&config.data.datasets) {
        let scale = match (dataset.y_axis(), frame.y1) {
            ("y1", Some(y1)) => y1,
            _ => frame.y,
        };
        let points: Vec<String> = dataset
            .data
            .iter()
            .enumerate()
            .filter_map(|(i, v)| xy_y(v).map(|value| (i, value)))
            .map(|(i, value)| format!("{:.1},{:.1}", frame.x.pixel(i as f64), scale.pixel(value)))
            .collect();
        if points.is_empty() {
            continue;
        }
        frame.push(&format!(
            r##"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"##,
            points.join(" "),
            dataset.border_color,
            dataset.border_width.unwrap_or(1)
        ));
        for point in &points {
            if let Some((px, py)) = point.split_once(',') {
                frame.push(&format!(
                    r##"<circle cx="{}" cy="{}" r="3" fill="{}"/>"##,
                    px, py, dataset.border_color
                ));
            }
        }
    }
    frame.push("</g>");
}

/// Render a chart, then every installed overlay on top of it
pub fn render_svg(config: &ChartConfig) -> String {
    let mut frame = begin(config);
    draw_title_and_legend(&mut frame, config);
    draw_axes(&mut frame, config);

    match config.kind {
        ChartKind::Scatter => draw_scatter(&mut frame, config),
        ChartKind::Line => draw_lines(&mut frame, config),
    }

    for overlay in overlay::installed() {
        overlay.after_datasets_draw(config, &mut frame);
    }

    frame.finish()
}
