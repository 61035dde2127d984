use super::chart::{ChartConfig, DataValue, DatasetRole};
use super::palette::HOSPITAL_BORDER;
use super::svg::Frame;
use std::sync::OnceLock;

/// Stateless drawing step run after a chart's datasets are painted
pub trait Overlay: Send + Sync {
    fn id(&self) -> &'static str;

    fn after_datasets_draw(&self, chart: &ChartConfig, frame: &mut Frame);
}

/// Numbers each centroid marker with its 1-based index
pub struct CentroidLabels;

impl Overlay for CentroidLabels {
    fn id(&self) -> &'static str {
        "centroid-labels"
    }

    fn after_datasets_draw(&self, chart: &ChartConfig, frame: &mut Frame) {
        let Some(centroids) = chart.dataset(DatasetRole::Centroids) else {
            return;
        };
        // Hidden markers get no label
        if centroids.radius() == 0 {
            return;
        }

        for (i, value) in centroids.data.iter().enumerate() {
            let DataValue::Xy { x, y } = value else {
                continue;
            };
            let px = frame.x.pixel(*x) + 10.0;
            let py = frame.y.pixel(*y) - 10.0;
            frame.push(&format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="10" fill="rgba(255,255,255,0.85)"/>"##,
                px, py
            ));
            frame.push(&format!(
                r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle" font-size="12" fill="{}">{}</text>"##,
                px,
                py,
                HOSPITAL_BORDER,
                i + 1
            ));
        }
    }
}

static OVERLAYS: OnceLock<Vec<Box<dyn Overlay>>> = OnceLock::new();

/// Register the built-in overlays; later calls return the same set
pub fn install_overlays() -> &'static [Box<dyn Overlay>] {
    OVERLAYS.get_or_init(|| {
        tracing::debug!("installing chart overlays");
        vec![Box::new(CentroidLabels)]
    })
}

/// Overlays registered so far; empty before `install_overlays`
pub fn installed() -> &'static [Box<dyn Overlay>] {
    OVERLAYS.get().map(Vec::as_slice).unwrap_or(&[])
}
