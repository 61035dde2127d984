use super::palette::*;
use crate::service::{KAnalysis, Point};
use crate::state::{SpaceDims, ViewState};
use serde::Serialize;

/// A chart configuration in the shape a Chart.js instance accepts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// What a dataset represents, used by redraws and overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetRole {
    #[default]
    Series,
    Houses,
    Cluster(usize),
    Centroids,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    Xy { x: f64, y: f64 },
    Value(f64),
}

impl From<&Point> for DataValue {
    fn from(p: &Point) -> Self {
        DataValue::Xy { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointStyle {
    #[serde(rename = "circle")]
    Circle,
    #[serde(rename = "rectRot")]
    RectRot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DataValue>,
    pub background_color: String,
    pub border_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_style: Option<PointStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Higher order is painted later, i.e. on top
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip)]
    pub role: DatasetRole,
}

impl Dataset {
    fn new(label: impl Into<String>, role: DatasetRole, fill: &str, border: &str) -> Self {
        Self {
            label: label.into(),
            data: Vec::new(),
            background_color: fill.to_string(),
            border_color: border.to_string(),
            point_radius: None,
            point_hover_radius: None,
            point_style: None,
            border_width: None,
            order: None,
            y_axis_id: None,
            tension: None,
            role,
        }
    }

    pub fn radius(&self) -> u32 {
        self.point_radius.unwrap_or(3)
    }

    pub fn y_axis(&self) -> &str {
        self.y_axis_id.as_deref().unwrap_or("y")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: String,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub title: AxisTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
}

impl Axis {
    fn titled(text: &str) -> Self {
        Self {
            kind: None,
            position: None,
            min: None,
            max: None,
            title: AxisTitle {
                display: true,
                text: text.to_string(),
            },
            grid: None,
        }
    }

    fn bounded(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    fn linear(mut self, position: &str) -> Self {
        self.kind = Some("linear".to_string());
        self.position = Some(position.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub draw_on_chart_area: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub title: Title,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Smallest zoomed span along either axis, in space units
pub const MIN_FOCUS_SPAN: f64 = 20.0;

/// Visible region of a scatter chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisWindow {
    pub fn full(dims: SpaceDims) -> Self {
        Self {
            x_min: 0.0,
            x_max: dims.width as f64,
            y_min: 0.0,
            y_max: dims.height as f64,
        }
    }

    /// Window spanning half the space, centred on `center` and clamped to the space
    pub fn focused(center: Point, dims: SpaceDims) -> Self {
        let (width, height) = (dims.width as f64, dims.height as f64);
        let span_x = (width * 0.5).max(MIN_FOCUS_SPAN);
        let span_y = (height * 0.5).max(MIN_FOCUS_SPAN);

        Self {
            x_min: (center.x - span_x / 2.0).max(0.0),
            x_max: (center.x + span_x / 2.0).min(width),
            y_min: (center.y - span_y / 2.0).max(0.0),
            y_max: (center.y + span_y / 2.0).min(height),
        }
    }
}

impl ChartConfig {
    fn scatter(title: String, scales: Scales, datasets: Vec<Dataset>) -> Self {
        Self {
            kind: ChartKind::Scatter,
            data: ChartData {
                labels: Vec::new(),
                datasets,
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                interaction: None,
                scales,
                plugins: Plugins {
                    title: Title {
                        display: true,
                        text: title,
                        font: None,
                    },
                    legend: Legend {
                        display: true,
                        position: Some("top".to_string()),
                    },
                },
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.options.plugins.title.text
    }

    pub fn dataset(&self, role: DatasetRole) -> Option<&Dataset> {
        self.data.datasets.iter().find(|d| d.role == role)
    }

    /// Resize every dataset whose role matches
    pub fn set_radius(&mut self, matches: impl Fn(DatasetRole) -> bool, radius: u32, hover: u32) {
        for dataset in self.data.datasets.iter_mut().filter(|d| matches(d.role)) {
            dataset.point_radius = Some(radius);
            dataset.point_hover_radius = Some(hover);
        }
    }

    pub fn set_window(&mut self, window: AxisWindow) {
        let scales = &mut self.options.scales;
        scales.x.min = Some(window.x_min);
        scales.x.max = Some(window.x_max);
        scales.y.min = Some(window.y_min);
        scales.y.max = Some(window.y_max);
    }

    pub fn window(&self) -> Option<AxisWindow> {
        let scales = &self.options.scales;
        Some(AxisWindow {
            x_min: scales.x.min?,
            x_max: scales.x.max?,
            y_min: scales.y.min?,
            y_max: scales.y.max?,
        })
    }
}

fn space_scales(dims: SpaceDims) -> Scales {
    let window = AxisWindow::full(dims);
    Scales {
        x: Axis::titled("X coordinate")
            .linear("bottom")
            .bounded(window.x_min, window.x_max),
        y: Axis::titled("Y coordinate").bounded(window.y_min, window.y_max),
        y1: None,
    }
}

/// Scatter of the generated houses
pub fn point_map(points: &[Point], dims: SpaceDims, view: &ViewState) -> ChartConfig {
    let mut houses = Dataset::new("Houses", DatasetRole::Houses, HOUSE_FILL, HOUSE_BORDER);
    houses.data = points.iter().map(DataValue::from).collect();
    houses.point_radius = Some(view.house_radius);
    houses.point_hover_radius = Some(view.house_hover_radius());

    ChartConfig::scatter(
        format!("Map of {} houses", points.len()),
        space_scales(dims),
        vec![houses],
    )
}

/// Houses coloured by cluster, plus the centroids of one iteration on top
pub fn cluster_result(
    points: &[Point],
    labels: &[usize],
    centroids: &[Point],
    iteration: usize,
    dims: SpaceDims,
    view: &ViewState,
) -> ChartConfig {
    let k = centroids.len();
    let mut datasets = Vec::with_capacity(k + 1);

    for cluster in 0..k {
        let members: Vec<DataValue> = points
            .iter()
            .zip(labels)
            .filter(|(_, label)| **label == cluster)
            .map(|(p, _)| DataValue::from(p))
            .collect();

        let color = cluster_color(cluster);
        let mut dataset = Dataset::new(
            format!("Cluster {} ({} houses)", cluster + 1, members.len()),
            DatasetRole::Cluster(cluster),
            color,
            color,
        );
        dataset.data = members;
        dataset.point_radius = Some(view.cluster_radius);
        dataset.point_hover_radius = Some(view.cluster_hover_radius());
        datasets.push(dataset);
    }

    let mut hospitals = Dataset::new(
        "Hospitals",
        DatasetRole::Centroids,
        HOSPITAL_FILL,
        HOSPITAL_BORDER,
    );
    hospitals.data = centroids.iter().map(DataValue::from).collect();
    hospitals.point_radius = Some(view.centroid_radius);
    hospitals.point_hover_radius = Some(view.centroid_hover_radius());
    hospitals.point_style = Some(PointStyle::RectRot);
    hospitals.border_width = Some(2);
    hospitals.order = Some(999);
    datasets.push(hospitals);

    ChartConfig::scatter(
        format!("K-Means with {} hospitals - iteration {}", k, iteration + 1),
        space_scales(dims),
        datasets,
    )
}

/// Inertia and silhouette against k on two y axes
pub fn k_comparison(analysis: &KAnalysis) -> ChartConfig {
    let mut inertia = Dataset::new(
        "Inertia (elbow method)",
        DatasetRole::Series,
        INERTIA_FILL,
        INERTIA_LINE,
    );
    inertia.data = analysis
        .results
        .iter()
        .map(|r| DataValue::Value(r.inertia))
        .collect();
    inertia.y_axis_id = Some("y".to_string());

    let mut silhouette = Dataset::new(
        "Silhouette score",
        DatasetRole::Series,
        SILHOUETTE_FILL,
        SILHOUETTE_LINE,
    );
    silhouette.data = analysis
        .results
        .iter()
        .map(|r| DataValue::Value(r.silhouette))
        .collect();
    silhouette.y_axis_id = Some("y1".to_string());

    for line in [&mut inertia, &mut silhouette] {
        line.tension = Some(0.4);
        line.border_width = Some(2);
    }

    let mut y1 = Axis::titled("Silhouette score").linear("right").bounded(0.0, 1.0);
    y1.grid = Some(Grid {
        draw_on_chart_area: false,
    });

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: analysis.results.iter().map(|r| r.k.to_string()).collect(),
            datasets: vec![inertia, silhouette],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            interaction: Some(Interaction {
                mode: "index".to_string(),
                intersect: false,
            }),
            scales: Scales {
                x: Axis::titled("Number of hospitals (k)"),
                y: Axis::titled("Inertia").linear("left"),
                y1: Some(y1),
            },
            plugins: Plugins {
                title: Title {
                    display: true,
                    text: format!("Optimal k analysis - recommended: k={}", analysis.optimal_k),
                    font: Some(Font { size: 16 }),
                },
                legend: Legend {
                    display: true,
                    position: None,
                },
            },
        },
    }
}
