use super::surface::{Surface, SurfaceError};
use crate::render::{
    CanvasId, ChartHandle, ClusterCard, HospitalEntry, MetricCard, QualityPanel, StatsPanel, render_svg,
};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const MANIFEST_FILE: &str = "session.json";

/// Record of the charts written during one run
#[derive(Debug, Clone, Serialize)]
pub struct SessionManifest {
    pub session_id: Uuid,
    pub created_at: String,
    pub generator: String,
    pub service_url: String,
    pub charts: BTreeMap<String, ChartRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartRecord {
    pub title: String,
    pub svg: PathBuf,
    pub config: PathBuf,
    pub revision: u64,
    pub written_at: String,
}

impl SessionManifest {
    fn new(service_url: &str) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("hospital-kmeans v{}", env!("CARGO_PKG_VERSION")),
            service_url: service_url.to_string(),
            charts: BTreeMap::new(),
        }
    }
}

/// Prints panels as text and writes charts as SVG + Chart.js JSON files
pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    out_dir: PathBuf,
    manifest: SessionManifest,
}

impl TerminalSurface<Stdout> {
    pub fn new(out_dir: impl Into<PathBuf>, service_url: &str) -> io::Result<Self> {
        Self::with_writer(io::stdout(), out_dir, service_url)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn with_writer(out: W, out_dir: impl Into<PathBuf>, service_url: &str) -> io::Result<Self> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir)?;
        Ok(Self {
            out,
            out_dir,
            manifest: SessionManifest::new(service_url),
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn manifest(&self) -> &SessionManifest {
        &self.manifest
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    fn write_chart(&mut self, chart: &ChartHandle) -> io::Result<ChartRecord> {
        let name = chart.canvas().name();
        let svg_path = self.out_dir.join(format!("{}.svg", name));
        let json_path = self.out_dir.join(format!("{}.json", name));

        fs::write(&svg_path, render_svg(chart.config()))?;
        let json = serde_json::to_string_pretty(chart.config()).map_err(io::Error::other)?;
        fs::write(&json_path, json)?;

        Ok(ChartRecord {
            title: chart.config().title().to_string(),
            svg: svg_path,
            config: json_path,
            revision: chart.revision(),
            written_at: Utc::now().to_rfc3339(),
        })
    }

    fn write_manifest(&self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.manifest).map_err(io::Error::other)?;
        fs::write(self.out_dir.join(MANIFEST_FILE), json)
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn notify(&mut self, message: &str) {
        self.line(&format!("» {}", message));
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            self.line("… waiting for the clustering service");
        }
    }

    fn set_k_input(&mut self, k: usize) {
        self.line(&format!("  k input set to {}", k));
    }

    fn show_stats(&mut self, stats: &StatsPanel) {
        self.line(&format!(
            "Space: {}x{}   Houses: {}   Hospitals: {}",
            stats.width, stats.height, stats.houses, stats.hospitals
        ));
    }

    fn show_metrics(&mut self, cards: &[MetricCard]) {
        self.line("=== Metrics ===");
        for card in cards {
            let class = card.class.map(|c| format!(" [{}]", c)).unwrap_or_default();
            self.line(&format!(
                "{:<20} {:>10}{}   {}",
                card.title, card.value, class, card.caption
            ));
        }
    }

    fn show_quality(&mut self, panel: &QualityPanel) {
        self.line(&format!("=== {} ===", panel.title));
        self.line(&format!("Score: {}", panel.score_badge));
        for detail in &panel.details {
            self.line(&format!("  - {}", detail));
        }
        self.line(&format!("Recommendation: {}", panel.recommendation));
    }

    fn show_cluster_summary(&mut self, cards: &[ClusterCard]) {
        self.line("=== Cluster summary ===");
        for card in cards {
            self.line(&format!(
                "Cluster {:<3} {:>5} houses   hospital {} {}",
                card.number, card.count, card.number, card.color
            ));
        }
    }

    fn clear_cluster_summary(&mut self) {
        // Printed lines cannot be taken back
    }

    fn show_hospital_panel(&mut self, entries: &[HospitalEntry]) -> Result<(), SurfaceError> {
        let mut text = String::from("=== Hospitals ===\n");
        for entry in entries {
            text.push_str(&format!("{}\n", entry));
        }
        text.push_str("(center <n> to zoom, reset to restore the view)");
        writeln!(self.out, "{}", text).map_err(|e| SurfaceError(e.to_string()))
    }

    fn clear_hospital_panel(&mut self) -> Result<(), SurfaceError> {
        // Printed lines cannot be taken back; only push out what is buffered
        self.out.flush().map_err(|e| SurfaceError(e.to_string()))
    }

    fn show_iteration_label(&mut self, current: usize, total: usize) {
        self.line(&format!("Iteration: {} of {}", current, total));
    }

    fn present_chart(&mut self, chart: &ChartHandle) {
        match self.write_chart(chart) {
            Ok(record) => {
                self.line(&format!("  chart written: {}", record.svg.display()));
                self.manifest
                    .charts
                    .insert(chart.canvas().name().to_string(), record);
                if let Err(err) = self.write_manifest() {
                    tracing::warn!(%err, "could not update session manifest");
                }
            }
            Err(err) => {
                tracing::warn!(%err, canvas = chart.canvas().name(), "could not write chart");
            }
        }
    }

    fn hide_sections(&mut self) {
        // Charts derived from the previous point set must not linger on disk
        for canvas in [CanvasId::ResultMap, CanvasId::Comparison] {
            if let Some(record) = self.manifest.charts.remove(canvas.name()) {
                for path in [&record.svg, &record.config] {
                    if let Err(err) = fs::remove_file(path) {
                        tracing::debug!(%err, path = %path.display(), "could not remove stale chart");
                    }
                }
            }
        }
        if let Err(err) = self.write_manifest() {
            tracing::warn!(%err, "could not update session manifest");
        }
    }
}
