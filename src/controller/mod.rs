//! The single owner of application state.
//!
//! User actions enter through the `Controller` methods, run validation,
//! issue at most one service request, apply the response (if it is still
//! the newest one for its operation) and push the result to a [`Surface`].
//! Methods take `&self` so several requests can be in flight on one
//! thread; no `RefCell` borrow is held across an `.await`.

mod busy;
mod surface;
mod terminal;


pub use busy::{BusyGuard, BusyIndicator};
pub use surface::{Surface, SurfaceError};
pub use terminal::{SessionManifest, TerminalSurface};

use crate::error::AppError;
use crate::render::{
    AxisWindow, CanvasId, Canvases, ChartConfig, ChartRegistry, DatasetRole, QualityPanel,
    StatsPanel, cluster_cards, cluster_result, hospital_entries, install_overlays, k_comparison,
    metric_cards, point_map,
};
use crate::service::{ClusteringRequest, ClusteringService, GenerateRequest, KAnalysisRequest};
use crate::state::{AppState, Operation, SpaceDims, ViewState};
use crate::validate::{GenerateParams, suggested_k_max, validate_k};
use std::cell::{Ref, RefCell};

/// What happened to a response that came back successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer request of the same kind, or a new point set, made it stale
    Superseded,
}

pub struct Controller<S, U> {
    service: S,
    surface: RefCell<U>,
    state: RefCell<AppState>,
    canvases: RefCell<Canvases>,
    busy: BusyIndicator,
}

fn failure_context(op: Operation) -> &'static str {
    match op {
        Operation::Generate => "Error generating houses",
        Operation::Compute => "Error computing hospital locations",
        Operation::Analyze => "Error analyzing optimal k",
    }
}

impl<S: ClusteringService, U: Surface> Controller<S, U> {
    pub fn new(service: S, surface: U) -> Self {
        install_overlays();
        Self {
            service,
            surface: RefCell::new(surface),
            state: RefCell::new(AppState::new()),
            canvases: RefCell::new(Canvases::new()),
            busy: BusyIndicator::default(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    pub fn surface(&self) -> Ref<'_, U> {
        self.surface.borrow()
    }

    pub fn chart_registry(&self) -> ChartRegistry {
        self.canvases.borrow().registry().clone()
    }

    /// Snapshot of the live chart on a canvas
    pub fn chart(&self, id: CanvasId) -> Option<ChartConfig> {
        self.canvases
            .borrow()
            .get(id)
            .chart()
            .map(|handle| handle.config().clone())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.depth() > 0
    }

    pub fn notify(&self, message: &str) {
        self.surface.borrow_mut().notify(message);
    }

    pub fn set_k_input(&self, k: i64) {
        self.state.borrow_mut().k_input = k;
    }

    /// Show a failure to the user and hand it back to the caller
    fn report(&self, op: Operation, err: AppError) -> AppError {
        if err.request_issued() {
            tracing::error!(error = %err, ?op, "request failed");
            self.notify(&format!("{}: {}", failure_context(op), err));
        } else {
            tracing::debug!(error = %err, ?op, "action rejected");
            self.notify(&err.to_string());
        }
        err
    }

    fn require_points(&self, op: Operation) -> Result<usize, AppError> {
        let count = self.state.borrow().points().len();
        if count == 0 {
            return Err(self.report(op, AppError::precondition("Generate the houses first")));
        }
        Ok(count)
    }

    fn discard_stale(&self, op: Operation) -> Outcome {
        tracing::warn!(?op, "discarding response to a superseded request");
        Outcome::Superseded
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Ask the service for `count` houses in a `width` x `height` space
    pub async fn generate_points(
        &self,
        count: i64,
        width: i64,
        height: i64,
    ) -> Result<Outcome, AppError> {
        let op = Operation::Generate;
        let params = GenerateParams::new(count, width, height).map_err(|e| self.report(op, e))?;

        let ticket = self.state.borrow_mut().issue(op);
        let _busy = self.busy.acquire(&self.surface);

        tracing::info!(
            count = params.count,
            width = params.width,
            height = params.height,
            "generating houses"
        );
        let req = GenerateRequest {
            count: params.count,
            space_size: params.space_size(),
        };
        let response = self
            .service
            .generate_points(&req)
            .await
            .map_err(|e| self.report(op, AppError::from_service(e, self.service.base_url())))?;

        if !self.state.borrow().is_current(&ticket) {
            return Ok(self.discard_stale(op));
        }

        let generated = response.points.len();
        tracing::info!(generated, "houses generated");
        self.state
            .borrow_mut()
            .replace_points(response.points, SpaceDims::new(params.width, params.height));

        self.clear_visualizations();
        self.render_stats();
        self.render_house_map();
        self.notify(&format!(
            "✓ {} houses generated in a {}x{} space",
            generated, params.width, params.height
        ));

        Ok(Outcome::Applied)
    }

    /// Cluster the current houses into `k` hospitals
    ///
    /// A k above the house count is reported, written back to the k input
    /// and retried once with the house count.
    pub async fn compute_clustering(&self, k: i64) -> Result<Outcome, AppError> {
        let op = Operation::Compute;
        self.state.borrow_mut().k_input = k;

        let point_count = self.require_points(op)?;
        let k = validate_k(k).map_err(|e| self.report(op, e))?;

        if k > point_count {
            self.notify(&format!(
                "The number of hospitals (k={}) cannot exceed the number of houses ({}). Reducing k to {}",
                k, point_count, point_count
            ));
            self.surface.borrow_mut().set_k_input(point_count);
            return Box::pin(self.compute_clustering(point_count as i64)).await;
        }

        let (ticket, points, space_size) = {
            let mut state = self.state.borrow_mut();
            let ticket = state.issue(op);
            (ticket, state.points().to_vec(), state.dims().space_size())
        };
        let _busy = self.busy.acquire(&self.surface);

        tracing::info!(k, houses = points.len(), space_size, "computing hospitals");
        let req = ClusteringRequest {
            points: &points,
            k,
            space_size,
        };
        let result = self
            .service
            .compute_clustering(&req)
            .await
            .map_err(|e| self.report(op, AppError::from_service(e, self.service.base_url())))?;

        if !self.state.borrow().is_current(&ticket) {
            return Ok(self.discard_stale(op));
        }
        result
            .validate(points.len())
            .map_err(|e| self.report(op, e.into()))?;

        tracing::info!(
            iterations = result.centroid_history.len(),
            optimal_k = result.summary.optimal_k,
            "clustering received"
        );
        self.state.borrow_mut().install_result(result);

        self.render_stats();
        self.render_result();
        self.render_metrics();
        self.render_quality();

        Ok(Outcome::Applied)
    }

    /// Request the inertia/silhouette series for k = 2..k_max
    pub async fn analyze_optimal_k(&self) -> Result<Outcome, AppError> {
        let op = Operation::Analyze;
        let point_count = self.require_points(op)?;

        let (ticket, points, space_size, k_max) = {
            let mut state = self.state.borrow_mut();
            let k_max = suggested_k_max(point_count, state.k_input);
            let ticket = state.issue(op);
            (ticket, state.points().to_vec(), state.dims().space_size(), k_max)
        };
        let _busy = self.busy.acquire(&self.surface);

        tracing::info!(k_max, houses = point_count, "analyzing optimal k");
        let req = KAnalysisRequest {
            points: &points,
            k_max,
            space_size,
        };
        let analysis = self
            .service
            .analyze_optimal_k(&req)
            .await
            .map_err(|e| self.report(op, AppError::from_service(e, self.service.base_url())))?;

        if !self.state.borrow().is_current(&ticket) {
            return Ok(self.discard_stale(op));
        }

        tracing::info!(optimal_k = analysis.optimal_k, "analysis received");
        let mut canvases = self.canvases.borrow_mut();
        let handle = canvases
            .get_mut(CanvasId::Comparison)
            .replace(k_comparison(&analysis));
        self.surface.borrow_mut().present_chart(handle);

        Ok(Outcome::Applied)
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Show the previous centroid snapshot; false at the first one
    pub fn previous_iteration(&self) -> bool {
        let moved = self.state.borrow_mut().cursor_mut().previous();
        if moved {
            self.render_result();
        }
        moved
    }

    /// Show the next centroid snapshot; false at the last one
    pub fn next_iteration(&self) -> bool {
        let moved = self.state.borrow_mut().cursor_mut().next();
        if moved {
            self.render_result();
        }
        moved
    }

    pub fn set_house_radius(&self, radius: u32) {
        let view = self.update_view(|view| view.house_radius = ViewState::clamp_radius(radius));
        self.redraw(CanvasId::HouseMap, |chart| {
            chart.set_radius(
                |role| role == DatasetRole::Houses,
                view.house_radius,
                view.house_hover_radius(),
            )
        });
    }

    pub fn set_cluster_radius(&self, radius: u32) {
        let view = self.update_view(|view| view.cluster_radius = ViewState::clamp_radius(radius));
        self.redraw(CanvasId::ResultMap, |chart| {
            chart.set_radius(
                |role| matches!(role, DatasetRole::Cluster(_)),
                view.cluster_radius,
                view.cluster_hover_radius(),
            )
        });
    }

    pub fn set_centroid_radius(&self, radius: u32) {
        let view = self.update_view(|view| view.centroid_radius = ViewState::clamp_radius(radius));
        self.redraw(CanvasId::ResultMap, |chart| {
            chart.set_radius(
                |role| role == DatasetRole::Centroids,
                view.centroid_radius,
                view.centroid_hover_radius(),
            )
        });
    }

    /// Zoom the result chart onto hospital `index` (0-based)
    pub fn center_on_hospital(&self, index: usize) -> bool {
        let window = {
            let state = self.state.borrow();
            match state.current_centroids().and_then(|c| c.get(index)) {
                Some(centroid) => AxisWindow::focused(*centroid, state.dims()),
                None => return false,
            }
        };
        self.redraw(CanvasId::ResultMap, |chart| chart.set_window(window))
    }

    /// Restore the full space on the result chart
    pub fn reset_view(&self) -> bool {
        let window = AxisWindow::full(self.state.borrow().dims());
        self.redraw(CanvasId::ResultMap, |chart| chart.set_window(window))
    }

    fn update_view(&self, change: impl FnOnce(&mut ViewState)) -> ViewState {
        let mut state = self.state.borrow_mut();
        change(&mut state.view);
        state.view
    }

    /// In-place tweak of a live chart; false when the canvas is empty
    fn redraw(&self, id: CanvasId, tweak: impl FnOnce(&mut ChartConfig)) -> bool {
        let mut canvases = self.canvases.borrow_mut();
        match canvases.get_mut(id).update(tweak) {
            Some(handle) => {
                self.surface.borrow_mut().present_chart(handle);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Drop every chart and every panel derived from the clustering result
    pub fn clear_visualizations(&self) {
        self.canvases.borrow_mut().clear_all();
        self.state.borrow_mut().clear_result();

        let mut surface = self.surface.borrow_mut();
        surface.hide_sections();
        surface.clear_cluster_summary();
        if let Err(err) = surface.clear_hospital_panel() {
            tracing::debug!(%err, "could not clear hospital panel");
        }
    }

    pub fn render_stats(&self) {
        let stats = {
            let state = self.state.borrow();
            StatsPanel::new(state.dims(), state.points().len(), state.result())
        };
        self.surface.borrow_mut().show_stats(&stats);
    }

    pub fn render_house_map(&self) {
        let config = {
            let state = self.state.borrow();
            point_map(state.points(), state.dims(), &state.view)
        };

        let mut canvases = self.canvases.borrow_mut();
        let handle = canvases.get_mut(CanvasId::HouseMap).replace(config);
        let mut surface = self.surface.borrow_mut();
        surface.present_chart(handle);
        if let Err(err) = surface.clear_hospital_panel() {
            tracing::debug!(%err, "could not clear hospital panel");
        }
    }

    /// Redraw the result chart and its panels for the displayed iteration
    pub fn render_result(&self) {
        let state = self.state.borrow();
        let (Some(result), Some(centroids)) = (state.result(), state.current_centroids()) else {
            return;
        };
        let cursor = state.cursor();
        tracing::debug!(
            k = centroids.len(),
            iteration = cursor.index() + 1,
            "drawing clustering result"
        );

        let config = cluster_result(
            state.points(),
            &result.labels,
            centroids,
            cursor.index(),
            state.dims(),
            &state.view,
        );
        let mut canvases = self.canvases.borrow_mut();
        let handle = canvases.get_mut(CanvasId::ResultMap).replace(config);

        let mut surface = self.surface.borrow_mut();
        surface.present_chart(handle);
        surface.show_iteration_label(cursor.index() + 1, cursor.len());
        // Labels are the final assignment; every iteration shows the same counts
        surface.show_cluster_summary(&cluster_cards(&result.labels, centroids.len()));
        if let Err(err) = surface.show_hospital_panel(&hospital_entries(centroids, &result.labels)) {
            tracing::debug!(%err, "could not fill hospital panel");
        }
    }

    pub fn render_metrics(&self) {
        let state = self.state.borrow();
        if let Some(result) = state.result() {
            self.surface
                .borrow_mut()
                .show_metrics(&metric_cards(&result.metrics));
        }
    }

    pub fn render_quality(&self) {
        let state = self.state.borrow();
        if let Some(result) = state.result() {
            self.surface
                .borrow_mut()
                .show_quality(&QualityPanel::from_result(result));
        }
    }
}
