use super::chart::ChartConfig;
use std::cell::Cell;
use std::rc::Rc;

/// The fixed drawing surfaces of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasId {
    HouseMap,
    ResultMap,
    Comparison,
}

impl CanvasId {
    pub const ALL: [CanvasId; 3] = [CanvasId::HouseMap, CanvasId::ResultMap, CanvasId::Comparison];

    pub fn name(self) -> &'static str {
        match self {
            CanvasId::HouseMap => "house-map",
            CanvasId::ResultMap => "result-map",
            CanvasId::Comparison => "k-comparison",
        }
    }

    fn slot(self) -> usize {
        match self {
            CanvasId::HouseMap => 0,
            CanvasId::ResultMap => 1,
            CanvasId::Comparison => 2,
        }
    }
}

/// Live chart instance counts, shared by every handle
#[derive(Debug, Clone, Default)]
pub struct ChartRegistry {
    live: Rc<[Cell<usize>; 3]>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self, canvas: CanvasId) -> usize {
        self.live[canvas.slot()].get()
    }

    pub fn total_live(&self) -> usize {
        self.live.iter().map(Cell::get).sum()
    }

    fn acquire(&self, canvas: CanvasId) {
        let cell = &self.live[canvas.slot()];
        cell.set(cell.get() + 1);
    }

    fn release(&self, canvas: CanvasId) {
        let cell = &self.live[canvas.slot()];
        cell.set(cell.get().saturating_sub(1));
    }
}

/// One constructed chart; released when dropped
#[derive(Debug)]
pub struct ChartHandle {
    canvas: CanvasId,
    config: ChartConfig,
    /// Incremented by every in-place update
    revision: u64,
    registry: ChartRegistry,
}

impl ChartHandle {
    fn create(canvas: CanvasId, config: ChartConfig, registry: &ChartRegistry) -> Self {
        registry.acquire(canvas);
        Self {
            canvas,
            config,
            revision: 0,
            registry: registry.clone(),
        }
    }

    pub fn canvas(&self) -> CanvasId {
        self.canvas
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        self.registry.release(self.canvas);
    }
}

/// Owns at most one live chart
#[derive(Debug)]
pub struct Canvas {
    id: CanvasId,
    registry: ChartRegistry,
    chart: Option<ChartHandle>,
}

impl Canvas {
    pub fn new(id: CanvasId, registry: &ChartRegistry) -> Self {
        Self {
            id,
            registry: registry.clone(),
            chart: None,
        }
    }

    pub fn id(&self) -> CanvasId {
        self.id
    }

    pub fn chart(&self) -> Option<&ChartHandle> {
        self.chart.as_ref()
    }

    /// Release the current chart, then build one from `config`
    pub fn replace(&mut self, config: ChartConfig) -> &ChartHandle {
        self.chart = None;
        self.chart.insert(ChartHandle::create(self.id, config, &self.registry))
    }

    /// Apply an in-place tweak to the live chart, if any
    pub fn update(&mut self, tweak: impl FnOnce(&mut ChartConfig)) -> Option<&ChartHandle> {
        let chart = self.chart.as_mut()?;
        tweak(&mut chart.config);
        chart.revision += 1;
        Some(&*chart)
    }

    pub fn clear(&mut self) {
        self.chart = None;
    }
}

/// The three canvases of the viewer, sharing one registry
#[derive(Debug)]
pub struct Canvases {
    registry: ChartRegistry,
    house_map: Canvas,
    result_map: Canvas,
    comparison: Canvas,
}

impl Canvases {
    pub fn new() -> Self {
        let registry = ChartRegistry::new();
        Self {
            house_map: Canvas::new(CanvasId::HouseMap, &registry),
            result_map: Canvas::new(CanvasId::ResultMap, &registry),
            comparison: Canvas::new(CanvasId::Comparison, &registry),
            registry,
        }
    }

    pub fn registry(&self) -> &ChartRegistry {
        &self.registry
    }

    pub fn get(&self, id: CanvasId) -> &Canvas {
        match id {
            CanvasId::HouseMap => &self.house_map,
            CanvasId::ResultMap => &self.result_map,
            CanvasId::Comparison => &self.comparison,
        }
    }

    pub fn get_mut(&mut self, id: CanvasId) -> &mut Canvas {
        match id {
            CanvasId::HouseMap => &mut self.house_map,
            CanvasId::ResultMap => &mut self.result_map,
            CanvasId::Comparison => &mut self.comparison,
        }
    }

    pub fn clear_all(&mut self) {
        for id in CanvasId::ALL {
            self.get_mut(id).clear();
        }
    }
}

impl Default for Canvases {
    fn default() -> Self {
        Self::new()
    }
}
