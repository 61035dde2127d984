mod sequence;
mod view;

#[cfg(test)]
mod tests;

pub use sequence::{Operation, RequestSequence, Ticket};
pub use view::{ViewState, MAX_RADIUS, MIN_RADIUS};

use crate::service::{ClusteringResult, Point};

/// Size of the rectangular space the houses live in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceDims {
    pub width: u32,
    pub height: u32,
}

impl SpaceDims {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn space_size(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl Default for SpaceDims {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

/// Which centroid snapshot is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IterationCursor {
    index: usize,
    len: usize,
}

impl IterationCursor {
    /// Cursor over `len` snapshots, placed on the last one
    pub fn at_end(len: usize) -> Self {
        Self {
            index: len.saturating_sub(1),
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step back one snapshot; false at the first one
    pub fn previous(&mut self) -> bool {
        if self.index == 0 || self.len == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one snapshot; false at the last one
    pub fn next(&mut self) -> bool {
        if self.index + 1 >= self.len {
            return false;
        }
        self.index += 1;
        true
    }
}

/// Everything the viewer knows, owned by one controller
#[derive(Debug, Default)]
pub struct AppState {
    points: Vec<Point>,
    dims: SpaceDims,
    result: Option<ClusteringResult>,
    cursor: IterationCursor,
    /// Bumped on every new point set
    epoch: u64,
    pub view: ViewState,
    /// Current content of the k input; 0 when empty
    pub k_input: i64,
    pub sequence: RequestSequence,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn dims(&self) -> SpaceDims {
        self.dims
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn result(&self) -> Option<&ClusteringResult> {
        self.result.as_ref()
    }

    pub fn cursor(&self) -> IterationCursor {
        self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut IterationCursor {
        &mut self.cursor
    }

    /// Install a freshly generated point set, dropping everything derived from the old one
    pub fn replace_points(&mut self, points: Vec<Point>, dims: SpaceDims) {
        self.points = points;
        self.dims = dims;
        self.epoch += 1;
        self.clear_result();
    }

    pub fn clear_result(&mut self) {
        self.result = None;
        self.cursor = IterationCursor::default();
    }

    /// Store a clustering result and show its final iteration
    pub fn install_result(&mut self, result: ClusteringResult) {
        self.cursor = IterationCursor::at_end(result.centroid_history.len());
        self.result = Some(result);
    }

    /// Ticket for a request built from the current point set
    pub fn issue(&mut self, op: Operation) -> Ticket {
        self.sequence.issue(op, self.epoch)
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.sequence.is_current(ticket, self.epoch)
    }

    /// Centroids of the displayed iteration
    pub fn current_centroids(&self) -> Option<&[Point]> {
        self.result
            .as_ref()
            .and_then(|r| r.centroid_history.get(self.cursor.index()))
            .map(Vec::as_slice)
    }
}

/// Members per cluster; labels outside `[0, k)` are ignored
pub fn cluster_counts(labels: &[usize], k: usize) -> Vec<usize> {
    let mut counts = vec![0; k];
    for &label in labels {
        if let Some(slot) = counts.get_mut(label) {
            *slot += 1;
        }
    }
    counts
}
