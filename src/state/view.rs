pub const MIN_RADIUS: u32 = 1;
pub const MAX_RADIUS: u32 = 30;

/// Marker sizes for each chart, adjusted by the sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub house_radius: u32,
    pub cluster_radius: u32,
    pub centroid_radius: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            house_radius: 5,
            cluster_radius: 5,
            centroid_radius: 12,
        }
    }
}

impl ViewState {
    pub fn clamp_radius(radius: u32) -> u32 {
        radius.clamp(MIN_RADIUS, MAX_RADIUS)
    }

    pub fn house_hover_radius(&self) -> u32 {
        self.house_radius + 2
    }

    pub fn cluster_hover_radius(&self) -> u32 {
        self.cluster_radius + 2
    }

    pub fn centroid_hover_radius(&self) -> u32 {
        self.centroid_radius + 3
    }
}
