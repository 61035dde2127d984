/// Cluster colors, reused cyclically when k exceeds the palette
pub const CLUSTER_COLORS: [&str; 15] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8B195", "#F67280", "#C06C84", "#6C5B7B", "#355C7D",
];

pub const HOUSE_FILL: &str = "#3498db";
pub const HOUSE_BORDER: &str = "#2980b9";
pub const HOSPITAL_FILL: &str = "#e74c3c";
pub const HOSPITAL_BORDER: &str = "#c0392b";

pub const INERTIA_LINE: &str = "#e74c3c";
pub const INERTIA_FILL: &str = "rgba(231, 76, 60, 0.1)";
pub const SILHOUETTE_LINE: &str = "#3498db";
pub const SILHOUETTE_FILL: &str = "rgba(52, 152, 219, 0.1)";

pub fn cluster_color(cluster: usize) -> &'static str {
    CLUSTER_COLORS[cluster % CLUSTER_COLORS.len()]
}
