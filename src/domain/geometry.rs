// Renderable geometry produced for the presentation layer
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeMarker {
    pub inner: Point,
    pub outer: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Point>,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeGeometry {
    /// Side of the square viewBox
    pub dimension: f64,
    /// Visible height: top half of the square plus the stroke
    pub view_height: f64,
    pub stroke_width: f64,
    pub radius: f64,
    pub center: f64,
    pub normalized_value: f64,
    pub track_path: String,
    /// Absent when there is no value to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_path: Option<String>,
    pub markers: Vec<GaugeMarker>,
    pub text_position: Point,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparklineGeometry {
    pub width: f64,
    pub height: f64,
    /// Offset from the bottom edge of the panel
    pub bottom: f64,
    pub line_path: String,
    pub area_path: String,
}
