// Gauge geometry - Projects a value and threshold steps onto a semicircular arc
use crate::domain::geometry::{GaugeGeometry, GaugeMarker, Point};
use crate::domain::thresholds::ResolvedStep;
use std::f64::consts::PI;

const START_ANGLE: f64 = PI;
const END_ANGLE: f64 = 2.0 * PI;
const MARKER_INNER_OFFSET: f64 = 6.0;
const MARKER_OUTER_OFFSET: f64 = 4.0;
const LABEL_OFFSET: f64 = 18.0;

#[derive(Debug, Clone)]
pub struct GaugeInput<'a> {
    pub width: f64,
    pub height: f64,
    pub min: f64,
    pub max: f64,
    pub value: Option<f64>,
    pub thresholds: &'a [ResolvedStep],
    pub show_markers: bool,
    pub show_labels: bool,
    pub font_scale: f64,
}

/// Build the gauge for one cell, or `None` when the cell has no room for it
pub fn build_gauge(input: &GaugeInput<'_>) -> Option<GaugeGeometry> {
    let dimension = input.width.min(input.height * 1.3);
    if dimension.is_nan() || dimension <= 0.0 {
        return None;
    }

    let stroke_width = (dimension / 12.0).min(16.0);
    let radius = dimension / 2.0 - stroke_width;
    let center = dimension / 2.0;
    let normalized_value = normalize(input.value, input.min, input.max);
    let value_angle = angle_for(normalized_value);

    let track_path = describe_arc(center, center, radius, START_ANGLE, END_ANGLE);
    // A missing value keeps the track but draws no value arc
    let value_path = input
        .value
        .map(|_| describe_arc(center, center, radius, START_ANGLE, value_angle));

    let markers = if input.show_markers {
        threshold_markers(input, center, radius)
    } else {
        Vec::new()
    };

    Some(GaugeGeometry {
        dimension,
        view_height: dimension / 2.0 + stroke_width,
        stroke_width,
        radius,
        center,
        normalized_value,
        track_path,
        value_path,
        markers,
        text_position: Point::new(center, center + stroke_width),
        font_size: (dimension / 5.0).min(100.0) * input.font_scale,
    })
}

/// Map `value` into [0, 1] over [min, max]. A missing value is 0 and a
/// degenerate range is always full.
pub fn normalize(value: Option<f64>, min: f64, max: f64) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    if max == min {
        return 1.0;
    }
    let clamped = value.max(min).min(max);
    (clamped - min) / (max - min)
}

fn angle_for(normalized: f64) -> f64 {
    START_ANGLE + (END_ANGLE - START_ANGLE) * normalized
}

fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle: f64) -> Point {
    Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// SVG arc path drawn from `end_angle` back to `start_angle`
fn describe_arc(cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) -> String {
    let start = polar_to_cartesian(cx, cy, radius, end_angle);
    let end = polar_to_cartesian(cx, cy, radius, start_angle);
    let large_arc = if end_angle - start_angle <= PI { 0 } else { 1 };
    format!(
        "M {} {} A {} {} 0 {} 0 {} {}",
        start.x, start.y, radius, radius, large_arc, end.x, end.y
    )
}

fn threshold_markers(input: &GaugeInput<'_>, center: f64, radius: f64) -> Vec<GaugeMarker> {
    let span = if input.max - input.min == 0.0 {
        1.0
    } else {
        input.max - input.min
    };

    input
        .thresholds
        .iter()
        .filter(|step| step.value >= input.min && step.value <= input.max)
        .map(|step| {
            let angle = angle_for((step.value - input.min) / span);
            GaugeMarker {
                inner: polar_to_cartesian(center, center, radius - MARKER_INNER_OFFSET, angle),
                outer: polar_to_cartesian(center, center, radius + MARKER_OUTER_OFFSET, angle),
                label: input
                    .show_labels
                    .then(|| polar_to_cartesian(center, center, radius + LABEL_OFFSET, angle)),
                value: step.value,
                color: step.color.clone(),
            }
        })
        .collect()
}
