// Sparkline geometry - Normalizes historical points into a fixed pixel box
use crate::domain::geometry::SparklineGeometry;
use crate::domain::series::FlotPair;

const FULL_MARGIN: f64 = 6.0;
const MIN_HEIGHT: f64 = 20.0;

/// Line and area paths for the non-null points, or `None` with fewer than
/// two points or an empty box
pub fn build_sparkline(pairs: &[FlotPair], width: f64, height: f64, full: bool) -> Option<SparklineGeometry> {
    let points: Vec<(f64, f64)> = pairs
        .iter()
        .filter_map(|(time, value)| value.map(|v| (*time as f64, v)))
        .collect();
    if points.len() < 2 || width <= 0.0 || height <= 0.0 {
        return None;
    }

    let sparkline_height = if full {
        (height - FULL_MARGIN * 2.0).max(MIN_HEIGHT)
    } else {
        (height * 0.25).floor().max(MIN_HEIGHT)
    };

    let (min_time, max_time) = bounds(points.iter().map(|p| p.0));
    let (min_value, max_value) = bounds(points.iter().map(|p| p.1));

    let coords: Vec<(f64, f64)> = points
        .iter()
        .map(|&(time, value)| {
            let x = if max_time == min_time {
                0.0
            } else {
                (time - min_time) / (max_time - min_time) * width
            };
            // A flat series is drawn through the middle
            let relative_y = if max_value == min_value {
                0.5
            } else {
                (value - min_value) / (max_value - min_value)
            };
            (x, sparkline_height - relative_y * sparkline_height)
        })
        .collect();

    let line_path = coords
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{} {:.2} {:.2}", if i == 0 { "M" } else { "L" }, x, y))
        .collect::<Vec<_>>()
        .join(" ");

    let first_x = coords[0].0;
    let last_x = coords[coords.len() - 1].0;
    let area_path = format!(
        "M {:.2} {:.2} L{} L {:.2} {:.2} Z",
        first_x,
        sparkline_height,
        &line_path[1..],
        last_x,
        sparkline_height
    );

    Some(SparklineGeometry {
        width,
        height: sparkline_height,
        bottom: if full { FULL_MARGIN } else { 0.0 },
        line_path,
        area_path,
    })
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| (min.min(v), max.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_two_points() {
        assert!(build_sparkline(&[(0, Some(1.0))], 100.0, 80.0, false).is_none());
        assert!(build_sparkline(&[(0, Some(1.0)), (1, None)], 100.0, 80.0, false).is_none());
        assert!(build_sparkline(&[], 100.0, 80.0, false).is_none());
    }

    #[test]
    fn test_requires_area() {
        let pairs = [(0, Some(1.0)), (1, Some(2.0))];
        assert!(build_sparkline(&pairs, 0.0, 80.0, false).is_none());
        assert!(build_sparkline(&pairs, 100.0, 0.0, false).is_none());
    }

    #[test]
    fn test_compact_paths() {
        let pairs = [(0, Some(0.0)), (5, None), (10, Some(10.0))];
        let sparkline = build_sparkline(&pairs, 100.0, 200.0, false).unwrap();

        assert_eq!(sparkline.height, 50.0);
        assert_eq!(sparkline.bottom, 0.0);
        assert_eq!(sparkline.line_path, "M 0.00 50.00 L 100.00 0.00");
        assert_eq!(
            sparkline.area_path,
            "M 0.00 50.00 L 0.00 50.00 L 100.00 0.00 L 100.00 50.00 Z"
        );
    }

    #[test]
    fn test_height_modes() {
        let pairs = [(0, Some(1.0)), (1, Some(2.0))];
        assert_eq!(build_sparkline(&pairs, 50.0, 40.0, false).unwrap().height, 20.0);
        assert_eq!(build_sparkline(&pairs, 50.0, 103.0, false).unwrap().height, 25.0);

        let full = build_sparkline(&pairs, 50.0, 100.0, true).unwrap();
        assert_eq!(full.height, 88.0);
        assert_eq!(full.bottom, 6.0);
        assert_eq!(build_sparkline(&pairs, 50.0, 25.0, true).unwrap().height, 20.0);
    }

    #[test]
    fn test_flat_series_draws_mid_height() {
        let pairs = [(0, Some(3.0)), (10, Some(3.0)), (20, Some(3.0))];
        let sparkline = build_sparkline(&pairs, 40.0, 80.0, false).unwrap();
        assert_eq!(sparkline.line_path, "M 0.00 10.00 L 20.00 10.00 L 40.00 10.00");
    }

    #[test]
    fn test_single_timestamp_pins_to_left() {
        let pairs = [(7, Some(1.0)), (7, Some(2.0))];
        let sparkline = build_sparkline(&pairs, 40.0, 80.0, false).unwrap();
        assert_eq!(sparkline.line_path, "M 0.00 20.00 L 0.00 0.00");
    }
}
