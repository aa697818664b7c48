// Series reducer - Turns one raw series into statistics and a cleaned point list
use crate::domain::frame::{DataFrame, Field, FieldValue};
use crate::domain::series::{NullPointMode, ProcessedSeries, RawPoint, RawSeries, SeriesStats, SeriesValue};

/// Read the first numeric field of a frame as a series, paired with the
/// frame's time field. Returns `None` when the frame has no numeric field.
pub fn build_series_from_frame(frame: &DataFrame, alias: impl Into<String>) -> Option<RawSeries> {
    let numeric_field = frame.numeric_field()?;
    let time_field = frame.time_field();

    let points = (0..numeric_field.values.len())
        .map(|i| {
            let value = numeric_field.value_at(i).and_then(to_series_value);
            let time = match time_field {
                Some(field) => to_timestamp(field, i),
                None => i as i64,
            };
            RawPoint::new(Some(time), value)
        })
        .collect();

    Some(RawSeries::new(alias, points))
}

fn to_series_value(cell: &FieldValue) -> Option<SeriesValue> {
    match cell {
        FieldValue::Number(n) if n.is_finite() => Some(SeriesValue::Number(*n)),
        FieldValue::Number(_) => None,
        FieldValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(SeriesValue::Number(n)),
            _ => Some(SeriesValue::Text(s.clone())),
        },
        FieldValue::Bool(b) => Some(SeriesValue::Text(b.to_string())),
    }
}

/// Epoch milliseconds of row `index`, falling back to the row index itself
/// when the cell is missing or cannot be read as a time.
fn to_timestamp(field: &Field, index: usize) -> i64 {
    match field.value_at(index) {
        Some(FieldValue::Number(n)) if n.is_finite() => *n as i64,
        Some(FieldValue::Text(s)) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|t| t.timestamp_millis())
            .or_else(|_| s.trim().parse::<i64>())
            .unwrap_or(index as i64),
        _ => index as i64,
    }
}

/// Reduce a series under the given null policy.
///
/// `delta` only accumulates rising segments: a rise continuing a rising
/// streak adds the increment, a rise after a fall adds the full value, and a
/// fall adds nothing unless it is the very last row, in which case the raw
/// value is added.
pub fn reduce_series(series: &RawSeries, null_point_mode: NullPointMode) -> ProcessedSeries {
    let mut stats = SeriesStats::default();
    let mut flotpairs = Vec::with_capacity(series.points.len());
    let mut all_is_null = true;
    let mut all_is_zero = true;
    let mut non_nulls = 0usize;
    let mut previous_value = 0.0;
    let mut rising = true;
    let mut previous_time: Option<i64> = None;
    let mut last_value: Option<SeriesValue> = None;
    let mut last_time: Option<i64> = None;
    let last_index = series.points.len().saturating_sub(1);

    for (i, point) in series.points.iter().enumerate() {
        if let (Some(previous), Some(time)) = (previous_time, point.time) {
            stats.time_step = stats.time_step.min(time.saturating_sub(previous));
        }
        previous_time = point.time;

        let value = match (&point.value, null_point_mode) {
            (None, NullPointMode::Connected) => continue,
            (None, NullPointMode::NullAsZero) => Some(SeriesValue::Number(0.0)),
            (value, _) => value.clone(),
        };

        let numeric = match &value {
            Some(SeriesValue::Number(n)) if n.is_finite() => Some(*n),
            _ => None,
        };

        if let Some(n) = numeric {
            stats.total += n;
            all_is_null = false;
            non_nulls += 1;

            stats.max = Some(stats.max.map_or(n, |max| max.max(n)));
            stats.min = Some(stats.min.map_or(n, |min| min.min(n)));

            if stats.first.is_none() {
                stats.first = Some(n);
            } else if previous_value > n {
                rising = false;
                if i == last_index {
                    stats.delta += n;
                }
            } else {
                stats.delta += if rising { n - previous_value } else { n };
                rising = true;
            }
            previous_value = n;

            if n != 0.0 {
                all_is_zero = false;
            }
        }

        flotpairs.push((point.time.unwrap_or(0), numeric));
        last_value = value;
        last_time = point.time.or(last_time);
    }

    if non_nulls > 0 {
        stats.avg = Some(stats.total / non_nulls as f64);
        // One step of fallback only when the last point is a gap
        stats.current = match flotpairs.as_slice() {
            [.., (_, Some(last))] => Some(*last),
            [.., (_, previous), (_, None)] => *previous,
            _ => None,
        };
    }

    if let (Some(max), Some(min)) = (stats.max, stats.min) {
        stats.range = Some(max - min);
    }
    if let (Some(current), Some(first)) = (stats.current, stats.first) {
        stats.diff = Some(current - first);
    }
    stats.count = flotpairs.len();

    ProcessedSeries {
        alias: series.alias.clone(),
        stats,
        flotpairs,
        all_is_null,
        all_is_zero,
        last_value,
        last_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::frame::FieldType;

    fn series(values: &[Option<f64>]) -> RawSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| RawPoint::new(Some(i as i64), v.map(SeriesValue::Number)))
            .collect();
        RawSeries::new("A", points)
    }

    #[test]
    fn test_connected_drops_null_rows() {
        let result = reduce_series(&series(&[Some(1.0), None, Some(3.0)]), NullPointMode::Connected);

        assert_eq!(result.flotpairs, vec![(0, Some(1.0)), (2, Some(3.0))]);
        assert_eq!(result.stats.total, 4.0);
        assert_eq!(result.stats.avg, Some(2.0));
        assert_eq!(result.stats.count, 2);
        assert_eq!(result.stats.current, Some(3.0));
        assert_eq!(result.stats.diff, Some(2.0));
    }

    #[test]
    fn test_null_mode_keeps_gaps() {
        let result = reduce_series(&series(&[Some(1.0), None, Some(3.0)]), NullPointMode::Null);

        assert_eq!(result.flotpairs, vec![(0, Some(1.0)), (1, None), (2, Some(3.0))]);
        assert_eq!(result.stats.avg, Some(2.0));
        assert_eq!(result.stats.count, 3);
    }

    #[test]
    fn test_null_as_zero_participates() {
        let result = reduce_series(&series(&[Some(1.0), None, Some(3.0)]), NullPointMode::NullAsZero);

        assert_eq!(result.flotpairs, vec![(0, Some(1.0)), (1, Some(0.0)), (2, Some(3.0))]);
        assert_eq!(result.stats.total, 4.0);
        assert_eq!(result.stats.min, Some(0.0));
        assert_eq!(result.stats.avg, Some(4.0 / 3.0));
        // 1 -> 0 breaks the rise, 0 -> 3 restarts it with the full value
        assert_eq!(result.stats.delta, 3.0);
    }

    #[test]
    fn test_delta_final_drop_adds_raw_value() {
        let result = reduce_series(&series(&[Some(1.0), Some(3.0), Some(2.0)]), NullPointMode::Connected);
        assert_eq!(result.stats.delta, 4.0);

        let result = reduce_series(&series(&[Some(5.0), Some(3.0), Some(1.0)]), NullPointMode::Connected);
        assert_eq!(result.stats.delta, 1.0);
    }

    #[test]
    fn test_delta_restart_of_rise_adds_full_value() {
        let result = reduce_series(
            &series(&[Some(1.0), Some(3.0), Some(2.0), Some(5.0)]),
            NullPointMode::Connected,
        );
        assert_eq!(result.stats.delta, 2.0 + 5.0);

        let result = reduce_series(&series(&[Some(2.0), Some(2.0), Some(4.0)]), NullPointMode::Connected);
        assert_eq!(result.stats.delta, 2.0);
    }

    #[test]
    fn test_final_drop_followed_by_dropped_null_is_not_last() {
        // The last raw row is null, so the drop to 2 is not the final row
        let result = reduce_series(
            &series(&[Some(1.0), Some(3.0), Some(2.0), None]),
            NullPointMode::Connected,
        );
        assert_eq!(result.stats.delta, 2.0);
    }

    #[test]
    fn test_current_falls_back_one_step() {
        let result = reduce_series(&series(&[Some(1.0), Some(2.0), None]), NullPointMode::Null);
        assert_eq!(result.stats.current, Some(2.0));
        assert_eq!(result.stats.diff, Some(1.0));

        let result = reduce_series(&series(&[Some(1.0), None, None]), NullPointMode::Null);
        assert_eq!(result.stats.current, None);
        assert_eq!(result.stats.diff, None);
        assert_eq!(result.stats.avg, Some(1.0));
    }

    #[test]
    fn test_range_and_extremes() {
        let result = reduce_series(&series(&[Some(4.0), Some(-2.0), Some(7.0)]), NullPointMode::Connected);
        assert_eq!(result.stats.max, Some(7.0));
        assert_eq!(result.stats.min, Some(-2.0));
        assert_eq!(result.stats.range, Some(9.0));
        assert_eq!(result.stats.first, Some(4.0));
        assert!(!result.all_is_zero);
    }

    #[test]
    fn test_time_step_is_minimum_gap() {
        let raw = RawSeries::new(
            "A",
            vec![
                RawPoint::number(0, 1.0),
                RawPoint::null(10),
                RawPoint::number(15, 2.0),
                RawPoint::number(35, 3.0),
            ],
        );
        let result = reduce_series(&raw, NullPointMode::Connected);
        assert_eq!(result.stats.time_step, 5);
        assert_eq!(result.last_time, Some(35));

        let single = RawSeries::new("A", vec![RawPoint::number(0, 1.0)]);
        assert_eq!(reduce_series(&single, NullPointMode::Connected).stats.time_step, i64::MAX);
    }

    #[test]
    fn test_empty_and_all_null_series() {
        let result = reduce_series(&RawSeries::new("A", vec![]), NullPointMode::Null);
        assert_eq!(result.stats, SeriesStats::default());
        assert!(result.all_is_null);
        assert!(result.flotpairs.is_empty());

        let result = reduce_series(&series(&[None, None]), NullPointMode::Null);
        assert!(result.all_is_null);
        assert_eq!(result.stats.avg, None);
        assert_eq!(result.stats.count, 2);
        assert_eq!(result.stats.range, None);
    }

    #[test]
    fn test_all_zero_flag() {
        let result = reduce_series(&series(&[Some(0.0), None, Some(0.0)]), NullPointMode::NullAsZero);
        assert!(result.all_is_zero);
        assert!(!result.all_is_null);
    }

    #[test]
    fn test_text_value_bypasses_aggregation() {
        let raw = RawSeries::new(
            "status",
            vec![
                RawPoint::number(0, 2.0),
                RawPoint::new(Some(1), Some(SeriesValue::Text("degraded".to_string()))),
            ],
        );
        let result = reduce_series(&raw, NullPointMode::Connected);

        assert_eq!(result.stats.total, 2.0);
        assert_eq!(result.stats.count, 2);
        assert_eq!(result.flotpairs[1], (1, None));
        assert_eq!(result.last_value, Some(SeriesValue::Text("degraded".to_string())));
    }

    #[test]
    fn test_reduction_is_repeatable() {
        let raw = series(&[Some(3.5), None, Some(1.25), Some(9.0), Some(2.0)]);
        let first = reduce_series(&raw, NullPointMode::Null);
        let second = reduce_series(&raw, NullPointMode::Null);
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_series_uses_index_without_time_field() {
        let frame = DataFrame::new(vec![Field::new(
            "value",
            FieldType::Number,
            vec![Some(FieldValue::Number(5.0)), None, Some(FieldValue::Text("7".to_string()))],
        )]);

        let raw = build_series_from_frame(&frame, "A").unwrap();
        assert_eq!(raw.alias, "A");
        assert_eq!(
            raw.points,
            vec![
                RawPoint::number(0, 5.0),
                RawPoint::null(1),
                RawPoint::number(2, 7.0),
            ]
        );
    }

    #[test]
    fn test_build_series_reads_time_cells() {
        let frame = DataFrame::new(vec![
            Field::new(
                "time",
                FieldType::Time,
                vec![
                    Some(FieldValue::Number(1000.0)),
                    Some(FieldValue::Text("1970-01-01T00:00:02Z".to_string())),
                    Some(FieldValue::Text("not a time".to_string())),
                    None,
                ],
            ),
            Field::new("value", FieldType::Number, vec![Some(FieldValue::Number(1.0)); 4]),
        ]);

        let raw = build_series_from_frame(&frame, "A").unwrap();
        let times: Vec<_> = raw.points.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![Some(1000), Some(2000), Some(2), Some(3)]);
    }

    #[test]
    fn test_build_series_requires_numeric_field() {
        let frame = DataFrame::new(vec![Field::new("host", FieldType::String, vec![])]);
        assert!(build_series_from_frame(&frame, "A").is_none());
    }
}
