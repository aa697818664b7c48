// Table value extractor - Reads a single cell from non-temporal frames
use crate::domain::frame::{DataFrame, Field, FieldType, FieldValue};
use crate::domain::options::PanelOptions;

pub const NO_VALUE: &str = "no value";

#[derive(Debug, Clone, PartialEq)]
pub struct TableValue {
    pub column: Option<String>,
    pub numeric: Option<f64>,
    pub text: String,
}

/// A frame is a table iff none of its fields is time-typed
pub fn is_table_frame(frame: &DataFrame) -> bool {
    !frame.fields.iter().any(|f| f.field_type == FieldType::Time)
}

fn default_table_field(frame: &DataFrame) -> Option<&Field> {
    frame
        .fields
        .iter()
        .find(|f| f.field_type != FieldType::Time)
        .or_else(|| frame.fields.first())
}

pub fn default_table_column(frame: &DataFrame) -> Option<String> {
    default_table_field(frame).map(|f| f.name.clone())
}

/// Exact name match on `preferred`, else the first non-time field, else the first field
pub fn select_table_field<'a>(frame: &'a DataFrame, preferred: Option<&str>) -> Option<&'a Field> {
    preferred
        .filter(|name| !name.is_empty())
        .and_then(|name| frame.field_by_name(name))
        .or_else(|| default_table_field(frame))
}

/// Reads row 0 of the selected column
pub fn extract_table_value(frame: &DataFrame, preferred: Option<&str>) -> TableValue {
    let field = select_table_field(frame, preferred);
    let cell = field.and_then(|f| f.value_at(0));

    TableValue {
        column: field.map(|f| f.name.clone()),
        numeric: cell.and_then(FieldValue::as_f64),
        text: cell.map(FieldValue::to_text).unwrap_or_else(|| NO_VALUE.to_string()),
    }
}

/// Options with the auto-selected table column filled in, or `None` when
/// nothing needs to change. Re-running on the same frame derives the same name.
pub fn upgrade_table_column(options: &PanelOptions, frame: &DataFrame) -> Option<PanelOptions> {
    let configured = options.table_column.as_deref().is_some_and(|c| !c.is_empty());
    if configured || !is_table_frame(frame) {
        return None;
    }

    let column = default_table_column(frame)?;
    Some(PanelOptions {
        table_column: Some(column),
        ..options.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataFrame {
        DataFrame::new(vec![
            Field::new(
                "host",
                FieldType::String,
                vec![Some(FieldValue::Text("reef".to_string()))],
            ),
            Field::new("temp", FieldType::Number, vec![Some(FieldValue::Number(25.5))]),
            Field::new("ph", FieldType::Number, vec![None]),
        ])
    }

    #[test]
    fn test_table_detection() {
        assert!(is_table_frame(&table()));

        let mut frame = table();
        frame.fields.push(Field::new("time", FieldType::Time, vec![]));
        assert!(!is_table_frame(&frame));
    }

    #[test]
    fn test_preferred_column_numeric() {
        let value = extract_table_value(&table(), Some("temp"));
        assert_eq!(value.column.as_deref(), Some("temp"));
        assert_eq!(value.numeric, Some(25.5));
        assert_eq!(value.text, "25.5");
    }

    #[test]
    fn test_missing_preference_uses_first_non_time_column() {
        let value = extract_table_value(&table(), Some("missing"));
        assert_eq!(value.column.as_deref(), Some("host"));
        assert_eq!(value.numeric, None);
        assert_eq!(value.text, "reef");

        let value = extract_table_value(&table(), None);
        assert_eq!(value.column.as_deref(), Some("host"));
    }

    #[test]
    fn test_null_cell_is_no_value() {
        let value = extract_table_value(&table(), Some("ph"));
        assert_eq!(value.numeric, None);
        assert_eq!(value.text, NO_VALUE);

        let value = extract_table_value(&DataFrame::default(), None);
        assert_eq!(value.column, None);
        assert_eq!(value.text, NO_VALUE);
    }

    #[test]
    fn test_only_time_fields_fall_back_to_first() {
        let frame = DataFrame::new(vec![Field::new("time", FieldType::Time, vec![])]);
        assert_eq!(default_table_column(&frame).as_deref(), Some("time"));
    }

    #[test]
    fn test_upgrade_table_column_once() {
        let options = PanelOptions::default();
        let upgraded = upgrade_table_column(&options, &table()).unwrap();
        assert_eq!(upgraded.table_column.as_deref(), Some("host"));

        // Already configured: nothing to persist
        assert!(upgrade_table_column(&upgraded, &table()).is_none());

        let again = upgrade_table_column(&options, &table()).unwrap();
        assert_eq!(again, upgraded);
    }

    #[test]
    fn test_upgrade_skips_time_series_frames() {
        let mut frame = table();
        frame.fields.push(Field::new("time", FieldType::Time, vec![]));
        assert!(upgrade_table_column(&PanelOptions::default(), &frame).is_none());
    }
}
