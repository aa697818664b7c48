// Display processor trait - Formatting service consumed by the panel pipeline
use crate::domain::options::FieldConfig;

/// Formatted text plus the numeric value the formatter settled on
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayValue {
    pub text: String,
    pub numeric: Option<f64>,
}

pub trait DisplayProcessor: Send + Sync {
    /// Format a numeric value with the unit, decimals and mappings of `config`
    fn display(&self, value: f64, config: &FieldConfig) -> DisplayValue;

    /// Text a mapping assigns to a missing value, if any
    fn null_text(&self, config: &FieldConfig) -> Option<String>;

    /// Format an epoch-millisecond timestamp in the given time zone
    fn format_time(&self, timestamp_ms: i64, time_zone: Option<&str>) -> String;
}
