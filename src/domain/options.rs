// Panel options and field configuration
use super::series::{NullPointMode, ValueName};
use super::thresholds::ThresholdsConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FONT_SIZES: [&str; 11] = [
    "20%", "30%", "50%", "70%", "80%", "100%", "110%", "120%", "150%", "170%", "200%",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparklineOptions {
    pub show: bool,
    pub full: bool,
    #[serde(alias = "line_color")]
    pub line_color: String,
    #[serde(alias = "fill_color")]
    pub fill_color: String,
}

impl Default for SparklineOptions {
    fn default() -> Self {
        Self {
            show: false,
            full: false,
            line_color: "rgb(31, 120, 193)".to_string(),
            fill_color: "rgba(31, 118, 189, 0.18)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GaugeOptions {
    pub show: bool,
    #[serde(alias = "min_value")]
    pub min_value: f64,
    #[serde(alias = "max_value")]
    pub max_value: f64,
    #[serde(alias = "threshold_markers")]
    pub threshold_markers: bool,
    #[serde(alias = "threshold_labels")]
    pub threshold_labels: bool,
}

impl Default for GaugeOptions {
    fn default() -> Self {
        Self {
            show: false,
            min_value: 0.0,
            max_value: 100.0,
            threshold_markers: true,
            threshold_labels: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    pub show: bool,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self { show: true }
    }
}

/// User-configurable panel options. Missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelOptions {
    pub math: String,
    #[serde(alias = "value_name")]
    pub value_name: ValueName,
    #[serde(alias = "null_point_mode")]
    pub null_point_mode: NullPointMode,
    #[serde(alias = "table_column", skip_serializing_if = "Option::is_none")]
    pub table_column: Option<String>,
    pub prefix: String,
    pub postfix: String,
    #[serde(alias = "prefix_font_size")]
    pub prefix_font_size: String,
    #[serde(alias = "postfix_font_size")]
    pub postfix_font_size: String,
    #[serde(alias = "value_font_size")]
    pub value_font_size: String,
    #[serde(alias = "color_background")]
    pub color_background: bool,
    #[serde(alias = "circle_background")]
    pub circle_background: bool,
    #[serde(alias = "color_value")]
    pub color_value: bool,
    #[serde(alias = "value_mapping_color_background")]
    pub value_mapping_color_background: String,
    pub sparkline: SparklineOptions,
    pub gauge: GaugeOptions,
    pub tooltip: TooltipOptions,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            math: String::new(),
            value_name: ValueName::Avg,
            null_point_mode: NullPointMode::Connected,
            table_column: None,
            prefix: String::new(),
            postfix: String::new(),
            prefix_font_size: "50%".to_string(),
            postfix_font_size: "50%".to_string(),
            value_font_size: "80%".to_string(),
            color_background: false,
            circle_background: false,
            color_value: false,
            value_mapping_color_background: "#767171".to_string(),
            sparkline: SparklineOptions::default(),
            gauge: GaugeOptions::default(),
            tooltip: TooltipOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueNameChoice {
    pub value: ValueName,
    pub label: &'static str,
}

/// Selectable option values plus the defaults, for panel editors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsSchema {
    pub value_names: Vec<ValueNameChoice>,
    pub font_sizes: Vec<&'static str>,
    pub defaults: PanelOptions,
}

impl OptionsSchema {
    pub fn new() -> Self {
        Self {
            value_names: ValueName::ALL
                .iter()
                .map(|&value| ValueNameChoice {
                    value,
                    label: value.label(),
                })
                .collect(),
            font_sizes: FONT_SIZES.to_vec(),
            defaults: PanelOptions::default(),
        }
    }
}

impl Default for OptionsSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a font size such as "80%" into a scale factor (0.8).
/// Anything unparsable scales by 1.
pub fn parse_font_scale(size: &str) -> f64 {
    match size.replace('%', "").trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n / 100.0,
        _ => 1.0,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MappingResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeMapping {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub result: MappingResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialValueMatch {
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "nan")]
    NaN,
    #[serde(rename = "null+nan")]
    NullAndNaN,
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
    #[serde(rename = "empty")]
    Empty,
}

impl SpecialValueMatch {
    pub fn matches_null(&self) -> bool {
        matches!(self, SpecialValueMatch::Null | SpecialValueMatch::NullAndNaN)
    }

    pub fn matches_nan(&self) -> bool {
        matches!(self, SpecialValueMatch::NaN | SpecialValueMatch::NullAndNaN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialMapping {
    #[serde(rename = "match")]
    pub match_value: SpecialValueMatch,
    pub result: MappingResult,
}

/// Value to text substitution rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum ValueMapping {
    Value(BTreeMap<String, MappingResult>),
    Range(RangeMapping),
    Special(SpecialMapping),
}

/// Per-field display configuration supplied by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<ValueMapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdsConfig>,
}

impl FieldConfig {
    pub fn thresholds_or_default(&self) -> ThresholdsConfig {
        self.thresholds.clone().unwrap_or_default()
    }
}
