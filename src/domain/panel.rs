// Panel domain models: stored panels, value results and rendered views
use super::frame::DataFrame;
use super::geometry::{GaugeGeometry, SparklineGeometry};
use super::options::{FieldConfig, PanelOptions};
use super::series::FlotPair;
use super::thresholds::ResolvedStep;
use serde::{Deserialize, Serialize};

/// A panel as persisted by the host: options plus field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub options: PanelOptions,
    #[serde(default, alias = "field_config")]
    pub field_config: FieldConfig,
}

impl Panel {
    pub fn new(id: String, title: String, options: PanelOptions, field_config: FieldConfig) -> Self {
        Self {
            id,
            title,
            options,
            field_config,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueSource {
    Table,
    TimeSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelValueResult {
    pub source: ValueSource,
    pub text: String,
    pub numeric: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Value of the `__name` template variable
    pub series_name: String,
    pub sparkline_pairs: Vec<FlotPair>,
    pub thresholds: Vec<ResolvedStep>,
}

impl PanelValueResult {
    pub fn is_table(&self) -> bool {
        self.source == ValueSource::Table
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparklineView {
    #[serde(flatten)]
    pub geometry: SparklineGeometry,
    pub line_color: String,
    pub fill_color: String,
}

/// Everything the presentation layer needs to draw one panel cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub value: PanelValueResult,
    pub prefix: String,
    pub postfix: String,
    pub prefix_font_size: String,
    pub postfix_font_size: String,
    pub value_font_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle_diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gauge: Option<GaugeGeometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparkline: Option<SparklineView>,
}

/// Data and cell size for one render pass
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(default)]
    pub frames: Vec<DataFrame>,
    pub width: f64,
    pub height: f64,
    #[serde(default, alias = "time_zone")]
    pub time_zone: Option<String>,
}
