// Series domain models: raw rows, per-series statistics and reduced series
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullPointMode {
    #[default]
    #[serde(rename = "connected")]
    Connected,
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "null as zero", alias = "null_as_zero")]
    NullAsZero,
}

/// Named reduction selectable per panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueName {
    Min,
    Max,
    #[default]
    Avg,
    Current,
    Total,
    Name,
    First,
    Delta,
    Diff,
    Range,
    LastTime,
}

impl ValueName {
    pub const ALL: [ValueName; 11] = [
        ValueName::Min,
        ValueName::Max,
        ValueName::Avg,
        ValueName::Current,
        ValueName::Total,
        ValueName::Name,
        ValueName::First,
        ValueName::Delta,
        ValueName::Diff,
        ValueName::Range,
        ValueName::LastTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ValueName::Min => "Min",
            ValueName::Max => "Max",
            ValueName::Avg => "Average",
            ValueName::Current => "Current",
            ValueName::Total => "Total",
            ValueName::Name => "Name",
            ValueName::First => "First",
            ValueName::Delta => "Delta",
            ValueName::Diff => "Difference",
            ValueName::Range => "Range",
            ValueName::LastTime => "Time of last point",
        }
    }
}

/// Value cell of a raw series row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    pub time: Option<i64>,
    pub value: Option<SeriesValue>,
}

impl RawPoint {
    pub fn new(time: Option<i64>, value: Option<SeriesValue>) -> Self {
        Self { time, value }
    }

    pub fn number(time: i64, value: f64) -> Self {
        Self::new(Some(time), Some(SeriesValue::Number(value)))
    }

    pub fn null(time: i64) -> Self {
        Self::new(Some(time), None)
    }
}

/// One series as read from a frame, before any null handling
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    pub alias: String,
    pub points: Vec<RawPoint>,
}

impl RawSeries {
    pub fn new(alias: impl Into<String>, points: Vec<RawPoint>) -> Self {
        Self {
            alias: alias.into(),
            points,
        }
    }
}

/// Cleaned (timestamp, value) pair feeding the sparkline
pub type FlotPair = (i64, Option<f64>);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStats {
    pub total: f64,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub current: Option<f64>,
    pub first: Option<f64>,
    pub delta: f64,
    pub diff: Option<f64>,
    pub range: Option<f64>,
    pub time_step: i64,
    pub count: usize,
}

impl Default for SeriesStats {
    fn default() -> Self {
        Self {
            total: 0.0,
            max: None,
            min: None,
            avg: None,
            current: None,
            first: None,
            delta: 0.0,
            diff: None,
            range: None,
            time_step: i64::MAX,
            count: 0,
        }
    }
}

impl SeriesStats {
    /// Statistic selected by `name`. Names without a numeric statistic
    /// (`name`, `last_time`) fall back to the average.
    pub fn value(&self, name: ValueName) -> Option<f64> {
        match name {
            ValueName::Min => self.min,
            ValueName::Max => self.max,
            ValueName::Avg => self.avg,
            ValueName::Current => self.current,
            ValueName::Total => Some(self.total),
            ValueName::First => self.first,
            ValueName::Delta => Some(self.delta),
            ValueName::Diff => self.diff,
            ValueName::Range => self.range,
            ValueName::Name | ValueName::LastTime => self.avg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedSeries {
    pub alias: String,
    pub stats: SeriesStats,
    pub flotpairs: Vec<FlotPair>,
    pub all_is_null: bool,
    pub all_is_zero: bool,
    pub last_value: Option<SeriesValue>,
    pub last_time: Option<i64>,
}
