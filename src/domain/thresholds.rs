// Threshold steps and active step resolution
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One step of the threshold table. The base step carries `-inf` as its
/// lower bound; it is stored as `null` in JSON and may be omitted in config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdStep {
    #[serde(
        default = "negative_infinity",
        serialize_with = "serialize_bound",
        deserialize_with = "deserialize_bound"
    )]
    pub value: f64,
    pub color: String,
}

impl ThresholdStep {
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }

    pub fn base(color: impl Into<String>) -> Self {
        Self::new(f64::NEG_INFINITY, color)
    }
}

fn negative_infinity() -> f64 {
    f64::NEG_INFINITY
}

fn serialize_bound<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

fn deserialize_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
}

/// Step with its color name resolved, used for gauge markers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStep {
    pub value: f64,
    pub color: String,
}

/// Thresholds ordered ascending by lower bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default)]
    pub steps: Vec<ThresholdStep>,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            steps: vec![ThresholdStep::base("green"), ThresholdStep::new(80.0, "red")],
        }
    }
}

impl ThresholdsConfig {
    pub fn new(steps: Vec<ThresholdStep>) -> Self {
        Self { steps }
    }

    /// Last step whose bound is <= `value`. Values below every bound
    /// (and NaN) resolve to the first step.
    pub fn active_step(&self, value: f64) -> Option<&ThresholdStep> {
        let idx = self.steps.partition_point(|step| step.value <= value);
        self.steps.get(idx.saturating_sub(1))
    }

    pub fn active_color(&self, value: f64) -> Option<&str> {
        self.active_step(value).map(|step| step.color.as_str())
    }

    /// Finite steps with resolved colors. The base step is never plotted.
    pub fn resolve_steps<F>(&self, resolve_color: F) -> Vec<ResolvedStep>
    where
        F: Fn(&str) -> String,
    {
        self.steps
            .iter()
            .filter(|step| step.value.is_finite())
            .map(|step| ResolvedStep {
                value: step.value,
                color: resolve_color(&step.color),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_color_default_table() {
        let thresholds = ThresholdsConfig::default();
        assert_eq!(thresholds.active_color(79.0), Some("green"));
        assert_eq!(thresholds.active_color(80.0), Some("red"));
        assert_eq!(thresholds.active_color(-5.0), Some("green"));
        assert_eq!(thresholds.active_color(f64::NAN), Some("green"));
    }

    #[test]
    fn test_active_step_without_base() {
        let thresholds = ThresholdsConfig::new(vec![
            ThresholdStep::new(10.0, "blue"),
            ThresholdStep::new(20.0, "orange"),
            ThresholdStep::new(30.0, "red"),
        ]);
        assert_eq!(thresholds.active_color(0.0), Some("blue"));
        assert_eq!(thresholds.active_color(25.0), Some("orange"));
        assert_eq!(thresholds.active_color(1e9), Some("red"));
        assert_eq!(ThresholdsConfig::new(vec![]).active_color(1.0), None);
    }

    #[test]
    fn test_resolve_steps_drops_base() {
        let resolved = ThresholdsConfig::default().resolve_steps(|name| name.to_uppercase());
        assert_eq!(
            resolved,
            vec![ResolvedStep {
                value: 80.0,
                color: "RED".to_string()
            }]
        );
    }

    #[test]
    fn test_base_bound_serializes_as_null() {
        let json = serde_json::to_string(&ThresholdsConfig::default()).unwrap();
        assert_eq!(
            json,
            r#"{"steps":[{"value":null,"color":"green"},{"value":80.0,"color":"red"}]}"#
        );

        let parsed: ThresholdsConfig = serde_json::from_str(
            r#"{"mode":"absolute","steps":[{"color":"green"},{"value":null,"color":"blue"},{"value":50,"color":"red"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.steps[0].value, f64::NEG_INFINITY);
        assert_eq!(parsed.steps[1].value, f64::NEG_INFINITY);
        assert_eq!(parsed.steps[2].value, 50.0);
    }
}
