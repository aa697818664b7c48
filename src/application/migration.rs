// Legacy migration - Converts the old flat singlestat panel model into options and field config
use crate::domain::options::{
    FieldConfig, MappingResult, PanelOptions, RangeMapping, SpecialMapping, SpecialValueMatch, ValueMapping,
};
use crate::domain::thresholds::{ThresholdStep, ThresholdsConfig};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const DEFAULT_LEGACY_COLOR: &str = "green";

/// Flat option keys copied over from the legacy model when present
const LEGACY_OPTION_KEYS: [&str; 13] = [
    "math",
    "valueName",
    "nullPointMode",
    "tableColumn",
    "prefix",
    "postfix",
    "prefixFontSize",
    "postfixFontSize",
    "valueFontSize",
    "colorBackground",
    "circleBackground",
    "colorValue",
    "valueMappingColorBackground",
];

const NESTED_OPTION_KEYS: [&str; 3] = ["sparkline", "gauge", "tooltip"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedPanel {
    pub options: PanelOptions,
    pub field_config: FieldConfig,
}

/// Migrate a legacy panel JSON object. Field config values already present
/// in the nested model are kept; legacy flat option keys win over nested ones.
pub fn migrate_legacy_panel(legacy: &Value) -> MigratedPanel {
    let mut field_config = existing_field_config(legacy);

    if field_config.unit.is_none() {
        field_config.unit = legacy
            .get("format")
            .and_then(Value::as_str)
            .filter(|format| !format.is_empty())
            .map(str::to_string);
    }
    if field_config.decimals.is_none() {
        field_config.decimals = legacy
            .get("decimals")
            .and_then(Value::as_u64)
            .and_then(|d| u32::try_from(d).ok());
    }
    if field_config.thresholds.is_none() {
        field_config.thresholds = convert_thresholds(legacy);
    }
    if field_config.mappings.is_empty() {
        field_config.mappings = convert_mappings(legacy);
    }

    MigratedPanel {
        options: merge_options(legacy),
        field_config,
    }
}

fn existing_field_config(legacy: &Value) -> FieldConfig {
    let Some(field_config) = legacy.get("fieldConfig") else {
        return FieldConfig::default();
    };
    let defaults = field_config.get("defaults").unwrap_or(field_config);
    serde_json::from_value(defaults.clone()).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable field config during migration: {}", e);
        FieldConfig::default()
    })
}

fn merge_options(legacy: &Value) -> PanelOptions {
    let mut merged = legacy
        .get("options")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    for key in LEGACY_OPTION_KEYS {
        if let Some(value) = legacy.get(key).filter(|v| !v.is_null()) {
            merged.insert(key.to_string(), value.clone());
        }
    }

    for key in NESTED_OPTION_KEYS {
        let mut section = merged
            .get(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_else(Map::new);
        if let Some(Value::Object(overrides)) = legacy.get(key) {
            section.extend(
                overrides
                    .iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }
        merged.insert(key.to_string(), Value::Object(section));
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
        tracing::warn!("Legacy panel options are unreadable, using defaults: {}", e);
        PanelOptions::default()
    })
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Threshold list or comma string into steps. The base step takes the color
/// of the first entry; entries are colored positionally from `colors`.
fn convert_thresholds(legacy: &Value) -> Option<ThresholdsConfig> {
    let colors: Vec<Option<String>> = legacy
        .get("colors")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(|c| c.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    let default_color = legacy
        .get("defaultColor")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LEGACY_COLOR);

    let entries: Vec<(f64, Option<String>)> = match legacy.get("thresholds") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let value = as_number(item.get("value")?)?;
                let color = item.get("color").and_then(Value::as_str).map(str::to_string);
                Some((value, color))
            })
            .collect(),
        Some(Value::String(list)) if !list.is_empty() => list
            .split(',')
            .enumerate()
            .filter_map(|(idx, item)| {
                let value = item.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
                Some((value, colors.get(idx).cloned().flatten()))
            })
            .collect(),
        _ => Vec::new(),
    };

    let (_, first_color) = entries.first()?;
    let mut steps = vec![ThresholdStep::base(
        first_color.clone().unwrap_or_else(|| default_color.to_string()),
    )];
    steps.extend(entries.into_iter().map(|(value, color)| {
        ThresholdStep::new(value, color.unwrap_or_else(|| default_color.to_string()))
    }));

    Some(ThresholdsConfig::new(steps))
}

fn convert_mappings(legacy: &Value) -> Vec<ValueMapping> {
    let mut mappings = Vec::new();

    if let Some(value_maps) = legacy.get("valueMaps").and_then(Value::as_array) {
        let options: BTreeMap<String, MappingResult> = value_maps
            .iter()
            .filter_map(|map| {
                let key = match map.get("value")? {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let text = map.get("text").filter(|t| !t.is_null())?;
                Some((key, MappingResult::text(plain_text(text))))
            })
            .collect();
        if !options.is_empty() {
            mappings.push(ValueMapping::Value(options));
        }
    }

    if let Some(range_maps) = legacy.get("rangeMaps").and_then(Value::as_array) {
        mappings.extend(range_maps.iter().filter_map(|map| {
            let from = as_number(map.get("from")?)?;
            let to = as_number(map.get("to")?)?;
            let text = map.get("text").filter(|t| !t.is_null())?;
            Some(ValueMapping::Range(RangeMapping {
                from: Some(from),
                to: Some(to),
                result: MappingResult::text(plain_text(text)),
            }))
        }));
    }

    if let Some(null_text) = legacy.get("nullText").filter(|t| !t.is_null()) {
        let text = plain_text(null_text);
        if !text.is_empty() {
            mappings.push(ValueMapping::Special(SpecialMapping {
                match_value: SpecialValueMatch::Null,
                result: MappingResult::text(text),
            }));
        }
    }

    mappings
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
