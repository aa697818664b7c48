// Standard display processor - Units, decimals, value mappings and time formatting
use crate::application::display_processor::{DisplayProcessor, DisplayValue};
use crate::domain::options::{FieldConfig, SpecialValueMatch, ValueMapping};
use chrono::{DateTime, FixedOffset};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SHORT_SUFFIXES: [&str; 5] = ["", " K", " Mil", " Bil", " Tri"];
const BYTE_SUFFIXES: [&str; 5] = [" B", " KiB", " MiB", " GiB", " TiB"];

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDisplayProcessor;

impl DisplayProcessor for StandardDisplayProcessor {
    fn display(&self, value: f64, config: &FieldConfig) -> DisplayValue {
        let text = mapped_text(value, &config.mappings)
            .unwrap_or_else(|| format_with_unit(value, config.unit.as_deref(), config.decimals));
        DisplayValue {
            text,
            numeric: Some(value),
        }
    }

    fn null_text(&self, config: &FieldConfig) -> Option<String> {
        config.mappings.iter().find_map(|mapping| match mapping {
            ValueMapping::Special(special) if special.match_value.matches_null() => special.result.text.clone(),
            _ => None,
        })
    }

    fn format_time(&self, timestamp_ms: i64, time_zone: Option<&str>) -> String {
        let Some(utc) = DateTime::from_timestamp_millis(timestamp_ms) else {
            return timestamp_ms.to_string();
        };

        let offset = time_zone
            .filter(|zone| !matches!(zone.to_ascii_lowercase().as_str(), "" | "utc" | "browser"))
            .and_then(|zone| zone.parse::<FixedOffset>().ok());

        match offset {
            Some(offset) => utc.with_timezone(&offset).format(TIME_FORMAT).to_string(),
            None => utc.format(TIME_FORMAT).to_string(),
        }
    }
}

/// Text of the first mapping matching `value`
fn mapped_text(value: f64, mappings: &[ValueMapping]) -> Option<String> {
    mappings.iter().find_map(|mapping| {
        let result = match mapping {
            ValueMapping::Value(options) => options
                .iter()
                .find(|(key, _)| key.trim().parse::<f64>().is_ok_and(|k| k == value))
                .map(|(_, result)| result),
            ValueMapping::Range(range) => {
                let bounded = range.from.is_some() || range.to.is_some();
                let above = range.from.is_none_or(|from| value >= from);
                let below = range.to.is_none_or(|to| value <= to);
                (bounded && above && below).then_some(&range.result)
            }
            ValueMapping::Special(special) => {
                let matched = match special.match_value {
                    m if m.matches_nan() => value.is_nan(),
                    _ => false,
                };
                matched.then_some(&special.result)
            }
        };
        result.and_then(|r| r.text.clone())
    })
}

fn format_with_unit(value: f64, unit: Option<&str>, decimals: Option<u32>) -> String {
    let unit = unit.unwrap_or("none");
    match unit {
        "" | "none" => format_decimal(value, decimals),
        "short" => format_scaled(value, decimals, 1000.0, &SHORT_SUFFIXES),
        "bytes" => format_scaled(value, decimals, 1024.0, &BYTE_SUFFIXES),
        "percent" => format!("{}%", format_decimal(value, decimals)),
        "percentunit" => format!("{}%", format_decimal(value * 100.0, decimals)),
        "celsius" => format!("{} °C", format_decimal(value, decimals)),
        "fahrenheit" => format!("{} °F", format_decimal(value, decimals)),
        "ms" => format!("{} ms", format_decimal(value, decimals)),
        "s" => format!("{} s", format_decimal(value, decimals)),
        custom => {
            let number = format_decimal(value, decimals);
            if let Some(suffix) = custom.strip_prefix("suffix:") {
                format!("{}{}", number, suffix)
            } else if let Some(prefix) = custom.strip_prefix("prefix:") {
                format!("{}{}", prefix, number)
            } else {
                format!("{} {}", number, custom)
            }
        }
    }
}

/// Fixed decimals when configured, otherwise about three significant digits
/// with trailing zeros removed
fn format_decimal(value: f64, decimals: Option<u32>) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if let Some(decimals) = decimals {
        return format!("{:.*}", decimals as usize, value);
    }
    if value == value.trunc() {
        return format!("{}", value);
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (2 - magnitude).clamp(0, 6) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn format_scaled(value: f64, decimals: Option<u32>, base: f64, suffixes: &[&str]) -> String {
    let mut scaled = value;
    let mut index = 0;
    while scaled.abs() >= base && index < suffixes.len() - 1 {
        scaled /= base;
        index += 1;
    }
    format!("{}{}", format_decimal(scaled, decimals), suffixes[index])
}
