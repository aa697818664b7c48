// Columnar data frames as supplied by the host dashboard
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Time,
    Number,
    String,
    Boolean,
    #[serde(other)]
    Other,
}

/// A single non-null cell. Nulls are carried as `None` next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String form used when a cell is shown as text
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub values: Vec<Option<FieldValue>>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType, values: Vec<Option<FieldValue>>) -> Self {
        Self {
            name: name.into(),
            field_type,
            values,
        }
    }

    pub fn value_at(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index).and_then(|v| v.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "ref_id")]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl DataFrame {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            name: None,
            ref_id: None,
            fields,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn time_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.field_type == FieldType::Time)
    }

    pub fn numeric_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.field_type == FieldType::Number)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Display name of the frame when it is used as a series.
    /// Falls back through frame name, query ref id and numeric field name.
    pub fn alias(&self, index: usize) -> String {
        [self.name.as_deref(), self.ref_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.numeric_field()
                    .map(|f| f.name.clone())
                    .filter(|n| !n.is_empty())
            })
            .unwrap_or_else(|| format!("Series {}", index + 1))
    }
}
