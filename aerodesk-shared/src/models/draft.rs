use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::date::DateValue;

/// A single form value captured by a wizard step
#[derive(Debug, Clone, PartialEq)]
pub enum DraftValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(DateValue),
    /// Selected option tokens (checkbox groups, multi-selects)
    Selection(BTreeSet<String>),
}

impl DraftValue {
    pub fn selection<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Selection(tokens.into_iter().map(Into::into).collect())
    }

    fn from_json(field: &str, value: &Value) -> Result<Self, DraftError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => n
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| DraftError::UnsupportedValue {
                    field: field.to_string(),
                    reason: format!("number {} is out of range", n),
                }),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(DraftError::UnsupportedValue {
                        field: field.to_string(),
                        reason: format!("selection entries must be strings, got {}", other),
                    }),
                })
                .collect::<Result<BTreeSet<_>, _>>()
                .map(Self::Selection),
            Value::Object(_) => Err(DraftError::UnsupportedValue {
                field: field.to_string(),
                reason: "nested objects are not draft values".to_string(),
            }),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            // Invalid dates serialize as null, same as a browser's JSON.stringify
            Self::Date(DateValue::Valid(dt)) => Value::String(dt.to_rfc3339()),
            Self::Date(DateValue::Invalid) => Value::Null,
            Self::Selection(tokens) => {
                Value::Array(tokens.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        return Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

impl From<&str> for DraftValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DraftValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for DraftValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for DraftValue {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for DraftValue {
    fn from(n: u32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for DraftValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateValue> for DraftValue {
    fn from(d: DateValue) -> Self {
        Self::Date(d)
    }
}

/// Field name to value map accumulated across wizard steps.
///
/// Keys are contributed by whichever step last touched them; there is no
/// fixed schema. [`DraftRecord::merge`] is a union merge: incoming keys
/// overwrite, everything else is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRecord {
    fields: BTreeMap<String, DraftValue>,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for assembling step values
    pub fn with(mut self, field: impl Into<String>, value: impl Into<DraftValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<DraftValue>) -> Option<DraftValue> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<DraftValue> {
        self.fields.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&DraftValue> {
        self.fields.get(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DraftValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Union merge: keys in `values` win, all other keys are preserved.
    /// Applying the same values twice leaves the record unchanged.
    pub fn merge(&mut self, values: DraftRecord) {
        self.fields.extend(values.fields);
    }

    /// Copy of the fields named in `fields` that are present in this record
    pub fn subset<S: AsRef<str>>(&self, fields: &[S]) -> DraftRecord {
        fields
            .iter()
            .filter_map(|f| {
                self.fields
                    .get_key_value(f.as_ref())
                    .map(|(k, v)| (k.clone(), v.clone()))
            })
            .collect()
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(DraftValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Numeric field; numeric strings typed into text inputs are accepted too.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field) {
            Some(DraftValue::Number(n)) => Some(*n),
            Some(DraftValue::Text(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn date(&self, field: &str) -> Option<DateValue> {
        match self.fields.get(field) {
            Some(DraftValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn selection(&self, field: &str) -> Option<&BTreeSet<String>> {
        match self.fields.get(field) {
            Some(DraftValue::Selection(tokens)) => Some(tokens),
            _ => None,
        }
    }

    /// Build a record from a JSON object, the shape hosts persist and load.
    pub fn from_json(value: &Value) -> Result<Self, DraftError> {
        let object = value.as_object().ok_or(DraftError::NotAnObject)?;
        Self::from_json_map(object)
    }

    pub fn from_json_map(object: &Map<String, Value>) -> Result<Self, DraftError> {
        object
            .iter()
            .map(|(k, v)| DraftValue::from_json(k, v).map(|dv| (k.clone(), dv)))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, DraftValue)> for DraftRecord {
    fn from_iter<T: IntoIterator<Item = (K, DraftValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for DraftRecord {
    type Item = (String, DraftValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, DraftValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Serializes through [`DraftRecord::to_json`]. Dates come out as RFC 3339
/// text (or `null` when invalid) and deserialize back as `Text`/`Null`;
/// re-open the record through the wizard's rehydration to restore dates.
impl Serialize for DraftRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DraftRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DraftError {
    #[error("Draft record must be a JSON object")]
    NotAnObject,

    #[error("Unsupported value for field {field}: {reason}")]
    UnsupportedValue {
        field: String,
        reason: String,
    },
}
