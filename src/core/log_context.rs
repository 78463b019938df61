//! Structured logging context for key-value fields
//!
//! This module provides:
//! - `FieldValue`: the tagged union every context value is expressed in
//! - `LogContext`: an insertion-ordered field map attached to each event

use super::error::{LoggerError, Result};
use super::error_info::{ErrorInfo, ErrorLike};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<FieldValue>),
    Map(LogContext),
    Error(Arc<dyn ErrorLike>),
}

impl FieldValue {
    /// Capture a `std::error::Error` as an error-like value
    #[track_caller]
    pub fn error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        FieldValue::Error(Arc::new(ErrorInfo::capture(error)))
    }

    /// Error-like view of this value, if it carries one
    pub fn as_error(&self) -> Option<&dyn ErrorLike> {
        match self {
            FieldValue::Error(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Convert to serde_json::Value for JSON serialization
    ///
    /// Fails on non-finite floats, which JSON cannot represent.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::UInt(u) => Value::Number((*u).into()),
            FieldValue::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
                LoggerError::formatter("JSON", format!("cannot encode non-finite float {}", f))
            })?,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Null => Value::Null,
            FieldValue::List(items) => Value::Array(
                items
                    .iter()
                    .map(FieldValue::to_json_value)
                    .collect::<Result<Vec<_>>>()?,
            ),
            FieldValue::Map(context) => Value::Object(context.to_json_map()?),
            FieldValue::Error(e) => {
                let mut obj = Map::new();
                obj.insert("type".to_string(), Value::String(e.type_name().to_string()));
                obj.insert("message".to_string(), Value::String(e.message().to_string()));
                obj.insert("file".to_string(), Value::String(e.file().to_string()));
                obj.insert("line".to_string(), Value::Number(e.line().into()));
                Value::Object(obj)
            }
        })
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::UInt(a), FieldValue::UInt(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            (FieldValue::Map(a), FieldValue::Map(b)) => a == b,
            (FieldValue::Error(a), FieldValue::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u16> for FieldValue {
    fn from(u: u16) -> Self {
        FieldValue::Int(u as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Int(u as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::UInt(u)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<ErrorInfo> for FieldValue {
    fn from(info: ErrorInfo) -> Self {
        FieldValue::Error(Arc::new(info))
    }
}

impl From<LogContext> for FieldValue {
    fn from(context: LogContext) -> Self {
        FieldValue::Map(context)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => FieldValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(obj) => FieldValue::Map(obj.into_iter().collect()),
        }
    }
}

/// Insertion-ordered context for structured logging
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// the position of its first insertion. Lookups and inserts are O(1).
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    fields: IndexMap<String, FieldValue>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field, returning the previous value
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Remove a field, preserving the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.shift_remove(key)
    }

    /// Merge another context on top of this one (last write wins)
    pub fn extend(&mut self, other: LogContext) {
        self.fields.extend(other.fields);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert into an ordered JSON object
    pub fn to_json_map(&self) -> Result<Map<String, Value>> {
        let mut map = Map::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.to_json_value()?);
        }
        Ok(map)
    }
}

/// Equal when both hold the same fields in the same order
impl PartialEq for LogContext {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut context = LogContext::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

impl IntoIterator for LogContext {
    type Item = (String, FieldValue);
    type IntoIter = indexmap::map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
