//! Per-call key/value bag shared by enrichers and link factories

use crate::core::error::{HypermediaError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key holding the base URL (scheme and host)
pub const BASE_URL_KEY: &str = "baseUrl";

/// Key holding the resolved URL path
pub const URL_PATH_KEY: &str = "urlPath";

/// Key written by the HTTP method enricher
pub const HTTP_METHOD_KEY: &str = "httpMethod";

/// Key written by the templated enricher
pub const TEMPLATED_KEY: &str = "templated";

/// A value stored in a [`LinkFactoryContext`]
///
/// There is no null variant: a context never holds an empty slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ContextValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Json(serde_json::Value),
}

impl ContextValue {
    /// Name of the variant, used in type mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            ContextValue::String(_) => "string",
            ContextValue::Boolean(_) => "boolean",
            ContextValue::Integer(_) => "integer",
            ContextValue::Json(_) => "json",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ContextValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, ContextValue::Json(serde_json::Value::Null))
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Boolean(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Integer(value)
    }
}

/// JSON strings, booleans and integers land in their plain variants so typed
/// reads see the same value whichever way it was written
impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => ContextValue::String(s),
            serde_json::Value::Bool(b) => ContextValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ContextValue::Integer(i),
                None => ContextValue::Json(serde_json::Value::Number(n)),
            },
            other => ContextValue::Json(other),
        }
    }
}

/// Typed extraction from a [`ContextValue`]
pub trait FromContextValue: Sized {
    /// Human-readable type name used in mismatch errors
    const TYPE_NAME: &'static str;

    fn from_context_value(value: &ContextValue) -> Option<Self>;
}

impl FromContextValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_context_value(value: &ContextValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromContextValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_context_value(value: &ContextValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromContextValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_context_value(value: &ContextValue) -> Option<Self> {
        match value {
            ContextValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromContextValue for serde_json::Value {
    const TYPE_NAME: &'static str = "json";

    fn from_context_value(value: &ContextValue) -> Option<Self> {
        Some(match value {
            ContextValue::String(s) => serde_json::Value::from(s.as_str()),
            ContextValue::Boolean(b) => serde_json::Value::from(*b),
            ContextValue::Integer(i) => serde_json::Value::from(*i),
            ContextValue::Json(v) => v.clone(),
        })
    }
}

/// Key/value bag scoped to one link creation
///
/// Created fresh for every link, seeded with the base URL and URL path,
/// filled by enrichers and consumed once by a link factory.
#[derive(Debug, Clone, Default)]
pub struct LinkFactoryContext {
    values: IndexMap<String, ContextValue>,
}

impl LinkFactoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context pre-seeded with the base URL and URL path
    pub fn with_url(base_url: impl Into<String>, url_path: impl Into<String>) -> Result<Self> {
        let mut context = Self::new();
        context.set(BASE_URL_KEY, base_url.into())?;
        context.set(URL_PATH_KEY, url_path.into())?;
        Ok(context)
    }

    /// Get a value; a missing key yields `None`
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    /// Get a value as `T`
    ///
    /// Returns `Ok(None)` for a missing key and a
    /// [`HypermediaError::TypeMismatch`] when the stored value has another type.
    pub fn get_as<T: FromContextValue>(&self, key: &str) -> Result<Option<T>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => T::from_context_value(value).map(Some).ok_or_else(|| {
                HypermediaError::TypeMismatch {
                    key: key.to_string(),
                    expected: T::TYPE_NAME,
                    actual: value.type_name(),
                }
            }),
        }
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Result<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(HypermediaError::invalid_argument(
                "key",
                "context key must not be blank",
            ));
        }
        let value = value.into();
        if value.is_null() {
            return Err(HypermediaError::invalid_argument(
                key,
                "context value must not be null",
            ));
        }
        self.values.insert(key, value);
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.get(BASE_URL_KEY).and_then(ContextValue::as_str)
    }

    pub fn url_path(&self) -> Option<&str> {
        self.get(URL_PATH_KEY).and_then(ContextValue::as_str)
    }

    /// Concatenation of base URL and URL path
    ///
    /// Either half may be missing; `None` only when both are.
    pub fn href(&self) -> Option<String> {
        match (self.base_url(), self.url_path()) {
            (None, None) => None,
            (base, path) => Some(format!(
                "{}{}",
                base.unwrap_or_default(),
                path.unwrap_or_default()
            )),
        }
    }

    /// Write-only view handed to enrichers
    pub fn writer(&mut self) -> LinkDataWriter<'_> {
        LinkDataWriter { context: self }
    }
}

/// Write-only handle over a [`LinkFactoryContext`]
///
/// Enrichers receive this instead of the context itself so they can add
/// data but not read what other enrichers produced.
pub struct LinkDataWriter<'a> {
    context: &'a mut LinkFactoryContext,
}

impl LinkDataWriter<'_> {
    /// Write a value; last write for a key wins
    pub fn write(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Result<()> {
        self.context.set(key, value)
    }
}
