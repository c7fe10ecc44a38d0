//! The flat key->value parameter namespace the genome is built from. The
//! host's storage and parsing live outside the core; this module only
//! defines the lookup seam and a map-backed implementation.

use std::collections::HashMap;

use crate::types::ParamValue;

/// Read-only lookup over the host's flat parameter namespace. Keys follow
/// the `xform.{i}.*` / `final.*` / `xaos.{i}.{j}` scheme (see the genome
/// builder).
pub trait ParamSource {
    fn get(&self, key: &str) -> Option<ParamValue>;

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_f64())
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_i64())
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(ParamValue::Bool(b)) => Some(b),
            _ => None,
        }
    }
}

/// HashMap-backed parameter source, used by the TOML loader and tests.
#[derive(Debug, Clone, Default)]
pub struct MapParams {
    values: HashMap<String, ParamValue>,
}

impl MapParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: ParamValue) -> &mut Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn set_f64(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.set(key, ParamValue::Float(value))
    }

    pub fn set_i64(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.set(key, ParamValue::Integer(value))
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.set(key, ParamValue::Bool(value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, ParamValue>> for MapParams {
    fn from(values: HashMap<String, ParamValue>) -> Self {
        Self { values }
    }
}

impl ParamSource for MapParams {
    fn get(&self, key: &str) -> Option<ParamValue> {
        self.values.get(key).cloned()
    }
}
