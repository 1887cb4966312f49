use serde_json::{Map, Value};
use tracing::debug;

/// Typed, read-only view over one of the provider's schemaless mappings.
///
/// Every accessor returns `None` both when the key is absent and when it holds a
/// value of the wrong JSON type. The second case is logged at debug level so that
/// upstream data problems stay visible without failing the request.
#[derive(Debug, Clone, Copy)]
pub struct Loose<'a> {
    scope: &'static str,
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Loose<'a> {
    pub fn new(scope: &'static str, value: Option<&'a Value>) -> Self {
        let map = match value {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                debug!(scope, found = json_kind(other), "expected an object, treating as absent");
                None
            }
        };
        Self { scope, map }
    }

    pub fn is_present(&self) -> bool {
        self.map.is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.is_some_and(|m| m.contains_key(key))
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        match self.get(key)? {
            Value::String(s) => Some(s.as_str()),
            other => self.mismatch(key, "string", other),
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            other => self.mismatch(key, "number", other),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|v| !v.is_null())
    }

    fn mismatch<T>(&self, key: &str, expected: &'static str, found: &Value) -> Option<T> {
        debug!(
            scope = self.scope,
            key,
            expected,
            found = json_kind(found),
            "provider field has unexpected type, using default"
        );
        None
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
