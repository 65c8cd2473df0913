//! Defensive access into untyped provider documents.
//!
//! Paths are JSON pointers (`/response/0/periods/0`); a walk stops at the
//! first missing link and yields `None`. Scalar readers are lenient about
//! representation (numbers sent as strings, integers sent as floats) but
//! never invent a value: `null` and absent keys both read as `None`.

use serde_json::Value;
use skycast_core::UnitPolicy;

use crate::units::UnitKeys;

/// Read-only view over one JSON value inside a provider document.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a>(&'a Value);

impl<'a> Record<'a> {
    /// Follow `pointer` from `root`; `None` at the first missing link.
    pub fn at(root: &'a Value, pointer: &str) -> Option<Self> {
        root.pointer(pointer).filter(|v| !v.is_null()).map(Self)
    }

    /// Child object or value under `key`.
    pub fn get(self, key: &str) -> Option<Record<'a>> {
        self.field(key).map(Self)
    }

    pub fn f64(self, key: &str) -> Option<f64> {
        self.field(key).and_then(as_f64)
    }

    pub fn i64(self, key: &str) -> Option<i64> {
        self.field(key).and_then(as_i64)
    }

    pub fn i32(self, key: &str) -> Option<i32> {
        self.i64(key).and_then(|v| i32::try_from(v).ok())
    }

    pub fn text(self, key: &str) -> Option<String> {
        self.field(key).and_then(as_text)
    }

    /// Numeric field whose key depends on the unit policy.
    pub fn unit_f64(self, keys: UnitKeys, units: UnitPolicy) -> Option<f64> {
        keys.resolve(self.0, units).and_then(as_f64)
    }

    /// Elements of the array under `key`; `None` if it is missing or not an array.
    pub fn items(self, key: &str) -> Option<impl Iterator<Item = Record<'a>>> {
        items(self.0, &format!("/{key}"))
    }

    fn field(self, key: &str) -> Option<&'a Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }
}

/// Elements of the array at `pointer`; `None` if it is missing or not an array.
pub fn items<'a>(root: &'a Value, pointer: &str) -> Option<impl Iterator<Item = Record<'a>>> {
    root.pointer(pointer)
        .and_then(Value::as_array)
        .map(|arr| arr.iter().map(Record))
}

/// Loose truthiness for provider flags such as `success`.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
