//! JSON encoding and decoding.
//!
//! Lists encode as JSON arrays and every other array as a JSON object with
//! stringified keys. Objects encode as their properties. Decoding maps JSON
//! objects to arrays, normalizing canonical integer keys.

use serde::{
  Deserialize,
  Deserializer,
  Serialize,
  Serializer,
  ser::{
    SerializeMap,
    SerializeSeq,
  },
};

use crate::{
  array::Array,
  error::Result,
  value::{
    Key,
    Object,
    Value,
  },
};

impl Serialize for Value {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match self {
      Value::Null => serializer.serialize_unit(),
      Value::Bool(b) => serializer.serialize_bool(*b),
      Value::Int(n) => serializer.serialize_i64(*n),
      Value::Float(f) => serializer.serialize_f64(*f),
      Value::Str(s) => serializer.serialize_str(s),
      Value::Array(array) => array.serialize(serializer),
      Value::Object(object) => object.serialize(serializer),
    }
  }
}

impl Serialize for Array {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if self.is_list() {
      let mut seq = serializer.serialize_seq(Some(self.len()))?;
      for value in self.values() {
        seq.serialize_element(value)?;
      }
      seq.end()
    } else {
      let mut map = serializer.serialize_map(Some(self.len()))?;
      for (key, value) in self {
        map.serialize_entry(&key.to_string(), value)?;
      }
      map.end()
    }
  }
}

impl Serialize for Object {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.props().len()))?;
    for (key, value) in self.props() {
      map.serialize_entry(&key.to_string(), value)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for Value {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    serde_json::Value::deserialize(deserializer).map(Value::from)
  }
}

impl<'de> Deserialize<'de> for Array {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
      Value::Array(array) => Ok(array),
      other => {
        Err(serde::de::Error::custom(format!(
          "expected a JSON array or object, found {}",
          other.type_name()
        )))
      },
    }
  }
}

impl From<serde_json::Value> for Value {
  fn from(json: serde_json::Value) -> Self {
    match json {
      serde_json::Value::Null => Value::Null,
      serde_json::Value::Bool(b) => Value::Bool(b),
      serde_json::Value::Number(n) => {
        match n.as_i64() {
          Some(n) => Value::Int(n),
          None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        }
      },
      serde_json::Value::String(s) => Value::Str(s.into()),
      serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
      serde_json::Value::Object(map) => {
        Value::Array(
          map
            .into_iter()
            .map(|(key, value)| (Key::parse(&key), Value::from(value)))
            .collect(),
        )
      },
    }
  }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string_pretty(value)?)
}

pub fn from_json(document: &str) -> Result<Value> {
  Ok(serde_json::from_str(document)?)
}
