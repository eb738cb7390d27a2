//! Keys and dynamically typed values.

use std::fmt;

use crate::{
  Tendril,
  array::Array,
};

/// An array key.
///
/// String keys that spell a canonical decimal integer are always stored as
/// [`Key::Int`], so `"1"` and `1` address the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
  Int(i64),
  Str(Tendril),
}

impl Key {
  /// Normalizes `text` into a key.
  pub fn parse(text: &str) -> Self {
    match parse_canonical_int(text) {
      Some(n) => Key::Int(n),
      None => Key::Str(text.into()),
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      Key::Int(n) => Some(*n),
      Key::Str(_) => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Key::Int(_) => None,
      Key::Str(s) => Some(s.as_str()),
    }
  }

  pub fn is_int(&self) -> bool {
    matches!(self, Key::Int(_))
  }

  pub fn to_value(&self) -> Value {
    match self {
      Key::Int(n) => Value::Int(*n),
      Key::Str(s) => Value::Str(s.clone()),
    }
  }
}

fn parse_canonical_int(text: &str) -> Option<i64> {
  let digits = text.strip_prefix('-').unwrap_or(text);
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  if (digits.len() > 1 && digits.starts_with('0')) || text == "-0" {
    return None;
  }
  text.parse().ok()
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Key::Int(n) => write!(f, "{n}"),
      Key::Str(s) => f.write_str(s),
    }
  }
}

impl From<&str> for Key {
  fn from(text: &str) -> Self {
    Key::parse(text)
  }
}

impl From<String> for Key {
  fn from(text: String) -> Self {
    Key::parse(&text)
  }
}

impl From<&String> for Key {
  fn from(text: &String) -> Self {
    Key::parse(text)
  }
}

impl From<Tendril> for Key {
  fn from(text: Tendril) -> Self {
    Key::parse(&text)
  }
}

impl From<i64> for Key {
  fn from(n: i64) -> Self {
    Key::Int(n)
  }
}

impl From<i32> for Key {
  fn from(n: i32) -> Self {
    Key::Int(n.into())
  }
}

impl From<usize> for Key {
  fn from(n: usize) -> Self {
    Key::Int(n as i64)
  }
}

impl From<&Key> for Key {
  fn from(key: &Key) -> Self {
    key.clone()
  }
}

/// A plain object: a class name, a property bag and an optional string form.
///
/// Objects are opaque to [`Array`] operations except that paths descend into
/// their properties. An object with a string form compares like a string.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
  class: Tendril,
  props: Array,
  repr:  Option<Tendril>,
}

impl Object {
  pub fn new(class: impl Into<Tendril>) -> Self {
    Self {
      class: class.into(),
      props: Array::new(),
      repr:  None,
    }
  }

  pub fn with_prop(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
    self.props.insert(key, value);
    self
  }

  pub fn with_repr(mut self, repr: impl Into<Tendril>) -> Self {
    self.repr = Some(repr.into());
    self
  }

  pub fn class(&self) -> &str {
    &self.class
  }

  pub fn is_instance_of(&self, class: &str) -> bool {
    self.class.as_str() == class
  }

  pub fn props(&self) -> &Array {
    &self.props
  }

  pub fn props_mut(&mut self) -> &mut Array {
    &mut self.props
  }

  pub fn repr(&self) -> Option<&str> {
    self.repr.as_deref()
  }

  pub fn is_stringable(&self) -> bool {
    self.repr.is_some()
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
  #[default]
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(Tendril),
  Array(Array),
  Object(Object),
}

impl Value {
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn is_array(&self) -> bool {
    matches!(self, Value::Array(_))
  }

  pub fn is_object(&self) -> bool {
    matches!(self, Value::Object(_))
  }

  pub fn is_string(&self) -> bool {
    matches!(self, Value::Str(_))
  }

  pub fn as_array(&self) -> Option<&Array> {
    match self {
      Value::Array(array) => Some(array),
      _ => None,
    }
  }

  pub fn as_array_mut(&mut self) -> Option<&mut Array> {
    match self {
      Value::Array(array) => Some(array),
      _ => None,
    }
  }

  pub fn into_array(self) -> Option<Array> {
    match self {
      Value::Array(array) => Some(array),
      _ => None,
    }
  }

  pub fn as_object(&self) -> Option<&Object> {
    match self {
      Value::Object(object) => Some(object),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::Str(s) => Some(s.as_str()),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Value::Int(n) => Some(*n),
      _ => None,
    }
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Value::Int(n) => Some(*n as f64),
      Value::Float(f) => Some(*f),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(b) => Some(*b),
      _ => None,
    }
  }

  /// Truthiness: null, `false`, `0`, `0.0`, `""`, `"0"` and the empty array
  /// are falsy. Objects are always truthy.
  pub fn truthy(&self) -> bool {
    match self {
      Value::Null => false,
      Value::Bool(b) => *b,
      Value::Int(n) => *n != 0,
      Value::Float(f) => *f != 0.0,
      Value::Str(s) => !(s.is_empty() || s.as_str() == "0"),
      Value::Array(array) => !array.is_empty(),
      Value::Object(_) => true,
    }
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Int(_) => "int",
      Value::Float(_) => "float",
      Value::Str(_) => "string",
      Value::Array(_) => "array",
      Value::Object(_) => "object",
    }
  }

  /// Converts the value into an array key, the way it would be coerced when
  /// used as one. Arrays and objects without a string form have no key.
  pub fn to_key(&self) -> Option<Key> {
    match self {
      Value::Null => Some(Key::Str(Tendril::new())),
      Value::Bool(b) => Some(Key::Int(i64::from(*b))),
      Value::Int(n) => Some(Key::Int(*n)),
      Value::Float(f) if f.is_finite() => Some(Key::Int(f.trunc() as i64)),
      Value::Float(_) => None,
      Value::Str(s) => Some(Key::parse(s)),
      Value::Object(object) => object.repr().map(Key::parse),
      Value::Array(_) => None,
    }
  }

  /// The string form of a scalar. Arrays and objects without a string form
  /// have none.
  pub fn to_text(&self) -> Option<Tendril> {
    match self {
      Value::Null => Some(Tendril::new()),
      Value::Bool(true) => Some("1".into()),
      Value::Bool(false) => Some(Tendril::new()),
      Value::Int(n) => Some(n.to_string().into()),
      Value::Float(f) => Some(format_float(*f).into()),
      Value::Str(s) => Some(s.clone()),
      Value::Object(object) => object.repr().map(Into::into),
      Value::Array(_) => None,
    }
  }
}

pub(crate) fn format_float(f: f64) -> String {
  if f.is_nan() {
    "NAN".to_owned()
  } else if f.is_infinite() {
    (if f > 0.0 { "INF" } else { "-INF" }).to_owned()
  } else if f.fract() == 0.0 && f.abs() < 1e15 {
    format!("{}", f as i64)
  } else {
    format!("{f}")
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<i32> for Value {
  fn from(n: i32) -> Self {
    Value::Int(n.into())
  }
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Value::Int(n)
  }
}

impl From<u32> for Value {
  fn from(n: u32) -> Self {
    Value::Int(n.into())
  }
}

impl From<usize> for Value {
  fn from(n: usize) -> Self {
    Value::Int(n as i64)
  }
}

impl From<f64> for Value {
  fn from(f: f64) -> Self {
    Value::Float(f)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Str(s.into())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::Str(s.into())
  }
}

impl From<Tendril> for Value {
  fn from(s: Tendril) -> Self {
    Value::Str(s)
  }
}

impl From<Array> for Value {
  fn from(array: Array) -> Self {
    Value::Array(array)
  }
}

impl From<Object> for Value {
  fn from(object: Object) -> Self {
    Value::Object(object)
  }
}

impl From<Key> for Value {
  fn from(key: Key) -> Self {
    match key {
      Key::Int(n) => Value::Int(n),
      Key::Str(s) => Value::Str(s),
    }
  }
}

impl From<&Key> for Value {
  fn from(key: &Key) -> Self {
    key.to_value()
  }
}

impl From<&Value> for Value {
  fn from(value: &Value) -> Self {
    value.clone()
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(value: Option<T>) -> Self {
    value.map_or(Value::Null, Into::into)
  }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
  fn from(values: Vec<T>) -> Self {
    Value::Array(values.into_iter().map(Into::into).collect())
  }
}
