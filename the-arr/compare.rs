//! Loose and strict value comparison.
//!
//! Loose comparison follows the usual dynamic-language rules: numbers and
//! numeric strings compare numerically, null and booleans compare by
//! truthiness, arrays sort after every scalar, and two non-numeric strings
//! compare bytewise. Strict comparison requires the same type and value.

use std::cmp::Ordering;

use crate::{
  Tendril,
  array::Array,
  value::{
    Key,
    Value,
    format_float,
  },
};

/// How sort keys are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortFlags {
  #[default]
  Regular,
  Numeric,
  String,
  StringCaseInsensitive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Num {
  Int(i64),
  Float(f64),
}

impl Num {
  pub(crate) fn as_f64(self) -> f64 {
    match self {
      Num::Int(n) => n as f64,
      Num::Float(f) => f,
    }
  }

  pub(crate) fn add(self, other: Num) -> Num {
    match (self, other) {
      (Num::Int(a), Num::Int(b)) => a.checked_add(b).map_or(Num::Float(a as f64 + b as f64), Num::Int),
      (a, b) => Num::Float(a.as_f64() + b.as_f64()),
    }
  }

  pub(crate) fn div(self, divisor: usize) -> Num {
    match self {
      Num::Int(n) if n % divisor as i64 == 0 => Num::Int(n / divisor as i64),
      other => Num::Float(other.as_f64() / divisor as f64),
    }
  }

  fn cmp(self, other: Num) -> Option<Ordering> {
    match (self, other) {
      (Num::Int(a), Num::Int(b)) => Some(a.cmp(&b)),
      (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
    }
  }

  pub(crate) fn into_value(self) -> Value {
    match self {
      Num::Int(n) => Value::Int(n),
      Num::Float(f) => Value::Float(f),
    }
  }
}

/// Parses a numeric string: optional surrounding whitespace, an optional
/// sign, digits with an optional fraction and exponent.
pub(crate) fn numeric_str(text: &str) -> Option<Num> {
  let trimmed = text.trim();
  let (len, _) = numeric_prefix(trimmed);
  if trimmed.is_empty() || len != trimmed.len() {
    return None;
  }
  match trimmed.parse::<i64>() {
    Ok(n) => Some(Num::Int(n)),
    Err(_) => trimmed.parse::<f64>().ok().map(Num::Float),
  }
}

/// Length of the longest numeric prefix of `text` and whether it has digits.
fn numeric_prefix(text: &str) -> (usize, bool) {
  let bytes = text.as_bytes();
  let mut end = 0;
  if matches!(bytes.first(), Some(b'+' | b'-')) {
    end += 1;
  }
  let digits_start = end;
  while end < bytes.len() && bytes[end].is_ascii_digit() {
    end += 1;
  }
  let mut digits = end > digits_start;
  if end < bytes.len() && bytes[end] == b'.' {
    let fraction_start = end + 1;
    let mut fraction_end = fraction_start;
    while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
      fraction_end += 1;
    }
    if digits || fraction_end > fraction_start {
      digits = true;
      end = fraction_end;
    }
  }
  if !digits {
    return (0, false);
  }
  if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
    let mut exponent_end = end + 1;
    if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
      exponent_end += 1;
    }
    let exponent_digits = exponent_end;
    while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
      exponent_end += 1;
    }
    if exponent_end > exponent_digits {
      end = exponent_end;
    }
  }
  (end, true)
}

/// Numeric value used by arithmetic aggregates. Arrays and objects have none;
/// strings contribute their leading number, or zero.
pub(crate) fn arithmetic(value: &Value) -> Option<Num> {
  match value {
    Value::Null => Some(Num::Int(0)),
    Value::Bool(b) => Some(Num::Int(i64::from(*b))),
    Value::Int(n) => Some(Num::Int(*n)),
    Value::Float(f) => Some(Num::Float(*f)),
    Value::Str(s) => {
      numeric_str(s).or_else(|| {
        let trimmed = s.trim_start();
        let (len, _) = numeric_prefix(trimmed);
        if len == 0 {
          return Some(Num::Int(0));
        }
        numeric_str(&trimmed[..len]).or(Some(Num::Int(0)))
      })
    },
    Value::Array(_) | Value::Object(_) => None,
  }
}

fn number(value: &Value) -> Option<Num> {
  match value {
    Value::Int(n) => Some(Num::Int(*n)),
    Value::Float(f) => Some(Num::Float(*f)),
    _ => None,
  }
}

fn number_text(num: Num) -> Tendril {
  match num {
    Num::Int(n) => n.to_string().into(),
    Num::Float(f) => format_float(f).into(),
  }
}

/// Three-way loose comparison. `None` means the operands are uncomparable,
/// which makes every ordered comparison false.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
  use Value::*;

  match (a, b) {
    (Null, Null) => Some(Ordering::Equal),
    (Bool(x), _) => Some(x.cmp(&b.truthy())),
    (_, Bool(y)) => Some(a.truthy().cmp(y)),
    (Null, Str(s)) => Some("".cmp(s.as_str())),
    (Str(s), Null) => Some(s.as_str().cmp("")),
    (Null, _) => Some(false.cmp(&b.truthy())),
    (_, Null) => Some(a.truthy().cmp(&false)),
    (Int(_) | Float(_), Int(_) | Float(_)) => number(a)?.cmp(number(b)?),
    (Int(_) | Float(_), Str(s)) => {
      let left = number(a)?;
      match numeric_str(s) {
        Some(right) => left.cmp(right),
        None => Some(number_text(left).as_str().cmp(s.as_str())),
      }
    },
    (Str(_), Int(_) | Float(_)) => compare(b, a).map(Ordering::reverse),
    (Str(x), Str(y)) => {
      match (numeric_str(x), numeric_str(y)) {
        (Some(left), Some(right)) => left.cmp(right),
        _ => Some(x.as_str().cmp(y.as_str())),
      }
    },
    (Array(x), Array(y)) => compare_arrays(x, y),
    (Array(_), _) => Some(Ordering::Greater),
    (_, Array(_)) => Some(Ordering::Less),
    (Object(x), Object(y)) => {
      if x.class() != y.class() {
        return None;
      }
      compare_arrays(x.props(), y.props())
    },
    (Object(object), Str(s)) => {
      match object.repr() {
        Some(repr) => Some(repr.cmp(s.as_str())),
        None => Some(Ordering::Greater),
      }
    },
    (Str(_), Object(_)) => compare(b, a).map(Ordering::reverse),
    (Object(_), _) => Some(Ordering::Greater),
    (_, Object(_)) => Some(Ordering::Less),
  }
}

fn compare_arrays(x: &Array, y: &Array) -> Option<Ordering> {
  match x.len().cmp(&y.len()) {
    Ordering::Equal => {},
    other => return Some(other),
  }
  for (key, left) in x {
    let right = y.get(key)?;
    match compare(left, right)? {
      Ordering::Equal => {},
      other => return Some(other),
    }
  }
  Some(Ordering::Equal)
}

/// Loose equality (`==`).
pub fn loose_eq(a: &Value, b: &Value) -> bool {
  compare(a, b) == Some(Ordering::Equal)
}

/// Strict equality (`===`): same type and same value. Arrays must hold the
/// same entries in the same order.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Float(x), Value::Float(y)) => x == y,
    (Value::Array(x), Value::Array(y)) => {
      x.len() == y.len()
        && x
          .iter()
          .zip(y.iter())
          .all(|((ka, va), (kb, vb))| ka == kb && strict_eq(va, vb))
    },
    (Value::Object(x), Value::Object(y)) => x == y,
    _ => a == b,
  }
}

/// Loose ordering for sorting. Uncomparable pairs order as greater. Not
/// transitive across mixed types, so callers sort with `merge_sort_by`.
pub fn loose_cmp(a: &Value, b: &Value) -> Ordering {
  compare(a, b).unwrap_or(Ordering::Greater)
}

pub fn compare_with(a: &Value, b: &Value, flags: SortFlags) -> Ordering {
  match flags {
    SortFlags::Regular => loose_cmp(a, b),
    SortFlags::Numeric => {
      let left = arithmetic(a).map_or(0.0, Num::as_f64);
      let right = arithmetic(b).map_or(0.0, Num::as_f64);
      left.partial_cmp(&right).unwrap_or(Ordering::Equal)
    },
    SortFlags::String => text(a).cmp(&text(b)),
    SortFlags::StringCaseInsensitive => text(a).to_lowercase().cmp(&text(b).to_lowercase()),
  }
}

pub fn compare_keys(a: &Key, b: &Key, flags: SortFlags) -> Ordering {
  compare_with(&a.to_value(), &b.to_value(), flags)
}

fn text(value: &Value) -> Tendril {
  value.to_text().unwrap_or_else(|| "Array".into())
}

/// True when `haystack` holds a value equal to `needle`.
pub fn contains_value<'a>(
  haystack: impl IntoIterator<Item = &'a Value>,
  needle: &Value,
  strict: bool,
) -> bool {
  haystack.into_iter().any(|candidate| {
    if strict {
      strict_eq(candidate, needle)
    } else {
      loose_eq(candidate, needle)
    }
  })
}
