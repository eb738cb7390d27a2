//! Set-like operations between two arrays.
//!
//! Value comparisons here use string forms: two values match when they render
//! to the same string. Arrays have no string form and only match an
//! identical array.

use std::cmp::Ordering;

use crate::{
  array::Array,
  compare::strict_eq,
  value::{
    Key,
    Value,
  },
};

fn same_text(a: &Value, b: &Value) -> bool {
  match (a.to_text(), b.to_text()) {
    (Some(x), Some(y)) => x == y,
    _ => strict_eq(a, b),
  }
}

/// Entries of `a`, then entries of `b` whose keys `a` lacks.
pub fn union(a: &Array, b: &Array) -> Array {
  let mut out = a.clone();
  for (key, value) in b {
    if !out.contains_key(key) {
      out.insert(key.clone(), value.clone());
    }
  }
  out
}

/// Appends `b` to `a`: integer keys are renumbered, string keys overwrite.
pub fn merge(a: &Array, b: &Array) -> Array {
  let mut out = a.clone().renumbered();
  out.append_renumbered(b.clone());
  out
}

/// Entries of `a` whose value appears nowhere in `b`.
pub fn diff(a: &Array, b: &Array) -> Array {
  retain(a, |_, value| !b.values().any(|other| same_text(value, other)))
}

pub fn diff_using(a: &Array, b: &Array, mut cmp: impl FnMut(&Value, &Value) -> Ordering) -> Array {
  retain(a, |_, value| !b.values().any(|other| cmp(value, other).is_eq()))
}

/// Entries of `a` not present in `b` with the same key and value.
pub fn diff_assoc(a: &Array, b: &Array) -> Array {
  retain(a, |key, value| !b.get(key).is_some_and(|other| same_text(value, other)))
}

pub fn diff_assoc_using(a: &Array, b: &Array, mut key_cmp: impl FnMut(&Key, &Key) -> Ordering) -> Array {
  retain(a, |key, value| {
    !b.iter()
      .any(|(other_key, other)| key_cmp(key, other_key).is_eq() && same_text(value, other))
  })
}

/// Entries of `a` whose key `b` lacks.
pub fn diff_keys(a: &Array, b: &Array) -> Array {
  retain(a, |key, _| !b.contains_key(key))
}

pub fn diff_keys_using(a: &Array, b: &Array, mut key_cmp: impl FnMut(&Key, &Key) -> Ordering) -> Array {
  retain(a, |key, _| !b.keys().any(|other| key_cmp(key, other).is_eq()))
}

/// Entries of `a` whose value appears in `b`.
pub fn intersect(a: &Array, b: &Array) -> Array {
  retain(a, |_, value| b.values().any(|other| same_text(value, other)))
}

/// Entries of `a` whose key appears in `b`.
pub fn intersect_by_keys(a: &Array, b: &Array) -> Array {
  retain(a, |key, _| b.contains_key(key))
}

fn retain(array: &Array, mut keep: impl FnMut(&Key, &Value) -> bool) -> Array {
  let mut out = array.clone();
  out.retain(|key, value| keep(key, value));
  out
}
