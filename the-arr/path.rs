//! Dot-notation access into nested containers.
//!
//! A path such as `"users.0.name"` is split on `.` on every call and walked
//! one segment at a time. Numeric segments address integer keys. A `*`
//! segment fans out: the rest of the path is resolved against every element
//! of the current array and the results are collected into a list (collapsed
//! one level when the remaining path holds another `*`).
//!
//! Reads descend through both arrays and object properties. Writes create
//! intermediate arrays as needed.

use smallvec::SmallVec;

use crate::{
  array::Array,
  retrieve::Fallback,
  value::{
    Key,
    Object,
    Value,
  },
};

pub const SEPARATOR: char = '.';
pub const WILDCARD: &str = "*";

type Segments<'a> = SmallVec<[&'a str; 8]>;

fn segments(path: &str) -> Segments<'_> {
  path.split(SEPARATOR).collect()
}

/// A target that paths can be read from.
pub trait Accessible {
  fn container(&self) -> Option<&Array>;

  fn object(&self) -> Option<&Object> {
    None
  }

  fn to_value(&self) -> Value;
}

/// A target that paths can be written into.
pub trait AccessibleMut: Accessible {
  fn container_mut(&mut self) -> Option<&mut Array>;

  /// Returns the underlying array, first replacing a non-array with an empty
  /// one.
  fn make_container(&mut self) -> &mut Array;

  fn replace(&mut self, value: Value);
}

impl Accessible for Array {
  fn container(&self) -> Option<&Array> {
    Some(self)
  }

  fn to_value(&self) -> Value {
    Value::Array(self.clone())
  }
}

impl AccessibleMut for Array {
  fn container_mut(&mut self) -> Option<&mut Array> {
    Some(self)
  }

  fn make_container(&mut self) -> &mut Array {
    self
  }

  fn replace(&mut self, value: Value) {
    *self = match value {
      Value::Array(array) => array,
      Value::Null => Array::new(),
      other => std::iter::once(other).collect(),
    };
  }
}

impl Accessible for Value {
  fn container(&self) -> Option<&Array> {
    self.as_array()
  }

  fn object(&self) -> Option<&Object> {
    self.as_object()
  }

  fn to_value(&self) -> Value {
    self.clone()
  }
}

impl AccessibleMut for Value {
  fn container_mut(&mut self) -> Option<&mut Array> {
    self.as_array_mut()
  }

  fn make_container(&mut self) -> &mut Array {
    match self {
      Value::Array(array) => array,
      other => {
        *other = Value::Array(Array::new());
        other.make_container()
      },
    }
  }

  fn replace(&mut self, value: Value) {
    *self = value;
  }
}

#[derive(Clone, Copy)]
struct Node<'a> {
  array:  Option<&'a Array>,
  object: Option<&'a Object>,
}

impl<'a> Node<'a> {
  fn of<T: Accessible + ?Sized>(target: &'a T) -> Self {
    Self {
      array:  target.container(),
      object: target.object(),
    }
  }

  fn value(value: &'a Value) -> Self {
    Self {
      array:  value.as_array(),
      object: value.as_object(),
    }
  }

  fn is_container(self) -> bool {
    self.array.is_some() || self.object.is_some()
  }

  fn is_empty(self) -> bool {
    match (self.array, self.object) {
      (Some(array), _) => array.is_empty(),
      (None, Some(object)) => object.props().is_empty(),
      (None, None) => true,
    }
  }

  fn child(self, segment: &str) -> Option<&'a Value> {
    let key = Key::parse(segment);
    match (self.array, self.object) {
      (Some(array), _) => array.get(&key),
      (None, Some(object)) => object.props().get(&key),
      (None, None) => None,
    }
  }
}

/// Reads the value at `path`, or `default` when any segment is missing.
///
/// An empty path returns the target itself. A path naming a top-level key
/// verbatim (dots included) is returned directly.
pub fn get<'f, T>(target: &T, path: &str, default: impl Into<Fallback<'f>>) -> Value
where
  T: Accessible + ?Sized,
{
  if path.is_empty() {
    return target.to_value();
  }
  let default: Fallback<'f> = default.into();
  let root = Node::of(target);
  if !root.is_container() {
    return default.resolve();
  }
  if let Some(value) = root.child(path) {
    return value.clone();
  }
  match walk(root, &segments(path)) {
    Some(value) => value,
    None => default.resolve(),
  }
}

/// Borrows the value at `path`. Wildcard segments are not expanded.
pub fn get_ref<'t, T>(target: &'t T, path: &str) -> Option<&'t Value>
where
  T: Accessible + ?Sized,
{
  let root = Node::of(target);
  if let Some(value) = root.child(path) {
    return Some(value);
  }
  let mut node = root;
  let mut current = None;
  for segment in path.split(SEPARATOR) {
    let child = node.child(segment)?;
    node = Node::value(child);
    current = Some(child);
  }
  current
}

fn walk(mut node: Node<'_>, segments: &[&str]) -> Option<Value> {
  let mut current = None;
  for (index, segment) in segments.iter().enumerate() {
    if *segment == WILDCARD {
      let array = node.array?;
      let rest = &segments[index + 1..];
      let plucked = pluck_segments(array, rest);
      let result = if rest.contains(&WILDCARD) {
        collapse(&plucked)
      } else {
        plucked
      };
      return Some(Value::Array(result));
    }
    let child = node.child(segment)?;
    node = Node::value(child);
    current = Some(child);
  }
  current.cloned()
}

fn pluck_segments(items: &Array, rest: &[&str]) -> Array {
  items
    .values()
    .map(|item| {
      if rest.is_empty() {
        item.clone()
      } else {
        walk(Node::value(item), rest).unwrap_or_default()
      }
    })
    .collect()
}

/// Writes `value` at `path`, creating intermediate arrays. A non-container
/// met along the way is replaced. An empty path replaces the whole target.
pub fn set<T>(target: &mut T, path: &str, value: impl Into<Value>)
where
  T: AccessibleMut + ?Sized,
{
  let value = value.into();
  if path.is_empty() {
    target.replace(value);
    return;
  }
  set_segments(target.make_container(), &segments(path), value);
}

fn set_segments(array: &mut Array, segments: &[&str], value: Value) {
  match segments {
    [] => {},
    [last] => {
      array.insert(Key::parse(last), value);
    },
    [head, rest @ ..] => {
      let child = match array.slot(Key::parse(head)) {
        Value::Array(child) => child,
        Value::Object(object) => object.props_mut(),
        other => {
          if !other.is_null() {
            tracing::trace!(segment = %head, kind = other.type_name(), "replacing scalar with array");
          }
          other.make_container()
        },
      };
      set_segments(child, rest, value);
    },
  }
}

/// Builds a fresh array holding `value` at `path`.
pub fn create(path: &str, value: impl Into<Value>) -> Array {
  let mut array = Array::new();
  set(&mut array, path, value);
  array
}

/// True when every key resolves. False for an empty key set, a
/// non-container or an empty target.
pub fn has<T, I, S>(target: &T, keys: I) -> bool
where
  T: Accessible + ?Sized,
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let root = Node::of(target);
  if !root.is_container() || root.is_empty() {
    return false;
  }
  let mut any = false;
  for key in keys {
    any = true;
    let key = key.as_ref();
    if root.child(key).is_some() {
      continue;
    }
    let mut node = root;
    for segment in key.split(SEPARATOR) {
      match node.child(segment) {
        Some(child) => node = Node::value(child),
        None => return false,
      }
    }
  }
  any
}

/// Removes each key. A key naming a top-level entry verbatim is removed
/// directly; otherwise the path is walked from the root and the final segment
/// removed from its parent. Unresolvable paths are ignored.
pub fn forget<T, I, S>(target: &mut T, keys: I)
where
  T: AccessibleMut + ?Sized,
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let Some(root) = target.container_mut() else {
    return;
  };
  for key in keys {
    let key = key.as_ref();
    if root.remove(&Key::parse(key)).is_some() {
      continue;
    }
    forget_segments(root, &segments(key));
  }
}

fn forget_segments(array: &mut Array, segments: &[&str]) {
  match segments {
    [] => {},
    [last] => {
      array.remove(&Key::parse(last));
    },
    [head, rest @ ..] => {
      match array.get_mut(&Key::parse(head)) {
        Some(Value::Array(child)) => forget_segments(child, rest),
        Some(Value::Object(object)) => forget_segments(object.props_mut(), rest),
        _ => {},
      }
    },
  }
}

/// Sets `value` at `path` only when the current value there is null.
pub fn add<T>(target: &mut T, path: &str, value: impl Into<Value>)
where
  T: AccessibleMut + ?Sized,
{
  if get(&*target, path, Value::Null).is_null() {
    set(target, path, value);
  }
}

/// Reads `path` and removes it.
pub fn pull<'f, T>(target: &mut T, path: &str, default: impl Into<Fallback<'f>>) -> Value
where
  T: AccessibleMut + ?Sized,
{
  let value = get(&*target, path, default);
  forget(target, [path]);
  value
}

/// Flattens nested arrays into a single level keyed by dot paths. Empty
/// nested arrays are kept as leaves.
pub fn dot(array: &Array) -> Array {
  let mut out = Array::new();
  dot_into(&mut out, array, None);
  out
}

fn dot_into(out: &mut Array, array: &Array, prefix: Option<&str>) {
  for (key, value) in array {
    let path = match prefix {
      Some(prefix) => format!("{prefix}{SEPARATOR}{key}"),
      None => key.to_string(),
    };
    match value {
      Value::Array(child) if !child.is_empty() => dot_into(out, child, Some(&path)),
      leaf => {
        out.insert(Key::parse(&path), leaf.clone());
      },
    }
  }
}

/// Expands dot-path keys back into nested arrays.
pub fn undot(array: &Array) -> Array {
  let mut out = Array::new();
  for (key, value) in array {
    match key {
      Key::Str(path) if path.contains(SEPARATOR) => {
        set_segments(&mut out, &segments(path), value.clone());
      },
      _ => {
        out.insert(key.clone(), value.clone());
      },
    }
  }
  out
}

pub fn accessible(value: &Value) -> bool {
  value.is_array()
}

/// True when `key` is a top-level key of `array`. No dot walking.
pub fn exists(array: &Array, key: impl Into<Key>) -> bool {
  array.contains_key(&key.into())
}

/// Collects `value_path` from every item, keyed by `key_path` when given.
pub fn pluck(items: &Array, value_path: &str, key_path: Option<&str>) -> Array {
  let mut out = Array::with_capacity(items.len());
  for item in items.values() {
    let value = get(item, value_path, Value::Null);
    match key_path.and_then(|key_path| get(item, key_path, Value::Null).to_key()) {
      Some(key) => {
        out.insert(key, value);
      },
      None => out.push(value),
    }
  }
  out
}

/// Merges the array elements of `array` one level deep. Non-array elements
/// are dropped.
pub fn collapse(array: &Array) -> Array {
  let mut out = Array::new();
  for value in array.values() {
    if let Value::Array(inner) = value {
      out.append_renumbered(inner.clone());
    }
  }
  out
}

/// The entries of `array` whose top-level key is in `keys`, in array order.
pub fn only<K: Into<Key>>(array: &Array, keys: impl IntoIterator<Item = K>) -> Array {
  let wanted: Vec<Key> = keys.into_iter().map(Into::into).collect();
  array
    .iter()
    .filter(|(key, _)| wanted.contains(key))
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect()
}

/// A copy of `array` with `keys` forgotten.
pub fn except<I, S>(array: &Array, keys: I) -> Array
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut out = array.clone();
  forget(&mut out, keys);
  out
}
