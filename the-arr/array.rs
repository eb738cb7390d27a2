//! The ordered key/value container.

use std::fmt;

use indexmap::{
  IndexMap,
  map,
};

use crate::value::{
  Key,
  Value,
};

/// An insertion-ordered map from [`Key`] to [`Value`].
///
/// Appending with [`Array::push`] uses the next integer key, one past the
/// largest integer key ever inserted. Removing entries does not lower it.
#[derive(Clone, Default)]
pub struct Array {
  items:      IndexMap<Key, Value>,
  next_index: i64,
}

impl Array {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      items:      IndexMap::with_capacity(capacity),
      next_index: 0,
    }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// True unless the keys are exactly `0..len` in order.
  pub fn is_assoc(&self) -> bool {
    self
      .items
      .keys()
      .enumerate()
      .any(|(index, key)| *key != Key::Int(index as i64))
  }

  pub fn is_list(&self) -> bool {
    !self.is_assoc()
  }

  pub fn get(&self, key: &Key) -> Option<&Value> {
    self.items.get(key)
  }

  pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
    self.items.get_mut(key)
  }

  pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
    self.items.get_index(index)
  }

  pub fn contains_key(&self, key: &Key) -> bool {
    self.items.contains_key(key)
  }

  /// Inserts or overwrites `key`. Overwriting keeps the original position.
  pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
    let key = key.into();
    self.bump(&key);
    self.items.insert(key, value.into())
  }

  /// Appends `value` under the next integer key.
  pub fn push(&mut self, value: impl Into<Value>) {
    let key = Key::Int(self.next_index);
    self.next_index = self.next_index.saturating_add(1);
    self.items.insert(key, value.into());
  }

  /// Returns the slot for `key`, inserting null when it is missing.
  pub fn slot(&mut self, key: Key) -> &mut Value {
    self.bump(&key);
    self.items.entry(key).or_default()
  }

  pub fn remove(&mut self, key: &Key) -> Option<Value> {
    self.items.shift_remove(key)
  }

  pub fn pop(&mut self) -> Option<Value> {
    let (_, value) = self.items.pop()?;
    self.next_index = self.max_int_key().map_or(0, |n| n.saturating_add(1));
    Some(value)
  }

  /// Removes the first entry and renumbers the remaining integer keys.
  pub fn shift(&mut self) -> Option<Value> {
    let (_, value) = self.items.shift_remove_index(0)?;
    *self = std::mem::take(self).renumbered();
    Some(value)
  }

  /// Prepends `value` and renumbers integer keys.
  pub fn unshift(&mut self, value: impl Into<Value>) {
    let mut items = Array::with_capacity(self.len() + 1);
    items.push(value);
    items.append_renumbered(std::mem::take(self));
    *self = items;
  }

  pub fn first(&self) -> Option<(&Key, &Value)> {
    self.items.first()
  }

  pub fn last(&self) -> Option<(&Key, &Value)> {
    self.items.last()
  }

  pub fn keys(&self) -> map::Keys<'_, Key, Value> {
    self.items.keys()
  }

  pub fn values(&self) -> map::Values<'_, Key, Value> {
    self.items.values()
  }

  pub fn values_mut(&mut self) -> map::ValuesMut<'_, Key, Value> {
    self.items.values_mut()
  }

  pub fn iter(&self) -> map::Iter<'_, Key, Value> {
    self.items.iter()
  }

  pub fn iter_mut(&mut self) -> map::IterMut<'_, Key, Value> {
    self.items.iter_mut()
  }

  pub fn retain(&mut self, mut keep: impl FnMut(&Key, &Value) -> bool) {
    self.items.retain(|key, value| keep(key, value));
  }

  pub fn clear(&mut self) {
    self.items.clear();
    self.next_index = 0;
  }

  /// Drops every key, producing a list of the values.
  pub fn reindexed(self) -> Array {
    self.items.into_values().collect()
  }

  /// Renumbers integer keys from zero, keeping string keys as they are.
  pub fn renumbered(self) -> Array {
    let mut out = Array::with_capacity(self.len());
    out.append_renumbered(self);
    out
  }

  /// Appends `other` to `self`: integer keys are renumbered onto the end,
  /// string keys overwrite.
  pub fn append_renumbered(&mut self, other: Array) {
    for (key, value) in other {
      match key {
        Key::Int(_) => self.push(value),
        Key::Str(_) => {
          self.insert(key, value);
        },
      }
    }
  }

  pub(crate) fn max_int_key(&self) -> Option<i64> {
    self.items.keys().filter_map(Key::as_int).max()
  }

  fn bump(&mut self, key: &Key) {
    if let Key::Int(n) = key
      && *n >= self.next_index
    {
      self.next_index = n.saturating_add(1);
    }
  }
}

impl PartialEq for Array {
  /// Equal when both hold the same entries in the same order.
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
  }
}

impl fmt::Debug for Array {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.items.iter()).finish()
  }
}

impl FromIterator<Value> for Array {
  fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
    let mut array = Array::new();
    for value in iter {
      array.push(value);
    }
    array
  }
}

impl FromIterator<(Key, Value)> for Array {
  fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
    let mut array = Array::new();
    array.extend(iter);
    array
  }
}

impl Extend<(Key, Value)> for Array {
  fn extend<I: IntoIterator<Item = (Key, Value)>>(&mut self, iter: I) {
    for (key, value) in iter {
      self.insert(key, value);
    }
  }
}

impl Extend<Value> for Array {
  fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
    for value in iter {
      self.push(value);
    }
  }
}

impl IntoIterator for Array {
  type Item = (Key, Value);
  type IntoIter = map::IntoIter<Key, Value>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.into_iter()
  }
}

impl<'a> IntoIterator for &'a Array {
  type Item = (&'a Key, &'a Value);
  type IntoIter = map::Iter<'a, Key, Value>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}
