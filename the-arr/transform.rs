//! Mapping, grouping, reshaping and slicing.
//!
//! Unless stated otherwise, operations that keep a subset of entries keep
//! their keys, and operations that build new sequences produce lists.

use std::ops::ControlFlow;

use crate::{
  array::Array,
  compare::contains_value,
  error::{
    Error,
    Result,
  },
  filter::filter,
  path::{
    self,
    AccessibleMut,
  },
  retrieve::Retriever,
  value::{
    Key,
    Value,
  },
};

pub fn map(array: &Array, mut f: impl FnMut(&Value, &Key) -> Value) -> Array {
  array
    .iter()
    .map(|(key, value)| (key.clone(), f(value, key)))
    .collect()
}

/// Maps every element and collapses the results one level.
pub fn flat_map(array: &Array, f: impl FnMut(&Value, &Key) -> Value) -> Array {
  path::collapse(&map(array, f))
}

/// Builds a new array from the key/value pairs each callback returns. Later
/// pairs overwrite earlier ones.
pub fn map_with_keys(array: &Array, mut f: impl FnMut(&Value, &Key) -> Array) -> Array {
  let mut out = Array::new();
  for (key, value) in array {
    out.extend(f(value, key));
  }
  out
}

/// Groups values under the key each callback returns.
pub fn map_to_groups(array: &Array, mut f: impl FnMut(&Value, &Key) -> (Key, Value)) -> Array {
  let mut groups = Array::new();
  for (key, value) in array {
    let (group, value) = f(value, key);
    groups.slot(group).make_container().push(value);
  }
  groups
}

pub fn map_to_dictionary(array: &Array, f: impl FnMut(&Value, &Key) -> (Key, Value)) -> Array {
  map_to_groups(array, f)
}

/// Calls `f` with each element's values spread out, followed by its key.
pub fn map_spread(array: &Array, mut f: impl FnMut(&[Value]) -> Value) -> Array {
  map(array, |value, key| f(&spread(value, key)))
}

/// Converts every element into `T`.
pub fn map_into<T: From<Value>>(array: &Array) -> Vec<T> {
  array.values().cloned().map(T::from).collect()
}

fn spread(value: &Value, key: &Key) -> Vec<Value> {
  let mut chunk: Vec<Value> = match value {
    Value::Array(items) => items.values().cloned().collect(),
    other => vec![other.clone()],
  };
  chunk.push(key.to_value());
  chunk
}

/// Visits elements in order until `f` breaks.
pub fn each(array: &Array, mut f: impl FnMut(&Value, &Key) -> ControlFlow<()>) {
  for (key, value) in array {
    if f(value, key).is_break() {
      break;
    }
  }
}

pub fn each_spread(array: &Array, mut f: impl FnMut(&[Value]) -> ControlFlow<()>) {
  each(array, |value, key| f(&spread(value, key)));
}

pub fn reduce<A>(array: &Array, initial: A, mut f: impl FnMut(A, &Value, &Key) -> A) -> A {
  array
    .iter()
    .fold(initial, |carry, (key, value)| f(carry, value, key))
}

/// Re-keys elements by a retrieved value. Later elements win on collision;
/// elements whose value cannot be a key are dropped.
pub fn key_by<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Array {
  let retriever = retriever.into();
  let mut out = Array::new();
  for (key, value) in array {
    match retriever.resolve(value, key).to_key() {
      Some(new_key) => {
        out.insert(new_key, value.clone());
      },
      None => tracing::trace!(%key, "dropping element without a usable key"),
    }
  }
  out
}

/// Groups elements by each grouper in turn, nesting one level per grouper.
///
/// A discriminator that is itself an array places the element in every
/// bucket it names. Null discriminators drop the element.
pub fn group_by(array: &Array, groupers: &[Retriever<'_>], preserve_keys: bool) -> Array {
  let Some((grouper, rest)) = groupers.split_first() else {
    return array.clone();
  };
  let mut groups = Array::new();
  for (key, value) in array {
    let group_keys: Vec<Key> = match grouper.resolve(value, key) {
      Value::Null => Vec::new(),
      Value::Array(keys) => keys.values().filter_map(Value::to_key).collect(),
      other => other.to_key().into_iter().collect(),
    };
    for group_key in group_keys {
      let bucket = groups.slot(group_key).make_container();
      if preserve_keys {
        bucket.insert(key.clone(), value.clone());
      } else {
        bucket.push(value.clone());
      }
    }
  }
  if rest.is_empty() {
    return groups;
  }
  map(&groups, |bucket, _| {
    match bucket {
      Value::Array(bucket) => Value::Array(group_by(bucket, rest, preserve_keys)),
      other => other.clone(),
    }
  })
}

/// Flattens nested arrays into a list. `None` flattens fully; `Some(d)`
/// inlines `d` levels.
pub fn flatten(array: &Array, depth: Option<usize>) -> Array {
  let mut out = Array::new();
  flatten_into(&mut out, array, depth);
  out
}

fn flatten_into(out: &mut Array, array: &Array, depth: Option<usize>) {
  for value in array.values() {
    match (value, depth) {
      (Value::Array(_), Some(0)) => out.push(value.clone()),
      (Value::Array(inner), Some(1)) => out.extend(inner.values().cloned()),
      (Value::Array(inner), depth) => flatten_into(out, inner, depth.map(|d| d - 1)),
      (other, _) => out.push(other.clone()),
    }
  }
}

/// Splits into arrays of `size` elements, keeping keys. A zero size yields
/// nothing.
pub fn chunk(array: &Array, size: usize) -> Array {
  if size == 0 {
    return Array::new();
  }
  let mut chunks = Array::new();
  let mut current = Array::with_capacity(size);
  for (key, value) in array {
    current.insert(key.clone(), value.clone());
    if current.len() == size {
      chunks.push(std::mem::replace(&mut current, Array::with_capacity(size)));
    }
  }
  if !current.is_empty() {
    chunks.push(current);
  }
  chunks
}

/// Splits into `groups` arrays of as-equal-as-possible size.
pub fn split(array: &Array, groups: usize) -> Array {
  if groups == 0 || array.is_empty() {
    return Array::new();
  }
  chunk(array, array.len().div_ceil(groups))
}

/// The `page`-th window of `per_page` elements, counting pages from 1.
pub fn for_page(array: &Array, page: usize, per_page: usize) -> Array {
  let offset = page.saturating_sub(1).saturating_mul(per_page);
  slice(array, clamped(offset), Some(clamped(per_page)))
}

/// Every `step`-th element starting at position `offset`, as a list.
pub fn nth(array: &Array, step: usize, offset: usize) -> Array {
  if step == 0 {
    return Array::new();
  }
  array
    .values()
    .skip(offset)
    .step_by(step)
    .cloned()
    .collect()
}

/// A `usize` position as a non-negative slice offset.
pub fn clamped(position: usize) -> i64 {
  i64::try_from(position).unwrap_or(i64::MAX)
}

fn bounds(len: usize, offset: i64, length: Option<i64>) -> (usize, usize) {
  let len = len as i64;
  let start = if offset < 0 {
    (len + offset).max(0)
  } else {
    offset.min(len)
  };
  let end = match length {
    None => len,
    Some(length) if length < 0 => (len + length).max(start),
    Some(length) => start.saturating_add(length).min(len),
  };
  (start as usize, end as usize)
}

/// A positional slice keeping keys. Negative offsets count from the end; a
/// negative length stops that many elements before the end.
pub fn slice(array: &Array, offset: i64, length: Option<i64>) -> Array {
  let (start, end) = bounds(array.len(), offset, length);
  array
    .iter()
    .skip(start)
    .take(end - start)
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect()
}

/// The first `limit` elements, or the last `-limit` when negative.
pub fn take(array: &Array, limit: i64) -> Array {
  if limit < 0 {
    slice(array, limit, None)
  } else {
    slice(array, 0, Some(limit))
  }
}

/// Removes a positional range, inserting `replacement` in its place, and
/// returns the removed entries. Integer keys of both arrays are renumbered.
pub fn splice(
  array: &mut Array,
  offset: i64,
  length: Option<i64>,
  replacement: impl IntoIterator<Item = Value>,
) -> Array {
  let (start, end) = bounds(array.len(), offset, length);
  let mut kept = Array::with_capacity(array.len());
  let mut removed = Array::new();
  let mut replacement = Some(replacement);
  for (index, (key, value)) in std::mem::take(array).into_iter().enumerate() {
    if index == start
      && let Some(values) = replacement.take()
    {
      kept.extend(values);
    }
    let target = if (start..end).contains(&index) {
      &mut removed
    } else {
      &mut kept
    };
    match key {
      Key::Int(_) => target.push(value),
      Key::Str(_) => {
        target.insert(key, value);
      },
    }
  }
  if let Some(values) = replacement {
    kept.extend(values);
  }
  *array = kept;
  removed
}

/// Pads to `|size|` elements with `value`: on the right for a positive size,
/// on the left for a negative one.
pub fn pad(array: &Array, size: i64, value: &Value) -> Array {
  let target = size.unsigned_abs() as usize;
  if target <= array.len() {
    return array.clone();
  }
  let padding = std::iter::repeat_n(value.clone(), target - array.len());
  let mut out = Array::with_capacity(target);
  if size < 0 {
    out.extend(padding);
    out.append_renumbered(array.clone());
  } else {
    out.append_renumbered(array.clone());
    out.extend(padding);
  }
  out
}

/// Zips lists by position. The result is as long as the shortest input;
/// a missing position reads as null.
pub fn zip(arrays: &[&Array]) -> Array {
  let Some(count) = arrays.iter().map(|array| array.len()).min() else {
    return Array::new();
  };
  (0..count)
    .map(|index| {
      let row: Array = arrays
        .iter()
        .map(|array| array.get(&Key::from(index)).cloned().unwrap_or_default())
        .collect();
      Value::Array(row)
    })
    .collect()
}

/// The cartesian product of the inputs, varying the last input fastest.
pub fn cross_join(arrays: &[&Array]) -> Array {
  let mut products: Vec<Vec<Value>> = vec![Vec::new()];
  for array in arrays {
    products = products
      .into_iter()
      .flat_map(|product| {
        array.values().map(move |value| {
          let mut next = product.clone();
          next.push(value.clone());
          next
        })
      })
      .collect();
  }
  products
    .into_iter()
    .map(|product| Value::Array(product.into_iter().collect()))
    .collect()
}

/// Pairs `keys` with `values` positionally.
pub fn combine(keys: &Array, values: &Array) -> Result<Array> {
  if keys.len() != values.len() {
    return Err(Error::LengthMismatch {
      keys:   keys.len(),
      values: values.len(),
    });
  }
  keys
    .values()
    .zip(values.values())
    .map(|(key, value)| -> Result<(Key, Value)> {
      let key = key.to_key().ok_or_else(|| {
        Error::InvalidArgument(format!("{} cannot be used as a key", key.type_name()))
      })?;
      Ok((key, value.clone()))
    })
    .collect()
}

/// Pairs `keys` with the zipped rows of `columns`.
pub fn combine_zip(keys: &Array, columns: &[&Array]) -> Result<Array> {
  combine(keys, &zip(columns))
}

/// Appends every value of `source` under new integer keys.
pub fn concat(array: &Array, source: &Array) -> Array {
  let mut out = array.clone();
  out.extend(source.values().cloned());
  out
}

/// Puts `value` first. Without a key, integer keys are renumbered; with one,
/// the entry replaces any existing entry under that key.
pub fn prepend(array: &Array, value: impl Into<Value>, key: Option<Key>) -> Array {
  match key {
    None => {
      let mut out = array.clone();
      out.unshift(value);
      out
    },
    Some(key) => {
      let mut out = Array::with_capacity(array.len() + 1);
      out.insert(key, value);
      union_into(&mut out, array);
      out
    },
  }
}

fn union_into(out: &mut Array, other: &Array) {
  for (key, value) in other {
    if !out.contains_key(key) {
      out.insert(key.clone(), value.clone());
    }
  }
}

/// Wraps a scalar in a one-element list. Null wraps to an empty array and
/// arrays pass through.
pub fn wrap(value: impl Into<Value>) -> Array {
  match value.into() {
    Value::Null => Array::new(),
    Value::Array(array) => array,
    other => std::iter::once(other).collect(),
  }
}

/// Splits into `(keys, values)` lists.
pub fn divide(array: &Array) -> (Array, Array) {
  (keys(array), values(array))
}

/// The list `1..=count`.
pub fn times(count: usize) -> Array {
  (1..=count as i64).map(Value::Int).collect()
}

pub fn times_with(count: usize, f: impl FnMut(i64) -> Value) -> Array {
  (1..=count as i64).map(f).collect()
}

/// Drops repeated discriminators, keeping the first occurrence and its key.
pub fn unique<'r>(array: &Array, retriever: impl Into<Retriever<'r>>, strict: bool) -> Array {
  let retriever = retriever.into();
  let mut seen: Vec<Value> = Vec::new();
  filter(array, |value, key| {
    let id = retriever.resolve(value, key);
    if contains_value(&seen, &id, strict) {
      false
    } else {
      seen.push(id);
      true
    }
  })
}

pub fn unique_strict<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Array {
  unique(array, retriever, true)
}

/// Reverses order, keeping keys.
pub fn reverse(array: &Array) -> Array {
  array
    .iter()
    .rev()
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect()
}

pub fn values(array: &Array) -> Array {
  array.values().cloned().collect()
}

pub fn keys(array: &Array) -> Array {
  array.keys().map(Key::to_value).collect()
}

/// Swaps keys and values. Only integer and string values can become keys.
pub fn flip(array: &Array) -> Array {
  let mut out = Array::with_capacity(array.len());
  for (key, value) in array {
    match value {
      Value::Int(_) | Value::Str(_) => {
        if let Some(new_key) = value.to_key() {
          out.insert(new_key, key.to_value());
        }
      },
      other => tracing::debug!(kind = other.type_name(), "can only flip string and integer values"),
    }
  }
  out
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
  seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

/// Shuffles into a list. The same seed always gives the same order.
pub fn shuffle(array: &Array, seed: Option<u64>) -> Array {
  let mut values: Vec<Value> = array.values().cloned().collect();
  rng(seed).shuffle(&mut values);
  values.into_iter().collect()
}

/// One element picked uniformly at random.
pub fn random(array: &Array, seed: Option<u64>) -> Option<Value> {
  if array.is_empty() {
    return None;
  }
  let index = rng(seed).usize(..array.len());
  array.get_index(index).map(|(_, value)| value.clone())
}

/// `count` distinct elements picked at random, in their original order and
/// with their keys.
pub fn random_many(array: &Array, count: usize, seed: Option<u64>) -> Result<Array> {
  if count > array.len() {
    return Err(Error::InvalidArgument(format!(
      "requested {count} items, but there are only {} items available",
      array.len()
    )));
  }
  let mut indices: Vec<usize> = (0..array.len()).collect();
  rng(seed).shuffle(&mut indices);
  indices.truncate(count);
  indices.sort_unstable();
  Ok(
    indices
      .into_iter()
      .filter_map(|index| array.get_index(index))
      .map(|(key, value)| (key.clone(), value.clone()))
      .collect(),
  )
}

/// Joins the string forms of the values with `glue`. Arrays render as
/// `Array`.
pub fn implode(array: &Array, glue: &str) -> String {
  array
    .values()
    .map(|value| value.to_text().map_or_else(|| "Array".to_owned(), String::from))
    .collect::<Vec<_>>()
    .join(glue)
}

pub fn implode_by(array: &Array, path: &str, glue: &str) -> String {
  implode(&path::pluck(array, path, None), glue)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::array;

  #[test]
  fn map_keeps_keys() {
    let a = array!["a" => 1, "b" => 2];
    let doubled = map(&a, |v, _| Value::Int(v.as_i64().unwrap_or_default() * 2));
    assert_eq!(doubled, array!["a" => 2, "b" => 4]);
  }

  #[test]
  fn map_with_keys_builds_pairs() {
    let users = array![
      array!["id" => 1, "email" => "a@x"],
      array!["id" => 2, "email" => "b@x"],
    ];
    let by_email = map_with_keys(&users, |user, _| {
      let email = path::get(user, "email", Value::Null);
      let id = path::get(user, "id", Value::Null);
      let mut pair = Array::new();
      if let Some(key) = email.to_key() {
        pair.insert(key, id);
      }
      pair
    });
    assert_eq!(by_email, array!["a@x" => 1, "b@x" => 2]);
  }

  #[test]
  fn map_to_groups_collects_lists() {
    let a = array![
      array!["dept" => "ops", "name" => "a"],
      array!["dept" => "dev", "name" => "b"],
      array!["dept" => "ops", "name" => "c"],
    ];
    let grouped = map_to_groups(&a, |item, _| {
      let dept = path::get(item, "dept", Value::Null);
      (dept.to_key().unwrap_or(Key::Int(0)), path::get(item, "name", Value::Null))
    });
    assert_eq!(grouped, array!["ops" => array!["a", "c"], "dev" => array!["b"]]);
  }

  #[test]
  fn map_spread_appends_key() {
    let a = array![array![1, "a"], array![2, "b"]];
    let out = map_spread(&a, |args| Value::from(format!("{:?}", args.len())));
    assert_eq!(out, array!["3", "3"]);
  }

  #[test]
  fn each_stops_on_break() {
    let mut seen = Vec::new();
    each(&array![1, 2, 3, 4], |v, _| {
      seen.push(v.clone());
      if v.as_i64() == Some(2) {
        ControlFlow::Break(())
      } else {
        ControlFlow::Continue(())
      }
    });
    assert_eq!(seen, vec![Value::Int(1), Value::Int(2)]);
  }

  #[test]
  fn reduce_sums() {
    let total = reduce(&array![1, 2, 3], 0, |carry, v, _| carry + v.as_i64().unwrap_or_default());
    assert_eq!(total, 6);
  }

  #[test]
  fn key_by_path_and_callback() {
    let a = array![
      array!["id" => "p1", "name" => "Desk"],
      array!["id" => "p2", "name" => "Chair"],
    ];
    let keyed = key_by(&a, "id");
    assert_eq!(keyed.keys().cloned().collect::<Vec<_>>(), vec![Key::from("p1"), Key::from("p2")]);

    let upper = key_by(
      &a,
      Retriever::func(|item, _| {
        Value::from(path::get(item, "name", Value::Null).as_str().unwrap_or_default().to_uppercase())
      }),
    );
    assert!(upper.contains_key(&Key::from("DESK")));
  }

  #[test]
  fn group_by_single_and_nested() {
    let a = array![
      array!["account" => 1, "product" => "a", "active" => true],
      array!["account" => 1, "product" => "b", "active" => false],
      array!["account" => 2, "product" => "c", "active" => true],
    ];
    let grouped = group_by(&a, &["account".into()], false);
    assert_eq!(grouped.keys().cloned().collect::<Vec<_>>(), vec![Key::Int(1), Key::Int(2)]);
    assert_eq!(
      path::get(&grouped, "1", Value::Null).as_array().map(Array::len),
      Some(2)
    );

    let preserved = group_by(&a, &["account".into()], true);
    assert_eq!(
      path::get(&preserved, "2", Value::Null),
      Value::from(array![2 => array!["account" => 2, "product" => "c", "active" => true]])
    );

    let nested = group_by(&a, &["account".into(), "active".into()], false);
    assert!(path::has(&nested, ["1.1", "1.0", "2.1"]));
    assert!(!path::has(&nested, ["2.0"]));
  }

  #[test]
  fn group_by_array_discriminator_fans_out() {
    let a = array![
      array!["name" => "x", "tags" => array!["red", "blue"]],
      array!["name" => "y", "tags" => array!["blue"]],
    ];
    let grouped = group_by(&a, &["tags".into()], false);
    assert_eq!(path::get(&grouped, "red", Value::Null).as_array().map(Array::len), Some(1));
    assert_eq!(path::get(&grouped, "blue", Value::Null).as_array().map(Array::len), Some(2));
  }

  #[test]
  fn flatten_depths() {
    let a = array![
      "a" => array!["x" => array![1, 2]],
      "b" => 3,
    ];
    assert_eq!(flatten(&a, None), array![1, 2, 3]);
    assert_eq!(flatten(&a, Some(1)), array![array![1, 2], 3]);
    assert_eq!(flatten(&a, Some(0)), array![array!["x" => array![1, 2]], 3]);
  }

  #[test]
  fn chunk_keeps_keys() {
    let a: Array = (1..=6).map(Value::Int).collect();
    assert_eq!(
      chunk(&a, 2),
      array![
        array![0 => 1, 1 => 2],
        array![2 => 3, 3 => 4],
        array![4 => 5, 5 => 6],
      ]
    );
    assert!(chunk(&a, 0).is_empty());
  }

  #[test]
  fn split_into_groups() {
    let a: Array = (1..=5).map(Value::Int).collect();
    assert_eq!(
      split(&a, 3),
      array![array![0 => 1, 1 => 2], array![2 => 3, 3 => 4], array![4 => 5]]
    );
    assert!(split(&Array::new(), 3).is_empty());
    assert!(split(&a, 0).is_empty());
  }

  #[test]
  fn paging_and_nth() {
    let a: Array = (1..=10).map(Value::Int).collect();
    assert_eq!(for_page(&a, 2, 3), array![3 => 4, 4 => 5, 5 => 6]);
    assert_eq!(nth(&a, 4, 0), array![1, 5, 9]);
    assert_eq!(nth(&a, 4, 1), array![2, 6, 10]);
    assert!(nth(&a, 0, 0).is_empty());
  }

  #[test]
  fn for_page_with_huge_arguments() {
    let a = array![1, 2, 3, 4, 5];
    assert_eq!(for_page(&a, 1, usize::MAX), a);
    assert!(for_page(&a, usize::MAX, 2).is_empty());
    assert!(for_page(&a, usize::MAX, usize::MAX).is_empty());
    assert_eq!(clamped(usize::MAX), i64::MAX);
  }

  #[test]
  fn slice_and_take() {
    let a = array!["a" => 1, "b" => 2, "c" => 3, "d" => 4];
    assert_eq!(slice(&a, 1, Some(2)), array!["b" => 2, "c" => 3]);
    assert_eq!(slice(&a, -2, None), array!["c" => 3, "d" => 4]);
    assert_eq!(slice(&a, 1, Some(-1)), array!["b" => 2, "c" => 3]);
    assert_eq!(take(&a, 2), array!["a" => 1, "b" => 2]);
    assert_eq!(take(&a, -1), array!["d" => 4]);
    assert!(take(&a, 0).is_empty());
  }

  #[test]
  fn splice_replaces_range() {
    let mut a = array!["a", "b", "c", "d"];
    let removed = splice(&mut a, 1, Some(2), vec![Value::from("x")]);
    assert_eq!(removed, array!["b", "c"]);
    assert_eq!(a, array!["a", "x", "d"]);

    let mut a = array!["a", "b"];
    let removed = splice(&mut a, 5, None, vec![Value::from("z")]);
    assert!(removed.is_empty());
    assert_eq!(a, array!["a", "b", "z"]);
  }

  #[test]
  fn pad_both_sides() {
    let a = array!["a", "b"];
    assert_eq!(pad(&a, 4, &Value::Int(0)), array!["a", "b", 0, 0]);
    assert_eq!(pad(&a, -4, &Value::Int(0)), array![0, 0, "a", "b"]);
    assert_eq!(pad(&a, 1, &Value::Int(0)), a);
  }

  #[test]
  fn zip_truncates_to_shortest() {
    let zipped = zip(&[&array![1, 2, 3], &array!["a", "b"]]);
    assert_eq!(zipped, array![array![1, "a"], array![2, "b"]]);
    assert!(zip(&[]).is_empty());
  }

  #[test]
  fn cross_join_row_major() {
    let joined = cross_join(&[&array![1, 2], &array!["a", "b"]]);
    assert_eq!(
      joined,
      array![array![1, "a"], array![1, "b"], array![2, "a"], array![2, "b"]]
    );
  }

  #[test]
  fn combine_pairs_and_rejects_mismatch() {
    let keys = array!["name", "price"];
    assert_eq!(
      combine(&keys, &array!["Desk", 100]).unwrap(),
      array!["name" => "Desk", "price" => 100]
    );
    assert!(matches!(
      combine(&keys, &array!["Desk"]),
      Err(Error::LengthMismatch { keys: 2, values: 1 })
    ));

    let zipped = combine_zip(&array!["a", "b"], &[&array!["apple", "banana"], &array!["1", "2"]]).unwrap();
    assert_eq!(zipped, array!["a" => array!["apple", "1"], "b" => array!["banana", "2"]]);
  }

  #[test]
  fn prepend_and_concat() {
    let a = array![3 => "x", "k" => "y"];
    assert_eq!(prepend(&a, "z", None), array![0 => "z", 1 => "x", "k" => "y"]);
    assert_eq!(
      prepend(&a, "z", Some(Key::from("k"))),
      array!["k" => "z", 3 => "x"]
    );
    assert_eq!(concat(&array!["a" => 1], &array!["b" => 2]), array!["a" => 1, 0 => 2]);
  }

  #[test]
  fn wrap_divide_times() {
    assert_eq!(wrap(Value::Null), Array::new());
    assert_eq!(wrap("a"), array!["a"]);
    assert_eq!(wrap(array!["x" => 1]), array!["x" => 1]);

    let (k, v) = divide(&array!["a" => 1, "b" => 2]);
    assert_eq!(k, array!["a", "b"]);
    assert_eq!(v, array![1, 2]);

    assert_eq!(times(3), array![1, 2, 3]);
    assert_eq!(times_with(2, |n| Value::Int(n * 10)), array![10, 20]);
  }

  #[test]
  fn unique_keeps_first_occurrence() {
    let a = array![1, 1, 2, 2, 3, 4, 2];
    assert_eq!(unique(&a, Retriever::Identity, false), array![0 => 1, 2 => 2, 4 => 3, 5 => 4]);

    let loose = array![1, "1"];
    assert_eq!(unique(&loose, Retriever::Identity, false), array![1]);
    assert_eq!(unique_strict(&loose, Retriever::Identity), array![1, "1"]);

    let phones = array![
      array!["brand" => "Apple", "model" => "a"],
      array!["brand" => "Apple", "model" => "b"],
      array!["brand" => "Samsung", "model" => "c"],
    ];
    let keys: Vec<Key> = unique(&phones, "brand", false).keys().cloned().collect();
    assert_eq!(keys, vec![Key::Int(0), Key::Int(2)]);
  }

  #[test]
  fn reverse_values_keys_flip() {
    let a = array!["a" => 1, "b" => 2];
    assert_eq!(reverse(&a), array!["b" => 2, "a" => 1]);
    assert_eq!(values(&a), array![1, 2]);
    assert_eq!(keys(&a), array!["a", "b"]);
    assert_eq!(flip(&a), array![1 => "a", 2 => "b"]);
    assert_eq!(flip(&array![1.5, "x"]), array!["x" => 1]);
  }

  #[test]
  fn seeded_shuffle_is_deterministic() {
    let a: Array = (1..=20).map(Value::Int).collect();
    let first = shuffle(&a, Some(7));
    assert_eq!(first, shuffle(&a, Some(7)));
    assert_eq!(first.len(), 20);
    assert!(first.is_list());
    let mut sorted: Vec<i64> = first.values().filter_map(Value::as_i64).collect();
    sorted.sort_unstable();
    assert_eq!(sorted, (1..=20).collect::<Vec<_>>());
  }

  #[test]
  fn random_picks_members() {
    let a = array!["a" => 1, "b" => 2, "c" => 3];
    let picked = random(&a, None).unwrap();
    assert!(a.values().any(|v| *v == picked));
    assert_eq!(random(&Array::new(), None), None);

    let many = random_many(&a, 2, Some(3)).unwrap();
    assert_eq!(many.len(), 2);
    assert!(many.iter().all(|(k, v)| a.get(k) == Some(v)));
    assert!(random_many(&a, 4, None).is_err());
  }

  #[test]
  fn implode_values() {
    assert_eq!(implode(&array![1, "a", true, 2.5], ", "), "1, a, 1, 2.5");
    let users = array![array!["name" => "Ada"], array!["name" => "Bob"]];
    assert_eq!(implode_by(&users, "name", "-"), "Ada-Bob");
  }

  quickcheck::quickcheck! {
    fn chunks_rebuild_input(values: Vec<i64>, size: u8) -> bool {
      let size = usize::from(size % 8) + 1;
      let a: Array = values.iter().copied().map(Value::Int).collect();
      let chunks = chunk(&a, size);
      let mut rebuilt = Array::new();
      let count = chunks.len();
      for (index, piece) in chunks.values().enumerate() {
        let Some(piece) = piece.as_array() else { return false };
        if piece.len() > size || (index + 1 < count && piece.len() != size) {
          return false;
        }
        rebuilt.extend(piece.iter().map(|(k, v)| (k.clone(), v.clone())));
      }
      rebuilt == a
    }

    fn unique_has_no_duplicates(values: Vec<u8>) -> bool {
      let a: Array = values.iter().map(|v| Value::Int(i64::from(v % 5))).collect();
      let out = unique(&a, Retriever::Identity, true);
      let kept: Vec<&Value> = out.values().collect();
      let no_dupes = kept.iter().enumerate().all(|(i, v)| !kept[..i].contains(v));
      let firsts = out.iter().all(|(key, value)| {
        a.iter().find(|&(_, candidate)| candidate == value).map(|(k, _)| k) == Some(key)
      });
      no_dupes && firsts
    }
  }
}
