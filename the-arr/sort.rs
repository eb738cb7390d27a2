//! Stable sorting that keeps keys attached to their values.

use std::cmp::Ordering;

use crate::{
  array::Array,
  compare::{
    SortFlags,
    compare_keys,
    compare_with,
    loose_cmp,
  },
  retrieve::Retriever,
  value::{
    Key,
    Value,
  },
};

fn entries(array: &Array) -> Vec<(Key, Value)> {
  array
    .iter()
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect()
}

/// Stable merge sort. The comparator only decides which head moves next, so
/// an inconsistent one (loose comparison over mixed types) yields some
/// permutation of the input instead of a panic.
pub(crate) fn merge_sort_by<T>(items: Vec<T>, mut cmp: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
  merge(items, &mut cmp)
}

fn merge<T>(items: Vec<T>, cmp: &mut dyn FnMut(&T, &T) -> Ordering) -> Vec<T> {
  if items.len() < 2 {
    return items;
  }
  let mut left = items;
  let right = left.split_off(left.len() / 2);
  let left = merge(left, cmp);
  let right = merge(right, cmp);

  let mut merged = Vec::with_capacity(left.len() + right.len());
  let mut left = left.into_iter().peekable();
  let mut right = right.into_iter().peekable();
  loop {
    let from_right = match (left.peek(), right.peek()) {
      (Some(a), Some(b)) => cmp(b, a) == Ordering::Less,
      (Some(_), None) => false,
      (None, Some(_)) => true,
      (None, None) => break,
    };
    merged.extend(if from_right { right.next() } else { left.next() });
  }
  merged
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
  if descending {
    ordering.reverse()
  } else {
    ordering
  }
}

/// Sorts values with loose comparison.
pub fn sort(array: &Array) -> Array {
  sort_with(array, loose_cmp)
}

pub fn sort_desc(array: &Array) -> Array {
  sort_with(array, |a, b| loose_cmp(b, a))
}

pub fn sort_with(array: &Array, mut cmp: impl FnMut(&Value, &Value) -> Ordering) -> Array {
  merge_sort_by(entries(array), |(_, a), (_, b)| cmp(a, b))
    .into_iter()
    .collect()
}

/// Sorts by a retrieved value. Each value is retrieved once.
pub fn sort_by<'r>(
  array: &Array,
  retriever: impl Into<Retriever<'r>>,
  flags: SortFlags,
  descending: bool,
) -> Array {
  let retriever = retriever.into();
  let keyed: Vec<(Value, Key, &Value)> = array
    .iter()
    .map(|(key, value)| (retriever.resolve(value, key), key.clone(), value))
    .collect();
  merge_sort_by(keyed, |(a, ..), (b, ..)| {
    directed(compare_with(a, b, flags), descending)
  })
  .into_iter()
  .map(|(_, key, value)| (key, value.clone()))
  .collect()
}

pub fn sort_by_desc<'r>(array: &Array, retriever: impl Into<Retriever<'r>>, flags: SortFlags) -> Array {
  sort_by(array, retriever, flags, true)
}

pub fn sort_keys(array: &Array, flags: SortFlags, descending: bool) -> Array {
  merge_sort_by(entries(array), |(a, _), (b, _)| {
    directed(compare_keys(a, b, flags), descending)
  })
  .into_iter()
  .collect()
}

pub fn sort_keys_desc(array: &Array, flags: SortFlags) -> Array {
  sort_keys(array, flags, true)
}

/// Sorts every nested level: lists by value (renumbered), maps by key.
pub fn sort_recursive(array: &Array) -> Array {
  let nested: Array = array
    .iter()
    .map(|(key, value)| {
      let value = match value {
        Value::Array(inner) => Value::Array(sort_recursive(inner)),
        other => other.clone(),
      };
      (key.clone(), value)
    })
    .collect();
  if nested.is_assoc() {
    sort_keys(&nested, SortFlags::Regular, false)
  } else {
    sort(&nested).reindexed()
  }
}
