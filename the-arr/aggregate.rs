//! Numeric and statistical aggregates.
//!
//! Aggregates skip null values. Every one except [`sum`] returns `None` for an
//! input with nothing left to aggregate.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::{
  array::Array,
  compare::{
    Num,
    arithmetic,
    compare,
    loose_cmp,
  },
  path,
  retrieve::Retriever,
  sort::merge_sort_by,
  value::{
    Key,
    Value,
  },
};

/// Resolves the values an aggregate runs over. A path with a wildcard is
/// read as a whole from the array.
fn resolved(array: &Array, retriever: &Retriever<'_>) -> Vec<Value> {
  if retriever.has_wildcard()
    && let Some(path) = retriever.as_path()
  {
    return match path::get(array, path, Value::Null) {
      Value::Array(values) => values.into_iter().map(|(_, value)| value).collect(),
      Value::Null => Vec::new(),
      other => vec![other],
    };
  }
  array
    .iter()
    .map(|(key, value)| retriever.resolve(value, key))
    .collect()
}

fn numbers(values: &[Value]) -> Vec<Num> {
  values.iter().filter_map(arithmetic).collect()
}

fn total(numbers: &[Num]) -> Num {
  numbers.iter().fold(Num::Int(0), |sum, n| sum.add(*n))
}

/// Sums the retrieved values. Integers stay integers until one overflows or a
/// float joins in. An empty input sums to `0`.
pub fn sum<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Value {
  let values = resolved(array, &retriever.into());
  total(&numbers(&values)).into_value()
}

/// The arithmetic mean of the non-null retrieved values.
pub fn avg<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
  let values: Vec<Value> = resolved(array, &retriever.into())
    .into_iter()
    .filter(|value| !value.is_null())
    .collect();
  if values.is_empty() {
    return None;
  }
  Some(total(&numbers(&values)).div(values.len()).into_value())
}

pub fn average<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
  avg(array, retriever)
}

/// The middle value after sorting, or the mean of the two middle values.
/// `None` when either middle value is an array or object.
pub fn median<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
  let values: Vec<Value> = resolved(array, &retriever.into())
    .into_iter()
    .filter(|value| !value.is_null())
    .collect();
  if values.is_empty() {
    return None;
  }
  let values = merge_sort_by(values, loose_cmp);
  let middle = values.len() / 2;
  if values.len() % 2 == 1 {
    return values.into_iter().nth(middle);
  }
  let lower = arithmetic(&values[middle - 1])?;
  let upper = arithmetic(&values[middle])?;
  Some(lower.add(upper).div(2).into_value())
}

/// The most frequent values, in first-seen order.
pub fn mode<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Option<Array> {
  let values = resolved(array, &retriever.into());
  if values.is_empty() {
    return None;
  }
  let mut counts: IndexMap<Key, usize> = IndexMap::new();
  for value in values.iter().filter(|value| !value.is_null()) {
    if let Some(key) = value.to_key() {
      *counts.entry(key).or_default() += 1;
    }
  }
  let highest = counts.values().copied().max().unwrap_or_default();
  Some(
    counts
      .into_iter()
      .filter(|(_, count)| *count == highest)
      .map(|(key, _)| Value::from(key))
      .collect(),
  )
}

fn extreme(values: Vec<Value>, wanted: Ordering) -> Option<Value> {
  values
    .into_iter()
    .filter(|value| !value.is_null())
    .reduce(|best, value| {
      if compare(&value, &best) == Some(wanted) {
        value
      } else {
        best
      }
    })
}

pub fn max<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
  extreme(resolved(array, &retriever.into()), Ordering::Greater)
}

pub fn min<'r>(array: &Array, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
  extreme(resolved(array, &retriever.into()), Ordering::Less)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::array;

  fn products() -> Array {
    array![
      array!["name" => "Desk", "price" => 200, "dims" => array!["w" => 10]],
      array!["name" => "Chair", "price" => 100, "dims" => array!["w" => 5]],
      array!["name" => "Lamp", "price" => Value::Null],
    ]
  }

  #[test]
  fn sum_identity_path_and_callback() {
    assert_eq!(sum(&array![1, 2, 3], Retriever::Identity), Value::Int(6));
    assert_eq!(sum(&array![1, 2.5], Retriever::Identity), Value::Float(3.5));
    assert_eq!(sum(&Array::new(), Retriever::Identity), Value::Int(0));
    assert_eq!(sum(&products(), "price"), Value::Int(300));
    assert_eq!(sum(&products(), "*.dims.w"), Value::Int(15));
    assert_eq!(
      sum(&products(), Retriever::func(|item, _| Value::Int(path::get(item, "price", 0).as_i64().unwrap_or(0) * 2))),
      Value::Int(600)
    );
  }

  #[test]
  fn sum_promotes_on_overflow() {
    assert_eq!(sum(&array![i64::MAX, 1], Retriever::Identity), Value::Float(i64::MAX as f64 + 1.0));
  }

  #[test]
  fn averages() {
    assert_eq!(avg(&array![1, 2, 3], Retriever::Identity), Some(Value::Int(2)));
    assert_eq!(avg(&array![1, 2], Retriever::Identity), Some(Value::Float(1.5)));
    assert_eq!(avg(&products(), "price"), Some(Value::Int(150)));
    assert_eq!(average(&Array::new(), Retriever::Identity), None);
  }

  #[test]
  fn medians() {
    assert_eq!(median(&array![1, 1, 2, 4], Retriever::Identity), Some(Value::Float(1.5)));
    assert_eq!(median(&array![4, 1, 3], Retriever::Identity), Some(Value::Int(3)));
    assert_eq!(median(&array![1, 3], Retriever::Identity), Some(Value::Int(2)));
    assert_eq!(median(&products(), "price"), Some(Value::Int(150)));
    assert_eq!(median(&Array::new(), Retriever::Identity), None);
  }

  #[test]
  fn median_of_non_numeric_pair_is_none() {
    assert_eq!(median(&array![array![1], array![2]], Retriever::Identity), None);
    assert_eq!(median(&array![array![1], array![2], array![3]], Retriever::Identity), Some(Value::Array(array![2])));
  }

  #[test]
  fn median_survives_cyclic_loose_order() {
    let values = array![9, "10", "1a", 9, "10", "1a", 9];
    assert!(median(&values, Retriever::Identity).is_some());
  }

  quickcheck::quickcheck! {
    fn median_of_mixed_scalars_is_an_input_or_midpoint(seeds: Vec<(u8, u8)>) -> bool {
      let values: Array = seeds
        .iter()
        .map(|&(kind, n)| {
          match kind % 3 {
            0 => Value::Int(i64::from(n)),
            1 => Value::from(n.to_string()),
            _ => Value::from(format!("{n}a")),
          }
        })
        .collect();
      match median(&values, Retriever::Identity) {
        None => values.is_empty() || values.len() % 2 == 0,
        Some(found) => values.len() % 2 == 0 || values.values().any(|value| *value == found),
      }
    }
  }

  #[test]
  fn modes() {
    assert_eq!(mode(&array![10, 10, 20, 40], Retriever::Identity), Some(array![10]));
    assert_eq!(mode(&array![1, 2, 1, 2], Retriever::Identity), Some(array![1, 2]));
    assert_eq!(mode(&Array::new(), Retriever::Identity), None);
  }

  #[test]
  fn extremes_skip_nulls() {
    let a = array![Value::Null, 3, 9, 1];
    assert_eq!(max(&a, Retriever::Identity), Some(Value::Int(9)));
    assert_eq!(min(&a, Retriever::Identity), Some(Value::Int(1)));
    assert_eq!(max(&products(), "price"), Some(Value::Int(200)));
    assert_eq!(min(&products(), "price"), Some(Value::Int(100)));
    assert_eq!(max(&Array::new(), Retriever::Identity), None);
  }
}
