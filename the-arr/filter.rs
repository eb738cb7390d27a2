//! Selection, searching and membership tests.
//!
//! Filters keep the keys of the surviving entries. Predicates receive
//! `(value, key)`.

use crate::{
  array::Array,
  compare::{
    contains_value,
    loose_eq,
    strict_eq,
  },
  condition::Condition,
  path,
  retrieve::{
    Fallback,
    Retriever,
    resolve_fallback,
  },
  value::{
    Key,
    Value,
  },
};

pub fn filter(array: &Array, mut predicate: impl FnMut(&Value, &Key) -> bool) -> Array {
  array
    .iter()
    .filter(|&(key, value)| predicate(value, key))
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect()
}

/// Keeps truthy values.
pub fn filter_truthy(array: &Array) -> Array {
  filter(array, |value, _| value.truthy())
}

pub fn reject(array: &Array, mut predicate: impl FnMut(&Value, &Key) -> bool) -> Array {
  filter(array, |value, key| !predicate(value, key))
}

/// Drops every value loosely equal to `needle`.
pub fn reject_value(array: &Array, needle: &Value) -> Array {
  filter(array, |value, _| !loose_eq(value, needle))
}

pub fn where_cond(array: &Array, condition: &Condition) -> Array {
  filter(array, |value, _| condition.matches(value))
}

pub fn where_eq(array: &Array, key: &str, value: impl Into<Value>) -> Array {
  where_cond(array, &Condition::eq(key, value))
}

pub fn where_op(array: &Array, key: &str, operator: &str, value: impl Into<Value>) -> Array {
  where_cond(array, &Condition::new(key, operator, value))
}

pub fn where_strict(array: &Array, key: &str, value: impl Into<Value>) -> Array {
  where_cond(array, &Condition::strict(key, value))
}

/// Keeps elements whose `key` is among `values`.
pub fn where_in(array: &Array, key: &str, values: &[Value], strict: bool) -> Array {
  filter(array, |item, _| {
    contains_value(values, &path::get(item, key, Value::Null), strict)
  })
}

pub fn where_in_strict(array: &Array, key: &str, values: &[Value]) -> Array {
  where_in(array, key, values, true)
}

pub fn where_not_in(array: &Array, key: &str, values: &[Value], strict: bool) -> Array {
  reject(array, |item, _| {
    contains_value(values, &path::get(item, key, Value::Null), strict)
  })
}

pub fn where_not_in_strict(array: &Array, key: &str, values: &[Value]) -> Array {
  where_not_in(array, key, values, true)
}

/// Keeps objects of class `class`.
pub fn where_instance_of(array: &Array, class: &str) -> Array {
  filter(array, |value, _| {
    value
      .as_object()
      .is_some_and(|object| object.is_instance_of(class))
  })
}

pub fn first<'f>(array: &Array, default: impl Into<Fallback<'f>>) -> Value {
  match array.first() {
    Some((_, value)) => value.clone(),
    None => resolve_fallback(default),
  }
}

pub fn first_by<'f>(
  array: &Array,
  mut predicate: impl FnMut(&Value, &Key) -> bool,
  default: impl Into<Fallback<'f>>,
) -> Value {
  match array.iter().find(|&(key, value)| predicate(value, key)) {
    Some((_, value)) => value.clone(),
    None => resolve_fallback(default),
  }
}

/// The first element matching `condition`, or null.
pub fn first_where(array: &Array, condition: &Condition) -> Value {
  first_by(array, |value, _| condition.matches(value), Value::Null)
}

pub fn last<'f>(array: &Array, default: impl Into<Fallback<'f>>) -> Value {
  match array.last() {
    Some((_, value)) => value.clone(),
    None => resolve_fallback(default),
  }
}

pub fn last_by<'f>(
  array: &Array,
  mut predicate: impl FnMut(&Value, &Key) -> bool,
  default: impl Into<Fallback<'f>>,
) -> Value {
  match array.iter().rev().find(|&(key, value)| predicate(value, key)) {
    Some((_, value)) => value.clone(),
    None => resolve_fallback(default),
  }
}

/// Loose membership.
pub fn contains(array: &Array, needle: &Value) -> bool {
  contains_value(array.values(), needle, false)
}

pub fn contains_by(array: &Array, mut predicate: impl FnMut(&Value, &Key) -> bool) -> bool {
  array.iter().any(|(key, value)| predicate(value, key))
}

pub fn contains_where(array: &Array, condition: &Condition) -> bool {
  array.values().any(|value| condition.matches(value))
}

/// Strict membership.
pub fn contains_strict(array: &Array, needle: &Value) -> bool {
  contains_value(array.values(), needle, true)
}

/// True when some element matches `predicate` and is not null.
pub fn contains_strict_by(array: &Array, predicate: impl FnMut(&Value, &Key) -> bool) -> bool {
  !first_by(array, predicate, Value::Null).is_null()
}

/// True when some element's `key` is identical to `value`.
pub fn contains_strict_where(array: &Array, key: &str, value: &Value) -> bool {
  array
    .values()
    .any(|item| strict_eq(&path::get(item, key, Value::Null), value))
}

/// True when `retriever` yields a truthy value for every element.
pub fn every(array: &Array, retriever: &Retriever<'_>) -> bool {
  array
    .iter()
    .all(|(key, value)| retriever.resolve(value, key).truthy())
}

pub fn every_by(array: &Array, mut predicate: impl FnMut(&Value, &Key) -> bool) -> bool {
  array.iter().all(|(key, value)| predicate(value, key))
}

pub fn every_where(array: &Array, condition: &Condition) -> bool {
  array.values().all(|value| condition.matches(value))
}

/// The key of the first value equal to `needle`.
pub fn search(array: &Array, needle: &Value, strict: bool) -> Option<Key> {
  array
    .iter()
    .find(|&(_, value)| {
      if strict {
        strict_eq(value, needle)
      } else {
        loose_eq(value, needle)
      }
    })
    .map(|(key, _)| key.clone())
}

pub fn search_by(array: &Array, mut predicate: impl FnMut(&Value, &Key) -> bool) -> Option<Key> {
  array
    .iter()
    .find(|&(key, value)| predicate(value, key))
    .map(|(key, _)| key.clone())
}

/// Splits `array` into `(failing, passing)`, both keeping their keys.
pub fn partition(array: &Array, mut predicate: impl FnMut(&Value, &Key) -> bool) -> (Array, Array) {
  let mut failing = Array::new();
  let mut passing = Array::new();
  for (key, value) in array {
    let bucket = if predicate(value, key) {
      &mut passing
    } else {
      &mut failing
    };
    bucket.insert(key.clone(), value.clone());
  }
  (failing, passing)
}

pub fn partition_by(array: &Array, retriever: &Retriever<'_>) -> (Array, Array) {
  partition(array, |value, key| retriever.resolve(value, key).truthy())
}

pub fn partition_where(array: &Array, condition: &Condition) -> (Array, Array) {
  partition(array, |value, _| condition.matches(value))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    array,
    value::Object,
  };

  fn products() -> Array {
    array![
      array!["name" => "Desk", "price" => 200],
      array!["name" => "Chair", "price" => 100],
      array!["name" => "Bookcase", "price" => 150],
      array!["name" => "Door", "price" => 100],
    ]
  }

  fn keys(array: &Array) -> Vec<Key> {
    array.keys().cloned().collect()
  }

  #[test]
  fn filter_truthy_drops_falsy_and_keeps_keys() {
    let a = array![1, Value::Null, false, "", 0, Array::new(), "0", "a"];
    assert_eq!(filter_truthy(&a), array![0 => 1, 7 => "a"]);
  }

  #[test]
  fn reject_loose_true() {
    let a = array![1, "1", true, false, Value::Null, "", 0, "0"];
    assert_eq!(
      reject_value(&a, &Value::Bool(true)),
      array![3 => false, 4 => Value::Null, 5 => "", 6 => 0, 7 => "0"]
    );
  }

  #[test]
  fn where_family() {
    let p = products();
    assert_eq!(keys(&where_eq(&p, "price", 100)), vec![Key::Int(1), Key::Int(3)]);
    assert_eq!(keys(&where_op(&p, "price", ">", 100)), vec![Key::Int(0), Key::Int(2)]);
    assert_eq!(keys(&where_strict(&p, "price", "100")), Vec::<Key>::new());
  }

  #[test]
  fn where_in_loose_and_strict() {
    let p = products();
    let wanted = [Value::Int(150), Value::Int(200)];
    assert_eq!(keys(&where_in(&p, "price", &wanted, false)), vec![Key::Int(0), Key::Int(2)]);

    let mixed = [Value::from("150"), Value::Int(200)];
    assert_eq!(keys(&where_in_strict(&p, "price", &mixed)), vec![Key::Int(0)]);
    assert_eq!(
      keys(&where_not_in_strict(&p, "price", &mixed)),
      vec![Key::Int(1), Key::Int(2), Key::Int(3)]
    );
    assert_eq!(keys(&where_not_in(&p, "price", &mixed, false)), vec![Key::Int(1), Key::Int(3)]);
  }

  #[test]
  fn where_instance_of_class() {
    let a = array![Object::new("User"), "user", Object::new("Post")];
    assert_eq!(keys(&where_instance_of(&a, "User")), vec![Key::Int(0)]);
  }

  #[test]
  fn first_and_last() {
    let a = array![100, 200, 300];
    assert_eq!(first(&a, Value::Null), Value::Int(100));
    assert_eq!(last(&a, Value::Null), Value::Int(300));
    assert_eq!(first_by(&a, |v, _| v.as_i64() > Some(150), Value::Null), Value::Int(200));
    assert_eq!(last_by(&a, |v, _| v.as_i64() < Some(250), Value::Null), Value::Int(200));
    assert_eq!(first_by(&a, |_, _| false, "none"), Value::from("none"));
    assert_eq!(
      last(&Array::new(), Fallback::lazy(|| Value::from("lazy"))),
      Value::from("lazy")
    );
  }

  #[test]
  fn first_where_condition() {
    let p = products();
    assert_eq!(
      first_where(&p, &Condition::new("price", "<", 150)),
      Value::from(array!["name" => "Chair", "price" => 100])
    );
    assert_eq!(first_where(&p, &Condition::eq("price", 1)), Value::Null);
  }

  #[test]
  fn containment() {
    let a = array![1, 2, "3"];
    assert!(contains(&a, &Value::Int(3)));
    assert!(!contains_strict(&a, &Value::Int(3)));
    assert!(contains_strict(&a, &Value::from("3")));
    assert!(contains_by(&a, |v, _| v.as_i64() == Some(2)));

    let p = products();
    assert!(contains_where(&p, &Condition::eq("name", "Desk")));
    assert!(contains_strict_where(&p, "price", &Value::Int(150)));
    assert!(!contains_strict_where(&p, "price", &Value::from("150")));
  }

  #[test]
  fn contains_strict_by_ignores_null_matches() {
    let a = array![Value::Null, 1];
    assert!(!contains_strict_by(&a, |v, _| v.is_null()));
    assert!(contains_strict_by(&a, |v, _| v.as_i64() == Some(1)));
  }

  #[test]
  fn every_variants() {
    let p = products();
    assert!(every(&p, &Retriever::from("price")));
    assert!(!every(&p, &Retriever::from("stock")));
    assert!(every_where(&p, &Condition::new("price", ">=", 100)));
    assert!(every_by(&array![2, 4], |v, _| v.as_i64().is_some_and(|n| n % 2 == 0)));
    assert!(every_where(&Array::new(), &Condition::eq("x", 1)));
  }

  #[test]
  fn search_keys() {
    let a = array!["a" => 1, "b" => "2", "c" => 2];
    assert_eq!(search(&a, &Value::Int(2), false), Some(Key::from("b")));
    assert_eq!(search(&a, &Value::Int(2), true), Some(Key::from("c")));
    assert_eq!(search(&a, &Value::Int(9), false), None);
    assert_eq!(search_by(&a, |v, _| v.is_string()), Some(Key::from("b")));
  }

  #[test]
  fn partition_puts_failing_first() {
    let a = array![1, 2, 3, 4, 5];
    let (odd, even) = partition(&a, |v, _| v.as_i64().is_some_and(|n| n % 2 == 0));
    assert_eq!(odd, array![0 => 1, 2 => 3, 4 => 5]);
    assert_eq!(even, array![1 => 2, 3 => 4]);

    let (cheap, pricey) = partition_where(&products(), &Condition::new("price", ">", 120));
    assert_eq!(keys(&cheap), vec![Key::Int(1), Key::Int(3)]);
    assert_eq!(keys(&pricey), vec![Key::Int(0), Key::Int(2)]);
  }

  #[test]
  fn partition_by_truthiness() {
    let a = array![array!["active" => true], array!["active" => false]];
    let (inactive, active) = partition_by(&a, &Retriever::from("active"));
    assert_eq!(keys(&inactive), vec![Key::Int(1)]);
    assert_eq!(keys(&active), vec![Key::Int(0)]);
  }

  quickcheck::quickcheck! {
    fn partition_is_a_permutation(values: Vec<i64>) -> bool {
      let a: Array = values.iter().copied().map(Value::Int).collect();
      let (failing, passing) = partition(&a, |v, _| v.as_i64().is_some_and(|n| n > 0));
      let mut rebuilt: Vec<Key> = failing.keys().chain(passing.keys()).cloned().collect();
      rebuilt.sort();
      failing.values().all(|v| v.as_i64().is_some_and(|n| n <= 0))
        && passing.values().all(|v| v.as_i64().is_some_and(|n| n > 0))
        && rebuilt == a.keys().cloned().collect::<Vec<_>>()
    }
  }
}
