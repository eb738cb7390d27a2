use std::{
  cmp::Ordering,
  fmt,
  ops::{
    ControlFlow,
    Index,
  },
};

use serde::{
  Deserialize,
  Serialize,
};
use the_arr::{
  Array,
  Condition,
  Fallback,
  Key,
  Retriever,
  SortFlags,
  Value,
  aggregate,
  algebra,
  coerce::{
    Arrayable,
    IntoArray,
    Jsonable,
  },
  filter,
  json,
  path,
  sort,
  transform,
};

use crate::error::Result;

static NULL: Value = Value::Null;

/// A fluent wrapper over an [`Array`].
///
/// Query methods borrow the collection and return a new one; the few that
/// mutate in place (`push`, `put`, `forget`, `transform`, ...) take `&mut self`
/// and return it for chaining.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
  items: Array,
}

impl Collection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a collection from anything array-like. Null makes an empty
  /// collection and a scalar a single-element one.
  pub fn make(items: impl IntoArray) -> Self {
    Self {
      items: items.into_array(),
    }
  }

  pub fn wrap(value: impl Into<Value>) -> Self {
    Self::from(transform::wrap(value))
  }

  /// The items of a collection as an array value; any other value as is.
  pub fn unwrap(value: impl Into<Value>) -> Value {
    value.into()
  }

  /// `1..=count` mapped through `f`.
  pub fn times(count: usize, f: impl FnMut(i64) -> Value) -> Self {
    Self::from(transform::times_with(count, f))
  }

  pub fn from_json(document: &str) -> Result<Self> {
    Ok(Self::make(json::from_json(document)?))
  }

  pub fn all(&self) -> &Array {
    &self.items
  }

  pub fn to_array(&self) -> Array {
    self.items.clone()
  }

  pub fn into_inner(self) -> Array {
    self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn is_not_empty(&self) -> bool {
    !self.items.is_empty()
  }

  pub fn iter(&self) -> <&Array as IntoIterator>::IntoIter {
    self.items.iter()
  }

  // Paths

  pub fn get<'f>(&self, key: &str, default: impl Into<Fallback<'f>>) -> Value {
    path::get(&self.items, key, default)
  }

  pub fn has<I, S>(&self, keys: I) -> bool
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    path::has(&self.items, keys)
  }

  pub fn pluck(&self, value_path: &str, key_path: Option<&str>) -> Self {
    Self::from(path::pluck(&self.items, value_path, key_path))
  }

  pub fn collapse(&self) -> Self {
    Self::from(path::collapse(&self.items))
  }

  pub fn only<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Self {
    Self::from(path::only(&self.items, keys))
  }

  pub fn except<I, S>(&self, keys: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self::from(path::except(&self.items, keys))
  }

  pub fn dot(&self) -> Self {
    Self::from(path::dot(&self.items))
  }

  pub fn undot(&self) -> Self {
    Self::from(path::undot(&self.items))
  }

  // Filtering and searching

  pub fn filter(&self, predicate: impl FnMut(&Value, &Key) -> bool) -> Self {
    Self::from(filter::filter(&self.items, predicate))
  }

  /// Keeps truthy values.
  pub fn filter_truthy(&self) -> Self {
    Self::from(filter::filter_truthy(&self.items))
  }

  pub fn reject(&self, predicate: impl FnMut(&Value, &Key) -> bool) -> Self {
    Self::from(filter::reject(&self.items, predicate))
  }

  pub fn where_cond(&self, condition: &Condition) -> Self {
    Self::from(filter::where_cond(&self.items, condition))
  }

  pub fn where_eq(&self, key: &str, value: impl Into<Value>) -> Self {
    Self::from(filter::where_eq(&self.items, key, value))
  }

  pub fn where_op(&self, key: &str, operator: &str, value: impl Into<Value>) -> Self {
    Self::from(filter::where_op(&self.items, key, operator, value))
  }

  pub fn where_strict(&self, key: &str, value: impl Into<Value>) -> Self {
    Self::from(filter::where_strict(&self.items, key, value))
  }

  pub fn where_in(&self, key: &str, values: &[Value]) -> Self {
    Self::from(filter::where_in(&self.items, key, values, false))
  }

  pub fn where_in_strict(&self, key: &str, values: &[Value]) -> Self {
    Self::from(filter::where_in_strict(&self.items, key, values))
  }

  pub fn where_not_in(&self, key: &str, values: &[Value]) -> Self {
    Self::from(filter::where_not_in(&self.items, key, values, false))
  }

  pub fn where_not_in_strict(&self, key: &str, values: &[Value]) -> Self {
    Self::from(filter::where_not_in_strict(&self.items, key, values))
  }

  pub fn where_instance_of(&self, class: &str) -> Self {
    Self::from(filter::where_instance_of(&self.items, class))
  }

  pub fn first<'f>(&self, default: impl Into<Fallback<'f>>) -> Value {
    filter::first(&self.items, default)
  }

  pub fn first_by<'f>(
    &self,
    predicate: impl FnMut(&Value, &Key) -> bool,
    default: impl Into<Fallback<'f>>,
  ) -> Value {
    filter::first_by(&self.items, predicate, default)
  }

  pub fn first_where(&self, condition: &Condition) -> Value {
    filter::first_where(&self.items, condition)
  }

  pub fn last<'f>(&self, default: impl Into<Fallback<'f>>) -> Value {
    filter::last(&self.items, default)
  }

  pub fn last_by<'f>(
    &self,
    predicate: impl FnMut(&Value, &Key) -> bool,
    default: impl Into<Fallback<'f>>,
  ) -> Value {
    filter::last_by(&self.items, predicate, default)
  }

  pub fn contains(&self, needle: impl Into<Value>) -> bool {
    filter::contains(&self.items, &needle.into())
  }

  pub fn contains_by(&self, predicate: impl FnMut(&Value, &Key) -> bool) -> bool {
    filter::contains_by(&self.items, predicate)
  }

  pub fn contains_where(&self, condition: &Condition) -> bool {
    filter::contains_where(&self.items, condition)
  }

  pub fn contains_strict(&self, needle: impl Into<Value>) -> bool {
    filter::contains_strict(&self.items, &needle.into())
  }

  pub fn contains_strict_by(&self, predicate: impl FnMut(&Value, &Key) -> bool) -> bool {
    filter::contains_strict_by(&self.items, predicate)
  }

  pub fn doesnt_contain(&self, needle: impl Into<Value>) -> bool {
    !self.contains(needle)
  }

  pub fn every<'r>(&self, retriever: impl Into<Retriever<'r>>) -> bool {
    filter::every(&self.items, &retriever.into())
  }

  pub fn every_by(&self, predicate: impl FnMut(&Value, &Key) -> bool) -> bool {
    filter::every_by(&self.items, predicate)
  }

  pub fn every_where(&self, condition: &Condition) -> bool {
    filter::every_where(&self.items, condition)
  }

  pub fn search(&self, needle: impl Into<Value>, strict: bool) -> Option<Key> {
    filter::search(&self.items, &needle.into(), strict)
  }

  pub fn search_by(&self, predicate: impl FnMut(&Value, &Key) -> bool) -> Option<Key> {
    filter::search_by(&self.items, predicate)
  }

  /// `(failing, passing)`.
  pub fn partition(&self, predicate: impl FnMut(&Value, &Key) -> bool) -> (Self, Self) {
    let (failing, passing) = filter::partition(&self.items, predicate);
    (Self::from(failing), Self::from(passing))
  }

  pub fn partition_by<'r>(&self, retriever: impl Into<Retriever<'r>>) -> (Self, Self) {
    let (failing, passing) = filter::partition_by(&self.items, &retriever.into());
    (Self::from(failing), Self::from(passing))
  }

  pub fn partition_where(&self, condition: &Condition) -> (Self, Self) {
    let (failing, passing) = filter::partition_where(&self.items, condition);
    (Self::from(failing), Self::from(passing))
  }

  // Mapping

  pub fn map(&self, f: impl FnMut(&Value, &Key) -> Value) -> Self {
    Self::from(transform::map(&self.items, f))
  }

  pub fn flat_map(&self, f: impl FnMut(&Value, &Key) -> Value) -> Self {
    Self::from(transform::flat_map(&self.items, f))
  }

  pub fn map_with_keys(&self, f: impl FnMut(&Value, &Key) -> Array) -> Self {
    Self::from(transform::map_with_keys(&self.items, f))
  }

  pub fn map_to_groups(&self, f: impl FnMut(&Value, &Key) -> (Key, Value)) -> Self {
    Self::from(transform::map_to_groups(&self.items, f))
  }

  pub fn map_to_dictionary(&self, f: impl FnMut(&Value, &Key) -> (Key, Value)) -> Self {
    Self::from(transform::map_to_dictionary(&self.items, f))
  }

  pub fn map_spread(&self, f: impl FnMut(&[Value]) -> Value) -> Self {
    Self::from(transform::map_spread(&self.items, f))
  }

  pub fn map_into<T: From<Value>>(&self) -> Vec<T> {
    transform::map_into(&self.items)
  }

  pub fn each(&self, f: impl FnMut(&Value, &Key) -> ControlFlow<()>) -> &Self {
    transform::each(&self.items, f);
    self
  }

  pub fn each_spread(&self, f: impl FnMut(&[Value]) -> ControlFlow<()>) -> &Self {
    transform::each_spread(&self.items, f);
    self
  }

  pub fn reduce<A>(&self, initial: A, f: impl FnMut(A, &Value, &Key) -> A) -> A {
    transform::reduce(&self.items, initial, f)
  }

  pub fn key_by<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Self {
    Self::from(transform::key_by(&self.items, retriever))
  }

  pub fn group_by<'r>(&self, grouper: impl Into<Retriever<'r>>, preserve_keys: bool) -> Self {
    Self::from(transform::group_by(&self.items, &[grouper.into()], preserve_keys))
  }

  /// Nested grouping, one level per grouper.
  pub fn group_by_many(&self, groupers: &[Retriever<'_>], preserve_keys: bool) -> Self {
    Self::from(transform::group_by(&self.items, groupers, preserve_keys))
  }

  pub fn flatten(&self, depth: Option<usize>) -> Self {
    Self::from(transform::flatten(&self.items, depth))
  }

  pub fn flip(&self) -> Self {
    Self::from(transform::flip(&self.items))
  }

  pub fn keys(&self) -> Self {
    Self::from(transform::keys(&self.items))
  }

  pub fn values(&self) -> Self {
    Self::from(transform::values(&self.items))
  }

  // Reshaping

  pub fn chunk(&self, size: usize) -> Self {
    Self::from(transform::chunk(&self.items, size))
  }

  pub fn split(&self, groups: usize) -> Self {
    Self::from(transform::split(&self.items, groups))
  }

  pub fn for_page(&self, page: usize, per_page: usize) -> Self {
    Self::from(transform::for_page(&self.items, page, per_page))
  }

  pub fn nth(&self, step: usize, offset: usize) -> Self {
    Self::from(transform::nth(&self.items, step, offset))
  }

  pub fn slice(&self, offset: i64, length: Option<i64>) -> Self {
    Self::from(transform::slice(&self.items, offset, length))
  }

  pub fn skip(&self, count: usize) -> Self {
    self.slice(transform::clamped(count), None)
  }

  pub fn take(&self, limit: i64) -> Self {
    Self::from(transform::take(&self.items, limit))
  }

  pub fn pad(&self, size: i64, value: impl Into<Value>) -> Self {
    Self::from(transform::pad(&self.items, size, &value.into()))
  }

  pub fn reverse(&self) -> Self {
    Self::from(transform::reverse(&self.items))
  }

  pub fn unique<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Self {
    Self::from(transform::unique(&self.items, retriever, false))
  }

  pub fn unique_strict<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Self {
    Self::from(transform::unique_strict(&self.items, retriever))
  }

  pub fn shuffle(&self, seed: Option<u64>) -> Self {
    Self::from(transform::shuffle(&self.items, seed))
  }

  pub fn random(&self, seed: Option<u64>) -> Option<Value> {
    transform::random(&self.items, seed)
  }

  pub fn random_many(&self, count: usize, seed: Option<u64>) -> Result<Self> {
    Ok(Self::from(transform::random_many(&self.items, count, seed)?))
  }

  pub fn implode(&self, glue: &str) -> String {
    transform::implode(&self.items, glue)
  }

  pub fn implode_by(&self, path: &str, glue: &str) -> String {
    transform::implode_by(&self.items, path, glue)
  }

  // Combining

  /// Zips this collection with `others` by position.
  pub fn zip(&self, others: &[&Collection]) -> Self {
    Self::from(transform::zip(&self.with_others(others)))
  }

  pub fn cross_join(&self, others: &[&Collection]) -> Self {
    Self::from(transform::cross_join(&self.with_others(others)))
  }

  fn with_others<'a>(&'a self, others: &[&'a Collection]) -> Vec<&'a Array> {
    std::iter::once(&self.items)
      .chain(others.iter().map(|other| &other.items))
      .collect()
  }

  /// Uses this collection's values as keys for `values`.
  pub fn combine(&self, values: impl IntoArray) -> Result<Self> {
    Ok(Self::from(transform::combine(&self.items, &values.into_array())?))
  }

  pub fn concat(&self, source: impl IntoArray) -> Self {
    Self::from(transform::concat(&self.items, &source.into_array()))
  }

  pub fn union(&self, other: impl IntoArray) -> Self {
    Self::from(algebra::union(&self.items, &other.into_array()))
  }

  pub fn merge(&self, other: impl IntoArray) -> Self {
    Self::from(algebra::merge(&self.items, &other.into_array()))
  }

  pub fn diff(&self, other: impl IntoArray) -> Self {
    Self::from(algebra::diff(&self.items, &other.into_array()))
  }

  pub fn diff_using(&self, other: impl IntoArray, cmp: impl FnMut(&Value, &Value) -> Ordering) -> Self {
    Self::from(algebra::diff_using(&self.items, &other.into_array(), cmp))
  }

  pub fn diff_assoc(&self, other: impl IntoArray) -> Self {
    Self::from(algebra::diff_assoc(&self.items, &other.into_array()))
  }

  pub fn diff_assoc_using(&self, other: impl IntoArray, key_cmp: impl FnMut(&Key, &Key) -> Ordering) -> Self {
    Self::from(algebra::diff_assoc_using(&self.items, &other.into_array(), key_cmp))
  }

  pub fn diff_keys(&self, other: impl IntoArray) -> Self {
    Self::from(algebra::diff_keys(&self.items, &other.into_array()))
  }

  pub fn diff_keys_using(&self, other: impl IntoArray, key_cmp: impl FnMut(&Key, &Key) -> Ordering) -> Self {
    Self::from(algebra::diff_keys_using(&self.items, &other.into_array(), key_cmp))
  }

  pub fn intersect(&self, other: impl IntoArray) -> Self {
    Self::from(algebra::intersect(&self.items, &other.into_array()))
  }

  pub fn intersect_by_keys(&self, other: impl IntoArray) -> Self {
    Self::from(algebra::intersect_by_keys(&self.items, &other.into_array()))
  }

  // Sorting

  pub fn sort(&self) -> Self {
    Self::from(sort::sort(&self.items))
  }

  pub fn sort_desc(&self) -> Self {
    Self::from(sort::sort_desc(&self.items))
  }

  pub fn sort_with(&self, cmp: impl FnMut(&Value, &Value) -> Ordering) -> Self {
    Self::from(sort::sort_with(&self.items, cmp))
  }

  pub fn sort_by<'r>(&self, retriever: impl Into<Retriever<'r>>, flags: SortFlags) -> Self {
    Self::from(sort::sort_by(&self.items, retriever, flags, false))
  }

  pub fn sort_by_desc<'r>(&self, retriever: impl Into<Retriever<'r>>, flags: SortFlags) -> Self {
    Self::from(sort::sort_by_desc(&self.items, retriever, flags))
  }

  pub fn sort_keys(&self, flags: SortFlags) -> Self {
    Self::from(sort::sort_keys(&self.items, flags, false))
  }

  pub fn sort_keys_desc(&self, flags: SortFlags) -> Self {
    Self::from(sort::sort_keys_desc(&self.items, flags))
  }

  pub fn sort_recursive(&self) -> Self {
    Self::from(sort::sort_recursive(&self.items))
  }

  // Aggregates

  pub fn sum<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Value {
    aggregate::sum(&self.items, retriever)
  }

  pub fn avg<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
    aggregate::avg(&self.items, retriever)
  }

  pub fn average<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
    aggregate::average(&self.items, retriever)
  }

  pub fn median<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
    aggregate::median(&self.items, retriever)
  }

  pub fn mode<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Option<Self> {
    aggregate::mode(&self.items, retriever).map(Self::from)
  }

  pub fn max<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
    aggregate::max(&self.items, retriever)
  }

  pub fn min<'r>(&self, retriever: impl Into<Retriever<'r>>) -> Option<Value> {
    aggregate::min(&self.items, retriever)
  }

  // In-place

  pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
    self.items.push(value);
    self
  }

  /// Stores `value` under a top-level `key`, without path expansion.
  pub fn put(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
    self.items.insert(key, value);
    self
  }

  /// Stores `value` at a dot path, creating intermediate arrays.
  pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
    path::set(&mut self.items, key, value);
    self
  }

  pub fn prepend(&mut self, value: impl Into<Value>, key: Option<Key>) -> &mut Self {
    self.items = transform::prepend(&self.items, value, key);
    self
  }

  pub fn forget<I, S>(&mut self, keys: I) -> &mut Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    path::forget(&mut self.items, keys);
    self
  }

  pub fn pop(&mut self) -> Option<Value> {
    self.items.pop()
  }

  pub fn shift(&mut self) -> Option<Value> {
    self.items.shift()
  }

  pub fn pull<'f>(&mut self, key: &str, default: impl Into<Fallback<'f>>) -> Value {
    path::pull(&mut self.items, key, default)
  }

  /// Removes a positional range, returning it. See
  /// [`transform::splice`](the_arr::transform::splice).
  pub fn splice(&mut self, offset: i64, length: Option<i64>, replacement: impl IntoIterator<Item = Value>) -> Self {
    Self::from(transform::splice(&mut self.items, offset, length, replacement))
  }

  /// Replaces every value with `f`'s result, keeping keys.
  pub fn transform(&mut self, mut f: impl FnMut(&Value, &Key) -> Value) -> &mut Self {
    for (key, value) in self.items.iter_mut() {
      *value = f(value, key);
    }
    self
  }

  // Flow

  pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
    if condition { f(self) } else { self }
  }

  pub fn unless(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
    self.when(!condition, f)
  }

  pub fn pipe<T>(&self, f: impl FnOnce(&Self) -> T) -> T {
    f(self)
  }

  pub fn tap(self, f: impl FnOnce(&Self)) -> Self {
    f(&self);
    self
  }

  // Output

  pub fn to_json(&self) -> Result<String> {
    Ok(json::to_json(&self.items)?)
  }

  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(json::to_json_pretty(&self.items)?)
  }
}

impl fmt::Debug for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Collection").field(&self.items).finish()
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match json::to_json(&self.items) {
      Ok(document) => f.write_str(&document),
      Err(err) => {
        tracing::warn!(%err, "failed to encode collection");
        Err(fmt::Error)
      },
    }
  }
}

impl Index<&str> for Collection {
  type Output = Value;

  /// The top-level entry under `key`, or null.
  fn index(&self, key: &str) -> &Value {
    self.items.get(&Key::parse(key)).unwrap_or(&NULL)
  }
}

impl Index<i64> for Collection {
  type Output = Value;

  fn index(&self, key: i64) -> &Value {
    self.items.get(&Key::Int(key)).unwrap_or(&NULL)
  }
}

impl From<Array> for Collection {
  fn from(items: Array) -> Self {
    Self { items }
  }
}

impl From<Collection> for Array {
  fn from(collection: Collection) -> Self {
    collection.items
  }
}

impl From<Collection> for Value {
  fn from(collection: Collection) -> Self {
    Value::Array(collection.items)
  }
}

impl From<serde_json::Value> for Collection {
  fn from(json: serde_json::Value) -> Self {
    Self::make(json)
  }
}

impl IntoArray for Collection {
  fn into_array(self) -> Array {
    self.items
  }
}

impl IntoArray for &Collection {
  fn into_array(self) -> Array {
    self.items.clone()
  }
}

impl Arrayable for Collection {
  fn to_array(&self) -> Array {
    self.items.clone()
  }
}

impl Jsonable for Collection {
  fn to_json(&self) -> the_arr::Result<String> {
    json::to_json(&self.items)
  }
}

impl FromIterator<Value> for Collection {
  fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
    Self::from(iter.into_iter().collect::<Array>())
  }
}

impl FromIterator<(Key, Value)> for Collection {
  fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
    Self::from(iter.into_iter().collect::<Array>())
  }
}

impl Extend<Value> for Collection {
  fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
    self.items.extend(iter);
  }
}

impl Extend<(Key, Value)> for Collection {
  fn extend<I: IntoIterator<Item = (Key, Value)>>(&mut self, iter: I) {
    self.items.extend(iter);
  }
}

impl IntoIterator for Collection {
  type Item = (Key, Value);
  type IntoIter = <Array as IntoIterator>::IntoIter;

  fn into_iter(self) -> Self::IntoIter {
    self.items.into_iter()
  }
}

impl<'a> IntoIterator for &'a Collection {
  type Item = (&'a Key, &'a Value);
  type IntoIter = <&'a Array as IntoIterator>::IntoIter;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}

#[cfg(test)]
mod tests {
  use the_arr::array;

  use super::*;

  fn products() -> Collection {
    Collection::make(array![
      array!["name" => "Desk", "price" => 200, "category" => "office"],
      array!["name" => "Chair", "price" => 100, "category" => "office"],
      array!["name" => "Lamp", "price" => 40, "category" => "home"],
    ])
  }

  #[test]
  fn make_normalizes_input() {
    assert!(Collection::make(Value::Null).is_empty());
    assert_eq!(Collection::make(Value::from("a")).all(), &array!["a"]);
    assert_eq!(Collection::wrap(array![1, 2]).len(), 2);
    assert_eq!(Collection::times(3, |n| Value::Int(n * 10)).all(), &array![10, 20, 30]);
  }

  #[test]
  fn chained_queries() {
    let names = products()
      .where_eq("category", "office")
      .sort_by("price", SortFlags::Regular)
      .pluck("name", None)
      .values();
    assert_eq!(names.all(), &array!["Chair", "Desk"]);
  }

  #[test]
  fn aggregates_over_paths() {
    let products = products();
    assert_eq!(products.sum("price"), Value::Int(340));
    assert_eq!(products.max("price"), Some(Value::Int(200)));
    assert_eq!(products.median("price"), Some(Value::Int(100)));
    assert_eq!(Collection::new().avg(Retriever::Identity), None);
  }

  #[test]
  fn in_place_mutators_chain() {
    let mut collection = Collection::make(array![1, 2]);
    collection.push(3).put("name", "x").prepend(0, None);
    assert_eq!(collection.all(), &array![0 => 0, 1 => 1, 2 => 2, 3 => 3, "name" => "x"]);

    collection.forget(["name"]);
    assert_eq!(collection.pop(), Some(Value::Int(3)));
    assert_eq!(collection.shift(), Some(Value::Int(0)));
    assert_eq!(collection.all(), &array![1, 2]);

    collection.transform(|value, _| Value::Int(value.as_i64().unwrap_or(0) * 2));
    assert_eq!(collection.all(), &array![2, 4]);
  }

  #[test]
  fn pull_removes_nested_value() {
    let mut collection = Collection::make(array!["a" => array!["b" => 1, "c" => 2]]);
    assert_eq!(collection.pull("a.b", Value::Null), Value::Int(1));
    assert_eq!(collection.all(), &array!["a" => array!["c" => 2]]);
    assert_eq!(collection.pull("a.b", "gone"), Value::from("gone"));
  }

  #[test]
  fn when_and_unless() {
    let collection = Collection::make(array![1])
      .when(true, |c| c.concat(array![2]))
      .unless(true, |c| c.concat(array![3]));
    assert_eq!(collection.all(), &array![1, 2]);
    assert_eq!(collection.pipe(Collection::len), 2);
  }

  #[test]
  fn indexing_falls_back_to_null() {
    let collection = Collection::make(array!["a" => 1, 0 => "zero"]);
    assert_eq!(collection["a"], Value::Int(1));
    assert_eq!(collection[0], Value::from("zero"));
    assert_eq!(collection["0"], Value::from("zero"));
    assert!(collection["missing"].is_null());
  }

  #[test]
  fn display_is_json() {
    let collection = Collection::make(array!["a" => 1, "b" => array![true]]);
    assert_eq!(collection.to_string(), r#"{"a":1,"b":[true]}"#);
    let decoded = Collection::from_json(&collection.to_string()).unwrap();
    assert_eq!(decoded, collection);
  }

  #[test]
  fn combine_reports_length_mismatch() {
    let keys = Collection::make(array!["a", "b"]);
    assert_eq!(keys.combine(array![1, 2]).unwrap().all(), &array!["a" => 1, "b" => 2]);
    assert!(keys.combine(array![1]).is_err());
  }

  #[test]
  fn zip_includes_self() {
    let a = Collection::make(array![1, 2]);
    let b = Collection::make(array!["x", "y"]);
    assert_eq!(a.zip(&[&b]).all(), &array![array![1, "x"], array![2, "y"]]);
  }
}
