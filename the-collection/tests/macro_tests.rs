//! Tests for runtime-registered collection methods
//! Run with: cargo test -p the-collection --features dynamic-registry

#![cfg(feature = "dynamic-registry")]

use std::thread;

use the_arr::{
  Retriever,
  Value,
  array,
};
use the_collection::{
  Collection,
  Error,
  MacroRegistry,
  registry,
};
use the_dispatch::DispatchError;

#[test]
fn test_register_and_call_with_receiver() {
  Collection::register("to_upper", |items, _| {
    let items = items.cloned().unwrap_or_default();
    Value::from(
      items
        .map(|value, _| {
          value
            .as_str()
            .map(|text| Value::from(text.to_uppercase()))
            .unwrap_or_else(|| value.clone())
        })
        .into_inner(),
    )
  });

  assert!(Collection::has_macro("to_upper"));
  let collection = Collection::make(array!["a", "b"]);
  assert_eq!(collection.call("to_upper", Vec::new()).unwrap(), Value::from(array!["A", "B"]));
}

#[test]
fn test_call_static_without_receiver() {
  Collection::register("receiver_is_none", |items, args| {
    Value::Bool(items.is_none() && args.len() == 2)
  });

  let result = Collection::call_static("receiver_is_none", vec![Value::Int(1), Value::Int(2)]).unwrap();
  assert_eq!(result, Value::Bool(true));
}

#[test]
fn test_arguments_reach_handler() {
  Collection::register("sum_plus", |items, args| {
    let base = items
      .map(|items| items.sum(Retriever::Identity))
      .unwrap_or(Value::Int(0));
    let extra: i64 = args.iter().filter_map(Value::as_i64).sum();
    Value::Int(base.as_i64().unwrap_or(0) + extra)
  });

  let collection = Collection::make(array![1, 2, 3]);
  assert_eq!(
    collection.call("sum_plus", vec![Value::Int(4)]).unwrap(),
    Value::Int(10)
  );
}

#[test]
fn test_unknown_method_is_not_found() {
  assert!(!Collection::has_macro("never_registered"));
  let err = Collection::new()
    .call("never_registered", Vec::new())
    .unwrap_err();
  match err {
    Error::Dispatch(DispatchError::NotFound { name, .. }) => assert_eq!(name, "never_registered"),
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_reregistering_overwrites() {
  Collection::register("version", |_, _| Value::Int(1));
  Collection::register("version", |_, _| Value::Int(2));
  assert_eq!(Collection::call_static("version", Vec::new()).unwrap(), Value::Int(2));
}

#[test]
fn test_injected_registry_is_isolated() {
  let local = MacroRegistry::new();
  local.register::<Collection, _>("only_local", |_, _| Value::from("local"));

  assert!(!Collection::has_macro("only_local"));
  assert_eq!(
    Collection::call_static_in(&local, "only_local", Vec::new()).unwrap(),
    Value::from("local")
  );
}

#[test]
fn test_handler_can_call_other_macros() {
  Collection::register("inner_len", |items, _| Value::from(items.map_or(0, Collection::len)));
  Collection::register("outer_len", |items, _| {
    let Some(items) = items else {
      return Value::Null;
    };
    items.call("inner_len", Vec::new()).unwrap_or_default()
  });

  let collection = Collection::make(array![1, 2, 3, 4]);
  assert_eq!(collection.call("outer_len", Vec::new()).unwrap(), Value::from(4usize));
}

#[test]
fn test_registration_from_many_threads() {
  let workers: Vec<_> = (0..4)
    .map(|index| {
      thread::spawn(move || {
        Collection::register(format!("threaded_{index}"), move |_, _| Value::from(index as i64));
      })
    })
    .collect();
  for worker in workers {
    worker.join().unwrap();
  }

  for index in 0..4 {
    assert_eq!(
      Collection::call_static(&format!("threaded_{index}"), Vec::new()).unwrap(),
      Value::Int(index)
    );
  }
  assert!(registry().names::<Collection>().len() >= 4);
}
