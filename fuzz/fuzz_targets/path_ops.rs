#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use the_arr::{
  Array,
  Value,
  path,
};

use crate::common::{
  PathOp,
  ops_from_bytes,
};

fuzz_target!(|data: &[u8]| {
  let mut array = Array::new();
  for op in ops_from_bytes(data) {
    match op {
      PathOp::Set { path, value } => {
        path::set(&mut array, &path, value.clone());
        if !path.contains(path::WILDCARD) {
          assert_eq!(path::get(&array, &path, Value::Null), value);
        }
      },
      PathOp::Forget { path } => {
        path::forget(&mut array, [path.as_str()]);
        if !path.contains(path::WILDCARD) {
          assert!(!path::has(&array, [path.as_str()]));
        }
      },
      PathOp::Pull { path } => {
        let _ = path::pull(&mut array, &path, Value::Null);
      },
      PathOp::Add { path, value } => {
        path::add(&mut array, &path, value);
      },
    }
    let _ = path::undot(&path::dot(&array));
  }
});
