#![no_main]

use libfuzzer_sys::fuzz_target;
use the_arr::json;

fuzz_target!(|data: &[u8]| {
  let Ok(document) = std::str::from_utf8(data) else {
    return;
  };
  let Ok(value) = json::from_json(document) else {
    return;
  };
  let encoded = json::to_json(&value).expect("decoded values encode");
  let _ = json::from_json(&encoded).expect("encoded values decode");
});
