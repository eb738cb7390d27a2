use the_arr::Value;

const MAX_OPS: usize = 128;
const SEGMENTS: [&str; 6] = ["a", "b", "0", "1", "name", "*"];

#[derive(Debug, Clone)]
pub enum PathOp {
  Set { path: String, value: Value },
  Forget { path: String },
  Pull { path: String },
  Add { path: String, value: Value },
}

/// Decodes `data` into a bounded list of path operations. Each op reads a tag
/// byte, a depth byte, one byte per segment and one value byte.
pub fn ops_from_bytes(data: &[u8]) -> Vec<PathOp> {
  let mut bytes = data.iter().copied();
  let mut ops = Vec::new();
  while ops.len() < MAX_OPS {
    let (Some(tag), Some(depth)) = (bytes.next(), bytes.next()) else {
      break;
    };
    let depth = depth as usize % 4 + 1;
    let segments: Vec<&str> = bytes
      .by_ref()
      .take(depth)
      .map(|byte| SEGMENTS[byte as usize % SEGMENTS.len()])
      .collect();
    let path = segments.join(".");
    let value = Value::Int(bytes.next().unwrap_or_default() as i64);
    ops.push(match tag % 4 {
      0 => PathOp::Set { path, value },
      1 => PathOp::Forget { path },
      2 => PathOp::Pull { path },
      _ => PathOp::Add { path, value },
    });
  }
  ops
}
