use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid argument: {0}")]
  InvalidArgument(String),
  #[error("unsupported comparison operator `{0}`")]
  InvalidOperator(String),
  #[error("cannot combine {keys} keys with {values} values")]
  LengthMismatch { keys: usize, values: usize },
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
