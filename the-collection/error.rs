use the_dispatch::DispatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Arr(#[from] the_arr::Error),
  #[error(transparent)]
  Dispatch(#[from] DispatchError),
}

pub type Result<T> = std::result::Result<T, Error>;
