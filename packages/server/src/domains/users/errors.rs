use thiserror::Error;

use crate::kernel::StoreError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("invalid user record: {0}")]
    Invalid(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}
