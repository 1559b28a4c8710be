use thiserror::Error;

use crate::model::{ContentError, UserError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    User(#[from] UserError),
}
