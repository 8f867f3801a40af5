//! Error type for the filesystem collaborators and settings loading.
//!
//! The completion engine itself never errors: missing directories and empty
//! candidate sets degrade to empty results.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not move to trash: {0}")]
    Trash(#[from] trash::Error),

    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),
}
