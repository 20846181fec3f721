use std::sync::PoisonError;

use failure::Fail;
use rayon::ThreadPoolBuildError;

/// The result type used in the `Store` context.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The error type of the `Store` context.
///
/// Each variant that a client may branch on carries a stable code,
/// see [`StoreError::code`]. The display text is free to change,
/// the code is not.
#[derive(Debug, Fail)]
pub enum StoreError {
    /// the source key of a rename was not present.
    #[fail(display = "no such key")]
    NoSuchKey,
    /// a hash operation hit a key holding a value of another type.
    #[fail(display = "key {} holds a value of the wrong type", key)]
    WrongType {
        /// the key that holds the conflicting value.
        key: String,
    },
    /// when operating with a lock, something bad happened.
    #[fail(display = "a lock over the store was poisoned")]
    ConcurrentError,
    /// failed to build a rayon thread pool.
    #[fail(display = "failed to build a rayon thread pool: {}", error)]
    RayonThreadPoolFailedToBuild {
        #[cause]
        /// the original rayon exception.
        error: ThreadPoolBuildError,
    },
}

impl StoreError {
    /// the stable machine-readable code of this error,
    /// as sent to clients in `ERROR: <CODE>` replies.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NoSuchKey => "NO_SUCH_KEY",
            StoreError::WrongType { .. } => "WRONGTYPE",
            StoreError::ConcurrentError => "CONCURRENT",
            StoreError::RayonThreadPoolFailedToBuild { .. } => "INTERNAL",
        }
    }
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::ConcurrentError
    }
}

impl From<ThreadPoolBuildError> for StoreError {
    fn from(error: ThreadPoolBuildError) -> Self {
        StoreError::RayonThreadPoolFailedToBuild { error }
    }
}
