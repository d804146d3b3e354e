use thiserror::Error;

#[derive(Debug, Error)]
pub enum MphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("duplicate key detected during build")]
    DuplicateKey,
    #[error("no acyclic graph found after {attempts} attempts")]
    MaxRetriesExceeded { attempts: u32 },
    /// Displacement assignment hit a state reverse peeling order rules out.
    #[error("internal invariant violated: {0}")]
    Internal(String),
    #[error("key {index} maps to {value}, outside [0, {n})")]
    OutOfRange { index: usize, value: u64, n: u64 },
    #[error("keys {first} and {second} both map to {value}")]
    Collision {
        first: usize,
        second: usize,
        value: u64,
    },
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] Box<bincode::ErrorKind>),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed table: {0}")]
    Format(&'static str),
}
