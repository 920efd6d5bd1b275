use thiserror::Error;

/// Everything that can abort an invocation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("\"n\" must be a power of 2")]
    NotPowerOfTwo,

    #[error("cannot split {prefix} into {n} subnets")]
    TooManySubnets { prefix: String, n: i64 },

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}
