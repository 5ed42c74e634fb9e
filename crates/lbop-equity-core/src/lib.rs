pub mod config;
pub mod error;
pub mod fees;
pub mod pricing;
pub mod types;

#[cfg(feature = "statements")]
pub mod statements;

pub use error::LbopError;
pub use types::*;

/// Standard result type for all lbop-equity operations
pub type LbopResult<T> = Result<T, LbopError>;
