pub mod config;
pub mod error;
pub mod facts;
pub mod types;

#[cfg(feature = "extraction")]
pub mod extraction;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "scoring")]
pub mod reporting;

#[cfg(all(feature = "extraction", feature = "scoring"))]
pub mod analysis;

pub use config::EwsConfig;
pub use error::EwsError;
pub use facts::{Concept, FactsMap};
pub use types::*;

/// Standard result type for all ews operations
pub type EwsResult<T> = Result<T, EwsError>;
