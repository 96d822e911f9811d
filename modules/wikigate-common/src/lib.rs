pub mod config;
pub mod constants;
pub mod error;
pub mod metadata;
pub mod types;

pub use config::{Config, TagPolicy};
pub use error::WikiGateError;
pub use metadata::*;
pub use types::*;
