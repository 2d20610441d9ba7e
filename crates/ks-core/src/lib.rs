pub mod error;
pub mod types;

pub use error::KsError;
pub use types::*;
