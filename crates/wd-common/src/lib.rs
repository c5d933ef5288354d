//! Warden Common
//!
//! Infrastructure shared by the Warden crates and binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
