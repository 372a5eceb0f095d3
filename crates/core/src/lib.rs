// fuzzctl Core - Domain Logic & Ports
// NO transport dependencies: the SDK crate adapts the ports to HTTP

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
