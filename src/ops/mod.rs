//! High-level operations.
//!
//! These are the entry points used by the CLI commands.

pub mod errors;
pub mod load;
pub mod register;
pub mod status;

pub use errors::LoadError;
pub use load::{load, load_into_host, LoadOptions, LoadReport};
pub use register::register;
pub use status::{status, StatusReport};
