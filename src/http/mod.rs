//! HTTP server module.
//!
//! Plain HTTP only. The server includes:
//! - Bind-before-serve so startup failures surface as errors
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::{Server, ServerError};
pub use shutdown::shutdown_signal;
