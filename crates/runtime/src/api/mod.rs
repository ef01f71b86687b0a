//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on the server worker and world tables.

pub mod errors;
pub mod handle;
pub mod transport;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use transport::ChannelTransport;
