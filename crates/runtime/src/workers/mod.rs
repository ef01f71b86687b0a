//! Worker tasks that back the runtime orchestration.
//!
//! The server worker owns request handling; everything reaches it through a
//! single command channel so requests are processed one at a time in
//! arrival order.

mod server;

pub use server::{Command, ServerWorker};
