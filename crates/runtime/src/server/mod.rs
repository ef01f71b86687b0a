//! Authoritative side of the interact protocol.
//!
//! [`InteractionServer`] re-validates every request purely from the ids it
//! carries plus server-side ownership and existence, then runs the
//! interaction under [`Role::Server`](interaction_core::Role::Server). That
//! invocation is the only place gameplay state is committed.
mod handler;
mod reach;

pub use handler::{Committed, DispatchOutcome, DropReason, InteractionServer};
pub use reach::{MaxDistance, ReachPolicy, Unrestricted};
