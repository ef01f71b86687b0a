//! Server-authoritative runtime for object interactions.
//!
//! This crate hosts the authoritative side of the interaction flow: the
//! directory of live interactables, the controller ownership table, the wire
//! framing of interact requests, and a server worker that validates and
//! commits those requests. Hosts embed [`Runtime`] and hand each local client
//! a [`ChannelTransport`] obtained from [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for committed and dropped requests
//! - [`server`] validates requests and runs interactions under server authority
//! - [`world`] and [`protocol`] provide the shared tables and wire format
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod world;

mod workers;

pub use api::{ChannelTransport, Result, RuntimeError, RuntimeHandle};
pub use events::{CommittedEvent, DroppedEvent, Event, EventBus, Topic};
pub use protocol::{Envelope, ProtocolError, REQUEST_FRAME_LEN, decode_request, encode_request};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use server::{
    Committed, DispatchOutcome, DropReason, InteractionServer, MaxDistance, ReachPolicy,
    Unrestricted,
};
pub use world::{InteractableDirectory, LocalOwnership, OwnershipTable};
