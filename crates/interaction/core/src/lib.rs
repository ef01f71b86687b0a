//! Interaction registries and authority rules shared by every process role.
//!
//! `interaction-core` defines what an interactable object offers
//! ([`Interactable`], [`InteractionRegistry`], [`Interaction`]), how the
//! offered capabilities are guarded against double execution in host mode
//! ([`AuthorityDispatcher`]), and the traits through which external
//! collaborators (raycasting, ownership, UI, transport) are consumed.
//! Nothing here performs I/O; the runtime and frontend crates build on it.
pub mod authority;
pub mod env;
pub mod error;
pub mod ids;
pub mod interaction;
pub mod registry;
pub mod request;

pub use authority::{AuthorityDispatcher, GuardedCapability, RawCapability, Role};
pub use env::{
    InteractableLookup, OwnershipOracle, PositionOracle, PromptSink, RequestSink, SpatialQuery,
    SurfaceHit,
};
pub use error::{ErrorSeverity, InteractionFault, RegistryError, TransportError};
pub use ids::{
    ConnectionId, ControllerId, InteractableId, InteractableIdAllocator, InteractionId, ObjectId,
    SurfaceId,
};
pub use interaction::Interaction;
pub use registry::{Interactable, InteractionRegistry};
pub use request::InteractRequest;
