//! Traits describing capabilities this crate consumes but never implements.
//!
//! Raycasting, object lookup, ownership, UI, positions, and the network
//! transport all live in collaborators. The core only talks to them through
//! these traits so the same registry and tracker code runs unchanged on a
//! client, a dedicated server, or a host.
mod lookup;
mod ownership;
mod position;
mod prompt;
mod spatial;
mod transport;

pub use lookup::InteractableLookup;
pub use ownership::OwnershipOracle;
pub use position::PositionOracle;
pub use prompt::PromptSink;
pub use spatial::{SpatialQuery, SurfaceHit};
pub use transport::RequestSink;
