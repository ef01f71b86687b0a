//! Server-side world bookkeeping shared with host-mode clients.
//!
//! - [`InteractableDirectory`] tracks which interactables currently exist
//! - [`OwnershipTable`] tracks which connection owns which controller
//! - [`LocalOwnership`] answers ownership questions for one process
mod directory;
mod ownership;

pub use directory::InteractableDirectory;
pub use ownership::{LocalOwnership, OwnershipTable};
