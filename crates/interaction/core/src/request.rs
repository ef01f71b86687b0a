//! Client-to-server interact request payload.
use std::fmt;

use crate::ids::{InteractableId, InteractionId};

/// The only payload a client sends to have an interaction committed.
///
/// The server re-validates purely from these ids; it never trusts a claimed
/// raycast result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractRequest {
    pub interactable: InteractableId,
    pub interaction: InteractionId,
}

impl InteractRequest {
    pub const fn new(interactable: InteractableId, interaction: InteractionId) -> Self {
        Self {
            interactable,
            interaction,
        }
    }
}

impl fmt::Display for InteractRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interact({}, {})", self.interactable, self.interaction)
    }
}
