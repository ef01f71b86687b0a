//! Event payloads for each topic.

use interaction_core::{
    ConnectionId, ControllerId, ErrorSeverity, InteractRequest, InteractableId, InteractionId,
};
use serde::{Deserialize, Serialize};

use crate::server::DropReason;

/// An interaction that ran under server authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedEvent {
    pub connection: ConnectionId,
    pub controller: ControllerId,
    pub interactable: InteractableId,
    pub interaction: InteractionId,
    pub name: String,
    pub acknowledged: bool,
}

/// A request the server dropped without effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedEvent {
    pub connection: ConnectionId,
    pub controller: ControllerId,
    /// `None` when the frame could not be decoded.
    pub request: Option<InteractRequest>,
    pub reason: DropReason,
    pub severity: ErrorSeverity,
}
