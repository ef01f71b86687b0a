//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the world tables, and framing so
//! callers can bubble them up with consistent context. Dropped interact
//! requests are not errors here; see [`DropReason`](crate::DropReason).
use interaction_core::{ErrorSeverity, InteractableId, InteractionFault, ObjectId};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::protocol::ProtocolError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("server worker request channel closed")]
    RequestChannelClosed,

    #[error("server worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("server worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),

    #[error("object {object:?} already exposes interactable {existing}")]
    ObjectAlreadySpawned {
        object: ObjectId,
        existing: InteractableId,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("max reach configured without a position oracle")]
    MissingPositions,
}

impl InteractionFault for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ObjectAlreadySpawned { .. } => ErrorSeverity::Validation,
            Self::Protocol(e) => e.severity(),
            Self::MissingPositions => ErrorSeverity::Fatal,
            Self::RequestChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::LockPoisoned(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RequestChannelClosed => "REQUEST_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "WORKER_JOIN",
            Self::LockPoisoned(_) => "LOCK_POISONED",
            Self::ObjectAlreadySpawned { .. } => "OBJECT_ALREADY_SPAWNED",
            Self::Protocol(e) => e.error_code(),
            Self::MissingPositions => "MISSING_POSITIONS",
        }
    }
}
