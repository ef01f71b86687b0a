//! In-process transport from a client to the server worker.

use interaction_core::{ConnectionId, ControllerId, InteractRequest, RequestSink, TransportError};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;

use crate::protocol::{Envelope, encode_request};
use crate::workers::Command;

/// [`RequestSink`] bound to one connection and the controller it acts for.
///
/// Frames are encoded exactly as they would be for a network link and queued
/// without waiting, so it can be called from a synchronous input handler.
#[derive(Clone, Debug)]
pub struct ChannelTransport {
    connection: ConnectionId,
    controller: ControllerId,
    command_tx: mpsc::Sender<Command>,
}

impl ChannelTransport {
    pub(crate) fn new(
        connection: ConnectionId,
        controller: ControllerId,
        command_tx: mpsc::Sender<Command>,
    ) -> Self {
        Self {
            connection,
            controller,
            command_tx,
        }
    }

    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    pub fn controller(&self) -> ControllerId {
        self.controller
    }
}

impl RequestSink for ChannelTransport {
    fn send_to_server(&self, request: InteractRequest) -> Result<(), TransportError> {
        let frame = encode_request(&request).map_err(|e| TransportError::Framing(e.to_string()))?;
        let envelope = Envelope::new(self.connection, self.controller, frame);

        self.command_tx
            .try_send(Command::Deliver(envelope))
            .map_err(|e| match e {
                TrySendError::Full(_) => TransportError::Saturated,
                TrySendError::Closed(_) => TransportError::Closed,
            })?;

        trace!(
            target: "runtime::transport",
            connection = %self.connection,
            controller = %self.controller,
            %request,
            "queued interact request"
        );
        Ok(())
    }
}
