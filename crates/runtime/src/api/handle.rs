//! Cloneable façade for talking to the server worker.
//!
//! [`RuntimeHandle`] hides channel plumbing and gives access to the shared
//! world tables, per-connection transports, and event topics.
use std::sync::Arc;

use interaction_core::{ConnectionId, ControllerId, InteractRequest};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use super::transport::ChannelTransport;
use crate::events::{Event, EventBus, Topic};
use crate::server::DispatchOutcome;
use crate::workers::Command;
use crate::world::{InteractableDirectory, LocalOwnership, OwnershipTable};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    directory: Arc<InteractableDirectory>,
    ownership: Arc<OwnershipTable>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        directory: Arc<InteractableDirectory>,
        ownership: Arc<OwnershipTable>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            directory,
            ownership,
        }
    }

    /// Transport for `connection` acting as `controller`.
    ///
    /// The server still checks that `connection` owns `controller`; handing
    /// out a transport grants nothing.
    pub fn transport_for(
        &self,
        connection: ConnectionId,
        controller: ControllerId,
    ) -> ChannelTransport {
        ChannelTransport::new(connection, controller, self.command_tx.clone())
    }

    /// Sends a decoded request to the server and waits for its outcome.
    ///
    /// Bypasses framing; the server applies the same checks as for a
    /// transported request.
    pub async fn dispatch(
        &self,
        connection: ConnectionId,
        controller: ControllerId,
        request: InteractRequest,
    ) -> Result<DispatchOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Dispatch {
                connection,
                controller,
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::RequestChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Interaction` - interactions committed by the server
    /// - `Topic::Rejection` - requests dropped by the server
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut committed = handle.subscribe(Topic::Interaction);
    /// while let Ok(event) = committed.recv().await {
    ///     // update UI
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn directory(&self) -> &Arc<InteractableDirectory> {
        &self.directory
    }

    pub fn ownership(&self) -> &Arc<OwnershipTable> {
        &self.ownership
    }

    /// Ownership view of a host process whose local client is `connection`.
    pub fn local_ownership(&self, connection: ConnectionId) -> LocalOwnership {
        LocalOwnership::host(connection, Arc::clone(&self.ownership))
    }

    pub(crate) async fn request_shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::RequestChannelClosed)
    }
}
