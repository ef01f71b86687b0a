//! Server worker that owns the [`InteractionServer`].
//!
//! Receives framed requests from transports and decoded requests from
//! [`RuntimeHandle`](crate::RuntimeHandle), handles them in arrival order, and
//! relies on the server to publish outcomes on the event bus.

use interaction_core::{ConnectionId, ControllerId, InteractRequest};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::protocol::Envelope;
use crate::server::{DispatchOutcome, InteractionServer};

/// Commands that can be sent to the server worker
#[derive(Debug)]
pub enum Command {
    /// A framed request off the transport. Fire and forget.
    Deliver(Envelope),
    /// A decoded request whose outcome the caller waits for.
    Dispatch {
        connection: ConnectionId,
        controller: ControllerId,
        request: InteractRequest,
        reply: oneshot::Sender<DispatchOutcome>,
    },
    /// Stop after the commands already queued.
    Shutdown,
}

/// Background task that processes interact requests.
pub struct ServerWorker {
    server: InteractionServer,
    command_rx: mpsc::Receiver<Command>,
}

impl ServerWorker {
    pub fn new(server: InteractionServer, command_rx: mpsc::Receiver<Command>) -> Self {
        Self { server, command_rx }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                else => break,
            }
        }

        info!(target: "runtime::worker", "server worker stopped");
    }

    /// Returns `false` once the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Deliver(envelope) => {
                // Outcome is already logged and published by the server.
                let _ = self.server.handle_envelope(envelope);
            }
            Command::Dispatch {
                connection,
                controller,
                request,
                reply,
            } => {
                let outcome = self
                    .server
                    .handle_interact_request(connection, controller, request);
                if reply.send(outcome).is_err() {
                    debug!(target: "runtime::worker", %request, "dispatch caller went away");
                }
            }
            Command::Shutdown => {
                // Drain what was queued before the shutdown request.
                self.command_rx.close();
                while let Ok(cmd) = self.command_rx.try_recv() {
                    if matches!(cmd, Command::Shutdown) {
                        continue;
                    }
                    self.handle_command(cmd);
                }
                return false;
            }
        }
        true
    }
}
