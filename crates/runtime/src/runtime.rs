//! High-level runtime orchestrator.
//!
//! The runtime owns the server worker, wires up the request channel and the
//! event bus, and exposes a builder-based API for hosts and tests.

use std::env;
use std::sync::Arc;

use interaction_core::PositionOracle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::protocol::REQUEST_FRAME_LEN;
use crate::server::{InteractionServer, MaxDistance, ReachPolicy, Unrestricted};
use crate::workers::{Command, ServerWorker};
use crate::world::{InteractableDirectory, OwnershipTable};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub request_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Server-side reach check. `None` accepts any distance.
    pub max_reach: Option<f32>,
    /// Frames longer than this are dropped before decoding.
    pub max_frame_len: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            request_buffer_size: 64,
            event_buffer_size: 100,
            max_reach: None,
            max_frame_len: 64,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `INTERACT_REQUEST_BUFFER` - Request queue size (default: 64)
    /// - `INTERACT_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `INTERACT_SERVER_MAX_REACH` - Server reach limit (default: unset)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("INTERACT_REQUEST_BUFFER") {
            config.request_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("INTERACT_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(reach) = read_env::<f32>("INTERACT_SERVER_MAX_REACH")
            && reach.is_finite()
        {
            config.max_reach = Some(reach.max(0.0));
        }

        config
    }
}

/// Main runtime that hosts the authoritative interaction server.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Requests queued before this call are still handled.
    pub async fn shutdown(self) -> Result<()> {
        // A closed channel means the worker already stopped.
        let _ = self.handle.request_shutdown().await;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    directory: Option<Arc<InteractableDirectory>>,
    ownership: Option<Arc<OwnershipTable>>,
    positions: Option<Arc<dyn PositionOracle>>,
    reach_policy: Option<Arc<dyn ReachPolicy>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            directory: None,
            ownership: None,
            positions: None,
            reach_policy: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing interactable directory
    pub fn directory(mut self, directory: Arc<InteractableDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Share an existing ownership table
    pub fn ownership(mut self, ownership: Arc<OwnershipTable>) -> Self {
        self.ownership = Some(ownership);
        self
    }

    /// Positions used by the reach check when `max_reach` is configured
    pub fn positions(mut self, positions: Arc<dyn PositionOracle>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Replace the reach policy outright; `max_reach` is then ignored
    pub fn reach_policy(mut self, policy: Arc<dyn ReachPolicy>) -> Self {
        self.reach_policy = Some(policy);
        self
    }

    /// Build the runtime and spawn its server worker.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingPositions`] if `max_reach` is set but
    /// no position oracle or explicit reach policy was provided.
    pub fn build(self) -> Result<Runtime> {
        let reach: Arc<dyn ReachPolicy> = match (self.reach_policy, self.config.max_reach) {
            (Some(policy), _) => policy,
            (None, Some(max_distance)) => {
                let positions = self.positions.ok_or(RuntimeError::MissingPositions)?;
                Arc::new(MaxDistance::new(max_distance, positions))
            }
            (None, None) => Arc::new(Unrestricted),
        };

        let directory = self.directory.unwrap_or_default();
        let ownership = self.ownership.unwrap_or_default();
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let max_frame_len = self.config.max_frame_len.max(REQUEST_FRAME_LEN);

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.request_buffer_size.max(1));

        info!(
            target: "runtime",
            reach_policy = reach.name(),
            request_buffer = self.config.request_buffer_size,
            max_frame_len,
            "starting interaction server"
        );

        let server = InteractionServer::new(
            Arc::clone(&directory),
            Arc::clone(&ownership),
            reach,
            event_bus.clone(),
            max_frame_len,
        );
        let worker = ServerWorker::new(server, command_rx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        let handle = RuntimeHandle::new(command_tx, event_bus, directory, ownership);

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use interaction_core::{ControllerId, InteractableId};

    struct Nowhere;

    impl PositionOracle for Nowhere {
        fn controller_position(&self, _: ControllerId) -> Option<Vec3> {
            None
        }

        fn interactable_position(&self, _: InteractableId) -> Option<Vec3> {
            None
        }
    }

    #[test]
    fn defaults_accept_any_reach() {
        let config = RuntimeConfig::default();
        assert_eq!(config.max_reach, None);
        assert_eq!(config.request_buffer_size, 64);
        assert!(config.max_frame_len >= REQUEST_FRAME_LEN);
    }

    #[tokio::test]
    async fn max_reach_requires_positions() {
        let config = RuntimeConfig {
            max_reach: Some(3.0),
            ..RuntimeConfig::default()
        };

        let missing = Runtime::builder().config(config.clone()).build();
        assert!(matches!(missing, Err(RuntimeError::MissingPositions)));

        let runtime = Runtime::builder()
            .config(config)
            .positions(Arc::new(Nowhere))
            .build()
            .unwrap();
        runtime.shutdown().await.unwrap();
    }
}
