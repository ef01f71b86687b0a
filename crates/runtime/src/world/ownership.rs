//! Controller ownership.
//!
//! The server's [`OwnershipTable`] is the source of truth for which
//! connection may act as which controller. [`LocalOwnership`] projects that
//! table onto one process so the authority guards can ask "is this observer
//! mine?".

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use interaction_core::{ConnectionId, ControllerId, OwnershipOracle};
use tracing::debug;

use crate::api::{Result, RuntimeError};

/// Controller → owning connection map.
///
/// Reads never fail: a poisoned lock reads as "unowned", which makes every
/// ownership check fail closed.
#[derive(Debug, Default)]
pub struct OwnershipTable {
    owners: RwLock<HashMap<ControllerId, ConnectionId>>,
}

impl OwnershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `controller` to `connection`, returning the previous owner.
    pub fn assign(
        &self,
        controller: ControllerId,
        connection: ConnectionId,
    ) -> Result<Option<ConnectionId>> {
        let previous = self
            .owners
            .write()
            .map_err(|_| RuntimeError::LockPoisoned("ownership table"))?
            .insert(controller, connection);

        debug!(
            target: "runtime::world",
            %controller,
            %connection,
            previous = ?previous,
            "controller ownership assigned"
        );

        Ok(previous)
    }

    /// Leaves `controller` without an owner.
    pub fn release(&self, controller: ControllerId) -> Result<Option<ConnectionId>> {
        let previous = self
            .owners
            .write()
            .map_err(|_| RuntimeError::LockPoisoned("ownership table"))?
            .remove(&controller);
        Ok(previous)
    }

    /// Releases every controller owned by `connection` (disconnect).
    ///
    /// Returns the controllers that were released.
    pub fn release_connection(&self, connection: ConnectionId) -> Result<Vec<ControllerId>> {
        let mut owners = self
            .owners
            .write()
            .map_err(|_| RuntimeError::LockPoisoned("ownership table"))?;

        let released: Vec<_> = owners
            .iter()
            .filter(|(_, owner)| **owner == connection)
            .map(|(controller, _)| *controller)
            .collect();
        for controller in &released {
            owners.remove(controller);
        }

        Ok(released)
    }

    pub fn owner_of(&self, controller: ControllerId) -> Option<ConnectionId> {
        self.owners
            .read()
            .ok()
            .and_then(|owners| owners.get(&controller).copied())
    }

    pub fn has_owner(&self, controller: ControllerId) -> bool {
        self.owner_of(controller).is_some()
    }

    pub fn is_owned_by(&self, controller: ControllerId, connection: ConnectionId) -> bool {
        self.owner_of(controller) == Some(connection)
    }
}

/// Ownership as seen from one process.
///
/// A client process has its own connection; a host has the connection of its
/// local client and also runs the server; a dedicated server has no local
/// connection, so it owns no controller and every client-role guard refuses.
#[derive(Debug, Clone)]
pub struct LocalOwnership {
    connections: HashSet<ConnectionId>,
    table: Arc<OwnershipTable>,
    server: bool,
}

impl LocalOwnership {
    pub fn client(connection: ConnectionId, table: Arc<OwnershipTable>) -> Self {
        Self {
            connections: HashSet::from([connection]),
            table,
            server: false,
        }
    }

    pub fn host(connection: ConnectionId, table: Arc<OwnershipTable>) -> Self {
        Self {
            connections: HashSet::from([connection]),
            table,
            server: true,
        }
    }

    pub fn dedicated_server(table: Arc<OwnershipTable>) -> Self {
        Self {
            connections: HashSet::new(),
            table,
            server: true,
        }
    }
}

impl OwnershipOracle for LocalOwnership {
    fn is_local_owner(&self, controller: ControllerId) -> bool {
        self.table
            .owner_of(controller)
            .is_some_and(|owner| self.connections.contains(&owner))
    }

    fn is_server_process(&self) -> bool {
        self.server
    }
}
