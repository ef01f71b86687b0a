//! A single named predicate/action pair.
use std::fmt;
use std::sync::Arc;

use crate::authority::{GuardedCapability, Role};
use crate::ids::{ControllerId, InteractionId};

/// Named predicate + action invocable on an interactable.
///
/// Both capabilities are already wrapped by
/// [`AuthorityDispatcher`](crate::AuthorityDispatcher); there is no way to
/// reach the raw closures from here.
#[derive(Clone, Debug)]
pub struct Interaction {
    id: InteractionId,
    name: Arc<str>,
    can_interact: GuardedCapability,
    interact: GuardedCapability,
}

impl Interaction {
    pub(crate) fn new(
        id: InteractionId,
        name: Arc<str>,
        can_interact: GuardedCapability,
        interact: GuardedCapability,
    ) -> Self {
        Self {
            id,
            name,
            can_interact,
            interact,
        }
    }

    pub fn id(&self) -> InteractionId {
        self.id
    }

    /// Display name shown in the prompt.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the display name, cheap to keep in per-tick snapshots.
    pub fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Whether `observer` may currently use this interaction under `role`.
    pub fn can_interact(&self, observer: ControllerId, role: Role) -> bool {
        self.can_interact.invoke(observer, role)
    }

    /// Runs the action under `role`.
    ///
    /// Under [`Role::Client`] the return value means "requires server
    /// confirmation"; under [`Role::Server`] it is informational only.
    pub fn interact(&self, observer: ControllerId, role: Role) -> bool {
        self.interact.invoke(observer, role)
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.name, self.id)
    }
}
