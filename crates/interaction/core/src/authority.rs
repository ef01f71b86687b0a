//! Role-aware wrapping of interaction capabilities.
//!
//! A host process plays client and server at once. If both the client path
//! and the server path ran the raw capability for the same local trigger, the
//! side effects would be applied twice. [`AuthorityDispatcher`] applies one
//! rule once, at registration time:
//!
//! - [`Role::Server`] always delegates to the raw capability.
//! - [`Role::Client`] delegates only when the observer is owned by this
//!   process; otherwise the capability is not run and `false` is returned.
//!
//! Callers never see the unwrapped capability.
use std::fmt;
use std::sync::Arc;

use crate::env::OwnershipOracle;
use crate::ids::ControllerId;

/// Role a capability is being evaluated under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Speculative or cosmetic evaluation on the observer's own process.
    Client,
    /// Authoritative evaluation; the only role allowed to commit state.
    Server,
}

impl Role {
    /// Maps the `as_server` flag used on the wire and in scripts to a role.
    #[inline]
    pub const fn from_server_flag(as_server: bool) -> Self {
        if as_server { Self::Server } else { Self::Client }
    }

    #[inline]
    pub const fn is_server(self) -> bool {
        matches!(self, Self::Server)
    }
}

/// Unwrapped `(observer, role) -> bool` capability as supplied by content code.
pub type RawCapability = Arc<dyn Fn(ControllerId, Role) -> bool + Send + Sync>;

/// Wrapping strategy applied to every predicate and action at registration.
#[derive(Clone)]
pub struct AuthorityDispatcher {
    ownership: Arc<dyn OwnershipOracle>,
}

impl AuthorityDispatcher {
    pub fn new(ownership: Arc<dyn OwnershipOracle>) -> Self {
        Self { ownership }
    }

    /// Wraps a raw capability with the authority guard.
    pub fn guard<F>(&self, capability: F) -> GuardedCapability
    where
        F: Fn(ControllerId, Role) -> bool + Send + Sync + 'static,
    {
        self.guard_shared(Arc::new(capability))
    }

    /// Wraps an already shared raw capability.
    pub fn guard_shared(&self, capability: RawCapability) -> GuardedCapability {
        GuardedCapability {
            inner: capability,
            ownership: Arc::clone(&self.ownership),
        }
    }
}

impl fmt::Debug for AuthorityDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorityDispatcher").finish_non_exhaustive()
    }
}

/// Capability guarded by [`AuthorityDispatcher`].
///
/// Safe to call repeatedly and speculatively; the tracker evaluates
/// predicates every tick.
#[derive(Clone)]
pub struct GuardedCapability {
    inner: RawCapability,
    ownership: Arc<dyn OwnershipOracle>,
}

impl GuardedCapability {
    pub fn invoke(&self, observer: ControllerId, role: Role) -> bool {
        match role {
            Role::Server => (self.inner)(observer, Role::Server),
            Role::Client => {
                self.ownership.is_local_owner(observer) && (self.inner)(observer, Role::Client)
            }
        }
    }
}

impl fmt::Debug for GuardedCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedCapability").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct OwnedSet(HashSet<ControllerId>);

    impl OwnershipOracle for OwnedSet {
        fn is_local_owner(&self, controller: ControllerId) -> bool {
            self.0.contains(&controller)
        }

        fn is_server_process(&self) -> bool {
            false
        }
    }

    const OWNED: ControllerId = ControllerId(1);
    const REMOTE: ControllerId = ControllerId(2);

    fn dispatcher() -> AuthorityDispatcher {
        AuthorityDispatcher::new(Arc::new(OwnedSet(HashSet::from([OWNED]))))
    }

    #[test]
    fn client_role_refuses_foreign_observer_without_running_capability() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let guarded = dispatcher().guard(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        assert!(!guarded.invoke(REMOTE, Role::Client));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(guarded.invoke(OWNED, Role::Client));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn server_role_delegates_regardless_of_ownership() {
        let always = dispatcher().guard(|_, _| true);
        let never = dispatcher().guard(|_, _| false);

        for observer in [OWNED, REMOTE] {
            assert!(always.invoke(observer, Role::Server));
            assert!(!never.invoke(observer, Role::Server));
        }
    }

    #[test]
    fn raw_capability_sees_the_role_it_runs_under() {
        let guarded = dispatcher().guard(|_, role| role.is_server());

        assert!(guarded.invoke(REMOTE, Role::Server));
        assert!(!guarded.invoke(OWNED, Role::Client));
    }

    #[test]
    fn server_flag_maps_to_role() {
        assert_eq!(Role::from_server_flag(true), Role::Server);
        assert_eq!(Role::from_server_flag(false), Role::Client);
        assert_eq!(Role::Server.to_string(), "server");
    }
}
