//! Per-object interaction registries.
//!
//! An [`InteractionRegistry`] is filled exactly once, right after its owning
//! object is created, and then frozen into an [`Interactable`]. From that
//! point on it is read-only, which is what lets trackers and the server
//! handler read it without any locking.
//!
//! Interaction ids are assigned sequentially from
//! [`InteractionId::FIRST`], so an interaction's id is also its index in the
//! ordered storage. That gives O(1) lookup by id for server-side
//! re-invocation and deterministic registration order for availability.
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::authority::{AuthorityDispatcher, Role};
use crate::error::RegistryError;
use crate::ids::{ControllerId, InteractableId, InteractableIdAllocator, InteractionId};
use crate::interaction::Interaction;

/// Append-only, ordered set of interactions for one interactable.
#[derive(Debug)]
pub struct InteractionRegistry {
    dispatcher: AuthorityDispatcher,
    interactions: Vec<Interaction>,
    next_id: Option<InteractionId>,
}

impl InteractionRegistry {
    pub fn new(dispatcher: AuthorityDispatcher) -> Self {
        Self {
            dispatcher,
            interactions: Vec::new(),
            next_id: Some(InteractionId::FIRST),
        }
    }

    /// Registers an interaction and returns its id.
    ///
    /// Both capabilities are wrapped by the registry's
    /// [`AuthorityDispatcher`] before they are stored.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InteractionIdsExhausted`] if the per-object
    /// id space has been used up.
    pub fn add_interaction<C, A>(
        &mut self,
        name: impl Into<Arc<str>>,
        can_interact: C,
        interact: A,
    ) -> Result<InteractionId, RegistryError>
    where
        C: Fn(ControllerId, Role) -> bool + Send + Sync + 'static,
        A: Fn(ControllerId, Role) -> bool + Send + Sync + 'static,
    {
        let id = self
            .next_id
            .ok_or(RegistryError::InteractionIdsExhausted)?;
        self.next_id = id.next();

        let interaction = Interaction::new(
            id,
            name.into(),
            self.dispatcher.guard(can_interact),
            self.dispatcher.guard(interact),
        );

        trace!(
            target: "interaction::registry",
            interaction = %interaction,
            "registered interaction"
        );

        debug_assert_eq!(id.index(), self.interactions.len());
        self.interactions.push(interaction);

        Ok(id)
    }

    /// Looks up an interaction by id.
    pub fn get(&self, id: InteractionId) -> Option<&Interaction> {
        self.interactions.get(id.index())
    }

    /// Iterates interactions in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interaction> {
        self.interactions.iter()
    }

    /// Interactions whose predicate passes for `observer` under `role`,
    /// in registration order.
    pub fn available(
        &self,
        observer: ControllerId,
        role: Role,
    ) -> impl Iterator<Item = &Interaction> + '_ {
        self.interactions
            .iter()
            .filter(move |interaction| interaction.can_interact(observer, role))
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}

impl<'a> IntoIterator for &'a InteractionRegistry {
    type Item = &'a Interaction;
    type IntoIter = std::slice::Iter<'a, Interaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An object that exposes a frozen registry of interactions.
///
/// Interactables are shared as `Arc<Interactable>` by whatever owns the world
/// object; observers only ever hold `Weak` references so that despawning the
/// object makes every observer see it as gone.
#[derive(Debug)]
pub struct Interactable {
    id: InteractableId,
    registry: InteractionRegistry,
}

impl Interactable {
    /// Freezes `registry` under a fresh process-wide id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InteractableIdsExhausted`] if the global
    /// allocator is spent.
    pub fn new(registry: InteractionRegistry) -> Result<Self, RegistryError> {
        Self::with_allocator(InteractableIdAllocator::global(), registry)
    }

    /// Freezes `registry` under an id drawn from `allocator`.
    pub fn with_allocator(
        allocator: &InteractableIdAllocator,
        registry: InteractionRegistry,
    ) -> Result<Self, RegistryError> {
        let id = allocator.allocate()?;
        Ok(Self { id, registry })
    }

    pub fn id(&self) -> InteractableId {
        self.id
    }

    pub fn registry(&self) -> &InteractionRegistry {
        &self.registry
    }

    pub fn interaction(&self, id: InteractionId) -> Option<&Interaction> {
        self.registry.get(id)
    }
}

impl fmt::Display for Interactable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Interactable {} ({} interactions)",
            self.id,
            self.registry.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::env::OwnershipOracle;

    const LOCAL: ControllerId = ControllerId(7);

    struct SingleOwner(ControllerId);

    impl OwnershipOracle for SingleOwner {
        fn is_local_owner(&self, controller: ControllerId) -> bool {
            controller == self.0
        }

        fn is_server_process(&self) -> bool {
            false
        }
    }

    fn registry() -> InteractionRegistry {
        InteractionRegistry::new(AuthorityDispatcher::new(Arc::new(SingleOwner(LOCAL))))
    }

    fn names<'a>(interactions: impl Iterator<Item = &'a Interaction>) -> Vec<&'a str> {
        interactions.map(Interaction::name).collect()
    }

    #[test]
    fn ids_are_unique_and_strictly_increasing() {
        let mut registry = registry();
        let ids: Vec<_> = ["Open", "Close", "Lock", "Inspect"]
            .into_iter()
            .map(|name| {
                registry
                    .add_interaction(name, |_, _| true, |_, _| true)
                    .unwrap()
            })
            .collect();

        assert_eq!(ids[0], InteractionId::FIRST);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        for id in ids {
            assert_eq!(registry.get(id).map(Interaction::id), Some(id));
        }
        assert!(registry.get(InteractionId(4)).is_none());
    }

    #[test]
    fn availability_keeps_registration_order() {
        let mut registry = registry();
        registry
            .add_interaction("Open", |_, _| true, |_, _| true)
            .unwrap();
        registry
            .add_interaction("Close", |_, _| true, |_, _| true)
            .unwrap();

        for _ in 0..3 {
            assert_eq!(
                names(registry.available(LOCAL, Role::Client)),
                ["Open", "Close"]
            );
        }
    }

    #[test]
    fn availability_tracks_stateful_predicates() {
        let open = Arc::new(AtomicBool::new(false));
        let mut registry = registry();

        let closed = Arc::clone(&open);
        registry
            .add_interaction(
                "Open",
                move |_, _| !closed.load(Ordering::SeqCst),
                |_, _| true,
            )
            .unwrap();
        let opened = Arc::clone(&open);
        registry
            .add_interaction(
                "Close",
                move |_, _| opened.load(Ordering::SeqCst),
                |_, _| true,
            )
            .unwrap();

        assert_eq!(names(registry.available(LOCAL, Role::Client)), ["Open"]);
        open.store(true, Ordering::SeqCst);
        assert_eq!(names(registry.available(LOCAL, Role::Client)), ["Close"]);
    }

    #[test]
    fn foreign_observer_sees_nothing_as_client_but_everything_as_server() {
        let mut registry = registry();
        registry
            .add_interaction("Grab", |_, _| true, |_, _| true)
            .unwrap();

        let stranger = ControllerId(99);
        assert_eq!(registry.available(stranger, Role::Client).count(), 0);
        assert_eq!(
            names(registry.available(stranger, Role::Server)),
            ["Grab"]
        );
    }

    #[test]
    fn interactables_get_distinct_ids_and_display() {
        let allocator = InteractableIdAllocator::new();
        let mut chest = registry();
        chest
            .add_interaction("Open", |_, _| true, |_, _| true)
            .unwrap();

        let chest = Interactable::with_allocator(&allocator, chest).unwrap();
        let rock = Interactable::with_allocator(&allocator, registry()).unwrap();

        assert_ne!(chest.id(), rock.id());
        assert_eq!(chest.to_string(), "Interactable #0 (1 interactions)");
        assert_eq!(
            chest
                .interaction(InteractionId::FIRST)
                .map(ToString::to_string),
            Some("[Open, 0]".to_string())
        );
    }
}
