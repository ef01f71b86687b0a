//! Per-tick target tracking and the client side of the trigger flow.

use std::sync::{Arc, Weak};

use glam::Vec3;
use interaction_core::{
    ControllerId, InteractRequest, Interactable, InteractableLookup, InteractionFault,
    InteractionId, OwnershipOracle, RequestSink, Role, SpatialQuery, SurfaceId,
};
use tracing::{debug, trace, warn};

use super::{TargetTransition, TriggerOutcome};
use crate::config::FrontendConfig;

/// Display state of the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum TargetingState {
    /// Nothing to show: no hit, no interactable, or nothing available.
    Idle,
    /// At least one interaction is available on the current target.
    Targeting,
}

/// One entry of the filtered availability snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailableInteraction {
    pub id: InteractionId,
    pub name: Arc<str>,
}

/// Tracks what the local observer is aiming at.
///
/// The tracker holds only a weak reference to its target; once the
/// interactable is despawned every query treats it as gone.
pub struct TargetTracker {
    observer: ControllerId,
    role: Role,
    max_distance: f32,
    spatial: Arc<dyn SpatialQuery>,
    lookup: Arc<dyn InteractableLookup>,
    ownership: Arc<dyn OwnershipOracle>,
    last_surface: Option<SurfaceId>,
    target: Option<Weak<Interactable>>,
    available: Vec<AvailableInteraction>,
}

impl TargetTracker {
    pub fn new(
        observer: ControllerId,
        config: &FrontendConfig,
        spatial: Arc<dyn SpatialQuery>,
        lookup: Arc<dyn InteractableLookup>,
        ownership: Arc<dyn OwnershipOracle>,
    ) -> Self {
        // Only a process that runs the server may evaluate under its authority.
        let role = if config.evaluate_as_server && !ownership.is_server_process() {
            warn!(
                target: "frontend::targeting",
                %observer,
                "server-role tracking requested outside a server process, tracking as client"
            );
            Role::Client
        } else {
            Role::from_server_flag(config.evaluate_as_server)
        };

        Self {
            observer,
            role,
            max_distance: config.max_distance,
            spatial,
            lookup,
            ownership,
            last_surface: None,
            target: None,
            available: Vec::new(),
        }
    }

    /// [`refresh`](Self::refresh) with the configured ray length.
    pub fn tick(&mut self, origin: Vec3, direction: Vec3) -> TargetingState {
        self.refresh(origin, direction, self.max_distance)
    }

    /// Casts the targeting ray and recomputes availability.
    ///
    /// Availability is recomputed on every call, including when the target
    /// did not change, because predicates depend on object state.
    pub fn refresh(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> TargetingState {
        let hit = self.spatial.cast(origin, direction, max_distance);

        match TargetTransition::classify(self.last_surface, hit) {
            TargetTransition::NoTarget => {
                if self.last_surface.is_some() {
                    trace!(target: "frontend::targeting", observer = %self.observer, "target lost");
                }
                self.clear();
            }
            TargetTransition::SameTarget => {}
            TargetTransition::NewTarget(hit) => {
                let interactable = self.lookup.as_interactable(hit.object);
                debug!(
                    target: "frontend::targeting",
                    observer = %self.observer,
                    object = ?hit.object,
                    interactable = ?interactable.as_ref().map(|i| i.id()),
                    "new target"
                );
                self.last_surface = Some(hit.surface);
                self.target = interactable.as_ref().map(Arc::downgrade);
            }
        }

        self.refilter();
        self.state()
    }

    /// Runs the primary interaction for the local observer.
    ///
    /// The local action runs under [`Role::Client`]; if it asks for server
    /// confirmation the request is handed to `sink`. Only the process that
    /// owns the observer may trigger.
    pub fn trigger_interact(&self, sink: &dyn RequestSink) -> TriggerOutcome {
        if !self.ownership.is_local_owner(self.observer) {
            return TriggerOutcome::NotOwner;
        }

        let (Some(primary), Some(interactable)) = (self.primary(), self.target()) else {
            return TriggerOutcome::NothingTargeted;
        };
        let Some(interaction) = interactable.interaction(primary.id) else {
            return TriggerOutcome::NothingTargeted;
        };

        if !interaction.can_interact(self.observer, Role::Client) {
            return TriggerOutcome::Declined;
        }

        if !interaction.interact(self.observer, Role::Client) {
            debug!(
                target: "frontend::targeting",
                observer = %self.observer,
                interaction = %interaction,
                "interaction completed locally"
            );
            return TriggerOutcome::CommittedLocally;
        }

        let request = InteractRequest::new(interactable.id(), interaction.id());
        match sink.send_to_server(request) {
            Ok(()) => {
                debug!(
                    target: "frontend::targeting",
                    observer = %self.observer,
                    %request,
                    "interact request sent"
                );
                TriggerOutcome::Sent(request)
            }
            Err(e) => {
                warn!(
                    target: "frontend::targeting",
                    observer = %self.observer,
                    %request,
                    code = e.error_code(),
                    error = %e,
                    "interact request not sent"
                );
                TriggerOutcome::SendFailed(e)
            }
        }
    }

    pub fn state(&self) -> TargetingState {
        if self.available.is_empty() {
            TargetingState::Idle
        } else {
            TargetingState::Targeting
        }
    }

    /// Interactions available at the last refresh, in registration order.
    pub fn available(&self) -> &[AvailableInteraction] {
        &self.available
    }

    /// The only interaction that is shown and can be triggered.
    pub fn primary(&self) -> Option<&AvailableInteraction> {
        self.available.first()
    }

    /// Current target, if it is still alive.
    pub fn target(&self) -> Option<Arc<Interactable>> {
        self.target.as_ref().and_then(Weak::upgrade)
    }

    pub fn observer(&self) -> ControllerId {
        self.observer
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether this tracker should drive the on-screen prompt.
    ///
    /// A server-role parity tracker and a tracker for a controller this
    /// process does not own never do.
    pub fn drives_prompt(&self) -> bool {
        !self.role.is_server() && self.ownership.is_local_owner(self.observer)
    }

    fn refilter(&mut self) {
        self.available.clear();

        let Some(interactable) = self.target() else {
            if self.target.take().is_some() {
                debug!(target: "frontend::targeting", observer = %self.observer, "target despawned");
            }
            // No target object to compare against, so the next hit resolves anew.
            self.last_surface = None;
            return;
        };

        self.available.extend(
            interactable
                .registry()
                .available(self.observer, self.role)
                .map(|interaction| AvailableInteraction {
                    id: interaction.id(),
                    name: interaction.shared_name(),
                }),
        );
    }

    fn clear(&mut self) {
        self.last_surface = None;
        self.target = None;
        self.available.clear();
    }
}
