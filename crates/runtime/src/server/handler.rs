//! Server-side handling of interact requests.

use std::sync::Arc;

use interaction_core::{
    ConnectionId, ControllerId, ErrorSeverity, InteractRequest, InteractableId, InteractionFault,
    InteractionId, Role,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::ReachPolicy;
use crate::events::{CommittedEvent, DroppedEvent, Event, EventBus};
use crate::protocol::{Envelope, decode_request};
use crate::world::{InteractableDirectory, OwnershipTable};

/// Why a request was dropped without effect.
///
/// None of these are reported back to the client; a dropped request simply
/// means nothing happened.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DropReason {
    #[error("{controller} has no owner")]
    ControllerUnowned { controller: ControllerId },

    #[error("{connection} does not own {controller} (owned by {owner})")]
    NotOwner {
        controller: ControllerId,
        connection: ConnectionId,
        owner: ConnectionId,
    },

    #[error("interactable {interactable} does not exist")]
    UnknownInteractable { interactable: InteractableId },

    #[error("interactable {interactable} has no interaction {interaction}")]
    UnknownInteraction {
        interactable: InteractableId,
        interaction: InteractionId,
    },

    #[error("{controller} is out of reach of interactable {interactable}")]
    OutOfReach {
        controller: ControllerId,
        interactable: InteractableId,
    },

    #[error("malformed request frame: {error}")]
    Malformed { error: String },
}

impl InteractionFault for DropReason {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Expected under races: the object went away while the request was in flight.
            Self::UnknownInteractable { .. } | Self::UnknownInteraction { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::ControllerUnowned { .. }
            | Self::NotOwner { .. }
            | Self::OutOfReach { .. }
            | Self::Malformed { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ControllerUnowned { .. } => "CONTROLLER_UNOWNED",
            Self::NotOwner { .. } => "NOT_OWNER",
            Self::UnknownInteractable { .. } => "UNKNOWN_INTERACTABLE",
            Self::UnknownInteraction { .. } => "UNKNOWN_INTERACTION",
            Self::OutOfReach { .. } => "OUT_OF_REACH",
            Self::Malformed { .. } => "MALFORMED",
        }
    }
}

/// An interaction the server ran under its own authority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committed {
    pub interactable: InteractableId,
    pub interaction: InteractionId,
    pub name: Arc<str>,
    /// Return value of the server-role action.
    pub acknowledged: bool,
}

pub type DispatchOutcome = Result<Committed, DropReason>;

/// Validates interact requests and commits them.
pub struct InteractionServer {
    directory: Arc<InteractableDirectory>,
    ownership: Arc<OwnershipTable>,
    reach: Arc<dyn ReachPolicy>,
    events: EventBus,
    max_frame_len: usize,
}

impl InteractionServer {
    pub fn new(
        directory: Arc<InteractableDirectory>,
        ownership: Arc<OwnershipTable>,
        reach: Arc<dyn ReachPolicy>,
        events: EventBus,
        max_frame_len: usize,
    ) -> Self {
        Self {
            directory,
            ownership,
            reach,
            events,
            max_frame_len,
        }
    }

    /// Decodes a transport envelope and handles the request inside it.
    pub fn handle_envelope(&self, envelope: Envelope) -> DispatchOutcome {
        match decode_request(&envelope.frame, self.max_frame_len) {
            Ok(request) => {
                self.handle_interact_request(envelope.connection, envelope.controller, request)
            }
            Err(e) => {
                let reason = DropReason::Malformed {
                    error: e.to_string(),
                };
                self.report_drop(envelope.connection, envelope.controller, None, &reason);
                Err(reason)
            }
        }
    }

    /// Handles one interact request sent by `connection` on behalf of `controller`.
    ///
    /// Ownership is verified before anything else is looked up. Every failed
    /// check drops the request silently (logged and published on
    /// [`Topic::Rejection`](crate::Topic::Rejection)); on success the
    /// interaction runs once under [`Role::Server`].
    pub fn handle_interact_request(
        &self,
        connection: ConnectionId,
        controller: ControllerId,
        request: InteractRequest,
    ) -> DispatchOutcome {
        self.commit(connection, controller, request).inspect_err(|reason| {
            self.report_drop(connection, controller, Some(request), reason);
        })
    }

    fn commit(
        &self,
        connection: ConnectionId,
        controller: ControllerId,
        request: InteractRequest,
    ) -> DispatchOutcome {
        match self.ownership.owner_of(controller) {
            None => return Err(DropReason::ControllerUnowned { controller }),
            Some(owner) if owner != connection => {
                return Err(DropReason::NotOwner {
                    controller,
                    connection,
                    owner,
                });
            }
            Some(_) => {}
        }

        let interactable = self.directory.get(request.interactable).ok_or(
            DropReason::UnknownInteractable {
                interactable: request.interactable,
            },
        )?;

        let interaction = interactable.interaction(request.interaction).ok_or(
            DropReason::UnknownInteraction {
                interactable: request.interactable,
                interaction: request.interaction,
            },
        )?;

        if !self.reach.within_reach(controller, request.interactable) {
            return Err(DropReason::OutOfReach {
                controller,
                interactable: request.interactable,
            });
        }

        let acknowledged = interaction.interact(controller, Role::Server);
        let committed = Committed {
            interactable: interactable.id(),
            interaction: interaction.id(),
            name: interaction.shared_name(),
            acknowledged,
        };

        info!(
            target: "runtime::server",
            %connection,
            %controller,
            interactable = %committed.interactable,
            interaction = %interaction,
            acknowledged,
            "interaction committed"
        );

        self.events.publish(Event::Committed(CommittedEvent {
            connection,
            controller,
            interactable: committed.interactable,
            interaction: committed.interaction,
            name: committed.name.to_string(),
            acknowledged,
        }));

        Ok(committed)
    }

    fn report_drop(
        &self,
        connection: ConnectionId,
        controller: ControllerId,
        request: Option<InteractRequest>,
        reason: &DropReason,
    ) {
        let severity = reason.severity();
        match severity {
            ErrorSeverity::Recoverable => debug!(
                target: "runtime::server",
                %connection,
                %controller,
                request = ?request,
                code = reason.error_code(),
                reason = %reason,
                "interact request dropped"
            ),
            ErrorSeverity::Validation => warn!(
                target: "runtime::server",
                %connection,
                %controller,
                request = ?request,
                code = reason.error_code(),
                reason = %reason,
                reach_policy = self.reach.name(),
                "interact request refused"
            ),
            ErrorSeverity::Internal | ErrorSeverity::Fatal => error!(
                target: "runtime::server",
                %connection,
                %controller,
                request = ?request,
                code = reason.error_code(),
                reason = %reason,
                "interact request failed"
            ),
        }

        self.events.publish(Event::Dropped(DroppedEvent {
            connection,
            controller,
            request,
            reason: reason.clone(),
            severity,
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::events::Topic;
    use crate::protocol::encode_request;
    use crate::server::Unrestricted;
    use crate::world::LocalOwnership;
    use interaction_core::{
        AuthorityDispatcher, Interactable, InteractableIdAllocator, InteractionRegistry, ObjectId,
    };

    const HOST: ConnectionId = ConnectionId(0);
    const REMOTE: ConnectionId = ConnectionId(1);
    const HERO: ControllerId = ControllerId(100);

    struct Fixture {
        server: InteractionServer,
        directory: Arc<InteractableDirectory>,
        events: EventBus,
        chest: InteractableId,
        server_opens: Arc<AtomicUsize>,
    }

    struct Unreachable;

    impl ReachPolicy for Unreachable {
        fn within_reach(&self, _: ControllerId, _: InteractableId) -> bool {
            false
        }

        fn name(&self) -> &'static str {
            "unreachable"
        }
    }

    fn fixture() -> Fixture {
        fixture_with_reach(Arc::new(Unrestricted))
    }

    fn fixture_with_reach(reach: Arc<dyn ReachPolicy>) -> Fixture {
        let directory = Arc::new(InteractableDirectory::new());
        let ownership = Arc::new(OwnershipTable::new());
        ownership.assign(HERO, REMOTE).unwrap();
        let events = EventBus::new();

        let dispatcher = AuthorityDispatcher::new(Arc::new(LocalOwnership::dedicated_server(
            Arc::clone(&ownership),
        )));
        let server_opens = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&server_opens);
        let mut registry = InteractionRegistry::new(dispatcher);
        registry
            .add_interaction("Open", |_, _| true, move |_, role| {
                if role.is_server() {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                true
            })
            .unwrap();
        let chest = directory
            .spawn(
                ObjectId(1),
                Interactable::with_allocator(&InteractableIdAllocator::new(), registry).unwrap(),
            )
            .unwrap()
            .id();

        let server = InteractionServer::new(
            Arc::clone(&directory),
            ownership,
            reach,
            events.clone(),
            64,
        );

        Fixture {
            server,
            directory,
            events,
            chest,
            server_opens,
        }
    }

    #[test]
    fn owner_request_is_committed_once_as_server() {
        let f = fixture();
        let mut committed_rx = f.events.subscribe(Topic::Interaction);

        let committed = f
            .server
            .handle_interact_request(
                REMOTE,
                HERO,
                InteractRequest::new(f.chest, InteractionId::FIRST),
            )
            .unwrap();

        assert_eq!(committed.name.as_ref(), "Open");
        assert!(committed.acknowledged);
        assert_eq!(f.server_opens.load(Ordering::SeqCst), 1);
        assert!(matches!(
            committed_rx.try_recv(),
            Ok(Event::Committed(CommittedEvent { controller: HERO, .. }))
        ));
    }

    #[test]
    fn forged_ownership_is_refused_before_dispatch() {
        let f = fixture();

        let outcome = f.server.handle_interact_request(
            HOST,
            HERO,
            InteractRequest::new(f.chest, InteractionId::FIRST),
        );

        assert_eq!(
            outcome,
            Err(DropReason::NotOwner {
                controller: HERO,
                connection: HOST,
                owner: REMOTE,
            })
        );
        assert_eq!(f.server_opens.load(Ordering::SeqCst), 0);

        let unowned = f.server.handle_interact_request(
            REMOTE,
            ControllerId(5),
            InteractRequest::new(f.chest, InteractionId::FIRST),
        );
        assert_eq!(
            unowned,
            Err(DropReason::ControllerUnowned {
                controller: ControllerId(5)
            })
        );
    }

    #[test]
    fn request_for_despawned_interactable_is_dropped_without_effect() {
        let f = fixture();
        let mut rejection_rx = f.events.subscribe(Topic::Rejection);
        f.directory.despawn(ObjectId(1)).unwrap();

        let outcome = f.server.handle_interact_request(
            REMOTE,
            HERO,
            InteractRequest::new(f.chest, InteractionId::FIRST),
        );

        let reason = outcome.unwrap_err();
        assert!(reason.severity().is_recoverable());
        assert_eq!(f.server_opens.load(Ordering::SeqCst), 0);
        assert!(matches!(
            rejection_rx.try_recv(),
            Ok(Event::Dropped(DroppedEvent { reason: DropReason::UnknownInteractable { .. }, .. }))
        ));
    }

    #[test]
    fn unknown_interaction_id_is_dropped() {
        let f = fixture();

        let outcome = f.server.handle_interact_request(
            REMOTE,
            HERO,
            InteractRequest::new(f.chest, InteractionId(3)),
        );

        assert_eq!(
            outcome,
            Err(DropReason::UnknownInteraction {
                interactable: f.chest,
                interaction: InteractionId(3),
            })
        );
    }

    #[test]
    fn envelope_is_decoded_or_dropped_as_malformed() {
        let f = fixture();
        let frame = encode_request(&InteractRequest::new(f.chest, InteractionId::FIRST)).unwrap();

        assert!(
            f.server
                .handle_envelope(Envelope::new(REMOTE, HERO, frame))
                .is_ok()
        );
        assert!(matches!(
            f.server.handle_envelope(Envelope::new(REMOTE, HERO, vec![1, 2, 3])),
            Err(DropReason::Malformed { .. })
        ));
        assert_eq!(f.server_opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reach_is_checked_only_for_a_resolvable_interaction() {
        let f = fixture_with_reach(Arc::new(Unreachable));

        let unknown = f.server.handle_interact_request(
            REMOTE,
            HERO,
            InteractRequest::new(f.chest, InteractionId(3)),
        );
        assert!(matches!(unknown, Err(DropReason::UnknownInteraction { .. })));

        let far = f.server.handle_interact_request(
            REMOTE,
            HERO,
            InteractRequest::new(f.chest, InteractionId::FIRST),
        );
        assert_eq!(
            far,
            Err(DropReason::OutOfReach {
                controller: HERO,
                interactable: f.chest,
            })
        );
        assert_eq!(f.server_opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn races_are_recoverable_and_everything_else_is_suspicious() {
        let chest = InteractableId(1);
        let recoverable = [
            DropReason::UnknownInteractable { interactable: chest },
            DropReason::UnknownInteraction {
                interactable: chest,
                interaction: InteractionId::FIRST,
            },
        ];
        let suspicious = [
            DropReason::ControllerUnowned { controller: HERO },
            DropReason::NotOwner {
                controller: HERO,
                connection: HOST,
                owner: REMOTE,
            },
            DropReason::OutOfReach {
                controller: HERO,
                interactable: chest,
            },
            DropReason::Malformed {
                error: "truncated".into(),
            },
        ];

        assert!(recoverable.iter().all(|r| r.severity().is_recoverable()));
        assert!(suspicious.iter().all(|r| r.severity().is_suspicious()));
    }
}
