use interaction_core::{InteractRequest, TransportError};

/// What a trigger did.
///
/// Every variant is a normal outcome; none of them leaves the prompt in a
/// state that needs recovery.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TriggerOutcome {
    /// This process does not control the observer.
    NotOwner,
    /// No primary interaction, or its interactable is gone.
    NothingTargeted,
    /// The primary interaction stopped being available since the last refresh.
    Declined,
    /// The local action ran and needs no server confirmation.
    CommittedLocally,
    /// The local action ran and the request was queued for the server.
    Sent(InteractRequest),
    /// The local action ran but the request could not be queued.
    SendFailed(TransportError),
}

impl TriggerOutcome {
    pub fn label(&self) -> &'static str {
        self.into()
    }
}
