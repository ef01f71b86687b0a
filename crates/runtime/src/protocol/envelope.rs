use interaction_core::{ConnectionId, ControllerId};

/// Transport-level routing around an encoded request frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    /// Connection the frame arrived on.
    pub connection: ConnectionId,
    /// Controller the frame is addressed to; the sender claims to act for it.
    pub controller: ControllerId,
    /// Encoded [`InteractRequest`](interaction_core::InteractRequest).
    pub frame: Vec<u8>,
}

impl Envelope {
    pub fn new(connection: ConnectionId, controller: ControllerId, frame: Vec<u8>) -> Self {
        Self {
            connection,
            controller,
            frame,
        }
    }
}
