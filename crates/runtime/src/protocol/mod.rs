//! Wire protocol for interact requests.
//!
//! The payload is exactly the two ids of [`InteractRequest`]; who sent it and
//! which controller it is addressed to travel in the transport
//! [`Envelope`], the way a remote call is routed to a player object.
mod codec;
mod envelope;

pub use codec::{ProtocolError, REQUEST_FRAME_LEN, decode_request, encode_request};
pub use envelope::Envelope;
