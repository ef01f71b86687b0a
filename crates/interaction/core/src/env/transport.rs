use crate::error::TransportError;
use crate::request::InteractRequest;

/// Client-to-server channel for interact requests.
///
/// Delivery is at-most-once and unordered relative to other requests. An
/// implementation is bound to the local controller it sends on behalf of, so
/// the request itself carries nothing but the two ids.
pub trait RequestSink: Send + Sync {
    /// Hands the request to the transport without waiting for delivery.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request could not even be queued.
    /// The request is gone either way; nothing retries it.
    fn send_to_server(&self, request: InteractRequest) -> Result<(), TransportError>;
}
