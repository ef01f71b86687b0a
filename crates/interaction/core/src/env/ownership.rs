use crate::ids::ControllerId;

/// Answers ownership questions for the current process.
pub trait OwnershipOracle: Send + Sync {
    /// Returns true if `controller` is owned by a connection local to this
    /// process (the player's own client, or the host's local client).
    fn is_local_owner(&self, controller: ControllerId) -> bool;

    /// Returns true if this process runs the server role (dedicated or host).
    fn is_server_process(&self) -> bool;
}
