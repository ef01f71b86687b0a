//! Identifier newtypes shared by every process role.
//!
//! Ids that cross the wire (`InteractableId`, `InteractionId`) are small
//! fixed-width integers so the interact request stays a compact frame.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::RegistryError;

/// Globally unique identifier of an [`Interactable`](crate::Interactable).
///
/// Allocated once when the owning object is created and never reused for the
/// lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractableId(pub u64);

impl fmt::Display for InteractableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of an interaction, unique within its owning interactable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionId(pub u32);

impl InteractionId {
    /// Id handed to the first interaction registered on an interactable.
    pub const FIRST: Self = Self(0);

    /// Returns the id that follows this one, or `None` once the id space is spent.
    #[inline]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Position of this interaction in its registry.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player controller entity an interaction is evaluated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerId(pub u32);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller#{}", self.0)
    }
}

/// Network connection of a client (the host's local client included).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionId(pub u32);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// Identity of a physical surface returned by the spatial query.
///
/// Only ever compared; it carries no ownership of the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Handle of a world object that owns one or more surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u64);

/// Monotonic source of [`InteractableId`]s.
///
/// The process-wide instance is reached through [`InteractableIdAllocator::global`];
/// separate allocators are useful for isolated worlds and tests.
#[derive(Debug)]
pub struct InteractableIdAllocator {
    next: AtomicU64,
}

static GLOBAL_ALLOCATOR: InteractableIdAllocator = InteractableIdAllocator::new();

impl InteractableIdAllocator {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Process-wide allocator used by [`Interactable::new`](crate::Interactable::new).
    pub fn global() -> &'static Self {
        &GLOBAL_ALLOCATOR
    }

    /// Hands out the next id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InteractableIdsExhausted`] once the counter
    /// reaches `u64::MAX`. Ids are never wrapped around and reused.
    pub fn allocate(&self) -> Result<InteractableId, RegistryError> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map(InteractableId)
            .map_err(|_| RegistryError::InteractableIdsExhausted)
    }
}

impl Default for InteractableIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_monotonic() {
        let allocator = InteractableIdAllocator::new();
        let first = allocator.allocate().unwrap();
        let second = allocator.allocate().unwrap();
        let third = allocator.allocate().unwrap();

        assert_eq!(first, InteractableId(0));
        assert!(first < second && second < third);
    }

    #[test]
    fn allocator_refuses_to_wrap() {
        let allocator = InteractableIdAllocator::starting_at(u64::MAX - 1);
        assert_eq!(allocator.allocate().unwrap(), InteractableId(u64::MAX - 1));
        assert_eq!(
            allocator.allocate(),
            Err(RegistryError::InteractableIdsExhausted)
        );
        // Still exhausted; the counter never rolls back to zero.
        assert!(allocator.allocate().is_err());
    }

    #[test]
    fn interaction_id_next_stops_at_max() {
        assert_eq!(InteractionId::FIRST.next(), Some(InteractionId(1)));
        assert_eq!(InteractionId(u32::MAX).next(), None);
    }
}
