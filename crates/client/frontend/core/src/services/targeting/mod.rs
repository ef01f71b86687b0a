//! Target acquisition service for the interaction prompt.
//!
//! Each tick the [`TargetTracker`] casts a ray, decides whether the hit is
//! the same target as last tick, and re-filters the target's interactions
//! for the local observer. Only the first available interaction is shown and
//! triggerable.

mod outcome;
mod tracker;
mod transition;

pub use outcome::TriggerOutcome;
pub use tracker::{AvailableInteraction, TargetTracker, TargetingState};
pub use transition::TargetTransition;
