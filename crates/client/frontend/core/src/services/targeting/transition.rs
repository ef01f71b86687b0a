use interaction_core::{SurfaceHit, SurfaceId};

/// How this tick's hit relates to last tick's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetTransition {
    /// The ray hit nothing.
    NoTarget,
    /// Same surface as last tick; the interactable is not re-resolved.
    SameTarget,
    /// A different surface; resolve its object anew.
    NewTarget(SurfaceHit),
}

impl TargetTransition {
    pub fn classify(previous: Option<SurfaceId>, hit: Option<SurfaceHit>) -> Self {
        match hit {
            None => Self::NoTarget,
            Some(hit) if previous == Some(hit.surface) => Self::SameTarget,
            Some(hit) => Self::NewTarget(hit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interaction_core::ObjectId;

    #[test]
    fn classify_covers_all_three_paths() {
        let door = SurfaceHit::new(SurfaceId(1), ObjectId(10));
        let door_frame = SurfaceHit::new(SurfaceId(2), ObjectId(10));

        assert_eq!(
            TargetTransition::classify(Some(SurfaceId(1)), None),
            TargetTransition::NoTarget
        );
        assert_eq!(
            TargetTransition::classify(Some(SurfaceId(1)), Some(door)),
            TargetTransition::SameTarget
        );
        assert_eq!(
            TargetTransition::classify(None, Some(door)),
            TargetTransition::NewTarget(door)
        );
        // A second surface of the same object is still resolved again.
        assert_eq!(
            TargetTransition::classify(Some(SurfaceId(1)), Some(door_frame)),
            TargetTransition::NewTarget(door_frame)
        );
    }
}
