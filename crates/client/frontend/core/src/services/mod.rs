//! Frontend services driven once per tick.

pub mod prompt;
pub mod targeting;
