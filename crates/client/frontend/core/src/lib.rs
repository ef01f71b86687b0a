//! Cross-frontend primitives for targeting and triggering interactions.
//!
//! Houses the per-tick target tracker, the prompt presenter, and frontend
//! configuration that both terminal and graphical clients can reuse.
pub mod config;
pub mod services;

pub use config::FrontendConfig;
pub use services::prompt::PromptPresenter;
pub use services::targeting::{
    AvailableInteraction, TargetTracker, TargetTransition, TargetingState, TriggerOutcome,
};
