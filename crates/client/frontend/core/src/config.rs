//! Frontend configuration structures and loaders.

use std::env;

/// Frontend-specific configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FrontendConfig {
    /// Raycast length used by the per-tick target refresh.
    pub max_distance: f32,
    /// Evaluate predicates under the server role (cosmetic parity tracker).
    pub evaluate_as_server: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            max_distance: 2.5,
            evaluate_as_server: false,
        }
    }
}

impl FrontendConfig {
    pub const fn new(max_distance: f32, evaluate_as_server: bool) -> Self {
        Self {
            max_distance,
            evaluate_as_server,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `INTERACT_MAX_DISTANCE` - Targeting ray length (default: 2.5)
    /// - `INTERACT_TRACK_AS_SERVER` - Server-role parity tracker (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(distance) = read_env::<f32>("INTERACT_MAX_DISTANCE")
            && distance.is_finite()
        {
            config.max_distance = distance.max(0.0);
        }
        if let Some(as_server) = read_env_bool("INTERACT_TRACK_AS_SERVER") {
            config.evaluate_as_server = as_server;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
