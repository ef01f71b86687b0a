//! Host-mode interaction demo.
//!
//! One process plays both roles: it runs the authoritative server worker and
//! a local client whose hero looks at a chest and a ground item, presses the
//! interact key, and watches the server commit the result.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=debug INTERACT_SERVER_MAX_REACH=3 cargo run -p interaction-client
//! ```

mod content;
mod logging;
mod world;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use client_frontend_core::{FrontendConfig, PromptPresenter, TargetTracker, TriggerOutcome};
use glam::Vec3;
use interaction_core::{AuthorityDispatcher, ConnectionId, ControllerId, ObjectId, PromptSink};
use runtime::{Event, Runtime, RuntimeConfig, Topic};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::content::{spawn_chest, spawn_ground_item};
use crate::world::DemoWorld;

const HOST: ConnectionId = ConnectionId(0);
const HERO: ControllerId = ControllerId(1);
const CHEST: ObjectId = ObjectId(1);
const ITEM: ObjectId = ObjectId(2);

/// Prompt sink that writes to the log.
struct ConsolePrompt;

impl PromptSink for ConsolePrompt {
    fn show_prompt(&mut self, text: &str) {
        info!(target: "demo::prompt", "[E] {text}");
    }

    fn hide_prompt(&mut self) {
        info!(target: "demo::prompt", "prompt hidden");
    }
}

/// One scripted tick: where the hero looks and whether interact is pressed.
struct Step {
    look: Vec3,
    press: bool,
}

impl Step {
    const fn look(look: Vec3) -> Self {
        Self { look, press: false }
    }

    const fn press(look: Vec3) -> Self {
        Self { look, press: true }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let runtime_config = RuntimeConfig::from_env();
    let frontend_config = FrontendConfig::from_env();
    let _log_guard = logging::setup_logging()?;

    info!(?runtime_config, ?frontend_config, "starting host");

    let world = Arc::new(DemoWorld::new());
    world.move_controller(HERO, Vec3::ZERO);

    let runtime = Runtime::builder()
        .config(runtime_config)
        .positions(world.clone())
        .build()?;
    let handle = runtime.handle();
    handle.ownership().assign(HERO, HOST)?;

    let local = Arc::new(handle.local_ownership(HOST));
    let dispatcher = AuthorityDispatcher::new(local.clone());
    spawn_chest(
        &world,
        handle.directory(),
        dispatcher.clone(),
        CHEST,
        Vec3::new(0.0, 0.0, -2.0),
    )?;
    spawn_ground_item(
        &world,
        handle.directory(),
        dispatcher,
        ITEM,
        Vec3::new(1.0, 0.0, 0.0),
    )?;

    let mut tracker = TargetTracker::new(
        HERO,
        &frontend_config,
        world.clone(),
        handle.directory().clone(),
        local,
    );
    let mut prompt = PromptPresenter::new(ConsolePrompt);
    let transport = handle.transport_for(HOST, HERO);
    let mut committed = handle.subscribe(Topic::Interaction);
    let mut rejected = handle.subscribe(Topic::Rejection);

    let script = [
        Step::look(Vec3::NEG_Z),
        Step::press(Vec3::NEG_Z),
        Step::look(Vec3::NEG_Z),
        Step::press(Vec3::NEG_Z),
        Step::look(Vec3::X),
        Step::press(Vec3::X),
        Step::look(Vec3::X),
        Step::press(Vec3::X),
        Step::look(Vec3::Y),
    ];

    for (tick, step) in script.iter().enumerate() {
        let state = tracker.tick(Vec3::ZERO, step.look);
        prompt.sync(&tracker);
        debug!(target: "demo", tick, %state, available = tracker.available().len(), "tick");

        if !step.press {
            continue;
        }

        let outcome = tracker.trigger_interact(&transport);
        info!(target: "demo", tick, outcome = outcome.label(), "interact pressed");
        if matches!(outcome, TriggerOutcome::Sent(_)) {
            await_server(&mut committed, &mut rejected).await;
        }
    }

    info!(
        target: "demo",
        remaining = handle.directory().len(),
        "script finished"
    );

    runtime.shutdown().await?;
    Ok(())
}

/// Waits briefly for the server's verdict on the last request.
async fn await_server(
    committed: &mut broadcast::Receiver<Event>,
    rejected: &mut broadcast::Receiver<Event>,
) {
    let verdict = async {
        tokio::select! {
            Ok(event) = committed.recv() => Some(event),
            Ok(event) = rejected.recv() => Some(event),
            else => None,
        }
    };

    match tokio::time::timeout(Duration::from_secs(1), verdict).await {
        Ok(Some(Event::Committed(event))) => info!(
            target: "demo",
            interaction = %event.name,
            acknowledged = event.acknowledged,
            "server committed"
        ),
        Ok(Some(Event::Dropped(event))) => warn!(
            target: "demo",
            reason = %event.reason,
            "server dropped request"
        ),
        Ok(None) | Err(_) => warn!(target: "demo", "no verdict from server"),
    }
}
