//! Demo interactables.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use anyhow::Result;
use glam::Vec3;
use interaction_core::{
    AuthorityDispatcher, Interactable, InteractionRegistry, ObjectId, Role,
};
use runtime::InteractableDirectory;
use tracing::info;

use crate::world::DemoWorld;

/// A chest offering "Open" while closed and "Close" while open.
///
/// Both client actions ask for server confirmation; only the server flips
/// the lid.
pub fn spawn_chest(
    world: &Arc<DemoWorld>,
    directory: &Arc<InteractableDirectory>,
    dispatcher: AuthorityDispatcher,
    object: ObjectId,
    at: Vec3,
) -> Result<Arc<Interactable>> {
    let open = Arc::new(AtomicBool::new(false));
    let mut registry = InteractionRegistry::new(dispatcher);

    let (closed, lid) = (Arc::clone(&open), Arc::clone(&open));
    registry.add_interaction(
        "Open",
        move |_, _| !closed.load(Ordering::SeqCst),
        move |controller, role| match role {
            Role::Client => true,
            Role::Server => {
                let changed = !lid.swap(true, Ordering::SeqCst);
                info!(target: "demo", %controller, changed, "chest opened");
                changed
            }
        },
    )?;

    let (opened, lid) = (Arc::clone(&open), open);
    registry.add_interaction(
        "Close",
        move |_, _| opened.load(Ordering::SeqCst),
        move |controller, role| match role {
            Role::Client => true,
            Role::Server => {
                let changed = lid.swap(false, Ordering::SeqCst);
                info!(target: "demo", %controller, changed, "chest closed");
                changed
            }
        },
    )?;

    place(world, directory, object, at, 0.5, registry)
}

/// An item lying on the ground that can be grabbed once.
pub fn spawn_ground_item(
    world: &Arc<DemoWorld>,
    directory: &Arc<InteractableDirectory>,
    dispatcher: AuthorityDispatcher,
    object: ObjectId,
    at: Vec3,
) -> Result<Arc<Interactable>> {
    let (weak_world, weak_directory): (Weak<DemoWorld>, Weak<InteractableDirectory>) =
        (Arc::downgrade(world), Arc::downgrade(directory));

    let mut registry = InteractionRegistry::new(dispatcher);
    registry.add_interaction(
        "Grab",
        |_, _| true,
        move |controller, role| match role {
            Role::Client => true,
            Role::Server => {
                if let Some(world) = weak_world.upgrade() {
                    world.remove(object);
                }
                let despawned = weak_directory
                    .upgrade()
                    .and_then(|directory| directory.despawn(object).ok().flatten());
                info!(target: "demo", %controller, ?object, picked_up = despawned.is_some(), "item grabbed");
                despawned.is_some()
            }
        },
    )?;

    place(world, directory, object, at, 0.25, registry)
}

fn place(
    world: &DemoWorld,
    directory: &InteractableDirectory,
    object: ObjectId,
    at: Vec3,
    radius: f32,
    registry: InteractionRegistry,
) -> Result<Arc<Interactable>> {
    let interactable = directory.spawn(object, Interactable::new(registry)?)?;
    world.place(object, at, radius);
    world.attach(object, interactable.id());
    info!(target: "demo", %interactable, ?object, position = ?at, "spawned");
    Ok(interactable)
}
