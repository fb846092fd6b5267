//! `&mut World` entry points for hosts that hold spinner entities.

use bevy_ecs::prelude::*;
use bevy_tweening::Animator;
use tracing::warn;
use vello::kurbo::Rect;

use crate::{MaterialSpinner, ShapeLayer, SpinnerConfig, SpinnerFrame};

/// Spawn a spinner with the default configuration.
pub fn spawn_material_spinner(world: &mut World, frame: Rect) -> Entity {
    spawn_material_spinner_with(world, frame, SpinnerConfig::default())
}

/// Spawn a spinner placed at `frame`.
///
/// The ring geometry is computed right away, so the static ring can be drawn
/// before the first layout pass or any call to [`start_spinner`].
pub fn spawn_material_spinner_with(world: &mut World, frame: Rect, config: SpinnerConfig) -> Entity {
    let spinner = MaterialSpinner::new(config);
    let frame = SpinnerFrame(frame);
    let mut layer = ShapeLayer::new(&config);
    spinner.update_circle(&mut layer, frame.bounds());

    world
        .spawn((spinner, frame, layer, Animator::<ShapeLayer>::new()))
        .id()
}

/// Start the spinner on `entity`. Returns `false` if it is not a spinner.
pub fn start_spinner(world: &mut World, entity: Entity) -> bool {
    let mut query = world.query::<(&mut MaterialSpinner, &mut Animator<ShapeLayer>)>();
    match query.get_mut(world, entity) {
        Ok((mut spinner, mut animator)) => {
            spinner.start(&mut animator);
            true
        }
        Err(_) => {
            warn!(?entity, "start requested for an entity that is not a spinner");
            false
        }
    }
}

/// Stop the spinner on `entity`. Returns `false` if it is not a spinner.
pub fn stop_spinner(world: &mut World, entity: Entity) -> bool {
    let mut query = world.query::<(
        &mut MaterialSpinner,
        &mut Animator<ShapeLayer>,
        &mut ShapeLayer,
    )>();
    match query.get_mut(world, entity) {
        Ok((mut spinner, mut animator, mut layer)) => {
            spinner.stop(&mut animator, &mut layer);
            true
        }
        Err(_) => {
            warn!(?entity, "stop requested for an entity that is not a spinner");
            false
        }
    }
}

/// Move or resize a spinner. The ring follows on the next layout pass.
pub fn set_spinner_frame(world: &mut World, entity: Entity, frame: Rect) -> bool {
    match world.get_mut::<SpinnerFrame>(entity) {
        Some(mut current) => {
            if current.0 != frame {
                current.0 = frame;
            }
            true
        }
        None => {
            warn!(?entity, "frame update for an entity that is not a spinner");
            false
        }
    }
}

/// Pause or resume animation stepping, e.g. while the host is off screen.
///
/// Attached animations stay attached either way.
pub fn set_spinner_paused(world: &mut World, entity: Entity, paused: bool) -> bool {
    match world.get_mut::<Animator<ShapeLayer>>(entity) {
        Some(mut animator) => {
            if paused {
                animator.pause();
            } else {
                animator.resume();
            }
            true
        }
        None => {
            warn!(?entity, "pause toggle for an entity that is not a spinner");
            false
        }
    }
}

/// Recompute ring geometry for every spinner whose layer no longer matches.
pub fn layout_material_spinners(world: &mut World) {
    let mut query = world.query::<(&MaterialSpinner, &SpinnerFrame, &mut ShapeLayer)>();
    for (spinner, frame, mut layer) in query.iter_mut(world) {
        spinner.update_circle(&mut layer, frame.bounds());
    }
}

/// Copy model stroke values into the presentation state before animations run.
pub fn reset_layer_presentation(world: &mut World) {
    let mut query = world.query::<&mut ShapeLayer>();
    for mut layer in query.iter_mut(world) {
        layer.reset_presentation();
    }
}
