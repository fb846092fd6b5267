use std::{f64::consts::PI, time::Duration};

use bevy_app::App;
use bevy_ecs::prelude::*;
use bevy_time::Time;
use bevy_tweening::{Animator, step_animators};
use vello::kurbo::{Point, Rect};

use crate::{
    MaterialSpinner, MaterialSpinnerPlugin, SPINNER_ANIMATION_KEY, ShapeLayer, SpinnerConfig,
    StrokeState, layout_material_spinners, reset_layer_presentation, set_spinner_frame,
    set_spinner_paused, spawn_material_spinner, spawn_material_spinner_with, start_spinner,
    stop_spinner,
};

fn test_world() -> World {
    let mut world = World::new();
    world.insert_resource(Time::<()>::default());
    world
}

/// Run one frame the same way [`MaterialSpinnerPlugin`] orders it.
fn run_frame(world: &mut World, delta: Duration) {
    world.resource_mut::<Time>().advance_by(delta);
    layout_material_spinners(world);
    reset_layer_presentation(world);
    step_animators::<ShapeLayer>(world);
}

fn layer(world: &World, entity: Entity) -> &ShapeLayer {
    world.get::<ShapeLayer>(entity).expect("spinner should have a layer")
}

fn spinner(world: &World, entity: Entity) -> &MaterialSpinner {
    world
        .get::<MaterialSpinner>(entity)
        .expect("spinner component should exist")
}

fn animator(world: &World, entity: Entity) -> &Animator<ShapeLayer> {
    world
        .get::<Animator<ShapeLayer>>(entity)
        .expect("spinner should have an animator")
}

fn assert_state(actual: StrokeState, start: f64, end: f64, rotation: f64) {
    let eps = 1e-5;
    assert!(
        (actual.stroke_start - start).abs() < eps
            && (actual.stroke_end - end).abs() < eps
            && (actual.rotation - rotation).abs() < eps,
        "expected start={start} end={end} rotation={rotation}, got {actual:?}"
    );
}

#[test]
fn construction_lays_out_static_ring() {
    let mut world = test_world();
    let config = SpinnerConfig::default().with_size(70.0).with_stroke_width(10.0);
    let entity = spawn_material_spinner_with(&mut world, Rect::new(30.0, 40.0, 130.0, 140.0), config);

    let layer = layer(&world, entity);
    let path = layer.path.expect("ring should be laid out at construction");
    assert_eq!(path.center, Point::new(50.0, 50.0));
    assert_eq!(path.radii.x, 30.0);
    assert_eq!(layer.frame, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(layer.presentation(), StrokeState::FULL);
    assert!(!spinner(&world, entity).is_animating());
}

#[test]
fn layer_follows_every_frame_change() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));

    for (width, height) in [(200.0, 80.0), (60.0, 60.0), (0.0, 0.0), (300.0, 500.0)] {
        assert!(set_spinner_frame(
            &mut world,
            entity,
            Rect::new(5.0, 5.0, 5.0 + width, 5.0 + height)
        ));
        run_frame(&mut world, Duration::ZERO);

        let layer = layer(&world, entity);
        let path = layer.path.expect("ring should stay laid out");
        assert_eq!(layer.frame, Rect::new(0.0, 0.0, width, height));
        assert_eq!(path.center, Point::new(width / 2.0, height / 2.0));
        assert_eq!(path.radii.x, (50.0 - 1.5) / 2.0);
    }
}

#[test]
fn config_changes_apply_on_next_layout() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));

    world
        .get_mut::<MaterialSpinner>(entity)
        .expect("spinner component should exist")
        .config
        .size = 90.0;
    run_frame(&mut world, Duration::ZERO);

    let path = layer(&world, entity).path.expect("ring should be laid out");
    assert_eq!(path.radii.x, (90.0 - 1.5) / 2.0);
}

#[test]
fn starting_twice_attaches_one_animation() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));

    assert!(start_spinner(&mut world, entity));
    assert!(start_spinner(&mut world, entity));

    assert!(spinner(&world, entity).is_animating());
    assert_eq!(animator(&world, entity).len(), 1);
    assert!(animator(&world, entity).contains(SPINNER_ANIMATION_KEY));
}

#[test]
fn stopping_twice_leaves_nothing_attached() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));

    start_spinner(&mut world, entity);
    assert!(stop_spinner(&mut world, entity));
    assert!(stop_spinner(&mut world, entity));

    assert!(!spinner(&world, entity).is_animating());
    assert!(animator(&world, entity).is_empty());
}

#[test]
fn start_then_stop_restores_the_constructed_ring() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));
    let constructed = layer(&world, entity).clone();

    start_spinner(&mut world, entity);
    run_frame(&mut world, Duration::from_millis(300));
    run_frame(&mut world, Duration::from_millis(900));
    assert_ne!(layer(&world, entity).presentation(), StrokeState::FULL);

    stop_spinner(&mut world, entity);
    assert_eq!(layer(&world, entity), &constructed);

    run_frame(&mut world, Duration::from_millis(300));
    assert_eq!(layer(&world, entity), &constructed);
}

#[test]
fn presentation_follows_the_cycle() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));
    start_spinner(&mut world, entity);

    // Quarter cycle: arc growing, head trailing slowly.
    run_frame(&mut world, Duration::from_millis(500));
    assert_state(layer(&world, entity).presentation(), 0.125, 0.5, PI / 2.0);

    // Midpoint: second-half tracks take over.
    run_frame(&mut world, Duration::from_millis(500));
    assert_state(layer(&world, entity).presentation(), 0.25, 1.0, PI);

    // Three quarters: head chasing a held tail.
    run_frame(&mut world, Duration::from_millis(500));
    assert_state(layer(&world, entity).presentation(), 0.625, 1.0, 1.5 * PI);

    // Wrapped into the next cycle.
    run_frame(&mut world, Duration::from_millis(1_000));
    assert_state(layer(&world, entity).presentation(), 0.125, 0.5, PI / 2.0);
}

#[test]
fn duration_is_read_only_at_start() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));
    start_spinner(&mut world, entity);

    world
        .get_mut::<MaterialSpinner>(entity)
        .expect("spinner component should exist")
        .config
        .animation_duration = 4.0;

    let running = animator(&world, entity)
        .get(SPINNER_ANIMATION_KEY)
        .map(|group| group.duration());
    assert_eq!(running, Some(Duration::from_secs(2)));

    run_frame(&mut world, Duration::from_millis(500));
    assert_state(layer(&world, entity).presentation(), 0.125, 0.5, PI / 2.0);

    stop_spinner(&mut world, entity);
    start_spinner(&mut world, entity);
    let restarted = animator(&world, entity)
        .get(SPINNER_ANIMATION_KEY)
        .map(|group| group.duration());
    assert_eq!(restarted, Some(Duration::from_secs(4)));
}

#[test]
fn pause_keeps_animation_attached() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));
    start_spinner(&mut world, entity);
    run_frame(&mut world, Duration::from_millis(500));

    assert!(set_spinner_paused(&mut world, entity, true));
    run_frame(&mut world, Duration::from_millis(700));
    assert!(spinner(&world, entity).is_animating());
    assert!(animator(&world, entity).contains(SPINNER_ANIMATION_KEY));
    assert_state(layer(&world, entity).presentation(), 0.125, 0.5, PI / 2.0);

    assert!(set_spinner_paused(&mut world, entity, false));
    run_frame(&mut world, Duration::from_millis(1_000));
    assert_state(layer(&world, entity).presentation(), 0.625, 1.0, 1.5 * PI);
}

#[test]
fn stop_removes_animation_after_resize_and_pause() {
    let mut world = test_world();
    let entity = spawn_material_spinner(&mut world, Rect::new(0.0, 0.0, 100.0, 100.0));
    start_spinner(&mut world, entity);

    set_spinner_frame(&mut world, entity, Rect::new(0.0, 0.0, 240.0, 120.0));
    set_spinner_paused(&mut world, entity, true);
    run_frame(&mut world, Duration::from_millis(250));

    stop_spinner(&mut world, entity);
    assert!(animator(&world, entity).is_empty());
    assert_eq!(layer(&world, entity).presentation(), StrokeState::FULL);
}

#[test]
fn control_calls_on_other_entities_are_rejected() {
    let mut world = test_world();
    let other = world.spawn_empty().id();

    assert!(!start_spinner(&mut world, other));
    assert!(!stop_spinner(&mut world, other));
    assert!(!set_spinner_frame(&mut world, other, Rect::ZERO));
    assert!(!set_spinner_paused(&mut world, other, true));
}

#[test]
fn plugin_wires_layout_and_animation() {
    let mut app = App::new();
    app.add_plugins(MaterialSpinnerPlugin);

    let entity = spawn_material_spinner(app.world_mut(), Rect::new(0.0, 0.0, 100.0, 100.0));
    start_spinner(app.world_mut(), entity);
    set_spinner_frame(app.world_mut(), entity, Rect::new(0.0, 0.0, 64.0, 64.0));

    app.update();
    app.update();

    let world = app.world();
    assert!(spinner(world, entity).is_animating());
    assert!(animator(world, entity).contains(SPINNER_ANIMATION_KEY));
    assert_eq!(layer(world, entity).frame, Rect::new(0.0, 0.0, 64.0, 64.0));
}
