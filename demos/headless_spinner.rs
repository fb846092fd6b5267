use std::time::Duration;

use material_spinner::{
    MaterialSpinner, MaterialSpinnerPlugin, ShapeLayer, SpinnerConfig, SpinnerFrame,
    bevy_app::App,
    logging::init_logging,
    render_spinner, spawn_material_spinner_with, start_spinner, stop_spinner,
    vello::{Scene, kurbo::Rect, peniko::Color},
};
use tracing::info;

const FRAMES: usize = 120;
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Drives one spinner headlessly, rendering each frame into a `vello` scene.
///
/// `cargo run -p material_spinner --example headless_spinner`
fn main() {
    init_logging();

    let config = SpinnerConfig::default()
        .with_size(70.0)
        .with_background_color(Color::from_rgba8(0, 0, 0, 255))
        .with_stroke_color(Color::from_rgba8(255, 255, 0, 255))
        .with_stroke_width(10.0);

    let mut app = App::new();
    app.add_plugins(MaterialSpinnerPlugin);

    let entity = spawn_material_spinner_with(
        app.world_mut(),
        Rect::new(0.0, 0.0, 320.0, 480.0),
        config,
    );
    start_spinner(app.world_mut(), entity);

    let mut scene = Scene::new();
    for frame in 0..FRAMES {
        app.update();

        let world = app.world();
        let (Some(spinner), Some(placement), Some(layer)) = (
            world.get::<MaterialSpinner>(entity),
            world.get::<SpinnerFrame>(entity),
            world.get::<ShapeLayer>(entity),
        ) else {
            break;
        };

        scene.reset();
        render_spinner(&mut scene, placement.0, layer, spinner.config.background_color);

        if frame % 30 == 0 {
            let state = layer.presentation();
            info!(
                frame,
                stroke_start = state.stroke_start,
                stroke_end = state.stroke_end,
                rotation = state.rotation,
                "spinner frame"
            );
        }

        std::thread::sleep(FRAME_TIME);
    }

    stop_spinner(app.world_mut(), entity);
    info!("spinner stopped");
}
