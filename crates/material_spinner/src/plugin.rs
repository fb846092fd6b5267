use bevy_app::{App, Plugin, Update};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_time::TimePlugin;
use bevy_tweening::{TweeningPlugin, step_animators};

use crate::{ShapeLayer, layout_material_spinners, reset_layer_presentation};

/// Bevy plugin that lays out and animates every spinner entity each frame.
///
/// Order inside [`Update`]: ring layout, presentation reset, animation step.
/// Rendering reads the resulting presentation state afterwards.
#[derive(Default)]
pub struct MaterialSpinnerPlugin;

impl Plugin for MaterialSpinnerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<TimePlugin>() {
            app.add_plugins(TimePlugin);
        }

        if !app.is_plugin_added::<TweeningPlugin>() {
            app.add_plugins(TweeningPlugin);
        }

        app.add_systems(
            Update,
            (
                layout_material_spinners,
                reset_layer_presentation,
                step_animators::<ShapeLayer>,
            )
                .chain(),
        );
    }
}
