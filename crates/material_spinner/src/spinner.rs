use std::f64::consts::PI;

use bevy_ecs::prelude::*;
use bevy_tweening::{Animator, EaseFunction, RepeatCount, Tween, TweenGroup};
use tracing::{debug, trace};
use vello::kurbo::{Point, Rect};

use crate::{ShapeLayer, ShapeLens, ShapeProperty, SpinnerConfig, circle_path};

/// Key the spinner animation is attached under on the layer's [`Animator`].
pub const SPINNER_ANIMATION_KEY: &str = "animations";

/// Rotation keyframes for one cycle. Passing through π keeps the sweep clockwise.
pub const ROTATION_KEYFRAMES: [f64; 3] = [0.0, PI, 2.0 * PI];

/// Stroke start reached at the end of the first half-cycle.
pub const HEAD_MIDPOINT: f64 = 0.25;

/// Placement of a spinner inside its parent.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpinnerFrame(pub Rect);

impl SpinnerFrame {
    /// The frame in the spinner's own coordinates: zero origin, same size.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.0.size())
    }
}

/// Indefinite "material" loading spinner.
///
/// Sits next to a [`SpinnerFrame`], a [`ShapeLayer`] and an
/// `Animator<ShapeLayer>` on the same entity; see
/// [`spawn_material_spinner_with`](crate::spawn_material_spinner_with).
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MaterialSpinner {
    pub config: SpinnerConfig,
    is_animating: bool,
}

impl Default for MaterialSpinner {
    fn default() -> Self {
        Self::new(SpinnerConfig::default())
    }
}

impl MaterialSpinner {
    #[must_use]
    pub fn new(config: SpinnerConfig) -> Self {
        Self {
            config,
            is_animating: false,
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    /// Recompute the ring for `bounds` and push it onto `layer`.
    ///
    /// Stroke color and width are synced from the configuration as well.
    /// Returns `false` when the layer already matched and nothing changed.
    pub fn update_circle(&self, layer: &mut ShapeLayer, bounds: Rect) -> bool {
        let path = circle_path(bounds.center(), self.config.radius());
        let unchanged = layer.frame == bounds
            && layer.path == Some(path)
            && layer.line_width == self.config.stroke_width
            && layer.stroke_color == self.config.stroke_color;
        if unchanged {
            return false;
        }

        trace!(
            center = ?path.center,
            radius = path.radii.x,
            width = bounds.width(),
            height = bounds.height(),
            "recomputing spinner circle"
        );

        layer.stroke_color = self.config.stroke_color;
        layer.line_width = self.config.stroke_width;
        layer.path = Some(path);
        layer.frame = bounds;
        true
    }

    /// Build one cycle of the spinner animation from the current configuration.
    ///
    /// During the first half the arc grows from a point while the tail runs
    /// round the whole circle; during the second half the head chases the
    /// tail until the arc collapses again. Rotation runs across both halves.
    #[must_use]
    pub fn build_animation(&self) -> TweenGroup<ShapeLayer> {
        let cycle = self.config.cycle_duration();
        let half = cycle / 2;
        let linear = EaseFunction::Linear;

        TweenGroup::new(cycle)
            .with_tween(Tween::new(
                linear,
                cycle,
                ShapeLens::keyframes(ShapeProperty::Rotation, ROTATION_KEYFRAMES),
            ))
            .with_tween(Tween::new(
                linear,
                half,
                ShapeLens::from_to(ShapeProperty::StrokeStart, 0.0, HEAD_MIDPOINT),
            ))
            .with_tween(Tween::new(
                linear,
                half,
                ShapeLens::from_to(ShapeProperty::StrokeEnd, 0.0, 1.0),
            ))
            .with_tween(
                Tween::new(
                    linear,
                    half,
                    ShapeLens::from_to(ShapeProperty::StrokeEnd, 1.0, 1.0),
                )
                .with_begin(half),
            )
            .with_tween(
                Tween::new(
                    linear,
                    half,
                    ShapeLens::from_to(ShapeProperty::StrokeStart, HEAD_MIDPOINT, 1.0),
                )
                .with_begin(half),
            )
            .with_repeat(RepeatCount::Infinite)
            .with_remove_on_completion(false)
    }

    /// Attach the looping animation. Does nothing while already animating.
    ///
    /// Returns whether a new animation was attached.
    pub fn start(&mut self, animator: &mut Animator<ShapeLayer>) -> bool {
        if self.is_animating {
            return false;
        }

        self.is_animating = true;
        animator.add(SPINNER_ANIMATION_KEY, self.build_animation());
        debug!(
            duration = self.config.animation_duration,
            "spinner animation started"
        );
        true
    }

    /// Detach the spinner animation and show the static ring again.
    ///
    /// Safe to call when nothing is running.
    pub fn stop(&mut self, animator: &mut Animator<ShapeLayer>, layer: &mut ShapeLayer) {
        self.is_animating = false;
        let removed = animator.remove(SPINNER_ANIMATION_KEY);
        layer.reset_presentation();
        debug!(removed, "spinner animation stopped");
    }
}
