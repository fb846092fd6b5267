use std::f64::consts::TAU;

use bevy_ecs::prelude::*;
use bevy_tweening::Lens;
use vello::{
    kurbo::{Arc, Cap, Point, Rect, Vec2},
    peniko::Color,
};

use crate::SpinnerConfig;

/// Stroke values a shape is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeState {
    /// Fraction of the path where the visible stroke begins.
    pub stroke_start: f64,
    /// Fraction of the path where the visible stroke ends.
    pub stroke_end: f64,
    /// Rotation about the path center, in radians.
    pub rotation: f64,
}

impl StrokeState {
    /// Full, unrotated outline.
    pub const FULL: Self = Self {
        stroke_start: 0.0,
        stroke_end: 1.0,
        rotation: 0.0,
    };

    #[must_use]
    pub fn get(&self, property: ShapeProperty) -> f64 {
        match property {
            ShapeProperty::StrokeStart => self.stroke_start,
            ShapeProperty::StrokeEnd => self.stroke_end,
            ShapeProperty::Rotation => self.rotation,
        }
    }

    pub fn set(&mut self, property: ShapeProperty, value: f64) {
        match property {
            ShapeProperty::StrokeStart => self.stroke_start = value,
            ShapeProperty::StrokeEnd => self.stroke_end = value,
            ShapeProperty::Rotation => self.rotation = value,
        }
    }
}

impl Default for StrokeState {
    fn default() -> Self {
        Self::FULL
    }
}

/// Drawable ring owned by a spinner entity.
///
/// The layer keeps two copies of its stroke values. `model` holds the static
/// values set at construction. `presentation` is what gets drawn: it is reset
/// to `model` every frame and then overwritten by running animations, so
/// detaching an animation reverts the ring to its static look.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ShapeLayer {
    /// Layer frame, in the spinner's own coordinate space.
    pub frame: Rect,
    /// Circle outline, absent until the first layout pass.
    pub path: Option<Arc>,
    pub stroke_color: Color,
    /// `None` leaves the ring unfilled.
    pub fill_color: Option<Color>,
    pub line_width: f64,
    pub line_cap: Cap,
    pub model: StrokeState,
    presentation: StrokeState,
}

impl ShapeLayer {
    /// Open, unfilled, round-capped ring styled from `config`.
    #[must_use]
    pub fn new(config: &SpinnerConfig) -> Self {
        Self {
            frame: Rect::ZERO,
            path: None,
            stroke_color: config.stroke_color,
            fill_color: None,
            line_width: config.stroke_width,
            line_cap: Cap::Round,
            model: StrokeState::FULL,
            presentation: StrokeState::FULL,
        }
    }

    #[must_use]
    pub fn presentation(&self) -> StrokeState {
        self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut StrokeState {
        &mut self.presentation
    }

    /// Drop any animated values and show the model state again.
    pub fn reset_presentation(&mut self) {
        self.presentation = self.model;
    }
}

/// Full clockwise circle starting at angle zero.
#[must_use]
pub fn circle_path(center: Point, radius: f64) -> Arc {
    Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: 0.0,
        sweep_angle: TAU,
        x_rotation: 0.0,
    }
}

/// Animatable property of a [`ShapeLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeProperty {
    StrokeStart,
    StrokeEnd,
    Rotation,
}

/// Values a track moves a property through.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackValues {
    FromTo { from: f64, to: f64 },
    /// Evenly spaced keyframes, interpolated linearly between neighbours.
    Keyframes(Vec<f64>),
}

impl TrackValues {
    #[must_use]
    pub fn sample(&self, ratio: f32) -> Option<f64> {
        let ratio = f64::from(ratio.clamp(0.0, 1.0));
        match self {
            Self::FromTo { from, to } => Some(from + (to - from) * ratio),
            Self::Keyframes(values) => match values.as_slice() {
                [] => None,
                [only] => Some(*only),
                _ => {
                    let segments = (values.len() - 1) as f64;
                    let position = ratio * segments;
                    let index = (position.floor() as usize).min(values.len() - 2);
                    let local = position - index as f64;
                    let (a, b) = (values[index], values[index + 1]);
                    Some(a + (b - a) * local)
                }
            },
        }
    }
}

/// Lens writing one [`ShapeProperty`] of the presentation state.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLens {
    pub property: ShapeProperty,
    pub values: TrackValues,
}

impl ShapeLens {
    #[must_use]
    pub fn from_to(property: ShapeProperty, from: f64, to: f64) -> Self {
        Self {
            property,
            values: TrackValues::FromTo { from, to },
        }
    }

    #[must_use]
    pub fn keyframes(property: ShapeProperty, values: impl Into<Vec<f64>>) -> Self {
        Self {
            property,
            values: TrackValues::Keyframes(values.into()),
        }
    }
}

impl Lens<ShapeLayer> for ShapeLens {
    fn lerp(&mut self, target: &mut ShapeLayer, ratio: f32) {
        if let Some(value) = self.values.sample(ratio) {
            target.presentation_mut().set(self.property, value);
        }
    }
}
