//! Circular "material" loading spinner for Bevy ECS hosts.
//!
//! A spinner is an entity carrying a [`MaterialSpinner`], its [`SpinnerFrame`],
//! the drawable [`ShapeLayer`] ring, and an `Animator<ShapeLayer>`.
//! `material_spinner` lets you:
//! - spawn spinners with a frame and an optional [`SpinnerConfig`],
//! - start and stop the looping arc animation,
//! - draw the current state into a `vello` [`Scene`](vello::Scene).
//!
//! # Minimal setup
//!
//! ```no_run
//! use material_spinner::{
//!     MaterialSpinnerPlugin, spawn_material_spinner, start_spinner,
//!     bevy_app::App,
//!     vello::kurbo::Rect,
//! };
//!
//! let mut app = App::new();
//! app.add_plugins(MaterialSpinnerPlugin);
//!
//! let spinner = spawn_material_spinner(app.world_mut(), Rect::new(0.0, 0.0, 100.0, 100.0));
//! start_spinner(app.world_mut(), spinner);
//!
//! app.update();
//! ```
#![forbid(unsafe_code)]

pub mod config;
pub mod control;
pub mod layer;
pub mod logging;
pub mod plugin;
pub mod render;
pub mod spinner;

pub use bevy_app;
pub use bevy_ecs;
pub use bevy_tweening;
pub use vello;

pub use config::*;
pub use control::*;
pub use layer::*;
pub use plugin::*;
pub use render::*;
pub use spinner::*;

pub mod prelude {
    //! Convenience exports for hosting spinners.

    pub use crate::{
        MaterialSpinner, MaterialSpinnerPlugin, SPINNER_ANIMATION_KEY, ShapeLayer, SpinnerConfig,
        SpinnerFrame, StrokeState, render_spinner, set_spinner_frame, set_spinner_paused,
        spawn_material_spinner, spawn_material_spinner_with, start_spinner, stop_spinner,
        visible_arc,
    };

    pub use crate::{bevy_app, bevy_ecs, bevy_tweening, vello};
}

#[cfg(test)]
mod tests;
