//! Dart Evade - A missile-dodging arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (geometry, guidance, collisions, spawning)
//! - `settings`: Data-driven game balance and difficulty presets
//! - `highscores`: Persisted best score
//! - `error`: Error types shared by the simulation and persistence

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use highscores::HighScore;
pub use settings::{Difficulty, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed frame step used by the native driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions (pixels, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Indented tail of the dart, as a fraction of its size below the center
    pub const DART_TAIL_INSET: f32 = 0.3;
}

/// Bring an angle difference into (-π, π] with a single ±2π correction.
///
/// Only valid for inputs in (-3π, 3π), which covers any difference of two
/// `atan2` results.
#[inline]
pub fn wrap_angle_once(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if angle > PI {
        angle - TAU
    } else if angle <= -PI {
        angle + TAU
    } else {
        angle
    }
}

/// Heading (radians) of a direction vector
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector for a heading (radians)
#[inline]
pub fn direction_of(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}
