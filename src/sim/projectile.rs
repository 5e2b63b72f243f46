//! Homing missiles
//!
//! A missile accelerates every update until it reaches its top speed, at
//! which point it runs out of fuel and dies on the next update. Each tick it
//! turns toward the craft by at most `max_turn_rate` degrees, always the
//! short way round.
//!
//! Callers steer before advancing: `advance` moves along the heading it sees
//! at the start of the call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::craft::Craft;
use super::polygon::Polygon;
use crate::error::{SimError, SimResult, ensure_finite, ensure_non_negative};
use crate::{direction_of, heading_of, wrap_angle_once};

/// Gameplay tuning for missiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Dart size in pixels
    pub size: f32,
    /// Launch speed in pixels per frame
    pub speed: f32,
    /// Speed gained per second of simulated time
    pub acceleration: f32,
    /// Top speed; reaching it exhausts the fuel
    pub max_speed: f32,
    /// Largest turn per guidance update, in degrees
    pub max_turn_rate: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            size: 5.0,
            speed: 7.0,
            acceleration: 0.5,
            max_speed: 10.0,
            max_turn_rate: 3.5,
        }
    }
}

/// Lifecycle of a missile. Both non-active states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileState {
    Active,
    /// Reached top speed and burned out
    Exhausted,
    /// Hit the craft, another missile, or was cleared by a pickup
    Destroyed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    body: Polygon,
    acceleration: f32,
    max_speed: f32,
    max_turn_rate: f32,
    state: ProjectileState,
}

impl Projectile {
    /// Build a missile at `center`, nose up. The launch speed must not exceed
    /// the top speed.
    pub fn new(id: u32, center: Vec2, tuning: &ProjectileTuning) -> SimResult<Self> {
        let acceleration = ensure_non_negative("acceleration", tuning.acceleration)?;
        let speed = ensure_non_negative("speed", tuning.speed)?;
        let max_speed = ensure_non_negative("max_speed", tuning.max_speed)?;
        if max_speed < speed {
            return Err(SimError::InvalidParameter {
                name: "max_speed",
                value: max_speed,
            });
        }
        let max_turn_rate = ensure_non_negative("max_turn_rate", tuning.max_turn_rate)?;
        Ok(Self {
            id,
            body: Polygon::new(tuning.size, center, speed)?,
            acceleration,
            max_speed,
            max_turn_rate,
            state: ProjectileState::Active,
        })
    }

    /// Turn toward the craft, limited to `max_turn_rate` degrees
    pub fn steer_toward(&mut self, target: &Craft) -> SimResult<()> {
        self.steer_toward_point(target.center())
    }

    /// Turn toward an arbitrary point, limited to `max_turn_rate` degrees
    pub fn steer_toward_point(&mut self, target: Vec2) -> SimResult<()> {
        ensure_finite("target.x", target.x)?;
        ensure_finite("target.y", target.y)?;
        if !self.is_alive() {
            return Ok(());
        }

        let heading = self.body.heading();
        let bearing = heading_of(target - self.body.center());

        let max_turn = self.max_turn_rate.to_radians();
        let diff = wrap_angle_once(bearing - heading).clamp(-max_turn, max_turn);

        self.body.rotate(diff.to_degrees())
    }

    /// Accelerate and move one step along the current heading.
    ///
    /// A missile already at top speed burns out instead of moving.
    pub fn advance(&mut self, dt: f32) -> SimResult<()> {
        let dt = ensure_non_negative("dt", dt)?;
        if !self.is_alive() {
            return Ok(());
        }

        if self.body.speed() == self.max_speed {
            self.state = ProjectileState::Exhausted;
            return Ok(());
        }

        let speed = (self.body.speed() + self.acceleration * dt).min(self.max_speed);
        let heading = self.body.heading();
        self.body.set_speed(speed);
        self.body.translate(direction_of(heading) * speed);
        Ok(())
    }

    /// Mark as destroyed (collision or clear effect). No effect once terminal.
    pub fn destroy(&mut self) {
        if self.state == ProjectileState::Active {
            self.state = ProjectileState::Destroyed;
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == ProjectileState::Active
    }

    #[inline]
    pub fn state(&self) -> ProjectileState {
        self.state
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.body
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.body.speed()
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    pub fn max_turn_rate(&self) -> f32 {
        self.max_turn_rate
    }

    /// Point the nose at a heading in degrees (used when placing test missiles)
    pub fn face(&mut self, heading_degrees: f32) -> SimResult<()> {
        let current = self.body.heading().to_degrees();
        self.body.rotate(heading_degrees - current)
    }
}
