//! The player's craft: a dart that always flies forward at constant speed

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use crate::direction_of;
use crate::error::SimResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Craft {
    body: Polygon,
    alive: bool,
}

impl Craft {
    pub fn new(size: f32, center: Vec2, speed: f32) -> SimResult<Self> {
        Ok(Self {
            body: Polygon::new(size, center, speed)?,
            alive: true,
        })
    }

    /// Move one step of `speed` along the current heading
    pub fn advance(&mut self) {
        let offset = direction_of(self.body.heading()) * self.body.speed();
        self.body.translate(offset);
    }

    /// Turn by `degrees` (positive = right turn on screen)
    pub fn steer(&mut self, degrees: f32) -> SimResult<()> {
        self.body.rotate(degrees)
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.body
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }
}
