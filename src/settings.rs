//! Game balance and difficulty presets
//!
//! Every gameplay constant lives in [`Tuning`]. A JSON file may override any
//! subset of fields; anything missing keeps its default.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::error::{SimError, SimResult, ensure_finite, ensure_non_negative, ensure_positive};
use crate::sim::pickup::PickupEffect;
use crate::sim::projectile::ProjectileTuning;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a preset name, ignoring case. "medium" is accepted for Normal.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Seconds between missile waves
    pub fn projectile_spawn_interval(&self) -> f32 {
        match self {
            Difficulty::Easy => 5.0,
            Difficulty::Normal => 4.0,
            Difficulty::Hard => 3.0,
        }
    }

    /// Largest missile wave
    pub fn max_projectiles_per_wave(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Normal => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Missile launch speed
    pub fn projectile_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 5.0,
            Difficulty::Normal => 7.0,
            Difficulty::Hard => 9.0,
        }
    }
}

/// All gameplay constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Craft ===
    pub craft_size: f32,
    /// Pixels per frame
    pub craft_speed: f32,
    /// Degrees turned per frame while steering
    pub craft_turn_step: f32,
    /// Seconds of invincibility granted by a coin
    pub invincibility_secs: f32,

    // === Missiles ===
    pub projectile: ProjectileTuning,
    pub projectile_spawn_interval: f32,
    pub min_projectiles_per_wave: usize,
    pub max_projectiles_per_wave: usize,

    // === Coins ===
    pub pickup_spawn_interval: f32,
    pub pickup_score: u32,
    pub pickup_radius: f32,
    /// Coins never spawn closer than this to the arena edge
    pub pickup_margin: f32,
    /// Relative spawn weight per coin kind, keyed by kind name
    pub pickup_weights: BTreeMap<String, f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        let pickup_weights = [
            (PickupEffect::None, 0.6),
            (PickupEffect::Invincibility, 0.3),
            (PickupEffect::ClearProjectiles, 0.1),
        ]
        .into_iter()
        .map(|(effect, w)| (effect.as_str().to_string(), w))
        .collect();

        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            craft_size: 8.0,
            craft_speed: 10.0,
            craft_turn_step: 7.0,
            invincibility_secs: 3.0,

            projectile: ProjectileTuning::default(),
            projectile_spawn_interval: 4.0,
            min_projectiles_per_wave: 2,
            max_projectiles_per_wave: 3,

            pickup_spawn_interval: 4.0,
            pickup_score: 5,
            pickup_radius: 15.0,
            pickup_margin: 10.0,
            pickup_weights,
        }
    }
}

impl Tuning {
    /// Defaults with a difficulty preset applied
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut tuning = Self::default();
        tuning.apply_difficulty(difficulty);
        tuning
    }

    /// Overwrite the difficulty-dependent fields
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.projectile_spawn_interval = difficulty.projectile_spawn_interval();
        self.max_projectiles_per_wave = difficulty.max_projectiles_per_wave();
        self.projectile.speed = difficulty.projectile_speed();
    }

    /// Arena center, where the craft starts
    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Missile launch points: the four arena corners
    pub fn spawn_points(&self) -> [Vec2; 4] {
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(self.arena_width, 0.0),
            Vec2::new(0.0, self.arena_height),
            Vec2::new(self.arena_width, self.arena_height),
        ]
    }

    /// Check everything a session depends on
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive("arena_width", self.arena_width)?;
        ensure_positive("arena_height", self.arena_height)?;
        ensure_positive("craft_size", self.craft_size)?;
        ensure_finite("craft_speed", self.craft_speed)?;
        ensure_finite("craft_turn_step", self.craft_turn_step)?;
        ensure_non_negative("invincibility_secs", self.invincibility_secs)?;

        ensure_positive("projectile.size", self.projectile.size)?;
        ensure_non_negative("projectile.speed", self.projectile.speed)?;
        ensure_non_negative("projectile.acceleration", self.projectile.acceleration)?;
        ensure_non_negative("projectile.max_speed", self.projectile.max_speed)?;
        if self.projectile.max_speed < self.projectile.speed {
            return Err(SimError::InvalidParameter {
                name: "max_speed",
                value: self.projectile.max_speed,
            });
        }
        ensure_non_negative("projectile.max_turn_rate", self.projectile.max_turn_rate)?;
        ensure_positive("projectile_spawn_interval", self.projectile_spawn_interval)?;
        if self.min_projectiles_per_wave == 0
            || self.min_projectiles_per_wave > self.max_projectiles_per_wave
            || self.max_projectiles_per_wave > self.spawn_points().len()
        {
            return Err(SimError::InvalidParameter {
                name: "max_projectiles_per_wave",
                value: self.max_projectiles_per_wave as f32,
            });
        }

        ensure_positive("pickup_spawn_interval", self.pickup_spawn_interval)?;
        ensure_positive("pickup_radius", self.pickup_radius)?;
        ensure_non_negative("pickup_margin", self.pickup_margin)?;
        if self.pickup_margin * 2.0 > self.arena_width.min(self.arena_height) {
            return Err(SimError::InvalidParameter {
                name: "pickup_margin",
                value: self.pickup_margin,
            });
        }

        let mut total = 0.0;
        for (kind, weight) in &self.pickup_weights {
            kind.parse::<PickupEffect>()?;
            total += ensure_non_negative("pickup_weights", *weight)?;
        }
        if total <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "pickup_weights",
                value: total,
            });
        }
        Ok(())
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No tuning file at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Tuning>(&json) {
            Ok(tuning) => match tuning.validate() {
                Ok(()) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Rejected tuning in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Malformed tuning in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
