//! Collectible coins
//!
//! Every coin is worth points; some also carry an effect that the arena
//! applies when the craft picks it up.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::craft::Craft;
use crate::error::{SimError, SimResult, ensure_finite, ensure_positive};

/// Effect attached to a coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupEffect {
    /// Score only
    None,
    /// Craft ignores missiles for a while
    Invincibility,
    /// Every live missile is removed at once
    ClearProjectiles,
}

impl PickupEffect {
    pub const ALL: [PickupEffect; 3] = [
        PickupEffect::None,
        PickupEffect::Invincibility,
        PickupEffect::ClearProjectiles,
    ];

    /// Name used in tuning files
    pub fn as_str(&self) -> &'static str {
        match self {
            PickupEffect::None => "normal",
            PickupEffect::Invincibility => "invincible",
            PickupEffect::ClearProjectiles => "delete_missile",
        }
    }

    /// RGB used by the renderer
    pub fn color(&self) -> [u8; 3] {
        match self {
            PickupEffect::None => [255, 222, 33],
            PickupEffect::Invincibility => [8, 143, 143],
            PickupEffect::ClearProjectiles => [250, 128, 114],
        }
    }
}

impl fmt::Display for PickupEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickupEffect {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(PickupEffect::None),
            "invincible" => Ok(PickupEffect::Invincibility),
            "delete_missile" => Ok(PickupEffect::ClearProjectiles),
            other => Err(SimError::UnknownPickupKind(other.to_string())),
        }
    }
}

/// A coin on the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    center: Vec2,
    radius: f32,
    score: u32,
    effect: PickupEffect,
    collected: bool,
}

impl Pickup {
    pub fn new(
        id: u32,
        center: Vec2,
        radius: f32,
        score: u32,
        effect: PickupEffect,
    ) -> SimResult<Self> {
        ensure_finite("center.x", center.x)?;
        ensure_finite("center.y", center.y)?;
        let radius = ensure_positive("radius", radius)?;
        Ok(Self {
            id,
            center,
            radius,
            score,
            effect,
            collected: false,
        })
    }

    /// Build a coin from its tuning-file name ("normal", "invincible", "delete_missile")
    pub fn from_kind(
        id: u32,
        kind: &str,
        center: Vec2,
        radius: f32,
        score: u32,
    ) -> SimResult<Self> {
        let effect = kind.parse()?;
        Self::new(id, center, radius, score, effect)
    }

    /// Hit when the craft's center is strictly inside the coin
    pub fn is_hit_by(&self, other: &Craft) -> bool {
        self.center.distance(other.center()) < self.radius
    }

    /// Mark as collected. Idempotent; returns true only on the first call.
    pub fn collect(&mut self) -> bool {
        let first = !self.collected;
        self.collected = true;
        first
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn effect(&self) -> PickupEffect {
        self.effect
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    #[inline]
    pub fn color(&self) -> [u8; 3] {
        self.effect.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn craft_at(x: f32, y: f32) -> Craft {
        Craft::new(8.0, Vec2::new(x, y), 10.0).unwrap()
    }

    #[test]
    fn test_hit_uses_strict_distance() {
        let coin = Pickup::new(1, Vec2::new(100.0, 100.0), 15.0, 5, PickupEffect::None).unwrap();
        assert!(coin.is_hit_by(&craft_at(110.0, 100.0)));
        // Exactly on the rim is a miss
        assert!(!coin.is_hit_by(&craft_at(115.0, 100.0)));
        assert!(!coin.is_hit_by(&craft_at(130.0, 130.0)));
    }

    #[test]
    fn test_collect_is_idempotent() {
        let mut coin = Pickup::new(1, Vec2::ZERO, 15.0, 5, PickupEffect::None).unwrap();
        assert!(!coin.is_collected());
        assert!(coin.collect());
        assert!(!coin.collect());
        assert!(coin.is_collected());
    }

    #[test]
    fn test_factory_names() {
        for effect in PickupEffect::ALL {
            let coin = Pickup::from_kind(7, effect.as_str(), Vec2::ZERO, 15.0, 5).unwrap();
            assert_eq!(coin.effect(), effect);
        }
    }

    #[test]
    fn test_factory_rejects_unknown_kind() {
        let err = Pickup::from_kind(7, "gold", Vec2::ZERO, 15.0, 5).unwrap_err();
        assert!(matches!(err, SimError::UnknownPickupKind(ref k) if k == "gold"));
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(Pickup::new(1, Vec2::ZERO, 0.0, 5, PickupEffect::None).is_err());
        assert!(Pickup::new(1, Vec2::ZERO, f32::NAN, 5, PickupEffect::None).is_err());
    }

    #[test]
    fn test_colors_follow_effect() {
        let coin = Pickup::new(1, Vec2::ZERO, 15.0, 5, PickupEffect::Invincibility).unwrap();
        assert_eq!(coin.color(), [8, 143, 143]);
    }
}
