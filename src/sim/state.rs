//! Session state and the read-only views handed to the host
//!
//! The arena owns every live entity. Nothing outside a frame step keeps
//! references into these collections.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::craft::Craft;
use super::pickup::{Pickup, PickupEffect};
use super::polygon::DART_VERTEX_COUNT;
use super::projectile::Projectile;
use crate::error::SimResult;
use crate::settings::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Craft destroyed; waiting for the host to reset
    Ended,
}

/// Timed effects currently applied to the craft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Clock time at which invincibility was last granted
    pub invincible_since: Option<f64>,
}

impl ActiveEffects {
    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_since.is_some()
    }

    /// Start or refresh invincibility
    pub fn grant_invincibility(&mut self, now: f64) {
        self.invincible_since = Some(now);
    }

    /// Seconds of invincibility left (0 when inactive or overdue)
    pub fn invincibility_remaining(&self, now: f64, duration: f32) -> f32 {
        self.invincible_since
            .map(|since| (f64::from(duration) - (now - since)).max(0.0) as f32)
            .unwrap_or(0.0)
    }

    /// Drop invincibility once its duration has elapsed. Returns true if it expired.
    pub fn expire_invincibility(&mut self, now: f64, duration: f32) -> bool {
        match self.invincible_since {
            Some(since) if now - since >= f64::from(duration) => {
                self.invincible_since = None;
                true
            }
            _ => false,
        }
    }
}

/// Things that happened during a frame, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectilesSpawned { count: usize },
    PickupSpawned { id: u32, effect: PickupEffect },
    PickupCollected { id: u32, score: u32, effect: PickupEffect },
    ProjectileExhausted { id: u32 },
    ProjectileDestroyed { id: u32 },
    InvincibilityExpired,
    CraftDestroyed { score: u64 },
}

/// Polygon as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonView {
    pub points: [Vec2; DART_VERTEX_COUNT],
    pub alive: bool,
}

/// Coin as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub center: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
    pub collected: bool,
}

/// Read-only copy of everything the host draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub invincible: bool,
    pub craft: PolygonView,
    pub projectiles: Vec<PolygonView>,
    pub pickups: Vec<PickupView>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Simulated seconds since the session started. Kept in f64 so long
    /// sessions keep frame-level resolution.
    pub clock: f64,
    pub phase: GamePhase,
    pub score: u64,
    pub craft: Craft,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub effects: ActiveEffects,
    /// Clock time of the last missile wave
    pub last_projectile_spawn: f64,
    /// Clock time of the last coin
    pub last_pickup_spawn: f64,
    /// Missiles counted at the last wave, less those lost to collisions since.
    /// Any further shortfall is a burned-out missile and scores a point.
    pub(crate) exhaustion_baseline: usize,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> SimResult<Self> {
        tuning.validate()?;
        let craft = Craft::new(tuning.craft_size, tuning.arena_center(), tuning.craft_speed)?;
        log::info!("Session started with seed: {}", seed);

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            clock: 0.0,
            phase: GamePhase::Playing,
            score: 0,
            craft,
            projectiles: Vec::new(),
            pickups: Vec::new(),
            effects: ActiveEffects::default(),
            last_projectile_spawn: 0.0,
            last_pickup_spawn: 0.0,
            exhaustion_baseline: 0,
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Restart after death: fresh craft, empty field, score 0.
    ///
    /// The clock keeps running; spawn timers restart from now.
    pub fn reset(&mut self) -> SimResult<()> {
        self.craft = Craft::new(
            self.tuning.craft_size,
            self.tuning.arena_center(),
            self.tuning.craft_speed,
        )?;
        self.projectiles.clear();
        self.pickups.clear();
        self.effects = ActiveEffects::default();
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.last_projectile_spawn = self.clock;
        self.last_pickup_spawn = self.clock;
        self.exhaustion_baseline = 0;
        self.events.clear();
        log::info!("Session reset at t={:.2}s", self.clock);
        Ok(())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain.
    ///
    /// The queue is only emptied here and by `reset`, so hosts are expected
    /// to drain it once per frame.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Seconds of invincibility left
    pub fn invincibility_remaining(&self) -> f32 {
        self.effects
            .invincibility_remaining(self.clock, self.tuning.invincibility_secs)
    }

    /// Copy out what the renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            invincible: self.effects.is_invincible(),
            craft: PolygonView {
                points: *self.craft.polygon().vertices(),
                alive: self.craft.is_alive(),
            },
            projectiles: self
                .projectiles
                .iter()
                .map(|p| PolygonView {
                    points: *p.polygon().vertices(),
                    alive: p.is_alive(),
                })
                .collect(),
            pickups: self
                .pickups
                .iter()
                .map(|p| PickupView {
                    center: p.center(),
                    radius: p.radius(),
                    color: p.color(),
                    collected: p.is_collected(),
                })
                .collect(),
        }
    }
}
