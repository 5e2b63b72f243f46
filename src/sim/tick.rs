//! One simulation frame
//!
//! Order every frame: steer, move the craft, guide and move missiles,
//! collisions, prune, scoring, spawning, end check.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::collision::collision_pass;
use super::pickup::Pickup;
use super::projectile::{Projectile, ProjectileState};
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::{SimError, SimResult};
use crate::{heading_of, wrap_angle_once};

/// Missiles closer than this make the autopilot flee
const AUTOPILOT_THREAT_RANGE: f32 = 220.0;

/// Steering intent for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub steer: Steer,
    /// Idle/demo mode - the simulation steers the craft itself
    pub idle_mode: bool,
}

/// What the host gets back from a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    pub score: u64,
    pub score_delta: u64,
    pub ended: bool,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> FrameReport {
    if state.phase == GamePhase::Ended {
        return FrameReport {
            score: state.score,
            score_delta: 0,
            ended: true,
        };
    }

    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid frame time {}", dt);
        0.0
    };
    let start_score = state.score;
    state.clock += f64::from(dt);

    let steer = if input.idle_mode {
        autopilot(state)
    } else {
        input.steer
    };
    let turn = match steer {
        Steer::None => 0.0,
        Steer::Left => -state.tuning.craft_turn_step,
        Steer::Right => state.tuning.craft_turn_step,
    };
    if turn != 0.0 {
        if let Err(e) = state.craft.steer(turn) {
            log::warn!("Craft steering failed: {}", e);
        }
    }

    state.craft.advance();
    update_projectiles(state, dt);
    collision_pass(state);
    prune_and_score(state);
    spawn_projectile_wave(state);
    spawn_pickup(state);

    if !state.craft.is_alive() {
        state.phase = GamePhase::Ended;
        log::info!("Craft destroyed with score {}", state.score);
        state.push_event(GameEvent::CraftDestroyed { score: state.score });
    }

    FrameReport {
        score: state.score,
        score_delta: state.score - start_score,
        ended: state.phase == GamePhase::Ended,
    }
}

/// Guide and move every live missile.
///
/// Each missile is updated on a copy and committed only if both steps
/// succeed, so a failure leaves it exactly where it was.
fn update_projectiles(state: &mut GameState, dt: f32) {
    for projectile in state.projectiles.iter_mut() {
        if !projectile.is_alive() {
            continue;
        }
        let mut next = projectile.clone();
        let result = next
            .steer_toward(&state.craft)
            .and_then(|()| next.advance(dt));
        match result {
            Ok(()) => *projectile = next,
            Err(e) => log::warn!("Missile {} update failed: {}", projectile.id, e),
        }
    }
}

/// Remove dead missiles and collected coins, then award a point for every
/// missile that burned out since the last wave.
fn prune_and_score(state: &mut GameState) {
    let mut events = Vec::new();
    let mut destroyed = 0;
    state.projectiles.retain(|p| match p.state() {
        ProjectileState::Active => true,
        ProjectileState::Exhausted => {
            events.push(GameEvent::ProjectileExhausted { id: p.id });
            false
        }
        ProjectileState::Destroyed => {
            destroyed += 1;
            events.push(GameEvent::ProjectileDestroyed { id: p.id });
            false
        }
    });
    state.pickups.retain(|p| !p.is_collected());
    for event in events {
        state.push_event(event);
    }

    // Collision losses lower the baseline without scoring
    state.exhaustion_baseline = state.exhaustion_baseline.saturating_sub(destroyed);
    let live = state.projectiles.len();
    if live < state.exhaustion_baseline {
        state.score += (state.exhaustion_baseline - live) as u64;
        state.exhaustion_baseline = live;
    }
}

/// Launch missiles at the given points and record the new live count as the
/// exhaustion baseline. Returns the number launched.
pub fn spawn_projectiles_at(state: &mut GameState, points: &[Vec2]) -> usize {
    let mut launched = 0;
    for &center in points {
        let id = state.next_entity_id();
        match Projectile::new(id, center, &state.tuning.projectile) {
            Ok(projectile) => {
                state.projectiles.push(projectile);
                launched += 1;
            }
            Err(e) => log::warn!("Could not launch missile at {}: {}", center, e),
        }
    }
    state.exhaustion_baseline = state.projectiles.len();
    if launched > 0 {
        state.push_event(GameEvent::ProjectilesSpawned { count: launched });
    }
    launched
}

fn spawn_projectile_wave(state: &mut GameState) {
    if state.clock - state.last_projectile_spawn < f64::from(state.tuning.projectile_spawn_interval) {
        return;
    }

    let corners = state.tuning.spawn_points();
    let max = state.tuning.max_projectiles_per_wave.min(corners.len());
    let min = state.tuning.min_projectiles_per_wave.clamp(1, max.max(1));
    let count = state.rng.random_range(min..=max.max(min));
    let chosen: Vec<Vec2> = corners[..]
        .choose_multiple(&mut state.rng, count)
        .copied()
        .collect();

    let launched = spawn_projectiles_at(state, &chosen);
    state.last_projectile_spawn = state.clock;
    log::debug!("Wave of {} missiles at t={:.2}s", launched, state.clock);
}

fn spawn_pickup(state: &mut GameState) {
    if state.clock - state.last_pickup_spawn < f64::from(state.tuning.pickup_spawn_interval) {
        return;
    }
    state.last_pickup_spawn = state.clock;

    match roll_pickup(state) {
        Ok(pickup) => {
            log::debug!("Coin {} ({}) at {}", pickup.id, pickup.effect(), pickup.center());
            state.push_event(GameEvent::PickupSpawned {
                id: pickup.id,
                effect: pickup.effect(),
            });
            state.pickups.push(pickup);
        }
        Err(e) => log::warn!("Coin spawn failed: {}", e),
    }
}

/// Pick a weighted coin kind and a uniform position inside the safe margin
fn roll_pickup(state: &mut GameState) -> SimResult<Pickup> {
    let (kinds, weights): (Vec<String>, Vec<f32>) = state
        .tuning
        .pickup_weights
        .iter()
        .map(|(kind, w)| (kind.clone(), *w))
        .unzip();
    let dist = WeightedIndex::new(&weights).map_err(|_| SimError::InvalidParameter {
        name: "pickup_weights",
        value: weights.iter().sum(),
    })?;
    let kind = &kinds[dist.sample(&mut state.rng)];

    let margin = state.tuning.pickup_margin;
    let x = state
        .rng
        .random_range(margin..=state.tuning.arena_width - margin);
    let y = state
        .rng
        .random_range(margin..=state.tuning.arena_height - margin);

    let radius = state.tuning.pickup_radius;
    let score = state.tuning.pickup_score;
    let id = state.next_entity_id();
    Pickup::from_kind(id, kind, Vec2::new(x, y), radius, score)
}

/// Demo steering: flee the nearest close missile, otherwise head back
/// toward the middle when near a wall, otherwise chase the nearest coin.
fn autopilot(state: &GameState) -> Steer {
    let pos = state.craft.center();
    let heading = state.craft.polygon().heading();
    let tuning = &state.tuning;

    let threat = state
        .projectiles
        .iter()
        .filter(|p| p.is_alive())
        .map(|p| (p.center(), p.center().distance(pos)))
        .filter(|(_, d)| *d < AUTOPILOT_THREAT_RANGE)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let wall_margin = tuning.craft_speed * 8.0;
    let near_wall = pos.x < wall_margin
        || pos.y < wall_margin
        || pos.x > tuning.arena_width - wall_margin
        || pos.y > tuning.arena_height - wall_margin;

    let desired = if near_wall {
        heading_of(tuning.arena_center() - pos)
    } else if let Some((missile, _)) = threat {
        heading_of(pos - missile)
    } else if let Some(coin) = state.pickups.iter().min_by(|a, b| {
        a.center()
            .distance(pos)
            .partial_cmp(&b.center().distance(pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        heading_of(coin.center() - pos)
    } else {
        return Steer::None;
    };

    let diff = wrap_angle_once(desired - heading);
    let dead_zone = tuning.craft_turn_step.to_radians() / 2.0;
    if diff > dead_zone {
        Steer::Right
    } else if diff < -dead_zone {
        Steer::Left
    } else {
        Steer::None
    }
}
