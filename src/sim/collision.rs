//! The per-frame collision pass
//!
//! Runs in a fixed order:
//! 1. craft against every missile
//! 2. missile against missile, every unordered pair
//! 3. craft against every coin
//!
//! Invincibility picked up in step 3 does not protect against step 1 of the
//! same frame. Every missile still in the list takes part, including one that
//! burned out earlier in the frame; it is only removed when the frame prunes.

use super::pickup::PickupEffect;
use super::state::{GameEvent, GameState};

/// Resolve all collisions for the current frame
pub fn collision_pass(state: &mut GameState) {
    craft_vs_projectiles(state);
    projectile_pairs(state);
    craft_vs_pickups(state);
}

fn craft_vs_projectiles(state: &mut GameState) {
    let now = state.clock;
    let duration = state.tuning.invincibility_secs;

    for i in 0..state.projectiles.len() {
        if state.effects.is_invincible() {
            // While invincible only the timer is checked, the pair is skipped
            if state.effects.expire_invincibility(now, duration) {
                log::debug!("Invincibility expired at t={:.2}s", now);
                state.push_event(GameEvent::InvincibilityExpired);
            }
            continue;
        }

        if state.craft.polygon().is_colliding(state.projectiles[i].polygon()) {
            state.craft.set_alive(false);
            state.projectiles[i].destroy();
        }
    }
}

fn projectile_pairs(state: &mut GameState) {
    let count = state.projectiles.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let hit = state.projectiles[i]
                .polygon()
                .is_colliding(state.projectiles[j].polygon());
            if hit {
                state.projectiles[i].destroy();
                state.projectiles[j].destroy();
            }
        }
    }
}

fn craft_vs_pickups(state: &mut GameState) {
    let mut collected = Vec::new();
    for pickup in state.pickups.iter_mut() {
        if pickup.is_hit_by(&state.craft) && pickup.collect() {
            collected.push((pickup.id, pickup.score(), pickup.effect()));
        }
    }

    for (id, score, effect) in collected {
        state.score += u64::from(score);
        log::info!("Collected coin worth {} points with effect: {}", score, effect);

        match effect {
            PickupEffect::None => {}
            PickupEffect::Invincibility => state.effects.grant_invincibility(state.clock),
            PickupEffect::ClearProjectiles => {
                for projectile in &mut state.projectiles {
                    projectile.destroy();
                }
            }
        }

        state.push_event(GameEvent::PickupCollected { id, score, effect });
    }
}
