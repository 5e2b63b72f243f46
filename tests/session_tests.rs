//! End-to-end frame tests driven through the public host API.
//!
//! Each test builds a session, places entities by hand and runs one or more
//! frames with `tick`, then checks what the host would observe.

use dart_evade::consts::FRAME_DT;
use dart_evade::settings::Tuning;
use dart_evade::sim::{
    Craft, GameEvent, GamePhase, GameState, Pickup, PickupEffect, Projectile, ProjectileTuning,
    Steer, TickInput, spawn_projectiles_at, tick,
};
use glam::Vec2;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Session whose timers never fire during a test
fn quiet_session() -> GameState {
    let mut state = GameState::new(2024, Tuning::default()).expect("default tuning is valid");
    state.tuning.projectile_spawn_interval = 1.0e6;
    state.tuning.pickup_spawn_interval = 1.0e6;
    state
}

fn add_coin(state: &mut GameState, at: Vec2, effect: PickupEffect) {
    let id = state.next_entity_id();
    let coin = Pickup::new(id, at, 15.0, 5, effect).unwrap();
    state.pickups.push(coin);
}

fn idle() -> TickInput {
    TickInput::default()
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn craft_flies_straight_up_by_its_speed() {
    let mut craft = Craft::new(8.0, Vec2::new(400.0, 300.0), 6.0).unwrap();
    assert_eq!(craft.polygon().vertices()[0], Vec2::new(400.0, 292.0));
    craft.advance();
    assert!((craft.center() - Vec2::new(400.0, 294.0)).length() < 1e-3);
}

#[test]
fn missile_turn_is_clamped_to_its_rate() {
    let tuning = ProjectileTuning {
        max_turn_rate: 3.5,
        ..Default::default()
    };
    let mut missile = Projectile::new(1, Vec2::ZERO, &tuning).unwrap();
    missile.face(0.0).unwrap();
    let target = Craft::new(8.0, Vec2::new(0.0, 100.0), 0.0).unwrap();

    missile.steer_toward(&target).unwrap();

    let heading = missile.polygon().heading().to_degrees();
    assert!((heading - 3.5).abs() < 1e-3, "heading was {}", heading);
}

#[test]
fn overlapping_missiles_destroy_each_other() {
    let mut state = quiet_session();
    spawn_projectiles_at(
        &mut state,
        &[
            Vec2::new(100.0, 100.0),
            Vec2::new(104.0, 100.0),
            Vec2::new(700.0, 500.0),
        ],
    );
    let survivor = state.projectiles[2].id;

    let report = tick(&mut state, &idle(), FRAME_DT);

    assert_eq!(state.projectiles.len(), 1);
    assert_eq!(state.projectiles[0].id, survivor);
    assert!(state.projectiles[0].is_alive());
    // Collisions are not fuel exhaustion: no points
    assert_eq!(report.score_delta, 0);
    let destroyed = state
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::ProjectileDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 2);
}

#[test]
fn invincible_craft_survives_a_hit() {
    let mut state = quiet_session();
    state.effects.grant_invincibility(state.clock);
    // Where the craft's nose will be after this frame's move
    spawn_projectiles_at(&mut state, &[Vec2::new(400.0, 292.0)]);

    let report = tick(&mut state, &idle(), FRAME_DT);

    assert!(!report.ended);
    assert!(state.craft.is_alive());
    assert_eq!(state.projectiles.len(), 1);
    assert!(state.projectiles[0].is_alive());
    let remaining = state.invincibility_remaining();
    assert!(remaining > 0.0 && remaining < state.tuning.invincibility_secs);
}

#[test]
fn clear_coin_removes_every_missile() {
    let mut state = quiet_session();
    spawn_projectiles_at(
        &mut state,
        &[
            Vec2::new(20.0, 20.0),
            Vec2::new(780.0, 20.0),
            Vec2::new(20.0, 580.0),
        ],
    );
    add_coin(&mut state, Vec2::new(400.0, 290.0), PickupEffect::ClearProjectiles);

    let report = tick(&mut state, &idle(), FRAME_DT);

    assert!(state.projectiles.is_empty());
    assert!(state.pickups.is_empty());
    // Coin value only; cleared missiles do not count as burned out
    assert_eq!(report.score, 5);
}

#[test]
fn burned_out_missile_scores_a_point() {
    let mut state = quiet_session();
    spawn_projectiles_at(&mut state, &[Vec2::new(780.0, 580.0)]);

    let mut total = 0;
    let mut exhausted = false;
    for _ in 0..600 {
        let report = tick(&mut state, &idle(), FRAME_DT);
        assert!(!report.ended);
        total += report.score_delta;
        exhausted |= state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::ProjectileExhausted { .. }));
    }

    assert!(exhausted);
    assert!(state.projectiles.is_empty());
    assert_eq!(total, 1);
    assert_eq!(state.score, 1);
}

#[test]
fn exhaustion_and_collision_in_the_same_frame() {
    let mut state = quiet_session();
    let cruise = state.tuning.projectile;

    // Already at top speed: burns out on its first update
    state.tuning.projectile.speed = cruise.max_speed;
    spawn_projectiles_at(&mut state, &[Vec2::new(20.0, 20.0)]);
    state.tuning.projectile = cruise;
    spawn_projectiles_at(
        &mut state,
        &[Vec2::new(700.0, 500.0), Vec2::new(704.0, 500.0)],
    );
    assert_eq!(state.projectiles.len(), 3);

    let report = tick(&mut state, &idle(), FRAME_DT);

    assert!(state.projectiles.is_empty());
    // One point for the burn-out, nothing for the collided pair
    assert_eq!(report.score_delta, 1);
    let events = state.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::ProjectileExhausted { .. }))
            .count(),
        1
    );
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::ProjectileDestroyed { .. }))
            .count(),
        2
    );
}

#[test]
fn burned_out_missile_on_the_craft_ends_the_session() {
    let mut state = quiet_session();
    state.tuning.projectile.speed = state.tuning.projectile.max_speed;
    // Where the craft will be after this frame's move
    spawn_projectiles_at(&mut state, &[Vec2::new(400.0, 290.0)]);

    let report = tick(&mut state, &idle(), FRAME_DT);

    assert!(report.ended);
    assert!(!state.craft.is_alive());
    let events = state.drain_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ProjectileExhausted { .. }))
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::CraftDestroyed { .. }))
    );
}

#[test]
fn burned_out_missile_still_destroys_a_live_one() {
    let mut state = quiet_session();
    let cruise = state.tuning.projectile;

    state.tuning.projectile.speed = cruise.max_speed;
    spawn_projectiles_at(&mut state, &[Vec2::new(100.0, 100.0)]);
    state.tuning.projectile = cruise;
    // Moves up onto the burned-out one this frame
    spawn_projectiles_at(&mut state, &[Vec2::new(100.0, 104.0)]);

    let report = tick(&mut state, &idle(), FRAME_DT);

    assert!(state.projectiles.is_empty());
    // The burn-out scores, the destroyed missile does not
    assert_eq!(report.score_delta, 1);
}

#[test]
fn coin_is_not_awarded_twice() {
    let mut state = quiet_session();
    add_coin(&mut state, Vec2::new(400.0, 290.0), PickupEffect::None);
    let first = tick(&mut state, &idle(), FRAME_DT);
    let second = tick(&mut state, &idle(), FRAME_DT);
    assert_eq!(first.score_delta, 5);
    assert_eq!(second.score_delta, 0);
}

#[test]
fn craft_hit_ends_the_session_and_reset_restarts_it() {
    let mut state = quiet_session();
    spawn_projectiles_at(&mut state, &[Vec2::new(400.0, 290.0)]);

    let report = tick(&mut state, &idle(), FRAME_DT);
    assert!(report.ended);
    assert_eq!(state.phase, GamePhase::Ended);
    assert!(!state.snapshot().craft.alive);
    assert!(
        state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::CraftDestroyed { .. }))
    );

    state.reset().unwrap();
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.projectiles.is_empty());
    let report = tick(&mut state, &idle(), FRAME_DT);
    assert!(!report.ended);
}

#[test]
fn steering_changes_the_flight_path() {
    let mut left = quiet_session();
    let mut right = quiet_session();
    let go_left = TickInput {
        steer: Steer::Left,
        ..Default::default()
    };
    let go_right = TickInput {
        steer: Steer::Right,
        ..Default::default()
    };
    for _ in 0..5 {
        tick(&mut left, &go_left, FRAME_DT);
        tick(&mut right, &go_right, FRAME_DT);
    }
    assert!(left.craft.center().x < 400.0);
    assert!(right.craft.center().x > 400.0);
}

#[test]
fn demo_session_spawns_waves_and_coins() {
    let mut state = GameState::new(77, Tuning::default()).unwrap();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut waves = 0;
    let mut coins = 0;
    for _ in 0..(60 * 9) {
        tick(&mut state, &input, FRAME_DT);
        for event in state.drain_events() {
            match event {
                GameEvent::ProjectilesSpawned { count } => {
                    assert!((2..=3).contains(&count));
                    waves += 1;
                }
                GameEvent::PickupSpawned { .. } => coins += 1,
                _ => {}
            }
        }
        if state.phase == GamePhase::Ended {
            break;
        }
    }
    assert!(waves >= 1);
    assert!(coins >= 1);
}
