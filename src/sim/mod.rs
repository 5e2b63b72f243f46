//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Single-threaded, one blocking `tick` per frame
//! - Seeded RNG only, so a run replays identically from its seed
//! - No rendering, input or file access

pub mod collision;
pub mod craft;
pub mod pickup;
pub mod polygon;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::collision_pass;
pub use craft::Craft;
pub use pickup::{Pickup, PickupEffect};
pub use polygon::{Aabb, Polygon, overlaps};
pub use projectile::{Projectile, ProjectileState, ProjectileTuning};
pub use state::{
    ActiveEffects, GameEvent, GamePhase, GameState, PickupView, PolygonView, Snapshot,
};
pub use tick::{FrameReport, Steer, TickInput, spawn_projectiles_at, tick};
