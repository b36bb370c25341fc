//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Removals are decided during a pass and applied after it
//! - No rendering or platform dependencies

pub mod collision;
pub mod mask;
pub mod ship;
pub mod state;
pub mod tick;

pub use collision::{Entity, overlaps};
pub use mask::Mask;
pub use ship::{Projectile, Ship, ShipVariant};
pub use state::{GameEvent, GamePhase, GameState, ProjectileKind, ShipSide, ShipTier};
pub use tick::{TickInput, generate_wave, tick};
