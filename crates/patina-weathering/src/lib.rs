//! Weathering for Patina: iron blocks and iron doors that age one level at a
//! time when exposed to air, rain, or water, and doors whose response to
//! power depends on how far they have rusted.
//!
//! The engine is stateless apart from its [`WeatheringTuning`]. Hosts call
//! the four hooks on [`WeatheringEngine`] from their random-tick,
//! neighbor-update, power-change, and deferred-tick paths.
//!
//! ```
//! use patina_core::{BlockPos, CellState, GridWorld, MaterialLevel, WorldAccess};
//! use patina_weathering::WeatheringEngine;
//! use rand::SeedableRng;
//!
//! let mut world = GridWorld::new();
//! world.set_cell(BlockPos::ORIGIN, CellState::iron(MaterialLevel::Unaffected));
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let change = WeatheringEngine::default().random_tick(&mut world, BlockPos::ORIGIN, &mut rng);
//! assert_eq!(change.map(|c| c.to), Some(MaterialLevel::Exposed));
//! ```

/// Random-tick, power, and deferred-tick hooks.
pub mod engine;
/// Neighbor exposure predicates.
pub mod exposure;
/// Balance constants.
pub mod tuning;

pub use engine::{LevelChange, PowerResponse, WeatheringEngine};
pub use tuning::WeatheringTuning;
