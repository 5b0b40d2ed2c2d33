//! Core types for Patina: grid positions, cell states, material levels, and
//! the world accessor the weathering and fluid engines run against.
//!
//! The engines never own world storage. They read and write through
//! [`WorldAccess`], which a host engine implements. [`GridWorld`] is the
//! in-memory implementation used by the simulation and the tests.

/// Cell contents: blocks, fluids, and door halves.
pub mod block;
/// Feature switches passed through from host configuration.
pub mod config;
/// Sounds and game events emitted for the host to broadcast.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// In-memory reference host.
pub mod grid;
/// Ordered oxidation levels.
pub mod material;
/// Cell positions and the six axis-aligned directions.
pub mod pos;
/// Deferred tick queue.
pub mod ticks;
/// The world accessor trait.
pub mod world;

/// Re-export cell content types.
pub use block::{Block, CellState, DoorHalf, DoorState, Fluid, FluidState};
/// Re-export feature switches.
pub use config::FeatureFlags;
/// Re-export effect types.
pub use effect::{Effect, GameEvent, Sound};
/// Re-export error types.
pub use error::{PatinaError, PatinaResult};
/// Re-export the reference host.
pub use grid::{GridWorld, PlacedCell, WorldLayout};
/// Re-export the material level.
pub use material::MaterialLevel;
/// Re-export position types.
pub use pos::{BlockPos, Direction};
/// Re-export deferred tick types.
pub use ticks::{ScheduledTick, TickQueue};
/// Re-export the world accessor.
pub use world::{NeighborCache, WorldAccess};
