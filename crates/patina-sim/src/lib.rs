//! Tick-loop reference host for Patina.
//!
//! A [`Simulation`] owns a [`patina_core::GridWorld`] and runs a list of
//! systems against it once per tick. [`WeatheringSystem`] fires deferred door
//! ticks and hands out random ticks; [`FluidGrowthSystem`] offers fluid
//! sources to a generator catalog. [`Scenario`] loads all of it from JSON.

/// Simulation clock.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Fluid growth system.
pub mod fluids;
/// JSON scenario files.
pub mod scenario;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The trait that all simulation systems implement.
pub mod system;
/// Weathering system.
pub mod weathering;

/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`fluids::FluidGrowthSystem`].
pub use fluids::FluidGrowthSystem;
/// Re-exports of the scenario types.
pub use scenario::{Scenario, TimelineAction, TimelineEntry};
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-export of [`system::System`].
pub use system::System;
/// Re-export of [`weathering::WeatheringSystem`].
pub use weathering::WeatheringSystem;
