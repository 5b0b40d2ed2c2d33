use patina_core::{BlockPos, GridWorld};
use patina_fluids::GeneratorCatalog;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::fluids::FluidGrowthSystem;
use crate::system::System;
use crate::weathering::WeatheringSystem;

/// Tick loop over a [`GridWorld`].
///
/// Each tick advances the clock and the world's time together, then runs
/// every system once. Signal switches are routed to all systems as they
/// happen.
pub struct Simulation {
    world: GridWorld,
    clock: SimClock,
    rng: StdRng,
    events: EventLog,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("cells", &self.world.len())
            .field("systems", &self.systems.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a new simulation from a world and configuration. The clock
    /// starts at the world's current time.
    pub fn new(world: GridWorld, config: &SimConfig) -> Self {
        let clock = SimClock::new(world.time(), config.ticks_per_day);
        let rng = StdRng::seed_from_u64(config.seed);
        let events = EventLog::new(config.max_events);
        Self {
            world,
            clock,
            rng,
            events,
            systems: Vec::new(),
            initialized: false,
        }
    }

    /// Create a simulation with the weathering system and, when `catalog`
    /// is non-empty, the fluid growth system.
    pub fn with_default_systems(world: GridWorld, config: &SimConfig, catalog: GeneratorCatalog) -> Self {
        let mut sim = Self::new(world, config);
        sim.add_system(WeatheringSystem::new(
            config.tuning.clone(),
            config.random_tick_speed,
        ));
        if !catalog.is_empty() {
            sim.add_system(FluidGrowthSystem::new(catalog, config.fluid_interval));
        }
        sim
    }

    /// Append a system to the tick order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Run every system's `init` hook. Later calls do nothing.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
            };
            let result = system.init(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Run one tick. Initializes first if needed.
    pub fn tick(&mut self) -> SimResult<()> {
        if !self.initialized {
            self.init()?;
        }

        self.clock.advance();
        self.world.advance_time();

        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
            };
            let result = system.tick(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        Ok(())
    }

    /// Run `n` ticks.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Switch the power signal at `pos` and let every system react.
    /// Does nothing if the signal already had that state.
    pub fn set_signal(&mut self, pos: BlockPos, on: bool) -> SimResult<()> {
        if !self.initialized {
            self.init()?;
        }
        if !self.world.set_signal(pos, on) {
            return Ok(());
        }
        debug!(%pos, on, "signal switched");

        let mut ctx = SimContext {
            world: &mut self.world,
            clock: &self.clock,
            events: &mut self.events,
            rng: &mut self.rng,
        };
        let state = if on { "on" } else { "off" };
        ctx.emit(
            SimEventKind::SignalChanged { pos, on },
            format!("signal at {pos} {state}"),
        );
        for system in &mut self.systems {
            system.signal_changed(&mut ctx, pos)?;
        }
        Ok(())
    }

    /// Start or stop rain.
    pub fn set_raining(&mut self, raining: bool) {
        if self.world.is_raining() == raining {
            return;
        }
        self.world.set_raining(raining);
        let description = if raining { "rain started" } else { "rain stopped" };
        let kind = SimEventKind::WeatherChanged { raining };
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// The simulated world.
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// The simulated world, mutably.
    pub fn world_mut(&mut self) -> &mut GridWorld {
        &mut self.world
    }

    /// The simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Events recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The first registered system of type `T`.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Names of the registered systems, in tick order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Current tick number.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }
}

/// Stands in for a system while it is taken out to run.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
