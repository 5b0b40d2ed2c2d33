//! The weathering engine.
//!
//! All state lives in the world. The engine reads cells, decides, and writes
//! back through [`WorldAccess`]. Door writes always update both halves so a
//! door never reads as two different materials.

use patina_core::config::RUSTING;
use patina_core::{
    Block, BlockPos, CellState, DoorState, GameEvent, MaterialLevel, Sound, WorldAccess,
};
use rand::Rng;
use tracing::{debug, trace};

use crate::exposure::{exposes, weathered_cluster_size};
use crate::tuning::WeatheringTuning;

/// A level advance applied by a random tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    /// Cell that aged.
    pub pos: BlockPos,
    /// Level before the tick.
    pub from: MaterialLevel,
    /// Level after the tick.
    pub to: MaterialLevel,
}

/// How a door answered a power notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerResponse {
    /// Not a door, or the power state did not change.
    Ignored,
    /// The powered flag was stored at once. `toggled` holds the new open
    /// state when the door swung.
    Applied {
        /// New open state, if the door swung.
        toggled: Option<bool>,
    },
    /// The powered flag was stored and a deferred tick was requested.
    Scheduled {
        /// Requested delay in ticks.
        delay: u32,
    },
}

/// Runs weathering against any [`WorldAccess`].
#[derive(Debug, Clone, Default)]
pub struct WeatheringEngine {
    tuning: WeatheringTuning,
}

impl WeatheringEngine {
    /// Create an engine with the given tuning.
    pub fn new(tuning: WeatheringTuning) -> Self {
        Self { tuning }
    }

    /// The active tuning.
    pub fn tuning(&self) -> &WeatheringTuning {
        &self.tuning
    }

    /// Whether a cell should receive random ticks at all. Terminal and
    /// non-weatherable cells are skipped.
    pub fn is_randomly_ticking(cell: &CellState) -> bool {
        cell.material_level().is_some_and(|level| !level.is_terminal())
    }

    /// Random-tick hook. Advances the cell at `pos` by one level when any
    /// neighbor exposes it, and returns the change.
    pub fn random_tick<W, R>(&self, world: &mut W, pos: BlockPos, rng: &mut R) -> Option<LevelChange>
    where
        W: WorldAccess + ?Sized,
        R: Rng,
    {
        if !world.is_feature_enabled(RUSTING) {
            return None;
        }
        let cell = world.cell(pos);
        let from = cell.material_level()?;
        let to = from.next()?;

        if !self.is_exposed(world, pos, from, rng) {
            trace!(%pos, level = %from, "not exposed");
            return None;
        }

        match cell.door_state() {
            Some(door) => self.write_door(world, pos, DoorState { level: to, ..door }),
            None => world.set_cell(pos, cell.with_level(to)),
        }
        debug!(%pos, %from, %to, "material advanced");
        Some(LevelChange { pos, from, to })
    }

    fn is_exposed<W, R>(&self, world: &W, pos: BlockPos, level: MaterialLevel, rng: &mut R) -> bool
    where
        W: WorldAccess + ?Sized,
        R: Rng,
    {
        let raining_above = world.is_raining_at(pos.above());
        let bubble_threshold = self.tuning.bubble_threshold(level);
        let mut cluster_allowed = None;

        for (_, neighbor_pos) in pos.neighbors() {
            let neighbor = world.cell(neighbor_pos);
            if exposes(level, &neighbor, raining_above) {
                return true;
            }
            if neighbor.is_bubble_column() && rng.random::<f32>() > bubble_threshold {
                return true;
            }
            if level == MaterialLevel::Exposed && world.is_raining_at(neighbor_pos) {
                let allowed = *cluster_allowed.get_or_insert_with(|| self.cluster_allows(world, pos));
                if allowed && rng.random::<f32>() > self.tuning.cluster_threshold {
                    return true;
                }
            }
        }
        false
    }

    // The clustering rule needs an aged cell directly above and a sparse
    // surrounding cube.
    fn cluster_allows<W: WorldAccess + ?Sized>(&self, world: &W, pos: BlockPos) -> bool {
        let above_aged = world
            .cell(pos.above())
            .material_level()
            .is_some_and(|level| level >= MaterialLevel::Weathered);
        above_aged
            && weathered_cluster_size(world, pos, self.tuning.cluster_radius) <= self.tuning.cluster_cap
    }

    /// Power-change hook for doors.
    ///
    /// Unaffected doors follow power at once. Exposed and weathered doors
    /// store the new power state and open or close on a deferred tick. Rusted
    /// doors toggle on the rising edge only.
    pub fn power_changed<W>(&self, world: &mut W, pos: BlockPos, has_power: bool) -> PowerResponse
    where
        W: WorldAccess + ?Sized,
    {
        let Some(door) = world.cell(pos).door_state() else {
            return PowerResponse::Ignored;
        };
        if door.powered == has_power {
            return PowerResponse::Ignored;
        }

        if let Some(delay) = self.tuning.response_delay(door.level, has_power) {
            world.schedule_tick(pos, delay);
            self.write_door(world, pos, door.with_powered(has_power));
            debug!(%pos, level = %door.level, has_power, delay, "door response deferred");
            return PowerResponse::Scheduled { delay };
        }

        let open = match door.level {
            MaterialLevel::Rusted if has_power => !door.open,
            MaterialLevel::Rusted => door.open,
            _ => has_power,
        };
        let toggled = (open != door.open).then_some(open);
        if toggled.is_some() {
            announce(world, pos, open);
        }
        self.write_door(world, pos, door.with_powered(has_power).with_open(open));
        debug!(%pos, level = %door.level, has_power, open, "door power applied");
        PowerResponse::Applied { toggled }
    }

    /// Neighbor-update hook for doors. Updates caused by a door of the same
    /// level, such as the partner half, are ignored; otherwise power is
    /// sampled around both halves and forwarded to
    /// [`power_changed`](Self::power_changed).
    pub fn neighbor_changed<W>(&self, world: &mut W, pos: BlockPos, source: &Block) -> PowerResponse
    where
        W: WorldAccess + ?Sized,
    {
        let Some(door) = world.cell(pos).door_state() else {
            return PowerResponse::Ignored;
        };
        if matches!(source, Block::Door(other) if other.level == door.level) {
            return PowerResponse::Ignored;
        }
        let partner = pos.relative(door.half.partner_direction());
        let has_power = world.has_neighbor_signal(pos) || world.has_neighbor_signal(partner);
        self.power_changed(world, pos, has_power)
    }

    /// Deferred-tick hook. Inverts the open state of an exposed or weathered
    /// door and returns the new state. Stale callbacks for any other cell do
    /// nothing.
    pub fn scheduled_tick<W>(&self, world: &mut W, pos: BlockPos) -> Option<bool>
    where
        W: WorldAccess + ?Sized,
    {
        let door = world.cell(pos).door_state()?;
        if !matches!(door.level, MaterialLevel::Exposed | MaterialLevel::Weathered) {
            trace!(%pos, level = %door.level, "stale deferred tick");
            return None;
        }
        let open = !door.open;
        announce(world, pos, open);
        self.write_door(world, pos, door.with_open(open));
        debug!(%pos, open, "deferred door toggle");
        Some(open)
    }

    /// Store `door` at `pos` and mirror it onto the partner half. The partner
    /// keeps its own level if that is already further along.
    fn write_door<W: WorldAccess + ?Sized>(&self, world: &mut W, pos: BlockPos, door: DoorState) {
        let cell = world.cell(pos);
        world.set_cell(
            pos,
            CellState {
                block: Block::Door(door),
                ..cell
            },
        );

        let partner_pos = pos.relative(door.half.partner_direction());
        let partner_cell = world.cell(partner_pos);
        let Some(partner) = partner_cell.door_state() else {
            return;
        };
        if partner.half != door.half.other() {
            return;
        }
        let synced = DoorState {
            level: partner.level.merge(door.level),
            half: partner.half,
            ..door
        };
        world.set_cell(
            partner_pos,
            CellState {
                block: Block::Door(synced),
                ..partner_cell
            },
        );
    }
}

fn announce<W: WorldAccess + ?Sized>(world: &mut W, pos: BlockPos, open: bool) {
    world.play_sound(Sound::door(open), pos);
    world.emit_event(GameEvent::door(open), pos);
}
