//! In-memory reference host.
//!
//! [`GridWorld`] stores cells sparsely, tracks rain with a per-column height
//! index, keeps a set of powered cells, owns the deferred tick queue and
//! records every emitted effect. It is what the simulation and the tests run
//! against; a real game engine would implement [`WorldAccess`] itself.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::block::{Block, CellState, DoorHalf, DoorState};
use crate::config::FeatureFlags;
use crate::effect::{Effect, GameEvent, Sound};
use crate::error::{PatinaError, PatinaResult};
use crate::pos::BlockPos;
use crate::ticks::{ScheduledTick, TickQueue};
use crate::world::WorldAccess;

/// One stored cell in a [`WorldLayout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCell {
    /// Where the cell sits.
    pub pos: BlockPos,
    /// What it holds.
    #[serde(flatten)]
    pub cell: CellState,
}

/// Serializable description of a world's starting state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    /// Whether it is raining.
    pub raining: bool,
    /// Feature switches.
    pub features: FeatureFlags,
    /// Cells carrying a power signal.
    pub signals: Vec<BlockPos>,
    /// Every non-air cell.
    pub cells: Vec<PlacedCell>,
}

/// Sparse in-memory grid implementing [`WorldAccess`].
#[derive(Debug, Clone, Default)]
pub struct GridWorld {
    cells: HashMap<BlockPos, CellState>,
    // Occupied heights per (x, z) column, for sky exposure.
    columns: HashMap<(i32, i32), BTreeSet<i32>>,
    signals: HashSet<BlockPos>,
    raining: bool,
    features: FeatureFlags,
    ticks: TickQueue,
    time: u64,
    effects: Vec<Effect>,
}

impl GridWorld {
    /// Create an empty, dry world with default features.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the feature switches.
    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Build a world from a layout, checking that every door is paired.
    pub fn from_layout(layout: WorldLayout) -> PatinaResult<Self> {
        let mut world = Self::new().with_features(layout.features);
        world.raining = layout.raining;
        let mut seen = HashSet::new();
        for placed in layout.cells {
            if !seen.insert(placed.pos) {
                return Err(PatinaError::DuplicateCell(placed.pos));
            }
            world.set_cell(placed.pos, placed.cell);
        }
        for pos in layout.signals {
            world.signals.insert(pos);
        }
        world.check_doors()?;
        Ok(world)
    }

    /// Parse a JSON [`WorldLayout`] and build a world from it.
    pub fn from_json(json: &str) -> PatinaResult<Self> {
        let layout: WorldLayout = serde_json::from_str(json)?;
        Self::from_layout(layout)
    }

    /// Snapshot the current state as a layout. Cells come out sorted by
    /// position.
    pub fn to_layout(&self) -> WorldLayout {
        let mut cells: Vec<PlacedCell> = self
            .cells
            .iter()
            .map(|(pos, cell)| PlacedCell {
                pos: *pos,
                cell: cell.clone(),
            })
            .collect();
        cells.sort_by_key(|c| c.pos);
        let mut signals: Vec<BlockPos> = self.signals.iter().copied().collect();
        signals.sort();
        WorldLayout {
            raining: self.raining,
            features: self.features.clone(),
            signals,
            cells,
        }
    }

    /// Place a two-cell door with its lower half at `lower`. Both cells must
    /// be empty.
    pub fn place_door(&mut self, lower: BlockPos, door: DoorState) -> PatinaResult<()> {
        let upper = lower.above();
        for pos in [lower, upper] {
            if !self.cell(pos).is_air() {
                return Err(PatinaError::Occupied(pos));
            }
        }
        self.set_cell(
            lower,
            CellState::door(DoorState {
                half: DoorHalf::Lower,
                ..door
            }),
        );
        self.set_cell(
            upper,
            CellState::door(DoorState {
                half: DoorHalf::Upper,
                ..door
            }),
        );
        Ok(())
    }

    fn check_doors(&self) -> PatinaResult<()> {
        for (pos, cell) in &self.cells {
            let Some(door) = cell.door_state() else {
                continue;
            };
            let partner = self
                .cells
                .get(&pos.relative(door.half.partner_direction()))
                .and_then(CellState::door_state);
            if partner.is_none_or(|p| p.half != door.half.other()) {
                return Err(PatinaError::UnpairedDoor(*pos));
            }
        }
        Ok(())
    }

    /// Whether it is raining anywhere.
    pub fn is_raining(&self) -> bool {
        self.raining
    }

    /// Start or stop rain.
    pub fn set_raining(&mut self, raining: bool) {
        self.raining = raining;
    }

    /// Feature switches in effect.
    pub fn features(&self) -> &FeatureFlags {
        &self.features
    }

    /// Turn the power signal at `pos` on or off. Returns whether it changed.
    pub fn set_signal(&mut self, pos: BlockPos, on: bool) -> bool {
        if on {
            self.signals.insert(pos)
        } else {
            self.signals.remove(&pos)
        }
    }

    /// Whether `pos` itself carries a signal.
    pub fn is_signal(&self, pos: BlockPos) -> bool {
        self.signals.contains(&pos)
    }

    /// Current world time in ticks.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Move world time forward by one tick and return the new time.
    pub fn advance_time(&mut self) -> u64 {
        self.time += 1;
        self.time
    }

    /// Remove every deferred tick due by the current time, in firing order.
    pub fn take_due_ticks(&mut self) -> Vec<ScheduledTick> {
        self.ticks.drain_due(self.time)
    }

    /// The deferred tick queue.
    pub fn ticks(&self) -> &TickQueue {
        &self.ticks
    }

    /// Every effect emitted so far.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Iterate over every stored (non-air) cell.
    pub fn cells(&self) -> impl Iterator<Item = (BlockPos, &CellState)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Positions of stored cells matching `predicate`, sorted.
    pub fn positions_where(&self, predicate: impl Fn(&CellState) -> bool) -> Vec<BlockPos> {
        let mut positions: Vec<BlockPos> = self
            .cells
            .iter()
            .filter(|(_, cell)| predicate(cell))
            .map(|(pos, _)| *pos)
            .collect();
        positions.sort();
        positions
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if every cell is air.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Highest occupied cell in the column through `(x, z)`.
    fn top_y(&self, x: i32, z: i32) -> Option<i32> {
        self.columns
            .get(&(x, z))
            .and_then(|ys| ys.last().copied())
    }

    fn index_insert(&mut self, pos: BlockPos) {
        self.columns.entry((pos.x, pos.z)).or_default().insert(pos.y);
    }

    fn index_remove(&mut self, pos: BlockPos) {
        if let Some(ys) = self.columns.get_mut(&(pos.x, pos.z)) {
            ys.remove(&pos.y);
            if ys.is_empty() {
                self.columns.remove(&(pos.x, pos.z));
            }
        }
    }
}

impl WorldAccess for GridWorld {
    fn cell(&self, pos: BlockPos) -> CellState {
        self.cells.get(&pos).cloned().unwrap_or_default()
    }

    fn set_cell(&mut self, pos: BlockPos, cell: CellState) {
        if cell.is_air() {
            if self.cells.remove(&pos).is_some() {
                self.index_remove(pos);
            }
        } else {
            self.cells.insert(pos, cell);
            self.index_insert(pos);
        }
    }

    fn is_raining_at(&self, pos: BlockPos) -> bool {
        self.raining && self.top_y(pos.x, pos.z).is_none_or(|top| top < pos.y)
    }

    fn has_neighbor_signal(&self, pos: BlockPos) -> bool {
        self.is_signal(pos) || pos.neighbors().any(|(_, n)| self.is_signal(n))
    }

    fn schedule_tick(&mut self, pos: BlockPos, delay: u32) {
        let tick = self.ticks.schedule(pos, self.time, delay);
        trace!(%pos, due = tick.due, "scheduled deferred tick");
    }

    fn emit_event(&mut self, event: GameEvent, pos: BlockPos) {
        self.effects.push(Effect::Event { event, pos });
    }

    fn play_sound(&mut self, sound: Sound, pos: BlockPos) {
        self.effects.push(Effect::Sound { sound, pos });
    }

    fn is_feature_enabled(&self, flag: &str) -> bool {
        self.features.is_enabled(flag)
    }
}

/// Count the cells of a block kind in a world, keyed by block name.
pub fn block_census(world: &GridWorld) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for (_, cell) in world.cells() {
        let name = match (&cell.block, &cell.fluid) {
            (Block::Air, Some(fluid)) => fluid.fluid.to_string(),
            (block, _) => block.name(),
        };
        *counts.entry(name).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort();
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialLevel;

    #[test]
    fn unset_cells_read_as_air() {
        let world = GridWorld::new();
        assert!(world.cell(BlockPos::new(5, 5, 5)).is_air());
        assert!(world.is_empty());
    }

    #[test]
    fn writing_air_removes_the_cell() {
        let mut world = GridWorld::new();
        let pos = BlockPos::new(1, 1, 1);
        world.set_cell(pos, CellState::block(Block::Stone));
        assert_eq!(world.len(), 1);
        assert_eq!(world.top_y(1, 1), Some(1));
        world.set_cell(pos, CellState::air());
        assert!(world.is_empty());
        assert_eq!(world.top_y(1, 1), None);
    }

    #[test]
    fn rain_needs_open_sky() {
        let mut world = GridWorld::new();
        let pos = BlockPos::new(0, 0, 0);
        assert!(!world.is_raining_at(pos));

        world.set_raining(true);
        assert!(world.is_raining_at(pos));

        world.set_cell(BlockPos::new(0, 5, 0), CellState::block(Block::Stone));
        assert!(!world.is_raining_at(pos));
        assert!(world.is_raining_at(BlockPos::new(0, 6, 0)));
        // A different column is unaffected.
        assert!(world.is_raining_at(BlockPos::new(1, 0, 0)));
    }

    #[test]
    fn signals_reach_face_neighbors() {
        let mut world = GridWorld::new();
        let pos = BlockPos::new(0, 0, 0);
        assert!(world.set_signal(pos.relative(crate::pos::Direction::West), true));
        assert!(world.has_neighbor_signal(pos));
        assert!(!world.has_neighbor_signal(BlockPos::new(5, 0, 0)));
        assert!(!world.set_signal(pos.relative(crate::pos::Direction::West), true));
    }

    #[test]
    fn scheduled_ticks_use_world_time() {
        let mut world = GridWorld::new();
        let pos = BlockPos::new(0, 0, 0);
        world.advance_time();
        world.schedule_tick(pos, 2);
        world.advance_time();
        assert!(world.take_due_ticks().is_empty());
        world.advance_time();
        let due = world.take_due_ticks();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].due, 3);
    }

    #[test]
    fn effects_are_recorded_in_order() {
        let mut world = GridWorld::new();
        let pos = BlockPos::new(2, 0, 0);
        world.play_sound(Sound::IronDoorOpen, pos);
        world.emit_event(GameEvent::BlockOpen, pos);
        assert_eq!(
            world.effects(),
            &[
                Effect::Sound {
                    sound: Sound::IronDoorOpen,
                    pos
                },
                Effect::Event {
                    event: GameEvent::BlockOpen,
                    pos
                },
            ]
        );
    }

    #[test]
    fn place_door_writes_both_halves() {
        let mut world = GridWorld::new();
        let lower = BlockPos::new(0, 1, 0);
        world
            .place_door(lower, DoorState::new(MaterialLevel::Exposed, DoorHalf::Lower))
            .unwrap();
        assert_eq!(world.cell(lower).door_state().unwrap().half, DoorHalf::Lower);
        assert_eq!(
            world.cell(lower.above()).door_state().unwrap().half,
            DoorHalf::Upper
        );
        let err = world.place_door(lower.above(), DoorState::default());
        assert!(matches!(err, Err(PatinaError::Occupied(_))));
    }

    #[test]
    fn layout_round_trip_through_json() {
        let json = r#"{
            "raining": true,
            "signals": [{"x": 1, "y": 0, "z": 0}],
            "cells": [
                {"pos": {"x": 0, "y": 0, "z": 0}, "block": {"door": {"level": "exposed", "half": "lower"}}},
                {"pos": {"x": 0, "y": 1, "z": 0}, "block": {"door": {"level": "exposed", "half": "upper"}}},
                {"pos": {"x": 0, "y": 0, "z": 1}, "fluid": {"fluid": "water"}}
            ]
        }"#;
        let world = GridWorld::from_json(json).unwrap();
        assert!(world.is_raining());
        assert_eq!(world.len(), 3);
        assert!(world.has_neighbor_signal(BlockPos::ORIGIN));

        let layout = world.to_layout();
        let again = GridWorld::from_layout(layout.clone()).unwrap();
        assert_eq!(again.to_layout(), layout);
    }

    #[test]
    fn layout_rejects_unpaired_door() {
        let json = r#"{"cells": [
            {"pos": {"x": 0, "y": 0, "z": 0}, "block": {"door": {"half": "lower"}}}
        ]}"#;
        assert!(matches!(
            GridWorld::from_json(json),
            Err(PatinaError::UnpairedDoor(_))
        ));
    }

    #[test]
    fn layout_rejects_duplicate_cells() {
        let json = r#"{"cells": [
            {"pos": {"x": 0, "y": 0, "z": 0}, "block": "stone"},
            {"pos": {"x": 0, "y": 0, "z": 0}, "block": "stone"}
        ]}"#;
        assert!(matches!(
            GridWorld::from_json(json),
            Err(PatinaError::DuplicateCell(_))
        ));
    }

    #[test]
    fn census_groups_by_name() {
        let mut world = GridWorld::new();
        world.set_cell(BlockPos::new(0, 0, 0), CellState::iron(MaterialLevel::Rusted));
        world.set_cell(BlockPos::new(1, 0, 0), CellState::iron(MaterialLevel::Rusted));
        world.set_cell(BlockPos::new(2, 0, 0), CellState::water());
        let census = block_census(&world);
        assert_eq!(
            census,
            vec![("rusted_iron".to_string(), 2), ("water".to_string(), 1)]
        );
    }
}
