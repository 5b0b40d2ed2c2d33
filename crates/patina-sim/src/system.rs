use patina_core::BlockPos;

use crate::context::SimContext;
use crate::error::SimResult;

/// One concern of the tick loop, such as weathering or fluid growth.
///
/// Systems run in the order they were added and see the grid, clock, RNG and
/// event log through a [`SimContext`].
pub trait System: std::fmt::Debug {
    /// Name shown in listings.
    fn name(&self) -> &str;

    /// Called once per tick.
    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()>;

    /// Called once before the first tick. Optional setup hook.
    fn init(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }

    /// Called after the power signal at `pos` was switched.
    fn signal_changed(&mut self, _ctx: &mut SimContext<'_>, _pos: BlockPos) -> SimResult<()> {
        Ok(())
    }

    /// Downcast hook for [`Simulation::get_system`](crate::Simulation::get_system).
    fn as_any(&self) -> &dyn std::any::Any;
}
