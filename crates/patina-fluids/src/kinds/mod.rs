//! Built-in generator kinds.

pub mod other_fluid;
pub mod same_fluid;

pub use other_fluid::OtherFluidGenerator;
pub use same_fluid::SelfFluidGenerator;
