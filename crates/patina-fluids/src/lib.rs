//! Fluid generators for Patina.
//!
//! A generator decides whether a fluid cell spawns a new fluid cell next to
//! it. Kinds are registered in a [`GeneratorRegistry`] under a `type` tag and
//! decoded from JSON records; decoded instances are grouped per fluid in a
//! [`GeneratorCatalog`] and run in priority order by [`dispatch()`].

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod kinds;
pub mod registry;

pub use catalog::GeneratorCatalog;
pub use dispatch::dispatch;
pub use error::{FluidError, FluidResult};
pub use generator::FluidGenerator;
pub use kinds::{OtherFluidGenerator, SelfFluidGenerator};
pub use registry::{DecodeFn, GeneratorRegistry, GeneratorType, RejectedRecord, TYPE_KEY};
