//! Object-to-object mapping: the convention-based mapper and the typed registry.
//!
//! Two alternative strategies live here:
//!
//! - [`ObjectMapper`] - copies same-named, settable properties by convention,
//!   converting mismatched values best-effort and recursing into nested plain
//!   data objects. No registration required.
//! - [`MapperRegistry`] - resolves a hand-written [`Mapper`] implementation for a
//!   concrete (from, to) type pair, built once from registration providers behind
//!   a double-checked lock.
//!
//! They are peers, not layers: application code picks one per mapping job.

mod mapper;
mod registry;

pub use mapper::ObjectMapper;
pub use registry::{ErasedMapper, Mapper, MapperProvider, MapperRegistry, MapperSet};
