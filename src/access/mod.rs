//! Accessor compilation and the process-wide accessor cache.
//!
//! This module turns schema member descriptors into compiled, shareable accessors
//! and memoizes them so the schema-chain scan runs at most once per member:
//!
//! - [`MemberKey`] - structural identity of a cached accessor
//! - [`PropertyAccessor`], [`MethodAccessor`], [`ConstructorAccessor`] - the
//!   immutable compiled records
//! - [`VisibleProperties`] - per-class effective property maps with member hiding
//! - [`AccessorCache`] - the concurrent, never-evicting memoization layer
//!
//! The contract under test is not a particular code-generation technique but a
//! bound: the first request for a member pays the resolution cost, every later
//! request for the same member does not.

mod accessor;
mod cache;
mod key;
mod visibility;

pub use accessor::{AccessorFlags, ConstructorAccessor, MethodAccessor, PropertyAccessor};
pub use cache::{AccessorCache, CacheStatsSnapshot};
pub use key::{signature_hash, MemberKey};
pub use visibility::VisibleProperties;
