// Copyright 2026 The protean contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]

//! # protean
//!
//! A runtime member-access and dynamic-object framework: schema-described classes, a
//! process-wide cache of compiled property/constructor/method accessors, a hybrid
//! dynamic object merging a strongly-typed instance with an ordered key/value bag,
//! and a convention-based object-to-object mapper built on top of the accessor cache.
//!
//! ## Features
//!
//! - **Compiled accessors** - member resolution runs once; every later access for
//!   the same member is a lock-free cache hit
//! - **Deterministic resolution** - a strict, documented order merges bag entries,
//!   instance properties, member filters and hidden (redeclared) base members
//! - **Best-effort mapping** - same-named property copying with value conversion,
//!   an entity foreign-key edge rule and recursion into nested plain objects
//! - **Typed mapper registry** - a one-time, double-checked-lazy directory of
//!   hand-written `Mapper<From, To>` implementations
//! - **Thread-safe by construction** - every shared structure is a concurrent map;
//!   get-or-compute races are benign and documented
//!
//! ## Quick Start
//!
//! Describe a class once, then access it dynamically:
//!
//! ```rust
//! use std::sync::{Arc, OnceLock};
//! use protean::access::AccessorCache;
//! use protean::expando::HybridExpando;
//! use protean::schema::{ClassSchema, ReflectClass};
//! use protean::value::Value;
//! use protean::impl_reflect;
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Product {
//!     name: String,
//!     price: f64,
//! }
//!
//! impl ReflectClass for Product {
//!     const NAME: &'static str = "Product";
//!
//!     fn class_of() -> &'static ClassSchema {
//!         static SCHEMA: OnceLock<ClassSchema> = OnceLock::new();
//!         SCHEMA.get_or_init(|| {
//!             ClassSchema::builder::<Product>(Self::NAME)
//!                 .with_default()
//!                 .property_rw("Name", |p: &Product| p.name.clone(), |p, v| p.name = v)
//!                 .property_rw("Price", |p: &Product| p.price, |p, v| p.price = v)
//!                 .build()
//!         })
//!     }
//! }
//!
//! impl_reflect!(Product);
//!
//! let cache = Arc::new(AccessorCache::new());
//! let mut product = HybridExpando::wrap(
//!     cache,
//!     Box::new(Product { name: "Keyboard".into(), price: 49.9 }),
//! );
//!
//! assert_eq!(product.get("name").unwrap(), Value::Str("Keyboard".into()));
//! product.set("Price", Value::F64(39.9));
//! product.set("OnSale", Value::Bool(true)); // no such property: lands in the bag
//! assert_eq!(product.get("OnSale").unwrap(), Value::Bool(true));
//! ```
//!
//! ## Architecture
//!
//! `protean` is organized into five modules, leaves first:
//!
//! - [`value`] - dynamic values, declared types, field bridging and conversion
//! - [`schema`] - class schemas, the [`schema::Reflect`] traits and the builder
//! - [`access`] - accessor compilation and the process-wide [`access::AccessorCache`]
//! - [`expando`] - the [`expando::HybridExpando`] dynamic object
//! - [`mapping`] - the convention [`mapping::ObjectMapper`] and the typed
//!   [`mapping::MapperRegistry`]
//!
//! ## Ownership Model
//!
//! There is no global mutable state: the accessor cache and the schema registry are
//! explicitly constructed, process-long objects shared by `Arc` with every facade
//! and mapper that needs them. Tests construct a fresh cache per run.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Failures while
//! *probing* whether a member exists are deliberately converted into
//! fall-through/not-found results; genuine faults (an accessor applied to the wrong
//! class, a duplicate mapper registration) always surface. See [`Error`] for the
//! taxonomy.

#[macro_use]
pub(crate) mod macros;

pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use protean::prelude::*;
///
/// let cache = std::sync::Arc::new(AccessorCache::new());
/// let expando = HybridExpando::new(cache);
/// assert!(expando.names().is_empty());
/// ```
pub mod prelude;

/// Dynamic values, declared member types and value conversion.
///
/// Everything crossing an accessor boundary travels as a [`value::Value`]; member
/// slots are described by [`value::ValueTy`]. See the module documentation for the
/// null and truthiness semantics.
pub mod value;

/// Class schemas: the explicit reflection metadata this library operates on.
///
/// Types opt in by implementing [`schema::ReflectClass`] (a `OnceLock`-guarded
/// [`schema::SchemaBuilder`] run) and invoking [`impl_reflect!`].
pub mod schema;

/// Accessor compilation and the process-wide accessor cache.
///
/// The first request for a member pays the schema-chain scan; every later request
/// for the same [`access::MemberKey`] is a lock-free map hit. Statistics counters
/// make the bound observable.
pub mod access;

/// The hybrid dynamic object: bag + backing instance + member filter.
///
/// See [`expando::HybridExpando`] for the get/set resolution order.
pub mod expando;

/// Object-to-object mapping: the convention mapper and the typed registry.
pub mod mapping;

/// `protean` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`], used consistently throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `protean` Error type
///
/// The main error type for all operations in this crate. See the variant
/// documentation for the full taxonomy and the recover-vs-propagate policy.
pub use error::Error;

/// The process-wide compiled-accessor cache.
///
/// See [`access::AccessorCache`] for the memoization contract and statistics.
pub use access::AccessorCache;

/// The hybrid dynamic object.
///
/// See [`expando::HybridExpando`] for the member-resolution rules.
pub use expando::HybridExpando;

/// The convention-based object mapper.
///
/// See [`mapping::ObjectMapper`] for the per-property algorithm.
pub use mapping::ObjectMapper;

/// The dynamic value representation used across every accessor boundary.
pub use value::Value;
