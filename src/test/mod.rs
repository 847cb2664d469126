//! Shared fixtures for unit tests: a small catalog of schema-described classes
//! covering plain data, entities, inheritance with member hiding, constructors,
//! overloads and methods.

pub(crate) mod fixtures;
