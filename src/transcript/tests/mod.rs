//! Unit tests for the transcript module.
//!
//! Tests are organised by component, covering happy paths, violations and
//! edge cases for the public APIs.

pub mod fixtures;
