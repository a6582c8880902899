//! Comparison support for DataCite documents
//!
//! This module provides data structures and utilities for checking that two
//! XML documents are equivalent under the DataCite schema, as used by the
//! round-trip tests.

pub mod tree_model;

pub use tree_model::*;
