//! Test utilities for RelayDB crates.
//!
//! Proptest strategies and fixture constructors for domain values,
//! consumed as a dev-dependency by the other crates.

pub mod fixtures;
pub mod strategies;
