//! Common utilities for the Tessera layout engine.
//!
//! This crate provides shared infrastructure used by the component model and
//! the layout strategies:
//! - **Warning System** - deduplicated reports of degraded configuration

pub mod warning;
