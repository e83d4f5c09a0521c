//! Library exports for the telestrator overlay engine.
//!
//! Exposes the drawing model, the interaction state machine and the
//! configuration types so that host shells and tools (e.g. the schema dumper)
//! share one implementation with the main binary.

pub mod backend;
pub mod config;
pub mod draw;
pub mod input;
pub mod util;

pub use config::Config;
