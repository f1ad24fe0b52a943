//! Population container and turn resolver for the Survival simulation.
//!
//! This crate contains the core rules: everything that operates on animals
//! without touching I/O, configuration, or pacing. It sits between
//! `survival-types` (the data) and `survival-core` (the pass driver).
//!
//! # Modules
//!
//! - [`death`] -- Death conditions and records ([`DeathCause`], [`DeathRecord`])
//! - [`error`] -- Error types for population and turn operations ([`AnimalError`])
//! - [`population`] -- The [`Population`] container and snapshot [`Pass`]
//! - [`turn`] -- The turn resolver: feeding, hunting, and events
//! - [`vitals`] -- Strength restore and attrition arithmetic

pub mod death;
pub mod error;
pub mod population;
pub mod turn;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use death::{DeathCause, DeathRecord};
pub use error::AnimalError;
pub use population::{Pass, Population};
pub use turn::{HuntFailure, TurnEvent, TurnOutcome, act, resolve_turn};
