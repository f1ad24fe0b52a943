//! Shared type definitions for the Survival simulation.
//!
//! This crate is the single source of truth for the data that flows between
//! the turn resolver, the pass driver, and the engine binary.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for animal identifiers
//! - [`enums`] -- Enumeration types (animal kinds)
//! - [`structs`] -- Core records (animals, population census)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::AnimalKind;
pub use ids::AnimalId;
pub use structs::{Animal, PopulationStats};
