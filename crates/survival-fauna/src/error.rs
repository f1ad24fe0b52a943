//! Error types for the survival-fauna crate.
//!
//! Invariant violations on strength are not represented here: they are
//! programming defects and fail through debug assertions instead.

use survival_types::AnimalId;

/// Errors that can occur during population and turn operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimalError {
    /// A random member was requested from a population with no animals.
    #[error("cannot draw a random member from an empty population")]
    EmptyPopulation,

    /// The identity is not present in the population.
    ///
    /// [`Population::remove`](crate::Population::remove) swallows this case;
    /// it is surfaced by [`Population::take`](crate::Population::take) and
    /// by acting on an animal that is no longer alive.
    #[error("animal not found: {0}")]
    UnknownAnimal(AnimalId),

    /// An animal with this identity is already in the population.
    #[error("duplicate animal identity: {0}")]
    DuplicateAnimal(AnimalId),

    /// An arithmetic overflow occurred during a strength computation.
    #[error("arithmetic overflow in strength computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
