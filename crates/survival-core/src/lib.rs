//! Configuration, pass cycle, and run loop for the Survival simulation.
//!
//! This crate drives a [`Population`] from its first pass to the point where
//! the habitat settles: no predators left, or a single survivor.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `survival-config.yaml` into
//!   strongly-typed structs.
//! - [`pass`] -- One full traversal giving every living animal a turn.
//! - [`runner`] -- The async run loop, termination check, and result.
//!
//! [`Population`]: survival_fauna::Population

pub mod config;
pub mod pass;
pub mod runner;
