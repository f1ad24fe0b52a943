//! Strength mechanics applied during a turn.
//!
//! Three effects change an animal's strength:
//!
//! - **Restore** (herbivore feeding, predator after a catch): gain
//!   `floor(strength * 50%)`, clamped to the birth maximum.
//! - **Attrition** (both sides of a failed hunt): lose
//!   `ceil(strength * 30%)`, floored at zero.
//! - **No dinner** (predator drew itself): lose a flat 1, floored at zero.
//!
//! Gains round down and losses round up. The asymmetry biases the
//! population toward attrition and is kept exactly.
//!
//! All arithmetic is integer and checked. No floats, no silent overflow.

use survival_types::Animal;

use crate::error::AnimalError;

/// Percentage of current strength restored by a meal.
pub const RESTORE_PCT: u32 = 50;

/// Percentage of current strength lost by each side of a failed hunt.
pub const ATTRITION_PCT: u32 = 30;

/// Flat strength lost by a predator whose draw returned itself.
pub const NO_DINNER_PENALTY: u32 = 1;

/// Compute the strength after a meal: `min(max, current + floor(current * 50%))`.
pub fn restored_strength(current: u32, max_strength: u32) -> Result<u32, AnimalError> {
    let gain = current
        .checked_mul(RESTORE_PCT)
        .and_then(|scaled| scaled.checked_div(100))
        .ok_or_else(|| AnimalError::ArithmeticOverflow {
            context: String::from("restore gain overflow"),
        })?;
    let restored = current.checked_add(gain).ok_or_else(|| AnimalError::ArithmeticOverflow {
        context: String::from("restore addition overflow"),
    })?;
    Ok(restored.min(max_strength))
}

/// Compute the strength lost to attrition: `ceil(current * 30%)`.
pub fn attrition_loss(current: u32) -> Result<u32, AnimalError> {
    current
        .checked_mul(ATTRITION_PCT)
        .and_then(|scaled| scaled.checked_add(99))
        .and_then(|rounded| rounded.checked_div(100))
        .ok_or_else(|| AnimalError::ArithmeticOverflow {
            context: String::from("attrition loss overflow"),
        })
}

/// Restore an animal after it eats. Returns the new strength.
pub fn apply_feed(animal: &mut Animal) -> Result<u32, AnimalError> {
    let strength = restored_strength(animal.current_strength(), animal.max_strength())?;
    animal.set_strength(strength);
    Ok(strength)
}

/// Apply failed-hunt attrition to one participant. Returns the new strength.
pub fn apply_attrition(animal: &mut Animal) -> Result<u32, AnimalError> {
    let current = animal.current_strength();
    let strength = current.saturating_sub(attrition_loss(current)?);
    animal.set_strength(strength);
    Ok(strength)
}

/// Charge a predator for drawing itself. Returns the new strength.
pub fn apply_no_dinner(animal: &mut Animal) -> u32 {
    let strength = animal.current_strength().saturating_sub(NO_DINNER_PENALTY);
    animal.set_strength(strength);
    strength
}
