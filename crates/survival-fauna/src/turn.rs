//! The turn resolver: what an animal does when the pass reaches it.
//!
//! ## Turn flow
//!
//! 1. An animal found with zero strength is removed and its turn ends.
//! 2. A **herbivore** feeds, restoring half its strength up to its maximum.
//! 3. A **predator** draws one member of the population at random:
//!    - **itself**: no dinner, strength drops by 1;
//!    - **another animal**: it catches the victim only if the victim is no
//!      faster *and* no stronger than the predator. A catch removes the
//!      victim and the predator restores half its strength. Otherwise both
//!      lose 30% of their own strength, rounded up.
//! 4. Any strength that reaches zero removes the animal immediately.
//!
//! Every mutation is reported as a [`TurnEvent`] in the returned
//! [`TurnOutcome`], in the order it happened.

use rand::Rng;
use survival_types::{AnimalId, AnimalKind};
use tracing::debug;

use crate::death::{DeathCause, DeathRecord, check_death};
use crate::error::AnimalError;
use crate::population::Population;
use crate::vitals;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Why a predator failed to make a catch.
///
/// All three collapse into the same mutual-loss penalty; the distinction is
/// kept for reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HuntFailure {
    /// The victim was faster.
    TooSlow,
    /// The predator caught up but the victim was stronger.
    TooWeak,
    /// The victim was both faster and stronger.
    Outmatched,
}

impl HuntFailure {
    /// Classify the catch-up test. `None` means the catch succeeds.
    pub const fn classify(too_slow: bool, too_weak: bool) -> Option<Self> {
        match (too_slow, too_weak) {
            (false, false) => None,
            (true, false) => Some(Self::TooSlow),
            (false, true) => Some(Self::TooWeak),
            (true, true) => Some(Self::Outmatched),
        }
    }
}

impl core::fmt::Display for HuntFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooSlow => write!(f, "too_slow"),
            Self::TooWeak => write!(f, "too_weak"),
            Self::Outmatched => write!(f, "outmatched"),
        }
    }
}

/// A single observable effect of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// A herbivore ate.
    Fed {
        /// The herbivore.
        animal: AnimalId,
        /// Strength after eating.
        strength: u32,
    },
    /// A predator drew itself and went without dinner.
    NoDinner {
        /// The predator.
        predator: AnimalId,
        /// Strength after the penalty.
        strength: u32,
    },
    /// A predator caught and ate its victim.
    Caught {
        /// The predator.
        predator: AnimalId,
        /// The victim, now removed.
        victim: AnimalId,
        /// The victim's kind.
        victim_kind: AnimalKind,
        /// Predator strength after eating.
        strength: u32,
    },
    /// A predator failed to catch its victim; both lost strength.
    HuntFailed {
        /// The predator.
        predator: AnimalId,
        /// Predator strength after the loss.
        predator_strength: u32,
        /// The intended victim.
        victim: AnimalId,
        /// The victim's kind.
        victim_kind: AnimalKind,
        /// Victim strength after the loss.
        victim_strength: u32,
        /// Which comparison failed.
        failure: HuntFailure,
    },
    /// An animal was removed from the population.
    Died(DeathRecord),
}

/// Everything that happened during one animal's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The animal whose turn it was.
    pub animal: AnimalId,
    /// Its kind.
    pub kind: AnimalKind,
    /// Effects in the order they were applied.
    pub events: Vec<TurnEvent>,
}

impl TurnOutcome {
    const fn new(animal: AnimalId, kind: AnimalKind) -> Self {
        Self {
            animal,
            kind,
            events: Vec::new(),
        }
    }

    /// Deaths caused by this turn.
    pub fn deaths(&self) -> impl Iterator<Item = &DeathRecord> {
        self.events.iter().filter_map(|event| match event {
            TurnEvent::Died(record) => Some(record),
            _ => None,
        })
    }

    /// Whether the acting animal is still alive after its turn.
    pub fn survived(&self) -> bool {
        self.deaths().all(|record| record.animal_id != self.animal)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Take one turn for the animal `id`, drawing a predator's victim at random.
///
/// # Errors
///
/// Returns [`AnimalError::UnknownAnimal`] if `id` is not alive, or an
/// arithmetic error from the strength computations.
pub fn act<R: Rng + ?Sized>(
    id: AnimalId,
    population: &mut Population,
    rng: &mut R,
) -> Result<TurnOutcome, AnimalError> {
    resolve_turn(id, population, |population| population.random_member(rng))
}

/// Take one turn for the animal `id` with a caller-supplied victim draw.
///
/// `draw` is called at most once, and only for a predator that is still
/// standing. [`act`] passes a uniform random draw; tests and scripted
/// scenarios can pin the victim instead.
///
/// # Errors
///
/// Returns [`AnimalError::UnknownAnimal`] if `id` (or the drawn victim) is
/// not alive, the error from `draw`, or an arithmetic error.
pub fn resolve_turn<F>(
    id: AnimalId,
    population: &mut Population,
    draw: F,
) -> Result<TurnOutcome, AnimalError>
where
    F: FnOnce(&Population) -> Result<AnimalId, AnimalError>,
{
    let animal = population.get(id).ok_or(AnimalError::UnknownAnimal(id))?;
    let kind = animal.kind();
    let mut outcome = TurnOutcome::new(id, kind);

    if let Some(cause) = check_death(animal, DeathCause::Exhausted) {
        let record = DeathRecord::of(animal, cause);
        bury(population, record, &mut outcome);
        return Ok(outcome);
    }

    match kind {
        AnimalKind::Herbivore => feed(id, population, &mut outcome)?,
        AnimalKind::Predator => {
            let victim = draw(population)?;
            if victim == id {
                go_hungry(id, population, &mut outcome)?;
            } else {
                hunt(id, victim, population, &mut outcome)?;
            }
        }
    }

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Turn steps
// ---------------------------------------------------------------------------

fn feed(
    id: AnimalId,
    population: &mut Population,
    outcome: &mut TurnOutcome,
) -> Result<(), AnimalError> {
    let animal = population.get_mut(id).ok_or(AnimalError::UnknownAnimal(id))?;
    let strength = vitals::apply_feed(animal)?;
    debug!(animal = %id, strength, "Herbivore ate");
    outcome.events.push(TurnEvent::Fed { animal: id, strength });
    Ok(())
}

fn go_hungry(
    id: AnimalId,
    population: &mut Population,
    outcome: &mut TurnOutcome,
) -> Result<(), AnimalError> {
    let predator = population.get_mut(id).ok_or(AnimalError::UnknownAnimal(id))?;
    let strength = vitals::apply_no_dinner(predator);
    debug!(predator = %id, strength, "Predator drew itself, no dinner");
    outcome.events.push(TurnEvent::NoDinner { predator: id, strength });

    if let Some(cause) = check_death(predator, DeathCause::Starved) {
        let record = DeathRecord::of(predator, cause);
        bury(population, record, outcome);
    }
    Ok(())
}

fn hunt(
    id: AnimalId,
    victim_id: AnimalId,
    population: &mut Population,
    outcome: &mut TurnOutcome,
) -> Result<(), AnimalError> {
    let predator = population.get(id).ok_or(AnimalError::UnknownAnimal(id))?;
    let (speed, strength) = (predator.speed(), predator.current_strength());
    let victim = population
        .get(victim_id)
        .ok_or(AnimalError::UnknownAnimal(victim_id))?;
    let victim_kind = victim.kind();

    let too_slow = victim.speed() > speed;
    let too_weak = victim.current_strength() > strength;

    match HuntFailure::classify(too_slow, too_weak) {
        None => {
            let eaten = population.take(victim_id)?;
            let predator = population.get_mut(id).ok_or(AnimalError::UnknownAnimal(id))?;
            let strength = vitals::apply_feed(predator)?;
            debug!(
                predator = %id,
                victim = %victim_id,
                %victim_kind,
                strength,
                "Predator caught its prey"
            );
            outcome.events.push(TurnEvent::Caught {
                predator: id,
                victim: victim_id,
                victim_kind,
                strength,
            });
            let record = DeathRecord::eaten_by(&eaten, id);
            log_death(&record);
            outcome.events.push(TurnEvent::Died(record));
        }
        Some(failure) => {
            let predator = population.get_mut(id).ok_or(AnimalError::UnknownAnimal(id))?;
            let predator_strength = vitals::apply_attrition(predator)?;
            let predator_death = check_death(predator, DeathCause::Wounded)
                .map(|cause| DeathRecord::of(predator, cause));

            let victim = population
                .get_mut(victim_id)
                .ok_or(AnimalError::UnknownAnimal(victim_id))?;
            let victim_strength = vitals::apply_attrition(victim)?;
            let victim_death = check_death(victim, DeathCause::Wounded)
                .map(|cause| DeathRecord::of(victim, cause));

            debug!(
                predator = %id,
                predator_strength,
                victim = %victim_id,
                %victim_kind,
                victim_strength,
                %failure,
                "Predator failed to catch its prey"
            );
            outcome.events.push(TurnEvent::HuntFailed {
                predator: id,
                predator_strength,
                victim: victim_id,
                victim_kind,
                victim_strength,
                failure,
            });

            for record in [predator_death, victim_death].into_iter().flatten() {
                bury(population, record, outcome);
            }
        }
    }
    Ok(())
}

/// Remove a dead animal and record the death.
fn bury(population: &mut Population, record: DeathRecord, outcome: &mut TurnOutcome) {
    if population.remove(record.animal_id) {
        log_death(&record);
        outcome.events.push(TurnEvent::Died(record));
    }
}

fn log_death(record: &DeathRecord) {
    debug!(
        animal = %record.animal_id,
        kind = %record.kind,
        cause = %record.cause,
        "Animal is dead"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use survival_types::Animal;

    use super::*;

    /// Put the given animals in a fresh population and return their ids.
    fn populate(animals: Vec<Animal>) -> (Population, Vec<AnimalId>) {
        let ids = animals.iter().map(Animal::id).collect();
        (Population::from_animals(animals).unwrap(), ids)
    }

    fn strength_of(population: &Population, id: AnimalId) -> Option<u32> {
        population.get(id).map(Animal::current_strength)
    }

    // --- Herbivore ---

    #[test]
    fn herbivore_restores_half() {
        let (mut population, ids) = populate(vec![Animal::herbivore(40, 50).wounded_to(20)]);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = act(ids[0], &mut population, &mut rng).unwrap();
        assert_eq!(strength_of(&population, ids[0]), Some(30));
        assert_eq!(
            outcome.events,
            vec![TurnEvent::Fed { animal: ids[0], strength: 30 }]
        );
    }

    #[test]
    fn herbivore_restore_clamped_to_maximum() {
        let (mut population, ids) = populate(vec![Animal::herbivore(40, 50).wounded_to(35)]);
        let mut rng = StdRng::seed_from_u64(1);
        act(ids[0], &mut population, &mut rng).unwrap();
        assert_eq!(strength_of(&population, ids[0]), Some(40));
    }

    #[test]
    fn herbivore_never_draws() {
        let (mut population, ids) = populate(vec![Animal::herbivore(40, 50)]);
        let outcome = resolve_turn(ids[0], &mut population, |_| {
            Err(AnimalError::EmptyPopulation)
        });
        assert!(outcome.is_ok());
    }

    // --- Dead animals ---

    #[test]
    fn exhausted_animal_is_removed_and_nothing_else_changes() {
        for dead in [
            Animal::herbivore(40, 40).wounded_to(0),
            Animal::predator(40, 40).wounded_to(0),
        ] {
            let bystander = Animal::herbivore(30, 30).wounded_to(10);
            let (mut population, ids) = populate(vec![dead, bystander]);
            let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[1])).unwrap();

            assert!(!population.contains(ids[0]));
            assert_eq!(population.size(), 1);
            assert_eq!(strength_of(&population, ids[1]), Some(10));
            assert_eq!(outcome.events.len(), 1);
            assert!(!outcome.survived());
            let deaths: Vec<_> = outcome.deaths().collect();
            assert_eq!(deaths.len(), 1);
            assert_eq!(deaths[0].cause, DeathCause::Exhausted);
        }
    }

    #[test]
    fn acting_on_missing_animal_fails() {
        let mut population = Population::new();
        let ghost = AnimalId::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            act(ghost, &mut population, &mut rng),
            Err(AnimalError::UnknownAnimal(ghost))
        );
    }

    // --- Predator drew itself ---

    #[test]
    fn lone_predator_loses_exactly_one() {
        let (mut population, ids) = populate(vec![Animal::predator(50, 60).wounded_to(12)]);
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = act(ids[0], &mut population, &mut rng).unwrap();
        assert_eq!(strength_of(&population, ids[0]), Some(11));
        assert_eq!(
            outcome.events,
            vec![TurnEvent::NoDinner { predator: ids[0], strength: 11 }]
        );
    }

    #[test]
    fn self_draw_touches_nobody_else() {
        let (mut population, ids) = populate(vec![
            Animal::predator(50, 60),
            Animal::herbivore(10, 10),
        ]);
        let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[0])).unwrap();
        assert_eq!(strength_of(&population, ids[0]), Some(49));
        assert_eq!(strength_of(&population, ids[1]), Some(10));
        assert_eq!(population.size(), 2);
        assert!(outcome.deaths().next().is_none());
    }

    #[test]
    fn self_draw_to_zero_dies_immediately() {
        let (mut population, ids) = populate(vec![Animal::predator(50, 60).wounded_to(1)]);
        let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[0])).unwrap();
        assert!(population.is_empty());
        let deaths: Vec<_> = outcome.deaths().collect();
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].cause, DeathCause::Starved);
    }

    // --- Catch-up success ---

    #[test]
    fn faster_stronger_predator_eats_victim() {
        let (mut population, ids) = populate(vec![
            Animal::predator(100, 60).wounded_to(50),
            Animal::herbivore(40, 50),
        ]);
        let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[1])).unwrap();

        assert!(!population.contains(ids[1]));
        // min(100, 50 + 25)
        assert_eq!(strength_of(&population, ids[0]), Some(75));
        assert_eq!(
            outcome.events[0],
            TurnEvent::Caught {
                predator: ids[0],
                victim: ids[1],
                victim_kind: AnimalKind::Herbivore,
                strength: 75,
            }
        );
        let deaths: Vec<_> = outcome.deaths().collect();
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].cause, DeathCause::Eaten);
        assert_eq!(deaths[0].killer, Some(ids[0]));
        assert!(outcome.survived());
    }

    #[test]
    fn catch_restore_clamped_to_maximum() {
        let (mut population, ids) = populate(vec![
            Animal::predator(50, 60),
            Animal::predator(40, 50),
        ]);
        resolve_turn(ids[0], &mut population, |_| Ok(ids[1])).unwrap();
        assert_eq!(strength_of(&population, ids[0]), Some(50));
    }

    #[test]
    fn ties_favor_the_hunter() {
        let (mut population, ids) = populate(vec![
            Animal::predator(60, 45).wounded_to(30),
            Animal::herbivore(30, 45),
        ]);
        let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[1])).unwrap();
        assert!(!population.contains(ids[1]));
        assert!(matches!(outcome.events[0], TurnEvent::Caught { strength: 45, .. }));
    }

    // --- Catch-up failure ---

    #[test]
    fn slower_predator_and_victim_both_lose() {
        let (mut population, ids) = populate(vec![
            Animal::predator(30, 40),
            Animal::herbivore(30, 90),
        ]);
        let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[1])).unwrap();

        assert_eq!(strength_of(&population, ids[0]), Some(21));
        assert_eq!(strength_of(&population, ids[1]), Some(21));
        assert_eq!(
            outcome.events,
            vec![TurnEvent::HuntFailed {
                predator: ids[0],
                predator_strength: 21,
                victim: ids[1],
                victim_kind: AnimalKind::Herbivore,
                victim_strength: 21,
                failure: HuntFailure::TooSlow,
            }]
        );
    }

    #[test]
    fn weaker_predator_loses_even_when_faster() {
        let (mut population, ids) = populate(vec![
            Animal::predator(40, 90),
            Animal::herbivore(41, 20),
        ]);
        let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[1])).unwrap();
        // 40 - ceil(12.0) = 28; 41 - ceil(12.3) = 28
        assert_eq!(strength_of(&population, ids[0]), Some(28));
        assert_eq!(strength_of(&population, ids[1]), Some(28));
        assert!(matches!(
            outcome.events[0],
            TurnEvent::HuntFailed { failure: HuntFailure::TooWeak, .. }
        ));
    }

    #[test]
    fn losses_are_computed_from_each_own_strength() {
        let (mut population, ids) = populate(vec![
            Animal::predator(100, 10).wounded_to(10),
            Animal::herbivore(100, 90).wounded_to(77),
        ]);
        let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[1])).unwrap();
        // 10 - 3 = 7; 77 - ceil(23.1) = 53
        assert_eq!(strength_of(&population, ids[0]), Some(7));
        assert_eq!(strength_of(&population, ids[1]), Some(53));
        assert!(matches!(
            outcome.events[0],
            TurnEvent::HuntFailed { failure: HuntFailure::Outmatched, .. }
        ));
    }

    #[test]
    fn failed_hunt_removes_both_when_spent() {
        let (mut population, ids) = populate(vec![
            Animal::predator(50, 10).wounded_to(1),
            Animal::herbivore(50, 90).wounded_to(1),
            Animal::herbivore(50, 50),
        ]);
        let outcome = resolve_turn(ids[0], &mut population, |_| Ok(ids[1])).unwrap();
        assert_eq!(population.size(), 1);
        assert!(population.contains(ids[2]));
        let dead: Vec<AnimalId> = outcome.deaths().map(|record| record.animal_id).collect();
        assert_eq!(dead, vec![ids[0], ids[1]]);
        assert!(outcome.deaths().all(|record| record.cause == DeathCause::Wounded));
    }

    #[test]
    fn drawing_a_removed_victim_is_reported() {
        let (mut population, ids) = populate(vec![Animal::predator(50, 50)]);
        let ghost = AnimalId::new();
        assert_eq!(
            resolve_turn(ids[0], &mut population, |_| Ok(ghost)),
            Err(AnimalError::UnknownAnimal(ghost))
        );
        assert_eq!(strength_of(&population, ids[0]), Some(50));
    }

    #[test]
    fn classify_catch_up() {
        assert_eq!(HuntFailure::classify(false, false), None);
        assert_eq!(HuntFailure::classify(true, false), Some(HuntFailure::TooSlow));
        assert_eq!(HuntFailure::classify(false, true), Some(HuntFailure::TooWeak));
        assert_eq!(HuntFailure::classify(true, true), Some(HuntFailure::Outmatched));
    }
}
