//! Optional behaviours composed onto organism kinds.
//!
//! See [`Organism::as_reproducible_mut`] and [`Organism::as_predator_mut`]
//! for which kinds carry which capability.

use crate::event::Event;
use crate::organism::Organism;

pub trait Reproducible {
    /// Produce at most one offspring of the same kind, paying its energy cost.
    ///
    /// Returns `None` without touching the parent when the kind's condition
    /// is not met.
    fn reproduce(&mut self, events: &mut Vec<Event>) -> Option<Organism>;
}

pub trait Predator {
    /// Try to drain `prey` through a speed contest.
    ///
    /// Only living animals can be hunted; any other prey is ignored.
    fn hunt(&mut self, prey: &mut Organism, events: &mut Vec<Event>);
}
