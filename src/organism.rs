//! Organism base contract and the variant wrapper stored in the population.

use crate::animal::Animal;
use crate::capability::{Predator, Reproducible};
use crate::event::{DeathCause, Event};
use crate::microbe::Microorganism;
use crate::plant::Plant;
use crate::utils::check_num;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;

/// Organism kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Plant,
    Animal,
    Microorganism,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Self::Plant, Self::Animal, Self::Microorganism];

    /// Position of the kind in [`Kind::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Plant => 0,
            Self::Animal => 1,
            Self::Microorganism => 2,
        }
    }

    /// Lowercase identifier used in configuration and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Plant => "plant",
            Self::Animal => "animal",
            Self::Microorganism => "microorganism",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Plant => "Plant",
            Self::Animal => "Animal",
            Self::Microorganism => "Microorganism",
        };
        f.write_str(label)
    }
}

/// State shared by every organism.
///
/// Energy never goes below zero and death is terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Vitals {
    pub(crate) energy: f64,
    pub(crate) age: u32,
    pub(crate) size: f64,
    pub(crate) alive: bool,
}

impl Vitals {
    /// Create the vitals of a living organism.
    ///
    /// # Errors
    /// Returns an error if `energy` or `size` is negative or NaN.
    pub fn new(energy: f64, age: u32, size: f64) -> Result<Self> {
        check_num(energy, 0.0..).context("invalid energy")?;
        check_num(size, 0.0..).context("invalid size")?;
        Ok(Self {
            energy,
            age,
            size,
            alive: true,
        })
    }

    /// Vitals of an offspring: age 0 and constants chosen by its kind.
    pub(crate) fn newborn(energy: f64, size: f64) -> Self {
        Self {
            energy,
            age: 0,
            size,
            alive: true,
        }
    }
}

/// Life process common to all organism kinds.
///
/// Implementors provide access to their [`Vitals`] and their own `update`
/// rule; energy transfer and death are shared.
pub trait Living {
    fn kind(&self) -> Kind;
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;

    /// Advance one tick of autonomous life. A no-op on dead organisms.
    fn update(&mut self, events: &mut Vec<Event>);

    fn energy(&self) -> f64 {
        self.vitals().energy
    }

    fn age(&self) -> u32 {
        self.vitals().age
    }

    fn size(&self) -> f64 {
        self.vitals().size
    }

    fn is_alive(&self) -> bool {
        self.vitals().alive
    }

    /// Mark the organism dead.
    ///
    /// Only the first call has an effect and emits [`Event::Died`]. Returns
    /// whether this call performed the transition.
    fn die(&mut self, cause: DeathCause, events: &mut Vec<Event>) -> bool {
        let kind = self.kind();
        let vitals = self.vitals_mut();
        if !vitals.alive {
            return false;
        }
        vitals.alive = false;
        events.push(Event::Died {
            kind,
            size: vitals.size,
            age: vitals.age,
            cause,
        });
        true
    }

    /// Drain up to `amount` energy and return the amount actually taken.
    ///
    /// This is the only channel through which energy moves between organisms.
    fn be_eaten(&mut self, amount: f64, events: &mut Vec<Event>) -> f64 {
        let vitals = self.vitals_mut();
        let taken = vitals.energy.min(amount.max(0.0));
        vitals.energy -= taken;
        if vitals.energy <= 0.0 {
            vitals.energy = 0.0;
            self.die(DeathCause::Consumed, events);
        }
        taken
    }

    /// Burn `amount` energy, starving if it runs out. Returns whether the
    /// organism's energy hit zero.
    fn spend(&mut self, amount: f64, events: &mut Vec<Event>) -> bool {
        let vitals = self.vitals_mut();
        vitals.energy -= amount;
        if vitals.energy > 0.0 {
            return false;
        }
        vitals.energy = 0.0;
        self.die(DeathCause::Starvation, events);
        true
    }

    fn gain(&mut self, amount: f64) {
        self.vitals_mut().energy += amount;
    }

    fn grow_older(&mut self) {
        let vitals = self.vitals_mut();
        vitals.age = vitals.age.saturating_add(1);
    }
}

/// Any organism of the ecosystem.
#[derive(Debug, Clone, PartialEq)]
pub enum Organism {
    Plant(Plant),
    Animal(Animal),
    Microorganism(Microorganism),
}

impl Organism {
    /// Reproduction capability, if the kind has it.
    pub fn as_reproducible_mut(&mut self) -> Option<&mut dyn Reproducible> {
        match self {
            Self::Plant(plant) => Some(plant),
            Self::Animal(animal) => Some(animal),
            Self::Microorganism(microbe) => Some(microbe),
        }
    }

    /// Hunting capability, if the kind has it.
    pub fn as_predator_mut(&mut self) -> Option<&mut dyn Predator> {
        match self {
            Self::Animal(animal) => Some(animal),
            Self::Plant(_) | Self::Microorganism(_) => None,
        }
    }

    /// Dead but still holding energy, waiting for decomposition.
    pub fn is_biomass(&self) -> bool {
        !self.is_alive() && self.energy() > 0.0
    }

    /// Dead with nothing left to decompose.
    pub fn is_spent(&self) -> bool {
        !self.is_alive() && self.energy() <= 0.0
    }
}

impl Living for Organism {
    fn kind(&self) -> Kind {
        match self {
            Self::Plant(_) => Kind::Plant,
            Self::Animal(_) => Kind::Animal,
            Self::Microorganism(_) => Kind::Microorganism,
        }
    }

    fn vitals(&self) -> &Vitals {
        match self {
            Self::Plant(plant) => plant.vitals(),
            Self::Animal(animal) => animal.vitals(),
            Self::Microorganism(microbe) => microbe.vitals(),
        }
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        match self {
            Self::Plant(plant) => plant.vitals_mut(),
            Self::Animal(animal) => animal.vitals_mut(),
            Self::Microorganism(microbe) => microbe.vitals_mut(),
        }
    }

    fn update(&mut self, events: &mut Vec<Event>) {
        match self {
            Self::Plant(plant) => plant.update(events),
            Self::Animal(animal) => animal.update(events),
            Self::Microorganism(microbe) => microbe.update(events),
        }
    }
}

impl From<Plant> for Organism {
    fn from(plant: Plant) -> Self {
        Self::Plant(plant)
    }
}

impl From<Animal> for Organism {
    fn from(animal: Animal) -> Self {
        Self::Animal(animal)
    }
}

impl From<Microorganism> for Organism {
    fn from(microbe: Microorganism) -> Self {
        Self::Microorganism(microbe)
    }
}
