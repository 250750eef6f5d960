//! The per-tick simulation protocol.

use crate::event::Event;
use crate::organism::{Kind, Living, Organism};
use crate::population::Population;
use rand::Rng;

/// What happened during one tick.
#[derive(Debug, Default)]
pub struct TickOutcome {
    pub events: Vec<Event>,
    pub n_born: usize,
    pub n_removed: usize,
}

/// A population of organisms and the number of ticks it has lived through.
#[derive(Debug)]
pub struct Ecosystem {
    population: Population,
    tick: usize,
}

impl Ecosystem {
    pub fn new() -> Self {
        Self {
            population: Population::new(),
            tick: 0,
        }
    }

    pub fn add_organism(&mut self, organism: Organism) {
        self.population.add(organism);
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> usize {
        self.tick
    }

    /// Run one tick: update, interact and reproduce every living organism,
    /// then drop spent corpses and append the offspring.
    ///
    /// Offspring are held back until the end, so indices below the starting
    /// length stay valid throughout and newborns sit out their birth tick.
    pub fn simulate_tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        let mut events = Vec::new();
        let mut offspring = Vec::new();

        let n_org = self.population.len();
        for idx in 0..n_org {
            let org = &mut self.population[idx];
            if !org.is_alive() {
                continue;
            }
            org.update(&mut events);
            if !org.is_alive() {
                continue;
            }

            self.resolve_interactions(idx, rng, &mut events);

            if let Some(parent) = self.population[idx].as_reproducible_mut() {
                offspring.extend(parent.reproduce(&mut events));
            }
        }

        let n_removed = self.population.compact();
        let n_born = offspring.len();
        self.population.extend(offspring);
        self.tick += 1;

        TickOutcome {
            events,
            n_born,
            n_removed,
        }
    }

    fn resolve_interactions<R: Rng + ?Sized>(
        &mut self,
        idx: usize,
        rng: &mut R,
        events: &mut Vec<Event>,
    ) {
        match self.population[idx].kind() {
            Kind::Animal => {
                if let Some(i_plant) = self.population.random_target(rng, Kind::Plant, idx) {
                    if let Some((Organism::Animal(animal), Organism::Plant(plant))) =
                        self.population.pair_mut(idx, i_plant)
                    {
                        animal.graze(plant, events);
                    }
                }
                if let Some(i_prey) = self.population.random_target(rng, Kind::Animal, idx) {
                    if let Some((hunter, prey)) = self.population.pair_mut(idx, i_prey) {
                        if let Some(hunter) = hunter.as_predator_mut() {
                            hunter.hunt(prey, events);
                        }
                    }
                }
            }
            Kind::Microorganism => {
                if let Some(i_corpse) = self.population.first_biomass() {
                    if let Some((Organism::Microorganism(microbe), corpse)) =
                        self.population.pair_mut(idx, i_corpse)
                    {
                        microbe.decompose(corpse, events);
                    }
                }
            }
            Kind::Plant => {}
        }
    }
}
