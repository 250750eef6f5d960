use crate::capability::Reproducible;
use crate::event::{DeathCause, Event};
use crate::organism::{Kind, Living, Organism, Vitals};
use crate::utils::check_num;
use anyhow::{Context, Result};

const MAX_AGE: u32 = 50;
const MAX_SIZE: f64 = 15.0;
const UPKEEP_PER_SIZE: f64 = 0.1;
const GROWTH_STEP: f64 = 0.1;
const GROWTH_COST: f64 = 0.5;

const REPRODUCTION_COST: f64 = 20.0;
const REPRODUCTION_MIN_AGE: u32 = 5;
const SEEDLING_ENERGY: f64 = 10.0;
const SEEDLING_SIZE: f64 = 1.0;

/// Photosynthesising organism that grows until it reaches its maximum size.
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    vitals: Vitals,
    photosynthesis_rate: f64,
}

impl Plant {
    pub fn new(energy: f64, age: u32, size: f64, photosynthesis_rate: f64) -> Result<Self> {
        let vitals = Vitals::new(energy, age, size)?;
        check_num(photosynthesis_rate, 0.0..).context("invalid photosynthesis rate")?;
        Ok(Self {
            vitals,
            photosynthesis_rate,
        })
    }

    pub fn photosynthesis_rate(&self) -> f64 {
        self.photosynthesis_rate
    }
}

impl Living for Plant {
    fn kind(&self) -> Kind {
        Kind::Plant
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn update(&mut self, events: &mut Vec<Event>) {
        if !self.is_alive() {
            return;
        }

        self.grow_older();
        self.gain(self.photosynthesis_rate());

        // Starvation wins over old age; growth only happens if neither applies.
        if self.spend(self.vitals.size * UPKEEP_PER_SIZE, events) {
            return;
        }
        if self.age() > MAX_AGE {
            self.die(DeathCause::OldAge, events);
        } else if self.vitals.size < MAX_SIZE {
            self.vitals.size = (self.vitals.size + GROWTH_STEP).min(MAX_SIZE);
            self.spend(GROWTH_COST, events);
        }
    }
}

impl Reproducible for Plant {
    fn reproduce(&mut self, events: &mut Vec<Event>) -> Option<Organism> {
        if !self.is_alive()
            || self.vitals.energy <= REPRODUCTION_COST
            || self.vitals.age <= REPRODUCTION_MIN_AGE
        {
            return None;
        }

        self.vitals.energy -= REPRODUCTION_COST;
        events.push(Event::Reproduced { kind: Kind::Plant });

        Some(Organism::Plant(Self {
            vitals: Vitals::newborn(SEEDLING_ENERGY, SEEDLING_SIZE),
            photosynthesis_rate: self.photosynthesis_rate,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn update_photosynthesises_and_grows() {
        let mut events = Vec::new();
        let mut plant = Plant::new(30.0, 0, 5.0, 4.0).unwrap();
        plant.update(&mut events);

        // 30 + 4 - 5 * 0.1 - 0.5
        assert_close(plant.energy(), 33.0);
        assert_close(plant.size(), 5.1);
        assert_eq!(plant.age(), 1);
        assert!(plant.is_alive());
        assert!(events.is_empty());
    }

    #[test]
    fn update_stops_growing_at_max_size() {
        let mut events = Vec::new();
        let mut plant = Plant::new(30.0, 0, 15.0, 2.0).unwrap();
        plant.update(&mut events);

        assert_close(plant.size(), 15.0);
        assert_close(plant.energy(), 30.5);
    }

    #[test]
    fn update_starves_before_checking_age() {
        let mut events = Vec::new();
        let mut plant = Plant::new(0.2, 60, 5.0, 0.0).unwrap();
        plant.update(&mut events);

        assert!(!plant.is_alive());
        assert_eq!(plant.energy(), 0.0);
        assert!(matches!(
            events.as_slice(),
            [Event::Died {
                cause: DeathCause::Starvation,
                ..
            }]
        ));
    }

    #[test]
    fn growth_cost_can_starve_a_plant() {
        let mut events = Vec::new();
        let mut plant = Plant::new(0.3, 0, 1.0, 0.0).unwrap();
        plant.update(&mut events);

        // 0.3 - 1.0 * 0.1 leaves 0.2, less than the 0.5 growth cost.
        assert_close(plant.size(), 1.1);
        assert_eq!(plant.energy(), 0.0);
        assert!(!plant.is_alive());
        assert!(matches!(
            events.as_slice(),
            [Event::Died {
                kind: Kind::Plant,
                cause: DeathCause::Starvation,
                ..
            }]
        ));
    }

    #[test]
    fn update_dies_of_old_age_without_growing() {
        let mut events = Vec::new();
        let mut plant = Plant::new(30.0, 50, 5.0, 4.0).unwrap();
        plant.update(&mut events);

        assert!(!plant.is_alive());
        assert_close(plant.size(), 5.0);
        assert_close(plant.energy(), 33.5);
        assert!(matches!(
            events.as_slice(),
            [Event::Died {
                cause: DeathCause::OldAge,
                age: 51,
                ..
            }]
        ));
    }

    #[test]
    fn update_is_a_no_op_once_dead() {
        let mut events = Vec::new();
        let mut plant = Plant::new(30.0, 0, 5.0, 4.0).unwrap();
        plant.die(DeathCause::OldAge, &mut events);
        let before = plant.clone();
        plant.update(&mut events);
        assert_eq!(plant, before);
    }

    #[test]
    fn reproduce_pays_cost_and_spawns_seedling() {
        let mut events = Vec::new();
        let mut plant = Plant::new(25.0, 6, 5.0, 4.0).unwrap();
        let offspring = plant.reproduce(&mut events);

        assert_close(plant.energy(), 5.0);
        let Some(Organism::Plant(seedling)) = offspring else {
            panic!("expected a plant offspring");
        };
        assert_eq!(seedling.energy(), 10.0);
        assert_eq!(seedling.age(), 0);
        assert_eq!(seedling.size(), 1.0);
        assert_eq!(seedling.photosynthesis_rate(), 4.0);
        assert_eq!(events, vec![Event::Reproduced { kind: Kind::Plant }]);
    }

    #[test]
    fn reproduce_requires_energy_and_age() {
        let mut events = Vec::new();

        let mut young = Plant::new(25.0, 5, 5.0, 4.0).unwrap();
        assert!(young.reproduce(&mut events).is_none());
        assert_eq!(young.energy(), 25.0);

        let mut weak = Plant::new(20.0, 6, 5.0, 4.0).unwrap();
        assert!(weak.reproduce(&mut events).is_none());
        assert_eq!(weak.energy(), 20.0);

        assert!(events.is_empty());
    }

    #[test]
    fn new_rejects_negative_rate() {
        assert!(Plant::new(10.0, 0, 1.0, -1.0).is_err());
    }
}
