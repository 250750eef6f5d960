use crate::capability::Reproducible;
use crate::event::{DeathCause, Event};
use crate::organism::{Kind, Living, Organism, Vitals};
use crate::utils::check_num;
use anyhow::{Context, Result};

const MAX_AGE: u32 = 100;
const UPKEEP: f64 = 0.2;

const REPRODUCTION_COST: f64 = 5.0;
const SPORE_ENERGY: f64 = 2.0;
const SPORE_SIZE: f64 = 0.1;

/// Decomposer feeding on dead biomass.
#[derive(Debug, Clone, PartialEq)]
pub struct Microorganism {
    vitals: Vitals,
    decomposition_rate: f64,
}

impl Microorganism {
    pub fn new(energy: f64, age: u32, size: f64, decomposition_rate: f64) -> Result<Self> {
        let vitals = Vitals::new(energy, age, size)?;
        check_num(decomposition_rate, 0.0..=1.0).context("invalid decomposition rate")?;
        Ok(Self {
            vitals,
            decomposition_rate,
        })
    }

    pub fn decomposition_rate(&self) -> f64 {
        self.decomposition_rate
    }

    /// Drain a fraction of a corpse's remaining energy, keeping all of it.
    ///
    /// Living organisms and fully spent corpses are left alone.
    pub fn decompose(&mut self, corpse: &mut Organism, events: &mut Vec<Event>) {
        if !corpse.is_biomass() {
            return;
        }

        let drained = corpse.be_eaten(corpse.energy() * self.decomposition_rate(), events);
        self.gain(drained);
        events.push(Event::Decomposed { drained });
    }
}

impl Living for Microorganism {
    fn kind(&self) -> Kind {
        Kind::Microorganism
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
        // Both checks always run; `die` reports only the first cause.
        self.spend(UPKEEP, events);
        if self.age() > MAX_AGE {
            self.die(DeathCause::OldAge, events);
        }
    }
}

impl Reproducible for Microorganism {
    fn reproduce(&mut self, events: &mut Vec<Event>) -> Option<Organism> {
        if !self.is_alive() || self.vitals.energy <= REPRODUCTION_COST {
            return None;
        }

        self.vitals.energy -= REPRODUCTION_COST;
        events.push(Event::Reproduced {
            kind: Kind::Microorganism,
        });

        Some(Organism::Microorganism(Self {
            vitals: Vitals::newborn(SPORE_ENERGY, SPORE_SIZE),
            decomposition_rate: self.decomposition_rate,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::Animal;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn corpse(energy: f64) -> Organism {
        let mut events = Vec::new();
        let mut body: Organism = Animal::new(energy, 30, 10.0, 1.2, 10.0).unwrap().into();
        body.die(DeathCause::OldAge, &mut events);
        body
    }

    #[test]
    fn decompose_drains_a_fraction_of_the_corpse() {
        let mut events = Vec::new();
        let mut microbe = Microorganism::new(1.0, 0, 0.1, 0.3).unwrap();
        let mut body = corpse(10.0);
        microbe.decompose(&mut body, &mut events);

        assert_close(body.energy(), 7.0);
        assert!(body.is_biomass());
        assert_close(microbe.energy(), 4.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn decompose_ignores_living_and_spent_organisms() {
        let mut events = Vec::new();
        let mut microbe = Microorganism::new(1.0, 0, 0.1, 0.3).unwrap();

        let mut living: Organism = Animal::new(10.0, 0, 10.0, 1.2, 10.0).unwrap().into();
        microbe.decompose(&mut living, &mut events);
        assert_eq!(living.energy(), 10.0);

        let mut spent = corpse(10.0);
        spent.be_eaten(10.0, &mut events);
        microbe.decompose(&mut spent, &mut events);

        assert_eq!(microbe.energy(), 1.0);
        assert!(events.is_empty());
    }

    #[test]
    fn update_checks_energy_and_age_independently() {
        let mut events = Vec::new();

        let mut microbe = Microorganism::new(10.0, 0, 0.1, 0.3).unwrap();
        microbe.update(&mut events);
        assert_close(microbe.energy(), 9.8);
        assert!(microbe.is_alive());

        let mut doomed = Microorganism::new(0.1, 100, 0.1, 0.3).unwrap();
        doomed.update(&mut events);
        assert!(!doomed.is_alive());
        assert_eq!(doomed.energy(), 0.0);

        let mut old = Microorganism::new(10.0, 100, 0.1, 0.3).unwrap();
        old.update(&mut events);
        assert!(!old.is_alive());

        let causes: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::Died { cause, .. } => Some(*cause),
                _ => None,
            })
            .collect();
        assert_eq!(causes, vec![DeathCause::Starvation, DeathCause::OldAge]);
    }

    #[test]
    fn reproduce_has_no_age_gate() {
        let mut events = Vec::new();
        let mut microbe = Microorganism::new(6.0, 0, 0.1, 0.3).unwrap();
        let Some(Organism::Microorganism(spore)) = microbe.reproduce(&mut events) else {
            panic!("expected a microorganism offspring");
        };

        assert_eq!(microbe.energy(), 1.0);
        assert_eq!(spore.energy(), 2.0);
        assert_eq!(spore.size(), 0.1);
        assert_eq!(spore.decomposition_rate(), 0.3);

        assert!(microbe.reproduce(&mut events).is_none());
    }

    #[test]
    fn new_rejects_rates_above_one() {
        assert!(Microorganism::new(1.0, 0, 0.1, 1.5).is_err());
    }
}
