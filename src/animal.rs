use crate::capability::{Predator, Reproducible};
use crate::event::{DeathCause, Event};
use crate::organism::{Kind, Living, Organism, Vitals};
use crate::plant::Plant;
use crate::utils::check_num;
use anyhow::{Context, Result};

const MAX_AGE: u32 = 70;

const BITE_PER_PLANT_SIZE: f64 = 5.0;
const GRAZE_EFFICIENCY: f64 = 0.5;
const HUNT_EFFICIENCY: f64 = 0.8;
const FAILED_CHASE_COST: f64 = 5.0;

const REPRODUCTION_COST: f64 = 50.0;
const REPRODUCTION_MIN_AGE: u32 = 10;
const CUB_ENERGY: f64 = 30.0;
const CUB_SIZE: f64 = 2.0;

/// Mobile organism that grazes on plants and hunts slower animals.
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    vitals: Vitals,
    metabolism_rate: f64,
    speed: f64,
}

impl Animal {
    pub fn new(
        energy: f64,
        age: u32,
        size: f64,
        metabolism_rate: f64,
        speed: f64,
    ) -> Result<Self> {
        let vitals = Vitals::new(energy, age, size)?;
        check_num(metabolism_rate, 0.0..).context("invalid metabolism rate")?;
        check_num(speed, 0.0..).context("invalid speed")?;
        Ok(Self {
            vitals,
            metabolism_rate,
            speed,
        })
    }

    pub fn metabolism_rate(&self) -> f64 {
        self.metabolism_rate
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Eat from a living plant, keeping half of what is drained.
    pub fn graze(&mut self, plant: &mut Plant, events: &mut Vec<Event>) {
        if !plant.is_alive() || !self.is_alive() {
            return;
        }

        let drained = plant.be_eaten(plant.size() * BITE_PER_PLANT_SIZE, events);
        self.gain(drained * GRAZE_EFFICIENCY);
        events.push(Event::Grazed { drained });
    }
}

impl Living for Animal {
    fn kind(&self) -> Kind {
        Kind::Animal
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
        if self.spend(self.size() * self.metabolism_rate(), events) {
            return;
        }
        if self.age() > MAX_AGE {
            self.die(DeathCause::OldAge, events);
        }
    }
}

impl Predator for Animal {
    fn hunt(&mut self, prey: &mut Organism, events: &mut Vec<Event>) {
        let Organism::Animal(prey) = prey else {
            return;
        };
        if !prey.is_alive() || !self.is_alive() {
            return;
        }

        let hunter_speed = self.speed();
        let prey_speed = prey.speed();
        // Ties go to the prey.
        if hunter_speed > prey_speed {
            let drained = prey.be_eaten(prey.energy(), events);
            self.gain(drained * HUNT_EFFICIENCY);
            events.push(Event::Hunted {
                hunter_speed,
                prey_speed,
                drained,
            });
        } else {
            self.spend(FAILED_CHASE_COST, events);
            events.push(Event::ChaseFailed {
                hunter_speed,
                prey_speed,
            });
        }
    }
}

impl Reproducible for Animal {
    fn reproduce(&mut self, events: &mut Vec<Event>) -> Option<Organism> {
        if !self.is_alive()
            || self.vitals.energy <= REPRODUCTION_COST
            || self.vitals.age <= REPRODUCTION_MIN_AGE
        {
            return None;
        }

        self.vitals.energy -= REPRODUCTION_COST;
        events.push(Event::Reproduced { kind: Kind::Animal });

        Some(Organism::Animal(Self {
            vitals: Vitals::newborn(CUB_ENERGY, CUB_SIZE),
            metabolism_rate: self.metabolism_rate,
            speed: self.speed,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microbe::Microorganism;

    fn animal(energy: f64, speed: f64) -> Animal {
        Animal::new(energy, 0, 10.0, 1.2, speed).unwrap()
    }

    #[test]
    fn update_burns_metabolism() {
        let mut events = Vec::new();
        let mut lion = animal(100.0, 10.0);
        lion.update(&mut events);

        assert_eq!(lion.energy(), 88.0);
        assert_eq!(lion.age(), 1);
        assert!(lion.is_alive());
    }

    #[test]
    fn update_starves_or_dies_of_old_age() {
        let mut events = Vec::new();

        let mut starving = animal(5.0, 10.0);
        starving.update(&mut events);
        assert!(!starving.is_alive());
        assert_eq!(starving.energy(), 0.0);

        let mut old = Animal::new(100.0, 70, 10.0, 1.2, 10.0).unwrap();
        old.update(&mut events);
        assert!(!old.is_alive());
        assert_eq!(old.energy(), 88.0);

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
    fn faster_hunter_drains_prey_completely() {
        let mut events = Vec::new();
        let mut hunter = animal(100.0, 15.0);
        let mut prey: Organism = animal(40.0, 10.0).into();
        hunter.hunt(&mut prey, &mut events);

        assert_eq!(prey.energy(), 0.0);
        assert!(!prey.is_alive());
        assert_eq!(hunter.energy(), 132.0);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::Died {
                cause: DeathCause::Consumed,
                ..
            }
        )));
    }

    #[test]
    fn slower_or_equal_hunter_pays_for_the_chase() {
        let mut events = Vec::new();

        let mut slow = animal(100.0, 10.0);
        let mut prey: Organism = animal(40.0, 15.0).into();
        slow.hunt(&mut prey, &mut events);
        assert_eq!(slow.energy(), 95.0);
        assert_eq!(prey.energy(), 40.0);
        assert!(prey.is_alive());

        let mut tied = animal(100.0, 15.0);
        tied.hunt(&mut prey, &mut events);
        assert_eq!(tied.energy(), 95.0);
        assert_eq!(prey.energy(), 40.0);
    }

    #[test]
    fn failed_chase_can_starve_the_hunter() {
        let mut events = Vec::new();
        let mut hunter = Animal::new(3.0, 20, 1.0, 1.0, 5.0).unwrap();
        let mut prey: Organism = animal(100.0, 15.0).into();
        hunter.hunt(&mut prey, &mut events);

        assert!(!hunter.is_alive());
        assert_eq!(hunter.energy(), 0.0);
        assert!(hunter.reproduce(&mut events).is_none());
        assert!(matches!(
            events.as_slice(),
            [
                Event::Died {
                    cause: DeathCause::Starvation,
                    ..
                },
                Event::ChaseFailed { .. }
            ]
        ));
    }

    #[test]
    fn hunt_ignores_non_animals_and_the_dead() {
        let mut events = Vec::new();
        let mut hunter = animal(100.0, 15.0);

        let mut plant: Organism = Plant::new(30.0, 0, 5.0, 4.0).unwrap().into();
        let mut microbe: Organism = Microorganism::new(10.0, 0, 0.1, 0.3).unwrap().into();
        hunter.hunt(&mut plant, &mut events);
        hunter.hunt(&mut microbe, &mut events);

        let mut corpse: Organism = animal(40.0, 1.0).into();
        corpse.die(DeathCause::OldAge, &mut events);
        events.clear();
        hunter.hunt(&mut corpse, &mut events);

        assert_eq!(hunter.energy(), 100.0);
        assert_eq!(plant.energy(), 30.0);
        assert_eq!(corpse.energy(), 40.0);
        assert!(events.is_empty());
    }

    #[test]
    fn graze_keeps_half_of_the_bite() {
        let mut events = Vec::new();
        let mut cow = animal(50.0, 10.0);

        let mut plant = Plant::new(30.0, 0, 5.0, 4.0).unwrap();
        cow.graze(&mut plant, &mut events);
        assert_eq!(plant.energy(), 5.0);
        assert_eq!(cow.energy(), 62.5);

        // The next bite is capped by what the plant has left.
        cow.graze(&mut plant, &mut events);
        assert_eq!(plant.energy(), 0.0);
        assert!(!plant.is_alive());
        assert_eq!(cow.energy(), 65.0);
    }

    #[test]
    fn reproduce_spawns_cub_with_parent_traits() {
        let mut events = Vec::new();
        let mut parent = Animal::new(80.0, 11, 10.0, 1.5, 12.0).unwrap();
        let Some(Organism::Animal(cub)) = parent.reproduce(&mut events) else {
            panic!("expected an animal offspring");
        };

        assert_eq!(parent.energy(), 30.0);
        assert_eq!(cub.energy(), 30.0);
        assert_eq!(cub.age(), 0);
        assert_eq!(cub.size(), 2.0);
        assert_eq!(cub.metabolism_rate(), 1.5);
        assert_eq!(cub.speed(), 12.0);

        let mut young = Animal::new(80.0, 10, 10.0, 1.5, 12.0).unwrap();
        assert!(young.reproduce(&mut events).is_none());
        assert_eq!(young.energy(), 80.0);
    }
}
