use crate::animal::Animal;
use crate::microbe::Microorganism;
use crate::organism::Organism;
use crate::plant::Plant;
use crate::utils::check_num;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Simulation configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tick driver settings.
    #[serde(default)]
    pub driver: DriverConfig,
    /// Groups of identical organisms placed in the world before the first tick.
    #[serde(default)]
    pub seeding: Vec<SeedGroup>,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Delay between interactive ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Seed of the random number generator. Drawn from the OS when absent.
    pub rng_seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            rng_seed: None,
        }
    }
}

/// `count` organisms sharing the same starting parameters.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(from = "SeedTable")]
pub struct SeedGroup {
    pub count: usize,
    pub energy: f64,
    pub age: u32,
    pub size: f64,
    pub species: Species,
}

/// Kind-specific parameters of a seeding group.
#[derive(Debug, PartialEq, Clone)]
pub enum Species {
    Plant { photosynthesis_rate: f64 },
    Animal { metabolism_rate: f64, speed: f64 },
    Microorganism { decomposition_rate: f64 },
}

/// A `[[seeding]]` table as written in the file.
///
/// Every variant lists all of its keys so that misspelled ones are rejected.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum SeedTable {
    Plant {
        count: usize,
        energy: f64,
        #[serde(default)]
        age: u32,
        size: f64,
        photosynthesis_rate: f64,
    },
    Animal {
        count: usize,
        energy: f64,
        #[serde(default)]
        age: u32,
        size: f64,
        metabolism_rate: f64,
        speed: f64,
    },
    Microorganism {
        count: usize,
        energy: f64,
        #[serde(default)]
        age: u32,
        size: f64,
        decomposition_rate: f64,
    },
}

impl From<SeedTable> for SeedGroup {
    fn from(table: SeedTable) -> Self {
        match table {
            SeedTable::Plant {
                count,
                energy,
                age,
                size,
                photosynthesis_rate,
            } => Self::new(
                count,
                energy,
                age,
                size,
                Species::Plant {
                    photosynthesis_rate,
                },
            ),
            SeedTable::Animal {
                count,
                energy,
                age,
                size,
                metabolism_rate,
                speed,
            } => Self::new(
                count,
                energy,
                age,
                size,
                Species::Animal {
                    metabolism_rate,
                    speed,
                },
            ),
            SeedTable::Microorganism {
                count,
                energy,
                age,
                size,
                decomposition_rate,
            } => Self::new(
                count,
                energy,
                age,
                size,
                Species::Microorganism { decomposition_rate },
            ),
        }
    }
}

impl SeedGroup {
    fn new(count: usize, energy: f64, age: u32, size: f64, species: Species) -> Self {
        Self {
            count,
            energy,
            age,
            size,
            species,
        }
    }

    /// Build one organism of this group.
    pub fn spawn(&self) -> Result<Organism> {
        let org: Organism = match self.species {
            Species::Plant {
                photosynthesis_rate,
            } => Plant::new(self.energy, self.age, self.size, photosynthesis_rate)?.into(),
            Species::Animal {
                metabolism_rate,
                speed,
            } => Animal::new(self.energy, self.age, self.size, metabolism_rate, speed)?.into(),
            Species::Microorganism { decomposition_rate } => {
                Microorganism::new(self.energy, self.age, self.size, decomposition_rate)?.into()
            }
        };
        Ok(org)
    }

    fn validate(&self) -> Result<()> {
        check_num(self.count, 0..100_000).context("invalid count")?;
        check_num(self.energy, 0.0..1e6).context("invalid energy")?;
        check_num(self.size, 0.0..1e3).context("invalid size")?;

        match self.species {
            Species::Plant {
                photosynthesis_rate,
            } => {
                check_num(photosynthesis_rate, 0.0..1e3).context("invalid photosynthesis rate")?;
            }
            Species::Animal {
                metabolism_rate,
                speed,
            } => {
                check_num(metabolism_rate, 0.0..1e3).context("invalid metabolism rate")?;
                check_num(speed, 0.0..1e3).context("invalid speed")?;
            }
            Species::Microorganism { decomposition_rate } => {
                check_num(decomposition_rate, 0.0..=1.0).context("invalid decomposition rate")?;
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: DriverConfig::default(),
            seeding: vec![
                SeedGroup::new(
                    15,
                    30.0,
                    0,
                    5.0,
                    Species::Plant {
                        photosynthesis_rate: 4.0,
                    },
                ),
                SeedGroup::new(
                    5,
                    100.0,
                    0,
                    10.0,
                    Species::Animal {
                        metabolism_rate: 1.2,
                        speed: 10.0,
                    },
                ),
                SeedGroup::new(
                    1,
                    150.0,
                    5,
                    15.0,
                    Species::Animal {
                        metabolism_rate: 1.5,
                        speed: 15.0,
                    },
                ),
                SeedGroup::new(
                    20,
                    10.0,
                    0,
                    0.1,
                    Species::Microorganism {
                        decomposition_rate: 0.3,
                    },
                ),
            ],
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_num(self.driver.tick_interval_ms, 0..=60_000).context("invalid tick interval")?;

        for (i_grp, grp) in self.seeding.iter().enumerate() {
            grp.validate()
                .with_context(|| format!("invalid seeding group {i_grp}"))?;
        }

        Ok(())
    }
}
