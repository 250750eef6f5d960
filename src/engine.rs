use crate::analysis::Analyzer;
use crate::config::Config;
use crate::ecosystem::{Ecosystem, TickOutcome};
use crate::report::Status;
use crate::stop::StopSignal;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use std::{io::Write, thread, time::Duration};

/// Simulation engine.
///
/// Holds the configuration, the ecosystem, and the random number generator,
/// and drives the ecosystem tick by tick.
pub struct Engine {
    cfg: Config,
    eco: Ecosystem,
    rng: ChaCha12Rng,
}

impl Engine {
    /// Create a new `Engine` with the ecosystem seeded from the configuration.
    pub fn generate_initial_condition(cfg: Config) -> Result<Self> {
        let rng = match cfg.driver.rng_seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng().context("failed to seed rng from os")?,
        };

        let mut eco = Ecosystem::new();
        for (i_grp, grp) in cfg.seeding.iter().enumerate() {
            for _ in 0..grp.count {
                let org = grp
                    .spawn()
                    .with_context(|| format!("failed to spawn organism of seeding group {i_grp}"))?;
                eco.add_organism(org);
            }
        }

        if eco.population().is_empty() {
            log::warn!("seeded an empty ecosystem");
        } else {
            log::info!("seeded {} organisms", eco.population().len());
        }

        Ok(Self { cfg, eco, rng })
    }

    pub fn status(&self) -> Status {
        Status::of(&self.eco)
    }

    /// Run ticks on the configured cadence, writing the status after each,
    /// until `stop` is raised or `max_ticks` ticks have run.
    ///
    /// The stop signal is only checked between ticks.
    pub fn run_interactive<W: Write>(
        &mut self,
        out: &mut W,
        stop: &StopSignal,
        max_ticks: Option<usize>,
    ) -> Result<()> {
        let interval = Duration::from_millis(self.cfg.driver.tick_interval_ms);

        writeln!(out, "{}", self.status())?;
        writeln!(out, "\nStarting simulation... Press Enter to stop.")?;

        loop {
            if stop.is_requested() {
                writeln!(out, "Simulation stopped by user.")?;
                break;
            }
            if max_ticks.is_some_and(|max_ticks| self.eco.tick() >= max_ticks) {
                log::info!("reached {} ticks", self.eco.tick());
                break;
            }

            writeln!(out, "\n--- Simulating Tick {} ---", self.eco.tick() + 1)?;
            self.perform_tick();
            let status = self.status();
            writeln!(out, "--- Tick End: {} organisms alive. ---", status.n_live)?;
            writeln!(out, "{status}")?;
            out.flush().context("failed to flush output")?;

            thread::sleep(interval);
        }

        Ok(())
    }

    /// Run `n_ticks` ticks back to back and report the observables.
    pub fn run_batch(&mut self, n_ticks: usize) -> serde_json::Value {
        let mut analyzer = Analyzer::new();
        let progress_step = (n_ticks / 10).max(1);

        for i_tick in 0..n_ticks {
            let outcome = self.perform_tick();
            analyzer.add_tick(&self.eco, &outcome.events);

            if (i_tick + 1) % progress_step == 0 {
                let progress = 100.0 * (i_tick + 1) as f64 / n_ticks as f64;
                log::info!("completed {progress:06.2}%");
            }
        }

        analyzer.report()
    }

    fn perform_tick(&mut self) -> TickOutcome {
        let outcome = self.eco.simulate_tick(&mut self.rng);

        for event in &outcome.events {
            if event.is_notable() {
                log::info!("{event}");
            } else {
                log::debug!("{event}");
            }
        }
        log::debug!(
            "tick {}: {} born, {} removed",
            self.eco.tick(),
            outcome.n_born,
            outcome.n_removed
        );

        outcome
    }
}
