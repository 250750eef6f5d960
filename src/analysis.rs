use crate::ecosystem::Ecosystem;
use crate::event::{DeathCause, Event};
use crate::organism::Kind;
use crate::stats::{Accumulator, TimeSeries};
use serde_json::{Map, Value, json};

/// Observable fed with the ecosystem after every tick.
pub trait Obs {
    fn update(&mut self, eco: &Ecosystem, events: &[Event]);
    fn report(&self) -> Value;
}

/// Number of living organisms.
pub struct NLive {
    time_series: TimeSeries,
}

impl NLive {
    pub fn new() -> Self {
        Self {
            time_series: TimeSeries::new(),
        }
    }
}

impl Obs for NLive {
    fn update(&mut self, eco: &Ecosystem, _events: &[Event]) {
        self.time_series.push(eco.population().live_count() as f64);
    }

    fn report(&self) -> Value {
        json!({ "n_live": self.time_series.report() })
    }
}

/// Number of corpses waiting for decomposition.
pub struct NBiomass {
    time_series: TimeSeries,
}

impl NBiomass {
    pub fn new() -> Self {
        Self {
            time_series: TimeSeries::new(),
        }
    }
}

impl Obs for NBiomass {
    fn update(&mut self, eco: &Ecosystem, _events: &[Event]) {
        self.time_series.push(eco.population().biomass_count() as f64);
    }

    fn report(&self) -> Value {
        json!({ "n_biomass": self.time_series.report() })
    }
}

/// Average energy of each kind's living members.
///
/// Ticks where a kind has no living members are skipped for that kind.
pub struct AvgEnergy {
    acc_vec: Vec<Accumulator>,
}

impl AvgEnergy {
    pub fn new() -> Self {
        let mut acc_vec = Vec::new();
        acc_vec.resize_with(Kind::ALL.len(), Accumulator::new);
        Self { acc_vec }
    }
}

impl Obs for AvgEnergy {
    fn update(&mut self, eco: &Ecosystem, _events: &[Event]) {
        for (kind, acc) in eco.population().energy_by_kind() {
            self.acc_vec[kind.index()].add(acc.mean());
        }
    }

    fn report(&self) -> Value {
        let reports: Map<String, Value> = Kind::ALL
            .iter()
            .map(|kind| {
                let report = self.acc_vec[kind.index()].report();
                (kind.name().to_owned(), json!(report))
            })
            .collect();
        json!({ "avg_energy": reports })
    }
}

/// Births and deaths by cause, per kind.
pub struct Turnover {
    births: [usize; 3],
    deaths: [[usize; 3]; 3],
}

impl Turnover {
    pub fn new() -> Self {
        Self {
            births: [0; 3],
            deaths: [[0; 3]; 3],
        }
    }
}

fn cause_index(cause: DeathCause) -> usize {
    match cause {
        DeathCause::Starvation => 0,
        DeathCause::OldAge => 1,
        DeathCause::Consumed => 2,
    }
}

impl Obs for Turnover {
    fn update(&mut self, _eco: &Ecosystem, events: &[Event]) {
        for event in events {
            match event {
                Event::Reproduced { kind } => self.births[kind.index()] += 1,
                Event::Died { kind, cause, .. } => {
                    self.deaths[kind.index()][cause_index(*cause)] += 1;
                }
                _ => {}
            }
        }
    }

    fn report(&self) -> Value {
        let reports: Map<String, Value> = Kind::ALL
            .iter()
            .map(|kind| {
                let deaths: Map<String, Value> = DeathCause::ALL
                    .iter()
                    .map(|&cause| {
                        let count = self.deaths[kind.index()][cause_index(cause)];
                        (cause.name().to_owned(), json!(count))
                    })
                    .collect();
                let report = json!({
                    "births": self.births[kind.index()],
                    "deaths": deaths,
                });
                (kind.name().to_owned(), report)
            })
            .collect();
        json!({ "turnover": reports })
    }
}

/// Collection of observables reported together at the end of a batch run.
pub struct Analyzer {
    n_ticks: usize,
    obs_ptr_vec: Vec<Box<dyn Obs>>,
}

impl Analyzer {
    pub fn new() -> Self {
        let obs_ptr_vec: Vec<Box<dyn Obs>> = vec![
            Box::new(NLive::new()),
            Box::new(NBiomass::new()),
            Box::new(AvgEnergy::new()),
            Box::new(Turnover::new()),
        ];
        Self {
            n_ticks: 0,
            obs_ptr_vec,
        }
    }

    /// Record the ecosystem state after a tick together with its events.
    pub fn add_tick(&mut self, eco: &Ecosystem, events: &[Event]) {
        self.n_ticks += 1;
        for obs in &mut self.obs_ptr_vec {
            obs.update(eco, events);
        }
    }

    pub fn report(&self) -> Value {
        let reports: Vec<_> = self.obs_ptr_vec.iter().map(|obs| obs.report()).collect();
        json!({ "n_ticks": self.n_ticks, "observables": reports })
    }
}
