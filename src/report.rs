//! Status snapshot polled by the tick drivers.

use crate::ecosystem::Ecosystem;
use crate::organism::Kind;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindStatus {
    pub kind: Kind,
    pub count: usize,
    pub avg_energy: f64,
}

/// Read-only summary of the ecosystem after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub tick: usize,
    pub n_live: usize,
    /// Living organisms per kind, in order of first appearance.
    pub kinds: Vec<KindStatus>,
    pub n_biomass: usize,
}

impl Status {
    pub fn of(eco: &Ecosystem) -> Self {
        let pop = eco.population();
        let kinds = pop
            .energy_by_kind()
            .into_iter()
            .map(|(kind, acc)| KindStatus {
                kind,
                count: acc.n_vals(),
                avg_energy: acc.mean(),
            })
            .collect();
        Self {
            tick: eco.tick(),
            n_live: pop.live_count(),
            kinds,
            n_biomass: pop.biomass_count(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Ecosystem Status ===")?;
        for kind in &self.kinds {
            writeln!(
                f,
                "* {}s: {} (Avg Energy: {:.1})",
                kind.kind, kind.count, kind.avg_energy
            )?;
        }
        writeln!(
            f,
            "* Dead Biomass (waiting for decomposition): {}",
            self.n_biomass
        )?;
        write!(f, "=========================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::Animal;
    use crate::event::DeathCause;
    use crate::organism::{Living, Organism};
    use crate::plant::Plant;

    #[test]
    fn renders_counts_energy_and_biomass() {
        let mut eco = Ecosystem::new();
        eco.add_organism(Plant::new(30.0, 0, 5.0, 4.0).unwrap().into());
        eco.add_organism(Plant::new(20.0, 0, 5.0, 4.0).unwrap().into());
        eco.add_organism(Animal::new(100.0, 0, 10.0, 1.2, 10.0).unwrap().into());
        let mut corpse: Organism = Animal::new(50.0, 0, 10.0, 1.2, 10.0).unwrap().into();
        corpse.die(DeathCause::OldAge, &mut Vec::new());
        eco.add_organism(corpse);

        let status = Status::of(&eco);
        assert_eq!(status.n_live, 3);
        assert_eq!(status.n_biomass, 1);
        assert_eq!(
            status.to_string(),
            "\n=== Ecosystem Status ===\n\
             * Plants: 2 (Avg Energy: 25.0)\n\
             * Animals: 1 (Avg Energy: 100.0)\n\
             * Dead Biomass (waiting for decomposition): 1\n\
             ========================="
        );
    }

    #[test]
    fn empty_ecosystem_lists_no_kinds() {
        let status = Status::of(&Ecosystem::new());
        assert!(status.kinds.is_empty());
        assert_eq!(status.n_live, 0);
    }
}
