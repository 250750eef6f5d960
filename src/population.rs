//! Insertion-ordered store owning every organism of the ecosystem.

use crate::organism::{Kind, Living, Organism};
use crate::stats::Accumulator;
use rand::prelude::*;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Default)]
pub struct Population {
    organisms: Vec<Organism>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, organism: Organism) {
        self.organisms.push(organism);
    }

    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter()
    }

    /// Borrow two distinct organisms mutably at once.
    ///
    /// Returns `None` if the indices are equal or out of bounds.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Organism, &mut Organism)> {
        if a == b || a.max(b) >= self.organisms.len() {
            return None;
        }
        if a < b {
            let (head, tail) = self.organisms.split_at_mut(b);
            Some((&mut head[a], &mut tail[0]))
        } else {
            let (head, tail) = self.organisms.split_at_mut(a);
            Some((&mut tail[0], &mut head[b]))
        }
    }

    /// Pick a uniformly random living organism of `kind`, other than `exclude`.
    pub fn random_target<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: Kind,
        exclude: usize,
    ) -> Option<usize> {
        let candidates: Vec<usize> = self
            .organisms
            .iter()
            .enumerate()
            .filter(|&(idx, org)| idx != exclude && org.is_alive() && org.kind() == kind)
            .map(|(idx, _)| idx)
            .collect();
        candidates.choose(rng).copied()
    }

    /// Index of the first dead organism still holding energy.
    pub fn first_biomass(&self) -> Option<usize> {
        self.organisms.iter().position(Organism::is_biomass)
    }

    /// Drop fully spent corpses, keeping the order of the rest.
    ///
    /// Returns the number of organisms removed.
    pub fn compact(&mut self) -> usize {
        let n_before = self.organisms.len();
        self.organisms.retain(|org| !org.is_spent());
        n_before - self.organisms.len()
    }

    pub fn live_count(&self) -> usize {
        self.iter().filter(|org| org.is_alive()).count()
    }

    pub fn biomass_count(&self) -> usize {
        self.iter().filter(|org| org.is_biomass()).count()
    }

    /// Energy statistics of living organisms, grouped by kind in order of
    /// first appearance.
    pub fn energy_by_kind(&self) -> Vec<(Kind, Accumulator)> {
        let mut groups: Vec<(Kind, Accumulator)> = Vec::new();
        for org in self.organisms.iter().filter(|org| org.is_alive()) {
            let kind = org.kind();
            let i_grp = match groups.iter().position(|(grp_kind, _)| *grp_kind == kind) {
                Some(i_grp) => i_grp,
                None => {
                    groups.push((kind, Accumulator::new()));
                    groups.len() - 1
                }
            };
            groups[i_grp].1.add(org.energy());
        }
        groups
    }
}

impl Index<usize> for Population {
    type Output = Organism;

    fn index(&self, idx: usize) -> &Organism {
        &self.organisms[idx]
    }
}

impl IndexMut<usize> for Population {
    fn index_mut(&mut self, idx: usize) -> &mut Organism {
        &mut self.organisms[idx]
    }
}

impl Extend<Organism> for Population {
    fn extend<I: IntoIterator<Item = Organism>>(&mut self, iter: I) {
        self.organisms.extend(iter);
    }
}

impl FromIterator<Organism> for Population {
    fn from_iter<I: IntoIterator<Item = Organism>>(iter: I) -> Self {
        Self {
            organisms: iter.into_iter().collect(),
        }
    }
}
