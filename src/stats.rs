//! Running statistics used by the batch analysis.

use serde::Serialize;
use std::iter;

/// Online mean and variance (Welford's algorithm).
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    m2: f64,
}

#[derive(Debug, Serialize)]
pub struct AccumulatorReport {
    pub n_vals: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;
        let delta = val - self.mean;
        self.mean += delta / self.n_vals as f64;
        self.m2 += delta * (val - self.mean);
    }

    pub fn n_vals(&self) -> usize {
        self.n_vals
    }

    /// Mean of the values added so far, NaN if there are none.
    pub fn mean(&self) -> f64 {
        if self.n_vals == 0 { f64::NAN } else { self.mean }
    }

    /// Sample standard deviation, NaN with fewer than two values.
    pub fn std_dev(&self) -> f64 {
        if self.n_vals < 2 {
            return f64::NAN;
        }
        (self.m2 / (self.n_vals - 1) as f64).sqrt()
    }

    pub fn report(&self) -> AccumulatorReport {
        AccumulatorReport {
            n_vals: self.n_vals,
            mean: self.mean(),
            std_dev: self.std_dev(),
        }
    }
}

/// Full record of a scalar observable, one value per tick.
#[derive(Debug, Default)]
pub struct TimeSeries {
    vals: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct TimeSeriesReport {
    pub mean: f64,
    pub std_dev: f64,
    pub sem: f64,
    pub is_equil: bool,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, val: f64) {
        self.vals.push(val);
    }

    /// Statistics over the equilibrated tail of the series.
    ///
    /// `is_equil` is false when no truncation point better than the default
    /// (half the series) was found.
    pub fn report(&self) -> TimeSeriesReport {
        let n_vals = self.vals.len();
        if n_vals == 0 {
            return TimeSeriesReport {
                mean: f64::NAN,
                std_dev: f64::NAN,
                sem: f64::NAN,
                is_equil: false,
            };
        }

        let i_equil = equilibration_start(&self.vals);
        let tail = &self.vals[i_equil..];
        TimeSeriesReport {
            mean: mean(tail),
            std_dev: variance(tail).sqrt(),
            sem: blocking_sem(tail),
            is_equil: i_equil != n_vals / 2,
        }
    }
}

fn mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

fn variance(vals: &[f64]) -> f64 {
    if vals.len() < 2 {
        return f64::NAN;
    }
    let mean = mean(vals);
    let sq_sum: f64 = vals.iter().map(|&val| (val - mean).powi(2)).sum();
    sq_sum / (vals.len() - 1) as f64
}

/// Standard error of the mean of correlated data (Flyvbjerg-Petersen blocking).
///
/// Values are averaged in pairs until fewer than two blocks remain; the
/// estimate is read off the finest level that sits on the plateau, i.e. is
/// above every coarser level's lower error bound.
fn blocking_sem(vals: &[f64]) -> f64 {
    if vals.len() < 2 {
        return f64::NAN;
    }

    let levels: Vec<(f64, f64)> = iter::successors(Some(vals.to_vec()), |block| {
        (block.len() >= 4).then(|| {
            block
                .chunks_exact(2)
                .map(|pair| 0.5 * (pair[0] + pair[1]))
                .collect()
        })
    })
    .map(|block| {
        let n_blocks = block.len() as f64;
        let sem2 = variance(&block) / n_blocks;
        (sem2, sem2 * (2.0 / (n_blocks - 1.0)).sqrt())
    })
    .collect();

    let mut floor = f64::NEG_INFINITY;
    let mut plateau = None;
    for &(sem2, err) in levels.iter().rev() {
        floor = floor.max(sem2 - err);
        if sem2 > floor {
            plateau = Some(sem2);
        }
    }

    plateau
        .or_else(|| levels.last().map(|&(sem2, _)| sem2))
        .map_or(f64::NAN, f64::sqrt)
}

/// Squared standard error of the mean of `tail`, as a function of where the
/// tail starts.
fn marginal_error(tail: &[f64]) -> f64 {
    let n_tail = tail.len() as f64;
    variance(tail) * (n_tail - 1.0) / (n_tail * n_tail)
}

/// Truncation index minimising the marginal standard error.
///
/// Candidates are `n >> k` for `k` from `log2(n) + 1` down to 1. Falls back
/// to half the series when no candidate gives a finite error.
fn equilibration_start(vals: &[f64]) -> usize {
    let n_vals = vals.len();
    if n_vals == 0 {
        return 0;
    }

    (1..=n_vals.ilog2() + 1)
        .rev()
        .map(|shift| n_vals.checked_shr(shift).unwrap_or(0))
        .map(|start| (start, marginal_error(&vals[start..])))
        .filter(|(_, err)| !err.is_nan())
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or(n_vals / 2, |(start, _)| start)
}
