//! Observable events emitted by organisms during a tick.
//!
//! Domain operations never print. They push [`Event`] values into a list
//! owned by the caller, and the engine decides how to report them.

use crate::organism::Kind;
use serde::Serialize;
use std::fmt;

/// Why an organism died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Energy ran out through its own upkeep or a failed chase.
    Starvation,
    /// Exceeded the maximum age of its kind.
    OldAge,
    /// Drained to zero by another organism.
    Consumed,
}

impl DeathCause {
    pub const ALL: [DeathCause; 3] = [Self::Starvation, Self::OldAge, Self::Consumed];

    pub fn name(self) -> &'static str {
        match self {
            Self::Starvation => "starvation",
            Self::OldAge => "old_age",
            Self::Consumed => "consumed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Emitted once per organism, on its transition to dead.
    Died {
        kind: Kind,
        size: f64,
        age: u32,
        cause: DeathCause,
    },
    Reproduced {
        kind: Kind,
    },
    Grazed {
        drained: f64,
    },
    Hunted {
        hunter_speed: f64,
        prey_speed: f64,
        drained: f64,
    },
    ChaseFailed {
        hunter_speed: f64,
        prey_speed: f64,
    },
    Decomposed {
        drained: f64,
    },
}

impl Event {
    /// Whether the event is worth reporting at the default log level.
    pub fn is_notable(&self) -> bool {
        matches!(
            self,
            Self::Died { .. } | Self::Reproduced { .. } | Self::Hunted { .. }
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Died {
                kind,
                size,
                age,
                cause,
            } => write!(
                f,
                "{kind} (Size: {size:.1}) has died at age {age} ({}).",
                cause.name()
            ),
            Self::Reproduced { kind } => write!(f, "{kind} has reproduced."),
            Self::Grazed { drained } => write!(f, "Animal grazed {drained:.1} energy from a Plant."),
            Self::Hunted {
                hunter_speed,
                prey_speed,
                drained,
            } => write!(
                f,
                "Animal (Speed: {hunter_speed}) hunted another Animal (Speed: {prey_speed}), draining {drained:.1}!"
            ),
            Self::ChaseFailed {
                hunter_speed,
                prey_speed,
            } => write!(
                f,
                "Animal (Speed: {hunter_speed}) failed to catch an Animal (Speed: {prey_speed})."
            ),
            Self::Decomposed { drained } => {
                write!(f, "Microorganism decomposed {drained:.2} energy of dead biomass.")
            }
        }
    }
}
