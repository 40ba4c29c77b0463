//! Game-phase weight tapering.
//!
//! Heuristic feature weights live on two canonical endpoints, [`EARLY`]
//! (growth mode) and [`LATE`] (victory-point mode). Rounds up to the start of
//! the taper use EARLY, rounds past `early_until_round` use LATE, and the last
//! `taper_rounds` rounds of the early phase interpolate linearly between them.

use serde::{Deserialize, Serialize};

/// Round boundaries for the early/late split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    pub total_rounds: u32,
    /// Rounds `1..=early_until_round` are growth mode.
    pub early_until_round: u32,
    /// Length of the handoff ramp at the end of the early phase.
    pub taper_rounds: u32,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        PhaseConfig {
            total_rounds: 9,
            early_until_round: 6,
            taper_rounds: 2,
        }
    }
}

/// Weights applied to the heuristic features. `vp_now` is never weighted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub convertible_vp: f64,
    pub econ_growth: f64,
    pub tech_power: f64,
    pub fleet_power: f64,
    pub map_control: f64,
    /// Subtractive.
    pub risk_penalty: f64,
    /// Subtractive.
    pub opp_pressure: f64,
}

pub const EARLY: PhaseWeights = PhaseWeights {
    convertible_vp: 0.45,
    econ_growth: 1.00,
    tech_power: 0.70,
    fleet_power: 0.30,
    map_control: 0.55,
    risk_penalty: 0.15,
    opp_pressure: 0.10,
};

pub const LATE: PhaseWeights = PhaseWeights {
    convertible_vp: 0.95,
    econ_growth: 0.15,
    tech_power: 0.20,
    fleet_power: 0.90,
    map_control: 0.45,
    risk_penalty: 0.40,
    opp_pressure: 0.25,
};

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl PhaseWeights {
    /// Field-wise linear interpolation from `self` (t = 0) to `other` (t = 1).
    pub fn blend(&self, other: &PhaseWeights, t: f64) -> PhaseWeights {
        PhaseWeights {
            convertible_vp: lerp(self.convertible_vp, other.convertible_vp, t),
            econ_growth: lerp(self.econ_growth, other.econ_growth, t),
            tech_power: lerp(self.tech_power, other.tech_power, t),
            fleet_power: lerp(self.fleet_power, other.fleet_power, t),
            map_control: lerp(self.map_control, other.map_control, t),
            risk_penalty: lerp(self.risk_penalty, other.risk_penalty, t),
            opp_pressure: lerp(self.opp_pressure, other.opp_pressure, t),
        }
    }

    /// The seven weights in a fixed order.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.convertible_vp,
            self.econ_growth,
            self.tech_power,
            self.fleet_power,
            self.map_control,
            self.risk_penalty,
            self.opp_pressure,
        ]
    }
}

/// First round of the taper ramp.
pub fn taper_start(cfg: &PhaseConfig) -> u32 {
    (cfg.early_until_round as i64 - cfg.taper_rounds as i64 + 1).max(1) as u32
}

/// Returns the feature weights for `round_idx`.
pub fn weights_for_round(round_idx: u32, cfg: &PhaseConfig) -> PhaseWeights {
    if round_idx > cfg.early_until_round {
        return LATE;
    }
    let start = taper_start(cfg);
    if round_idx < start {
        return EARLY;
    }
    let span = (cfg.early_until_round as i64 - start as i64 + 1).max(1);
    let t = (round_idx - start) as f64 / span as f64;
    EARLY.blend(&LATE, t)
}
