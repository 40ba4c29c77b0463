//! Heuristic feature extraction.
//!
//! Builds the fixed eight-feature vector the phase weights apply to. Action
//! effects are coarse per-kind increments; the baseline score's `details`
//! contribute positional and combat signals when the evaluator reported them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::{Action, ActionKind};
use crate::eval::Score;

const ECON_TECH_KEYS: [&str; 3] = ["advanced mining", "advanced labs", "nanorobots"];
const COMBAT_TECH_KEYS: [&str; 8] = [
    "plasma", "positron", "gauss", "ion", "shield", "drive", "hull", "starbase",
];

/// Fleet power per ship of each class.
const SHIP_POWER: [(&str, f64); 3] = [("interceptor", 0.15), ("cruiser", 0.45), ("dreadnought", 0.90)];

/// Feature vector for one (state, action) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Features {
    /// Baseline expected VP, copied verbatim.
    pub vp_now: f64,
    pub convertible_vp: f64,
    pub econ_growth: f64,
    pub tech_power: f64,
    pub fleet_power: f64,
    pub map_control: f64,
    pub risk_penalty: f64,
    pub opp_pressure: f64,
    /// Debug values.
    pub raw: BTreeMap<&'static str, f64>,
}

/// 1.0 if the lower-cased tech name contains an economy keyword.
pub fn econ_tech_match(name_lower: &str) -> f64 {
    if ECON_TECH_KEYS.iter().any(|k| name_lower.contains(k)) {
        1.0
    } else {
        0.0
    }
}

/// 1.0 if the lower-cased tech name contains a combat keyword.
pub fn combat_tech_match(name_lower: &str) -> f64 {
    if COMBAT_TECH_KEYS.iter().any(|k| name_lower.contains(k)) {
        1.0
    } else {
        0.0
    }
}

/// Builds the feature vector.
///
/// `opponent_pressure` is only used when the baseline did not report its
/// own `pressure` detail.
pub fn build_features<S: ?Sized>(
    _state: &S,
    action: &Action,
    base_score: &Score,
    convertible_vp: f64,
    opponent_pressure: f64,
    risk_penalty: f64,
) -> Features {
    let details = &base_score.details;
    let vp_now = base_score.expected_vp;

    let mut econ_growth = 0.0;
    let mut tech_power = 0.0;
    let mut fleet_power = 0.0;
    let mut map_control = 0.0;

    match action.kind {
        ActionKind::Explore => {
            econ_growth += 0.8;
            map_control += 0.4;
        }
        ActionKind::Influence => {
            econ_growth += 0.6;
            map_control += 0.3;
        }
        ActionKind::Research => {
            let name = action.tech().to_lowercase();
            let econ = econ_tech_match(&name);
            let combat = combat_tech_match(&name);
            econ_growth += 0.7 * econ;
            tech_power += 0.7 * combat + 0.3 * econ;
        }
        ActionKind::Build => {
            for (class, power) in SHIP_POWER {
                fleet_power += power * action.ship_count(class) as f64;
            }
            // Builds usually pair with upgrades later.
            tech_power += 0.15;
        }
        ActionKind::Upgrade => {
            fleet_power += 0.35;
            tech_power += 0.25;
        }
        ActionKind::Move => {
            if details.flag("positional") {
                map_control += 0.3 + 0.2 * details.number("territory_ev").unwrap_or(0.0);
            }
            fleet_power += 1.2 * details.number("combat_win_prob").unwrap_or(0.0);
        }
    }

    let opp_pressure = details.number("pressure").unwrap_or(opponent_pressure);

    let mut raw = BTreeMap::new();
    raw.insert("vp_now", vp_now);
    raw.insert("risk", base_score.risk);

    Features {
        vp_now,
        convertible_vp,
        econ_growth,
        tech_power,
        fleet_power,
        map_control,
        risk_penalty,
        opp_pressure,
        raw,
    }
}
