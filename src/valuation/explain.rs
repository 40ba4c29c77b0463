//! Valuation breakdown attached to scored actions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::eval::Details;

/// Details key holding the breakdown.
pub const VALUATION_KEY: &str = "valuation";

/// Weighted contribution of each feature. `vp_now` is informational and is
/// not part of [`Components::bonus`]; the two penalties are stored negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub vp_now: f64,
    pub convertible_vp: f64,
    pub econ_growth: f64,
    pub tech_power: f64,
    pub fleet_power: f64,
    pub map_control: f64,
    pub risk_penalty: f64,
    pub opp_pressure: f64,
}

impl Components {
    /// Sum of the seven weighted components.
    pub fn bonus(&self) -> f64 {
        self.convertible_vp
            + self.econ_growth
            + self.tech_power
            + self.fleet_power
            + self.map_control
            + self.risk_penalty
            + self.opp_pressure
    }

    /// Named values, `vp_now` first.
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("vp_now", self.vp_now),
            ("convertible_vp", self.convertible_vp),
            ("econ_growth", self.econ_growth),
            ("tech_power", self.tech_power),
            ("fleet_power", self.fleet_power),
            ("map_control", self.map_control),
            ("risk_penalty", self.risk_penalty),
            ("opp_pressure", self.opp_pressure),
        ]
    }

    /// Every value rounded to three decimals.
    pub fn rounded(&self) -> Components {
        Components {
            vp_now: round3(self.vp_now),
            convertible_vp: round3(self.convertible_vp),
            econ_growth: round3(self.econ_growth),
            tech_power: round3(self.tech_power),
            fleet_power: round3(self.fleet_power),
            map_control: round3(self.map_control),
            risk_penalty: round3(self.risk_penalty),
            opp_pressure: round3(self.opp_pressure),
        }
    }
}

/// The `valuation` section of a score's details.
///
/// Keys other than the three computed ones are kept in `extra` and written
/// back next to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationBreakdown {
    pub components: Components,
    pub round_idx: u32,
    pub total_rounds: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValuationBreakdown {
    /// Sets one raw key. Computed keys that do not parse are dropped; the
    /// next merge rewrites them anyway.
    pub fn absorb(&mut self, key: String, value: Value) {
        let as_u32 = |v: &Value| v.as_u64().and_then(|n| u32::try_from(n).ok());
        match key.as_str() {
            "components" => {
                if let Ok(c) = serde_json::from_value(value) {
                    self.components = c;
                }
            }
            "round_idx" => {
                if let Some(n) = as_u32(&value) {
                    self.round_idx = n;
                }
            }
            "total_rounds" => {
                if let Some(n) = as_u32(&value) {
                    self.total_rounds = n;
                }
            }
            _ => {
                self.extra.insert(key, value);
            }
        }
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Returns `details` with the computed part of the valuation section
/// replaced. Baseline entries and extra keys already under `valuation` are
/// carried over untouched.
pub fn merge_breakdown(
    details: &Details,
    components: &Components,
    round_idx: u32,
    total_rounds: u32,
) -> Details {
    let mut merged = details.clone();
    if let Some(raw) = merged.entries.remove(VALUATION_KEY) {
        merged.absorb_valuation(raw);
    }
    let section = merged.valuation.get_or_insert_with(ValuationBreakdown::default);
    section.components = components.rounded();
    section.round_idx = round_idx;
    section.total_rounds = total_rounds;
    merged
}
