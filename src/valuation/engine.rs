//! Phase-aware valuation.
//!
//! Post-processes a baseline [`Score`] without re-simulating anything:
//! resolves the round, picks phase weights, prices banked resources, folds
//! in risk and opponent pressure, and adds the weighted bonus on top of the
//! baseline expected VP. A breakdown is attached under `details.valuation`.
//!
//! The engine fails open. Any error or panic while computing the adjustment
//! returns the baseline score untouched so scoring never blocks a planner.

use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::explain::{merge_breakdown, Components};
use super::features::{build_features, Features};
use super::phase::{weights_for_round, PhaseConfig, PhaseWeights};
use super::prices::{infer_round_idx, shadow_vp};
use super::pressure::pressure;
use super::risk::{penalty, RiskProfile};
use crate::board::{Action, BoardQuery};
use crate::eval::Score;

/// Environment variable read by [`ValuationConfig::with_env_overrides`].
pub const TOTAL_ROUNDS_ENV: &str = "ECLIPSE_TOTAL_ROUNDS";
/// Environment variable read by [`ValuationConfig::with_env_overrides`].
pub const ROUND_ENV: &str = "ECLIPSE_ROUND";

/// Errors raised inside the valuation path. They never escape
/// [`apply_phase_valuation`].
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    #[error("non-finite value in '{component}'")]
    NonFinite { component: &'static str },

    #[error("valuation panicked: {0}")]
    Panicked(String),
}

/// Valuation settings. The overrides force the phase computation
/// independently of what the board reports.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    pub phase: PhaseConfig,
    pub risk: RiskProfile,
    pub total_rounds_override: Option<u32>,
    pub round_override: Option<u32>,
}

impl ValuationConfig {
    /// Parses a config from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total rounds after overrides.
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds_override.unwrap_or(self.phase.total_rounds)
    }

    /// Current round after overrides, else the board's round, else 1.
    pub fn round_for<S: BoardQuery + ?Sized>(&self, state: &S) -> u32 {
        self.round_override
            .unwrap_or_else(|| infer_round_idx(state, 1))
    }

    /// Applies round overrides from `lookup`. Values that do not parse as an
    /// integer are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(TOTAL_ROUNDS_ENV).and_then(|v| v.trim().parse().ok()) {
            self.total_rounds_override = Some(v);
        }
        if let Some(v) = lookup(ROUND_ENV).and_then(|v| v.trim().parse().ok()) {
            self.round_override = Some(v);
        }
        self
    }

    /// Applies `ECLIPSE_TOTAL_ROUNDS` / `ECLIPSE_ROUND` from the process
    /// environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Sets a named option from its string form. Unknown names and
    /// unparseable values are ignored.
    pub fn set_option(&mut self, name: &str, value: &str) {
        let value = value.trim();
        match name {
            "TotalRounds" => {
                if let Ok(v) = value.parse() {
                    self.total_rounds_override = Some(v);
                }
            }
            "Round" => {
                if let Ok(v) = value.parse() {
                    self.round_override = Some(v);
                }
            }
            "EarlyUntilRound" => {
                if let Ok(v) = value.parse() {
                    self.phase.early_until_round = v;
                }
            }
            "TaperRounds" => {
                if let Ok(v) = value.parse() {
                    self.phase.taper_rounds = v;
                }
            }
            "RiskMode" => self.risk = RiskProfile::from_mode(value),
            _ => debug!("ignoring unknown valuation option '{}'", name),
        }
    }
}

/// Everything computed for one scored action.
#[derive(Debug, Clone)]
pub struct Valuation {
    pub round_idx: u32,
    pub total_rounds: u32,
    pub weights: PhaseWeights,
    pub features: Features,
    pub components: Components,
    pub expected_vp: f64,
}

fn check_finite(component: &'static str, v: f64) -> Result<f64, ValuationError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ValuationError::NonFinite { component })
    }
}

/// Computes the phase adjustment without touching the score.
fn compute<S: BoardQuery + ?Sized>(
    state: &S,
    action: &Action,
    base_score: &Score,
    cfg: &ValuationConfig,
) -> Result<Valuation, ValuationError> {
    check_finite("expected_vp", base_score.expected_vp)?;

    let total_rounds = cfg.total_rounds();
    let round_idx = cfg.round_for(state);

    let phase = PhaseConfig {
        total_rounds,
        ..cfg.phase
    };
    let w = weights_for_round(round_idx, &phase);

    let cvp = shadow_vp(state, action, total_rounds, round_idx);
    let risk = penalty(base_score.risk, cfg.risk);
    let opp = pressure(state, action);
    let f = build_features(state, action, base_score, cvp, opp, risk);

    let components = Components {
        vp_now: f.vp_now,
        convertible_vp: w.convertible_vp * f.convertible_vp,
        econ_growth: w.econ_growth * f.econ_growth,
        tech_power: w.tech_power * f.tech_power,
        fleet_power: w.fleet_power * f.fleet_power,
        map_control: w.map_control * f.map_control,
        risk_penalty: -w.risk_penalty * f.risk_penalty,
        opp_pressure: -w.opp_pressure * f.opp_pressure,
    };
    for (name, v) in components.entries() {
        check_finite(name, v)?;
    }
    let expected_vp = check_finite("expected_vp", f.vp_now + components.bonus())?;

    debug!(
        "valued {} at round {}/{}: {:.3} -> {:.3}",
        action.kind, round_idx, total_rounds, f.vp_now, expected_vp
    );

    Ok(Valuation {
        round_idx,
        total_rounds,
        weights: w,
        features: f,
        components,
        expected_vp,
    })
}

/// Computes the phase adjustment, converting panics in collaborators into
/// [`ValuationError::Panicked`].
pub fn try_phase_valuation<S: BoardQuery + ?Sized>(
    state: &S,
    action: &Action,
    base_score: &Score,
    cfg: &ValuationConfig,
) -> Result<Valuation, ValuationError> {
    match panic::catch_unwind(AssertUnwindSafe(|| compute(state, action, base_score, cfg))) {
        Ok(result) => result,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ValuationError::Panicked(msg))
        }
    }
}

/// Returns `base_score` with the phase-adjusted expected VP and a
/// `details.valuation` breakdown. Existing detail entries and `risk` are
/// preserved. On any internal failure the baseline is returned unchanged.
pub fn apply_phase_valuation<S: BoardQuery + ?Sized>(
    state: &S,
    action: &Action,
    mut base_score: Score,
    cfg: &ValuationConfig,
) -> Score {
    match try_phase_valuation(state, action, &base_score, cfg) {
        Ok(v) => {
            base_score.details =
                merge_breakdown(&base_score.details, &v.components, v.round_idx, v.total_rounds);
            base_score.expected_vp = v.expected_vp;
            base_score
        }
        Err(e) => {
            warn!("phase valuation failed, keeping baseline score: {}", e);
            base_score
        }
    }
}
