//! Phase-aware action valuation.
//!
//! Wraps a baseline score with time-varying feature weights, a shadow price
//! on banked resources, opponent pressure and a risk-appetite penalty.

pub mod engine;
pub mod explain;
pub mod features;
pub mod phase;
pub mod pressure;
pub mod prices;
pub mod risk;

pub use engine::{
    apply_phase_valuation, try_phase_valuation, Valuation, ValuationConfig, ValuationError,
};
pub use explain::{Components, ValuationBreakdown, VALUATION_KEY};
pub use features::{build_features, Features};
pub use phase::{weights_for_round, PhaseConfig, PhaseWeights, EARLY, LATE};
pub use pressure::pressure;
pub use prices::{infer_round_idx, shadow_vp};
pub use risk::{penalty, RiskProfile};
