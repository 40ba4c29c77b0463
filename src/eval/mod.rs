//! Action evaluation.
//!
//! Defines the score type, the baseline evaluator contract, and the explicit
//! composition of a baseline with phase-aware valuation.

pub mod evaluator;
pub mod score;

pub use evaluator::{Evaluator, NeutralEvaluator, PhaseAwareEvaluator};
pub use score::{Details, Score};
