//! Baseline scoring contract and its phase-aware composition.

use crate::board::{Action, BoardQuery};
use crate::valuation::{apply_phase_valuation, ValuationConfig};

use super::score::Score;

/// Scores a single candidate action against a board state.
pub trait Evaluator<S: ?Sized> {
    fn evaluate(&self, state: &S, action: &Action) -> Score;
}

impl<S: ?Sized, F> Evaluator<S> for F
where
    F: Fn(&S, &Action) -> Score,
{
    fn evaluate(&self, state: &S, action: &Action) -> Score {
        self(state, action)
    }
}

/// Baseline that scores every action as neutral: no VP, no risk, no details.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralEvaluator;

impl<S: ?Sized> Evaluator<S> for NeutralEvaluator {
    fn evaluate(&self, _state: &S, _action: &Action) -> Score {
        Score::default()
    }
}

/// A baseline evaluator followed by phase-aware valuation.
#[derive(Debug, Clone, Default)]
pub struct PhaseAwareEvaluator<E> {
    pub baseline: E,
    pub config: ValuationConfig,
}

impl<E> PhaseAwareEvaluator<E> {
    pub fn new(baseline: E, config: ValuationConfig) -> Self {
        PhaseAwareEvaluator { baseline, config }
    }
}

impl<S, E> Evaluator<S> for PhaseAwareEvaluator<E>
where
    S: BoardQuery + ?Sized,
    E: Evaluator<S>,
{
    fn evaluate(&self, state: &S, action: &Action) -> Score {
        let base = self.baseline.evaluate(state, action);
        apply_phase_valuation(state, action, base, &self.config)
    }
}
