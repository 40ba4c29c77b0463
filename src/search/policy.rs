//! Action-choosing policies.
//!
//! [`GreedyPolicy`] scores every candidate with an [`Evaluator`] (normally a
//! [`PhaseAwareEvaluator`](crate::eval::PhaseAwareEvaluator)) and keeps the
//! best. [`RandomPolicy`] picks uniformly and is mostly useful as a
//! reproducible opponent in simulations.

use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use super::planner::{PlanningState, Policy};
use crate::board::Action;
use crate::eval::{Evaluator, Score};

/// Enumerates candidate actions for a board state.
pub trait CandidateSource<S: PlanningState> {
    fn candidates(&self, state: &S) -> Vec<S::Action>;
}

impl<S, F> CandidateSource<S> for F
where
    S: PlanningState,
    F: Fn(&S) -> Vec<S::Action>,
{
    fn candidates(&self, state: &S) -> Vec<S::Action> {
        self(state)
    }
}

/// Errors raised by the built-in policies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("no candidate actions available")]
    NoCandidates,
}

/// Index of the highest score; the earliest wins ties and NaN never wins.
/// Falls back to 0 when every score is NaN.
fn argmax(scores: &[f64]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in scores.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    Some(best.map_or(0, |(i, _)| i))
}

/// Picks the candidate with the highest evaluated `expected_vp`.
#[derive(Debug, Clone)]
pub struct GreedyPolicy<E, C> {
    pub evaluator: E,
    pub candidates: C,
    /// Score candidates on the rayon pool.
    pub parallel: bool,
}

impl<E, C> GreedyPolicy<E, C> {
    pub fn new(evaluator: E, candidates: C) -> Self {
        GreedyPolicy {
            evaluator,
            candidates,
            parallel: false,
        }
    }

    /// Enables or disables parallel scoring.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Scores `actions` in order.
    pub fn score_all<S>(&self, state: &S, actions: &[Action]) -> Vec<Score>
    where
        S: Sync + ?Sized,
        E: Evaluator<S> + Sync,
    {
        // Borrow only the evaluator so the candidate source need not be Sync.
        let evaluator = &self.evaluator;
        if self.parallel {
            actions
                .par_iter()
                .map(|a| evaluator.evaluate(state, a))
                .collect()
        } else {
            actions.iter().map(|a| evaluator.evaluate(state, a)).collect()
        }
    }
}

impl<S, E, C> Policy<S> for GreedyPolicy<E, C>
where
    S: PlanningState<Action = Action> + Sync,
    E: Evaluator<S> + Sync,
    C: CandidateSource<S>,
{
    type Error = PolicyError;

    fn choose_action(&mut self, board_state: &S) -> Result<Action, PolicyError> {
        let mut candidates = self.candidates.candidates(board_state);
        let scores = self.score_all(board_state, &candidates);
        let values: Vec<f64> = scores.iter().map(|s| s.expected_vp).collect();
        let best = argmax(&values).ok_or(PolicyError::NoCandidates)?;
        debug!(
            "greedy pick {} of {} candidates: {} ({:.3})",
            best,
            candidates.len(),
            candidates[best].kind,
            values[best]
        );
        Ok(candidates.swap_remove(best))
    }
}

/// Uniform random choice among candidates.
#[derive(Debug, Clone)]
pub struct RandomPolicy<C> {
    pub candidates: C,
    rng: SmallRng,
}

impl<C> RandomPolicy<C> {
    /// Creates a policy seeded with `seed` (0 = use entropy).
    pub fn new(candidates: C, seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        RandomPolicy { candidates, rng }
    }
}

impl<S, C> Policy<S> for RandomPolicy<C>
where
    S: PlanningState,
    S::Action: Clone,
    C: CandidateSource<S>,
{
    type Error = PolicyError;

    fn choose_action(&mut self, board_state: &S) -> Result<S::Action, PolicyError> {
        self.candidates
            .candidates(board_state)
            .choose(&mut self.rng)
            .cloned()
            .ok_or(PolicyError::NoCandidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ActionKind, BoardState};
    use crate::eval::{NeutralEvaluator, PhaseAwareEvaluator};
    use crate::valuation::ValuationConfig;

    fn all_kinds(_: &BoardState) -> Vec<Action> {
        vec![
            Action::new(ActionKind::Upgrade),
            Action::new(ActionKind::Explore),
            Action::new(ActionKind::Influence),
        ]
    }

    fn nothing(_: &BoardState) -> Vec<Action> {
        Vec::new()
    }

    #[test]
    fn argmax_rules() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[f64::NAN, 0.5]), Some(1));
        assert_eq!(argmax(&[f64::NAN, f64::NAN]), Some(0));
        assert_eq!(argmax(&[-1.0, -0.5]), Some(1));
    }

    #[test]
    fn greedy_prefers_explore_early() {
        let eval = PhaseAwareEvaluator::new(NeutralEvaluator, ValuationConfig::default());
        let mut policy = GreedyPolicy::new(eval, all_kinds);
        let s = BoardState::new("you");
        // Round 1: explore 0.8 + 0.22, influence 0.6 + 0.165, upgrade 0.175 + 0.105.
        let a = policy.choose_action(&s).unwrap();
        assert_eq!(a.kind, ActionKind::Explore);
    }

    #[test]
    fn greedy_parallel_matches_serial() {
        let eval = PhaseAwareEvaluator::new(NeutralEvaluator, ValuationConfig::default());
        let serial = GreedyPolicy::new(eval, all_kinds);
        let parallel = serial.clone().parallel(true);
        let mut s = BoardState::new("you");
        s.round_idx = Some(8);
        let actions = all_kinds(&s);
        assert_eq!(serial.score_all(&s, &actions), parallel.score_all(&s, &actions));
    }

    #[test]
    fn parallel_greedy_with_thread_local_candidates() {
        use std::rc::Rc;

        let pool: Rc<Vec<Action>> = Rc::new(all_kinds(&BoardState::new("you")));
        let source = move |_: &BoardState| -> Vec<Action> { pool.as_ref().clone() };
        let eval = PhaseAwareEvaluator::new(NeutralEvaluator, ValuationConfig::default());
        let mut policy = GreedyPolicy::new(eval, source).parallel(true);
        let a = policy.choose_action(&BoardState::new("you")).unwrap();
        assert_eq!(a.kind, ActionKind::Explore);
    }

    #[test]
    fn greedy_without_candidates_errors() {
        let mut policy = GreedyPolicy::new(NeutralEvaluator, nothing);
        let err = policy.choose_action(&BoardState::new("you")).unwrap_err();
        assert_eq!(err, PolicyError::NoCandidates);
    }

    #[test]
    fn random_is_reproducible_for_a_seed() {
        let s = BoardState::new("you");
        let mut a = RandomPolicy::new(all_kinds, 7);
        let mut b = RandomPolicy::new(all_kinds, 7);
        for _ in 0..10 {
            assert_eq!(a.choose_action(&s).unwrap(), b.choose_action(&s).unwrap());
        }
        let mut empty = RandomPolicy::new(nothing, 7);
        assert_eq!(
            Policy::<BoardState>::choose_action(&mut empty, &s).unwrap_err(),
            PolicyError::NoCandidates
        );
    }
}
