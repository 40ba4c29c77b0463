//! Sequential planning.
//!
//! Drives a policy across a cloned, evolving board for a fixed number of
//! steps. The caller's board is only borrowed immutably and never mutated;
//! every step the policy sees the simulated board with all previous actions
//! already applied.
//!
//! The planner fails loud: a policy or apply error aborts the plan and is
//! returned unchanged, with the partial action list discarded.

use log::trace;

/// Board capability set needed for simulation.
pub trait PlanningState: Clone {
    type Action;
    type Error;

    /// Applies an action in place.
    fn apply_action(&mut self, action: &Self::Action) -> Result<(), Self::Error>;
}

/// Something that picks the next action for a board state.
pub trait Policy<S: PlanningState> {
    type Error;

    fn choose_action(&mut self, board_state: &S) -> Result<S::Action, Self::Error>;
}

/// Actions chosen during planning and the simulated board after all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult<S: PlanningState> {
    pub actions: Vec<S::Action>,
    pub resulting_state: S,
}

/// Errors that abort planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError<P, S> {
    #[error("policy failed at step {step}: {source}")]
    Policy { step: usize, source: P },

    #[error("applying action at step {step} failed: {source}")]
    Apply { step: usize, source: S },
}

impl<P, S> PlanError<P, S> {
    /// Step index (0-based) at which planning stopped.
    pub fn step(&self) -> usize {
        match self {
            PlanError::Policy { step, .. } | PlanError::Apply { step, .. } => *step,
        }
    }
}

/// Builds a plan of `steps` actions by repeatedly querying `policy` against a
/// clone of `board_state`, applying each action before the next query.
pub fn create_plan<S, P>(
    policy: &mut P,
    board_state: &S,
    steps: usize,
) -> Result<PlanResult<S>, PlanError<P::Error, S::Error>>
where
    S: PlanningState,
    P: Policy<S>,
{
    let mut simulated = board_state.clone();
    let mut actions = Vec::with_capacity(steps);

    for step in 0..steps {
        let action = policy
            .choose_action(&simulated)
            .map_err(|source| PlanError::Policy { step, source })?;
        simulated
            .apply_action(&action)
            .map_err(|source| PlanError::Apply { step, source })?;
        trace!("plan step {}/{} applied", step + 1, steps);
        actions.push(action);
    }

    Ok(PlanResult {
        actions,
        resulting_state: simulated,
    })
}
