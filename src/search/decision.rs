//! Decision makers that build plans from a policy.

use super::planner::{create_plan, PlanError, PlanResult, PlanningState, Policy};

/// Plans with a single policy, keeping a cloned board updated step by step.
#[derive(Debug, Clone)]
pub struct DecisionMaker<P> {
    pub policy: P,
}

impl<P> DecisionMaker<P> {
    pub fn new(policy: P) -> Self {
        DecisionMaker { policy }
    }

    /// Produces a plan of `steps` actions from `board_state`.
    pub fn make_plan<S>(
        &mut self,
        board_state: &S,
        steps: usize,
    ) -> Result<PlanResult<S>, PlanError<P::Error, S::Error>>
    where
        S: PlanningState,
        P: Policy<S>,
    {
        create_plan(&mut self.policy, board_state, steps)
    }

    /// Returns only the first action of a `steps`-long plan.
    pub fn next_action<S>(
        &mut self,
        board_state: &S,
        steps: usize,
    ) -> Result<Option<S::Action>, PlanError<P::Error, S::Error>>
    where
        S: PlanningState,
        P: Policy<S>,
    {
        let plan = self.make_plan(board_state, steps)?;
        Ok(plan.actions.into_iter().next())
    }
}
