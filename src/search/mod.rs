//! Search and planning.
//!
//! Simulates a sequence of future actions against a cloned board using an
//! action-choosing policy. Policies may rank candidates with the phase-aware
//! evaluator; the planner itself is policy-agnostic.

pub mod decision;
pub mod planner;
pub mod policy;

pub use decision::DecisionMaker;
pub use planner::{create_plan, PlanError, PlanResult, PlanningState, Policy};
pub use policy::{CandidateSource, GreedyPolicy, PolicyError, RandomPolicy};
