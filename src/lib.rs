//! Eclipse AI decision-support core.
//!
//! Exposes the board query contract and action model, the phase-aware
//! valuation engine that post-processes baseline action scores, and the
//! sequential planner that simulates a policy over a cloned board.

pub mod board;
pub mod eval;
pub mod search;
pub mod valuation;
