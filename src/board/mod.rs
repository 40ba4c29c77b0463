//! Board representation and game-state types.
//!
//! Contains the action model, the read-only query contract the valuation
//! heuristics consume, and a reference serde-backed board snapshot.

pub mod action;
pub mod query;
pub mod state;

pub use action::{Action, ActionKind, ALL_ACTION_KINDS};
pub use query::{BoardQuery, PieceView, Resource};
pub use state::{BoardError, BoardState, Hex, HexMap, Pieces, PlayerState, ResourcePool};
