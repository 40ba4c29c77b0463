//! Read-only query contract consumed by the valuation heuristics.
//!
//! A board adapter implements this once; the heuristics never poke at the
//! board's own representation. Every method has an "absent" default so an
//! adapter only needs to expose what its schema actually carries, and every
//! heuristic degrades to a numeric zero when a query comes back empty.

use std::collections::BTreeMap;

/// A banked resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Materials,
    Science,
    Money,
}

impl Resource {
    /// Field name used by board snapshots.
    pub const fn key(self) -> &'static str {
        match self {
            Resource::Materials => "materials",
            Resource::Science => "science",
            Resource::Money => "money",
        }
    }
}

/// One owner's pieces on a single map cell.
#[derive(Debug, Clone, Copy)]
pub struct PieceView<'a> {
    pub owner: &'a str,
    /// Ship class -> count.
    pub ships: &'a BTreeMap<String, i64>,
    pub starbase: i64,
}

impl PieceView<'_> {
    /// Returns true if this owner has at least one ship here.
    pub fn has_ships(&self) -> bool {
        self.ships.values().any(|&n| n > 0)
    }

    /// Total ship count, ignoring non-positive entries.
    pub fn ship_total(&self) -> i64 {
        self.ships.values().filter(|&&n| n > 0).sum()
    }
}

/// Board read surface used by the shadow pricer, pressure estimator and
/// round inference.
pub trait BoardQuery {
    /// The player whose turn is being evaluated.
    fn active_player(&self) -> Option<&str> {
        None
    }

    /// Banked quantity of `kind` for `player`.
    fn resource(&self, _player: &str, _kind: Resource) -> Option<i64> {
        None
    }

    /// Current round, if the board reports one.
    fn round_index(&self) -> Option<u32> {
        None
    }

    /// All map cells, each as the list of owners' pieces on it.
    /// `None` means the board has no map.
    fn cells(&self) -> Option<Vec<Vec<PieceView<'_>>>> {
        None
    }
}

impl<T: BoardQuery + ?Sized> BoardQuery for &T {
    fn active_player(&self) -> Option<&str> {
        (**self).active_player()
    }

    fn resource(&self, player: &str, kind: Resource) -> Option<i64> {
        (**self).resource(player, kind)
    }

    fn round_index(&self) -> Option<u32> {
        (**self).round_index()
    }

    fn cells(&self) -> Option<Vec<Vec<PieceView<'_>>>> {
        (**self).cells()
    }
}
