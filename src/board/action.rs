//! Action model.
//!
//! An action is a tagged value: a discriminant from the six action kinds plus
//! an open JSON payload (tech name, ship counts, positional flags). Actions
//! are immutable once produced; the valuation engine only reads them through
//! the typed accessors below.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of action a player takes on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    Explore,
    Influence,
    Research,
    Build,
    Upgrade,
    Move,
}

/// All action kinds in declaration order.
pub const ALL_ACTION_KINDS: [ActionKind; 6] = [
    ActionKind::Explore,
    ActionKind::Influence,
    ActionKind::Research,
    ActionKind::Build,
    ActionKind::Upgrade,
    ActionKind::Move,
];

impl ActionKind {
    /// Returns the upper-case wire name.
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Explore => "EXPLORE",
            ActionKind::Influence => "INFLUENCE",
            ActionKind::Research => "RESEARCH",
            ActionKind::Build => "BUILD",
            ActionKind::Upgrade => "UPGRADE",
            ActionKind::Move => "MOVE",
        }
    }

    /// Parses a wire name, ignoring case.
    pub fn from_name(s: &str) -> Option<ActionKind> {
        ALL_ACTION_KINDS
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single action with its untyped payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl Action {
    /// Creates an action with an empty payload.
    pub fn new(kind: ActionKind) -> Self {
        Action {
            kind,
            payload: Map::new(),
        }
    }

    /// Returns a copy of this action with `key` set in the payload.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// Research action for the named tech.
    pub fn research(tech: &str) -> Self {
        Action::new(ActionKind::Research).with("tech", tech)
    }

    /// Build action for the given `(ship class, count)` pairs.
    pub fn build(ships: &[(&str, i64)]) -> Self {
        let ships: Map<String, Value> = ships
            .iter()
            .map(|(class, n)| (class.to_string(), Value::from(*n)))
            .collect();
        Action::new(ActionKind::Build).with("ships", Value::Object(ships))
    }

    /// Raw payload lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// The researched tech name, or "" when absent or not a string.
    pub fn tech(&self) -> &str {
        self.payload
            .get("tech")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Number of ships of `class` in the payload's `ships` mapping.
    ///
    /// Missing mapping, missing class, or a non-integer count all read as 0.
    pub fn ship_count(&self, class: &str) -> i64 {
        self.payload
            .get("ships")
            .and_then(Value::as_object)
            .and_then(|ships| ships.get(class))
            .and_then(value_as_i64)
            .unwrap_or(0)
    }
}

/// Reads an integer out of a JSON number, truncating floats toward zero.
pub(crate) fn value_as_i64(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}
