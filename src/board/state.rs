//! Reference board snapshot.
//!
//! A serde-backed game state that is tolerant of the loose schemas boards
//! arrive in: resources may sit directly on a player or in a nested
//! `resources` object, the round may be reported under several key names,
//! and the map is optional. It implements the planning contract (clone +
//! apply) and the [`BoardQuery`] read surface.

use std::collections::BTreeMap;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::action::Action;
use super::query::{BoardQuery, PieceView, Resource};
use crate::search::PlanningState;

/// Key names checked, in order, when inferring the current round.
pub const ROUND_KEYS: [&str; 4] = ["round_idx", "round", "turn_idx", "turn"];

/// Errors that can occur while loading a board snapshot.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("failed to parse board JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Banked resources in a nested `resources` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    #[serde(default)]
    pub materials: Option<i64>,
    #[serde(default)]
    pub science: Option<i64>,
    #[serde(default)]
    pub money: Option<i64>,
}

impl ResourcePool {
    fn get(&self, kind: Resource) -> Option<i64> {
        match kind {
            Resource::Materials => self.materials,
            Resource::Science => self.science,
            Resource::Money => self.money,
        }
    }
}

/// Per-player state. Direct resource fields take precedence over the
/// nested pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(default)]
    pub materials: Option<i64>,
    #[serde(default)]
    pub science: Option<i64>,
    #[serde(default)]
    pub money: Option<i64>,
    #[serde(default)]
    pub resources: Option<ResourcePool>,
}

impl PlayerState {
    /// Player with the three resources set directly.
    pub fn with_resources(materials: i64, science: i64, money: i64) -> Self {
        PlayerState {
            materials: Some(materials),
            science: Some(science),
            money: Some(money),
            resources: None,
        }
    }

    /// Looks up a resource: direct field first, then the nested pool.
    pub fn resource(&self, kind: Resource) -> Option<i64> {
        let direct = match kind {
            Resource::Materials => self.materials,
            Resource::Science => self.science,
            Resource::Money => self.money,
        };
        direct.or_else(|| self.resources.as_ref().and_then(|r| r.get(kind)))
    }
}

/// One owner's pieces on a hex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pieces {
    #[serde(default)]
    pub ships: BTreeMap<String, i64>,
    #[serde(default)]
    pub starbase: i64,
}

/// A single map hex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hex {
    /// Owner id -> pieces.
    #[serde(default)]
    pub pieces: BTreeMap<String, Pieces>,
}

/// The hex map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HexMap {
    #[serde(default)]
    pub hexes: BTreeMap<String, Hex>,
}

impl HexMap {
    /// Adds `count` ships of `class` for `owner` on `hex`, creating entries as needed.
    pub fn add_ships(&mut self, hex: &str, owner: &str, class: &str, count: i64) {
        let pieces = self
            .hexes
            .entry(hex.to_string())
            .or_default()
            .pieces
            .entry(owner.to_string())
            .or_default();
        *pieces.ships.entry(class.to_string()).or_insert(0) += count;
    }

    /// Adds a starbase for `owner` on `hex`.
    pub fn add_starbase(&mut self, hex: &str, owner: &str) {
        self.hexes
            .entry(hex.to_string())
            .or_default()
            .pieces
            .entry(owner.to_string())
            .or_default()
            .starbase += 1;
    }
}

/// Complete board snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(default)]
    pub active_player: Option<String>,
    #[serde(default)]
    pub players: BTreeMap<String, PlayerState>,
    #[serde(default)]
    pub map: Option<HexMap>,
    #[serde(default)]
    pub round_idx: Option<i64>,
    #[serde(default)]
    pub round: Option<i64>,
    #[serde(default)]
    pub turn_idx: Option<i64>,
    #[serde(default)]
    pub turn: Option<i64>,
    #[serde(default)]
    pub meta: BTreeMap<String, Value>,
    /// Actions applied to this snapshot, oldest first.
    #[serde(default)]
    pub history: Vec<Action>,
}

impl BoardState {
    /// Creates an empty board with the given active player.
    pub fn new(active_player: &str) -> Self {
        BoardState {
            active_player: Some(active_player.to_string()),
            ..BoardState::default()
        }
    }

    /// Parses a board snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Inserts or replaces a player.
    pub fn set_player(&mut self, id: &str, player: PlayerState) {
        self.players.insert(id.to_string(), player);
    }

    /// Returns the map, creating an empty one if the board has none.
    pub fn map_mut(&mut self) -> &mut HexMap {
        self.map.get_or_insert_with(HexMap::default)
    }

    fn direct_round_field(&self, key: &str) -> Option<i64> {
        match key {
            "round_idx" => self.round_idx,
            "round" => self.round,
            "turn_idx" => self.turn_idx,
            "turn" => self.turn,
            _ => None,
        }
    }
}

impl BoardQuery for BoardState {
    fn active_player(&self) -> Option<&str> {
        self.active_player.as_deref()
    }

    fn resource(&self, player: &str, kind: Resource) -> Option<i64> {
        self.players.get(player).and_then(|p| p.resource(kind))
    }

    fn round_index(&self) -> Option<u32> {
        for key in ROUND_KEYS {
            let direct = self.direct_round_field(key);
            let meta = self.meta.get(key).and_then(Value::as_i64);
            for val in [direct, meta].into_iter().flatten() {
                if val >= 1 {
                    if let Ok(r) = u32::try_from(val) {
                        return Some(r);
                    }
                }
            }
        }
        None
    }

    fn cells(&self) -> Option<Vec<Vec<PieceView<'_>>>> {
        let map = self.map.as_ref()?;
        let cells = map
            .hexes
            .values()
            .map(|hex| {
                hex.pieces
                    .iter()
                    .map(|(owner, p)| PieceView {
                        owner: owner.as_str(),
                        ships: &p.ships,
                        starbase: p.starbase,
                    })
                    .collect()
            })
            .collect();
        Some(cells)
    }
}

impl PlanningState for BoardState {
    type Action = Action;
    type Error = Infallible;

    /// Records the action. Rules are not enforced here.
    fn apply_action(&mut self, action: &Action) -> Result<(), Infallible> {
        self.history.push(action.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::action::ActionKind;
    use serde_json::json;

    #[test]
    fn direct_resources_win_over_nested() {
        let p = PlayerState {
            materials: Some(12),
            science: None,
            money: None,
            resources: Some(ResourcePool {
                materials: Some(99),
                science: Some(4),
                money: None,
            }),
        };
        assert_eq!(p.resource(Resource::Materials), Some(12));
        assert_eq!(p.resource(Resource::Science), Some(4));
        assert_eq!(p.resource(Resource::Money), None);
    }

    #[test]
    fn round_lookup_order() {
        let mut s = BoardState::new("you");
        assert_eq!(s.round_index(), None);

        s.meta.insert("turn".into(), json!(5));
        assert_eq!(s.round_index(), Some(5));

        s.turn_idx = Some(4);
        assert_eq!(s.round_index(), Some(4));

        s.meta.insert("round".into(), json!(3));
        assert_eq!(s.round_index(), Some(3));

        s.round_idx = Some(2);
        assert_eq!(s.round_index(), Some(2));
    }

    #[test]
    fn round_lookup_skips_non_positive_and_non_integer() {
        let mut s = BoardState::new("you");
        s.round_idx = Some(0);
        s.meta.insert("round".into(), json!("7"));
        s.meta.insert("turn_idx".into(), json!(2.5));
        s.turn = Some(6);
        assert_eq!(s.round_index(), Some(6));
    }

    #[test]
    fn cells_expose_pieces() {
        let mut s = BoardState::new("you");
        assert!(s.cells().is_none());
        s.map_mut().add_ships("101", "you", "interceptor", 2);
        s.map_mut().add_starbase("101", "red");
        let cells = s.cells().unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].len(), 2);
        let red = cells[0].iter().find(|p| p.owner == "red").unwrap();
        assert_eq!(red.starbase, 1);
        assert!(!red.has_ships());
    }

    #[test]
    fn apply_action_appends_history() {
        let mut s = BoardState::new("you");
        let copy = s.clone();
        s.apply_action(&Action::new(ActionKind::Explore)).unwrap();
        assert_eq!(s.history.len(), 1);
        assert!(copy.history.is_empty());
    }

    #[test]
    fn from_json_tolerates_missing_sections() {
        let s = BoardState::from_json(r#"{"active_player": "you"}"#).unwrap();
        assert_eq!(s.active_player(), Some("you"));
        assert!(s.players.is_empty());
        assert!(s.map.is_none());

        let nested = BoardState::from_json(
            r#"{"active_player": "you",
                "players": {"you": {"resources": {"materials": 25, "money": 10}}}}"#,
        )
        .unwrap();
        assert_eq!(nested.resource("you", Resource::Materials), Some(25));
        assert_eq!(nested.resource("you", Resource::Science), None);
        assert_eq!(nested.round_index(), None);
    }

    #[test]
    fn to_json_reloads_same_board() {
        let mut s = BoardState::new("you");
        s.round = Some(3);
        s.meta.insert("turn".into(), json!(7));
        s.set_player("you", PlayerState::with_resources(11, 2, 5));
        s.map_mut().add_ships("12", "red", "cruiser", 2);
        s.map_mut().add_starbase("12", "you");
        s.apply_action(&Action::research("Gauss Shield")).unwrap();

        let text = s.to_json().unwrap();
        assert_eq!(BoardState::from_json(&text).unwrap(), s);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(BoardState::from_json("not json").is_err());
    }
}
