//! Opponent pressure proxy.
//!
//! Fraction of the active player's occupied cells that are contested by an
//! opposing ship or starbase, mapped onto [0.2, 0.8]. Zero presence, a
//! missing map, or an unknown active player all read as no pressure.

use crate::board::{Action, BoardQuery};

const PRESENCE_FLOOR: f64 = 0.2;
const CONTEST_SLOPE: f64 = 0.6;

/// Occupied and contested cell counts for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exposure {
    pub occupied: u32,
    pub contested: u32,
}

/// Counts the cells `player` occupies with ships and how many of those hold
/// hostile ships or starbases.
pub fn exposure<S: BoardQuery + ?Sized>(state: &S, player: &str) -> Option<Exposure> {
    let cells = state.cells()?;
    let mut exp = Exposure::default();
    for cell in &cells {
        let mine = cell.iter().any(|p| p.owner == player && p.has_ships());
        if !mine {
            continue;
        }
        exp.occupied += 1;
        let hostile = cell
            .iter()
            .filter(|p| p.owner != player)
            .any(|p| p.has_ships() || p.starbase > 0);
        if hostile {
            exp.contested += 1;
        }
    }
    Some(exp)
}

/// Pressure in [0, 1] on the active player.
pub fn pressure<S: BoardQuery + ?Sized>(state: &S, _action: &Action) -> f64 {
    let Some(player) = state.active_player() else {
        return 0.0;
    };
    let Some(exp) = exposure(state, player) else {
        return 0.0;
    };
    if exp.occupied == 0 {
        return 0.0;
    }
    let frac = exp.contested as f64 / exp.occupied as f64;
    (PRESENCE_FLOOR + CONTEST_SLOPE * frac).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ActionKind, BoardState};

    fn mv() -> Action {
        Action::new(ActionKind::Move)
    }

    #[test]
    fn no_map_or_player_is_zero() {
        assert_eq!(pressure(&BoardState::new("you"), &mv()), 0.0);
        let mut s = BoardState::default();
        s.map_mut().add_ships("1", "you", "cruiser", 1);
        assert_eq!(pressure(&s, &mv()), 0.0);
    }

    #[test]
    fn uncontested_presence_has_floor() {
        let mut s = BoardState::new("you");
        s.map_mut().add_ships("1", "you", "cruiser", 1);
        s.map_mut().add_ships("2", "red", "cruiser", 3);
        assert!((pressure(&s, &mv()) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn contested_fraction() {
        let mut s = BoardState::new("you");
        let m = s.map_mut();
        m.add_ships("1", "you", "cruiser", 1);
        m.add_ships("1", "red", "interceptor", 1);
        m.add_ships("2", "you", "interceptor", 2);
        m.add_starbase("2", "blue");
        m.add_ships("3", "you", "dreadnought", 1);
        m.add_ships("4", "you", "interceptor", 1);
        let exp = exposure(&s, "you").unwrap();
        assert_eq!(exp, Exposure { occupied: 4, contested: 2 });
        assert!((pressure(&s, &mv()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn own_starbase_is_not_hostile_and_not_presence() {
        let mut s = BoardState::new("you");
        s.map_mut().add_starbase("1", "you");
        assert_eq!(pressure(&s, &mv()), 0.0);

        s.map_mut().add_ships("1", "you", "cruiser", 1);
        assert!((pressure(&s, &mv()) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn fully_contested_caps_at_point_eight() {
        let mut s = BoardState::new("you");
        s.map_mut().add_ships("1", "you", "cruiser", 1);
        s.map_mut().add_ships("1", "red", "cruiser", 1);
        assert!((pressure(&s, &mv()) - 0.8).abs() < 1e-12);
    }
}
