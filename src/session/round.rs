use crate::gameplay::*;
use serde::Serialize;

/// A completed round, appended once to the session log and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round: u32,
    pub moves: Pair<Move>,
    pub winner: Outcome,
    pub bet_multiplier: u32,
    pub jokers: Pair<Option<Joker>>,
}

/// A resolved round awaiting commit.
///
/// `tally` is the win count each side would have if the round were
/// committed now; draws leave it equal to the committed wins.
/// `committed` is set when the deciding round credits its winner early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tentative {
    pub moves: Pair<Move>,
    pub winner: Outcome,
    #[serde(skip)]
    pub tally: Pair<u8>,
    #[serde(skip)]
    pub committed: bool,
}

impl Tentative {
    pub fn new(moves: Pair<Move>, winner: Outcome, wins: Pair<u8>) -> Self {
        let tally = match winner.winner() {
            Some(Seat::Green) => Pair::new(wins.player1 + 1, wins.player2),
            Some(Seat::Red) => Pair::new(wins.player1, wins.player2 + 1),
            None => wins,
        };
        Self {
            moves,
            winner,
            tally,
            committed: false,
        }
    }
    /// The side whose tentative tally reached `target`, if any.
    pub fn decisive(&self, target: u8) -> Option<Seat> {
        Seat::BOTH
            .into_iter()
            .find(|s| *self.tally.get(*s) >= target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn draw_leaves_tally_unchanged() {
        let t = Tentative::new(Pair::new(Move::Rock, Move::Rock), Outcome::Draw, Pair::new(2, 1));
        assert_eq!(t.tally, Pair::new(2, 1));
        assert_eq!(t.decisive(3), None);
    }
    #[test]
    fn win_bumps_one_side() {
        let t = Tentative::new(
            Pair::new(Move::Rock, Move::Scissors),
            Outcome::Green,
            Pair::new(2, 1),
        );
        assert_eq!(t.tally, Pair::new(3, 1));
        assert_eq!(t.decisive(3), Some(Seat::Green));
        assert_eq!(t.decisive(5), None);
    }
}
