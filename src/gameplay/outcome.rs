use super::*;
use serde::Serialize;

/// Winner designation of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    #[serde(rename = "player1")]
    Green,
    #[serde(rename = "player2")]
    Red,
    #[serde(rename = "draw")]
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Seat> {
        match self {
            Outcome::Green => Some(Seat::Green),
            Outcome::Red => Some(Seat::Red),
            Outcome::Draw => None,
        }
    }
    pub fn is_draw(self) -> bool {
        self == Outcome::Draw
    }
}

impl From<Seat> for Outcome {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::Green => Outcome::Green,
            Seat::Red => Outcome::Red,
        }
    }
}

/// Resolves a round from the green move and the red move.
///
/// A timeout loses to any real move and draws against another timeout;
/// real moves follow rock > scissors > paper > rock.
pub fn resolve(green: Move, red: Move) -> Outcome {
    match (green.is_timeout(), red.is_timeout()) {
        (true, true) => Outcome::Draw,
        (true, false) => Outcome::Red,
        (false, true) => Outcome::Green,
        (false, false) if green == red => Outcome::Draw,
        (false, false) if green.beats() == Some(red) => Outcome::Green,
        (false, false) => Outcome::Red,
    }
}
