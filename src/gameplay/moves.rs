use serde::Deserialize;
use serde::Serialize;

/// A round submission. `Timeout` is assigned by the server to a player
/// who submitted nothing before card selection closed; clients can never
/// submit it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Timeout,
}

impl Move {
    /// The three playable symbols, in wire order.
    pub const CANONICAL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The symbol this move defeats. Timeout defeats nothing.
    pub fn beats(self) -> Option<Move> {
        match self {
            Move::Rock => Some(Move::Scissors),
            Move::Scissors => Some(Move::Paper),
            Move::Paper => Some(Move::Rock),
            Move::Timeout => None,
        }
    }
    pub fn is_timeout(self) -> bool {
        self == Move::Timeout
    }
}

impl TryFrom<&str> for Move {
    type Error = String;
    /// Parses a client submission. Only canonical symbols are accepted.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(s.to_string()),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Move::Rock => write!(f, "rock"),
            Move::Paper => write!(f, "paper"),
            Move::Scissors => write!(f, "scissors"),
            Move::Timeout => write!(f, "timeout"),
        }
    }
}
