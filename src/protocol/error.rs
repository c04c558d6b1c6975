use crate::gameplay::Move;

/// Failures reported back to the player that caused them.
///
/// Actions aimed at an unknown session, a session the player is not
/// seated in, or the wrong phase are not errors; they are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    Unauthenticated,
    InsufficientGold,
    InvalidTarget,
    AlreadyPlaying,
    OpponentDisconnected,
    InvalidMove(String),
    BlockedMove(Move),
    Malformed(String),
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Not authenticated"),
            Self::InsufficientGold => write!(f, "Insufficient gold"),
            Self::InvalidTarget => write!(f, "Invalid target wins count"),
            Self::AlreadyPlaying => write!(f, "Already in a game"),
            Self::OpponentDisconnected => write!(f, "Opponent disconnected"),
            Self::InvalidMove(s) => write!(f, "Invalid move: {}", s),
            Self::BlockedMove(m) => write!(f, "Move {} is blocked this round", m),
            Self::Malformed(s) => write!(f, "Malformed message: {}", s),
        }
    }
}

impl std::error::Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn player_facing_messages() {
        assert_eq!(ArenaError::InsufficientGold.to_string(), "Insufficient gold");
        assert_eq!(ArenaError::OpponentDisconnected.to_string(), "Opponent disconnected");
        assert_eq!(
            ArenaError::BlockedMove(Move::Rock).to_string(),
            "Move rock is blocked this round"
        );
    }
}
