use crate::gameplay::*;
use crate::session::*;
use crate::*;
use serde::Serialize;

/// Messages sent from the arena to players.
/// Session events carry the round number so clients can discard stale frames.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    #[serde(rename = "auth:success")]
    AuthSuccess,
    #[serde(rename = "auth:failed")]
    AuthFailed { message: String },
    #[serde(rename = "matchmaking:waiting")]
    Waiting,
    #[serde(rename = "game:matched")]
    Matched {
        game_id: ID<Game>,
        opponent: Opponent,
        bet_amount: Gold,
        target_wins: u8,
        player1_id: UserId,
        player2_id: UserId,
        is_green_team: bool,
    },
    #[serde(rename = "game:preparationPhase")]
    PreparationPhase { game_id: ID<Game>, time_limit: u64 },
    #[serde(rename = "game:playerReady")]
    PlayerReady { player_id: UserId, player: Seat },
    #[serde(rename = "game:allReady")]
    AllReady { game_id: ID<Game> },
    #[serde(rename = "game:preparationFailed")]
    PreparationFailed { message: String },
    #[serde(rename = "game:rematching")]
    Rematching { message: String },
    #[serde(rename = "game:start")]
    Start {
        player1_id: UserId,
        player2_id: UserId,
        target_wins: u8,
        bet_amount: Gold,
    },
    #[serde(rename = "game:cardSelectPhase")]
    CardSelectPhase {
        round_number: u32,
        time_limit: u64,
        blocked_moves: Pair<Blocked>,
        bet_multiplier: u32,
    },
    #[serde(rename = "game:revealingPhase")]
    RevealingPhase { round_number: u32, moves: Pair<Move> },
    #[serde(rename = "game:roundResultPhase")]
    RoundResultPhase {
        round_number: u32,
        moves: Pair<Move>,
        result: Verdict,
        player1_wins: u8,
        player2_wins: u8,
    },
    #[serde(rename = "game:jokerPhaseSkipped")]
    JokerPhaseSkipped { round_number: u32, message: String },
    #[serde(rename = "game:jokerSelectPhase")]
    JokerSelectPhase {
        round_number: u32,
        time_limit: u64,
        available_jokers: Pair<Charges>,
        has_jokers: Pair<bool>,
        temp_result: Option<Tentative>,
    },
    #[serde(rename = "game:jokerRevealPhase")]
    JokerRevealPhase {
        round_number: u32,
        jokers: Pair<Option<Joker>>,
        joker_usage_status: Usage,
        next_round_blocked_moves: Pair<Blocked>,
        bet_multiplier: u32,
    },
    #[serde(rename = "game:roundEndPhase")]
    RoundEndPhase {
        round_number: u32,
        winner: Outcome,
        player1_wins: u8,
        player2_wins: u8,
        bet_multiplier: u32,
        jokers: Pair<Option<Joker>>,
    },
    #[serde(rename = "game:end")]
    End {
        winner: Victor,
        stats: Stats,
        total_rounds: u32,
    },
    #[serde(rename = "game:cancelled")]
    Cancelled { message: String },
    #[serde(rename = "game:surrendered")]
    Surrendered {
        surrendered_player: UserId,
        winner: UserId,
    },
    #[serde(rename = "game:disconnected")]
    Disconnected {
        disconnected_player: UserId,
        winner: UserId,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Opponent {
    pub id: UserId,
}

/// Round outcome as reported in the result phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub winner: Outcome,
}

/// Final committed tallies of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub player1_wins: u8,
    pub player2_wins: u8,
    pub draws: usize,
}

/// Game winner: the user id of the winner, or `"draw"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Victor {
    Player(UserId),
    Draw,
}

impl Serialize for Victor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Player(user) => serializer.serialize_i64(*user),
            Self::Draw => serializer.serialize_str("draw"),
        }
    }
}

impl ServerMessage {
    pub fn auth_failed(message: &str) -> Self {
        Self::AuthFailed {
            message: message.to_string(),
        }
    }
    pub fn error(error: &impl std::fmt::Display) -> Self {
        Self::Error {
            message: error.to_string(),
        }
    }
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ArenaError;
    use serde_json::json;
    #[test]
    fn unit_events_have_no_data() {
        let json = serde_json::to_value(ServerMessage::Waiting).unwrap();
        assert_eq!(json, json!({ "event": "matchmaking:waiting" }));
    }
    #[test]
    fn fields_are_camel_case() {
        let msg = ServerMessage::Surrendered {
            surrendered_player: 1,
            winner: 2,
        };
        assert_eq!(
            serde_json::to_value(msg).unwrap(),
            json!({ "event": "game:surrendered", "data": { "surrenderedPlayer": 1, "winner": 2 } })
        );
    }
    #[test]
    fn reveal_phase_shape() {
        let msg = ServerMessage::JokerRevealPhase {
            round_number: 2,
            jokers: Pair::new(Some(Joker::Block), None),
            joker_usage_status: Usage::Green,
            next_round_blocked_moves: Pair::new(Blocked::default(), Blocked::default()),
            bet_multiplier: 1,
        };
        assert_eq!(
            serde_json::to_value(msg).unwrap(),
            json!({
                "event": "game:jokerRevealPhase",
                "data": {
                    "roundNumber": 2,
                    "jokers": { "player1": "block", "player2": null },
                    "jokerUsageStatus": "green",
                    "nextRoundBlockedMoves": { "player1": [], "player2": [] },
                    "betMultiplier": 1
                }
            })
        );
    }
    #[test]
    fn victor_is_id_or_draw() {
        assert_eq!(serde_json::to_value(Victor::Player(9)).unwrap(), json!(9));
        assert_eq!(serde_json::to_value(Victor::Draw).unwrap(), json!("draw"));
    }
    #[test]
    fn error_carries_display_text() {
        let msg = ServerMessage::error(&ArenaError::InvalidTarget);
        assert_eq!(
            msg.to_json().unwrap(),
            r#"{"event":"error","data":{"message":"Invalid target wins count"}}"#
        );
    }
}
