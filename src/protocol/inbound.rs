use super::*;
use crate::gameplay::*;
use crate::session::Game;
use crate::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Actions a player sends to the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Auth { user: UserId, device: String },
    Find { bet: Gold, target: i64 },
    Cancel { game: Option<ID<Game>> },
    Ready { game: ID<Game> },
    Move { game: ID<Game>, played: Move },
    Joker { game: ID<Game>, joker: Joker },
    Surrender { game: ID<Game> },
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthData {
    user_id: UserId,
    #[serde(default)]
    device_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindData {
    bet_amount: Gold,
    target_wins: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CancelData {
    #[serde(default)]
    game_id: Option<ID<Game>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameData {
    game_id: ID<Game>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveData {
    game_id: ID<Game>,
    #[serde(rename = "move")]
    played: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JokerData {
    game_id: ID<Game>,
    joker_type: String,
}

/// Decodes inbound frames.
pub struct Protocol;

impl Protocol {
    /// Parses one text frame into a [`ClientMessage`].
    pub fn decode(s: &str) -> Result<ClientMessage, ArenaError> {
        let Envelope { event, data } =
            serde_json::from_str(s).map_err(|e| ArenaError::Malformed(e.to_string()))?;
        match event.as_str() {
            "auth" => Self::data::<AuthData>(data).map(|d| ClientMessage::Auth {
                user: d.user_id,
                device: d.device_id,
            }),
            "matchmaking:find" => Self::data::<FindData>(data).and_then(|d| {
                (d.bet_amount > 0)
                    .then_some(ClientMessage::Find {
                        bet: d.bet_amount,
                        target: d.target_wins,
                    })
                    .ok_or_else(|| ArenaError::Malformed("betAmount must be positive".into()))
            }),
            "matchmaking:cancel" => Self::data::<Option<CancelData>>(data).map(|d| {
                ClientMessage::Cancel {
                    game: d.and_then(|d| d.game_id),
                }
            }),
            "game:ready" => {
                Self::data::<GameData>(data).map(|d| ClientMessage::Ready { game: d.game_id })
            }
            "game:surrender" => {
                Self::data::<GameData>(data).map(|d| ClientMessage::Surrender { game: d.game_id })
            }
            "game:move" => Self::data::<MoveData>(data).and_then(|d| {
                Move::try_from(d.played.as_str())
                    .map(|played| ClientMessage::Move {
                        game: d.game_id,
                        played,
                    })
                    .map_err(ArenaError::InvalidMove)
            }),
            "game:joker" => Self::data::<JokerData>(data).and_then(|d| {
                Joker::try_from(d.joker_type.as_str())
                    .map(|joker| ClientMessage::Joker {
                        game: d.game_id,
                        joker,
                    })
                    .map_err(|s| ArenaError::Malformed(format!("unknown joker {}", s)))
            }),
            other => Err(ArenaError::Malformed(format!("unknown event {}", other))),
        }
    }
    fn data<T>(data: serde_json::Value) -> Result<T, ArenaError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(data).map_err(|e| ArenaError::Malformed(e.to_string()))
    }
}
