//! Wire format between players and the arena.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.
//! Inbound frames decode into [`ClientMessage`]; the arena answers with
//! [`ServerMessage`]s. Failures a player should hear about are
//! [`ArenaError`]s, delivered as `error{message}`.
mod error;
mod inbound;
mod outbound;

pub use error::*;
pub use inbound::*;
pub use outbound::*;
