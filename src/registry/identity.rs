use crate::*;

/// Marker for connection identifiers.
#[derive(Debug)]
pub struct Connection;

/// Identifier of one live socket.
pub type Conn = ID<Connection>;

/// An authenticated connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: UserId,
    pub league: League,
    pub gold: Gold,
    pub device: String,
}

impl Identity {
    pub fn can_afford(&self, bet: Gold) -> bool {
        bet <= self.gold
    }
}
