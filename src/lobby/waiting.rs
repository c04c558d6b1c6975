use crate::registry::Conn;
use crate::*;

/// A player waiting to be paired.
#[derive(Debug, Clone)]
pub struct Waiting {
    pub user: UserId,
    pub conn: Conn,
    pub league: League,
    pub bet: Gold,
    pub target: u8,
    pub since: std::time::SystemTime,
}

impl Waiting {
    pub fn new(user: UserId, conn: Conn, league: League, bet: Gold, target: u8) -> Self {
        Self {
            user,
            conn,
            league,
            bet,
            target,
            since: std::time::SystemTime::now(),
        }
    }
    /// Same stakes, same target, different player on a different socket.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.bet == other.bet
            && self.target == other.target
            && self.user != other.user
            && self.conn != other.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn waiting(user: UserId, bet: Gold, target: u8) -> Waiting {
        Waiting::new(user, Conn::default(), "gold".into(), bet, target)
    }
    #[test]
    fn compatibility() {
        let a = waiting(1, 100, 3);
        assert!(a.is_compatible_with(&waiting(2, 100, 3)));
        assert!(!a.is_compatible_with(&waiting(2, 50, 3)));
        assert!(!a.is_compatible_with(&waiting(2, 100, 5)));
        assert!(!a.is_compatible_with(&waiting(1, 100, 3)));
    }
}
