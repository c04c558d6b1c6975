use crate::session::Game;
use crate::*;

/// Persisted game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Playing,
    Completed,
    Surrendered,
    Disconnected,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "PLAYING",
            Self::Completed => "COMPLETED",
            Self::Surrendered => "SURRENDERED",
            Self::Disconnected => "DISCONNECTED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One write against the account store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Game row created in `PLAYING` status.
    Open {
        green: UserId,
        red: UserId,
        bet: Gold,
        target: u8,
    },
    /// Game row moved to a terminal status.
    Close {
        status: Status,
        winner: Option<UserId>,
    },
    /// Gold added to a balance.
    Credit { user: UserId, amount: Gold },
    /// Disconnection penalty record.
    Penalty {
        user: UserId,
        amount: Gold,
        reason: String,
    },
    /// Round wins and losses added to cumulative statistics.
    Tally { user: UserId, wins: u32, losses: u32 },
}

/// Ordered entries produced by one session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub game: ID<Game>,
    pub entries: Vec<Entry>,
}

impl Settlement {
    pub fn new(game: ID<Game>) -> Self {
        Self {
            game,
            entries: Vec::new(),
        }
    }
    pub fn with(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }
    /// Total gold credited to `user` by this settlement.
    pub fn credited(&self, user: UserId) -> Gold {
        self.entries
            .iter()
            .filter_map(|e| match e {
                Entry::Credit { user: u, amount } if *u == user => Some(*amount),
                _ => None,
            })
            .sum()
    }
    pub fn status(&self) -> Option<Status> {
        self.entries.iter().find_map(|e| match e {
            Entry::Close { status, .. } => Some(*status),
            Entry::Open { .. } => Some(Status::Playing),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn credited_sums_per_user() {
        let s = Settlement::new(ID::default())
            .with(Entry::Credit { user: 1, amount: 100 })
            .with(Entry::Credit { user: 2, amount: 50 })
            .with(Entry::Credit { user: 1, amount: 25 });
        assert_eq!(s.credited(1), 125);
        assert_eq!(s.credited(2), 50);
        assert_eq!(s.credited(3), 0);
    }
    #[test]
    fn status_names() {
        assert_eq!(Status::Disconnected.to_string(), "DISCONNECTED");
        let s = Settlement::new(ID::default()).with(Entry::Close {
            status: Status::Surrendered,
            winner: Some(4),
        });
        assert_eq!(s.status(), Some(Status::Surrendered));
    }
}
