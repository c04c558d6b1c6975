use super::*;
use crate::session::Game;
use crate::*;
use std::collections::HashMap;
use std::sync::Mutex;

/// Persisted view of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub green: UserId,
    pub red: UserId,
    pub bet: Gold,
    pub target: u8,
    pub status: Status,
    pub winner: Option<UserId>,
}

/// Cumulative round statistics of one user.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    pub wins: u32,
    pub losses: u32,
}

impl Statistics {
    /// Percentage of rounds won, zero before any round was played.
    pub fn win_rate(&self) -> f64 {
        match self.wins + self.losses {
            0 => 0.0,
            n => self.wins as f64 * 100.0 / n as f64,
        }
    }
}

#[derive(Debug, Default)]
struct Book {
    accounts: HashMap<UserId, Account>,
    games: HashMap<ID<Game>, Record>,
    statistics: HashMap<UserId, Statistics>,
    penalties: Vec<(UserId, Gold, String)>,
    journal: Vec<(ID<Game>, Entry)>,
}

/// In-process ledger.
#[derive(Debug, Default)]
pub struct Memory(Mutex<Book>);

impl Memory {
    pub fn with_accounts<I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = Account>,
    {
        let accounts = accounts.into_iter().map(|a| (a.user, a)).collect();
        Self(Mutex::new(Book {
            accounts,
            ..Book::default()
        }))
    }
    pub fn gold(&self, user: UserId) -> Option<Gold> {
        self.read(|b| b.accounts.get(&user).map(|a| a.gold))
    }
    pub fn game(&self, game: ID<Game>) -> Option<Record> {
        self.read(|b| b.games.get(&game).cloned())
    }
    pub fn statistics(&self, user: UserId) -> Statistics {
        self.read(|b| b.statistics.get(&user).copied())
            .unwrap_or_default()
    }
    pub fn penalties(&self) -> Vec<(UserId, Gold, String)> {
        self.read(|b| Some(b.penalties.clone())).unwrap_or_default()
    }
    /// Every entry recorded so far, in arrival order.
    pub fn journal(&self) -> Vec<(ID<Game>, Entry)> {
        self.read(|b| Some(b.journal.clone())).unwrap_or_default()
    }
    fn read<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&Book) -> Option<T>,
    {
        self.0.lock().ok().and_then(|book| f(&book))
    }
}

#[async_trait::async_trait]
impl Ledger for Memory {
    async fn account(&self, user: UserId) -> Result<Option<Account>, LedgerError> {
        let book = self.0.lock().map_err(|_| LedgerError::Poisoned)?;
        Ok(book.accounts.get(&user).cloned())
    }
    async fn record(&self, game: ID<Game>, entry: &Entry) -> Result<(), LedgerError> {
        let mut book = self.0.lock().map_err(|_| LedgerError::Poisoned)?;
        match entry {
            Entry::Open {
                green,
                red,
                bet,
                target,
            } => {
                book.games.insert(
                    game,
                    Record {
                        green: *green,
                        red: *red,
                        bet: *bet,
                        target: *target,
                        status: Status::Playing,
                        winner: None,
                    },
                );
            }
            Entry::Close { status, winner } => {
                let record = book
                    .games
                    .get_mut(&game)
                    .ok_or_else(|| LedgerError::Storage(format!("no game {}", game)))?;
                record.status = *status;
                record.winner = *winner;
            }
            Entry::Credit { user, amount } => {
                let account = book
                    .accounts
                    .get_mut(user)
                    .ok_or_else(|| LedgerError::Storage(format!("no user {}", user)))?;
                account.gold += amount;
            }
            Entry::Penalty {
                user,
                amount,
                reason,
            } => book.penalties.push((*user, *amount, reason.clone())),
            Entry::Tally { user, wins, losses } => {
                let stats = book.statistics.entry(*user).or_default();
                stats.wins += wins;
                stats.losses += losses;
            }
        }
        book.journal.push((game, entry.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn ledger() -> Memory {
        Memory::with_accounts([
            Account {
                user: 1,
                league: "gold".into(),
                gold: 1000,
            },
            Account {
                user: 2,
                league: "gold".into(),
                gold: 500,
            },
        ])
    }
    #[tokio::test]
    async fn account_lookup() {
        let ledger = ledger();
        assert_eq!(ledger.account(1).await.unwrap().map(|a| a.gold), Some(1000));
        assert_eq!(ledger.account(3).await.unwrap(), None);
    }
    #[tokio::test]
    async fn settle_in_order() {
        let ledger = ledger();
        let game = ID::default();
        let settlement = Settlement::new(game)
            .with(Entry::Open {
                green: 1,
                red: 2,
                bet: 100,
                target: 3,
            })
            .with(Entry::Close {
                status: Status::Completed,
                winner: Some(1),
            })
            .with(Entry::Credit { user: 1, amount: 200 })
            .with(Entry::Tally {
                user: 1,
                wins: 3,
                losses: 1,
            });
        ledger.settle(&settlement).await.unwrap();
        assert_eq!(ledger.gold(1), Some(1200));
        assert_eq!(ledger.game(game).map(|r| r.status), Some(Status::Completed));
        assert_eq!(ledger.statistics(1).win_rate(), 75.0);
        assert_eq!(ledger.journal().len(), 4);
    }
    #[tokio::test]
    async fn settle_stops_at_first_failure() {
        let ledger = ledger();
        let settlement = Settlement::new(ID::default())
            .with(Entry::Credit { user: 9, amount: 10 })
            .with(Entry::Credit { user: 1, amount: 10 });
        assert!(ledger.settle(&settlement).await.is_err());
        assert_eq!(ledger.gold(1), Some(1000));
        assert!(ledger.journal().is_empty());
    }
    #[tokio::test]
    async fn penalties_are_recorded() {
        let ledger = ledger();
        let entry = Entry::Penalty {
            user: 2,
            amount: 100,
            reason: "Game disconnection penalty".into(),
        };
        ledger.record(ID::default(), &entry).await.unwrap();
        assert_eq!(
            ledger.penalties(),
            vec![(2, 100, "Game disconnection penalty".to_string())]
        );
    }
}
