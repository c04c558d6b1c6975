use super::*;
use crate::session::Game;
use crate::*;
use const_format::concatcp;
use std::sync::Arc;
use tokio_postgres::Client;

/// Table of registered users and their gold.
#[rustfmt::skip]
pub const USERS:      &str = "users";
/// Table of games, one row per match.
#[rustfmt::skip]
pub const GAMES:      &str = "games";
/// Table of cumulative per-user round statistics.
#[rustfmt::skip]
pub const STATISTICS: &str = "statistics";
/// Table of penalty records.
#[rustfmt::skip]
pub const PENALTIES:  &str = "penalties";

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
pub async fn db(url: &str) -> Result<Arc<Client>, LedgerError> {
    log::info!("[ledger] connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        connection
            .await
            .inspect_err(|e| log::error!("[ledger] connection closed: {}", e))
            .ok();
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

#[rustfmt::skip]
#[async_trait::async_trait]
impl Ledger for Client {
    async fn account(&self, user: UserId) -> Result<Option<Account>, LedgerError> {
        const SQL: &str = concatcp!(
            "SELECT user_id, ",
                   "current_league, ",
                   "current_gold ",
            "FROM   ", USERS, " ",
            "WHERE  user_id = $1"
        );
        Ok(self
            .query_opt(SQL, &[&user])
            .await?
            .map(|row| Account {
                user: row.get::<_, i64>(0),
                league: row.get::<_, String>(1),
                gold: row.get::<_, i64>(2),
            }))
    }
    async fn record(&self, game: ID<Game>, entry: &Entry) -> Result<(), LedgerError> {
        let ref id = game.inner();
        match entry {
            Entry::Open { green, red, bet, target } => {
                const SQL: &str = concatcp!(
                    "INSERT INTO ", GAMES, " ",
                    "(game_id, player1_id, player2_id, bet_amount, status, started_at, rounds) ",
                    "VALUES ($1, $2, $3, $4, $5, NOW(), $6)"
                );
                let ref status = Status::Playing.as_str();
                let ref rounds = *target as i16;
                self.execute(SQL, &[id, green, red, bet, status, rounds]).await?;
            }
            Entry::Close { status, winner } => {
                const SQL: &str = concatcp!(
                    "UPDATE ", GAMES, " ",
                    "SET    status   = $1, ",
                           "winner   = $2, ",
                           "ended_at = NOW() ",
                    "WHERE  game_id  = $3"
                );
                let ref status = status.as_str();
                self.execute(SQL, &[status, winner, id]).await?;
            }
            Entry::Credit { user, amount } => {
                const SQL: &str = concatcp!(
                    "UPDATE ", USERS, " ",
                    "SET    current_gold = current_gold + $1 ",
                    "WHERE  user_id      = $2"
                );
                self.execute(SQL, &[amount, user]).await?;
            }
            Entry::Penalty { user, amount, reason } => {
                const SQL: &str = concatcp!(
                    "INSERT INTO ", PENALTIES, " ",
                    "(user_id, type, amount, reason, created_at) ",
                    "VALUES ($1, 'DISCONNECT', $2, $3, NOW())"
                );
                self.execute(SQL, &[user, amount, reason]).await?;
            }
            Entry::Tally { user, wins, losses } => {
                const SQL: &str = concatcp!(
                    "UPDATE ", STATISTICS, " ",
                    "SET    total_wins   = total_wins   + $1, ",
                           "total_losses = total_losses + $2, ",
                           "win_rate     = CASE WHEN total_wins + total_losses + $1 + $2 = 0 THEN 0 ",
                                          "ELSE (total_wins + $1) * 100.0 / (total_wins + total_losses + $1 + $2) END ",
                    "WHERE  user_id      = $3"
                );
                let ref wins = *wins as i32;
                let ref losses = *losses as i32;
                self.execute(SQL, &[wins, losses, user]).await?;
            }
        }
        log::debug!("[ledger] game {} recorded {:?}", game, entry);
        Ok(())
    }
}
