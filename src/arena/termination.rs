use super::*;

/// Unilateral exits. Each one settles through the ledger, tells whoever
/// is still listening, and destroys the session immediately.
impl<R> Arena<R>
where
    R: Rng,
{
    /// Opponent is credited 1.5× the bet.
    pub(super) fn surrender(&mut self, conn: Conn, game: ID<Game>) {
        let Some((user, seat)) = self.participant(conn, game) else {
            return;
        };
        let Some(session) = self.registry.game(game) else {
            return;
        };
        let winner = session.seat(seat.other()).user();
        let (numerator, denominator) = SURRENDER_RATIO;
        let credit = session.bet().saturating_mul(numerator) / denominator;
        log::info!("[game {}] user {} surrendered", game, user);
        self.settle(
            Settlement::new(game)
                .with(Entry::Close {
                    status: Status::Surrendered,
                    winner: Some(winner),
                })
                .with(Entry::Credit {
                    user: winner,
                    amount: credit,
                }),
        );
        self.broadcast(
            game,
            ServerMessage::Surrendered {
                surrendered_player: user,
                winner,
            },
        );
        self.close(game);
    }

    /// Socket closed. Leaves every pool, and forfeits every session the
    /// user sits in unless another live socket still speaks for them.
    pub fn disconnect(&mut self, conn: Conn) {
        self.queue.withdraw(conn);
        let Some(identity) = self.registry.detach(conn) else {
            log::debug!("[arena] anonymous connection {} closed", conn);
            return;
        };
        if self.registry.connection(identity.user).is_some() {
            log::info!("[arena] user {} left a stale socket", identity.user);
            return;
        }
        log::info!("[arena] user {} disconnected", identity.user);
        for game in self.registry.games_of(identity.user) {
            self.forfeit(game, identity.user);
        }
    }

    /// Opponent is credited 2× the bet; the leaver is penalised the bet.
    fn forfeit(&mut self, game: ID<Game>, user: UserId) {
        let Some(session) = self.registry.game(game) else {
            return;
        };
        let Some(seat) = session.seat_of(user) else {
            return;
        };
        let winner = session.seat(seat.other()).user();
        let bet = session.bet();
        log::info!("[game {}] forfeited by user {} in {}", game, user, session.phase());
        self.settle(
            Settlement::new(game)
                .with(Entry::Close {
                    status: Status::Disconnected,
                    winner: Some(winner),
                })
                .with(Entry::Penalty {
                    user,
                    amount: bet,
                    reason: "Game disconnection penalty".into(),
                })
                .with(Entry::Credit {
                    user: winner,
                    amount: bet.saturating_mul(DISCONNECT_FACTOR),
                }),
        );
        self.broadcast(
            game,
            ServerMessage::Disconnected {
                disconnected_player: user,
                winner,
            },
        );
        self.close(game);
    }

    /// Leaves every pool. Naming a live session dissolves it as well:
    /// the canceller is refunded and the opponent only notified.
    pub(super) fn cancel(&mut self, conn: Conn, game: Option<ID<Game>>) {
        let Some(user) = self.registry.identity(conn).map(|i| i.user) else {
            return;
        };
        let removed = self.queue.withdraw(conn);
        log::info!("[queue] user {} cancelled matchmaking ({} entries)", user, removed);
        let Some((game, seat)) = game.and_then(|g| self.participant(conn, g).map(|(_, s)| (g, s)))
        else {
            return;
        };
        let Some(session) = self.registry.game(game) else {
            return;
        };
        let opponent = session.seat(seat.other()).user();
        let bet = session.bet();
        self.settle(Settlement::new(game).with(Entry::Credit { user, amount: bet }));
        self.unicast(
            opponent,
            ServerMessage::Cancelled {
                message: "Your opponent cancelled the match".into(),
            },
        );
        self.close(game);
    }
}
