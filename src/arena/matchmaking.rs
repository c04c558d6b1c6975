use super::*;

impl<R> Arena<R>
where
    R: Rng,
{
    /// Validates a match request and pairs or enqueues it.
    pub(super) fn request_match(
        &mut self,
        conn: Conn,
        bet: Gold,
        target: i64,
    ) -> Result<(), ArenaError> {
        let identity = self
            .registry
            .identity(conn)
            .cloned()
            .ok_or(ArenaError::Unauthenticated)?;
        if !identity.can_afford(bet) {
            return Err(ArenaError::InsufficientGold);
        }
        let target = u8::try_from(target)
            .ok()
            .filter(|t| TARGETS.contains(t))
            .ok_or(ArenaError::InvalidTarget)?;
        if self.registry.is_playing(identity.user) {
            return Err(ArenaError::AlreadyPlaying);
        }
        self.queue.withdraw(conn);
        log::info!(
            "[queue] user {} looking for a match in {} (bet {}, target {})",
            identity.user,
            identity.league,
            bet,
            target
        );
        self.seek(Waiting::new(identity.user, conn, identity.league, bet, target));
        Ok(())
    }

    /// Sends a player whose session dissolved back to their league pool.
    pub(super) fn rematch(&mut self, user: UserId, bet: Gold, target: u8) {
        let Some(conn) = self.registry.connection(user) else {
            return;
        };
        let Some(identity) = self.registry.identity(conn).cloned() else {
            return;
        };
        self.send(
            conn,
            ServerMessage::Rematching {
                message: "Your opponent was not ready, searching for a new match".into(),
            },
        );
        self.seek(Waiting::new(user, conn, identity.league, bet, target));
    }

    /// First-fit pairing against the requester's league pool. Stale
    /// entries met on the way are dropped; the requester hears about them
    /// only if no live opponent turns up.
    fn seek(&mut self, request: Waiting) {
        let mut stale = 0;
        while let Some(found) = self.queue.pair(&request) {
            if self.resolvable(&found) {
                return self.open(found, request);
            }
            log::warn!("[queue] dropped stale entry of user {}", found.user);
            stale += 1;
        }
        if stale > 0 {
            self.reject(request.conn, ArenaError::OpponentDisconnected);
        }
        self.wait(request);
    }

    fn wait(&mut self, request: Waiting) {
        let conn = request.conn;
        self.queue.enqueue(request);
        self.send(conn, ServerMessage::Waiting);
    }

    /// A waiting entry still speaks for a connected, unseated player.
    fn resolvable(&self, waiting: &Waiting) -> bool {
        self.registry
            .identity(waiting.conn)
            .is_some_and(|i| i.user == waiting.user)
            && !self.registry.is_playing(waiting.user)
    }

    /// Creates the session. The player who waited takes green.
    fn open(&mut self, green: Waiting, red: Waiting) {
        let game = ID::random(&mut self.rng);
        let (bet, target) = (red.bet, red.target);
        self.registry
            .open(Game::new(game, green.user, red.user, bet, target));
        log::info!(
            "[game {}] matched user {} (green) with user {} (red)",
            game,
            green.user,
            red.user
        );
        self.settle(Settlement::new(game).with(Entry::Open {
            green: green.user,
            red: red.user,
            bet,
            target,
        }));
        for (waiting, opponent, is_green_team) in [(&green, red.user, true), (&red, green.user, false)] {
            self.send(
                waiting.conn,
                ServerMessage::Matched {
                    game_id: game,
                    opponent: Opponent { id: opponent },
                    bet_amount: bet,
                    target_wins: target,
                    player1_id: green.user,
                    player2_id: red.user,
                    is_green_team,
                },
            );
        }
        self.prepare(game);
    }
}
