use super::*;

/// Phase transitions. Every step re-fetches its session and returns early
/// if it is gone, so each one is safe to reach after termination.
impl<R> Arena<R>
where
    R: Rng,
{
    pub(super) fn wake(&mut self, game: ID<Game>, wake: Wake) {
        log::debug!("[game {}] woke for {:?}", game, wake);
        match wake {
            Wake::PreparationTimeout => self.preparation_timeout(game),
            Wake::Commence => self.commence(game),
            Wake::CardSelectTimeout => self.card_select_timeout(game),
            Wake::RoundResult => self.round_result(game),
            Wake::JokerSelect => self.joker_select(game),
            Wake::JokerSelectTimeout => self.joker_reveal(game),
            Wake::Finalize | Wake::JokerRevealed => self.finalize(game),
            Wake::NextRound => self.start_round(game),
            Wake::GameEnd => self.end_game(game),
        }
    }

    pub(super) fn prepare(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        session.enter(Phase::Preparation);
        let time_limit = self.timers.preparation.as_secs();
        self.broadcast(
            game,
            ServerMessage::PreparationPhase {
                game_id: game,
                time_limit,
            },
        );
        self.schedule(game, Wake::PreparationTimeout);
    }

    pub(super) fn ready(&mut self, conn: Conn, game: ID<Game>) {
        let Some((user, seat)) = self.participant(conn, game) else {
            return;
        };
        let Some(session) = self
            .registry
            .game_mut(game)
            .filter(|s| s.phase() == Phase::Preparation)
            .filter(|s| !s.seat(seat).ready())
        else {
            return;
        };
        session.seat_mut(seat).mark_ready();
        let all = session.all_ready();
        self.broadcast(
            game,
            ServerMessage::PlayerReady {
                player_id: user,
                player: seat,
            },
        );
        if all {
            self.all_ready(game);
        }
    }

    fn all_ready(&mut self, game: ID<Game>) {
        log::info!("[game {}] both players ready", game);
        self.disarm(game);
        self.broadcast(game, ServerMessage::AllReady { game_id: game });
        self.schedule(game, Wake::Commence);
    }

    /// Readiness window closed. Both ready starts the game; otherwise the
    /// session dissolves and a lone ready player goes back to the pool.
    fn preparation_timeout(&mut self, game: ID<Game>) {
        let Some(ready) = self.registry.game(game).map(|s| s.pair(Contender::ready)) else {
            return;
        };
        if ready.player1 && ready.player2 {
            return self.all_ready(game);
        }
        let Some(session) = self.close(game) else {
            return;
        };
        log::info!("[game {}] preparation failed", game);
        let failed = ServerMessage::PreparationFailed {
            message: "Match cancelled because not every player was ready".into(),
        };
        for seat in Seat::BOTH {
            let contender = session.seat(seat);
            match contender.ready() {
                false => self.unicast(contender.user(), failed.clone()),
                true => self.rematch(contender.user(), session.bet(), session.target()),
            }
        }
    }

    fn commence(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game(game) else {
            return;
        };
        let [player1_id, player2_id] = session.users();
        let start = ServerMessage::Start {
            player1_id,
            player2_id,
            target_wins: session.target(),
            bet_amount: session.bet(),
        };
        log::info!("[game {}] started", game);
        self.broadcast(game, start);
        self.start_round(game);
    }

    fn start_round(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        session.begin_round();
        session.enter(Phase::CardSelect);
        let msg = ServerMessage::CardSelectPhase {
            round_number: session.round(),
            time_limit: self.timers.card_select.as_secs(),
            blocked_moves: session.pair(|c| c.blocked().clone()),
            bet_multiplier: session.multiplier(),
        };
        self.broadcast(game, msg);
        self.schedule(game, Wake::CardSelectTimeout);
    }

    pub(super) fn submit(&mut self, conn: Conn, game: ID<Game>, played: Move) {
        let Some((user, seat)) = self.participant(conn, game) else {
            return;
        };
        let Some(session) = self
            .registry
            .game_mut(game)
            .filter(|s| s.phase() == Phase::CardSelect)
            .filter(|s| s.seat(seat).choice().is_none())
        else {
            return;
        };
        let submitted = session.seat_mut(seat).submit(played);
        let all = session.all_chosen();
        match submitted {
            Err(blocked) => self.reject(conn, ArenaError::BlockedMove(blocked)),
            Ok(()) if all => {
                log::debug!("[game {}] user {} played last", game, user);
                self.disarm(game);
                self.reveal(game);
            }
            Ok(()) => log::debug!("[game {}] user {} played", game, user),
        }
    }

    fn card_select_timeout(&mut self, game: ID<Game>) {
        if let Some(session) = self.registry.game_mut(game) {
            session.time_out();
            self.reveal(game);
        }
    }

    fn reveal(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        session.enter(Phase::Revealing);
        let msg = ServerMessage::RevealingPhase {
            round_number: session.round(),
            moves: session.pair(|c| c.choice().unwrap_or(Move::Timeout)),
        };
        self.broadcast(game, msg);
        self.schedule(game, Wake::RoundResult);
    }

    /// Resolves the round tentatively, then branches to game end, the
    /// joker phase, or straight to round end when nobody holds a joker.
    fn round_result(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        session.enter(Phase::RoundResult);
        let round = session.round();
        let target = session.target();
        let tentative = session.resolve().clone();
        let decisive = tentative.decisive(target);
        if decisive.is_some() {
            session.commit_early();
        }
        let charges = session.any_charges();
        self.broadcast(
            game,
            ServerMessage::RoundResultPhase {
                round_number: round,
                moves: tentative.moves,
                result: Verdict {
                    winner: tentative.winner,
                },
                player1_wins: tentative.tally.player1,
                player2_wins: tentative.tally.player2,
            },
        );
        match (decisive, charges) {
            (Some(seat), _) => {
                log::info!("[game {}] {} reached {} wins", game, seat, target);
                self.schedule(game, Wake::GameEnd);
            }
            (None, false) => {
                self.broadcast(
                    game,
                    ServerMessage::JokerPhaseSkipped {
                        round_number: round,
                        message: "No jokers left, skipping joker phase".into(),
                    },
                );
                self.schedule(game, Wake::Finalize);
            }
            (None, true) => self.schedule(game, Wake::JokerSelect),
        }
    }

    fn joker_select(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        session.enter(Phase::JokerSelect);
        let msg = ServerMessage::JokerSelectPhase {
            round_number: session.round(),
            time_limit: self.timers.joker_select.as_secs(),
            available_jokers: session.pair(|c| *c.charges()),
            has_jokers: session.pair(|c| c.charges().any()),
            temp_result: session.tentative().cloned(),
        };
        self.broadcast(game, msg);
        self.schedule(game, Wake::JokerSelectTimeout);
    }

    pub(super) fn joker(&mut self, conn: Conn, game: ID<Game>, joker: Joker) {
        let Some((user, seat)) = self.participant(conn, game) else {
            return;
        };
        let Some(session) = self
            .registry
            .game_mut(game)
            .filter(|s| s.phase() == Phase::JokerSelect)
        else {
            return;
        };
        if !session.seat_mut(seat).select(joker) {
            log::debug!("[game {}] user {} cannot use {}", game, user, joker);
            return;
        }
        log::debug!("[game {}] user {} selected {}", game, user, joker);
        if session.all_settled() {
            self.disarm(game);
            self.joker_reveal(game);
        }
    }

    fn joker_reveal(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        session.enter(Phase::JokerReveal);
        let plays = [session.seat(Seat::Green).play(), session.seat(Seat::Red).play()];
        session.apply(resolve_jokers(plays, &mut self.rng));
        let msg = ServerMessage::JokerRevealPhase {
            round_number: session.round(),
            jokers: session.pair(Contender::joker),
            joker_usage_status: session.usage(),
            next_round_blocked_moves: session.pair(|c| c.pending().clone()),
            bet_multiplier: session.multiplier(),
        };
        self.broadcast(game, msg);
        self.schedule(game, Wake::JokerRevealed);
    }

    fn finalize(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        session.enter(Phase::RoundEnd);
        let Some(result) = session.commit().cloned() else {
            return;
        };
        let wins = session.wins();
        self.broadcast(
            game,
            ServerMessage::RoundEndPhase {
                round_number: result.round,
                winner: result.winner,
                player1_wins: wins.player1,
                player2_wins: wins.player2,
                bet_multiplier: result.bet_multiplier,
                jokers: result.jokers,
            },
        );
        self.schedule(game, Wake::NextRound);
    }

    /// Commits the deciding round, settles payouts and statistics,
    /// announces the result and destroys the session.
    fn end_game(&mut self, game: ID<Game>) {
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        session.commit();
        session.enter(Phase::GameEnd);
        let users = Pair::from(session.users());
        let wins = session.wins();
        let bet = session.bet();
        let winner = session.leader().map(|seat| *users.get(seat));
        let stats = Stats {
            player1_wins: wins.player1,
            player2_wins: wins.player2,
            draws: session.draws(),
        };
        let total_rounds = session.round();
        let payout = bet
            .saturating_mul(VICTORY_FACTOR)
            .saturating_mul(Gold::from(session.multiplier()));
        let settlement = Settlement::new(game)
            .with(Entry::Close {
                status: Status::Completed,
                winner,
            })
            .with(Entry::Tally {
                user: users.player1,
                wins: wins.player1.into(),
                losses: wins.player2.into(),
            })
            .with(Entry::Tally {
                user: users.player2,
                wins: wins.player2.into(),
                losses: wins.player1.into(),
            });
        let settlement = match winner {
            Some(user) => settlement.with(Entry::Credit {
                user,
                amount: payout,
            }),
            None => settlement
                .with(Entry::Credit {
                    user: users.player1,
                    amount: bet,
                })
                .with(Entry::Credit {
                    user: users.player2,
                    amount: bet,
                }),
        };
        log::info!(
            "[game {}] ended {}-{} after {} rounds",
            game,
            wins.player1,
            wins.player2,
            total_rounds
        );
        self.settle(settlement);
        self.broadcast(
            game,
            ServerMessage::End {
                winner: winner.map_or(Victor::Draw, Victor::Player),
                stats,
                total_rounds,
            },
        );
        self.close(game);
    }
}
