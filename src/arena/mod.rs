//! The dispatch core.
//!
//! [`Arena`] owns every piece of mutable arena state and is driven by
//! exactly three kinds of input: player messages, timer expiries and the
//! results of account lookups. Handlers run to completion and never block;
//! whatever must happen outside the process is queued as an [`Effect`]
//! for the hosting shell to carry out.
//!
//! ## Timers
//!
//! Each session owns one [`PhaseTimer`](crate::session::PhaseTimer) slot.
//! Scheduling hands out a token; [`Arena::expire`] is a no-op unless the
//! token is still live and the session still exists, so late or duplicate
//! deliveries can never advance a session twice.
mod machine;
mod matchmaking;
mod termination;

#[cfg(test)]
mod harness;

use crate::gameplay::*;
use crate::ledger::*;
use crate::lobby::*;
use crate::protocol::*;
use crate::registry::*;
use crate::session::*;
use crate::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;

/// Work the hosting shell performs on the arena's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver a message to one connection.
    Send(Conn, ServerMessage),
    /// Call [`Arena::expire`] with `token` once `after` has elapsed.
    /// Replaces any timer previously scheduled for `game`.
    Schedule {
        game: ID<Game>,
        token: u64,
        after: Duration,
    },
    /// Drop whatever timer is scheduled for `game`.
    Cancel { game: ID<Game> },
    /// Persist entries through the ledger, fire-and-forget.
    Settle(Settlement),
    /// Look up an account and report back through [`Arena::authenticated`].
    Lookup {
        conn: Conn,
        user: UserId,
        device: String,
    },
}

/// Matchmaking, sessions and identities behind one dispatch point.
pub struct Arena<R = SmallRng> {
    registry: Registry,
    queue: Queue,
    rng: R,
    timers: TimerConfig,
    outbox: Vec<Effect>,
}

impl Arena<SmallRng> {
    pub fn new(timers: TimerConfig) -> Self {
        Self::with_rng(timers, SmallRng::from_os_rng())
    }
}

impl<R> Arena<R>
where
    R: Rng,
{
    /// Arena drawing session ids and BLOCK picks from `rng`.
    pub fn with_rng(timers: TimerConfig, rng: R) -> Self {
        Self {
            registry: Registry::default(),
            queue: Queue::default(),
            rng,
            timers,
            outbox: Vec::new(),
        }
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn queue(&self) -> &Queue {
        &self.queue
    }
    pub fn timers(&self) -> &TimerConfig {
        &self.timers
    }
    /// Takes every effect queued since the last drain, in emission order.
    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.outbox)
    }
}

/// Inputs.
impl<R> Arena<R>
where
    R: Rng,
{
    pub fn connect(&mut self, conn: Conn) {
        log::debug!("[arena] connection {} opened", conn);
        self.registry.attach(conn);
    }
    /// Decodes and dispatches one text frame.
    pub fn handle(&mut self, conn: Conn, text: &str) {
        match Protocol::decode(text) {
            Ok(msg) => self.receive(conn, msg),
            Err(e) => self.reject(conn, e),
        }
    }
    pub fn receive(&mut self, conn: Conn, msg: ClientMessage) {
        match msg {
            ClientMessage::Auth { user, device } => {
                self.outbox.push(Effect::Lookup { conn, user, device })
            }
            ClientMessage::Find { bet, target } => {
                if let Err(e) = self.request_match(conn, bet, target) {
                    self.reject(conn, e);
                }
            }
            ClientMessage::Cancel { game } => self.cancel(conn, game),
            ClientMessage::Ready { game } => self.ready(conn, game),
            ClientMessage::Move { game, played } => self.submit(conn, game, played),
            ClientMessage::Joker { game, joker } => self.joker(conn, game, joker),
            ClientMessage::Surrender { game } => self.surrender(conn, game),
        }
    }
    /// Completes an authentication started by [`Effect::Lookup`].
    pub fn authenticated(
        &mut self,
        conn: Conn,
        device: String,
        lookup: Result<Option<Account>, LedgerError>,
    ) {
        if !self.registry.is_attached(conn) {
            log::debug!("[arena] lookup for closed connection {}", conn);
            return;
        }
        match lookup {
            Ok(Some(account)) => {
                log::info!("[arena] user {} authenticated on {}", account.user, conn);
                let identity = Identity {
                    user: account.user,
                    league: account.league,
                    gold: account.gold,
                    device,
                };
                self.registry.authenticate(conn, identity);
                self.send(conn, ServerMessage::AuthSuccess);
            }
            Ok(None) => self.send(conn, ServerMessage::auth_failed("User not found")),
            Err(e) => {
                log::error!("[arena] account lookup failed: {}", e);
                self.send(conn, ServerMessage::auth_failed("Authentication error"));
            }
        }
    }
    /// Delivers a timer expiry.
    pub fn expire(&mut self, game: ID<Game>, token: u64) {
        let Some(session) = self.registry.game_mut(game) else {
            log::debug!("[arena] timer fired for closed game {}", game);
            return;
        };
        let wake = session.timer_mut().fire(token);
        match wake {
            Some(wake) => self.wake(game, wake),
            None => log::debug!("[arena] stale timer {} for game {}", token, game),
        }
    }
}

/// Outputs.
impl<R> Arena<R>
where
    R: Rng,
{
    fn send(&mut self, conn: Conn, msg: ServerMessage) {
        self.outbox.push(Effect::Send(conn, msg));
    }
    fn reject(&mut self, conn: Conn, error: ArenaError) {
        log::debug!("[arena] rejecting {}: {}", conn, error);
        self.send(conn, ServerMessage::error(&error));
    }
    /// Sends to the live connection of `user`, if there is one.
    fn unicast(&mut self, user: UserId, msg: ServerMessage) {
        match self.registry.connection(user) {
            Some(conn) => self.send(conn, msg),
            None => log::debug!("[arena] user {} unreachable", user),
        }
    }
    /// Sends to both players of a session.
    fn broadcast(&mut self, game: ID<Game>, msg: ServerMessage) {
        if let Some(users) = self.registry.game(game).map(Game::users) {
            users
                .into_iter()
                .for_each(|user| self.unicast(user, msg.clone()));
        }
    }
    fn settle(&mut self, settlement: Settlement) {
        self.outbox.push(Effect::Settle(settlement));
    }
    /// Arms the session timer, retiring whatever was live.
    fn schedule(&mut self, game: ID<Game>, wake: Wake) {
        let after = self.timers.delay(wake);
        let Some(session) = self.registry.game_mut(game) else {
            return;
        };
        let (token, retired) = session.timer_mut().arm(wake);
        if retired.is_some() {
            self.outbox.push(Effect::Cancel { game });
        }
        self.outbox.push(Effect::Schedule { game, token, after });
    }
    /// Empties the session timer ahead of an input-driven transition.
    fn disarm(&mut self, game: ID<Game>) {
        let retired = self
            .registry
            .game_mut(game)
            .and_then(|session| session.timer_mut().disarm());
        if retired.is_some() {
            self.outbox.push(Effect::Cancel { game });
        }
    }
    /// Destroys a session on its terminal transition.
    fn close(&mut self, game: ID<Game>) -> Option<Game> {
        let session = self.registry.close(game)?;
        self.outbox.push(Effect::Cancel { game });
        log::info!("[game {}] closed in {}", game, session.phase());
        Some(session)
    }
    /// The user and seat `conn` plays in `game`, if it does.
    fn participant(&self, conn: Conn, game: ID<Game>) -> Option<(UserId, Seat)> {
        let user = self.registry.identity(conn)?.user;
        let seat = self.registry.game(game)?.seat_of(user)?;
        Some((user, seat))
    }
}
