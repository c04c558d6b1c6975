use super::*;

pub fn arena() -> Arena<SmallRng> {
    Arena::with_rng(TimerConfig::default(), SmallRng::seed_from_u64(7))
}

pub fn account(user: UserId, gold: Gold) -> Account {
    Account {
        user,
        league: "gold".into(),
        gold,
    }
}

/// Opens and authenticates a connection for `user`.
pub fn login<R: Rng>(arena: &mut Arena<R>, user: UserId, gold: Gold) -> Conn {
    let conn = Conn::default();
    arena.connect(conn);
    arena.authenticated(conn, "test".into(), Ok(Some(account(user, gold))));
    arena.drain();
    conn
}

/// Messages addressed to `conn`, in order.
pub fn sent(effects: &[Effect], conn: Conn) -> Vec<ServerMessage> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Send(c, msg) if *c == conn => Some(msg.clone()),
            _ => None,
        })
        .collect()
}

pub fn settlements(effects: &[Effect]) -> Vec<Settlement> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Settle(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

/// The last timer scheduled among `effects`.
pub fn scheduled(effects: &[Effect]) -> Option<(ID<Game>, u64, Duration)> {
    effects.iter().rev().find_map(|e| match e {
        Effect::Schedule { game, token, after } => Some((*game, *token, *after)),
        _ => None,
    })
}

/// Two authenticated players, users 1 (green) and 2 (red), matched in one session.
pub struct Table {
    pub arena: Arena<SmallRng>,
    pub green: Conn,
    pub red: Conn,
    pub game: ID<Game>,
}

impl Table {
    pub fn matched(bet: Gold, target: i64) -> Self {
        let mut arena = arena();
        let green = login(&mut arena, 1, 1000);
        let red = login(&mut arena, 2, 1000);
        arena.receive(green, ClientMessage::Find { bet, target });
        arena.receive(red, ClientMessage::Find { bet, target });
        let game = arena.registry().games_of(1)[0];
        arena.drain();
        Self {
            arena,
            green,
            red,
            game,
        }
    }
    /// Matched, both ready, grace elapsed: round one awaits moves.
    pub fn started(bet: Gold, target: i64) -> Self {
        let mut table = Self::matched(bet, target);
        table.ready(table.green);
        table.ready(table.red);
        table.fire();
        table.arena.drain();
        table
    }
    pub fn session(&self) -> &Game {
        self.arena.registry().game(self.game).expect("session is live")
    }
    pub fn phase(&self) -> Phase {
        self.session().phase()
    }
    /// Fires the live timer and returns what it produced.
    pub fn fire(&mut self) -> Vec<Effect> {
        let token = self.session().timer().token().expect("timer is armed");
        self.arena.expire(self.game, token);
        self.arena.drain()
    }
    pub fn ready(&mut self, conn: Conn) -> Vec<Effect> {
        self.arena.receive(conn, ClientMessage::Ready { game: self.game });
        self.arena.drain()
    }
    pub fn play(&mut self, conn: Conn, played: Move) -> Vec<Effect> {
        let game = self.game;
        self.arena.receive(conn, ClientMessage::Move { game, played });
        self.arena.drain()
    }
    pub fn joker(&mut self, conn: Conn, joker: Joker) -> Vec<Effect> {
        let game = self.game;
        self.arena.receive(conn, ClientMessage::Joker { game, joker });
        self.arena.drain()
    }
    /// Plays both moves and runs the round to its result phase.
    pub fn round(&mut self, green: Move, red: Move) -> Vec<Effect> {
        self.play(self.green, green);
        self.play(self.red, red);
        assert_eq!(self.phase(), Phase::Revealing);
        self.fire()
    }
    /// From the result phase, lets every remaining step time out until
    /// the next round begins.
    pub fn close_round(&mut self) {
        while self.phase() != Phase::CardSelect {
            self.fire();
        }
    }
}
