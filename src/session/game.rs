use super::*;
use crate::gameplay::*;
use crate::*;

/// One two-player match from pairing to a terminal outcome.
#[derive(Debug)]
pub struct Game {
    id: ID<Self>,
    phase: Phase,
    round: u32,
    bet: Gold,
    target: u8,
    multiplier: u32,
    seats: [Contender; 2],
    history: Vec<RoundResult>,
    tentative: Option<Tentative>,
    timer: PhaseTimer,
}

impl Game {
    /// Fresh session in the preparation phase. `green` was waiting,
    /// `red` completed the match.
    pub fn new(id: ID<Self>, green: UserId, red: UserId, bet: Gold, target: u8) -> Self {
        Self {
            id,
            phase: Phase::Preparation,
            round: 0,
            bet,
            target,
            multiplier: 1,
            seats: [Contender::new(green, target), Contender::new(red, target)],
            history: Vec::new(),
            tentative: None,
            timer: PhaseTimer::default(),
        }
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn round(&self) -> u32 {
        self.round
    }
    pub fn bet(&self) -> Gold {
        self.bet
    }
    pub fn target(&self) -> u8 {
        self.target
    }
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }
    pub fn history(&self) -> &[RoundResult] {
        &self.history
    }
    pub fn tentative(&self) -> Option<&Tentative> {
        self.tentative.as_ref()
    }
    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }
    pub fn timer_mut(&mut self) -> &mut PhaseTimer {
        &mut self.timer
    }
    pub fn seat(&self, seat: Seat) -> &Contender {
        &self.seats[seat.index()]
    }
    pub fn seat_mut(&mut self, seat: Seat) -> &mut Contender {
        &mut self.seats[seat.index()]
    }
    pub fn users(&self) -> [UserId; 2] {
        [self.seats[0].user(), self.seats[1].user()]
    }
    /// Which seat `user` occupies, if they play in this session.
    pub fn seat_of(&self, user: UserId) -> Option<Seat> {
        Seat::BOTH.into_iter().find(|s| self.seat(*s).user() == user)
    }
    pub fn pair<T, F>(&self, f: F) -> Pair<T>
    where
        F: Fn(&Contender) -> T,
    {
        Pair::new(f(&self.seats[0]), f(&self.seats[1]))
    }
    pub fn wins(&self) -> Pair<u8> {
        self.pair(Contender::wins)
    }
    pub fn all_ready(&self) -> bool {
        self.seats.iter().all(Contender::ready)
    }
    pub fn all_chosen(&self) -> bool {
        self.seats.iter().all(|c| c.choice().is_some())
    }
    pub fn all_settled(&self) -> bool {
        self.seats.iter().all(Contender::settled)
    }
    pub fn any_charges(&self) -> bool {
        self.seats.iter().any(|c| c.charges().any())
    }
    pub fn usage(&self) -> Usage {
        Usage::of(self.seats[0].joker(), self.seats[1].joker())
    }
    /// Winner by strictly more committed wins; `None` is a draw.
    pub fn leader(&self) -> Option<Seat> {
        match self.seats[0].wins().cmp(&self.seats[1].wins()) {
            std::cmp::Ordering::Greater => Some(Seat::Green),
            std::cmp::Ordering::Less => Some(Seat::Red),
            std::cmp::Ordering::Equal => None,
        }
    }
    pub fn draws(&self) -> usize {
        self.history.iter().filter(|r| r.winner.is_draw()).count()
    }
}

impl Game {
    pub fn enter(&mut self, phase: Phase) {
        log::debug!("[game {}] {} -> {}", self.id, self.phase, phase);
        self.phase = phase;
    }
    /// Advances the round counter and resets per-round input.
    /// The bet multiplier carries over.
    pub fn begin_round(&mut self) {
        self.round += 1;
        self.seats.iter_mut().for_each(Contender::next_round);
    }
    /// Times out missing submissions.
    pub fn time_out(&mut self) {
        self.seats.iter_mut().for_each(Contender::time_out);
    }
    /// Resolves the submitted moves into the tentative result.
    pub fn resolve(&mut self) -> &Tentative {
        let moves = self.pair(|c| c.choice().unwrap_or(Move::Timeout));
        let winner = gameplay::resolve(moves.player1, moves.player2);
        self.tentative.insert(Tentative::new(moves, winner, self.wins()))
    }
    /// Credits the tentative winner now, ahead of the round log commit.
    /// Used when the deciding round skips the joker phase.
    pub fn commit_early(&mut self) {
        if let Some(t) = self.tentative.as_mut().filter(|t| !t.committed) {
            t.committed = true;
            if let Some(seat) = t.winner.winner() {
                self.seats[seat.index()].commit_win();
            }
        }
    }
    /// Applies joker effects for the round just revealed.
    pub fn apply(&mut self, effects: Effects) {
        self.multiplier = self.multiplier.saturating_mul(effects.factor);
        let [green, red] = effects.blocked;
        self.seats[0].set_pending(green);
        self.seats[1].set_pending(red);
    }
    /// Moves the tentative result into the round log exactly once and
    /// credits the winner if the early path has not already.
    pub fn commit(&mut self) -> Option<&RoundResult> {
        let tentative = self.tentative.take()?;
        if !tentative.committed {
            if let Some(seat) = tentative.winner.winner() {
                self.seats[seat.index()].commit_win();
            }
        }
        self.history.push(RoundResult {
            round: self.round,
            moves: tentative.moves,
            winner: tentative.winner,
            bet_multiplier: self.multiplier,
            jokers: self.pair(Contender::joker),
        });
        self.history.last()
    }
}

impl Unique for Game {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
