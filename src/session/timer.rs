use crate::*;
use std::time::Duration;

/// Durations of every timed phase step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub preparation: Duration,
    pub grace: Duration,
    pub card_select: Duration,
    pub revealing: Duration,
    pub round_result: Duration,
    pub joker_select: Duration,
    pub joker_reveal: Duration,
    pub round_end: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            preparation: Duration::from_secs(PREPARATION_TIMEOUT),
            grace: Duration::from_secs(READY_GRACE),
            card_select: Duration::from_secs(CARD_SELECT_TIMEOUT),
            revealing: Duration::from_secs(REVEALING_DELAY),
            round_result: Duration::from_secs(ROUND_RESULT_DELAY),
            joker_select: Duration::from_secs(JOKER_SELECT_TIMEOUT),
            joker_reveal: Duration::from_secs(JOKER_REVEAL_DELAY),
            round_end: Duration::from_secs(ROUND_END_DELAY),
        }
    }
}

impl TimerConfig {
    /// How long to wait before `wake` fires.
    pub fn delay(&self, wake: Wake) -> Duration {
        match wake {
            Wake::PreparationTimeout => self.preparation,
            Wake::Commence => self.grace,
            Wake::CardSelectTimeout => self.card_select,
            Wake::RoundResult => self.revealing,
            Wake::JokerSelect | Wake::Finalize | Wake::GameEnd => self.round_result,
            Wake::JokerSelectTimeout => self.joker_select,
            Wake::JokerRevealed => self.joker_reveal,
            Wake::NextRound => self.round_end,
        }
    }
}

/// The transition a phase timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wake {
    /// Readiness window closed.
    PreparationTimeout,
    /// Grace period after "all ready" elapsed; start round one.
    Commence,
    /// Card selection window closed.
    CardSelectTimeout,
    /// Reveal display elapsed; compute the round result.
    RoundResult,
    /// Result display elapsed; open joker selection.
    JokerSelect,
    /// Result display elapsed with no jokers left; close the round.
    Finalize,
    /// Deciding round displayed; end the game.
    GameEnd,
    /// Joker selection window closed.
    JokerSelectTimeout,
    /// Joker reveal display elapsed; close the round.
    JokerRevealed,
    /// Round end display elapsed; begin the next round.
    NextRound,
}

/// Single-slot phase timer for one session.
///
/// Arming hands out a fresh token and implicitly retires whatever was
/// armed before; only a fire carrying the live token yields its wake.
#[derive(Debug, Default)]
pub struct PhaseTimer {
    issued: u64,
    live: Option<(u64, Wake)>,
}

impl PhaseTimer {
    /// Arms the slot, returning the new token and the retired one, if any.
    pub fn arm(&mut self, wake: Wake) -> (u64, Option<u64>) {
        self.issued += 1;
        let retired = self.live.replace((self.issued, wake)).map(|(t, _)| t);
        (self.issued, retired)
    }
    /// Empties the slot, returning the retired token.
    pub fn disarm(&mut self) -> Option<u64> {
        self.live.take().map(|(t, _)| t)
    }
    /// Consumes the slot if `token` is live.
    pub fn fire(&mut self, token: u64) -> Option<Wake> {
        match self.live {
            Some((live, wake)) if live == token => {
                self.live = None;
                Some(wake)
            }
            _ => None,
        }
    }
    pub fn token(&self) -> Option<u64> {
        self.live.map(|(t, _)| t)
    }
    pub fn wake(&self) -> Option<Wake> {
        self.live.map(|(_, w)| w)
    }
    pub fn armed(&self) -> bool {
        self.live.is_some()
    }
}
