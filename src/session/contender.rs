use crate::UserId;
use crate::gameplay::*;

/// One player's state inside a session.
#[derive(Debug, Clone)]
pub struct Contender {
    user: UserId,
    wins: u8,
    ready: bool,
    charges: Charges,
    choice: Option<Move>,
    joker: Option<Joker>,
    blocked: Blocked,
    pending: Blocked,
}

impl Contender {
    pub fn new(user: UserId, target: u8) -> Self {
        Self {
            user,
            wins: 0,
            ready: false,
            charges: Charges::for_target(target),
            choice: None,
            joker: None,
            blocked: Blocked::default(),
            pending: Blocked::default(),
        }
    }
    pub fn user(&self) -> UserId {
        self.user
    }
    /// Committed round wins.
    pub fn wins(&self) -> u8 {
        self.wins
    }
    pub fn ready(&self) -> bool {
        self.ready
    }
    pub fn charges(&self) -> &Charges {
        &self.charges
    }
    pub fn choice(&self) -> Option<Move> {
        self.choice
    }
    pub fn joker(&self) -> Option<Joker> {
        self.joker
    }
    /// Moves forbidden this round.
    pub fn blocked(&self) -> &Blocked {
        &self.blocked
    }
    /// Moves forbidden next round, as computed by the last joker phase.
    pub fn pending(&self) -> &Blocked {
        &self.pending
    }
    pub fn play(&self) -> Play {
        Play {
            played: self.choice.unwrap_or(Move::Timeout),
            joker: self.joker,
        }
    }
}

impl Contender {
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }
    /// Records a move for this round. The first legal submission sticks.
    pub fn submit(&mut self, m: Move) -> Result<(), Move> {
        if self.blocked.contains(m) {
            return Err(m);
        }
        if self.choice.is_none() {
            self.choice = Some(m);
        }
        Ok(())
    }
    /// Fills an empty choice with the timeout pseudo-move.
    pub fn time_out(&mut self) {
        self.choice.get_or_insert(Move::Timeout);
    }
    /// Spends one joker charge for this round. At most one per round;
    /// the charge is gone even if the round is later interrupted.
    pub fn select(&mut self, joker: Joker) -> bool {
        if self.joker.is_some() || !self.charges.spend(joker) {
            return false;
        }
        self.joker = Some(joker);
        true
    }
    /// Whether the joker phase has nothing more to wait for from this player.
    pub fn settled(&self) -> bool {
        self.joker.is_some() || !self.charges.any()
    }
    pub fn set_pending(&mut self, blocked: Blocked) {
        self.pending = blocked;
    }
    pub fn commit_win(&mut self) {
        self.wins += 1;
    }
    /// Resets per-round input and rolls next-round blocks into this round.
    pub fn next_round(&mut self) {
        self.choice = None;
        self.joker = None;
        self.blocked = std::mem::take(&mut self.pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn blocked_submission_is_rejected() {
        let mut c = Contender::new(1, 3);
        c.set_pending([Move::Rock, Move::Paper].into_iter().collect());
        c.next_round();
        assert_eq!(c.submit(Move::Rock), Err(Move::Rock));
        assert_eq!(c.choice(), None);
        assert_eq!(c.submit(Move::Scissors), Ok(()));
        assert_eq!(c.choice(), Some(Move::Scissors));
    }
    #[test]
    fn first_submission_sticks() {
        let mut c = Contender::new(1, 3);
        c.submit(Move::Rock).unwrap();
        c.submit(Move::Paper).unwrap();
        assert_eq!(c.choice(), Some(Move::Rock));
        c.time_out();
        assert_eq!(c.choice(), Some(Move::Rock));
    }
    #[test]
    fn one_joker_per_round() {
        let mut c = Contender::new(1, 5);
        assert!(c.select(Joker::Bet));
        assert!(!c.select(Joker::Block));
        assert_eq!(c.charges().count(Joker::Bet), 1);
        assert_eq!(c.charges().count(Joker::Block), 2);
        c.next_round();
        assert!(c.select(Joker::Bet));
        c.next_round();
        assert!(!c.select(Joker::Bet));
        assert_eq!(c.charges().count(Joker::Bet), 0);
    }
    #[test]
    fn next_round_rolls_pending_blocks() {
        let mut c = Contender::new(1, 3);
        c.submit(Move::Paper).unwrap();
        c.set_pending([Move::Scissors].into_iter().collect());
        c.next_round();
        assert!(c.blocked().contains(Move::Scissors));
        assert!(c.pending().is_empty());
        assert_eq!(c.choice(), None);
        c.next_round();
        assert!(c.blocked().is_empty());
    }
    #[test]
    fn settled_without_charges() {
        let mut c = Contender::new(1, 3);
        assert!(!c.settled());
        for j in [Joker::Block, Joker::Hook, Joker::Bet] {
            c.select(j);
            c.next_round();
        }
        assert!(c.settled());
    }
}
