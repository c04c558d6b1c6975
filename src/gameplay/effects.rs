use super::*;
use rand::Rng;
use serde::Serialize;

/// What one player did in the round being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub played: Move,
    pub joker: Option<Joker>,
}

/// Result of the joker phase: next-round blocked sets per seat and the
/// factor to apply to the session bet multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effects {
    pub blocked: [Blocked; 2],
    pub factor: u32,
}

impl Effects {
    pub fn blocked(&self, seat: Seat) -> &Blocked {
        &self.blocked[seat.index()]
    }
}

/// Which side(s) spent a joker this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    None,
    Green,
    Red,
    Both,
}

impl Usage {
    pub fn of(green: Option<Joker>, red: Option<Joker>) -> Self {
        match (green.is_some(), red.is_some()) {
            (false, false) => Usage::None,
            (true, false) => Usage::Green,
            (false, true) => Usage::Red,
            (true, true) => Usage::Both,
        }
    }
}

/// Resolves both players' joker selections.
///
/// Order: next-round sets start empty, every BET doubles, every BLOCK
/// overwrites the opponent's set with two distinct random moves, then
/// every HOOK adds the opponent's just-played move. A timeout is never
/// added since it cannot be submitted.
pub fn resolve_jokers<R>(plays: [Play; 2], rng: &mut R) -> Effects
where
    R: Rng,
{
    let mut blocked = [Blocked::default(), Blocked::default()];
    let factor = plays
        .iter()
        .filter(|p| p.joker == Some(Joker::Bet))
        .fold(1, |acc, _| acc * 2);
    for seat in Seat::BOTH {
        if plays[seat.index()].joker == Some(Joker::Block) {
            blocked[seat.other().index()] = rand::seq::index::sample(rng, 3, crate::BLOCK_WIDTH)
                .into_iter()
                .map(|i| Move::CANONICAL[i])
                .collect();
            log::debug!("[jokers] {} blocks {:?}", seat, blocked[seat.other().index()]);
        }
    }
    for seat in Seat::BOTH {
        let victim = plays[seat.other().index()].played;
        if plays[seat.index()].joker == Some(Joker::Hook) && !victim.is_timeout() {
            blocked[seat.other().index()].insert(victim);
            log::debug!("[jokers] {} hooks {}", seat, victim);
        }
    }
    Effects { blocked, factor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    fn play(played: Move, joker: Option<Joker>) -> Play {
        Play { played, joker }
    }
    #[test]
    fn no_jokers_no_effects() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let fx = resolve_jokers(
            [play(Move::Rock, None), play(Move::Paper, None)],
            rng,
        );
        assert_eq!(fx.factor, 1);
        assert!(fx.blocked(Seat::Green).is_empty());
        assert!(fx.blocked(Seat::Red).is_empty());
    }
    #[test]
    fn bet_doubles_per_use() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let one = resolve_jokers(
            [play(Move::Rock, Some(Joker::Bet)), play(Move::Paper, None)],
            rng,
        );
        let two = resolve_jokers(
            [
                play(Move::Rock, Some(Joker::Bet)),
                play(Move::Paper, Some(Joker::Bet)),
            ],
            rng,
        );
        assert_eq!(one.factor, 2);
        assert_eq!(two.factor, 4);
    }
    #[test]
    fn block_picks_two_distinct_canonical_moves() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..64 {
            let fx = resolve_jokers(
                [play(Move::Rock, Some(Joker::Block)), play(Move::Paper, None)],
                rng,
            );
            let red = fx.blocked(Seat::Red);
            assert_eq!(red.len(), 2);
            assert!(red.iter().all(|m| Move::CANONICAL.contains(m)));
            assert!(fx.blocked(Seat::Green).is_empty());
        }
    }
    #[test]
    fn block_is_reproducible_under_seed() {
        let plays = [play(Move::Rock, None), play(Move::Paper, Some(Joker::Block))];
        let a = resolve_jokers(plays, &mut SmallRng::seed_from_u64(42));
        let b = resolve_jokers(plays, &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.blocked(Seat::Green).len(), 2);
    }
    #[test]
    fn block_covers_every_pair() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..256 {
            let fx = resolve_jokers(
                [play(Move::Rock, Some(Joker::Block)), play(Move::Rock, None)],
                rng,
            );
            let mut pair = fx.blocked(Seat::Red).iter().copied().collect::<Vec<_>>();
            pair.sort_by_key(|m| Move::CANONICAL.iter().position(|c| c == m));
            seen.insert(pair);
        }
        assert_eq!(seen.len(), 3);
    }
    #[test]
    fn hook_blocks_opponent_played_move() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let fx = resolve_jokers(
            [play(Move::Rock, Some(Joker::Hook)), play(Move::Scissors, None)],
            rng,
        );
        assert_eq!(fx.blocked(Seat::Red).iter().collect::<Vec<_>>(), vec![&Move::Scissors]);
        assert!(fx.blocked(Seat::Green).is_empty());
    }
    #[test]
    fn hook_ignores_timeout() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let fx = resolve_jokers(
            [play(Move::Rock, Some(Joker::Hook)), play(Move::Timeout, None)],
            rng,
        );
        assert!(fx.blocked(Seat::Red).is_empty());
    }
    #[test]
    fn block_and_hook_target_different_opponents() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        let fx = resolve_jokers(
            [
                play(Move::Paper, Some(Joker::Block)),
                play(Move::Rock, Some(Joker::Hook)),
            ],
            rng,
        );
        assert_eq!(fx.blocked(Seat::Red).len(), 2);
        assert_eq!(fx.blocked(Seat::Green).iter().collect::<Vec<_>>(), vec![&Move::Paper]);
    }
    #[test]
    fn usage_tags() {
        assert_eq!(Usage::of(None, None), Usage::None);
        assert_eq!(Usage::of(Some(Joker::Bet), None), Usage::Green);
        assert_eq!(Usage::of(None, Some(Joker::Hook)), Usage::Red);
        assert_eq!(Usage::of(Some(Joker::Block), Some(Joker::Hook)), Usage::Both);
        assert_eq!(serde_json::to_string(&Usage::Both).unwrap(), "\"both\"");
    }
}
