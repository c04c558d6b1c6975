use serde::Deserialize;
use serde::Serialize;

/// Abilities a player may spend during the joker phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Joker {
    /// Forbid two random moves to the opponent next round.
    Block,
    /// Forbid the opponent's just-played move next round.
    Hook,
    /// Double the session bet multiplier.
    Bet,
}

impl TryFrom<&str> for Joker {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "block" => Ok(Joker::Block),
            "hook" => Ok(Joker::Hook),
            "bet" => Ok(Joker::Bet),
            _ => Err(s.to_string()),
        }
    }
}

impl std::fmt::Display for Joker {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Joker::Block => write!(f, "block"),
            Joker::Hook => write!(f, "hook"),
            Joker::Bet => write!(f, "bet"),
        }
    }
}

/// Remaining uses per joker kind. Never replenished within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Charges {
    block: u8,
    hook: u8,
    bet: u8,
}

impl Charges {
    /// Starting charges for a match played to `target` wins.
    pub fn for_target(target: u8) -> Self {
        let n = if target == crate::LONG_TARGET {
            crate::LONG_CHARGES
        } else {
            crate::SHORT_CHARGES
        };
        Self {
            block: n,
            hook: n,
            bet: n,
        }
    }
    pub fn empty() -> Self {
        Self {
            block: 0,
            hook: 0,
            bet: 0,
        }
    }
    pub fn count(&self, joker: Joker) -> u8 {
        match joker {
            Joker::Block => self.block,
            Joker::Hook => self.hook,
            Joker::Bet => self.bet,
        }
    }
    pub fn any(&self) -> bool {
        self.block > 0 || self.hook > 0 || self.bet > 0
    }
    /// Consumes one charge of `joker`. Returns false, leaving the
    /// counter untouched, when none remain.
    pub fn spend(&mut self, joker: Joker) -> bool {
        let slot = match joker {
            Joker::Block => &mut self.block,
            Joker::Hook => &mut self.hook,
            Joker::Bet => &mut self.bet,
        };
        match slot.checked_sub(1) {
            Some(left) => {
                *slot = left;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn starting_charges() {
        let long = Charges::for_target(5);
        let short = Charges::for_target(3);
        for j in [Joker::Block, Joker::Hook, Joker::Bet] {
            assert_eq!(long.count(j), 2);
            assert_eq!(short.count(j), 1);
        }
    }
    #[test]
    fn spend_never_goes_negative() {
        let mut charges = Charges::for_target(3);
        assert!(charges.spend(Joker::Hook));
        assert_eq!(charges.count(Joker::Hook), 0);
        assert!(!charges.spend(Joker::Hook));
        assert_eq!(charges.count(Joker::Hook), 0);
        assert!(charges.any());
        assert!(charges.spend(Joker::Block));
        assert!(charges.spend(Joker::Bet));
        assert!(!charges.any());
    }
    #[test]
    fn parse_joker() {
        assert_eq!(Joker::try_from("BLOCK"), Ok(Joker::Block));
        assert_eq!(Joker::try_from("hook"), Ok(Joker::Hook));
        assert!(Joker::try_from("steal").is_err());
    }
}
