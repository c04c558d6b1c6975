/// Lifecycle of a session.
///
/// ```text
/// Preparation → CardSelect → Revealing → RoundResult
///     → (JokerSelect → JokerReveal)? → RoundEnd → CardSelect
///     → GameEnd
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Preparation,
    CardSelect,
    Revealing,
    RoundResult,
    JokerSelect,
    JokerReveal,
    RoundEnd,
    GameEnd,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Phase::Preparation => "preparation",
            Phase::CardSelect => "cardSelect",
            Phase::Revealing => "revealing",
            Phase::RoundResult => "roundResult",
            Phase::JokerSelect => "jokerSelect",
            Phase::JokerReveal => "jokerReveal",
            Phase::RoundEnd => "roundEnd",
            Phase::GameEnd => "gameEnd",
        };
        write!(f, "{}", name)
    }
}
