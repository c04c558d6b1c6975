use serde::Serialize;

/// One side of a match. Green is the player who was already waiting
/// when the match formed; red is the requester who completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Seat {
    #[serde(rename = "player1")]
    Green,
    #[serde(rename = "player2")]
    Red,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::Green, Seat::Red];
    pub fn index(self) -> usize {
        match self {
            Seat::Green => 0,
            Seat::Red => 1,
        }
    }
    pub fn other(self) -> Self {
        match self {
            Seat::Green => Seat::Red,
            Seat::Red => Seat::Green,
        }
    }
    /// Colour tag used in joker usage summaries.
    pub fn colour(self) -> &'static str {
        match self {
            Seat::Green => "green",
            Seat::Red => "red",
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Seat::Green => write!(f, "player1"),
            Seat::Red => write!(f, "player2"),
        }
    }
}

/// A value per seat, serialized as `{ "player1": .., "player2": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Pair<T> {
    pub player1: T,
    pub player2: T,
}

impl<T> Pair<T> {
    pub fn new(player1: T, player2: T) -> Self {
        Self { player1, player2 }
    }
    pub fn get(&self, seat: Seat) -> &T {
        match seat {
            Seat::Green => &self.player1,
            Seat::Red => &self.player2,
        }
    }
    pub fn map<U, F>(self, mut f: F) -> Pair<U>
    where
        F: FnMut(T) -> U,
    {
        Pair::new(f(self.player1), f(self.player2))
    }
}

impl<T> From<[T; 2]> for Pair<T> {
    fn from([player1, player2]: [T; 2]) -> Self {
        Self { player1, player2 }
    }
}
