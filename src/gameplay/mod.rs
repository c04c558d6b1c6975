//! Pure round rules.
//!
//! Nothing here holds state across calls: resolving a round and resolving
//! the joker phase both take the relevant inputs and return what changed.
//!
//! ## Core Types
//!
//! - [`Move`]: the three canonical symbols plus the timeout pseudo-move
//! - [`Outcome`]: round winner designation
//! - [`Seat`] / [`Pair`]: the green (player1) and red (player2) sides
//! - [`Joker`] / [`Charges`]: joker kinds and per-kind remaining uses
//! - [`Blocked`]: moves forbidden for one round
//!
//! ## Rules
//!
//! - [`resolve`]: move pair to round outcome
//! - [`resolve_jokers`]: joker selections to blocked sets and multiplier
mod blocked;
mod effects;
mod joker;
mod moves;
mod outcome;
mod seat;

pub use blocked::*;
pub use effects::*;
pub use joker::*;
pub use moves::*;
pub use outcome::*;
pub use seat::*;
