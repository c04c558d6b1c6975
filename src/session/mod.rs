//! Per-match state.
//!
//! A [`Game`] owns both [`Contender`]s, the committed round log, the
//! tentative result awaiting commit, and exactly one [`PhaseTimer`] slot.
//! Transitions themselves are driven from the arena; this module only
//! guards the invariants each piece of state must keep.
mod contender;
mod game;
mod phase;
mod round;
mod timer;

pub use contender::*;
pub use game::*;
pub use phase::*;
pub use round::*;
pub use timer::*;
