//! League-scoped waiting pools.
//!
//! Each league keeps an insertion-ordered sequence of [`Waiting`] entries.
//! Pairing is first-fit: the earliest compatible entry wins, nothing more.
mod queue;
mod waiting;

pub use queue::*;
pub use waiting::*;
