//! Process-wide bookkeeping of who is connected and which sessions live.
//!
//! Lifecycle rules:
//!
//! - a connection is attached when its socket opens, detached when it closes
//! - an [`Identity`] exists only while its connection is attached and authenticated
//! - a [`Game`](crate::session::Game) is inserted when a match forms and removed
//!   on its terminal transition; nothing else may reinsert it
mod identity;
mod sessions;

pub use identity::*;
pub use sessions::*;
