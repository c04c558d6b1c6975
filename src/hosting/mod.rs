//! tokio/actix shell around the [`Arena`](crate::arena::Arena).
//!
//! One [`Dispatcher`] task owns the arena; every socket reaches it through
//! a cloned [`Hall`]. The HTTP [`Server`] exposes `GET /ws` and `GET /health`.
mod config;
mod dispatcher;
mod hall;
mod server;

pub use config::*;
pub use dispatcher::*;
pub use hall::*;
pub use server::*;
