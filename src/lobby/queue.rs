use super::*;
use crate::registry::Conn;
use crate::*;
use std::collections::HashMap;

/// Waiting pools keyed by league.
#[derive(Debug, Default)]
pub struct Queue {
    pools: HashMap<League, Vec<Waiting>>,
}

impl Queue {
    /// Removes and returns the first entry in the requester's league
    /// compatible with `request`.
    pub fn pair(&mut self, request: &Waiting) -> Option<Waiting> {
        let pool = self.pools.get_mut(&request.league)?;
        pool.iter()
            .position(|w| request.is_compatible_with(w))
            .map(|i| pool.remove(i))
    }
    /// Appends to the back of the entry's league pool.
    pub fn enqueue(&mut self, waiting: Waiting) {
        log::debug!(
            "[queue] user {} waiting in {} (bet {}, target {})",
            waiting.user,
            waiting.league,
            waiting.bet,
            waiting.target
        );
        self.pools
            .entry(waiting.league.clone())
            .or_default()
            .push(waiting);
    }
    /// Drops every entry held by `conn` across all leagues.
    /// Returns how many were removed.
    pub fn withdraw(&mut self, conn: Conn) -> usize {
        let mut removed = 0;
        for pool in self.pools.values_mut() {
            let before = pool.len();
            pool.retain(|w| w.conn != conn);
            removed += before - pool.len();
        }
        self.pools.retain(|_, pool| !pool.is_empty());
        removed
    }
    pub fn contains(&self, conn: Conn) -> bool {
        self.pools.values().flatten().any(|w| w.conn == conn)
    }
    /// Entries waiting in `league`, in pairing order.
    pub fn pool(&self, league: &str) -> &[Waiting] {
        self.pools.get(league).map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
