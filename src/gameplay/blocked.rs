use super::*;
use serde::Serialize;

/// Moves a player may not submit for one round.
/// Insertion-ordered and free of duplicates; serialized as a plain list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Blocked(Vec<Move>);

impl Blocked {
    pub fn contains(&self, m: Move) -> bool {
        self.0.contains(&m)
    }
    /// Adds `m` unless already present.
    pub fn insert(&mut self, m: Move) {
        if !self.contains(m) {
            self.0.push(m);
        }
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.0.iter()
    }
}

impl FromIterator<Move> for Blocked {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Move>,
    {
        let mut blocked = Self::default();
        iter.into_iter().for_each(|m| blocked.insert(m));
        blocked
    }
}
