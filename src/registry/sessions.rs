use super::*;
use crate::session::Game;
use crate::*;
use std::collections::HashMap;
use std::collections::HashSet;

/// Connections, identities and live sessions.
#[derive(Debug, Default)]
pub struct Registry {
    attached: HashSet<Conn>,
    identities: HashMap<Conn, Identity>,
    connections: HashMap<UserId, Conn>,
    games: HashMap<ID<Game>, Game>,
}

/// Connections.
impl Registry {
    pub fn attach(&mut self, conn: Conn) {
        self.attached.insert(conn);
    }
    pub fn is_attached(&self, conn: Conn) -> bool {
        self.attached.contains(&conn)
    }
    /// Forgets the socket and its identity. Returns the identity it carried.
    pub fn detach(&mut self, conn: Conn) -> Option<Identity> {
        self.attached.remove(&conn);
        self.unbind(conn)
    }
    /// Binds an identity to an attached socket, replacing whatever the
    /// socket carried before. The most recent authentication of a user
    /// owns that user's reverse mapping.
    pub fn authenticate(&mut self, conn: Conn, identity: Identity) -> bool {
        if !self.is_attached(conn) {
            return false;
        }
        self.unbind(conn);
        self.connections.insert(identity.user, conn);
        self.identities.insert(conn, identity);
        true
    }
    /// Drops the identity of `conn`, and its reverse mapping only while
    /// that mapping still points here.
    fn unbind(&mut self, conn: Conn) -> Option<Identity> {
        let identity = self.identities.remove(&conn)?;
        if self.connections.get(&identity.user) == Some(&conn) {
            self.connections.remove(&identity.user);
        }
        Some(identity)
    }
    pub fn identity(&self, conn: Conn) -> Option<&Identity> {
        self.identities.get(&conn)
    }
    /// The live socket currently speaking for `user`.
    pub fn connection(&self, user: UserId) -> Option<Conn> {
        self.connections.get(&user).copied()
    }
}

/// Sessions.
impl Registry {
    pub fn open(&mut self, game: Game) {
        self.games.insert(game.id(), game);
    }
    /// Removes a session on its terminal transition.
    pub fn close(&mut self, id: ID<Game>) -> Option<Game> {
        self.games.remove(&id)
    }
    pub fn game(&self, id: ID<Game>) -> Option<&Game> {
        self.games.get(&id)
    }
    pub fn game_mut(&mut self, id: ID<Game>) -> Option<&mut Game> {
        self.games.get_mut(&id)
    }
    /// Sessions in which `user` holds a seat.
    pub fn games_of(&self, user: UserId) -> Vec<ID<Game>> {
        self.games
            .values()
            .filter(|g| g.seat_of(user).is_some())
            .map(Game::id)
            .collect()
    }
    pub fn is_playing(&self, user: UserId) -> bool {
        self.games.values().any(|g| g.seat_of(user).is_some())
    }
    pub fn len(&self) -> usize {
        self.games.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn identity(user: UserId) -> Identity {
        Identity {
            user,
            league: "gold".into(),
            gold: 500,
            device: "dev".into(),
        }
    }
    #[test]
    fn unattached_cannot_authenticate() {
        let mut registry = Registry::default();
        let conn = Conn::default();
        assert!(!registry.authenticate(conn, identity(1)));
        registry.attach(conn);
        assert!(registry.authenticate(conn, identity(1)));
        assert_eq!(registry.connection(1), Some(conn));
    }
    #[test]
    fn detach_forgets_identity() {
        let mut registry = Registry::default();
        let conn = Conn::default();
        registry.attach(conn);
        registry.authenticate(conn, identity(1));
        assert_eq!(registry.detach(conn).map(|i| i.user), Some(1));
        assert!(registry.identity(conn).is_none());
        assert!(registry.connection(1).is_none());
        assert!(!registry.is_attached(conn));
    }
    #[test]
    fn stale_socket_keeps_newer_mapping() {
        let mut registry = Registry::default();
        let old = Conn::default();
        let new = Conn::default();
        registry.attach(old);
        registry.attach(new);
        registry.authenticate(old, identity(1));
        registry.authenticate(new, identity(1));
        registry.detach(old);
        assert_eq!(registry.connection(1), Some(new));
    }
    #[test]
    fn reauthentication_releases_previous_user() {
        let mut registry = Registry::default();
        let conn = Conn::default();
        registry.attach(conn);
        registry.authenticate(conn, identity(1));
        registry.authenticate(conn, identity(2));
        assert_eq!(registry.connection(1), None);
        assert_eq!(registry.connection(2), Some(conn));
        assert_eq!(registry.identity(conn).map(|i| i.user), Some(2));
    }
    #[test]
    fn reauthentication_keeps_newer_socket_of_previous_user() {
        let mut registry = Registry::default();
        let old = Conn::default();
        let new = Conn::default();
        registry.attach(old);
        registry.attach(new);
        registry.authenticate(old, identity(1));
        registry.authenticate(new, identity(1));
        registry.authenticate(old, identity(2));
        assert_eq!(registry.connection(1), Some(new));
        assert_eq!(registry.connection(2), Some(old));
    }
    #[test]
    fn sessions_lifecycle() {
        let mut registry = Registry::default();
        let game = Game::new(ID::default(), 1, 2, 100, 3);
        let id = game.id();
        registry.open(game);
        assert!(registry.game(id).is_some());
        assert_eq!(registry.games_of(2), vec![id]);
        assert!(registry.is_playing(1));
        assert!(registry.close(id).is_some());
        assert!(registry.close(id).is_none());
        assert!(!registry.is_playing(1));
    }
}
