use super::*;
use crate::arena::*;
use crate::ledger::*;
use crate::registry::Conn;
use crate::session::Game;
use crate::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::task::JoinHandle;

/// Everything the arena reacts to, funnelled through one channel.
#[derive(Debug)]
pub enum Command {
    /// A socket opened; frames for it go to the sender.
    Connect(Conn, UnboundedSender<String>),
    /// A text frame arrived.
    Inbound(Conn, String),
    /// A socket closed.
    Disconnect(Conn),
    /// A phase timer elapsed.
    Expire { game: ID<Game>, token: u64 },
    /// An account lookup completed.
    Account {
        conn: Conn,
        device: String,
        result: Result<Option<Account>, LedgerError>,
    },
}

/// Owns the [`Arena`] and carries out its effects.
///
/// Commands are handled one at a time to completion. Lookups and timers
/// run as detached tasks and report back through the same channel.
/// Settlements go to a single ledger worker in emission order, so a game's
/// closing entries never reach the store before its opening row. Nothing
/// here ever waits on the ledger.
pub struct Dispatcher {
    arena: Arena,
    ledger: Arc<dyn Ledger>,
    journal: UnboundedSender<Settlement>,
    outlets: HashMap<Conn, UnboundedSender<String>>,
    timers: HashMap<ID<Game>, JoinHandle<()>>,
    tx: UnboundedSender<Command>,
    rx: UnboundedReceiver<Command>,
}

impl Dispatcher {
    /// Must be called inside a tokio runtime: it spawns the ledger worker.
    pub fn new(arena: Arena, ledger: Arc<dyn Ledger>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            arena,
            journal: scribe(ledger.clone()),
            ledger,
            outlets: HashMap::new(),
            timers: HashMap::new(),
            tx,
            rx,
        }
    }

    /// A handle sockets use to reach this dispatcher.
    pub fn hall(&self, heartbeat: Heartbeat) -> Hall {
        Hall::new(self.tx.clone(), heartbeat)
    }

    pub async fn run(mut self) {
        log::info!("[arena] dispatcher running");
        while let Some(command) = self.rx.recv().await {
            self.handle(command);
        }
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Connect(conn, outlet) => {
                self.outlets.insert(conn, outlet);
                self.arena.connect(conn);
            }
            Command::Inbound(conn, text) => self.arena.handle(conn, &text),
            Command::Disconnect(conn) => {
                self.outlets.remove(&conn);
                self.arena.disconnect(conn);
            }
            Command::Expire { game, token } => self.arena.expire(game, token),
            Command::Account {
                conn,
                device,
                result,
            } => self.arena.authenticated(conn, device, result),
        }
        self.flush();
    }

    fn flush(&mut self) {
        for effect in self.arena.drain() {
            match effect {
                Effect::Send(conn, msg) => self.deliver(conn, &msg),
                Effect::Schedule { game, token, after } => self.schedule(game, token, after),
                Effect::Cancel { game } => self.cancel(game),
                Effect::Settle(settlement) => self.settle(settlement),
                Effect::Lookup { conn, user, device } => self.lookup(conn, user, device),
            }
        }
    }

    fn deliver(&self, conn: Conn, msg: &crate::protocol::ServerMessage) {
        let Some(outlet) = self.outlets.get(&conn) else {
            log::debug!("[arena] dropped frame for closed connection {}", conn);
            return;
        };
        match msg.to_json() {
            Ok(json) => {
                outlet
                    .send(json)
                    .inspect_err(|_| log::debug!("[arena] outlet of {} is gone", conn))
                    .ok();
            }
            Err(e) => log::error!("[arena] failed to encode frame: {}", e),
        }
    }

    fn schedule(&mut self, game: ID<Game>, token: u64, after: std::time::Duration) {
        let tx = self.tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            tx.send(Command::Expire { game, token }).ok();
        });
        if let Some(previous) = self.timers.insert(game, timer) {
            previous.abort();
        }
    }

    fn cancel(&mut self, game: ID<Game>) {
        if let Some(timer) = self.timers.remove(&game) {
            timer.abort();
        }
    }

    fn settle(&self, settlement: Settlement) {
        self.journal
            .send(settlement)
            .inspect_err(|e| log::error!("[ledger] worker is gone, dropped game {}", e.0.game))
            .ok();
    }

    fn lookup(&self, conn: Conn, user: UserId, device: String) {
        let ledger = self.ledger.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = ledger.account(user).await;
            tx.send(Command::Account {
                conn,
                device,
                result,
            })
            .ok();
        });
    }
}

/// Spawns the task that applies settlements one at a time, in order.
fn scribe(ledger: Arc<dyn Ledger>) -> UnboundedSender<Settlement> {
    let (tx, mut rx) = unbounded_channel::<Settlement>();
    tokio::spawn(async move {
        while let Some(settlement) = rx.recv().await {
            match ledger.settle(&settlement).await {
                Ok(()) => log::debug!("[ledger] settled game {}", settlement.game),
                Err(e) => log::error!("[ledger] settlement of game {} failed: {}", settlement.game, e),
            }
        }
    });
    tx
}
