//! Real-time rock-paper-scissors arena.
//!
//! Two players are paired from league-scoped waiting pools, stake gold on a
//! best-of match, and play rounds of rock-paper-scissors interleaved with a
//! joker phase that can block the opponent's moves or double the payout.
//!
//! ## Modules
//!
//! - [`gameplay`]: moves, round resolution, jokers and their effects
//! - [`session`]: per-match state, phases and the single-slot phase timer
//! - [`lobby`]: league waiting pools and first-fit pairing
//! - [`registry`]: authenticated connections and live sessions
//! - [`protocol`]: wire messages in both directions and the error taxonomy
//! - [`ledger`]: narrow interface to gold, game records and statistics
//! - [`arena`]: the dispatch core driving every session forward
//! - [`hosting`]: tokio/actix shell around the arena

pub mod arena;
pub mod gameplay;
pub mod ledger;
pub mod lobby;
pub mod protocol;
pub mod registry;
pub mod session;

#[cfg(feature = "server")]
pub mod hosting;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Gold balances, bets and payouts.
pub type Gold = i64;
/// Primary key of a user in the account store.
pub type UserId = i64;
/// Matchmaking partition name.
pub type League = String;

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Draws a random (v4) identifier from an injected source,
    /// so session ids are reproducible under a seeded rng.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: rand::Rng,
    {
        Self::from(uuid::Builder::from_random_bytes(rng.random()).into_uuid())
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// MATCH PARAMETERS
// ============================================================================
/// Round targets a match may be played to.
pub const TARGETS: [u8; 2] = [3, 5];
/// Target at which each joker kind starts with extra charges.
pub const LONG_TARGET: u8 = 5;
/// Charges per joker kind in a long match.
pub const LONG_CHARGES: u8 = 2;
/// Charges per joker kind in a short match.
pub const SHORT_CHARGES: u8 = 1;
/// Number of moves a BLOCK joker forbids.
pub const BLOCK_WIDTH: usize = 2;

// ============================================================================
// PHASE DURATIONS (seconds)
// ============================================================================
/// Window for both players to signal ready.
pub const PREPARATION_TIMEOUT: u64 = 10;
/// Pause between "all ready" and the first round.
pub const READY_GRACE: u64 = 3;
/// Window for move submission.
pub const CARD_SELECT_TIMEOUT: u64 = 12;
/// Both moves on display before the result.
pub const REVEALING_DELAY: u64 = 3;
/// Tentative result on display before jokers or game end.
pub const ROUND_RESULT_DELAY: u64 = 4;
/// Window for joker selection.
pub const JOKER_SELECT_TIMEOUT: u64 = 10;
/// Joker outcome on display before the round closes.
pub const JOKER_REVEAL_DELAY: u64 = 5;
/// Committed result on display before the next round.
pub const ROUND_END_DELAY: u64 = 5;

// ============================================================================
// PAYOUTS
// ============================================================================
/// Winner's credit at game end, in bets (scaled by the bet multiplier).
pub const VICTORY_FACTOR: Gold = 2;
/// Opponent's credit when a player disconnects, in bets.
pub const DISCONNECT_FACTOR: Gold = 2;
/// Opponent's credit on surrender, as a ratio of the bet (1.5×).
pub const SURRENDER_RATIO: (Gold, Gold) = (3, 2);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate termination.
/// Live sessions are abandoned; ledger writes in flight may be lost.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, shutting down arena");
            std::process::exit(0);
        }
    });
}
