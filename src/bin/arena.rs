//! Arena Server Binary
//!
//! Serves rock-paper-scissors matches over WebSocket.
//! Settings come from flags or `BIND_ADDR`, `DB_URL`,
//! `SOCKET_PING_INTERVAL` and `SOCKET_PING_TIMEOUT`.

use clap::Parser;
use rps_arena::hosting::*;
use rps_arena::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    log();
    kys();
    Server::run(config).await
}
