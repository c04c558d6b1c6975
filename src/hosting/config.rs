use clap::Parser;
use std::time::Duration;

/// Runtime settings for the arena server.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address the HTTP and WebSocket endpoints bind to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: String,
    /// PostgreSQL connection string. Without one, an in-memory ledger is used.
    #[arg(long, env = "DB_URL")]
    pub db_url: Option<String>,
    /// Milliseconds between heartbeat pings.
    #[arg(long, env = "SOCKET_PING_INTERVAL", default_value_t = 25_000)]
    pub ping_interval: u64,
    /// Milliseconds of silence after which a socket is considered dead.
    #[arg(long, env = "SOCKET_PING_TIMEOUT", default_value_t = 20_000)]
    pub ping_timeout: u64,
}

impl Config {
    pub fn heartbeat(&self) -> Heartbeat {
        Heartbeat {
            interval: Duration::from_millis(self.ping_interval),
            timeout: Duration::from_millis(self.ping_interval + self.ping_timeout),
        }
    }
}

/// Resolved ping cadence of every bridged socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    pub interval: Duration,
    /// Longest gap between frames from the client before it is dropped.
    pub timeout: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn flags_override_defaults() {
        let config = Config::parse_from([
            "arena",
            "--bind",
            "127.0.0.1:9000",
            "--ping-interval",
            "1000",
            "--ping-timeout",
            "500",
        ]);
        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(
            config.heartbeat(),
            Heartbeat {
                interval: Duration::from_millis(1000),
                timeout: Duration::from_millis(1500),
            }
        );
    }
}
