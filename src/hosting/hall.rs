use super::*;
use crate::registry::Conn;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::Instant;

/// Entry point for sockets. Cheap to clone into every HTTP worker.
#[derive(Debug, Clone)]
pub struct Hall {
    tx: UnboundedSender<Command>,
    heartbeat: Heartbeat,
}

impl Hall {
    pub fn new(tx: UnboundedSender<Command>, heartbeat: Heartbeat) -> Self {
        Self { tx, heartbeat }
    }

    /// Spawns the bridge between one WebSocket and the dispatcher.
    ///
    /// Outbound frames are forwarded as they arrive; inbound text frames
    /// become [`Command::Inbound`]. The socket is pinged every interval and
    /// dropped once the client has been silent past the timeout. However the
    /// loop ends, the dispatcher hears exactly one [`Command::Disconnect`].
    pub fn bridge(&self, mut session: actix_ws::Session, mut stream: actix_ws::MessageStream) {
        use futures::StreamExt;
        let conn = Conn::default();
        let tx = self.tx.clone();
        let heartbeat = self.heartbeat;
        let (outlet, mut frames) = unbounded_channel::<String>();
        if tx.send(Command::Connect(conn, outlet)).is_err() {
            log::error!("[bridge {}] dispatcher is gone", conn);
            return;
        }
        log::debug!("[bridge {}] opened", conn);
        actix_web::rt::spawn(async move {
            let mut ticker = tokio::time::interval(heartbeat.interval);
            let mut heard = Instant::now();
            'sesh: loop {
                tokio::select! {
                    biased;
                    frame = frames.recv() => match frame {
                        Some(json) => if session.text(json).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = stream.next() => {
                        heard = Instant::now();
                        match msg {
                            Some(Ok(actix_ws::Message::Text(text))) => if tx.send(Command::Inbound(conn, text.to_string())).is_err() { break 'sesh },
                            Some(Ok(actix_ws::Message::Ping(bytes))) => if session.pong(&bytes).await.is_err() { break 'sesh },
                            Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                            Some(Err(_)) => break 'sesh,
                            None => break 'sesh,
                            _ => continue 'sesh,
                        }
                    },
                    _ = ticker.tick() => {
                        if heard.elapsed() > heartbeat.timeout {
                            log::info!("[bridge {}] heartbeat timed out", conn);
                            break 'sesh;
                        }
                        if session.ping(b"").await.is_err() { break 'sesh }
                    },
                }
            }
            tx.send(Command::Disconnect(conn)).ok();
            session.close(None).await.ok();
            log::debug!("[bridge {}] closed", conn);
        });
    }
}
