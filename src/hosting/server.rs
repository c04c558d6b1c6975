use super::*;
use crate::arena::Arena;
use crate::ledger::*;
use crate::session::TimerConfig;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;

pub struct Server;

impl Server {
    pub async fn run(config: Config) -> anyhow::Result<()> {
        let ledger = Self::ledger(&config).await?;
        let dispatcher = Dispatcher::new(Arena::new(TimerConfig::default()), ledger);
        let hall = web::Data::new(dispatcher.hall(config.heartbeat()));
        tokio::spawn(dispatcher.run());
        log::info!("starting arena server on {}", config.bind);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(hall.clone())
                .route("/health", web::get().to(health))
                .route("/ws", web::get().to(enter))
        })
        .workers(4)
        .bind(&config.bind)?
        .run()
        .await?;
        Ok(())
    }

    #[cfg(feature = "database")]
    async fn ledger(config: &Config) -> anyhow::Result<Arc<dyn Ledger>> {
        match config.db_url.as_deref() {
            Some(url) => {
                let client: Arc<dyn Ledger> = db(url).await?;
                Ok(client)
            }
            None => Ok(Self::memory()),
        }
    }

    #[cfg(not(feature = "database"))]
    async fn ledger(config: &Config) -> anyhow::Result<Arc<dyn Ledger>> {
        if config.db_url.is_some() {
            log::warn!("[ledger] built without database support, ignoring DB_URL");
        }
        Ok(Self::memory())
    }

    fn memory() -> Arc<dyn Ledger> {
        log::warn!("[ledger] no database configured, using an empty in-memory ledger");
        Arc::new(Memory::default())
    }
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn enter(hall: web::Data<Hall>, body: web::Payload, req: HttpRequest) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            hall.bridge(session, stream);
            response
        }
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}
