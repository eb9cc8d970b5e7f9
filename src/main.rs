mod chat_request;
mod config;
mod error;
mod upstream;

#[cfg(test)]
mod test_support;

use std::io;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer, Responder};
use log::{error, info};
use uuid::Uuid;

use crate::chat_request::{ChatRequest, ChatResponse, Greeting};
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::upstream::UpstreamClient;

/*
    A small relay between a chat frontend and a locally hosted model server.
    POST /chat takes {"prompt": "..."}, forwards it as a single user turn to
    {AI_MODEL_URL}/api/chat and hands back {"response": "..."}.
 */
#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RelayConfig::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let upstream = UpstreamClient::new(&config).map_err(io::Error::other)?;

    info!(
        "Relaying to {} (model {}), allowing origin {}",
        upstream.get_endpoint(),
        config.model_name(),
        config.frontend_url()
    );

    let upstream = web::Data::new(upstream);
    let frontend_url = config.frontend_url().to_string();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_policy(&frontend_url))
            .wrap(Logger::default())
            .app_data(upstream.clone())
            .configure(configure)
    })
        .bind(config.bind_addr())?
        .run()
        .await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(greet)))
        .service(web::resource("/chat").route(web::post().to(handle_chat_request)));
}

pub fn cors_policy(frontend_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_url)
        .supports_credentials()
        .allow_any_method()
        .allow_any_header()
}

async fn greet() -> impl Responder {
    web::Json(Greeting::hello())
}

async fn handle_chat_request(
    upstream: web::Data<UpstreamClient>,
    body: web::Json<ChatRequest>,
) -> Result<web::Json<ChatResponse>, RelayError> {
    let request_id = Uuid::new_v4();
    let prompt = body.get_prompt();

    info!("[{}] forwarding prompt ({} chars)", request_id, prompt.chars().count());

    match upstream.chat(prompt).await {
        Ok(content) => {
            info!("[{}] got reply ({} chars)", request_id, content.chars().count());
            Ok(web::Json(ChatResponse { response: content }))
        }
        Err(err) => {
            error!("[{}] relay failed: {}", request_id, err);
            Err(err)
        }
    }
}
