//! In-process stand-in for the inference server, used by the unit tests.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};

use crate::config::RelayConfig;

#[derive(Clone)]
pub struct FakeReply {
    status: u16,
    content_type: &'static str,
    body: String,
    delay: Duration,
}

impl FakeReply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        FakeReply {
            status,
            content_type: "application/json",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        FakeReply {
            status,
            content_type: "text/plain",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub struct FakeUpstream {
    pub base_url: String,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl FakeUpstream {
    pub fn received(&self) -> Vec<serde_json::Value> {
        self.received.lock().unwrap().clone()
    }
}

struct FakeState {
    reply: FakeReply,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn fake_chat(state: web::Data<FakeState>, body: web::Json<serde_json::Value>) -> HttpResponse {
    state.received.lock().unwrap().push(body.into_inner());

    if !state.reply.delay.is_zero() {
        tokio::time::sleep(state.reply.delay).await;
    }

    HttpResponse::build(StatusCode::from_u16(state.reply.status).unwrap())
        .content_type(state.reply.content_type)
        .body(state.reply.body.clone())
}

/// Serves `reply` on `POST /api/chat` from an ephemeral local port.
/// Must be called from inside an actix system (e.g. an `#[actix_web::test]`).
pub fn spawn_upstream(reply: FakeReply) -> FakeUpstream {
    let received = Arc::new(Mutex::new(Vec::new()));
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let state = web::Data::new(FakeState {
        reply,
        received: received.clone(),
    });
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/api/chat", web::post().to(fake_chat))
    })
    .workers(1)
    .disable_signals()
    .listen(listener)
    .unwrap()
    .run();
    actix_web::rt::spawn(server);

    FakeUpstream {
        base_url: format!("http://{addr}"),
        received,
    }
}

pub fn relay_config(model_url: &str) -> RelayConfig {
    let model_url = model_url.to_string();
    RelayConfig::from_lookup(move |key| match key {
        "FRONTEND_URL" => Some("http://localhost:5173".to_string()),
        "AI_MODEL_URL" => Some(model_url.clone()),
        "AI_MODEL_NAME" => Some("llama3.2".to_string()),
        _ => None,
    })
    .unwrap()
}
