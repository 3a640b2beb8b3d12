//! Profile store doubles: in-process stores and a PostgREST stub server.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};

use academy_backend::profile::{Profile, ProfileLookup, ProfileStore, ProfileStoreError};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

/// Store backed by a fixed map; counts lookups.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: HashMap<Uuid, Profile>,
    calls: AtomicUsize,
}

impl InMemoryProfileStore {
    pub fn with_profile(mut self, user_id: Uuid, profile: Profile) -> Self {
        self.profiles.insert(user_id, profile);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch_profile(&self, user_id: Uuid) -> ProfileLookup {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.profiles.get(&user_id).cloned())
    }
}

/// Store that always fails the way an unreachable backend would.
#[derive(Debug, Default)]
pub struct FailingProfileStore;

#[async_trait]
impl ProfileStore for FailingProfileStore {
    async fn fetch_profile(&self, _user_id: Uuid) -> ProfileLookup {
        Err(ProfileStoreError::Transport("connection refused".to_string()))
    }
}

#[derive(Clone)]
struct StubConfig {
    api_key: String,
    rows: HashMap<Uuid, Value>,
    fail_with: Option<u16>,
}

async fn profiles(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    config: web::Data<StubConfig>,
) -> HttpResponse {
    if let Some(status) = config.fail_with {
        let status = actix_web::http::StatusCode::from_u16(status)
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        return HttpResponse::build(status).json(json!({ "message": "stub failure" }));
    }

    let api_key = req
        .headers()
        .get("apikey")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let bearer = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if api_key != config.api_key || bearer != format!("Bearer {}", config.api_key) {
        return HttpResponse::Unauthorized().json(json!({ "message": "Invalid API key" }));
    }

    assert_eq!(
        query.get("select").map(String::as_str),
        Some("full_name,email,role")
    );

    let row = query
        .get("id")
        .and_then(|filter| filter.strip_prefix("eq."))
        .and_then(|id| Uuid::parse_str(id).ok())
        .and_then(|id| config.rows.get(&id).cloned());

    HttpResponse::Ok().json(row.into_iter().collect::<Vec<_>>())
}

/// PostgREST stand-in serving `GET /rest/v1/profiles` on an ephemeral port.
pub struct PostgrestStub {
    api_key: String,
    rows: HashMap<Uuid, Value>,
    fail_with: Option<u16>,
}

impl PostgrestStub {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            rows: HashMap::new(),
            fail_with: None,
        }
    }

    pub fn with_row(mut self, user_id: Uuid, row: Value) -> Self {
        self.rows.insert(user_id, row);
        self
    }

    /// Answer every request with this HTTP status.
    pub fn failing_with(mut self, status: u16) -> Self {
        self.fail_with = Some(status);
        self
    }

    /// Start serving on the current actix system; returns the base URL.
    pub fn start(self) -> String {
        let config = web::Data::new(StubConfig {
            api_key: self.api_key,
            rows: self.rows,
            fail_with: self.fail_with,
        });

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");

        let server = HttpServer::new(move || {
            App::new()
                .app_data(config.clone())
                .route("/rest/v1/profiles", web::get().to(profiles))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("listen on stub listener")
        .run();

        actix_web::rt::spawn(server);

        format!("http://{addr}")
    }
}

/// Base URL on which nothing is listening.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe local addr");
    drop(listener);
    format!("http://{addr}")
}
