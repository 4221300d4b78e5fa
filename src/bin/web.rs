//! Single binary web server exposing the bracket engine over a small JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, and the bracket limits MAX_ENTRANTS, MAX_ROUNDS.

use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use elimination_bracket::{
    apply_result, build_bracket_with, deserialize, parse_roster, play_random_match, serialize,
    shuffle_entrants, Bracket, BracketError, BracketFormat, BracketId, BracketOptions, Entrant,
    EntrantId, ErrorKind, MatchId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-bracket entry: bracket data + last activity time (for auto-cleanup).
struct BracketEntry {
    bracket: Bracket,
    last_activity: Instant,
}

/// In-memory state. The write lock serializes every result submission.
struct AppData {
    brackets: RwLock<HashMap<BracketId, BracketEntry>>,
    options: BracketOptions,
}

type AppState = Data<AppData>;

/// Inactivity threshold: brackets not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateBracketBody {
    /// Team names, in seeding order.
    #[serde(default)]
    entrants: Vec<String>,
    /// Alternative to `entrants`: one name per line.
    roster: Option<String>,
    #[serde(default)]
    format: BracketFormat,
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct ResultBody {
    match_id: MatchId,
    winner_id: EntrantId,
}

/// Path segment: bracket id (e.g. /api/brackets/{id})
#[derive(Deserialize)]
struct BracketPath {
    id: BracketId,
}

fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation | ErrorKind::IllegalTransition => HttpResponse::BadRequest().json(body),
        ErrorKind::StructuralInvariant => {
            log::error!("structural failure: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No bracket" }))
}

/// Run `f` against one bracket under the write lock, refreshing its activity time.
fn with_bracket<F>(state: &AppState, id: BracketId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Bracket) -> HttpResponse,
{
    let mut g = match state.brackets.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.bracket)
        }
        None => not_found(),
    }
}

fn insert(state: &AppState, bracket: Bracket) -> HttpResponse {
    let mut g = match state.brackets.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&bracket);
    g.insert(
        bracket.id,
        BracketEntry {
            bracket,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "elimination-bracket",
    })
}

/// Build a bracket from a list of names or a pasted roster.
#[post("/api/brackets")]
async fn api_create_bracket(state: AppState, body: Json<CreateBracketBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut entrants = match &body.roster {
        Some(text) => match parse_roster(text) {
            Ok(list) => list,
            Err(e) => return error_response(&e),
        },
        None => body.entrants.iter().map(|n| Entrant::new(n.trim())).collect(),
    };
    if body.shuffle {
        shuffle_entrants(&mut entrants);
    }
    match build_bracket_with(entrants, body.format, &state.options) {
        Ok(bracket) => insert(&state, bracket),
        Err(e) => error_response(&e),
    }
}

#[get("/api/brackets/{id}")]
async fn api_get_bracket(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    with_bracket(&state, path.id, |b| HttpResponse::Ok().json(&*b))
}

/// Matches with both entrants seated and no result yet.
#[get("/api/brackets/{id}/matches/ready")]
async fn api_ready_matches(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    with_bracket(&state, path.id, |b| HttpResponse::Ok().json(b.ready_matches()))
}

/// Record a match winner.
#[post("/api/brackets/{id}/results")]
async fn api_submit_result(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    with_bracket(&state, path.id, |b| match apply_result(b, &body.match_id, body.winner_id) {
        Ok(outcome) => HttpResponse::Ok().json(serde_json::json!({
            "outcome": outcome,
            "champion": b.champion(),
        })),
        Err(e) => error_response(&e),
    })
}

/// Decide one random ready match (demo helper).
#[post("/api/brackets/{id}/simulate")]
async fn api_simulate(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    with_bracket(&state, path.id, |b| {
        match play_random_match(b, &mut rand::thread_rng()) {
            Ok(outcome) => HttpResponse::Ok().json(outcome),
            Err(e) => error_response(&e),
        }
    })
}

/// Plain-data form for the caller to persist.
#[get("/api/brackets/{id}/export")]
async fn api_export(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    with_bracket(&state, path.id, |b| match serialize(b) {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    })
}

/// Load a previously exported bracket.
#[post("/api/brackets/import")]
async fn api_import(state: AppState, body: Json<serde_json::Value>) -> HttpResponse {
    match deserialize(body.into_inner()) {
        Ok(bracket) => insert(&state, bracket),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn options_from_env() -> BracketOptions {
    let defaults = BracketOptions::default();
    BracketOptions {
        max_entrants: std::env::var("MAX_ENTRANTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_entrants),
        max_rounds: std::env::var("MAX_ROUNDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_rounds),
        ..defaults
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    let options = options_from_env();
    log::info!("Starting server at http://{}:{} with {:?}", bind.0, bind.1, options);

    let state = Data::new(AppData {
        brackets: RwLock::new(HashMap::new()),
        options,
    });

    // Background task: every 30 minutes, remove brackets inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.brackets.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive bracket(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(4 * 1024 * 1024))
            .service(api_health)
            .service(api_import)
            .service(api_create_bracket)
            .service(api_get_bracket)
            .service(api_ready_matches)
            .service(api_submit_result)
            .service(api_simulate)
            .service(api_export)
    })
    .bind(bind)?
    .run()
    .await
}
