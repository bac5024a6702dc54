//! Single binary web server: REST API over the Super 8 library.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set DATA_DIR to keep tournaments as JSON files; otherwise they live in memory.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use beach_super8::config::ServerConfig;
use beach_super8::store::{
    find_player, list_players, register_player, roster_from_registry, validate_stored_code,
    RosterEntry,
};
use beach_super8::{
    clear_match_result, finish_tournament, general_ranking, generate_unique_code,
    record_match_result, report, standings, start_tournament, statistics, tournament_history,
    JsonFileStore, MemoryStore, StoreError, Tournament, TournamentError, TournamentStore,
};
use serde::Deserialize;
use std::sync::RwLock;

type SharedStore = Box<dyn TournamentStore + Send + Sync>;

/// The store behind one lock: at most one mutation per tournament in flight.
type AppState = Data<RwLock<SharedStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    /// Generated when absent.
    #[serde(default)]
    code: Option<String>,
    /// Resolved against the player registry, so known names keep their id.
    players: Vec<RosterEntry>,
}

#[derive(Deserialize)]
struct RegisterPlayerBody {
    name: String,
}

/// Query for the tournament list (e.g. /api/tournaments?finished=true)
#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default)]
    finished: bool,
}

#[derive(Deserialize)]
struct PlayerPath {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    points_a: u8,
    points_b: u8,
}

/// Path segment: join code (e.g. /api/tournaments/{code})
#[derive(Deserialize)]
struct TournamentPath {
    code: String,
}

/// Path segments: join code, round number and match index.
#[derive(Deserialize)]
struct MatchPath {
    code: String,
    round: u8,
    index: usize,
}

fn error_json(message: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn store_error(e: StoreError) -> HttpResponse {
    match e {
        StoreError::InvalidCode(_) | StoreError::Tournament(TournamentError::BlankPlayerName) => {
            HttpResponse::BadRequest().json(error_json(e))
        }
        _ => {
            log::error!("Store failure: {}", e);
            HttpResponse::InternalServerError().json(error_json(e))
        }
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(error_json("No tournament"))
}

/// Load, apply one operation, save back, answer with the updated tournament.
fn mutate<F>(state: &AppState, code: &str, op: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut t = match store.load(code) {
        Ok(Some(t)) => t,
        Ok(None) => return not_found(),
        Err(e) => return store_error(e),
    };
    if let Err(e) = op(&mut t) {
        return HttpResponse::BadRequest().json(error_json(e));
    }
    match store.save(&t) {
        Ok(()) => HttpResponse::Ok().json(&t),
        Err(e) => store_error(e),
    }
}

/// Load read-only and render.
fn view<F>(state: &AppState, code: &str, render: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.load(code) {
        Ok(Some(t)) => render(&t),
        Ok(None) => not_found(),
        Err(e) => store_error(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "beach-super8",
    })
}

/// Create a tournament from 8 players in schedule order; rounds are generated immediately.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let body = body.into_inner();
    let code = match body.code.map(|c| c.trim().to_string()) {
        Some(code) if !code.is_empty() => {
            match store.exists(&code) {
                Ok(false) => code,
                Ok(true) => {
                    return HttpResponse::Conflict().json(error_json("Code already in use"))
                }
                Err(e) => return store_error(e),
            }
        }
        _ => match generate_unique_code(&mut rand::thread_rng(), |c| store.exists(c)) {
            Ok(Some(code)) => code,
            Ok(None) => {
                return HttpResponse::ServiceUnavailable()
                    .json(error_json("No free tournament code, try again"))
            }
            Err(e) => return store_error(e),
        },
    };
    let roster = match roster_from_registry(&**store, &body.players) {
        Ok(roster) => roster,
        Err(e) => return store_error(e),
    };
    let tournament = match start_tournament(code, roster.players.clone()) {
        Ok(t) => t,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    if let Err(e) = roster.register(&mut **store) {
        return store_error(e);
    }
    match store.save(&tournament) {
        Ok(()) => HttpResponse::Ok().json(&tournament),
        Err(e) => store_error(e),
    }
}

/// Tournament history, newest first. `?finished=true` keeps closed ones only.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, query: Query<HistoryQuery>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.list() {
        Ok(all) => HttpResponse::Ok().json(tournament_history(&all, query.finished)),
        Err(e) => store_error(e),
    }
}

#[get("/api/tournaments/{code}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, &path.code, |t| HttpResponse::Ok().json(t))
}

/// Check a join code before entering (empty / not_found / finished / valid).
#[get("/api/tournaments/{code}/validate")]
async fn api_validate_code(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match validate_stored_code(&**store, &path.code) {
        Ok(v) => HttpResponse::Ok().json(serde_json::json!({ "validation": v })),
        Err(e) => store_error(e),
    }
}

/// Record or correct a match score.
#[put("/api/tournaments/{code}/rounds/{round}/matches/{index}")]
async fn api_record_score(state: AppState, path: Path<MatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    mutate(&state, &path.code, |t| {
        record_match_result(t, path.round, path.index, body.points_a, body.points_b)
    })
}

/// Clear a match score (back to pending).
#[delete("/api/tournaments/{code}/rounds/{round}/matches/{index}")]
async fn api_clear_score(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    mutate(&state, &path.code, |t| clear_match_result(t, path.round, path.index))
}

#[post("/api/tournaments/{code}/rounds/next")]
async fn api_next_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, &path.code, Tournament::next_round)
}

#[post("/api/tournaments/{code}/rounds/previous")]
async fn api_previous_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, &path.code, Tournament::previous_round)
}

/// Close the tournament; totals are frozen and winners stored.
#[post("/api/tournaments/{code}/finish")]
async fn api_finish_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, &path.code, finish_tournament)
}

#[get("/api/tournaments/{code}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, &path.code, |t| {
        let s = standings(t);
        HttpResponse::Ok().json(serde_json::json!({
            "standings": s.entries,
            "tie_for_first": s.has_tie_for_first(),
        }))
    })
}

#[get("/api/tournaments/{code}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, &path.code, |t| {
        let mut buf = Vec::new();
        match report::write_standings_csv(&standings(t), &mut buf) {
            Ok(()) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .body(buf),
            Err(e) => HttpResponse::InternalServerError().json(error_json(e)),
        }
    })
}

/// General ranking over all finished tournaments.
#[get("/api/ranking")]
async fn api_ranking(state: AppState) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.list() {
        Ok(all) => HttpResponse::Ok().json(general_ranking(&all)),
        Err(e) => store_error(e),
    }
}

#[get("/api/statistics")]
async fn api_statistics(state: AppState) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.list() {
        Ok(all) => HttpResponse::Ok().json(statistics(&all)),
        Err(e) => store_error(e),
    }
}

/// Register a player (or get the existing one with that name).
#[post("/api/players")]
async fn api_register_player(state: AppState, body: Json<RegisterPlayerBody>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match register_player(&mut **store, &body.name) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => store_error(e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match list_players(&**store) {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => store_error(e),
    }
}

#[get("/api/players/{name}")]
async fn api_get_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match find_player(&**store, &path.name) {
        Ok(Some(player)) => HttpResponse::Ok().json(player),
        Ok(None) => HttpResponse::NotFound().json(error_json("No player")),
        Err(e) => store_error(e),
    }
}

fn open_store(config: &ServerConfig) -> std::io::Result<SharedStore> {
    match &config.data_dir {
        Some(dir) => {
            let store = JsonFileStore::open(dir)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            Ok(Box::new(store))
        }
        None => {
            log::warn!("DATA_DIR not set; tournaments are kept in memory only");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let state: AppState = Data::new(RwLock::new(open_store(&config)?));

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_validate_code)
            .service(api_standings_csv)
            .service(api_standings)
            .service(api_next_round)
            .service(api_previous_round)
            .service(api_finish_tournament)
            .service(api_record_score)
            .service(api_clear_score)
            .service(api_get_tournament)
            .service(api_ranking)
            .service(api_statistics)
            .service(api_register_player)
            .service(api_list_players)
            .service(api_get_player)
    })
    .bind(bind)?
    .run()
    .await
}
