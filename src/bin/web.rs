//! Single binary web server: in-memory tournament store over a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS (idle tournaments are dropped after this long).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_engine_web::{
    advance_swiss_round, assign_schedule, champion, compute_standings, import_players_csv,
    record_match_result, scheduling_summary, standings_csv, start_tournament, upcoming_matches,
    MatchId, MatchResult, PlayerId, PointsPolicy, RandomIds, Tournament, TournamentError,
    TournamentFormat, TournamentId,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory store: many tournaments by id. The write lock also guarantees at
/// most one round generation in flight per tournament.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    name: String,
    /// Format by name so unknown values get a readable error.
    #[serde(default = "default_format")]
    format: String,
    #[serde(default)]
    points: PointsPolicy,
    #[serde(default)]
    swiss_rounds: Option<u32>,
    #[serde(default)]
    draw_seed: Option<u64>,
}

fn default_format() -> String {
    TournamentFormat::SingleElimination.as_str().to_string()
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct ScheduleBody {
    scheduled_at: DateTime<Utc>,
    #[serde(default)]
    resource_id: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run `f` on a tournament under the write lock, refreshing its activity time.
/// On success the whole tournament is returned.
fn update<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match f(t) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Run `f` on a tournament under the read lock.
fn view<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&id) {
        Some(entry) => f(&entry.tournament),
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-engine-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let format: TournamentFormat = match body.format.parse() {
        Ok(f) => f,
        Err(e) => return error_response(e),
    };
    let mut tournament = Tournament::new(body.name.trim(), format);
    tournament.points = body.points;
    tournament.swiss_rounds = body.swiss_rounds.map(|n| n.max(1));
    tournament.draw_seed = body.draw_seed;
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created tournament {} ({})", id, format);
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update(&state, path.id, |_| Ok(()))
}

/// Add a player (tournament must be in Setup).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(state: AppState, path: Path<TournamentPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    update(&state, path.id, |t| t.add_player(body.name.trim()).map(|_| ()))
}

/// Add players from a CSV body, one name per row. A rejected name leaves the player list unchanged.
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let names = match import_players_csv(body.as_bytes()) {
        Ok(names) => names,
        Err(e) => return error_response(e),
    };
    update(&state, path.id, |t| t.add_players(names).map(|_| ()))
}

/// Remove a player by id (tournament must be in Setup).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    update(&state, path.id, |t| t.remove_player(path.player_id))
}

/// Update the points policy (tournament must be in Setup).
#[put("/api/tournaments/{id}/points")]
async fn api_set_points(state: AppState, path: Path<TournamentPath>, body: Json<PointsPolicy>) -> HttpResponse {
    update(&state, path.id, |t| t.set_points(*body))
}

/// Start the tournament: draws the bracket or first round.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update(&state, path.id, |t| {
        let mut rng = t.draw_rng();
        start_tournament(t, &mut rng, &mut RandomIds)
    })
}

/// Record a match result.
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchResult>,
) -> HttpResponse {
    let result = body.into_inner();
    update(&state, path.id, |t| record_match_result(t, path.match_id, result))
}

/// Assign a time, resource and location to a match.
#[put("/api/tournaments/{id}/matches/{match_id}/schedule")]
async fn api_schedule_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScheduleBody>,
) -> HttpResponse {
    let body = body.into_inner();
    update(&state, path.id, |t| {
        assign_schedule(t, path.match_id, body.scheduled_at, body.resource_id, body.location)
    })
}

/// Generate the next Swiss round (all current results must be in).
#[post("/api/tournaments/{id}/rounds/next")]
async fn api_next_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update(&state, path.id, |t| advance_swiss_round(t, &mut RandomIds))
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| {
        HttpResponse::Ok().json(serde_json::json!({
            "standings": compute_standings(t),
            "champion": champion(t),
        }))
    })
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| match standings_csv(t) {
        Ok(body) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(body),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    })
}

#[get("/api/tournaments/{id}/matches/upcoming")]
async fn api_upcoming_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(upcoming_matches(t)))
}

#[get("/api/tournaments/{id}/schedule")]
async fn api_scheduling_summary(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(scheduling_summary(t)))
}

/// Restart tournament: back to Setup with the same players.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    update(&state, path.id, |t| t.restart_tournament())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_inactivity_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let inactivity_hours: u64 = std::env::var("INACTIVITY_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_inactivity_hours);
    let inactivity_timeout = Duration::from_secs(inactivity_hours * 3600);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments idle past the timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    inactivity_hours
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_set_points)
            .service(api_start_tournament)
            .service(api_record_result)
            .service(api_schedule_match)
            .service(api_next_round)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_upcoming_matches)
            .service(api_scheduling_summary)
            .service(api_restart_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
