//! Administrative web server around the scoring engine. In-memory only.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pentathlon_scoring::{
    advance_winner, calculate, generate_bout_order, generate_de_bracket, seeds_from_ranking,
    AgeCategory, BracketBook, BracketError, BracketKey, CompetitionGroupId, Discipline, EventId,
    Gender, MatchResult, PerformanceInput, RankingResult, ScoreChangeEvent, ScoreNotifier,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// Bracket text slot per event, as a config store would hold it. The write guard is what
/// serializes concurrent edits to one event's brackets.
type BracketSlots = Data<RwLock<HashMap<EventId, String>>>;

type Notifier = Data<ScoreNotifier>;

/// Largest pool served by the bout-order endpoint.
const MAX_POOL_SIZE: usize = 64;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ScoreBody {
    competition_group_id: CompetitionGroupId,
    input: PerformanceInput,
}

#[derive(Deserialize)]
struct GenerateBracketBody {
    results: Vec<RankingResult>,
}

/// Path segments: event id and the bracket's group (e.g. /api/events/{id}/brackets/female/u17)
#[derive(Deserialize)]
struct BracketPath {
    event_id: EventId,
    gender: Gender,
    age_category: AgeCategory,
}

impl BracketPath {
    fn key(&self) -> BracketKey {
        BracketKey::new(self.gender, self.age_category)
    }
}

fn error_json(e: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

fn load_book(slots: &HashMap<EventId, String>, event_id: EventId) -> BracketBook {
    slots
        .get(&event_id)
        .map(|text| BracketBook::from_config_text(text))
        .unwrap_or_default()
}

fn store_book(
    slots: &mut HashMap<EventId, String>,
    event_id: EventId,
    book: &BracketBook,
) -> Result<(), BracketError> {
    slots.insert(event_id, book.to_config_text()?);
    Ok(())
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pentathlon-scoring",
    })
}

/// Score one performance and tell listeners the athlete's score changed.
#[post("/api/scores")]
async fn api_calculate_score(notifier: Notifier, body: Json<ScoreBody>) -> HttpResponse {
    let score = calculate(&body.input);
    notifier.emit(&ScoreChangeEvent::new(
        body.competition_group_id,
        score.discipline,
        [score.athlete_id],
    ));
    HttpResponse::Ok().json(score)
}

/// Ranking-round bout order for a pool of `n`.
#[get("/api/bout-order/{n}")]
async fn api_bout_order(path: Path<usize>) -> HttpResponse {
    let n = path.into_inner();
    if n > MAX_POOL_SIZE {
        return HttpResponse::BadRequest().json(error_json(format!(
            "Pool size must be at most {MAX_POOL_SIZE}"
        )));
    }
    HttpResponse::Ok().json(serde_json::json!({ "n": n, "bouts": generate_bout_order(n) }))
}

/// Seed from ranking results and create the group's bracket (once; reset to regenerate).
#[post("/api/events/{event_id}/brackets/{gender}/{age_category}")]
async fn api_generate_bracket(
    slots: BracketSlots,
    path: Path<BracketPath>,
    body: Json<GenerateBracketBody>,
) -> HttpResponse {
    let mut g = match slots.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let key = path.key();
    let mut book = load_book(&g, path.event_id);
    if book.get(&key).is_some() {
        return HttpResponse::BadRequest().json(error_json("Bracket already exists; reset it first"));
    }
    let seeds = seeds_from_ranking(&body.results);
    let bracket = match generate_de_bracket(path.event_id, &seeds) {
        Ok(b) => b,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    book.insert(key, bracket.clone());
    if let Err(e) = store_book(&mut g, path.event_id, &book) {
        return HttpResponse::InternalServerError().json(error_json(e));
    }
    log::info!("Created bracket {} for event {}", key, path.event_id);
    HttpResponse::Ok().json(bracket)
}

#[get("/api/events/{event_id}/brackets/{gender}/{age_category}")]
async fn api_get_bracket(slots: BracketSlots, path: Path<BracketPath>) -> HttpResponse {
    let g = match slots.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match load_book(&g, path.event_id).get(&path.key()) {
        Some(bracket) => HttpResponse::Ok().json(bracket),
        None => HttpResponse::NotFound().json(error_json("No bracket")),
    }
}

/// Record a bout result. Listeners hear about both fencers, or everyone once placements exist.
#[put("/api/events/{event_id}/brackets/{gender}/{age_category}/result")]
async fn api_submit_result(
    slots: BracketSlots,
    notifier: Notifier,
    path: Path<BracketPath>,
    body: Json<MatchResult>,
) -> HttpResponse {
    let mut g = match slots.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let key = path.key();
    let mut book = load_book(&g, path.event_id);
    let bracket = match book.get_mut(&key) {
        Some(b) => b,
        None => return HttpResponse::NotFound().json(error_json("No bracket")),
    };
    if let Err(e) = advance_winner(bracket, &body) {
        return HttpResponse::BadRequest().json(error_json(e));
    }
    let changed: Vec<_> = if bracket.placements.is_empty() {
        bracket
            .get_match(body.match_id)
            .map(|m| m.athletes().map(|a| a.athlete_id).collect())
            .unwrap_or_default()
    } else {
        bracket.placements.keys().copied().collect()
    };
    let response = HttpResponse::Ok().json(&*bracket);
    if let Err(e) = store_book(&mut g, path.event_id, &book) {
        return HttpResponse::InternalServerError().json(error_json(e));
    }
    drop(g);
    notifier.emit(&ScoreChangeEvent::new(
        path.key().group_id(path.event_id),
        Discipline::FencingDe,
        changed,
    ));
    response
}

/// Reset a group's bracket. Only that group's athletes are reported as changed.
#[delete("/api/events/{event_id}/brackets/{gender}/{age_category}")]
async fn api_reset_bracket(
    slots: BracketSlots,
    notifier: Notifier,
    path: Path<BracketPath>,
) -> HttpResponse {
    let mut g = match slots.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut book = load_book(&g, path.event_id);
    let cleared = book.reset(&path.key());
    if cleared.is_empty() {
        return HttpResponse::NotFound().json(error_json("No bracket"));
    }
    if let Err(e) = store_book(&mut g, path.event_id, &book) {
        return HttpResponse::InternalServerError().json(error_json(e));
    }
    drop(g);
    notifier.emit(&ScoreChangeEvent::new(
        path.key().group_id(path.event_id),
        Discipline::FencingDe,
        cleared.iter().copied(),
    ));
    HttpResponse::Ok().json(serde_json::json!({ "cleared_athletes": cleared }))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
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
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let slots = Data::new(RwLock::new(HashMap::<EventId, String>::new()));
    let notifier = Data::new(ScoreNotifier::new());
    notifier.subscribe(|event| {
        log::info!(
            "Scores changed: {} for {} athlete(s) in group {}",
            event.discipline,
            event.athlete_ids.len(),
            event.competition_group_id
        );
    });

    let app_notifier = notifier.clone();
    let result = HttpServer::new(move || {
        App::new()
            .app_data(slots.clone())
            .app_data(app_notifier.clone())
            .service(api_health)
            .service(api_calculate_score)
            .service(api_bout_order)
            .service(api_generate_bracket)
            .service(api_get_bracket)
            .service(api_submit_result)
            .service(api_reset_bracket)
    })
    .bind(bind)?
    .run()
    .await;

    notifier.shutdown();
    result
}
