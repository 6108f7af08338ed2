//! JSON web API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::ai::weighted::{choose_computer_action, ComputerChoice};
use crate::config::AppConfig;
use crate::core::battle::resolve_action;
use crate::core::state::{BattleAction, Combatant};
use crate::core::utils::rng_source;
use crate::data::creature::Creature;
use crate::data::pagination::PageCursor;
use crate::error::{BattleError, LookupError};
use crate::service::CreatureService;

/// Random source shared by the battle endpoints.
pub type RandomSource = Box<dyn FnMut() -> f64 + Send>;

pub struct AppState {
    pub service: CreatureService,
    pub config: AppConfig,
    rng: Mutex<RandomSource>,
}

impl AppState {
    pub fn new(service: CreatureService, config: AppConfig) -> Self {
        let rng: RandomSource = Box::new(rng_source(config.seed));
        Self::with_rng(service, config, rng)
    }

    /// Uses the given random source for every battle endpoint.
    pub fn with_rng(service: CreatureService, config: AppConfig, rng: RandomSource) -> Self {
        Self {
            service,
            config,
            rng: Mutex::new(rng),
        }
    }

    fn with_random<T>(&self, f: impl FnOnce(&mut dyn FnMut() -> f64) -> T) -> Result<T, ApiError> {
        let mut guard = self
            .rng
            .lock()
            .map_err(|_| ApiError::Internal("random source poisoned".into()))?;
        Ok(f(&mut **guard))
    }
}

/// All routes, without middleware.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/pokemon", get(list_pokemon))
        .route("/api/pokemon/{name}", get(get_pokemon))
        .route("/api/search", get(search_pokemon))
        .route("/api/pokemon-list", get(pokemon_names))
        .route("/api/battle/pokemon/{name}", get(battle_pokemon))
        .route("/api/battle/computer-action", post(computer_action))
        .route("/api/battle/simulate", post(simulate))
        .fallback(not_found)
}

/// Routes with tracing and permissive CORS, bound to `state`.
pub fn app(state: Arc<AppState>) -> Router {
    routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// =============================================================================
// Views
// =============================================================================

/// A creature as the front-end renders it: metres and kilograms.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatureView {
    pub id: u32,
    pub name: String,
    pub height: f64,
    pub weight: f64,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub base_experience: u32,
    pub sprite_url: Option<String>,
    pub description: Option<String>,
}

impl From<&Creature> for CreatureView {
    fn from(c: &Creature) -> Self {
        Self {
            id: c.id,
            name: c.display_name(),
            height: c.height_m(),
            weight: c.weight_kg(),
            types: c.types.clone(),
            abilities: c.abilities.clone(),
            base_experience: c.base_experience,
            sprite_url: c.sprite_url.clone(),
            description: c.description.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub total_count: u32,
    pub current_count: usize,
}

impl PaginationView {
    fn new(cursor: &PageCursor, current_count: usize) -> Self {
        Self {
            current_page: cursor.current_page(),
            total_pages: cursor.total_pages(),
            has_next: cursor.has_next(),
            has_previous: cursor.has_previous(),
            total_count: cursor.count(),
            current_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse {
    pub pokemon: Vec<CreatureView>,
    pub pagination: PaginationView,
}

// =============================================================================
// Browse & search
// =============================================================================

async fn health() -> &'static str {
    "OK"
}

/// Query values arrive as strings so malformed numbers fall back to defaults.
#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

async fn list_pokemon(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Json<PageResponse> {
    let page = query
        .page
        .and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(1)
        .max(1);
    let limit = query
        .limit
        .and_then(|l| l.trim().parse::<u32>().ok())
        .unwrap_or(state.config.web_page_size);
    let limit = state.config.clamp_limit(limit);
    let offset = (page - 1).saturating_mul(limit);

    let result = state.service.compose_page(offset, limit).await;
    let pokemon: Vec<CreatureView> = result.creatures.iter().map(CreatureView::from).collect();
    let pagination = PaginationView::new(&result.cursor, pokemon.len());
    Json(PageResponse { pokemon, pagination })
}

async fn get_pokemon(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CreatureView>, ApiError> {
    let creature = state
        .service
        .search_by_name(&name)
        .await
        .map_err(|e| match e {
            LookupError::EmptyQuery => ApiError::BadRequest(e.to_string()),
            LookupError::NotFound(_) => ApiError::NotFound("Pokemon not found".into()),
        })?;
    Ok(Json(CreatureView::from(&creature)))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_pokemon(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let q = query.q.trim().to_lowercase();
    match state.service.search_by_name(&q).await {
        Ok(creature) => Ok(Json(json!({
            "pokemon": CreatureView::from(&creature),
            "found": true,
        }))),
        Err(LookupError::EmptyQuery) => {
            Err(ApiError::BadRequest("Search query is required".into()))
        }
        Err(e @ LookupError::NotFound(_)) => Ok(Json(json!({
            "found": false,
            "message": e.to_string(),
        }))),
    }
}

async fn pokemon_names(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let names = state
        .service
        .list_names(state.config.battle_roster_size)
        .await;
    Json(json!({ "pokemon": names }))
}

// =============================================================================
// Battle
// =============================================================================

async fn battle_pokemon(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Combatant>, ApiError> {
    let combatant = state
        .service
        .battle_combatant(&name)
        .await
        .map_err(|e| match e {
            LookupError::EmptyQuery => ApiError::BadRequest(e.to_string()),
            LookupError::NotFound(_) => ApiError::NotFound("Pokemon not found".into()),
        })?;
    Ok(Json(combatant))
}

#[derive(Debug, Deserialize)]
pub struct ComputerActionRequest {
    pub computer_pokemon: Combatant,
    pub player_pokemon: Combatant,
}

async fn computer_action(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ComputerActionRequest>, JsonRejection>,
) -> Result<Json<ComputerChoice>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let own = request.computer_pokemon.normalized();
    let opponent = request.player_pokemon.normalized();
    let choice = state.with_random(|rng| choose_computer_action(&own, &opponent, rng))?;
    Ok(Json(choice))
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub action: String,
    pub attacker: Combatant,
    pub defender: Combatant,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub action: BattleAction,
    pub damage: u32,
    pub healed: u32,
    pub new_hp: u32,
    pub fainted: bool,
    pub defended: bool,
    pub move_name: Option<String>,
    pub battle_log: String,
    pub attacker: Combatant,
    pub defender: Combatant,
}

async fn simulate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let action: BattleAction = request.action.parse()?;
    let mut attacker = request.attacker.normalized();
    let mut defender = request.defender.normalized();
    attacker.begin_turn();

    let outcome =
        state.with_random(|rng| resolve_action(action, &mut attacker, &mut defender, rng))??;
    Ok(Json(SimulateResponse {
        action: outcome.action,
        damage: outcome.damage,
        healed: outcome.healed,
        new_hp: outcome.new_hp,
        fainted: outcome.fainted,
        defended: outcome.defended,
        move_name: outcome.move_name,
        battle_log: outcome.log,
        attacker,
        defender,
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".into())
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<BattleError> for ApiError {
    fn from(e: BattleError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
