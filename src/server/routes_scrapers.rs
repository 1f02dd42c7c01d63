use crate::error::ScrapeError;
use crate::scraper::{
    ScrapedPerformer, ScrapedPerformerInput, ScrapedScene, SceneInput, ScraperSummary,
};
use crate::server::AppContext;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use scrapeforged_common::ScrapeContentType;
use serde::{Deserialize, Serialize};

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn scraper_routes() -> Router<AppContext> {
    Router::new()
        .route("/scrapers", get(list_scrapers))
        .route("/scrapers/failures", get(list_failures))
        .route("/scrapers/:id/performers/search", post(search_performers))
        .route("/scrapers/:id/performer", post(scrape_performer))
        .route("/scrapers/:id/scene", post(scrape_scene))
        .route("/scrape/performer-url", post(scrape_performer_url))
        .route("/scrape/scene-url", post(scrape_scene_url))
}

fn error_response(e: ScrapeError) -> (StatusCode, String) {
    let status = match &e {
        ScrapeError::NotFound(_) => StatusCode::NOT_FOUND,
        ScrapeError::Unsupported { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Scrape failed: {:#}", e);
    }

    (status, e.to_string())
}

#[derive(Deserialize)]
struct ListScrapersQuery {
    kind: Option<ScrapeContentType>,
}

async fn list_scrapers(
    State(ctx): State<AppContext>,
    Query(params): Query<ListScrapersQuery>,
) -> ApiResult<Vec<ScraperSummary>> {
    let summaries = match params.kind {
        Some(kind) => ctx.dispatcher.list_scrapers(kind),
        None => ctx
            .dispatcher
            .registry()
            .scrapers()
            .map(|all| all.iter().map(|s| s.summary()).collect()),
    };

    summaries.map(Json).map_err(error_response)
}

#[derive(Serialize)]
struct FailureResponse {
    path: String,
    reason: String,
}

async fn list_failures(State(ctx): State<AppContext>) -> ApiResult<Vec<FailureResponse>> {
    let failures = ctx
        .dispatcher
        .registry()
        .failures()
        .map_err(error_response)?;

    Ok(Json(
        failures
            .iter()
            .map(|f| FailureResponse {
                path: f.path.display().to_string(),
                reason: f.reason.clone(),
            })
            .collect(),
    ))
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
}

async fn search_performers(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Vec<ScrapedPerformer>> {
    ctx.dispatcher
        .scrape_performer_list(&id, &request.query)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn scrape_performer(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(input): Json<ScrapedPerformerInput>,
) -> ApiResult<Option<ScrapedPerformer>> {
    ctx.dispatcher
        .scrape_performer(&id, &input)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn scrape_scene(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(input): Json<SceneInput>,
) -> ApiResult<Option<ScrapedScene>> {
    ctx.dispatcher
        .scrape_scene(&id, &input)
        .await
        .map(Json)
        .map_err(error_response)
}

#[derive(Deserialize)]
struct UrlRequest {
    url: String,
}

async fn scrape_performer_url(
    State(ctx): State<AppContext>,
    Json(request): Json<UrlRequest>,
) -> ApiResult<Option<ScrapedPerformer>> {
    ctx.dispatcher
        .scrape_performer_url(&request.url)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn scrape_scene_url(
    State(ctx): State<AppContext>,
    Json(request): Json<UrlRequest>,
) -> ApiResult<Option<ScrapedScene>> {
    ctx.dispatcher
        .scrape_scene_url(&request.url)
        .await
        .map(Json)
        .map_err(error_response)
}
