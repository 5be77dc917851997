mod assets;

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::{
    comparison::Comparator,
    countries::Country,
    report::population_caption,
    scenario::Contender,
};

pub struct WebServerConfig {
    pub comparator: Comparator,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulateBody {
    pub contender: Contender,
    pub incumbent: Contender,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<Country>,
    pub defaults: Option<[String; 2]>,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub caption: String,
}

pub fn router(state: Arc<Comparator>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/:file", get(static_file))
        .route("/api/countries", get(countries))
        .route("/api/simulate", post(run_simulation))
        .route("/api/format", get(format_population))
        .with_state(state)
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        comparator,
        host,
        port,
    } = config;

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;

    log::info!(
        "serving {} countries, locale {}, cap {} periods",
        comparator.directory().len(),
        comparator.locale(),
        comparator.max_periods()
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("overtake UI live at http://{addr} (Ctrl+C to stop)");

    axum::serve(listener, router(Arc::new(comparator)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    log::info!("shutting down web UI");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn static_file(Path(file): Path<String>) -> Response {
    match assets::find(&file) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn countries(State(state): State<Arc<Comparator>>) -> Json<CountriesResponse> {
    let defaults = state
        .directory()
        .default_pair()
        .map(|(a, b)| [a.to_string(), b.to_string()]);
    Json(CountriesResponse {
        countries: state.directory().countries().to_vec(),
        defaults,
    })
}

async fn run_simulation(
    State(state): State<Arc<Comparator>>,
    Json(body): Json<SimulateBody>,
) -> Response {
    match state.compare(&body.contender, &body.incumbent) {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            log::debug!("rejected comparison: {err}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: err.kind(),
                    message: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn format_population(
    State(state): State<Arc<Comparator>>,
    Query(query): Query<FormatQuery>,
) -> Json<FormatResponse> {
    Json(FormatResponse {
        caption: population_caption(query.value, state.locale()),
    })
}
