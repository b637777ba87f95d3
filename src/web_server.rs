use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::future::join_all;
use minijinja::{context, path_loader, Environment};
use minijinja_autoreload::AutoReloader;
use thiserror::Error;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::constants::{
    FALLBACK_CONCEPTS, FALLBACK_PITCHES, GENERATION_TEMPERATURE, PLACEHOLDER_IMAGE,
};
use crate::llm_interaction::{GenerativeClient, ResponseFormat, UpstreamError};
use crate::models::{
    ChatRequest, Concept, ConceptResponse, ErrorResponse, PitchConcept, PitchRequest,
    PitchResponse,
};
use crate::parse::{self, ParseError};
use crate::prompt;

/// Why a generation attempt degraded to the fallback batch. Carried into the
/// response's advisory `error` field, never surfaced as an HTTP failure.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    client: Arc<GenerativeClient>,
    templates: Arc<AutoReloader>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let client = GenerativeClient::new(&config);
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
            templates: Arc::new(create_minijinja_env()),
        }
    }
}

// Minijinja Environment setup. AutoReloader so template edits show up
// without a restart during development.
fn create_minijinja_env() -> AutoReloader {
    AutoReloader::new(|notifier| {
        let mut env = Environment::new();
        env.set_loader(path_loader("templates"));
        notifier.watch_path("templates", true);
        Ok(env)
    })
}

fn render_page(state: &AppState, name: &str, title: &str) -> Response {
    let rendered = state.templates.acquire_env().and_then(|env| {
        env.get_template(name).and_then(|tmpl| {
            tmpl.render(context! {
                title => title,
                placeholder => PLACEHOLDER_IMAGE,
            })
        })
    });

    match rendered {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!("Failed to get or render template {}: {}", name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Internal Server Error: {e}")),
            )
                .into_response()
        }
    }
}

async fn design_page(State(state): State<AppState>) -> Response {
    render_page(&state, "design_assistant.html", "Design Your Merch")
}

async fn pitch_page(State(state): State<AppState>) -> Response {
    render_page(&state, "pitch_pack.html", "Pitch Pack Generator")
}

/// The single generation pipeline both API routes share: one chat
/// completion, then route-specific parsing. The caller degrades any error
/// to its fallback batch.
async fn run_generation<T, P>(
    state: &AppState,
    system_prompt: String,
    user_prompt: String,
    response_format: Option<ResponseFormat>,
    parse: P,
) -> Result<Vec<T>, GenerationError>
where
    P: FnOnce(&str) -> Result<Vec<T>, ParseError>,
{
    let raw = state
        .client
        .complete_chat(
            &system_prompt,
            &user_prompt,
            GENERATION_TEMPERATURE,
            response_format,
        )
        .await?;
    Ok(parse(&raw)?)
}

/// Fan out one image call per concept and join in concept order. A single
/// failure downgrades only that concept to the placeholder.
async fn attach_images(client: &GenerativeClient, concepts: &mut [Concept]) {
    let requests: Vec<_> = concepts
        .iter()
        .map(|concept| client.generate_image(&concept.description))
        .collect();
    let results = join_all(requests).await;

    for (index, (concept, result)) in concepts.iter_mut().zip(results).enumerate() {
        match result {
            Ok(url) => concept.image = url,
            Err(e) => {
                warn!(
                    "Image generation failed for concept {} ({}): {}",
                    index + 1,
                    concept.title,
                    e
                );
                concept.image = PLACEHOLDER_IMAGE.to_string();
            }
        }
    }
}

async fn generate_design_batch(
    state: &AppState,
    prompt_text: &str,
    style: Option<&str>,
) -> Result<Vec<Concept>, GenerationError> {
    let mut concepts = run_generation(
        state,
        prompt::design_system_prompt(style),
        prompt::design_user_prompt(prompt_text),
        None,
        |raw| parse::parse_design_concepts(raw, style),
    )
    .await?;

    if state.config.enable_images {
        attach_images(&state.client, &mut concepts).await;
    }
    Ok(concepts)
}

async fn generate_pitch_batch(
    state: &AppState,
    prompt_text: &str,
    tone: Option<&str>,
) -> Result<Vec<PitchConcept>, GenerationError> {
    run_generation(
        state,
        prompt::pitch_system_prompt(),
        prompt::pitch_user_prompt(prompt_text, tone),
        Some(ResponseFormat::json_object()),
        parse::parse_pitch_concepts,
    )
    .await
}

async fn chat_api(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let prompt_text = request.prompt.trim();
    if prompt_text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Prompt is required".to_string(),
            }),
        )
            .into_response();
    }
    let style = request
        .style
        .as_deref()
        .map(str::trim)
        .filter(|style| !style.is_empty());

    match generate_design_batch(&state, prompt_text, style).await {
        Ok(concepts) => (
            StatusCode::OK,
            Json(ConceptResponse {
                concepts,
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            warn!("Design generation failed, serving fallback concepts: {}", e);
            (
                StatusCode::OK,
                Json(ConceptResponse {
                    concepts: FALLBACK_CONCEPTS.clone(),
                    error: Some(format!("Generation failed: {e}")),
                }),
            )
                .into_response()
        }
    }
}

async fn pitch_api(State(state): State<AppState>, Json(request): Json<PitchRequest>) -> Response {
    let prompt_text = request.prompt.trim();
    if prompt_text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Prompt is required".to_string(),
            }),
        )
            .into_response();
    }
    let tone = request
        .tone
        .as_deref()
        .map(str::trim)
        .filter(|tone| !tone.is_empty());

    match generate_pitch_batch(&state, prompt_text, tone).await {
        Ok(concepts) => (
            StatusCode::OK,
            Json(PitchResponse {
                concepts,
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            warn!("Pitch generation failed, serving fallback pitches: {}", e);
            (
                StatusCode::OK,
                Json(PitchResponse {
                    concepts: FALLBACK_PITCHES.clone(),
                    error: Some(format!("Generation failed: {e}")),
                }),
            )
                .into_response()
        }
    }
}

/// Build the application router. Kept separate from the serve loop so tests
/// can mount it directly.
pub fn build_router(state: AppState) -> Router {
    // Serve static files from the `static` directory with a plain 404 for
    // anything that does not exist there.
    let static_files_service = ServeDir::new("static").not_found_service(tower::service_fn(
        |_req: axum::http::Request<axum::body::Body>| async {
            Ok::<_, std::convert::Infallible>(
                hyper::Response::builder()
                    .status(hyper::StatusCode::NOT_FOUND)
                    .body(axum::body::Body::from("Not Found"))
                    .unwrap(),
            )
        },
    ));

    Router::new()
        .route("/", get(design_page))
        .route("/pitch-pack", get(pitch_page))
        .route("/api/chat", post(chat_api))
        .route("/api/generate-pitch", post(pitch_api))
        .nest_service("/static", static_files_service)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {addr}"))?;

    axum::serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
