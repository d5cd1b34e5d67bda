use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State, rejection::JsonRejection},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::{Result, AppError};
use crate::api::models::{
    GenerationRequest, GenerationResponse, PlatformInfo, PlatformsResponse, ProviderInfo,
    ProvidersResponse,
};
use crate::llm::Provider;
use crate::platform::Platform;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/providers", get(providers_handler))
        .route("/api/platforms", get(platforms_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn generate_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected generation request");
        AppError::Validation(rejection.body_text())
    })?;

    info!(platform = %req.platform, "Processing generation request");
    let start_time = std::time::Instant::now();

    let result = state.generator.generate(&req).await;

    let elapsed = start_time.elapsed();
    match &result {
        Ok(_) => info!(platform = %req.platform, ?elapsed, "Generation succeeded"),
        Err(err) => error!(platform = %req.platform, ?elapsed, error = %err, "Error during content generation"),
    }

    result.map(Json)
}

async fn providers_handler() -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: Provider::ALL
            .into_iter()
            .map(|provider| ProviderInfo {
                name: provider,
                models: provider.models().to_vec(),
            })
            .collect(),
    })
}

async fn platforms_handler() -> Json<PlatformsResponse> {
    Json(PlatformsResponse {
        platforms: Platform::ALL
            .into_iter()
            .map(|platform| PlatformInfo {
                name: platform,
                instructions: platform.instructions(),
            })
            .collect(),
    })
}
