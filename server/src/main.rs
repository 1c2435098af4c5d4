mod api;
mod auth;
mod config;
mod db;
mod error;
mod models;
mod schema;
mod store;
mod telemetry;

use axum::extract::{FromRef, MatchedPath};
use axum::http::Request;
use axum::Router;
use smartchef_core::{create_provider, LlmConfig, LlmProvider};
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
use crate::store::{MemoryStore, PgStore, UserStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub provider: Arc<dyn LlmProvider>,
    pub session_ttl: chrono::Duration,
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::testing::router())
        .merge(api::public::router())
        .merge(api::smart_recipe::router())
        .nest("/api/meal-plan", api::meal_plan::router())
        .nest("/api/recipes", api::recipes::router())
        .nest("/api/users", api::users::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Don't create a span at all for liveness checks
                    if matched_path == "/ping" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    telemetry::init_telemetry();

    let config = ServerConfig::from_env()?;
    let llm_config = LlmConfig::from_env()?;

    let store: Arc<dyn UserStore> = match &config.database_url {
        Some(database_url) => Arc::new(PgStore::new(db::create_pool(database_url)?)),
        None => {
            tracing::warn!("DATABASE_URL not set, accounts and saved items are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let provider = create_provider(&llm_config);
    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        "Text-generation provider configured"
    );

    let state = AppState {
        store,
        provider,
        session_ttl: config.session_ttl,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!("Swagger UI available at /swagger-ui/");
    tracing::info!("OpenAPI spec available at /api-docs/openapi.json");

    axum::serve(listener, app(state)).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::store::{Account, NewAccount};
    use axum::body::to_bytes;
    use axum::response::{IntoResponse, Response};
    use smartchef_core::FakeProvider;

    pub fn state_with(provider: Arc<FakeProvider>) -> AppState {
        AppState {
            store: Arc::new(MemoryStore::new()),
            provider,
            session_ttl: chrono::Duration::days(7),
        }
    }

    pub async fn account(state: &AppState, email: &str) -> Account {
        state
            .store
            .create_account(NewAccount {
                name: "Test Cook".to_string(),
                email: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
            })
            .await
            .unwrap()
    }

    /// Split a handler result into status and parsed JSON body.
    pub async fn into_parts(response: impl IntoResponse) -> (u16, serde_json::Value) {
        let response: Response = response.into_response();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}
