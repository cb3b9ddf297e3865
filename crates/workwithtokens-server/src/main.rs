use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use workwithtokens::{EmbeddingService, LlmProvider};

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;

use adapters::{
    AnthropicClient, OpenAiAssistantsClient, OpenAiChatClient, OpenAiEmbeddingClient, OpenAiHttp,
    OpenAiResponsesClient, PgUserRepository, TiktokenCounter, VoyageEmbeddingClient,
};
use application::{ChatService, FineTuneService, LoginService, RagService, VectorService};
use auth::JwtManager;
use config::AppConfig;

/// Type aliases for application services with concrete adapter implementations
pub type AppLoginService = LoginService<PgUserRepository>;
pub type AppRagService = RagService<OpenAiAssistantsClient>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub login_service: Arc<AppLoginService>,
    pub jwt: Arc<JwtManager>,
    pub chat_service: Arc<ChatService>,
    pub vector_service: Arc<VectorService>,
    pub rag_service: Option<Arc<AppRagService>>,
    pub fine_tune_service: Option<Arc<FineTuneService>>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "WorkWithTokens API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    match frontend_url.map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Some(Err(e)) => {
            tracing::warn!("⚠️  Invalid FRONTEND_URL ({}), allowing any origin", e);
            CorsLayer::permissive()
        }
        None => CorsLayer::permissive(),
    }
}

/// Full HTTP application: public routes, JWT-protected routes, docs and
/// the optional static frontend
fn build_router(state: AppState, frontend_url: Option<&str>, static_dir: &Path) -> Router {
    // Protected routes (require a valid access token)
    let protected_routes = Router::new()
        .merge(routes::chat::router())
        .merge(routes::embedding::router())
        .merge(routes::rag::router())
        .merge(routes::fine_tune::router())
        .layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            auth::require_jwt,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::login::router())
        .merge(protected_routes);

    if static_dir.is_dir() {
        tracing::info!("🗂️  Serving static files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_url))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    tracing::info!("🪙 WorkWithTokens API initializing...");

    let config = AppConfig::from_env()?;

    if config.jwt.uses_default_secret {
        tracing::warn!("⚠️  No JWT_SECRET set - using the development secret");
    }

    // Database
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(config.database.connect_options()?)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    tracing::info!("✅ Database migrations completed");

    let jwt = Arc::new(JwtManager::new(&config.jwt));
    let login_service = Arc::new(LoginService::new(
        Arc::new(PgUserRepository::new(pool)),
        jwt.clone(),
    ));

    // Claude
    let claude: Option<Arc<dyn LlmProvider>> = config.anthropic.as_ref().map(|c| {
        tracing::info!("🤖 Claude initialized ({})", c.settings.model);
        let mut client =
            AnthropicClient::new(c.api_key.clone(), c.version.clone(), c.settings.clone());
        if let Some(base_url) = &c.base_url {
            client = client.with_base_url(base_url.clone());
        }
        Arc::new(client) as Arc<dyn LlmProvider>
    });
    if claude.is_none() {
        tracing::warn!("⚠️  No ANTHROPIC_API_KEY set - Claude disabled");
    }

    // OpenAI: chat, embeddings, similarity explanations, RAG and fine-tune
    let openai_http = config.openai.as_ref().map(|c| {
        let http = OpenAiHttp::new(c.api_key.clone());
        match &c.base_url {
            Some(base_url) => http.with_base_url(base_url.clone()),
            None => http,
        }
    });

    let (openai_chat, openai_embedding, rag_service, fine_tune_service) =
        match (&config.openai, &openai_http) {
            (Some(openai), Some(http)) => {
                tracing::info!("🤖 OpenAI initialized ({})", openai.chat.model);

                let chat: Arc<dyn LlmProvider> =
                    Arc::new(OpenAiChatClient::new(http.clone(), openai.chat.clone()));
                let embedding: Arc<dyn EmbeddingService> = Arc::new(OpenAiEmbeddingClient::new(
                    http.clone(),
                    openai.embedding_model.clone(),
                ));

                let rag = match &openai.vector_store_id {
                    Some(vector_store_id) => {
                        tracing::info!("📚 RAG enabled over {}", vector_store_id);
                        Some(Arc::new(RagService::new(
                            Arc::new(OpenAiAssistantsClient::new(http.clone())),
                            vector_store_id.clone(),
                            openai.chat.model.clone(),
                            openai.assistant_id.clone(),
                            &config.rag,
                        )))
                    }
                    None => {
                        tracing::warn!("⚠️  No OPENAI_VECTOR_STORE_ID set - RAG disabled");
                        None
                    }
                };

                let fine_tune = match &openai.fine_tune_model {
                    Some(model) => {
                        tracing::info!("🎯 Fine-tuned model {}", model);
                        Some(Arc::new(FineTuneService::new(
                            Arc::new(OpenAiResponsesClient::new(http.clone())),
                            model.clone(),
                        )))
                    }
                    None => {
                        tracing::warn!("⚠️  No FT_MODEL set - fine-tune disabled");
                        None
                    }
                };

                (Some(chat), Some(embedding), rag, fine_tune)
            }
            _ => {
                tracing::warn!("⚠️  No OPENAI_API_KEY set - OpenAI features disabled");
                (None, None, None, None)
            }
        };

    // Voyage
    let voyage: Option<Arc<dyn EmbeddingService>> = config.voyage.as_ref().map(|c| {
        tracing::info!("🧬 Voyage embeddings initialized ({})", c.model);
        let mut client = VoyageEmbeddingClient::new(c.api_key.clone(), c.model.clone());
        if let Some(base_url) = &c.base_url {
            client = client.with_base_url(base_url.clone());
        }
        Arc::new(client) as Arc<dyn EmbeddingService>
    });
    if voyage.is_none() {
        tracing::warn!("⚠️  No VOYAGE_API_KEY set - /embed/nomic disabled");
    }

    let chat_service = Arc::new(ChatService::new(
        claude,
        openai_chat.clone(),
        Arc::new(TiktokenCounter::new()),
    ));
    let vector_service = Arc::new(VectorService::new(openai_embedding, voyage, openai_chat));

    let state = AppState {
        login_service,
        jwt,
        chat_service,
        vector_service,
        rag_service,
        fine_tune_service,
    };

    let app = build_router(
        state,
        config.frontend_url.as_deref(),
        &config.static_dir,
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ WorkWithTokens API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
