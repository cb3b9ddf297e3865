//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::models::{
    // Embedding models
    CompareRequest,
    CompareResponse,
    EmbedRequest,
    EmbedResponse,
    // Chat models
    ChatRequest,
    CostEstimateResponse,
    ModelSettingsResponse,
    PricingResponse,
    // Fine-tune models
    FineTuneError,
    FineTuneRequest,
    FineTuneResponse,
    // Login models
    LoginRequest,
    LoginResponse,
    RegisterResponse,
    // RAG models
    RagAnswerResponse,
    RagResponse,
    RagUploadForm,
    RagUploadResponse,
};

/// Registers the JWT bearer scheme referenced by protected paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Chat endpoints
        super::chat::chat,
        super::chat::get_model,
        super::chat::get_pricing,
        // Embedding endpoints
        super::embedding::embed_openai,
        super::embedding::embed_nomic,
        super::embedding::compare_words,
        // RAG endpoints
        super::rag::ask,
        super::rag::upload,
        // Fine-tune endpoints
        super::fine_tune::ask,
        // Login endpoints
        super::login::login,
        super::login::register,
    ),
    info(
        title = "WorkWithTokens API",
        version = "0.1.0",
        description = "Token accounting, embeddings and RAG playground over Claude, OpenAI and Voyage.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Chat", description = "Chat - Structured answers with token counts"),
        (name = "Embedding", description = "Embedding - Vectors and word similarity"),
        (name = "RAG", description = "RAG - Answers over the hosted vector store"),
        (name = "Fine-tune", description = "Fine-tune - Translation model"),
        (name = "Login", description = "Login - Credentials and access tokens"),
    ),
    components(
        schemas(
            // Chat
            ChatRequest,
            ModelSettingsResponse,
            CostEstimateResponse,
            PricingResponse,
            // Embedding
            EmbedRequest,
            EmbedResponse,
            CompareRequest,
            CompareResponse,
            // RAG
            RagAnswerResponse,
            RagResponse,
            RagUploadForm,
            RagUploadResponse,
            // Fine-tune
            FineTuneRequest,
            FineTuneResponse,
            FineTuneError,
            // Login
            LoginRequest,
            LoginResponse,
            RegisterResponse,
        )
    ),
    modifiers(&BearerAuth),
)]
pub struct ApiDoc;
