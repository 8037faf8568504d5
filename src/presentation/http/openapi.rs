// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::portfolios::create_portfolio,
        crate::presentation::http::controllers::portfolios::get_portfolio,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorBody,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::portfolios::CreatePortfolioForm,
            crate::presentation::http::controllers::portfolios::CreatePortfolioResponse,
            crate::application::dto::UserDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::PortfolioDto,
            crate::application::dto::ProjectDto,
            crate::application::dto::SocialLinkDto
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Portfolios", description = "Portfolio creation and retrieval"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&BearerAuth),
    security(("bearerAuth" = [])),
    info(
        title = "Folio API",
        description = "Portfolio builder backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("JWT".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

/// The generated document with `servers` set to the given public URLs,
/// trailing slashes removed and duplicates dropped.
pub fn api_doc(public_urls: &[String]) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();

    let mut seen = HashSet::new();
    let servers: Vec<Server> = public_urls
        .iter()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty() && seen.insert(url.clone()))
        .map(Server::new)
        .collect();

    openapi.servers = (!servers.is_empty()).then_some(servers);
    openapi
}

/// `/openapi.json`, Swagger UI at `/docs` and Redoc at `/redoc`.
pub fn docs_router(public_urls: &[String]) -> Router {
    let openapi = api_doc(public_urls);
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

pub fn write_openapi_snapshot(path: &Path, public_urls: &[String]) -> std::io::Result<()> {
    let spec = api_doc(public_urls);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
