// src/presentation/http/controllers/portfolios.rs
use crate::application::{
    commands::portfolios::{CreatePortfolioCommand, CreatePortfolioCommandBuilder, UploadedFile},
    dto::PortfolioDto,
};
use crate::presentation::http::error::{ErrorBody, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{
        Multipart,
        multipart::{Field, MultipartError},
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CREATED_MESSAGE: &str = "Portfolio created successfully";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePortfolioResponse {
    pub message: String,
    pub portfolio_id: i64,
    pub portfolio: PortfolioDto,
}

/// Multipart form accepted by `POST /create_portfolio`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct CreatePortfolioForm {
    pub description: String,
    /// Comma-separated, e.g. `"Rust, Python"`.
    pub languages: String,
    pub type_technologies: String,
    /// Comma-separated `platform:url` records.
    pub social_networks: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub cv: Vec<u8>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
    /// One part per project image.
    #[schema(value_type = Option<Vec<String>>)]
    pub projects: Option<Vec<Vec<u8>>>,
    /// Matched by position with `projects`.
    pub project_name: Option<Vec<String>>,
    pub project_description: Option<Vec<String>>,
    pub project_language: Option<Vec<String>>,
}

fn multipart_error(err: MultipartError) -> HttpError {
    HttpError::with_status(err.status(), err.body_text())
}

async fn read_text(field: Field<'_>) -> HttpResult<String> {
    field.text().await.map_err(multipart_error)
}

async fn read_file(field: Field<'_>) -> HttpResult<UploadedFile> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content = field.bytes().await.map_err(multipart_error)?;
    Ok(UploadedFile::new(filename, content))
}

/// Browsers send an empty part for a file input left blank.
async fn read_optional_file(field: Field<'_>) -> HttpResult<Option<UploadedFile>> {
    let file = read_file(field).await?;
    if file.filename.is_empty() && file.content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(file))
    }
}

async fn read_form(mut multipart: Multipart) -> HttpResult<CreatePortfolioCommand> {
    let mut builder = CreatePortfolioCommandBuilder::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        builder = match name.as_str() {
            "description" => builder.description(read_text(field).await?),
            "languages" => builder.languages(read_text(field).await?),
            "type_technologies" => builder.type_technologies(read_text(field).await?),
            "social_networks" => builder.social_networks(read_text(field).await?),
            "project_name" => builder.project_name(read_text(field).await?),
            "project_description" => builder.project_description(read_text(field).await?),
            "project_language" => builder.project_language(read_text(field).await?),
            "cv" => builder.cv(read_file(field).await?),
            "image" => match read_optional_file(field).await? {
                Some(file) => builder.image(file),
                None => builder,
            },
            "projects" => match read_optional_file(field).await? {
                Some(file) => builder.project_image(file),
                None => builder,
            },
            other => {
                tracing::debug!(field = other, "ignoring unknown multipart field");
                builder
            }
        };
    }

    builder.build().into_http()
}

#[utoipa::path(
    post,
    path = "/create_portfolio",
    request_body(content = CreatePortfolioForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Portfolio created.", body = CreatePortfolioResponse),
        (status = 400, description = "Missing or invalid form fields.", body = ErrorBody),
        (status = 401, description = "Missing, invalid or expired token.", body = ErrorBody),
        (status = 409, description = "The user already owns a portfolio.", body = ErrorBody),
        (status = 500, description = "Files or rows could not be stored.", body = ErrorBody)
    ),
    tag = "Portfolios"
)]
pub async fn create_portfolio(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    multipart: Multipart,
) -> HttpResult<Json<CreatePortfolioResponse>> {
    let command = read_form(multipart).await?;

    let portfolio = state
        .services
        .portfolio_commands
        .create_portfolio(&user, command)
        .await
        .into_http()?;

    Ok(Json(CreatePortfolioResponse {
        message: CREATED_MESSAGE.to_string(),
        portfolio_id: portfolio.id,
        portfolio,
    }))
}

#[utoipa::path(
    get,
    path = "/portfolio",
    responses(
        (status = 200, description = "The caller's portfolio.", body = PortfolioDto),
        (status = 401, description = "Missing, invalid or expired token.", body = ErrorBody),
        (status = 404, description = "The caller has no portfolio yet.", body = ErrorBody)
    ),
    tag = "Portfolios"
)]
pub async fn get_portfolio(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<PortfolioDto>> {
    state
        .services
        .portfolio_queries
        .get_portfolio(&user)
        .await
        .into_http()
        .map(Json)
}
