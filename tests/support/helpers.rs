// tests/support/helpers.rs
use super::mocks::{FixedClock, InMemoryPortfolioRepo, InMemoryUserRepo};
use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::Duration;
use folio_core::{
    application::{
        ports::{
            security::{PasswordHasher, TokenManager},
            storage::FileStore,
            time::Clock,
        },
        services::ApplicationServices,
    },
    domain::{portfolio::PortfolioRepository, user::UserRepository},
    infrastructure::{
        security::{password::Argon2PasswordHasher, token::JwtTokenManager},
        storage::LocalFileStore,
    },
    presentation::http::{
        routes::build_router,
        state::{HttpSettings, HttpState},
    },
};
use jsonwebtoken::Algorithm;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789";
pub const TEST_TTL_MINUTES: i64 = 60;
pub const MAX_UPLOAD_BYTES: u64 = 64 * 1024;

/// Router wired with in-memory repositories and real hashing, tokens and
/// disk storage (under a temp dir that lives as long as the app).
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepo>,
    pub portfolios: Arc<InMemoryPortfolioRepo>,
    pub clock: Arc<FixedClock>,
    pub uploads: TempDir,
}

pub fn build_test_app() -> TestApp {
    let users = Arc::new(InMemoryUserRepo::new());
    let portfolios = Arc::new(InMemoryPortfolioRepo::new());
    let clock = Arc::new(FixedClock::new());
    let uploads = tempfile::tempdir().expect("create upload dir");

    let user_repo: Arc<dyn UserRepository> = users.clone();
    let portfolio_repo: Arc<dyn PortfolioRepository> = portfolios.clone();
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(
        JwtTokenManager::new(
            TEST_SECRET,
            Algorithm::HS256,
            Duration::minutes(TEST_TTL_MINUTES),
        )
        .expect("token manager"),
    );
    let file_store: Arc<dyn FileStore> =
        Arc::new(LocalFileStore::new(uploads.path(), MAX_UPLOAD_BYTES));
    let clock_port: Arc<dyn Clock> = clock.clone();

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        portfolio_repo,
        password_hasher,
        token_manager,
        file_store,
        clock_port,
    ));

    let state = HttpState {
        services,
        settings: HttpSettings {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            ..HttpSettings::default()
        },
    };

    TestApp {
        router: build_router(state),
        users,
        portfolios,
        clock,
        uploads,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn post_json(&self, uri: &str, payload: Value) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_multipart(&self, uri: &str, form: MultipartForm, token: Option<&str>) -> Response {
        let (content_type, body) = form.finish();
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> Response {
        self.post_json(
            "/register",
            json!({ "full_name": full_name, "email": email, "password": password }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.post_json("/login", json!({ "email": email, "password": password }))
            .await
    }

    /// Register then log in, returning the bearer token.
    pub async fn signup(&self, email: &str) -> String {
        let response = self.register("Test User", email, "pw123").await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = self.login(email, "pw123").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        body["access_token"].as_str().expect("access_token").to_string()
    }
}

pub async fn read_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert a JSON error body with the expected status and reason phrase.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024).await.expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}

const BOUNDARY: &str = "folio-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// A complete, valid portfolio form without projects or social links.
    pub fn minimal_portfolio() -> Self {
        Self::new()
            .text("description", "Backend developer")
            .text("languages", "Rust, Python")
            .text("type_technologies", "Web")
            .file("cv", "cv.pdf", b"%PDF-1.4 test")
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), self.body)
    }
}
