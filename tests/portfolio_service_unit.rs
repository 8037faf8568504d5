// tests/portfolio_service_unit.rs
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;

mod support;

use folio_core::application::{
    commands::portfolios::{CreatePortfolioCommand, PortfolioCommandService, UploadedFile},
    dto::AuthenticatedUser,
    error::ApplicationError,
    queries::portfolios::PortfolioQueryService,
};
use folio_core::domain::user::{Email, FullName, NewUser, PasswordHash, UserId, UserRepository};
use support::{FixedClock, InMemoryPortfolioRepo, InMemoryUserRepo, RecordingFileStore};

struct Fixture {
    users: Arc<InMemoryUserRepo>,
    portfolios: Arc<InMemoryPortfolioRepo>,
    files: Arc<RecordingFileStore>,
    commands: PortfolioCommandService,
    queries: PortfolioQueryService,
}

fn fixture_with_store(files: RecordingFileStore) -> Fixture {
    let users = Arc::new(InMemoryUserRepo::new());
    let portfolios = Arc::new(InMemoryPortfolioRepo::new());
    let files = Arc::new(files);
    let commands = PortfolioCommandService::new(
        users.clone(),
        portfolios.clone(),
        files.clone(),
        Arc::new(FixedClock::new()),
    );
    let queries = PortfolioQueryService::new(portfolios.clone());
    Fixture {
        users,
        portfolios,
        files,
        commands,
        queries,
    }
}

fn fixture() -> Fixture {
    fixture_with_store(RecordingFileStore::new())
}

async fn seed_user(users: &InMemoryUserRepo, email: &str) -> AuthenticatedUser {
    let user = users
        .insert(NewUser::new(
            FullName::new("Ada").unwrap(),
            Email::new(email).unwrap(),
            PasswordHash::new("plain$pw").unwrap(),
            Utc::now(),
        ))
        .await
        .unwrap();
    AuthenticatedUser { id: user.id }
}

fn command_with_projects(projects: usize) -> CreatePortfolioCommand {
    let mut builder = CreatePortfolioCommand::builder()
        .description("Backend developer")
        .languages("Rust,Go")
        .type_technologies("Web")
        .social_networks("GitHub:https://github.com/ada")
        .cv(UploadedFile::new("cv.pdf", Bytes::from_static(b"pdf")))
        .image(UploadedFile::new("me.png", Bytes::from_static(b"png")));
    for i in 0..projects {
        builder = builder.project_image(UploadedFile::new(format!("p{i}.png"), vec![i as u8 + 1]));
    }
    builder.build().unwrap()
}

#[tokio::test]
async fn create_then_get_returns_the_same_aggregate() {
    let fx = fixture();
    let actor = seed_user(&fx.users, "ada@example.com").await;

    let created = fx
        .commands
        .create_portfolio(&actor, command_with_projects(2))
        .await
        .unwrap();
    let fetched = fx.queries.get_portfolio(&actor).await.unwrap();

    assert_eq!(created.id, fetched.id);
    assert_eq!(fetched.languages, vec!["Rust", "Go"]);
    assert_eq!(fetched.projects.len(), 2);
    assert_eq!(fetched.projects[0].name, "p0");
    assert_eq!(fetched.projects[0].image, format!("projects/{}/p0.png", created.id));
    assert_eq!(fetched.social_networks.len(), 1);
    assert_eq!(fx.files.references().len(), 4);
    assert_eq!(
        fx.files.content(&fetched.cv).as_deref(),
        Some(b"pdf".as_slice())
    );
}

#[tokio::test]
async fn files_are_removed_when_the_database_write_fails() {
    let fx = fixture();
    let actor = seed_user(&fx.users, "ada@example.com").await;
    fx.portfolios.fail_creates();

    let err = fx
        .commands
        .create_portfolio(&actor, command_with_projects(1))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::StorageFailure(_)));
    assert!(fx.files.references().is_empty());
    assert_eq!(fx.files.removed().len(), 3);
    assert_eq!(fx.portfolios.portfolio_count(), 0);
    assert_eq!(fx.portfolios.project_count(), 0);
}

#[tokio::test]
async fn partial_uploads_are_removed_when_storage_fails() {
    let fx = fixture_with_store(RecordingFileStore::failing_after(2));
    let actor = seed_user(&fx.users, "ada@example.com").await;

    let err = fx
        .commands
        .create_portfolio(&actor, command_with_projects(2))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::StorageFailure(_)));
    assert_eq!(fx.files.removed(), vec!["cv/cv.pdf", "images/me.png"]);
    assert!(fx.files.references().is_empty());
    assert_eq!(fx.portfolios.portfolio_count(), 0);
}

#[tokio::test]
async fn duplicate_is_detected_before_any_upload() {
    let fx = fixture();
    let actor = seed_user(&fx.users, "ada@example.com").await;
    fx.commands
        .create_portfolio(&actor, command_with_projects(0))
        .await
        .unwrap();
    let stored_before = fx.files.references();

    let err = fx
        .commands
        .create_portfolio(&actor, command_with_projects(1))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::DuplicatePortfolio));
    assert_eq!(fx.files.references(), stored_before);
    assert!(fx.files.removed().is_empty());
}

#[tokio::test]
async fn unknown_user_is_unauthorized() {
    let fx = fixture();
    let ghost = AuthenticatedUser { id: UserId(99) };

    let err = fx
        .commands
        .create_portfolio(&ghost, command_with_projects(0))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Unauthorized(_)));
    assert!(fx.files.references().is_empty());
}

#[tokio::test]
async fn empty_cv_is_invalid_input() {
    let fx = fixture();
    let actor = seed_user(&fx.users, "ada@example.com").await;
    let command = CreatePortfolioCommand::builder()
        .description("Backend developer")
        .languages("Rust")
        .type_technologies("Web")
        .cv(UploadedFile::new("cv.pdf", Bytes::new()))
        .build()
        .unwrap();

    let err = fx.commands.create_portfolio(&actor, command).await.unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidInput(msg) if msg.contains("cv")));
}

#[tokio::test]
async fn get_portfolio_without_one_is_not_found() {
    let fx = fixture();
    let actor = seed_user(&fx.users, "ada@example.com").await;

    let err = fx.queries.get_portfolio(&actor).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn unusable_filename_is_rejected_before_any_write() {
    let fx = fixture();
    let actor = seed_user(&fx.users, "ada@example.com").await;
    let command = CreatePortfolioCommand::builder()
        .description("Backend developer")
        .languages("Rust")
        .type_technologies("Web")
        .cv(UploadedFile::new("cv.pdf", Bytes::from_static(b"pdf")))
        .project_image(UploadedFile::new("***.png", Bytes::from_static(b"png")))
        .build()
        .unwrap();

    let err = fx.commands.create_portfolio(&actor, command).await.unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidInput(msg) if msg.contains("projects")));
    assert!(fx.files.references().is_empty());
    assert!(fx.files.removed().is_empty());
}
