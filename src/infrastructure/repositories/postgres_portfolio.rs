// src/infrastructure/repositories/postgres_portfolio.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::portfolio::{
    Description, FileReference, Languages, NewPortfolio, NewPortfolioAggregate, NewProject,
    NewSocialLink, Portfolio, PortfolioAggregate, PortfolioId, PortfolioRepository, Project,
    ProjectId, SocialLink, SocialLinkId, TechnologyCategory,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const PORTFOLIO_COLUMNS: &str =
    "id, user_id, description, languages, type_technologies, cv, image_url, created_at";
const PROJECT_COLUMNS: &str = "id, portfolio_id, name, description, language, image";
const SOCIAL_LINK_COLUMNS: &str = "id, portfolio_id, platform, url";

#[derive(Clone)]
pub struct PostgresPortfolioRepository {
    pool: PgPool,
}

impl PostgresPortfolioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> DomainResult<sqlx::pool::PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(map_sqlx)
    }
}

#[derive(Debug, FromRow)]
struct PortfolioRow {
    id: i64,
    user_id: i64,
    description: String,
    languages: Vec<String>,
    type_technologies: String,
    cv: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PortfolioRow> for Portfolio {
    type Error = DomainError;

    fn try_from(row: PortfolioRow) -> Result<Self, Self::Error> {
        Ok(Portfolio {
            id: PortfolioId::new(row.id)?,
            user_id: UserId::new(row.user_id)?,
            description: Description::new(row.description)?,
            languages: Languages::new(row.languages)?,
            type_technologies: TechnologyCategory::new(row.type_technologies)?,
            cv: FileReference::new(row.cv)?,
            image: row.image_url.map(FileReference::new).transpose()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: i64,
    portfolio_id: i64,
    name: String,
    description: String,
    language: String,
    image: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = DomainError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project {
            id: ProjectId::new(row.id)?,
            portfolio_id: PortfolioId::new(row.portfolio_id)?,
            name: row.name,
            description: row.description,
            language: row.language,
            image: FileReference::new(row.image)?,
        })
    }
}

#[derive(Debug, FromRow)]
struct SocialLinkRow {
    id: i64,
    portfolio_id: i64,
    platform: String,
    url: String,
}

impl TryFrom<SocialLinkRow> for SocialLink {
    type Error = DomainError;

    fn try_from(row: SocialLinkRow) -> Result<Self, Self::Error> {
        Ok(SocialLink {
            id: SocialLinkId::new(row.id)?,
            portfolio_id: PortfolioId::new(row.portfolio_id)?,
            platform: row.platform,
            url: row.url,
        })
    }
}

fn collect_rows<R, T>(rows: Vec<R>) -> DomainResult<Vec<T>>
where
    T: TryFrom<R, Error = DomainError>,
{
    rows.into_iter().map(T::try_from).collect()
}

async fn insert_portfolio_row(
    conn: &mut PgConnection,
    portfolio: NewPortfolio,
) -> DomainResult<Portfolio> {
    let NewPortfolio {
        id,
        user_id,
        description,
        languages,
        type_technologies,
        cv,
        image,
        created_at,
    } = portfolio;

    let row = sqlx::query_as::<_, PortfolioRow>(&format!(
        "INSERT INTO portfolios
            (id, user_id, description, languages, type_technologies, cv, image_url, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {PORTFOLIO_COLUMNS}"
    ))
    .bind(i64::from(id))
    .bind(i64::from(user_id))
    .bind(String::from(description))
    .bind(Vec::<String>::from(languages))
    .bind(String::from(type_technologies))
    .bind(String::from(cv))
    .bind(image.map(String::from))
    .bind(created_at)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Portfolio::try_from(row)
}

async fn insert_project_rows(
    conn: &mut PgConnection,
    portfolio_id: PortfolioId,
    projects: Vec<NewProject>,
) -> DomainResult<Vec<Project>> {
    if projects.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO projects (portfolio_id, name, description, language, image) ",
    );
    qb.push_values(projects, |mut row, project| {
        row.push_bind(i64::from(portfolio_id))
            .push_bind(project.name)
            .push_bind(project.description)
            .push_bind(project.language)
            .push_bind(String::from(project.image));
    });
    qb.push(" RETURNING ");
    qb.push(PROJECT_COLUMNS);

    let mut rows = qb
        .build_query_as::<ProjectRow>()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    rows.sort_by_key(|row| row.id);

    collect_rows(rows)
}

async fn insert_social_link_rows(
    conn: &mut PgConnection,
    portfolio_id: PortfolioId,
    links: Vec<NewSocialLink>,
) -> DomainResult<Vec<SocialLink>> {
    if links.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb =
        QueryBuilder::<Postgres>::new("INSERT INTO social_networks (portfolio_id, platform, url) ");
    qb.push_values(links, |mut row, link| {
        row.push_bind(i64::from(portfolio_id))
            .push_bind(link.platform)
            .push_bind(link.url);
    });
    qb.push(" RETURNING ");
    qb.push(SOCIAL_LINK_COLUMNS);

    let mut rows = qb
        .build_query_as::<SocialLinkRow>()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    rows.sort_by_key(|row| row.id);

    collect_rows(rows)
}

async fn fetch_portfolio_by_user(
    conn: &mut PgConnection,
    user_id: UserId,
) -> DomainResult<Option<Portfolio>> {
    let row = sqlx::query_as::<_, PortfolioRow>(&format!(
        "SELECT {PORTFOLIO_COLUMNS} FROM portfolios WHERE user_id = $1"
    ))
    .bind(i64::from(user_id))
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    row.map(Portfolio::try_from).transpose()
}

async fn fetch_children(
    conn: &mut PgConnection,
    portfolio: Portfolio,
) -> DomainResult<PortfolioAggregate> {
    let portfolio_id = i64::from(portfolio.id);

    let projects = sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE portfolio_id = $1 ORDER BY id"
    ))
    .bind(portfolio_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    let social_links = sqlx::query_as::<_, SocialLinkRow>(&format!(
        "SELECT {SOCIAL_LINK_COLUMNS} FROM social_networks WHERE portfolio_id = $1 ORDER BY id"
    ))
    .bind(portfolio_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Ok(PortfolioAggregate {
        portfolio,
        projects: collect_rows(projects)?,
        social_links: collect_rows(social_links)?,
    })
}

#[async_trait]
impl PortfolioRepository for PostgresPortfolioRepository {
    async fn reserve_id(&self) -> DomainResult<PortfolioId> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT nextval(pg_get_serial_sequence('portfolios', 'id'))",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        PortfolioId::new(id)
    }

    async fn insert(&self, portfolio: NewPortfolio) -> DomainResult<Portfolio> {
        let mut conn = self.connection().await?;
        insert_portfolio_row(&mut conn, portfolio).await
    }

    async fn find_by_user_id(&self, user_id: UserId) -> DomainResult<Option<Portfolio>> {
        let mut conn = self.connection().await?;
        fetch_portfolio_by_user(&mut conn, user_id).await
    }

    async fn insert_project(
        &self,
        portfolio_id: PortfolioId,
        project: NewProject,
    ) -> DomainResult<Project> {
        let mut conn = self.connection().await?;
        insert_project_rows(&mut conn, portfolio_id, vec![project])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Persistence("project insert returned no row".into()))
    }

    async fn insert_projects(
        &self,
        portfolio_id: PortfolioId,
        projects: Vec<NewProject>,
    ) -> DomainResult<Vec<Project>> {
        let mut conn = self.connection().await?;
        insert_project_rows(&mut conn, portfolio_id, projects).await
    }

    async fn insert_social_link(
        &self,
        portfolio_id: PortfolioId,
        link: NewSocialLink,
    ) -> DomainResult<SocialLink> {
        let mut conn = self.connection().await?;
        insert_social_link_rows(&mut conn, portfolio_id, vec![link])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Persistence("social link insert returned no row".into()))
    }

    async fn insert_social_links(
        &self,
        portfolio_id: PortfolioId,
        links: Vec<NewSocialLink>,
    ) -> DomainResult<Vec<SocialLink>> {
        let mut conn = self.connection().await?;
        insert_social_link_rows(&mut conn, portfolio_id, links).await
    }

    async fn create_aggregate(
        &self,
        aggregate: NewPortfolioAggregate,
    ) -> DomainResult<PortfolioAggregate> {
        let NewPortfolioAggregate {
            portfolio,
            projects,
            social_links,
        } = aggregate;

        // Rolled back on drop unless committed.
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let portfolio = insert_portfolio_row(&mut tx, portfolio).await?;
        let projects = insert_project_rows(&mut tx, portfolio.id, projects).await?;
        let social_links = insert_social_link_rows(&mut tx, portfolio.id, social_links).await?;

        tx.commit().await.map_err(map_sqlx)?;

        Ok(PortfolioAggregate {
            portfolio,
            projects,
            social_links,
        })
    }

    async fn load_aggregate(&self, user_id: UserId) -> DomainResult<Option<PortfolioAggregate>> {
        let mut conn = self.connection().await?;
        let Some(portfolio) = fetch_portfolio_by_user(&mut conn, user_id).await? else {
            return Ok(None);
        };
        fetch_children(&mut conn, portfolio).await.map(Some)
    }
}
