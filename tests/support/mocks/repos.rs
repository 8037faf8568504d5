// tests/support/mocks/repos.rs
use async_trait::async_trait;
use folio_core::domain::{
    errors::{DomainError, DomainResult},
    portfolio::{
        NewPortfolio, NewPortfolioAggregate, NewProject, NewSocialLink, Portfolio,
        PortfolioAggregate, PortfolioId, PortfolioRepository, Project, ProjectId, SocialLink,
        SocialLinkId,
    },
    user::{Email, NewUser, User, UserId, UserRepository},
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|user| user.email == new_user.email) {
            return Err(DomainError::DuplicateEmail);
        }
        let user = User {
            id: UserId(users.len() as i64 + 1),
            full_name: new_user.full_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: new_user.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| &user.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.id == id).cloned())
    }
}

#[derive(Default)]
struct PortfolioTables {
    next_portfolio_id: i64,
    portfolios: Vec<Portfolio>,
    projects: Vec<Project>,
    social_links: Vec<SocialLink>,
}

/// Mirrors the Postgres constraints that matter: one portfolio per user and
/// children that must point at an existing portfolio.
#[derive(Default)]
pub struct InMemoryPortfolioRepo {
    tables: Mutex<PortfolioTables>,
    fail_create: AtomicBool,
}

impl InMemoryPortfolioRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_aggregate` calls fail like a dropped connection.
    pub fn fail_creates(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn portfolio_count(&self) -> usize {
        self.tables.lock().unwrap().portfolios.len()
    }

    pub fn project_count(&self) -> usize {
        self.tables.lock().unwrap().projects.len()
    }
}

impl PortfolioTables {
    fn insert_portfolio(&mut self, new: NewPortfolio) -> DomainResult<Portfolio> {
        if self.portfolios.iter().any(|p| p.user_id == new.user_id) {
            return Err(DomainError::DuplicatePortfolio);
        }
        let portfolio = Portfolio {
            id: new.id,
            user_id: new.user_id,
            description: new.description,
            languages: new.languages,
            type_technologies: new.type_technologies,
            cv: new.cv,
            image: new.image,
            created_at: new.created_at,
        };
        self.portfolios.push(portfolio.clone());
        Ok(portfolio)
    }

    fn ensure_portfolio(&self, id: PortfolioId) -> DomainResult<()> {
        if self.portfolios.iter().any(|p| p.id == id) {
            Ok(())
        } else {
            Err(DomainError::NotFound("portfolio not found".into()))
        }
    }

    fn insert_project(&mut self, portfolio_id: PortfolioId, new: NewProject) -> DomainResult<Project> {
        self.ensure_portfolio(portfolio_id)?;
        let project = Project {
            id: ProjectId(self.projects.len() as i64 + 1),
            portfolio_id,
            name: new.name,
            description: new.description,
            language: new.language,
            image: new.image,
        };
        self.projects.push(project.clone());
        Ok(project)
    }

    fn insert_link(&mut self, portfolio_id: PortfolioId, new: NewSocialLink) -> DomainResult<SocialLink> {
        self.ensure_portfolio(portfolio_id)?;
        let link = SocialLink {
            id: SocialLinkId(self.social_links.len() as i64 + 1),
            portfolio_id,
            platform: new.platform,
            url: new.url,
        };
        self.social_links.push(link.clone());
        Ok(link)
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepo {
    async fn reserve_id(&self) -> DomainResult<PortfolioId> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_portfolio_id += 1;
        Ok(PortfolioId(tables.next_portfolio_id))
    }

    async fn insert(&self, portfolio: NewPortfolio) -> DomainResult<Portfolio> {
        self.tables.lock().unwrap().insert_portfolio(portfolio)
    }

    async fn find_by_user_id(&self, user_id: UserId) -> DomainResult<Option<Portfolio>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.portfolios.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn insert_project(
        &self,
        portfolio_id: PortfolioId,
        project: NewProject,
    ) -> DomainResult<Project> {
        self.tables.lock().unwrap().insert_project(portfolio_id, project)
    }

    async fn insert_projects(
        &self,
        portfolio_id: PortfolioId,
        projects: Vec<NewProject>,
    ) -> DomainResult<Vec<Project>> {
        let mut tables = self.tables.lock().unwrap();
        projects
            .into_iter()
            .map(|project| tables.insert_project(portfolio_id, project))
            .collect()
    }

    async fn insert_social_link(
        &self,
        portfolio_id: PortfolioId,
        link: NewSocialLink,
    ) -> DomainResult<SocialLink> {
        self.tables.lock().unwrap().insert_link(portfolio_id, link)
    }

    async fn insert_social_links(
        &self,
        portfolio_id: PortfolioId,
        links: Vec<NewSocialLink>,
    ) -> DomainResult<Vec<SocialLink>> {
        let mut tables = self.tables.lock().unwrap();
        links
            .into_iter()
            .map(|link| tables.insert_link(portfolio_id, link))
            .collect()
    }

    async fn create_aggregate(
        &self,
        aggregate: NewPortfolioAggregate,
    ) -> DomainResult<PortfolioAggregate> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("connection reset".into()));
        }

        let mut tables = self.tables.lock().unwrap();
        // Work on a copy so a failure leaves nothing behind.
        let mut staged = PortfolioTables {
            next_portfolio_id: tables.next_portfolio_id,
            portfolios: tables.portfolios.clone(),
            projects: tables.projects.clone(),
            social_links: tables.social_links.clone(),
        };

        let portfolio = staged.insert_portfolio(aggregate.portfolio)?;
        let projects = aggregate
            .projects
            .into_iter()
            .map(|project| staged.insert_project(portfolio.id, project))
            .collect::<DomainResult<Vec<_>>>()?;
        let social_links = aggregate
            .social_links
            .into_iter()
            .map(|link| staged.insert_link(portfolio.id, link))
            .collect::<DomainResult<Vec<_>>>()?;

        *tables = staged;
        Ok(PortfolioAggregate {
            portfolio,
            projects,
            social_links,
        })
    }

    async fn load_aggregate(&self, user_id: UserId) -> DomainResult<Option<PortfolioAggregate>> {
        let tables = self.tables.lock().unwrap();
        let Some(portfolio) = tables.portfolios.iter().find(|p| p.user_id == user_id).cloned()
        else {
            return Ok(None);
        };
        let projects = tables
            .projects
            .iter()
            .filter(|project| project.portfolio_id == portfolio.id)
            .cloned()
            .collect();
        let social_links = tables
            .social_links
            .iter()
            .filter(|link| link.portfolio_id == portfolio.id)
            .cloned()
            .collect();
        Ok(Some(PortfolioAggregate {
            portfolio,
            projects,
            social_links,
        }))
    }
}
