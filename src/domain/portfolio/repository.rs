// src/domain/portfolio/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::portfolio::{
    entity::{
        NewPortfolio, NewPortfolioAggregate, NewProject, NewSocialLink, Portfolio,
        PortfolioAggregate, Project, SocialLink,
    },
    value_objects::PortfolioId,
};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// Allocate an id for a portfolio that has not been inserted yet, so that
    /// uploads can be filed under it before the row exists.
    async fn reserve_id(&self) -> DomainResult<PortfolioId>;

    /// Insert the portfolio root only. Fails with `DuplicatePortfolio` when the
    /// owner already has one.
    async fn insert(&self, portfolio: NewPortfolio) -> DomainResult<Portfolio>;

    async fn find_by_user_id(&self, user_id: UserId) -> DomainResult<Option<Portfolio>>;

    async fn insert_project(
        &self,
        portfolio_id: PortfolioId,
        project: NewProject,
    ) -> DomainResult<Project>;

    async fn insert_projects(
        &self,
        portfolio_id: PortfolioId,
        projects: Vec<NewProject>,
    ) -> DomainResult<Vec<Project>>;

    async fn insert_social_link(
        &self,
        portfolio_id: PortfolioId,
        link: NewSocialLink,
    ) -> DomainResult<SocialLink>;

    async fn insert_social_links(
        &self,
        portfolio_id: PortfolioId,
        links: Vec<NewSocialLink>,
    ) -> DomainResult<Vec<SocialLink>>;

    /// Insert root and children atomically: either everything is stored or
    /// nothing is.
    async fn create_aggregate(
        &self,
        aggregate: NewPortfolioAggregate,
    ) -> DomainResult<PortfolioAggregate>;

    async fn load_aggregate(&self, user_id: UserId) -> DomainResult<Option<PortfolioAggregate>>;
}
