use super::PortfolioQueryService;
use crate::application::{
    dto::{AuthenticatedUser, PortfolioDto},
    error::{ApplicationError, ApplicationResult},
};

impl PortfolioQueryService {
    /// The caller's own portfolio. Other users' portfolios are never reachable
    /// through this path.
    pub async fn get_portfolio(&self, actor: &AuthenticatedUser) -> ApplicationResult<PortfolioDto> {
        let aggregate = self
            .portfolio_repo
            .load_aggregate(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("portfolio not found"))?;

        Ok(aggregate.into())
    }
}
