use std::sync::Arc;

use crate::domain::portfolio::PortfolioRepository;

pub struct PortfolioQueryService {
    pub(super) portfolio_repo: Arc<dyn PortfolioRepository>,
}

impl PortfolioQueryService {
    pub fn new(portfolio_repo: Arc<dyn PortfolioRepository>) -> Self {
        Self { portfolio_repo }
    }
}
