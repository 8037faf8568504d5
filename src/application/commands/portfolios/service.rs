use std::sync::Arc;

use crate::{
    application::ports::{storage::FileStore, time::Clock},
    domain::{portfolio::PortfolioRepository, user::UserRepository},
};

pub struct PortfolioCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) portfolio_repo: Arc<dyn PortfolioRepository>,
    pub(super) file_store: Arc<dyn FileStore>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PortfolioCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        portfolio_repo: Arc<dyn PortfolioRepository>,
        file_store: Arc<dyn FileStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            portfolio_repo,
            file_store,
            clock,
        }
    }
}
