// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{portfolios::PortfolioCommandService, users::UserCommandService},
        dto::AuthenticatedUser,
        ports::{ClockPort, FileStorePort, PasswordHasherPort, TokenManagerPort},
        queries::portfolios::PortfolioQueryService,
    },
    domain::{portfolio::PortfolioRepository, user::UserRepository},
};

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub portfolio_commands: Arc<PortfolioCommandService>,
    pub portfolio_queries: Arc<PortfolioQueryService>,
    token_manager: Arc<TokenManagerPort>,
    clock: Arc<ClockPort>,
}

impl ApplicationServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        portfolio_repo: Arc<dyn PortfolioRepository>,
        password_hasher: Arc<PasswordHasherPort>,
        token_manager: Arc<TokenManagerPort>,
        file_store: Arc<FileStorePort>,
        clock: Arc<ClockPort>,
    ) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));

        let portfolio_commands = Arc::new(PortfolioCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&portfolio_repo),
            Arc::clone(&file_store),
            Arc::clone(&clock),
        ));

        let portfolio_queries = Arc::new(PortfolioQueryService::new(Arc::clone(&portfolio_repo)));

        Self {
            user_commands,
            portfolio_commands,
            portfolio_queries,
            token_manager,
            clock,
        }
    }

    /// Resolve a raw bearer token into the caller's identity, checking expiry
    /// against the injected clock.
    pub fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let id = self.token_manager.validate(token, self.clock.now())?;
        Ok(AuthenticatedUser { id })
    }
}
