use super::UserCommandService;
use crate::{
    application::{
        dto::AuthTokenDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, User},
};

pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<AuthTokenDto> {
        // A malformed email can never match a stored account.
        let email = Email::new(command.email)
            .map_err(|_| ApplicationError::unauthorized("invalid credentials"))?;

        let user = self
            .find_and_authenticate_user(&email, &command.password)
            .await?;

        let token = self.token_manager.issue(user.id, self.clock.now())?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(token)
    }

    async fn find_and_authenticate_user(
        &self,
        email: &Email,
        password: &str,
    ) -> ApplicationResult<User> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            tracing::warn!("login rejected: unknown email");
            return Err(ApplicationError::unauthorized("invalid credentials"));
        };

        if !self
            .password_hasher
            .verify(password, user.password_hash.as_str())
            .await
        {
            tracing::warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(ApplicationError::unauthorized("invalid credentials"));
        }

        Ok(user)
    }
}
