use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, FullName, NewUser, PasswordHash},
};

pub struct RegisterUserCommand {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl UserCommandService {
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let full_name = FullName::new(command.full_name)?;
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;

        self.ensure_email_available(&email).await?;

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser::new(full_name, email, password_hash, self.clock.now());
        // The unique constraint still guards against a concurrent registration
        // slipping past the lookup above.
        let user = self.user_repo.insert(new_user).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user.into())
    }

    async fn ensure_email_available(&self, email: &Email) -> ApplicationResult<()> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(ApplicationError::DuplicateEmail);
        }
        Ok(())
    }
}
