use crate::application::error::{ApplicationError, ApplicationResult};

// Upper bound on what is handed to Argon2 on the blocking pool.
pub(super) const MAX_PASSWORD_BYTES: usize = 1024;

pub(super) fn validate_password(password: &str) -> ApplicationResult<()> {
    if password.is_empty() {
        return Err(ApplicationError::invalid_input("password cannot be empty"));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ApplicationError::invalid_input(format!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    Ok(())
}
