use crate::domain::errors::DomainError;

const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_PORTFOLIO_OWNER: &str = "portfolios_user_id_key";
const CNT_PORTFOLIO_USER_FK: &str = "portfolios_user_id_fkey";
const CNT_PROJECT_PORTFOLIO_FK: &str = "projects_portfolio_id_fkey";
const CNT_SOCIAL_PORTFOLIO_FK: &str = "social_networks_portfolio_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_EMAIL => DomainError::DuplicateEmail,
                    CNT_PORTFOLIO_OWNER => DomainError::DuplicatePortfolio,
                    CNT_PORTFOLIO_USER_FK => DomainError::NotFound("user not found".into()),
                    CNT_PROJECT_PORTFOLIO_FK | CNT_SOCIAL_PORTFOLIO_FK => {
                        DomainError::NotFound("portfolio not found".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Persistence("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
