// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_portfolio;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_portfolio::PostgresPortfolioRepository;
pub use postgres_user::PostgresUserRepository;
