// src/application/dto/mod.rs
pub mod auth;
pub mod portfolios;
pub mod serde_time;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser};
pub use portfolios::{PortfolioDto, ProjectDto, SocialLinkDto};
pub use users::UserDto;
