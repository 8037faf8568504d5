// src/domain/portfolio/mod.rs
pub mod entity;
pub mod file_name;
pub mod repository;
pub mod social;
pub mod value_objects;

pub use entity::{
    NewPortfolio, NewPortfolioAggregate, NewProject, NewSocialLink, Portfolio,
    PortfolioAggregate, Project, SocialLink,
};
pub use file_name::{FileNameError, SanitizedFileName, sanitize_filename};
pub use repository::PortfolioRepository;
pub use social::parse_social_links;
pub use value_objects::{
    Description, FileReference, Languages, PortfolioId, ProjectId, SocialLinkId,
    TechnologyCategory,
};
