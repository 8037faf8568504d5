// src/domain/portfolio/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::portfolio::value_objects::{
    Description, FileReference, Languages, PortfolioId, ProjectId, SocialLinkId,
    TechnologyCategory,
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Portfolio {
    pub id: PortfolioId,
    pub user_id: UserId,
    pub description: Description,
    pub languages: Languages,
    pub type_technologies: TechnologyCategory,
    pub cv: FileReference,
    pub image: Option<FileReference>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPortfolio {
    pub id: PortfolioId,
    pub user_id: UserId,
    pub description: Description,
    pub languages: Languages,
    pub type_technologies: TechnologyCategory,
    pub cv: FileReference,
    pub image: Option<FileReference>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub portfolio_id: PortfolioId,
    pub name: String,
    pub description: String,
    pub language: String,
    pub image: FileReference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub language: String,
    pub image: FileReference,
}

impl NewProject {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        language: impl Into<String>,
        image: FileReference,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation("project name cannot be empty".into()));
        }
        Ok(Self {
            name,
            description: description.into().trim().to_string(),
            language: language.into().trim().to_string(),
            image,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub id: SocialLinkId,
    pub portfolio_id: PortfolioId,
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSocialLink {
    pub platform: String,
    pub url: String,
}

impl NewSocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> DomainResult<Self> {
        let platform = platform.into().trim().to_string();
        let url = url.into().trim().to_string();
        if platform.is_empty() {
            return Err(DomainError::Validation(
                "social network platform cannot be empty".into(),
            ));
        }
        if url.is_empty() {
            return Err(DomainError::Validation(format!(
                "social network '{platform}' is missing a url"
            )));
        }
        Ok(Self { platform, url })
    }
}

/// Read model of a portfolio together with everything it owns.
#[derive(Debug, Clone)]
pub struct PortfolioAggregate {
    pub portfolio: Portfolio,
    pub projects: Vec<Project>,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone)]
pub struct NewPortfolioAggregate {
    pub portfolio: NewPortfolio,
    pub projects: Vec<NewProject>,
    pub social_links: Vec<NewSocialLink>,
}
