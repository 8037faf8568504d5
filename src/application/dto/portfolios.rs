// src/application/dto/portfolios.rs
use crate::domain::portfolio::{PortfolioAggregate, Project, SocialLink};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ProjectDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub language: String,
    pub image: String,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.into(),
            name: project.name,
            description: project.description,
            language: project.language,
            image: project.image.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SocialLinkDto {
    pub platform: String,
    pub url: String,
}

impl From<SocialLink> for SocialLinkDto {
    fn from(link: SocialLink) -> Self {
        Self {
            platform: link.platform,
            url: link.url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PortfolioDto {
    pub id: i64,
    pub description: String,
    pub languages: Vec<String>,
    pub type_technologies: String,
    /// Reference of the stored CV.
    pub cv: String,
    pub image_url: Option<String>,
    pub social_networks: Vec<SocialLinkDto>,
    pub projects: Vec<ProjectDto>,
}

impl From<PortfolioAggregate> for PortfolioDto {
    fn from(aggregate: PortfolioAggregate) -> Self {
        let PortfolioAggregate {
            portfolio,
            projects,
            social_links,
        } = aggregate;

        Self {
            id: portfolio.id.into(),
            description: portfolio.description.into(),
            languages: portfolio.languages.into(),
            type_technologies: portfolio.type_technologies.into(),
            cv: portfolio.cv.into(),
            image_url: portfolio.image.map(Into::into),
            social_networks: social_links.into_iter().map(Into::into).collect(),
            projects: projects.into_iter().map(Into::into).collect(),
        }
    }
}
