use crate::application::error::{ApplicationError, ApplicationResult};
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name as sent by the client; sanitized by the file store.
    pub filename: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectUpload {
    pub image: UploadedFile,
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

impl ProjectUpload {
    pub fn from_image(image: UploadedFile) -> Self {
        Self {
            image,
            name: None,
            description: None,
            language: None,
        }
    }
}

pub struct CreatePortfolioCommand {
    pub description: String,
    pub languages: String,
    pub type_technologies: String,
    /// Delimited `platform:url` records, e.g. `"GitHub:https://x, Twitter:https://y"`.
    pub social_networks: String,
    pub cv: UploadedFile,
    pub image: Option<UploadedFile>,
    pub projects: Vec<ProjectUpload>,
}

impl CreatePortfolioCommand {
    pub fn builder() -> CreatePortfolioCommandBuilder {
        CreatePortfolioCommandBuilder::default()
    }
}

/// Collects form fields in arrival order. Project metadata fields are paired
/// with project images by position.
#[derive(Default)]
pub struct CreatePortfolioCommandBuilder {
    description: Option<String>,
    languages: Option<String>,
    type_technologies: Option<String>,
    social_networks: Option<String>,
    cv: Option<UploadedFile>,
    image: Option<UploadedFile>,
    project_images: Vec<UploadedFile>,
    project_names: Vec<String>,
    project_descriptions: Vec<String>,
    project_languages: Vec<String>,
}

impl CreatePortfolioCommandBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn languages(mut self, languages: impl Into<String>) -> Self {
        self.languages = Some(languages.into());
        self
    }

    pub fn type_technologies(mut self, type_technologies: impl Into<String>) -> Self {
        self.type_technologies = Some(type_technologies.into());
        self
    }

    pub fn social_networks(mut self, social_networks: impl Into<String>) -> Self {
        self.social_networks = Some(social_networks.into());
        self
    }

    pub fn cv(mut self, cv: UploadedFile) -> Self {
        self.cv = Some(cv);
        self
    }

    pub fn image(mut self, image: UploadedFile) -> Self {
        self.image = Some(image);
        self
    }

    pub fn project_image(mut self, image: UploadedFile) -> Self {
        self.project_images.push(image);
        self
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_names.push(name.into());
        self
    }

    pub fn project_description(mut self, description: impl Into<String>) -> Self {
        self.project_descriptions.push(description.into());
        self
    }

    pub fn project_language(mut self, language: impl Into<String>) -> Self {
        self.project_languages.push(language.into());
        self
    }

    pub fn build(self) -> ApplicationResult<CreatePortfolioCommand> {
        let image_count = self.project_images.len();
        for (field, count) in [
            ("project_name", self.project_names.len()),
            ("project_description", self.project_descriptions.len()),
            ("project_language", self.project_languages.len()),
        ] {
            if count > image_count {
                return Err(ApplicationError::invalid_input(format!(
                    "{count} '{field}' values supplied for {image_count} project images"
                )));
            }
        }

        let mut names = self.project_names.into_iter();
        let mut descriptions = self.project_descriptions.into_iter();
        let mut languages = self.project_languages.into_iter();
        let projects = self
            .project_images
            .into_iter()
            .map(|image| ProjectUpload {
                image,
                name: names.next(),
                description: descriptions.next(),
                language: languages.next(),
            })
            .collect();

        Ok(CreatePortfolioCommand {
            description: self
                .description
                .ok_or_else(|| ApplicationError::missing_field("description"))?,
            languages: self
                .languages
                .ok_or_else(|| ApplicationError::missing_field("languages"))?,
            type_technologies: self
                .type_technologies
                .ok_or_else(|| ApplicationError::missing_field("type_technologies"))?,
            social_networks: self.social_networks.unwrap_or_default(),
            cv: self.cv.ok_or_else(|| ApplicationError::missing_field("cv"))?,
            image: self.image,
            projects,
        })
    }
}
