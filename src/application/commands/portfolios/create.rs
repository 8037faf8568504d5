use super::{
    PortfolioCommandService,
    command::{CreatePortfolioCommand, ProjectUpload, UploadedFile},
};
use crate::{
    application::{
        dto::{AuthenticatedUser, PortfolioDto},
        error::{ApplicationError, ApplicationResult},
        ports::storage::FileCategory,
    },
    domain::{
        portfolio::{
            Description, FileReference, Languages, NewPortfolio, NewPortfolioAggregate,
            NewProject, NewSocialLink, PortfolioId, TechnologyCategory, parse_social_links,
            sanitize_filename,
        },
        user::UserId,
    },
};

/// Form content after validation, before anything is written.
struct ValidatedPortfolio {
    description: Description,
    languages: Languages,
    type_technologies: TechnologyCategory,
    social_links: Vec<NewSocialLink>,
    cv: UploadedFile,
    image: Option<UploadedFile>,
    projects: Vec<ProjectUpload>,
}

impl TryFrom<CreatePortfolioCommand> for ValidatedPortfolio {
    type Error = ApplicationError;

    fn try_from(command: CreatePortfolioCommand) -> Result<Self, Self::Error> {
        ensure_file_present("cv", &command.cv)?;
        if let Some(image) = command.image.as_ref() {
            ensure_file_present("image", image)?;
        }
        for project in &command.projects {
            ensure_file_present("projects", &project.image)?;
        }

        Ok(Self {
            description: Description::new(command.description)?,
            languages: Languages::parse(&command.languages)?,
            type_technologies: TechnologyCategory::new(command.type_technologies)?,
            social_links: parse_social_links(&command.social_networks)?,
            cv: command.cv,
            image: command.image,
            projects: command.projects,
        })
    }
}

fn ensure_file_present(field: &str, file: &UploadedFile) -> ApplicationResult<()> {
    if file.filename.trim().is_empty() {
        return Err(ApplicationError::invalid_input(format!(
            "file in '{field}' has no filename"
        )));
    }
    if file.content.is_empty() {
        return Err(ApplicationError::invalid_input(format!(
            "file '{}' in '{field}' is empty",
            file.filename
        )));
    }
    // Unusable names are rejected before anything is written.
    sanitize_filename(&file.filename)
        .map_err(|err| ApplicationError::invalid_input(format!("'{field}': {err}")))?;
    Ok(())
}

/// Project name used when the client sent an image without a name: the
/// uploaded file's stem.
fn default_project_name(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}

impl PortfolioCommandService {
    pub async fn create_portfolio(
        &self,
        actor: &AuthenticatedUser,
        command: CreatePortfolioCommand,
    ) -> ApplicationResult<PortfolioDto> {
        self.ensure_user_exists(actor.id).await?;
        let input = ValidatedPortfolio::try_from(command)?;
        self.ensure_no_portfolio(actor.id).await?;

        let portfolio_id = self.portfolio_repo.reserve_id().await?;
        let mut written = Vec::new();

        let result = self
            .store_and_persist(actor.id, portfolio_id, input, &mut written)
            .await;

        match result {
            Ok(dto) => {
                tracing::info!(
                    user_id = %actor.id,
                    portfolio_id = %portfolio_id,
                    projects = dto.projects.len(),
                    social_networks = dto.social_networks.len(),
                    "portfolio created"
                );
                Ok(dto)
            }
            Err(err) => {
                if let ApplicationError::StorageFailure(msg) = &err {
                    tracing::error!(user_id = %actor.id, error = %msg, "portfolio creation failed");
                }
                self.discard_uploads(&written).await;
                Err(err)
            }
        }
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> ApplicationResult<()> {
        // A token can outlive its account.
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(ApplicationError::unauthorized("user no longer exists"));
        }
        Ok(())
    }

    async fn ensure_no_portfolio(&self, user_id: UserId) -> ApplicationResult<()> {
        if self.portfolio_repo.find_by_user_id(user_id).await?.is_some() {
            return Err(ApplicationError::DuplicatePortfolio);
        }
        Ok(())
    }

    /// Files first, then one transaction for the rows. Every reference written
    /// is pushed to `written` so the caller can clean up on failure.
    async fn store_and_persist(
        &self,
        user_id: UserId,
        portfolio_id: PortfolioId,
        input: ValidatedPortfolio,
        written: &mut Vec<String>,
    ) -> ApplicationResult<PortfolioDto> {
        let cv = self.store(FileCategory::Cv, input.cv, written).await?;

        let image = match input.image {
            Some(file) => Some(self.store(FileCategory::ProfileImage, file, written).await?),
            None => None,
        };

        let mut projects = Vec::with_capacity(input.projects.len());
        for upload in input.projects {
            let name = upload
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| default_project_name(&upload.image.filename));
            let image = self
                .store(FileCategory::ProjectImage(portfolio_id), upload.image, written)
                .await?;
            projects.push(NewProject::new(
                name,
                upload.description.unwrap_or_default(),
                upload.language.unwrap_or_default(),
                image,
            )?);
        }

        let aggregate = NewPortfolioAggregate {
            portfolio: NewPortfolio {
                id: portfolio_id,
                user_id,
                description: input.description,
                languages: input.languages,
                type_technologies: input.type_technologies,
                cv,
                image,
                created_at: self.clock.now(),
            },
            projects,
            social_links: input.social_links,
        };

        let created = self.portfolio_repo.create_aggregate(aggregate).await?;
        Ok(created.into())
    }

    async fn store(
        &self,
        category: FileCategory,
        file: UploadedFile,
        written: &mut Vec<String>,
    ) -> ApplicationResult<FileReference> {
        let stored = self
            .file_store
            .store(category, &file.filename, file.content)
            .await?;
        written.push(stored.reference.clone());
        Ok(FileReference::new(stored.reference)?)
    }

    async fn discard_uploads(&self, references: &[String]) {
        for reference in references {
            if let Err(err) = self.file_store.remove(reference).await {
                tracing::warn!(%reference, error = %err, "failed to remove orphaned upload");
            }
        }
    }
}
