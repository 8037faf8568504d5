// src/application/ports/storage.rs
use crate::application::ApplicationResult;
use crate::domain::portfolio::PortfolioId;
use async_trait::async_trait;
use bytes::Bytes;

/// Directory an upload is filed under, relative to the upload root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Cv,
    ProfileImage,
    ProjectImage(PortfolioId),
}

impl FileCategory {
    pub fn directory(&self) -> String {
        match self {
            FileCategory::Cv => "cv".to_string(),
            FileCategory::ProfileImage => "images".to_string(),
            FileCategory::ProjectImage(portfolio_id) => format!("projects/{portfolio_id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// `/`-separated path relative to the upload root, e.g. `cv/resume.pdf`.
    pub reference: String,
    pub size: u64,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `content` under `category`. The filename is sanitized and an
    /// existing file is never overwritten; colliding names are renamed.
    async fn store(
        &self,
        category: FileCategory,
        filename: &str,
        content: Bytes,
    ) -> ApplicationResult<StoredFile>;

    async fn remove(&self, reference: &str) -> ApplicationResult<()>;
}
