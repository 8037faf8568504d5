// src/infrastructure/storage/local.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::storage::{FileCategory, FileStore, StoredFile},
};
use crate::domain::{
    errors::DomainError,
    portfolio::{SanitizedFileName, sanitize_filename},
};
use async_trait::async_trait;
use bytes::Bytes;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt};

const MAX_NAME_ATTEMPTS: usize = 8;
const SUFFIX_LEN: usize = 8;

/// Stores uploads below `root`, one directory per [`FileCategory`].
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    max_bytes: u64,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    fn resolve(&self, reference: &str) -> ApplicationResult<PathBuf> {
        let mut path = self.root.clone();
        for part in reference.split('/') {
            if part.is_empty() || part == "." || part == ".." || part.contains(['\\', '\0']) {
                return Err(ApplicationError::invalid_input(format!(
                    "invalid file reference '{reference}'"
                )));
            }
            path.push(part);
        }
        Ok(path)
    }

    async fn create_unique(
        &self,
        directory: &Path,
        name: &SanitizedFileName,
    ) -> ApplicationResult<(fs::File, String)> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let candidate = if attempt == 0 {
                name.to_string()
            } else {
                let suffix = uuid::Uuid::new_v4().simple().to_string();
                name.with_suffix(&suffix[..SUFFIX_LEN])
            };

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(directory.join(&candidate))
                .await
            {
                Ok(file) => return Ok((file, candidate)),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(%candidate, "upload name taken, retrying with suffix");
                }
                Err(err) => return Err(io_failure("open", &candidate, err)),
            }
        }

        Err(ApplicationError::storage(format!(
            "could not find a free name for '{name}' after {MAX_NAME_ATTEMPTS} attempts"
        )))
    }
}

fn io_failure(action: &str, target: &str, err: std::io::Error) -> ApplicationError {
    ApplicationError::storage(format!("failed to {action} '{target}': {err}"))
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(
        &self,
        category: FileCategory,
        filename: &str,
        content: Bytes,
    ) -> ApplicationResult<StoredFile> {
        let size = content.len() as u64;
        if size > self.max_bytes {
            return Err(ApplicationError::invalid_input(format!(
                "file '{filename}' is {size} bytes, the limit is {}",
                self.max_bytes
            )));
        }

        let name = sanitize_filename(filename).map_err(DomainError::from)?;
        let relative_dir = category.directory();
        let directory = self.resolve(&relative_dir)?;
        fs::create_dir_all(&directory)
            .await
            .map_err(|err| io_failure("create directory", &relative_dir, err))?;

        let (mut file, stored_name) = self.create_unique(&directory, &name).await?;
        let reference = format!("{relative_dir}/{stored_name}");

        let written = async {
            file.write_all(&content).await?;
            file.flush().await
        }
        .await;

        if let Err(err) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(directory.join(&stored_name)).await {
                tracing::warn!(%reference, error = %cleanup, "failed to remove partial upload");
            }
            return Err(io_failure("write", &reference, err));
        }

        tracing::debug!(%reference, size, "upload stored");
        Ok(StoredFile { reference, size })
    }

    async fn remove(&self, reference: &str) -> ApplicationResult<()> {
        let path = self.resolve(reference)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_failure("remove", reference, err)),
        }
    }
}
