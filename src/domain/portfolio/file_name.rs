// src/domain/portfolio/file_name.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileNameError {
    #[error("filename is empty")]
    Empty,
    #[error("filename contains a NUL byte")]
    NulByte,
    #[error("filename '{0}' contains a parent-directory component")]
    Traversal(String),
    #[error("filename '{0}' has no usable characters")]
    NothingUsable(String),
}

impl From<FileNameError> for DomainError {
    fn from(err: FileNameError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

/// A client filename reduced to a slugged stem and an optional lower-case
/// alphanumeric extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFileName {
    stem: String,
    extension: Option<String>,
}

impl SanitizedFileName {
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// `stem-suffix.ext`, used when the plain name is already taken.
    pub fn with_suffix(&self, suffix: &str) -> String {
        self.render(&format!("{}-{suffix}", self.stem))
    }

    fn render(&self, stem: &str) -> String {
        match &self.extension {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem.to_string(),
        }
    }
}

impl std::fmt::Display for SanitizedFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&self.stem))
    }
}

pub fn sanitize_filename(raw: &str) -> Result<SanitizedFileName, FileNameError> {
    if raw.contains('\0') {
        return Err(FileNameError::NulByte);
    }

    let components: Vec<&str> = raw.split(['/', '\\']).collect();
    if components.iter().any(|part| part.trim() == "..") {
        return Err(FileNameError::Traversal(raw.to_string()));
    }

    let base = components
        .last()
        .map(|base| base.trim())
        .filter(|base| !base.is_empty())
        .ok_or(FileNameError::Empty)?;

    let (stem, extension) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (base, None),
    };

    let stem = slug::slugify(stem);
    if stem.is_empty() {
        return Err(FileNameError::NothingUsable(raw.to_string()));
    }

    let extension = extension
        .map(|ext| {
            ext.chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
        })
        .filter(|ext| !ext.is_empty());

    Ok(SanitizedFileName { stem, extension })
}
