// src/domain/portfolio/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

macro_rules! positive_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> DomainResult<Self> {
                if id <= 0 {
                    Err(DomainError::Validation(concat!($label, " id must be positive").into()))
                } else {
                    Ok(Self(id))
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(PortfolioId, "portfolio");
positive_id!(ProjectId, "project");
positive_id!(SocialLinkId, "social link");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("description cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Technology category of the portfolio, e.g. "Web" or "Mobile".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologyCategory(String);

impl TechnologyCategory {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "type_technologies cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<TechnologyCategory> for String {
    fn from(value: TechnologyCategory) -> Self {
        value.0
    }
}

/// Ordered list of programming languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languages(Vec<String>);

impl Languages {
    pub fn new(values: Vec<String>) -> DomainResult<Self> {
        let values: Vec<String> = values
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        if values.is_empty() {
            return Err(DomainError::Validation(
                "languages must contain at least one entry".into(),
            ));
        }
        Ok(Self(values))
    }

    /// Parse the comma-delimited form sent by clients (`"Rust, Go"`).
    pub fn parse(input: &str) -> DomainResult<Self> {
        Self::new(input.split(',').map(str::to_string).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Languages> for Vec<String> {
    fn from(value: Languages) -> Self {
        value.0
    }
}

/// Upload-root-relative path of a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference(String);

impl FileReference {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "file reference cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<FileReference> for String {
    fn from(value: FileReference) -> Self {
        value.0
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
