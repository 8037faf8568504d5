// src/domain/portfolio/social.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::portfolio::entity::NewSocialLink;

const RECORD_DELIMITER: char = ',';
const FIELD_DELIMITER: char = ':';

/// Parse `"GitHub:https://github.com/ada, Twitter:https://x.com/ada"` into links.
///
/// Records are split on `,`, then on the first `:` so URLs keep their scheme.
/// Blank records are skipped; a record without a `:` aborts the whole parse.
pub fn parse_social_links(input: &str) -> DomainResult<Vec<NewSocialLink>> {
    input
        .split(RECORD_DELIMITER)
        .map(str::trim)
        .filter(|record| !record.is_empty())
        .map(|record| {
            let (platform, url) = record.split_once(FIELD_DELIMITER).ok_or_else(|| {
                DomainError::Validation(format!(
                    "social_networks entry '{record}' must look like 'platform:url'"
                ))
            })?;
            NewSocialLink::new(platform, url)
        })
        .collect()
}
