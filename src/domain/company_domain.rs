use url::Url;

use crate::error::ValidationError;

/// A website hostname used as the enrichment lookup key, e.g. `stripe.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDomain(String);

impl CompanyDomain {
    pub fn parse(raw: &str) -> Result<CompanyDomain, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("Domain must not be empty"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::new(format!(
                "`{}` is not a valid domain: it contains whitespace",
                trimmed
            )));
        }

        // Pasted URLs are reduced to their host.
        if trimmed.contains("://") {
            return match Url::parse(trimmed).ok().as_ref().and_then(Url::host_str) {
                Some(host) if !host.is_empty() => Ok(CompanyDomain(host.to_string())),
                _ => Err(ValidationError::new(format!(
                    "`{}` is not a valid domain",
                    trimmed
                ))),
            };
        }

        Ok(CompanyDomain(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompanyDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
