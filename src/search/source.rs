//! Source filtering: which stored fields come back with each hit.

use crate::error::{PikeError, Result};

/// Source filter for a search request.
///
/// Either fetches the source restricted by include/exclude lists, or disables
/// source fetching entirely. A field must not be both included and excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    enabled: bool,
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl SourceFilter {
    /// Create a source filter from include and exclude lists.
    pub fn new<I, E, S, T>(includes: I, excludes: E) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let includes = collect_fields(includes)?;
        let excludes = collect_fields(excludes)?;
        if let Some(field) = includes.iter().find(|f| excludes.contains(f)) {
            return Err(PikeError::invalid_expression(format!(
                "field '{field}' is both included and excluded from the source"
            )));
        }

        Ok(SourceFilter {
            enabled: true,
            includes,
            excludes,
        })
    }

    /// Only return the given fields.
    pub fn includes<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(fields, Vec::<String>::new())
    }

    /// Return every field except the given ones.
    pub fn excludes<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Vec::<String>::new(), fields)
    }

    /// Do not return the source at all.
    pub fn disabled() -> Self {
        SourceFilter {
            enabled: false,
            includes: Vec::new(),
            excludes: Vec::new(),
        }
    }

    /// Whether the source is fetched.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Included fields.
    pub fn included(&self) -> &[String] {
        &self.includes
    }

    /// Excluded fields.
    pub fn excluded(&self) -> &[String] {
        &self.excludes
    }
}

fn collect_fields<I, S>(fields: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut collected: Vec<String> = Vec::new();
    for field in fields {
        let field = field.into();
        if field.is_empty() {
            return Err(PikeError::invalid_expression(
                "source filter cannot contain an empty field name",
            ));
        }
        if !collected.contains(&field) {
            collected.push(field);
        }
    }
    Ok(collected)
}
