//! Highlighting of matched terms in search hits.

use crate::error::{PikeError, Result};

/// Highlight settings for a search request.
///
/// The backend only highlights analyzed fields. With `require_field_match`
/// set (the default), only fields that the query actually searched are
/// highlighted; clear it to highlight every listed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpec {
    /// Fields to highlight, in insertion order.
    fields: Vec<String>,
    /// Tags inserted before each highlighted term.
    pre_tags: Vec<String>,
    /// Tags inserted after each highlighted term.
    post_tags: Vec<String>,
    /// Only highlight fields the query searched.
    require_field_match: bool,
    /// Length of each fragment in characters.
    fragment_size: Option<usize>,
    /// Maximum number of fragments per field.
    number_of_fragments: Option<usize>,
}

impl HighlightSpec {
    /// Start building a highlight specification.
    ///
    /// ```
    /// use pike::search::HighlightSpec;
    ///
    /// let highlight = HighlightSpec::builder()
    ///     .field("desc")
    ///     .field("title")
    ///     .pre_tag("<span style='color:red'>")
    ///     .post_tag("</span>")
    ///     .require_field_match(false)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(highlight.fields(), &["desc", "title"]);
    /// ```
    pub fn builder() -> HighlightSpecBuilder {
        HighlightSpecBuilder::default()
    }

    /// Get the highlighted fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Get the opening tags.
    pub fn pre_tags(&self) -> &[String] {
        &self.pre_tags
    }

    /// Get the closing tags.
    pub fn post_tags(&self) -> &[String] {
        &self.post_tags
    }

    /// Whether only queried fields are highlighted.
    pub fn require_field_match(&self) -> bool {
        self.require_field_match
    }

    /// Get the fragment size, if set.
    pub fn fragment_size(&self) -> Option<usize> {
        self.fragment_size
    }

    /// Get the maximum number of fragments, if set.
    pub fn number_of_fragments(&self) -> Option<usize> {
        self.number_of_fragments
    }
}

/// Builder for [`HighlightSpec`].
#[derive(Debug, Clone)]
pub struct HighlightSpecBuilder {
    spec: HighlightSpec,
}

impl Default for HighlightSpecBuilder {
    fn default() -> Self {
        HighlightSpecBuilder {
            spec: HighlightSpec {
                fields: Vec::new(),
                pre_tags: Vec::new(),
                post_tags: Vec::new(),
                require_field_match: true,
                fragment_size: None,
                number_of_fragments: None,
            },
        }
    }
}

impl HighlightSpecBuilder {
    /// Highlight one more field.
    pub fn field<S: Into<String>>(mut self, field: S) -> Self {
        let field = field.into();
        if !self.spec.fields.contains(&field) {
            self.spec.fields.push(field);
        }
        self
    }

    /// Add an opening tag.
    pub fn pre_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.spec.pre_tags.push(tag.into());
        self
    }

    /// Add a closing tag.
    pub fn post_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.spec.post_tags.push(tag.into());
        self
    }

    /// Set whether only queried fields are highlighted.
    pub fn require_field_match(mut self, require: bool) -> Self {
        self.spec.require_field_match = require;
        self
    }

    /// Set the fragment size.
    pub fn fragment_size(mut self, fragment_size: usize) -> Self {
        self.spec.fragment_size = Some(fragment_size);
        self
    }

    /// Set the maximum number of fragments per field.
    pub fn number_of_fragments(mut self, number_of_fragments: usize) -> Self {
        self.spec.number_of_fragments = Some(number_of_fragments);
        self
    }

    /// Validate and build the highlight specification.
    pub fn build(self) -> Result<HighlightSpec> {
        let spec = self.spec;
        if spec.fields.is_empty() {
            return Err(PikeError::invalid_expression(
                "highlight needs at least one field",
            ));
        }
        if spec.fields.iter().any(String::is_empty) {
            return Err(PikeError::invalid_expression(
                "highlight field names cannot be empty",
            ));
        }
        if spec.pre_tags.is_empty() != spec.post_tags.is_empty() {
            return Err(PikeError::invalid_expression(
                "highlight pre and post tags must be set together",
            ));
        }
        if spec.fragment_size == Some(0) {
            return Err(PikeError::invalid_expression(
                "highlight fragment size must be positive",
            ));
        }
        Ok(spec)
    }
}
