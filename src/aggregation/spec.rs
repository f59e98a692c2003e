//! Aggregation requests.

use crate::error::{PikeError, Result};

/// Kind of single-value metric aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Average of the field values.
    Avg,
    /// Sum of the field values.
    Sum,
    /// Minimum field value.
    Min,
    /// Maximum field value.
    Max,
    /// Number of values (not documents) seen.
    ValueCount,
    /// Approximate count of distinct values.
    Cardinality,
}

impl MetricKind {
    /// All metric kinds.
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Avg,
        MetricKind::Sum,
        MetricKind::Min,
        MetricKind::Max,
        MetricKind::ValueCount,
        MetricKind::Cardinality,
    ];

    /// Lowercase name, matching the aggregation type name.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Avg => "avg",
            MetricKind::Sum => "sum",
            MetricKind::Min => "min",
            MetricKind::Max => "max",
            MetricKind::ValueCount => "value_count",
            MetricKind::Cardinality => "cardinality",
        }
    }

    /// Parse a lowercase name produced by [`MetricKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        MetricKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// A terms (bucket) aggregation: one bucket per distinct field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsAggregation {
    name: String,
    field: String,
    size: Option<usize>,
}

impl TermsAggregation {
    /// Create a terms aggregation.
    pub fn new<N, F>(name: N, field: F) -> Result<Self>
    where
        N: Into<String>,
        F: Into<String>,
    {
        let name = name.into();
        let field = field.into();
        require_name_and_field(&name, &field)?;
        Ok(TermsAggregation {
            name,
            field,
            size: None,
        })
    }

    /// Limit the number of returned buckets. Must be at least 1.
    pub fn with_size(mut self, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(PikeError::invalid_expression(format!(
                "terms aggregation '{}' needs a size of at least 1",
                self.name
            )));
        }
        self.size = Some(size);
        Ok(self)
    }

    /// Get the aggregation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the grouped field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the bucket limit, if set.
    pub fn size(&self) -> Option<usize> {
        self.size
    }
}

/// A single-value metric aggregation over a numeric field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricAggregation {
    name: String,
    kind: MetricKind,
    field: String,
}

impl MetricAggregation {
    /// Create a metric aggregation.
    pub fn new<N, F>(name: N, kind: MetricKind, field: F) -> Result<Self>
    where
        N: Into<String>,
        F: Into<String>,
    {
        let name = name.into();
        let field = field.into();
        require_name_and_field(&name, &field)?;
        Ok(MetricAggregation { name, kind, field })
    }

    /// Get the aggregation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the metric kind.
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Get the aggregated field.
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// An aggregation request.
///
/// The name is chosen by the caller and is the key under which the result is
/// found in [`crate::search::SearchResult`]. It must be unique within one
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationSpec {
    /// Bucket aggregation.
    Terms(TermsAggregation),
    /// Single-value metric.
    Metric(MetricAggregation),
}

impl AggregationSpec {
    /// Terms aggregation with the backend's default bucket count.
    pub fn terms<N, F>(name: N, field: F) -> Result<Self>
    where
        N: Into<String>,
        F: Into<String>,
    {
        Ok(AggregationSpec::Terms(TermsAggregation::new(name, field)?))
    }

    /// Metric aggregation of the given kind.
    pub fn metric<N, F>(name: N, kind: MetricKind, field: F) -> Result<Self>
    where
        N: Into<String>,
        F: Into<String>,
    {
        Ok(AggregationSpec::Metric(MetricAggregation::new(
            name, kind, field,
        )?))
    }

    /// Average metric.
    pub fn avg<N: Into<String>, F: Into<String>>(name: N, field: F) -> Result<Self> {
        Self::metric(name, MetricKind::Avg, field)
    }

    /// Sum metric.
    pub fn sum<N: Into<String>, F: Into<String>>(name: N, field: F) -> Result<Self> {
        Self::metric(name, MetricKind::Sum, field)
    }

    /// Minimum metric.
    pub fn min<N: Into<String>, F: Into<String>>(name: N, field: F) -> Result<Self> {
        Self::metric(name, MetricKind::Min, field)
    }

    /// Maximum metric.
    pub fn max<N: Into<String>, F: Into<String>>(name: N, field: F) -> Result<Self> {
        Self::metric(name, MetricKind::Max, field)
    }

    /// Get the aggregation name.
    pub fn name(&self) -> &str {
        match self {
            AggregationSpec::Terms(terms) => terms.name(),
            AggregationSpec::Metric(metric) => metric.name(),
        }
    }

    /// Get the field the aggregation reads.
    pub fn field(&self) -> &str {
        match self {
            AggregationSpec::Terms(terms) => terms.field(),
            AggregationSpec::Metric(metric) => metric.field(),
        }
    }

    /// Aggregation type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            AggregationSpec::Terms(_) => "terms",
            AggregationSpec::Metric(metric) => metric.kind().name(),
        }
    }
}

impl From<TermsAggregation> for AggregationSpec {
    fn from(terms: TermsAggregation) -> Self {
        AggregationSpec::Terms(terms)
    }
}

impl From<MetricAggregation> for AggregationSpec {
    fn from(metric: MetricAggregation) -> Self {
        AggregationSpec::Metric(metric)
    }
}

fn require_name_and_field(name: &str, field: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PikeError::invalid_expression(
            "aggregation needs a non-empty name",
        ));
    }
    if field.is_empty() {
        return Err(PikeError::invalid_expression(format!(
            "aggregation '{name}' needs a field"
        )));
    }
    Ok(())
}
