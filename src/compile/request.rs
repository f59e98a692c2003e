//! Search request rendering.

use serde_json::{Map, Value, json};

use crate::aggregation::AggregationSpec;
use crate::compile::{QueryCompiler, WireBody};
use crate::error::Result;
use crate::search::{HighlightSpec, SearchRequest, SortSpec, SourceFilter};

pub(crate) fn render(compiler: &QueryCompiler, request: &SearchRequest) -> Result<WireBody> {
    let mut body = WireBody::new();

    body.insert("query", compiler.compile_query(request.query())?);
    // Filter context lives under its own key so it never affects scoring.
    if let Some(filter) = request.post_filter() {
        body.insert("post_filter", compiler.compile_query(filter)?);
    }

    if let Some(from) = request.from() {
        body.insert("from", Value::from(from));
    }
    if let Some(size) = request.size().or(compiler.default_size()) {
        body.insert("size", Value::from(size));
    }

    if !request.sort().is_empty() {
        body.insert("sort", render_sort(request.sort()));
    }
    if let Some(source) = request.source() {
        body.insert("_source", render_source(source));
    }
    if let Some(highlight) = request.highlight() {
        body.insert("highlight", render_highlight(highlight));
    }
    if !request.aggregations().is_empty() {
        body.insert("aggs", render_aggregations(request.aggregations()));
    }
    if let Some(track) = request.track_total_hits() {
        body.insert("track_total_hits", Value::Bool(track));
    }

    Ok(body)
}

fn render_sort(sort: &[SortSpec]) -> Value {
    sort.iter()
        .map(|spec| json!({spec.field(): {"order": spec.order().as_str()}}))
        .collect()
}

fn render_source(source: &SourceFilter) -> Value {
    if !source.is_enabled() {
        return Value::Bool(false);
    }
    let mut rendered = Map::new();
    if !source.included().is_empty() {
        rendered.insert("includes".to_string(), json!(source.included()));
    }
    if !source.excluded().is_empty() {
        rendered.insert("excludes".to_string(), json!(source.excluded()));
    }
    Value::Object(rendered)
}

fn render_highlight(highlight: &HighlightSpec) -> Value {
    let fields: Map<String, Value> = highlight
        .fields()
        .iter()
        .map(|field| (field.clone(), json!({})))
        .collect();

    let mut rendered = Map::new();
    rendered.insert("fields".to_string(), Value::Object(fields));
    if !highlight.pre_tags().is_empty() {
        rendered.insert("pre_tags".to_string(), json!(highlight.pre_tags()));
        rendered.insert("post_tags".to_string(), json!(highlight.post_tags()));
    }
    rendered.insert(
        "require_field_match".to_string(),
        Value::Bool(highlight.require_field_match()),
    );
    if let Some(fragment_size) = highlight.fragment_size() {
        rendered.insert("fragment_size".to_string(), Value::from(fragment_size));
    }
    if let Some(number_of_fragments) = highlight.number_of_fragments() {
        rendered.insert(
            "number_of_fragments".to_string(),
            Value::from(number_of_fragments),
        );
    }
    Value::Object(rendered)
}

fn render_aggregations(aggregations: &[AggregationSpec]) -> Value {
    let rendered: Map<String, Value> = aggregations
        .iter()
        .map(|spec| (spec.name().to_string(), render_aggregation(spec)))
        .collect();
    Value::Object(rendered)
}

fn render_aggregation(spec: &AggregationSpec) -> Value {
    match spec {
        AggregationSpec::Terms(terms) => {
            let mut params = Map::new();
            params.insert("field".to_string(), json!(terms.field()));
            if let Some(size) = terms.size() {
                params.insert("size".to_string(), Value::from(size));
            }
            json!({"terms": params})
        }
        AggregationSpec::Metric(metric) => {
            json!({metric.kind().name(): {"field": metric.field()}})
        }
    }
}
