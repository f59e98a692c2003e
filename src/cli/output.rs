//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregation::AggregationResult;
use crate::cli::args::{OutputFormat, PikeArgs};
use crate::compile::WireBody;
use crate::error::Result;
use crate::search::{SearchResult, TotalHitsRelation};

/// Summary of a validated request file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationReport {
    pub target: String,
    pub query_kind: String,
    pub clause_count: usize,
    pub query_depth: usize,
    pub has_post_filter: bool,
    pub sort_fields: Vec<String>,
    pub aggregations: Vec<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &PikeArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output a compiled wire body.
///
/// The body is JSON either way; human output is always indented.
pub fn output_wire_body(body: &WireBody, args: &PikeArgs) -> Result<()> {
    let pretty = args.pretty || args.output_format == OutputFormat::Human;
    println!("{}", body.to_json_string(pretty)?);
    Ok(())
}

/// Output a decoded search result.
pub fn output_search_result(result: &SearchResult, max_hits: usize, args: &PikeArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Human => {
            print!("{}", format_search_result(result, max_hits));
            Ok(())
        }
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &PikeArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    if let Some(obj) = value.as_object() {
        for (key, value) in obj {
            println!("{}: {}", format_key(key), format_scalar(value));
        }
    } else {
        println!("{}", format_scalar(&value));
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PikeArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Render a search result as text.
pub fn format_search_result(result: &SearchResult, max_hits: usize) -> String {
    let mut out = String::new();

    out.push_str("Search Results:\n");
    out.push_str("═══════════════\n");
    match &result.total {
        Some(total) if total.relation == TotalHitsRelation::Gte => {
            out.push_str(&format!("Total hits: {}+\n", total.value));
        }
        Some(total) => out.push_str(&format!("Total hits: {}\n", total.value)),
        None => out.push_str("Total hits: not tracked\n"),
    }
    if let Some(took) = result.took {
        out.push_str(&format!("Search time: {took}ms\n"));
    }
    if result.timed_out {
        out.push_str("Warning: the search timed out, results may be partial\n");
    }

    for (i, hit) in result.hits.iter().take(max_hits).enumerate() {
        out.push('\n');
        match hit.score {
            Some(score) => out.push_str(&format!(
                "Result {}: {} (Score: {score:.3})\n",
                i + 1,
                hit.id
            )),
            None => out.push_str(&format!("Result {}: {}\n", i + 1, hit.id)),
        }
        out.push_str("─────────────\n");
        if let Some(source) = &hit.source {
            for (field, value) in source {
                out.push_str(&format!("{field}: {}\n", format_scalar(value)));
            }
        }
        let mut highlighted: Vec<_> = hit.highlight.iter().collect();
        highlighted.sort_by(|a, b| a.0.cmp(b.0));
        for (field, fragments) in highlighted {
            out.push_str(&format!("{field} (highlight): {}\n", fragments.join(" … ")));
        }
    }
    if result.hits.len() > max_hits {
        out.push_str(&format!("\n... {} more hits\n", result.hits.len() - max_hits));
    }

    if !result.aggregations.is_empty() {
        out.push('\n');
        out.push_str("Aggregations:\n");
        out.push_str("─────────────\n");
        let mut names: Vec<_> = result.aggregations.keys().collect();
        names.sort();
        for name in names {
            match &result.aggregations[name] {
                AggregationResult::Buckets(buckets) => {
                    out.push_str(&format!("{name}:\n"));
                    for bucket in buckets {
                        out.push_str(&format!(
                            "  {} ({})\n",
                            bucket.key_string(),
                            bucket.doc_count
                        ));
                    }
                }
                AggregationResult::Metric(metric) => match metric.value() {
                    Some(value) => out.push_str(&format!("{name}: {value}\n")),
                    None => out.push_str(&format!("{name}: undefined\n")),
                },
            }
        }
    }
    out
}

fn format_key(key: &str) -> String {
    let mut words = key.split('_');
    let mut out = String::new();
    if let Some(first) = words.next() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    for word in words {
        out.push(' ');
        out.push_str(word);
    }
    out
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_scalar)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
