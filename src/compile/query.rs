//! Query expression rendering.

use chrono::SecondsFormat;
use serde_json::{Map, Value, json};

use crate::compile::number;
use crate::error::Result;
use crate::query::{BoolQuery, Bound, FieldValue, Occur, QueryExpr, RangeQuery};

/// Render one expression tree.
///
/// The match is exhaustive: adding a variant to [`QueryExpr`] without a
/// rendering here is a compile error, so no clause can be dropped silently.
pub(crate) fn render(expr: &QueryExpr) -> Result<Value> {
    let rendered = match expr {
        QueryExpr::MatchAll => json!({"match_all": {}}),
        QueryExpr::Term(term) => json!({
            "term": {term.field(): {"value": render_value(term.value())?}}
        }),
        QueryExpr::Range(range) => json!({"range": {range.field(): render_bounds(range)?}}),
        QueryExpr::Prefix(prefix) => json!({
            "prefix": {prefix.field(): {"value": prefix.value()}}
        }),
        QueryExpr::Wildcard(wildcard) => json!({
            "wildcard": {wildcard.field(): {"value": wildcard.pattern()}}
        }),
        QueryExpr::Ids(ids) => json!({"ids": {"values": ids.ids()}}),
        QueryExpr::MultiMatch(multi_match) => json!({
            "multi_match": {
                "query": multi_match.text(),
                "fields": multi_match.fields(),
            }
        }),
        QueryExpr::Exists(exists) => json!({"exists": {"field": exists.field()}}),
        QueryExpr::Bool(query) => json!({"bool": render_bool(query)?}),
    };
    Ok(rendered)
}

/// Render a scalar value.
pub(crate) fn render_value(value: &FieldValue) -> Result<Value> {
    let rendered = match value {
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Integer(i) => Value::from(*i),
        FieldValue::Float(f) => number(*f)?,
        FieldValue::Boolean(b) => Value::Bool(*b),
        FieldValue::DateTime(dt) => {
            Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
    };
    Ok(rendered)
}

fn render_bounds(range: &RangeQuery) -> Result<Value> {
    let mut bounds = Map::new();
    match range.lower_bound() {
        Bound::Included(v) => {
            bounds.insert("gte".to_string(), render_value(v)?);
        }
        Bound::Excluded(v) => {
            bounds.insert("gt".to_string(), render_value(v)?);
        }
        Bound::Unbounded => {}
    }
    match range.upper_bound() {
        Bound::Included(v) => {
            bounds.insert("lte".to_string(), render_value(v)?);
        }
        Bound::Excluded(v) => {
            bounds.insert("lt".to_string(), render_value(v)?);
        }
        Bound::Unbounded => {}
    }
    Ok(Value::Object(bounds))
}

fn render_bool(query: &BoolQuery) -> Result<Value> {
    let mut body = Map::new();
    for occur in Occur::ALL {
        let clauses = query.clauses(occur);
        if clauses.is_empty() {
            continue;
        }
        let rendered = clauses.iter().map(render).collect::<Result<Vec<_>>>()?;
        body.insert(occur_key(occur).to_string(), Value::Array(rendered));
    }
    Ok(Value::Object(body))
}

fn occur_key(occur: Occur) -> &'static str {
    match occur {
        Occur::Must => "must",
        Occur::Filter => "filter",
        Occur::Should => "should",
        Occur::MustNot => "must_not",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PikeError;
    use crate::query::{IdsQuery, MultiMatchQuery, RangeQuery};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_render_leaves() {
        assert_eq!(
            render(&QueryExpr::match_all()).unwrap(),
            json!({"match_all": {}})
        );
        assert_eq!(
            render(&QueryExpr::term("desc", "浣熊").unwrap()).unwrap(),
            json!({"term": {"desc": {"value": "浣熊"}}})
        );
        assert_eq!(
            render(&QueryExpr::prefix("desc", "小").unwrap()).unwrap(),
            json!({"prefix": {"desc": {"value": "小"}}})
        );
        assert_eq!(
            render(&QueryExpr::wildcard("title", "小浣熊*").unwrap()).unwrap(),
            json!({"wildcard": {"title": {"value": "小浣熊*"}}})
        );
        assert_eq!(
            render(&QueryExpr::exists("title").unwrap()).unwrap(),
            json!({"exists": {"field": "title"}})
        );
    }

    #[test]
    fn test_render_ids_and_multi_match() {
        let ids = IdsQuery::new(["1", "2"]).unwrap().with_ids(["3"]).unwrap();
        assert_eq!(
            render(&QueryExpr::from(ids)).unwrap(),
            json!({"ids": {"values": ["1", "2", "3"]}})
        );

        let multi_match = MultiMatchQuery::new("非常不错", ["title"])
            .unwrap()
            .with_field("desc")
            .unwrap();
        assert_eq!(
            render(&QueryExpr::from(multi_match)).unwrap(),
            json!({"multi_match": {"query": "非常不错", "fields": ["title", "desc"]}})
        );
    }

    #[test]
    fn test_render_range() {
        let range = RangeQuery::builder("price").gte(0).lte(10).build().unwrap();
        assert_eq!(
            render(&QueryExpr::from(range)).unwrap(),
            json!({"range": {"price": {"gte": 0, "lte": 10}}})
        );

        let range = RangeQuery::builder("price").gt(1.5).build().unwrap();
        assert_eq!(
            render(&QueryExpr::from(range)).unwrap(),
            json!({"range": {"price": {"gt": 1.5}}})
        );

        let since = Utc.with_ymd_and_hms(2022, 2, 2, 0, 0, 0).unwrap();
        let range = RangeQuery::builder("create_time").lt(since).build().unwrap();
        assert_eq!(
            render(&QueryExpr::from(range)).unwrap(),
            json!({"range": {"create_time": {"lt": "2022-02-02T00:00:00.000Z"}}})
        );
    }

    #[test]
    fn test_render_bool_omits_empty_occurrences() {
        let query: QueryExpr = QueryExpr::bool()
            .must(QueryExpr::term("desc", "浣熊").unwrap())
            .must_not(QueryExpr::term("title", "大浣熊").unwrap())
            .into();
        assert_eq!(
            render(&query).unwrap(),
            json!({"bool": {
                "must": [{"term": {"desc": {"value": "浣熊"}}}],
                "must_not": [{"term": {"title": {"value": "大浣熊"}}}]
            }})
        );

        let empty: QueryExpr = QueryExpr::bool().into();
        assert_eq!(render(&empty).unwrap(), json!({"bool": {}}));
    }

    #[test]
    fn test_non_finite_value_is_unsupported() {
        let query = QueryExpr::term("price", f64::NAN).unwrap();
        let err = render(&query).unwrap_err();
        assert!(matches!(err, PikeError::UnsupportedQuery(_)));
    }
}
