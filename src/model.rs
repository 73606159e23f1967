//! Records returned by the Keyword.com API and their flattened form.
//!
//! Attributes are held as raw JSON values: records are not validated, so a
//! missing or mistyped attribute travels as `null` into the output rows
//! instead of failing the request.

use serde::Serialize;
use serde_json::Value;

use crate::error::ParseError;

/// Attribute of a record, `null` when absent or when the record is not an object.
fn attribute(record: &Value, key: &str) -> Value {
    record.get(key).cloned().unwrap_or(Value::Null)
}

/// Numeric reading of a loosely typed attribute.
///
/// Numeric strings count as numbers (surrounding whitespace ignored, blank is
/// zero), as do booleans and null. Anything else has no numeric reading.
pub fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        _ => None,
    }
}

/// A project from the active groups listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub project_id: Value,
    pub name: Value,
    /// Keyword counts by status. Only `ACTIVE` is reported.
    pub keywords_count: Value,
    pub tags_count: Value,
    pub tags: Vec<Tag>,
}

impl Project {
    /// Reads one entry of the groups listing.
    ///
    /// The live API nests the project under `attributes`; a bare project
    /// object is accepted as well. Only the entry itself has to be an object.
    pub fn from_entry(entry: &Value) -> Result<Self, ParseError> {
        if !entry.is_object() {
            return Err(ParseError::UnexpectedShape(
                "groups listing entry is not an object".to_string(),
            ));
        }
        let record = match entry.get("attributes") {
            Some(attributes @ Value::Object(_)) => attributes,
            Some(_) => {
                return Err(ParseError::UnexpectedShape(
                    "group attributes are not an object".to_string(),
                ))
            }
            None => entry,
        };

        let tags = record
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().map(Tag::from_value).collect())
            .unwrap_or_default();

        Ok(Self {
            project_id: attribute(record, "project_id"),
            name: attribute(record, "name"),
            keywords_count: attribute(record, "keywords_count"),
            tags_count: attribute(record, "tags_count"),
            tags,
        })
    }

    pub fn active_keywords(&self) -> Value {
        attribute(&self.keywords_count, "ACTIVE")
    }

    pub fn has_tags(&self) -> bool {
        loose_number(&self.tags_count).map_or(false, |n| n > 0.0)
    }
}

/// A tag inside a project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub id: Value,
    pub name: Value,
    pub created_at: Value,
    pub updated_at: Value,
    pub keywords_count: Value,
}

impl Tag {
    /// Non-object entries yield a tag with every attribute null.
    pub fn from_value(record: &Value) -> Self {
        Self {
            id: attribute(record, "id"),
            name: attribute(record, "name"),
            created_at: attribute(record, "created_at"),
            updated_at: attribute(record, "updated_at"),
            keywords_count: attribute(record, "keywords_count"),
        }
    }
}

/// A project joined with one of its tags (or with no tag at all).
///
/// This is the unit of SOV lookups: one series request is made per group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatGroup {
    pub project_id: Value,
    pub project_name: Value,
    pub project_keywords_count: Value,
    pub project_tags_count: Value,
    pub tag_id: Value,
    pub tag_name: Value,
    pub tag_created_at: Value,
    pub tag_updated_at: Value,
    pub tag_keywords_count: Value,
}

impl FlatGroup {
    /// Group for a project without tags; all tag attributes are null.
    pub fn for_project(project: &Project) -> Self {
        Self {
            project_id: project.project_id.clone(),
            project_name: project.name.clone(),
            project_keywords_count: project.active_keywords(),
            project_tags_count: project.tags_count.clone(),
            ..Self::default()
        }
    }

    pub fn for_tag(project: &Project, tag: &Tag) -> Self {
        Self {
            tag_id: tag.id.clone(),
            tag_name: tag.name.clone(),
            tag_created_at: tag.created_at.clone(),
            tag_updated_at: tag.updated_at.clone(),
            tag_keywords_count: tag.keywords_count.clone(),
            ..Self::for_project(project)
        }
    }

    /// Tag id to scope the series request with, if the group has a usable one.
    ///
    /// Null, zero, `false` and empty strings mean "whole project".
    pub fn tag_filter(&self) -> Option<String> {
        match &self.tag_id {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// One data point of the share-of-voice series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricPoint {
    pub url: Value,
    pub clicks: Value,
    /// Share in percent (0-100).
    pub percentage: Value,
}

impl MetricPoint {
    /// Non-object points yield a point with every attribute null.
    pub fn from_value(record: &Value) -> Self {
        Self {
            url: attribute(record, "url"),
            clicks: attribute(record, "clicks"),
            percentage: attribute(record, "percentage"),
        }
    }

    /// Share as a fraction; null when the percentage is not numeric.
    pub fn share(&self) -> Value {
        self.percentage
            .as_f64()
            .and_then(|p| serde_json::Number::from_f64(p / 100.0))
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_from_partial_record() {
        let project = Project::from_entry(&json!({"project_id": 3})).unwrap();
        assert_eq!(project.project_id, json!(3));
        assert_eq!(project.name, Value::Null);
        assert_eq!(project.active_keywords(), Value::Null);
        assert!(!project.has_tags());
        assert!(project.tags.is_empty());
    }

    #[test]
    fn test_entry_shapes() {
        let wrapped =
            Project::from_entry(&json!({"attributes": {"project_id": 1, "name": "A"}})).unwrap();
        assert_eq!(wrapped.name, json!("A"));

        let bare = Project::from_entry(&json!({"project_id": 2, "name": "B"})).unwrap();
        assert_eq!(bare.project_id, json!(2));

        assert!(Project::from_entry(&json!(5)).is_err());
        assert!(Project::from_entry(&json!({"attributes": null})).is_err());
    }

    #[test]
    fn test_malformed_tag_keeps_project() {
        let project = Project::from_entry(&json!({
            "attributes": {"project_id": 7, "name": "P", "tags_count": 2, "tags": [1, null]}
        }))
        .unwrap();

        assert_eq!(project.project_id, json!(7));
        assert_eq!(project.name, json!("P"));
        assert_eq!(project.tags.len(), 2);
        assert_eq!(project.tags[0], Tag::default());
        assert_eq!(project.tags[1], Tag::default());
    }

    #[test]
    fn test_numeric_string_tags_count() {
        let mut project = Project {
            tags_count: json!("2"),
            ..Default::default()
        };
        assert!(project.has_tags());

        project.tags_count = json!(" 0 ");
        assert!(!project.has_tags());

        project.tags_count = json!("many");
        assert!(!project.has_tags());
    }

    #[test]
    fn test_loose_number() {
        assert_eq!(loose_number(&json!(7)), Some(7.0));
        assert_eq!(loose_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(loose_number(&json!("")), Some(0.0));
        assert_eq!(loose_number(&json!(true)), Some(1.0));
        assert_eq!(loose_number(&json!("7a")), None);
        assert_eq!(loose_number(&json!([7])), None);
    }

    #[test]
    fn test_tag_filter() {
        let mut group = FlatGroup::default();
        assert_eq!(group.tag_filter(), None);

        group.tag_id = json!(0);
        assert_eq!(group.tag_filter(), None);

        group.tag_id = json!(23015);
        assert_eq!(group.tag_filter().as_deref(), Some("23015"));

        group.tag_id = json!("abc");
        assert_eq!(group.tag_filter().as_deref(), Some("abc"));
    }

    #[test]
    fn test_metric_point_from_scalar() {
        assert_eq!(MetricPoint::from_value(&json!(4)), MetricPoint::default());
        let point = MetricPoint::from_value(&json!({"url": "/x", "clicks": 3}));
        assert_eq!(point.url, json!("/x"));
        assert_eq!(point.percentage, Value::Null);
    }

    #[test]
    fn test_share() {
        let point = MetricPoint {
            percentage: json!(45),
            ..Default::default()
        };
        assert_eq!(point.share(), json!(0.45));

        let point = MetricPoint {
            percentage: json!("n/a"),
            ..Default::default()
        };
        assert_eq!(point.share(), Value::Null);
    }
}
