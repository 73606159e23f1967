//! Field catalog and row formatting.
//!
//! Every field the connector can report is a [`FieldId`] variant, so adding
//! one forces both its descriptor and its value lookup to be filled in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{FlatGroup, MetricPoint};

/// Value type of a field as understood by the reporting platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Number,
    Text,
    Percent,
}

/// Dimensions describe/group rows, metrics aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Concept {
    Dimension,
    Metric,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aggregation {
    Sum,
}

/// Schema entry for one field.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub concept: Concept,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
}

impl FieldDescriptor {
    /// Placeholder for an id outside the catalog; its values are always `""`.
    pub fn unknown(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            field_type: FieldType::Text,
            concept: Concept::Dimension,
            aggregation: None,
        }
    }
}

/// A field requested by the caller, identified by its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestedField {
    pub name: String,
}

impl RequestedField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One row of the output table, aligned with the requested field list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OutputRow {
    pub values: Vec<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    ProjectId,
    ProjectName,
    ProjectKeywordsCount,
    ProjectTagsCount,
    TagId,
    TagName,
    TagKeywordsCount,
    TagCreatedAt,
    TagUpdatedAt,
    Date,
    Url,
    Clicks,
    Share,
}

impl FieldId {
    /// Catalog order: dimensions first, then metrics.
    pub const ALL: [FieldId; 13] = [
        FieldId::ProjectId,
        FieldId::ProjectName,
        FieldId::ProjectKeywordsCount,
        FieldId::ProjectTagsCount,
        FieldId::TagId,
        FieldId::TagName,
        FieldId::TagKeywordsCount,
        FieldId::TagCreatedAt,
        FieldId::TagUpdatedAt,
        FieldId::Date,
        FieldId::Url,
        FieldId::Clicks,
        FieldId::Share,
    ];

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::ProjectId => "project_id",
            FieldId::ProjectName => "project_name",
            FieldId::ProjectKeywordsCount => "project_keywords_count",
            FieldId::ProjectTagsCount => "project_tags_count",
            FieldId::TagId => "tag_id",
            FieldId::TagName => "tag_name",
            FieldId::TagKeywordsCount => "tag_keywords_count",
            FieldId::TagCreatedAt => "tag_created_at",
            FieldId::TagUpdatedAt => "tag_updated_at",
            FieldId::Date => "date",
            FieldId::Url => "url",
            FieldId::Clicks => "clicks",
            FieldId::Share => "share",
        }
    }

    pub fn descriptor(self) -> FieldDescriptor {
        let (name, field_type) = match self {
            FieldId::ProjectId => ("Project ID", FieldType::Number),
            FieldId::ProjectName => ("Project Name", FieldType::Text),
            FieldId::ProjectKeywordsCount => ("Project Keywords Count", FieldType::Number),
            FieldId::ProjectTagsCount => ("Project Tags Count", FieldType::Number),
            FieldId::TagId => ("Tag ID", FieldType::Number),
            FieldId::TagName => ("Tag Name", FieldType::Text),
            FieldId::TagKeywordsCount => ("Tag Keywords Count", FieldType::Number),
            FieldId::TagCreatedAt => ("Tag Created At", FieldType::Text),
            FieldId::TagUpdatedAt => ("Tag Updated At", FieldType::Text),
            FieldId::Date => ("Date", FieldType::Text),
            FieldId::Url => ("URL", FieldType::Text),
            FieldId::Clicks => ("Clicks", FieldType::Number),
            FieldId::Share => ("Share", FieldType::Percent),
        };
        let (concept, aggregation) = match self {
            FieldId::Clicks | FieldId::Share => (Concept::Metric, Some(Aggregation::Sum)),
            _ => (Concept::Dimension, None),
        };
        FieldDescriptor {
            id: self.as_str().to_string(),
            name: name.to_string(),
            field_type,
            concept,
            aggregation,
        }
    }

    /// Value of this field for one data point of a group's series.
    pub fn value(self, point: &MetricPoint, date: &str, group: &FlatGroup) -> Value {
        match self {
            FieldId::ProjectId => group.project_id.clone(),
            FieldId::ProjectName => group.project_name.clone(),
            FieldId::ProjectKeywordsCount => group.project_keywords_count.clone(),
            FieldId::ProjectTagsCount => group.project_tags_count.clone(),
            FieldId::TagId => group.tag_id.clone(),
            FieldId::TagName => group.tag_name.clone(),
            FieldId::TagKeywordsCount => group.tag_keywords_count.clone(),
            FieldId::TagCreatedAt => group.tag_created_at.clone(),
            FieldId::TagUpdatedAt => group.tag_updated_at.clone(),
            FieldId::Date => Value::String(date.to_string()),
            FieldId::Url => point.url.clone(),
            FieldId::Clicks => point.clicks.clone(),
            FieldId::Share => point.share(),
        }
    }
}

/// The full catalog, as returned by the schema endpoint.
pub fn catalog() -> Vec<FieldDescriptor> {
    FieldId::ALL.into_iter().map(FieldId::descriptor).collect()
}

/// Descriptors for the requested fields, in request order.
///
/// One entry per requested field, so `schema[i]` describes `values[i]` of
/// every row. Ids outside the catalog get a text dimension named after the id.
pub fn schema_for(requested: &[RequestedField]) -> Vec<FieldDescriptor> {
    requested
        .iter()
        .map(|field| match FieldId::from_id(&field.name) {
            Some(id) => id.descriptor(),
            None => FieldDescriptor::unknown(&field.name),
        })
        .collect()
}

/// Resolves requested ids once per request; unknown ids become `None`.
pub fn resolve(requested: &[RequestedField]) -> Vec<Option<FieldId>> {
    requested
        .iter()
        .map(|field| FieldId::from_id(&field.name))
        .collect()
}

/// Builds one output row. `values[i]` always belongs to `fields[i]`;
/// unknown fields yield an empty string.
pub fn format_row(
    fields: &[Option<FieldId>],
    point: &MetricPoint,
    date: &str,
    group: &FlatGroup,
) -> OutputRow {
    let values = fields
        .iter()
        .map(|field| match field {
            Some(id) => id.value(point, date, group),
            None => Value::String(String::new()),
        })
        .collect();
    OutputRow { values }
}
