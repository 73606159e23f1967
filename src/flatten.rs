//! Flattening of the nested API payloads into tabular records.

use serde_json::Value;

use crate::error::ParseError;
use crate::fields::{format_row, FieldId, OutputRow};
use crate::model::{loose_number, FlatGroup, MetricPoint, Project};

/// Reads the projects out of the groups listing payload.
pub fn parse_projects(data: Value) -> Result<Vec<Project>, ParseError> {
    let entries = match &data {
        Value::Array(entries) => entries,
        other => {
            return Err(ParseError::UnexpectedShape(format!(
                "groups listing is {}",
                kind(other)
            )))
        }
    };
    entries.iter().map(Project::from_entry).collect()
}

/// Whether an API-side project id matches the configured one.
///
/// Numbers are compared numerically against the config value read as a number
/// (surrounding whitespace ignored), strings verbatim. Nothing matches when no
/// project id is configured.
pub fn project_id_matches(value: &Value, target: Option<&str>) -> bool {
    let Some(target) = target else {
        return false;
    };
    match value {
        Value::String(s) => s == target,
        Value::Number(n) => {
            let target = Value::String(target.to_string());
            match (n.as_f64(), loose_number(&target)) {
                (Some(n), Some(t)) => n == t,
                _ => false,
            }
        }
        _ => false,
    }
}

/// Keeps only the configured project, preserving listing order.
pub fn filter_projects(projects: Vec<Project>, target: Option<&str>) -> Vec<Project> {
    projects
        .into_iter()
        .filter(|project| project_id_matches(&project.project_id, target))
        .collect()
}

/// One group per tag when the project has tags, otherwise a single untagged group.
pub fn flatten_project(project: &Project) -> Vec<FlatGroup> {
    if project.has_tags() {
        project
            .tags
            .iter()
            .map(|tag| FlatGroup::for_tag(project, tag))
            .collect()
    } else {
        vec![FlatGroup::for_project(project)]
    }
}

pub fn flatten_projects(projects: &[Project]) -> Vec<FlatGroup> {
    projects.iter().flat_map(flatten_project).collect()
}

/// Turns a group's date-keyed series into output rows.
///
/// Rows follow the payload's date-key order, then the point order under each
/// date. An empty list payload carries no dates.
pub fn flatten_series(
    group: &FlatGroup,
    data: &Value,
    fields: &[Option<FieldId>],
) -> Result<Vec<OutputRow>, ParseError> {
    let series = match data {
        Value::Object(series) => series,
        Value::Array(items) if items.is_empty() => return Ok(Vec::new()),
        other => {
            return Err(ParseError::UnexpectedShape(format!(
                "series payload is {}",
                kind(other)
            )))
        }
    };

    let mut rows = Vec::new();
    for (date, points) in series {
        let points = points
            .as_array()
            .ok_or_else(|| ParseError::DateNotArray(date.clone()))?;
        for point in points {
            let point = MetricPoint::from_value(point);
            rows.push(format_row(fields, &point, date, group));
        }
    }
    Ok(rows)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
