use crate::error::{CoreResult, SchemaViolation};
use crate::reporting::coerce::{string_or, version_number};
use crate::reporting::{CardVariant, ReportingFeed, Severity, StatusCard, TransparencyUpdate};
use serde_json::{Map, Value};
use std::path::Path;

const CARD_FIELD: &str = "methodValidationCard";
const UPDATES_FIELD: &str = "transparencyUpdates";

/// Converts a parsed JSON value into a typed [`ReportingFeed`].
///
/// Checks run in a fixed order and stop at the first violation:
/// top-level object, card presence, card variant, updates array, then each
/// update by index (object, severity, `bullets`, `nextSteps`). Everything
/// else is coerced to a string with a default.
pub fn parse_reporting_feed(value: &Value) -> Result<ReportingFeed, SchemaViolation> {
    let data = value.as_object().ok_or(SchemaViolation::NotAnObject)?;

    let card = data
        .get(CARD_FIELD)
        .and_then(Value::as_object)
        .ok_or_else(|| SchemaViolation::Missing(CARD_FIELD.to_string()))?;
    let variant = card
        .get("variant")
        .and_then(Value::as_str)
        .and_then(CardVariant::parse)
        .ok_or_else(|| SchemaViolation::Invalid(format!("{}.variant", CARD_FIELD)))?;

    let updates_raw = data
        .get(UPDATES_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaViolation::Missing(UPDATES_FIELD.to_string()))?;

    let transparency_updates = updates_raw
        .iter()
        .enumerate()
        .map(|(index, item)| parse_update(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReportingFeed {
        version: version_number(data.get("version")),
        updated_at: string_or(data.get("updatedAt"), ""),
        method_validation_card: StatusCard {
            title: string_or(card.get("title"), ""),
            state: string_or(card.get("state"), ""),
            detail: string_or(card.get("detail"), ""),
            variant,
        },
        transparency_updates,
    })
}

fn parse_update(index: usize, item: &Value) -> Result<TransparencyUpdate, SchemaViolation> {
    let path = format!("{}[{}]", UPDATES_FIELD, index);
    let row = item
        .as_object()
        .ok_or_else(|| SchemaViolation::Invalid(path.clone()))?;

    let severity = row
        .get("severity")
        .and_then(Value::as_str)
        .and_then(Severity::parse)
        .ok_or_else(|| SchemaViolation::Invalid(format!("{}.severity", path)))?;

    Ok(TransparencyUpdate {
        id: string_or(row.get("id"), ""),
        published_at: string_or(row.get("publishedAt"), ""),
        category: string_or(row.get("category"), "update"),
        severity,
        title: string_or(row.get("title"), ""),
        summary: string_or(row.get("summary"), ""),
        bullets: strict_string_list(row, "bullets", &path)?,
        next_steps: strict_string_list(row, "nextSteps", &path)?,
    })
}

// Absent or null is an empty list; anything present must be an array of strings.
fn strict_string_list(
    row: &Map<String, Value>,
    field: &str,
    parent: &str,
) -> Result<Vec<String>, SchemaViolation> {
    let invalid = || SchemaViolation::Invalid(format!("{}.{}", parent, field));
    match row.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}

/// Parses JSON text and validates it.
pub fn parse_reporting_feed_str(raw: &str) -> CoreResult<ReportingFeed> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(parse_reporting_feed(&value)?)
}

/// Reads a feed file and validates it.
pub fn load_reporting_feed(path: &Path) -> CoreResult<ReportingFeed> {
    let raw = std::fs::read_to_string(path)?;
    let feed = parse_reporting_feed_str(&raw)?;
    tracing::debug!(
        path = %path.display(),
        updates = feed.transparency_updates.len(),
        "reporting feed validated"
    );
    Ok(feed)
}
