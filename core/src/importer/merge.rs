use crate::determinism::update_id::derive_update_id;
use crate::error::{CoreError, CoreResult};
use crate::reporting::coerce::{string_list, truthy_string};
use crate::reporting::{CardVariant, ReportingFeed, Severity, StatusCard, TransparencyUpdate};
use crate::validator::parse_reporting_feed;
use serde_json::Value;

/// The only draft layout this importer understands.
pub const SUPPORTED_DRAFT_VERSION: u64 = 1;

const DEFAULT_CATEGORY: &str = "update";
const DEFAULT_SEVERITY: &str = "info";
const DEFAULT_TITLE: &str = "Public update";

const DEFAULT_CARD_TITLE: &str = "Method Validation";
const DEFAULT_CARD_STATE: &str = "In Progress";
const DEFAULT_CARD_DETAIL: &str = "";
const DEFAULT_CARD_VARIANT: &str = "default";

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Merged feed, ready to be written. Keys the schema does not know are kept.
    pub feed: Value,
    /// The same feed after validation.
    pub validated: ReportingFeed,
    pub entry: TransparencyUpdate,
    /// An entry with the same id existed and was dropped.
    pub replaced: bool,
}

/// Merges one draft into a feed value without touching the filesystem.
///
/// The new entry goes to the front; an older entry with the same id is
/// removed wherever it was. The merged feed must pass
/// [`parse_reporting_feed`] or nothing is returned.
pub fn merge_draft(feed: Value, draft: &Value, publish_at: &str) -> CoreResult<MergeOutcome> {
    check_draft_version(draft)?;

    let mut feed = match feed {
        Value::Object(map) => map,
        _ => return Err(missing_updates_array()),
    };
    let previous = match feed.get_mut("transparencyUpdates") {
        Some(Value::Array(items)) => std::mem::take(items),
        _ => return Err(missing_updates_array()),
    };

    let entry = build_entry(draft, publish_at)?;
    let card = merge_card(draft.get("statusCard"), feed.get("methodValidationCard"))?;

    let before = previous.len();
    let mut updates = Vec::with_capacity(before + 1);
    updates.push(serde_json::to_value(&entry)?);
    updates.extend(
        previous
            .into_iter()
            .filter(|item| item.get("id").and_then(Value::as_str) != Some(entry.id.as_str())),
    );
    let replaced = updates.len() <= before;

    feed.insert("updatedAt".to_string(), Value::String(publish_at.to_string()));
    feed.insert("methodValidationCard".to_string(), serde_json::to_value(&card)?);
    feed.insert("transparencyUpdates".to_string(), Value::Array(updates));

    let feed = Value::Object(feed);
    let validated = parse_reporting_feed(&feed)?;
    tracing::debug!(
        id = %entry.id,
        replaced,
        total = validated.transparency_updates.len(),
        "draft merged"
    );

    Ok(MergeOutcome {
        feed,
        validated,
        entry,
        replaced,
    })
}

fn check_draft_version(draft: &Value) -> CoreResult<()> {
    match draft.get("draftVersion") {
        Some(v) if v.as_f64() == Some(SUPPORTED_DRAFT_VERSION as f64) => Ok(()),
        Some(v) => Err(CoreError::ImportPrecondition(format!(
            "unsupported draftVersion: {}",
            v
        ))),
        None => Err(CoreError::ImportPrecondition(
            "unsupported draftVersion: undefined".to_string(),
        )),
    }
}

fn missing_updates_array() -> CoreError {
    CoreError::ImportPrecondition(
        "public-reporting.json missing transparencyUpdates array".to_string(),
    )
}

/// Builds the feed entry for a draft. Unset fields take their defaults.
pub fn build_entry(draft: &Value, publish_at: &str) -> CoreResult<TransparencyUpdate> {
    let category =
        truthy_string(draft.get("category")).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let generated_at = truthy_string(draft.get("generatedAt"));
    let id = derive_update_id(generated_at.as_deref(), publish_at, &category);

    let severity_raw =
        truthy_string(draft.get("severity")).unwrap_or_else(|| DEFAULT_SEVERITY.to_string());
    let severity = Severity::parse(&severity_raw).ok_or_else(|| {
        CoreError::ImportPrecondition(format!(
            "draft severity `{}` is not one of {}",
            severity_raw,
            allowed(&Severity::ALL.map(Severity::as_str))
        ))
    })?;

    Ok(TransparencyUpdate {
        id,
        published_at: publish_at.to_string(),
        category,
        severity,
        title: truthy_string(draft.get("title")).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        summary: truthy_string(draft.get("summary")).unwrap_or_default(),
        bullets: string_list(draft.get("bullets")),
        next_steps: string_list(draft.get("nextSteps")),
    })
}

/// Field-wise card merge: draft value, then persisted value, then default.
pub fn merge_card(draft_card: Option<&Value>, current: Option<&Value>) -> CoreResult<StatusCard> {
    let pick = |field: &str, default: &str| {
        truthy_string(draft_card.and_then(|c| c.get(field)))
            .or_else(|| truthy_string(current.and_then(|c| c.get(field))))
            .unwrap_or_else(|| default.to_string())
    };

    let variant_raw = pick("variant", DEFAULT_CARD_VARIANT);
    let variant = CardVariant::parse(&variant_raw).ok_or_else(|| {
        CoreError::ImportPrecondition(format!(
            "status card variant `{}` is not one of {}",
            variant_raw,
            allowed(&CardVariant::ALL.map(CardVariant::as_str))
        ))
    })?;

    Ok(StatusCard {
        title: pick("title", DEFAULT_CARD_TITLE),
        state: pick("state", DEFAULT_CARD_STATE),
        detail: pick("detail", DEFAULT_CARD_DETAIL),
        variant,
    })
}

fn allowed(names: &[&str]) -> String {
    names.join(", ")
}
