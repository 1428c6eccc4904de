pub mod merge;

pub use merge::{merge_draft, MergeOutcome, SUPPORTED_DRAFT_VERSION};

use crate::determinism::json_pretty::to_pretty_bytes;
use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub draft_path: PathBuf,
    pub feed_path: PathBuf,
    /// ISO 8601 publish time; the current UTC time when absent.
    pub publish_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub feed_path: PathBuf,
    pub id: String,
    pub published_at: String,
    pub replaced: bool,
    pub total_updates: usize,
}

/// Reads a draft, merges it into the feed file and rewrites the file once.
///
/// Every check happens before the write; on error the feed file is left
/// byte-for-byte as it was.
pub fn import_draft_file(request: &ImportRequest) -> CoreResult<ImportReport> {
    let publish_at = resolve_publish_at(request.publish_at.as_deref())?;
    let draft = read_json(&request.draft_path)?;
    let feed = read_json(&request.feed_path)?;

    let outcome = merge_draft(feed, &draft, &publish_at)?;
    let bytes = to_pretty_bytes(&outcome.feed)?;
    std::fs::write(&request.feed_path, bytes)?;

    tracing::info!(
        feed = %request.feed_path.display(),
        id = %outcome.entry.id,
        replaced = outcome.replaced,
        "feed rewritten"
    );

    Ok(ImportReport {
        feed_path: request.feed_path.clone(),
        id: outcome.entry.id,
        published_at: publish_at,
        replaced: outcome.replaced,
        total_updates: outcome.validated.transparency_updates.len(),
    })
}

/// The publish timestamp for an import.
///
/// An explicit value must be an ISO 8601 date-time with an offset (basic,
/// extended and reduced-precision forms all pass). It is kept as given,
/// upper-cased so `t`/`z` separators read `T`/`Z`. Without one the current
/// UTC time is used, at millisecond precision with a `Z` suffix.
pub fn resolve_publish_at(explicit: Option<&str>) -> CoreResult<String> {
    match explicit {
        Some(s) => {
            let s = s.trim().to_ascii_uppercase();
            parse_publish_time(&s).map_err(|e| {
                CoreError::ImportPrecondition(format!("invalid publish timestamp `{}`: {}", s, e))
            })?;
            Ok(s)
        }
        None => format_publish_time(OffsetDateTime::now_utc()),
    }
}

fn parse_publish_time(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(s, &Iso8601::DEFAULT)
        .or_else(|_| OffsetDateTime::parse(s, &Rfc3339))
        .or_else(|e| match extended_offset(s) {
            Some(fixed) => OffsetDateTime::parse(&fixed, &Iso8601::DEFAULT),
            None => Err(e),
        })
}

// `…T00:00:00+0000` mixes an extended time with a basic offset; the parser
// wants one form throughout, so the offset gets its colon back.
fn extended_offset(s: &str) -> Option<String> {
    let split = s.len().checked_sub(5)?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (head, offset) = s.split_at(split);
    let bytes = offset.as_bytes();
    let signed = bytes[0] == b'+' || bytes[0] == b'-';
    if !signed || !bytes[1..].iter().all(u8::is_ascii_digit) || !head.contains(':') {
        return None;
    }
    Some(format!("{}{}:{}", head, &offset[..3], &offset[3..]))
}

pub fn format_publish_time(at: OffsetDateTime) -> CoreResult<String> {
    let utc = at.to_offset(time::UtcOffset::UTC);
    Ok(utc.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))?)
}

fn read_json(path: &Path) -> CoreResult<Value> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CoreError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&raw)?)
}
