use crate::error::{CoreResult, SchemaViolation};
use crate::reporting::{ReportingFeed, Severity, StatusCard, TransparencyUpdate};
use crate::validator::{load_reporting_feed, parse_reporting_feed};
use serde_json::Value;
use std::path::Path;

/// Read-only view of the reporting feed, built once at start-up.
///
/// Consumers get a reference to this instead of reaching for a global.
/// There is no reload; a changed file needs a new context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingContext {
    feed: ReportingFeed,
}

impl ReportingContext {
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let feed = load_reporting_feed(path.as_ref())?;
        Ok(Self { feed })
    }

    pub fn from_value(value: &Value) -> Result<Self, SchemaViolation> {
        Ok(Self {
            feed: parse_reporting_feed(value)?,
        })
    }

    pub fn feed(&self) -> &ReportingFeed {
        &self.feed
    }

    pub fn updated_at(&self) -> &str {
        &self.feed.updated_at
    }

    pub fn method_validation_card(&self) -> &StatusCard {
        &self.feed.method_validation_card
    }

    /// Updates in feed order, newest import first.
    pub fn updates(&self) -> &[TransparencyUpdate] {
        &self.feed.transparency_updates
    }

    pub fn update(&self, id: &str) -> Option<&TransparencyUpdate> {
        self.updates().iter().find(|u| u.id == id)
    }

    /// The most recently imported update. Insertion order wins over `published_at`.
    pub fn latest_update(&self) -> Option<&TransparencyUpdate> {
        self.updates().first()
    }

    pub fn updates_with_severity(
        &self,
        severity: Severity,
    ) -> impl Iterator<Item = &TransparencyUpdate> + '_ {
        self.updates().iter().filter(move |u| u.severity == severity)
    }
}
