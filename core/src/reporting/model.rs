use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    Success,
    Warning,
    Default,
}

impl CardVariant {
    pub const ALL: [CardVariant; 3] = [
        CardVariant::Success,
        CardVariant::Warning,
        CardVariant::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CardVariant::Success => "success",
            CardVariant::Warning => "warning",
            CardVariant::Default => "default",
        }
    }

    /// Exact match against the declared names; no case folding.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl FromStr for CardVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown card variant `{}`", s)))
    }
}

impl fmt::Display for CardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editorial urgency of an update. Presentation only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Attention,
    Warning,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Attention, Severity::Warning];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::InvalidInput(format!("unknown severity `{}`", s)))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCard {
    pub title: String,
    pub state: String,
    pub detail: String,
    pub variant: CardVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransparencyUpdate {
    pub id: String,
    pub published_at: String,
    pub category: String,
    pub severity: Severity,
    pub title: String,
    pub summary: String,
    pub bullets: Vec<String>,
    pub next_steps: Vec<String>,
}

/// The persisted public reporting feed.
///
/// `transparency_updates` is newest-first by insertion, not by
/// `published_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportingFeed {
    pub version: u32,
    pub updated_at: String,
    pub method_validation_card: StatusCard,
    pub transparency_updates: Vec<TransparencyUpdate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_only_declared_names() {
        assert_eq!("warning".parse::<CardVariant>().unwrap(), CardVariant::Warning);
        assert_eq!("attention".parse::<Severity>().unwrap(), Severity::Attention);
        assert!("Warning".parse::<CardVariant>().is_err());
        assert!("critical".parse::<Severity>().is_err());
        for v in CardVariant::ALL {
            assert_eq!(v.to_string().parse::<CardVariant>().unwrap(), v);
        }
        for v in Severity::ALL {
            assert_eq!(v.as_str().parse::<Severity>().unwrap(), v);
        }
    }
}
