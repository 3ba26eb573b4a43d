use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::records::ArticleEntry;

/// ISO 639-1 code ("en", "es", ...), optionally with a region suffix ("en-US")
pub type LanguageCode = String;

/// Messages exchanged between page modules over the event bus
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Immersive mode toggled
    ModeChanged { enabled: bool, level: ReadingLevel },
    LevelChanged { level: ReadingLevel },
    /// Reading-completion heuristic fired for the current page
    ArticleComplete(ArticleEntry),
    OpenSummary,
    StartPractice(Vec<PracticeWord>),
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::ModeChanged { .. } => "mode-changed",
            AppEvent::LevelChanged { .. } => "level-changed",
            AppEvent::ArticleComplete(_) => "article-complete",
            AppEvent::OpenSummary => "open-summary-modal",
            AppEvent::StartPractice(_) => "start-practice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeWord {
    pub word: String,
    pub translation: String,
    pub source_lang: LanguageCode,
    pub target_lang: LanguageCode,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ReadingLevel {
    pub const ALL: [ReadingLevel; 3] = [
        ReadingLevel::Beginner,
        ReadingLevel::Intermediate,
        ReadingLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "beginner",
            ReadingLevel::Intermediate => "intermediate",
            ReadingLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ReadingLevel::Beginner),
            "intermediate" => Ok(ReadingLevel::Intermediate),
            "advanced" => Ok(ReadingLevel::Advanced),
            other => Err(format!("unknown reading level: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryType {
    #[default]
    #[serde(rename = "key-points")]
    KeyPoints,
    #[serde(rename = "tl;dr")]
    TlDr,
    #[serde(rename = "teaser")]
    Teaser,
    #[serde(rename = "headline")]
    Headline,
}

impl SummaryType {
    pub const ALL: [SummaryType; 4] = [
        SummaryType::KeyPoints,
        SummaryType::TlDr,
        SummaryType::Teaser,
        SummaryType::Headline,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::KeyPoints => "key-points",
            SummaryType::TlDr => "tl;dr",
            SummaryType::Teaser => "teaser",
            SummaryType::Headline => "headline",
        }
    }

    /// Heading shown above a rendered summary
    pub fn label(&self) -> &'static str {
        match self {
            SummaryType::KeyPoints => "Key Points",
            SummaryType::TlDr => "TL;DR",
            SummaryType::Teaser => "Teaser",
            SummaryType::Headline => "Headline",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] = [
        SummaryLength::Short,
        SummaryLength::Medium,
        SummaryLength::Long,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}
