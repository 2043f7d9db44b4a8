use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The fixed identifier set the presentation layer keys cards on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    WinRate,
    WinningStreak,
    LosingStreak,
    MostActiveHour,
    FavoriteSetup,
    AverageHoldingTime,
    MoodPerformance,
    Overtrading,
    EmotionalHeatmap,
}

/// One cell of the day-of-month x emotion grid. Presentation payload only;
/// nothing downstream computes over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub day: u32,
    pub emotion: String,
    /// Count of entries journaling this emotion on this day.
    pub intensity: usize,
}

/// The typed value carried by an insight card.
///
/// The `#[serde(tag = "type", content = "payload")]` attribute serializes the
/// enum into a clean JSON object that the presentation layer can switch on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum InsightValue {
    Percent(Decimal),
    Count(usize),
    /// Hour of day, 0-23.
    Hour(u32),
    Text(String),
    Duration(#[serde(with = "humantime_serde")] Duration),
    Flag(bool),
    Heatmap(Vec<HeatmapCell>),
    /// The documented degradation when a card's sample-size floor is unmet.
    NotEnoughData,
}

/// One "wrapped" insight card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightData {
    pub kind: InsightKind,
    pub value: InsightValue,
    pub description: String,
    pub additional_info: Option<String>,
}

impl InsightData {
    pub fn new(kind: InsightKind, value: InsightValue, description: impl Into<String>) -> Self {
        Self {
            kind,
            value,
            description: description.into(),
            additional_info: None,
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = Some(info.into());
        self
    }
}
