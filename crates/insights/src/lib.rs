//! # Monthly "Wrapped" Insights
//!
//! Given a target month, this crate computes a fixed, ordered set of
//! behavioral and performance insight cards from the journal history: win
//! rate, streaks, the most active trading hour, the favorite setup, average
//! holding time, the mood/performance relation, an overtrading flag, and an
//! emotional heatmap.
//!
//! Every card is computed independently and degrades on its own: when a
//! card's minimum sample size is unmet it carries the explicit
//! `InsightValue::NotEnoughData` marker rather than a misleading zero.

pub mod error;
pub mod generator;
pub mod report;

pub use error::InsightError;
pub use generator::MonthlyInsightGenerator;
pub use report::{HeatmapCell, InsightData, InsightKind, InsightValue};
