//! # Record Normalizer
//!
//! Turns heterogeneous raw journal records into the strictly-typed entries and
//! trades the rest of the engine computes over.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It depends only on
//!   `core-types` (Layer 0) and knows nothing about storage or presentation.
//! - **Total Function:** Normalization never fails. Malformed records are
//!   dropped or marked, logged, and the rest of the batch survives.
//!
//! ## Coercion Policy
//!
//! The source data treats unparsable numbers inconsistently; this crate is
//! the single place where that is resolved:
//!
//! - A numeric field that is absent or unparsable becomes the `None` invalid
//!   marker. It is **never** coerced to zero; downstream ratios exclude it
//!   from both numerator and denominator.
//! - A numeric field that *parses* to `NaN` or an infinity poisons the whole
//!   trade: `pnl`, `entryPrice`, and `quantity` are load-bearing, and a
//!   non-finite value there cannot be represented or safely excluded.
//! - An entry without a parsable timestamp is dropped whole; every statistic
//!   keys on the session time.

use chrono::{DateTime, Utc};
use core_types::{JournalEntry, Outcome, SessionType, Trade, TradeDirection};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

pub mod error;
pub mod raw;

pub use error::NormalizerError;
pub use raw::{RawEntry, RawTrade};

/// The outcome of coercing one raw numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Coercion {
    Value(Decimal),
    /// Absent or unparsable. Becomes the `None` invalid marker, never zero.
    Missing,
    /// Parsed to `NaN` or an infinity. Poisons the whole trade.
    NonFinite,
}

impl Coercion {
    fn into_option(self) -> Option<Decimal> {
        match self {
            Coercion::Value(d) => Some(d),
            Coercion::Missing | Coercion::NonFinite => None,
        }
    }
}

/// Coerces a JSON number-or-string into a `Decimal`.
fn coerce_decimal(field: Option<&Value>) -> Coercion {
    let Some(value) = field else {
        return Coercion::Missing;
    };
    match value {
        Value::Number(n) => {
            // JSON numbers are finite by grammar. Parse the literal text first
            // to keep full precision for values like 0.1.
            Decimal::from_str(&n.to_string())
                .ok()
                .or_else(|| n.as_f64().and_then(Decimal::from_f64))
                .map(Coercion::Value)
                .unwrap_or(Coercion::Missing)
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Coercion::Missing;
            }
            match s.parse::<f64>() {
                Ok(f) if !f.is_finite() => Coercion::NonFinite,
                Ok(f) => Decimal::from_str(s)
                    .ok()
                    .or_else(|| Decimal::from_f64(f))
                    .map(Coercion::Value)
                    .unwrap_or(Coercion::Missing),
                Err(_) => Coercion::Missing,
            }
        }
        _ => Coercion::Missing,
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| s.parse::<DateTime<Utc>>().ok())
}

fn parse_id(raw: Option<&str>) -> Uuid {
    raw.and_then(|s| Uuid::parse_str(s.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// Normalizes a single raw trade, or drops it under the coercion policy.
fn normalize_trade(raw: &RawTrade) -> Option<Trade> {
    let pnl = coerce_decimal(raw.pnl.as_ref());
    let entry_price = coerce_decimal(raw.entry_price.as_ref());
    let quantity = coerce_decimal(raw.quantity.as_ref());

    if matches!(pnl, Coercion::NonFinite)
        || matches!(entry_price, Coercion::NonFinite)
        || matches!(quantity, Coercion::NonFinite)
    {
        tracing::debug!(trade_id = ?raw.id, "dropping trade with non-finite numeric field");
        return None;
    }

    let direction = raw
        .direction
        .as_deref()
        .and_then(|s| TradeDirection::from_str(s).ok())
        .unwrap_or(TradeDirection::Buy);

    Some(Trade {
        id: parse_id(raw.id.as_deref()),
        symbol: raw
            .symbol
            .as_deref()
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        direction,
        entry_price: entry_price.into_option(),
        exit_price: coerce_decimal(raw.exit_price.as_ref()).into_option(),
        entry_time: parse_timestamp(raw.entry_date.as_deref()),
        exit_time: parse_timestamp(raw.exit_date.as_deref()),
        quantity: quantity.into_option(),
        stop_loss: coerce_decimal(raw.stop_loss.as_ref()).into_option(),
        take_profit: coerce_decimal(raw.take_profit.as_ref()).into_option(),
        pnl: pnl.into_option(),
        setup: raw
            .setup
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        screenshots: raw.screenshots.clone(),
    })
}

/// Normalizes a single raw entry, or drops it under the coercion policy.
fn normalize_entry(raw: &RawEntry) -> Option<JournalEntry> {
    let Some(created_at) = parse_timestamp(raw.created_at.as_deref()) else {
        tracing::warn!(entry_id = ?raw.id, "dropping journal entry without a parsable timestamp");
        return None;
    };

    let session_type = raw
        .session_type
        .as_deref()
        .and_then(|s| SessionType::from_str(s).ok())
        .unwrap_or(SessionType::Post);

    let trades: Vec<Trade> = raw.trades.iter().filter_map(normalize_trade).collect();

    // Outcome is a post-session concept.
    let outcome = match session_type {
        SessionType::Post => raw
            .outcome
            .as_deref()
            .and_then(|s| Outcome::from_str(s).ok()),
        SessionType::Pre => None,
    };

    // Session-type invariants: mistakes belong to post-session losses,
    // pre-trading activities to pre-sessions.
    let mistakes = if session_type == SessionType::Post && outcome == Some(Outcome::Loss) {
        raw.mistakes.clone()
    } else {
        Vec::new()
    };
    let pre_trading_activities = if session_type == SessionType::Pre {
        raw.pre_trading_activities.clone()
    } else {
        Vec::new()
    };

    let entry = JournalEntry {
        id: parse_id(raw.id.as_deref()),
        created_at,
        session_type,
        emotion: raw.emotion.clone(),
        emotion_detail: raw.emotion_detail.clone(),
        notes: raw.notes.clone(),
        outcome,
        rules_followed: raw.rules_followed.clone(),
        mistakes,
        pre_trading_activities,
        trades,
    };

    // A trade-less entry still feeds emotion and streak statistics, but only
    // if it actually journals something.
    if entry.trades.is_empty() && !entry.has_journaling_data() {
        tracing::debug!(entry_id = %entry.id, "dropping trade-less entry without journaling data");
        return None;
    }

    Some(entry)
}

/// Normalizes a batch of raw records. Never fails; malformed records are
/// dropped or marked individually.
pub fn normalize_entries(raw: &[RawEntry]) -> Vec<JournalEntry> {
    raw.iter().filter_map(normalize_entry).collect()
}

/// Convenience: deserialize a JSON array of raw entries and normalize it.
pub fn entries_from_json(json: &str) -> Result<Vec<JournalEntry>, NormalizerError> {
    let raw: Vec<RawEntry> = serde_json::from_str(json)?;
    Ok(normalize_entries(&raw))
}
