//! # Journal Statistics Engine
//!
//! This crate derives performance and behavioral statistics from a trader's
//! journal history. It acts as the "unbiased judge" of the journal.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `StatsEngine` is a stateless calculator.
//!   It takes normalized journal entries as input and produces a
//!   `DerivedStatistics` report as output. This makes it highly reliable and
//!   easy to test.
//! - **Invalid Is Not Zero:** Trades whose PnL failed coercion are excluded
//!   from every ratio's numerator and denominator. The one place they *do*
//!   participate is streak scanning, where an invalid trade deliberately
//!   resets both running counters.
//!
//! ## Public API
//!
//! - `StatsEngine`: The main struct that contains the calculation logic.
//! - `DerivedStatistics`: The recomputed-on-demand projection of the journal.
//! - `StatsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod emotion;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use emotion::emotion_score;
pub use engine::{Interval, StatsEngine};
pub use error::StatsError;
pub use report::{DerivedStatistics, EmotionTrendPoint, MistakeCount, PairStats};
