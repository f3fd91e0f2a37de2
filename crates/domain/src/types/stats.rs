//! Dashboard statistics types
//!
//! This module holds the aggregate record derived from a member view:
//! - Gender breakdown with percentages
//! - Categorical counts (region, parish, function, society, baptismal state)
//! - Age-bracket histogram
//! - Month-over-month growth trend

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::impl_domain_label_conversions;

/* -------------------------------------------------------------------------- */
/* Age Brackets */
/* -------------------------------------------------------------------------- */

/// Age bucket for the dashboard histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    UpTo18,
    From19To30,
    From31To45,
    From46To60,
    Over60,
    /// Birth date lies after the reference day
    Unknown,
}

impl_domain_label_conversions!(AgeBracket {
    UpTo18 => "≤18",
    From19To30 => "19-30",
    From31To45 => "31-45",
    From46To60 => "46-60",
    Over60 => "60+",
    Unknown => "Desconhecida",
});

/* -------------------------------------------------------------------------- */
/* Aggregates */
/* -------------------------------------------------------------------------- */

/// Count and share of one category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Share {
    pub count: usize,
    /// Percentage of the aggregated total, `0.0` when the total is zero
    pub percent: f64,
}

impl Share {
    pub fn of(count: usize, total: usize) -> Self {
        let percent = if total == 0 { 0.0 } else { count as f64 * 100.0 / total as f64 };
        Self { count, percent }
    }
}

/// Gender breakdown
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenderBreakdown {
    pub male: Share,
    pub female: Share,
}

/// New registrations in the last window versus the one before it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthTrend {
    pub current: usize,
    pub previous: usize,
    /// `0` for 0→0, `100` for 0→n, otherwise the relative change in percent
    pub percent: f64,
}

impl GrowthTrend {
    pub fn new(current: usize, previous: usize) -> Self {
        let percent = match (previous, current) {
            (0, 0) => 0.0,
            (0, _) => 100.0,
            (prev, cur) => (cur as f64 - prev as f64) * 100.0 / prev as f64,
        };
        Self { current, previous, percent }
    }
}

/// Aggregate record over a member collection
///
/// Categorical maps use the stored labels as keys; unset optional values are
/// counted under `UNSPECIFIED_LABEL`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberStatistics {
    pub total: usize,
    pub by_gender: GenderBreakdown,
    pub by_region: BTreeMap<String, usize>,
    pub by_parish: BTreeMap<String, usize>,
    pub by_function: BTreeMap<String, usize>,
    pub by_society: BTreeMap<String, usize>,
    pub by_baptismal_state: BTreeMap<String, usize>,
    pub age_brackets: BTreeMap<AgeBracket, usize>,
    pub growth: GrowthTrend,
}

impl MemberStatistics {
    /// Count in an age bracket, zero when absent.
    pub fn age_count(&self, bracket: AgeBracket) -> usize {
        self.age_brackets.get(&bracket).copied().unwrap_or(0)
    }
}
