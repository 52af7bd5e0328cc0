// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily estimated-cost tracking.
//!
//! Keeps an in-memory running total of today's estimated cost and emits a
//! `tracing::warn` once it reaches 80% of the configured daily budget. The
//! total resets when the UTC date changes. Nothing here rejects a request.

use chrono::{NaiveDate, Utc};
use lehrbot_config::model::CostConfig;
use tracing::{info, warn};

/// Fraction of the daily budget at which the warning fires.
const WARN_FRACTION: f64 = 0.8;

/// In-memory daily cost total.
#[derive(Debug)]
pub struct DailyCostTracker {
    daily_total: f64,
    daily_budget: Option<f64>,
    current_day: NaiveDate,
    warned_today: bool,
}

impl DailyCostTracker {
    /// Create a tracker with a zero total for today.
    pub fn new(daily_budget: Option<f64>) -> Self {
        Self {
            daily_total: 0.0,
            daily_budget,
            current_day: Utc::now().date_naive(),
            warned_today: false,
        }
    }

    pub fn from_config(config: &CostConfig) -> Self {
        Self::new(config.daily_budget_usd)
    }

    /// Add `cost` to today's total and return the new total.
    pub fn record(&mut self, cost: f64) -> f64 {
        self.record_on(Utc::now().date_naive(), cost)
    }

    /// Add `cost` to the total for `day`, rolling over first if the day changed.
    pub fn record_on(&mut self, day: NaiveDate, cost: f64) -> f64 {
        self.roll_over(day);
        self.daily_total += cost;

        if let Some(budget) = self.daily_budget
            && !self.warned_today
            && self.daily_total >= budget * WARN_FRACTION
        {
            warn!(
                daily_total = self.daily_total,
                daily_budget = budget,
                "approaching daily cost budget (80%+)"
            );
            self.warned_today = true;
        }
        self.daily_total
    }

    /// Today's total, without recording anything.
    pub fn daily_total(&self) -> f64 {
        self.daily_total
    }

    pub fn current_day(&self) -> NaiveDate {
        self.current_day
    }

    fn roll_over(&mut self, day: NaiveDate) {
        if day != self.current_day {
            info!(
                previous_day = %self.current_day,
                previous_total = self.daily_total,
                "daily cost total reset"
            );
            self.daily_total = 0.0;
            self.current_day = day;
            self.warned_today = false;
        }
    }
}
