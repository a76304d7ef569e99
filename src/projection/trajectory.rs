//! Projection output: per-period snapshots and the rounded summary

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Above this magnitude every f64 is already a whole number
const WHOLE_NUMBER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round to cents the way the calculator displays totals
pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= WHOLE_NUMBER_LIMIT {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// One compounded period. Values are kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSnapshot {
    /// 1-based period number
    pub period_index: u32,
    /// Profit credited in this period
    pub periodic_profit: f64,
    /// Profit credited since the start of the projection
    pub cumulative_profit: f64,
    /// Balance at the end of this period
    pub balance: f64,
}

/// Totals shown to the user, rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_profit: f64,
    pub final_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub trajectory: Vec<PeriodSnapshot>,
    pub summary: ProjectionSummary,
}

impl ProjectionResult {
    pub fn periods(&self) -> usize {
        self.trajectory.len()
    }

    /// Mean profit per period ("monthly profit" on the calculator), in cents
    pub fn average_periodic_profit(&self) -> f64 {
        match self.trajectory.last() {
            Some(last) => round_cents(last.cumulative_profit / self.trajectory.len() as f64),
            None => 0.0,
        }
    }

    /// Write the trajectory as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for snapshot in &self.trajectory {
            wtr.serialize(snapshot)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
