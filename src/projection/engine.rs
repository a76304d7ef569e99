//! Compounding projection engine

use log::{debug, trace};

use super::presets::{PresetTable, StrategyPreset};
use super::trajectory::{round_cents, PeriodSnapshot, ProjectionResult, ProjectionSummary};
use crate::config::ProjectorSettings;
use crate::error::{CoreError, CoreResult};

/// Project `principal` compounding at `periodic_rate` for `periods` periods.
///
/// Each period credits `balance * periodic_rate` and adds it to the balance.
/// Trajectory values are full precision; only the summary is rounded to cents.
pub fn project(principal: f64, periodic_rate: f64, periods: u32) -> CoreResult<ProjectionResult> {
    validate(principal, periodic_rate, periods)?;

    let mut trajectory = Vec::with_capacity(periods as usize);
    let mut balance = principal;
    let mut cumulative_profit = 0.0;

    for period_index in 1..=periods {
        let periodic_profit = balance * periodic_rate;
        cumulative_profit += periodic_profit;
        balance += periodic_profit;
        trajectory.push(PeriodSnapshot {
            period_index,
            periodic_profit,
            cumulative_profit,
            balance,
        });
    }

    let summary = ProjectionSummary {
        total_profit: round_cents(cumulative_profit),
        final_balance: round_cents(balance),
    };
    trace!("projected {} periods: {:?}", periods, summary);

    Ok(ProjectionResult { trajectory, summary })
}

fn validate(principal: f64, periodic_rate: f64, periods: u32) -> CoreResult<()> {
    if !principal.is_finite() || principal < 0.0 {
        return Err(CoreError::invalid(
            "principal",
            format!("must be a finite value >= 0, got {}", principal),
        ));
    }
    if !periodic_rate.is_finite() || periodic_rate < 0.0 {
        return Err(CoreError::invalid(
            "periodic_rate",
            format!("must be a finite value >= 0, got {}", periodic_rate),
        ));
    }

    // Reject growth that would leave f64 range instead of returning infinities
    if principal > 0.0 && periodic_rate > 0.0 {
        let log_final = principal.ln() + periods as f64 * periodic_rate.ln_1p();
        if log_final >= f64::MAX.ln() {
            return Err(CoreError::invalid(
                "periods",
                format!("{} periods at rate {} overflows the balance", periods, periodic_rate),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ProjectorConfig {
    /// Longest horizon a single request may ask for
    pub max_periods: u32,
    pub presets: PresetTable,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self::from_settings(&ProjectorSettings::default())
    }
}

impl ProjectorConfig {
    pub fn from_settings(settings: &ProjectorSettings) -> Self {
        Self {
            max_periods: settings.max_periods,
            presets: PresetTable::for_kind(settings.preset_table),
        }
    }
}

/// Profit calculator front end over [`project`]
#[derive(Debug, Clone, Default)]
pub struct ReturnProjector {
    config: ProjectorConfig,
}

impl ReturnProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    pub fn project(&self, principal: f64, periodic_rate: f64, periods: u32) -> CoreResult<ProjectionResult> {
        if periods > self.config.max_periods {
            return Err(CoreError::invalid(
                "periods",
                format!("must be <= {}, got {}", self.config.max_periods, periods),
            ));
        }
        debug!(
            "projecting principal={} rate={} periods={}",
            principal, periodic_rate, periods
        );
        project(principal, periodic_rate, periods)
    }

    /// Project using the periodic rate of a strategy preset
    pub fn project_preset(&self, principal: f64, preset: StrategyPreset, periods: u32) -> CoreResult<ProjectionResult> {
        let rate = self.config.presets.periodic_rate(preset);
        debug!("preset {} resolves to periodic rate {}", preset, rate);
        self.project(principal, rate, periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_case() {
        // 10,000 at 50% per month for a year: 10,000 * 1.5^12
        let result = project(10_000.0, 0.50, 12).expect("valid input");

        assert_eq!(result.trajectory.len(), 12);
        assert_eq!(result.summary.final_balance, 1_297_463.38);
        assert_eq!(result.summary.total_profit, 1_287_463.38);

        let last = result.trajectory.last().unwrap();
        assert_relative_eq!(last.balance, 10_000.0 * 1.5_f64.powi(12), max_relative = 1e-12);
    }

    #[test]
    fn test_first_periods() {
        let result = project(1_000.0, 0.10, 3).unwrap();
        let t = &result.trajectory;

        assert_eq!(t[0].period_index, 1);
        assert_relative_eq!(t[0].periodic_profit, 100.0);
        assert_relative_eq!(t[0].balance, 1_100.0);
        assert_relative_eq!(t[1].periodic_profit, 110.0);
        assert_relative_eq!(t[1].cumulative_profit, 210.0);
        assert_relative_eq!(t[2].balance, 1_331.0, epsilon = 1e-9);
        assert_eq!(result.summary.final_balance, 1_331.0);
        assert_eq!(result.summary.total_profit, 331.0);
    }

    #[test]
    fn test_trajectory_not_rounded() {
        let result = project(100.0, 0.0333, 5).unwrap();
        // 100 * 0.0333 = 3.33, then 103.33 * 0.0333 = 3.440889
        assert_relative_eq!(result.trajectory[1].periodic_profit, 3.440889, epsilon = 1e-9);
        assert_eq!(result.summary.total_profit, round_cents(result.trajectory[4].cumulative_profit));
    }

    #[test]
    fn test_zero_periods() {
        let result = project(2_500.0, 0.25, 0).unwrap();
        assert!(result.trajectory.is_empty());
        assert_eq!(result.summary.final_balance, 2_500.0);
        assert_eq!(result.summary.total_profit, 0.0);
    }

    #[test]
    fn test_zero_rate_is_flat() {
        let result = project(500.0, 0.0, 6).unwrap();
        assert!(result.trajectory.iter().all(|s| s.balance == 500.0 && s.periodic_profit == 0.0));
        assert_eq!(result.summary.total_profit, 0.0);
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert!(matches!(
            project(-1.0, 0.1, 5),
            Err(CoreError::InvalidArgument { name: "principal", .. })
        ));
        assert!(matches!(
            project(100.0, -0.1, 5),
            Err(CoreError::InvalidArgument { name: "periodic_rate", .. })
        ));
        assert!(project(f64::NAN, 0.1, 5).is_err());
        assert!(project(100.0, f64::INFINITY, 5).is_err());
    }

    #[test]
    fn test_rejects_overflowing_horizon() {
        assert!(matches!(
            project(1e300, 3.0, 100),
            Err(CoreError::InvalidArgument { name: "periods", .. })
        ));
        assert!(project(10_000.0, 3.0, 12).is_ok());
    }

    #[test]
    fn test_huge_balances_keep_finite_summary() {
        let flat = project(1e307, 0.0, 1).unwrap();
        assert_eq!(flat.summary.final_balance, 1e307);
        assert_eq!(flat.summary.total_profit, 0.0);

        let doubling = project(1e306, 1.0, 3).unwrap();
        let last = doubling.trajectory.last().unwrap();
        assert!(doubling.summary.final_balance.is_finite());
        assert!(doubling.summary.total_profit.is_finite());
        assert_eq!(doubling.summary.final_balance, last.balance);
        assert_eq!(doubling.summary.total_profit, last.cumulative_profit);
    }

    #[test]
    fn test_projector_max_periods() {
        let projector = ReturnProjector::new(ProjectorConfig {
            max_periods: 24,
            presets: PresetTable::monthly_returns(),
        });
        assert!(projector.project(100.0, 0.01, 24).is_ok());
        assert!(projector.project(100.0, 0.01, 25).is_err());
    }

    #[test]
    fn test_project_preset() {
        let projector = ReturnProjector::new(ProjectorConfig {
            max_periods: 600,
            presets: PresetTable::annualized(),
        });
        let result = projector
            .project_preset(10_000.0, StrategyPreset::Conservative, 12)
            .unwrap();
        let expected = 10_000.0 * (1.0 + 0.15 / 12.0_f64).powi(12);
        assert_eq!(result.summary.final_balance, round_cents(expected));
    }
}
