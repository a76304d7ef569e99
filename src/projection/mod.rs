//! Compounding return projections for the profit calculator

mod engine;
mod presets;
mod sweep;
mod trajectory;

pub use engine::{project, ProjectorConfig, ReturnProjector};
pub use presets::{PresetTable, PresetTableKind, StrategyPreset};
pub use sweep::{project_grid, Scenario, ScenarioOutcome};
pub use trajectory::{round_cents, PeriodSnapshot, ProjectionResult, ProjectionSummary};

// ============================================================================
// Calculator Defaults
// ============================================================================
// The calculator opens on a 10,000 principal over a one-year horizon of
// monthly periods. Summary figures are shown to the cent.

/// Principal the profit calculator opens with
pub const DEFAULT_PRINCIPAL: f64 = 10_000.0;

/// Horizon the profit calculator opens with (monthly periods)
pub const DEFAULT_PERIODS: u32 = 12;

/// Compounding periods per year for annualized preset rates
pub const PERIODS_PER_YEAR: u32 = 12;
