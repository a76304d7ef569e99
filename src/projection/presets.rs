//! Strategy presets offered by the profit calculator
//!
//! A preset is only a label mapped to a periodic rate. Two tables exist:
//! the landing page quotes a flat monthly return per strategy, while the
//! standalone calculator quotes annual rates that compound monthly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PERIODS_PER_YEAR;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyPreset {
    Conservative,
    Balanced,
    Aggressive,
}

impl StrategyPreset {
    pub const ALL: [StrategyPreset; 3] = [
        StrategyPreset::Conservative,
        StrategyPreset::Balanced,
        StrategyPreset::Aggressive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StrategyPreset::Conservative => "conservative",
            StrategyPreset::Balanced => "balanced",
            StrategyPreset::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for StrategyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrategyPreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(StrategyPreset::Conservative),
            "balanced" => Ok(StrategyPreset::Balanced),
            "aggressive" => Ok(StrategyPreset::Aggressive),
            other => Err(CoreError::invalid(
                "strategy",
                format!("unknown preset '{}'", other),
            )),
        }
    }
}

/// Which preset table to quote rates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetTableKind {
    /// Flat monthly return per strategy
    #[default]
    Monthly,
    /// Annual rate, compounded monthly at `annual / 12`
    Annualized,
}

impl FromStr for PresetTableKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PresetTableKind::Monthly),
            "annualized" | "annual" => Ok(PresetTableKind::Annualized),
            other => Err(CoreError::invalid(
                "table",
                format!("unknown preset table '{}'", other),
            )),
        }
    }
}

/// Quoted rates by strategy
#[derive(Debug, Clone)]
pub struct PresetTable {
    kind: PresetTableKind,
    /// Quoted rate per strategy, in the table's own unit (monthly or annual)
    quoted: Vec<(StrategyPreset, f64)>,
}

impl PresetTable {
    /// Landing page table: 50% / 150% / 300% per month
    pub fn monthly_returns() -> Self {
        Self {
            kind: PresetTableKind::Monthly,
            quoted: vec![
                (StrategyPreset::Conservative, 0.50),
                (StrategyPreset::Balanced, 1.50),
                (StrategyPreset::Aggressive, 3.00),
            ],
        }
    }

    /// Calculator table: 15% / 25% / 35% per year
    pub fn annualized() -> Self {
        Self {
            kind: PresetTableKind::Annualized,
            quoted: vec![
                (StrategyPreset::Conservative, 0.15),
                (StrategyPreset::Balanced, 0.25),
                (StrategyPreset::Aggressive, 0.35),
            ],
        }
    }

    pub fn for_kind(kind: PresetTableKind) -> Self {
        match kind {
            PresetTableKind::Monthly => Self::monthly_returns(),
            PresetTableKind::Annualized => Self::annualized(),
        }
    }

    pub fn kind(&self) -> PresetTableKind {
        self.kind
    }

    /// Rate as quoted to the user
    pub fn quoted_rate(&self, preset: StrategyPreset) -> f64 {
        self.quoted
            .iter()
            .find(|(p, _)| *p == preset)
            .map(|(_, rate)| *rate)
            .unwrap_or(0.0)
    }

    /// Rate applied once per monthly period
    pub fn periodic_rate(&self, preset: StrategyPreset) -> f64 {
        let quoted = self.quoted_rate(preset);
        match self.kind {
            PresetTableKind::Monthly => quoted,
            PresetTableKind::Annualized => quoted / PERIODS_PER_YEAR as f64,
        }
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::for_kind(PresetTableKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_table() {
        let table = PresetTable::monthly_returns();
        assert_eq!(table.periodic_rate(StrategyPreset::Conservative), 0.50);
        assert_eq!(table.periodic_rate(StrategyPreset::Balanced), 1.50);
        assert_eq!(table.periodic_rate(StrategyPreset::Aggressive), 3.00);
    }

    #[test]
    fn test_annualized_table() {
        let table = PresetTable::annualized();
        assert_eq!(table.quoted_rate(StrategyPreset::Balanced), 0.25);
        assert!((table.periodic_rate(StrategyPreset::Balanced) - 0.25 / 12.0).abs() < 1e-12);
        assert!((table.periodic_rate(StrategyPreset::Aggressive) - 0.35 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Balanced".parse::<StrategyPreset>(), Ok(StrategyPreset::Balanced));
        assert_eq!(" AGGRESSIVE ".parse::<StrategyPreset>(), Ok(StrategyPreset::Aggressive));
        assert!("yolo".parse::<StrategyPreset>().is_err());
        assert_eq!("annual".parse::<PresetTableKind>(), Ok(PresetTableKind::Annualized));
    }

    #[test]
    fn test_every_preset_is_quoted() {
        for kind in [PresetTableKind::Monthly, PresetTableKind::Annualized] {
            let table = PresetTable::for_kind(kind);
            for preset in StrategyPreset::ALL {
                assert!(table.quoted_rate(preset) > 0.0, "{:?} {}", kind, preset);
            }
        }
    }
}
