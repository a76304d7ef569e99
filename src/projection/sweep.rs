//! Parallel projection of many independent scenarios

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::engine::ReturnProjector;
use super::trajectory::ProjectionSummary;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub principal: f64,
    pub periodic_rate: f64,
    pub periods: u32,
}

/// Summary of one scenario, or the reason it was rejected
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub result: Result<ProjectionSummary, CoreError>,
}

/// Project every scenario on the rayon pool.
///
/// Outcomes come back in input order. An invalid scenario does not stop the
/// others; its outcome carries the error.
pub fn project_grid(projector: &ReturnProjector, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    log::debug!("projecting {} scenarios", scenarios.len());
    scenarios
        .par_iter()
        .map(|scenario| ScenarioOutcome {
            scenario: *scenario,
            result: projector
                .project(scenario.principal, scenario.periodic_rate, scenario.periods)
                .map(|r| r.summary),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;

    #[test]
    fn test_grid_matches_sequential() {
        let projector = ReturnProjector::default();
        let scenarios: Vec<Scenario> = (0..50)
            .map(|i| Scenario {
                principal: 1_000.0 + i as f64 * 250.0,
                periodic_rate: 0.01 * (i % 7) as f64,
                periods: i % 24,
            })
            .collect();

        let outcomes = project_grid(&projector, &scenarios);
        assert_eq!(outcomes.len(), scenarios.len());
        for (outcome, scenario) in outcomes.iter().zip(&scenarios) {
            assert_eq!(outcome.scenario, *scenario);
            let expected = project(scenario.principal, scenario.periodic_rate, scenario.periods)
                .unwrap()
                .summary;
            assert_eq!(outcome.result, Ok(expected));
        }
    }

    #[test]
    fn test_invalid_scenario_is_isolated() {
        let projector = ReturnProjector::default();
        let scenarios = [
            Scenario { principal: 100.0, periodic_rate: 0.1, periods: 2 },
            Scenario { principal: -5.0, periodic_rate: 0.1, periods: 2 },
        ];
        let outcomes = project_grid(&projector, &scenarios);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
    }
}
