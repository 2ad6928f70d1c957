/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use crate::error::SimulatorError;
use reroute_core::{Location, RouteOptions, RouteProgress, DEFAULT_ORIGIN_BEARING_TOLERANCE};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_controller_name")]
    pub(crate) controller_name: String,
    #[serde(default = "default_bearing_tolerance")]
    pub(crate) bearing_tolerance: f64,
    #[serde(default)]
    pub(crate) route_options: Option<RouteOptions>,
    #[serde(default)]
    pub(crate) route_progress: Option<RouteProgress>,
    #[serde(default)]
    pub(crate) location: Option<Location>,
    #[serde(default)]
    pub(crate) directions: DirectionsConfig,
    pub(crate) steps: Vec<StepConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DirectionsConfig {
    pub(crate) response_delay_ms: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: 250,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct StepConfig {
    pub(crate) action: StepAction,
    #[serde(default)]
    pub(crate) outcome: Option<PlannedOutcome>,
    #[serde(default)]
    pub(crate) delay_ms: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Reroute,
    Interrupt,
    Wait,
}

/// How the simulated directions service answers a request.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlannedOutcome {
    #[default]
    Ready,
    Failed,
    Canceled,
}

fn default_controller_name() -> String {
    "reroute-simulator".to_string()
}

fn default_bearing_tolerance() -> f64 {
    DEFAULT_ORIGIN_BEARING_TOLERANCE
}

impl Config {
    pub fn from_json5(contents: &str) -> Result<Self, SimulatorError> {
        let config: Config = json5::from_str(contents).map_err(SimulatorError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SimulatorError> {
        if self.controller_name.trim().is_empty() {
            return Err(SimulatorError::InvalidScenario(
                "controller_name must not be empty".to_string(),
            ));
        }
        if !(0.0..=180.0).contains(&self.bearing_tolerance) {
            return Err(SimulatorError::InvalidScenario(format!(
                "bearing_tolerance must be within 0..=180 degrees, got {}",
                self.bearing_tolerance
            )));
        }
        if self.steps.is_empty() {
            return Err(SimulatorError::InvalidScenario(
                "scenario has no steps".to_string(),
            ));
        }

        for (index, step) in self.steps.iter().enumerate() {
            match step.action {
                StepAction::Reroute => {}
                StepAction::Interrupt | StepAction::Wait if step.outcome.is_some() => {
                    return Err(SimulatorError::InvalidScenario(format!(
                        "step {index}: only reroute steps take an outcome"
                    )));
                }
                StepAction::Wait if step.delay_ms.is_none() => {
                    return Err(SimulatorError::InvalidScenario(format!(
                        "step {index}: wait steps need delay_ms"
                    )));
                }
                StepAction::Interrupt | StepAction::Wait => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, PlannedOutcome, StepAction};
    use crate::error::SimulatorError;

    const OFF_ROUTE: &str = include_str!("../configs/off-route.json5");

    #[test]
    fn bundled_scenario_parses() {
        let config = Config::from_json5(OFF_ROUTE).expect("bundled scenario should parse");

        assert_eq!(config.controller_name, "off-route-demo");
        assert_eq!(config.directions.response_delay_ms, 300);
        assert_eq!(config.steps[0].action, StepAction::Reroute);
        assert!(config.route_options.is_some());
        assert!(config
            .steps
            .iter()
            .any(|step| step.outcome == Some(PlannedOutcome::Failed)));
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config = Config::from_json5("{ steps: [{ action: 'reroute' }] }")
            .expect("minimal scenario should parse");

        assert_eq!(config.controller_name, "reroute-simulator");
        assert_eq!(config.bearing_tolerance, 90.0);
        assert_eq!(config.directions.response_delay_ms, 250);
        assert!(config.location.is_none());
        assert_eq!(config.steps[0].outcome, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = Config::from_json5("{ steps: [{ action: 'reroute' }], retries: 3 }");

        assert!(matches!(result, Err(SimulatorError::ConfigParse(_))));
    }

    #[test]
    fn outcome_on_interrupt_is_invalid() {
        let result =
            Config::from_json5("{ steps: [{ action: 'interrupt', outcome: 'canceled' }] }");

        assert!(matches!(result, Err(SimulatorError::InvalidScenario(_))));
    }

    #[test]
    fn wait_without_delay_is_invalid() {
        let result = Config::from_json5("{ steps: [{ action: 'wait' }] }");

        assert!(matches!(result, Err(SimulatorError::InvalidScenario(_))));
    }

    #[test]
    fn empty_scenario_is_invalid() {
        let result = Config::from_json5("{ steps: [] }");

        assert!(matches!(result, Err(SimulatorError::InvalidScenario(_))));
    }
}
