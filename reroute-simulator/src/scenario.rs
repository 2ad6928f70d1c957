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

//! Runs a configured scenario against a default controller.

use crate::config::{Config, StepAction};
use crate::error::SimulatorError;
use crate::simulated_directions::SimulatedDirectionsSession;
use reroute_core::{
    ChannelStateObserver, DefaultRerouteController, DirectionsRoute, FnStateObserver, Location,
    RemainingWaypointsOptionsProvider, RerouteController, RerouteState, RouteProgress,
    RoutesCallback, TripSession,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

const COMPONENT: &str = "scenario";

// Margin on top of the directions delay before giving up on a final Idle.
const SETTLE_MARGIN_MS: u64 = 2_000;

/// Trip snapshots fixed for the whole scenario.
struct StaticTripSession {
    route_progress: Option<RouteProgress>,
    location: Option<Location>,
}

impl TripSession for StaticTripSession {
    fn route_progress(&self) -> Option<RouteProgress> {
        self.route_progress.clone()
    }

    fn enhanced_location(&self) -> Option<Location> {
        self.location.clone()
    }
}

struct LogRoutes;

impl RoutesCallback for LogRoutes {
    fn on_new_routes(&self, routes: Vec<DirectionsRoute>) {
        info!(component = COMPONENT, route_count = routes.len(), "new routes");
    }
}

/// Per-run tallies of the states observers received.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScenarioReport {
    pub states: Vec<RerouteState>,
    pub fetched: usize,
    pub failed: usize,
    pub interrupted: usize,
}

impl ScenarioReport {
    fn record(&mut self, state: RerouteState) {
        match state {
            RerouteState::RouteFetched => self.fetched += 1,
            RerouteState::Failed { .. } => self.failed += 1,
            RerouteState::Interrupted => self.interrupted += 1,
            RerouteState::Idle | RerouteState::FetchingRoute => {}
        }
        self.states.push(state);
    }

    fn drain(&mut self, states: &mut UnboundedReceiver<RerouteState>) {
        while let Ok(state) = states.try_recv() {
            self.record(state);
        }
    }
}

pub async fn run(config: Config) -> Result<ScenarioReport, SimulatorError> {
    let response_delay = Duration::from_millis(config.directions.response_delay_ms);
    let session = Arc::new(SimulatedDirectionsSession::new(
        Handle::current(),
        config.route_options.clone(),
        response_delay,
    ));
    let trip = Arc::new(StaticTripSession {
        route_progress: config.route_progress.clone(),
        location: config.location.clone(),
    });
    let provider = Arc::new(RemainingWaypointsOptionsProvider::with_bearing_tolerance(
        config.bearing_tolerance,
    ));
    let controller =
        DefaultRerouteController::new(&config.controller_name, session.clone(), trip, provider);

    let (channel_observer, mut states) = ChannelStateObserver::new();
    controller.add_reroute_state_observer(Arc::new(channel_observer));
    let controller_name = config.controller_name.clone();
    controller.add_reroute_state_observer(Arc::new(FnStateObserver::new(
        move |state: &RerouteState| {
            info!(
                component = COMPONENT,
                controller = controller_name.as_str(),
                state = %state,
                "reroute state"
            );
        },
    )));

    let mut report = ScenarioReport::default();
    for (index, step) in config.steps.iter().enumerate() {
        debug!(component = COMPONENT, step = index, action = ?step.action, "running step");
        match step.action {
            StepAction::Reroute => {
                session.plan_next_outcome(step.outcome.unwrap_or_default());
                controller.reroute(Arc::new(LogRoutes));
            }
            StepAction::Interrupt => controller.interrupt(),
            StepAction::Wait => {}
        }
        if let Some(delay_ms) = step.delay_ms {
            sleep(Duration::from_millis(delay_ms)).await;
        }
        report.drain(&mut states);
    }

    let waited_ms = config.directions.response_delay_ms + SETTLE_MARGIN_MS;
    let settle = Duration::from_millis(waited_ms);
    // The state is swapped before observers hear about it, so wait for the Idle itself.
    while !(controller.current_state().is_idle()
        && report.states.last() == Some(&RerouteState::Idle))
    {
        match timeout(settle, states.recv()).await {
            Ok(Some(state)) => report.record(state),
            Ok(None) => break,
            Err(_) => return Err(SimulatorError::SettleTimeout { waited_ms }),
        }
    }
    debug!(
        component = COMPONENT,
        pending_requests = session.pending_count(),
        "scenario settled"
    );

    Ok(report)
}
