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

use reroute_core::{
    DirectionsRoute, Location, Point, RouteOptions, RouteOptionsProvider, RouteProgress,
};
use std::sync::Mutex;

/// Three-stop driving route: origin, one intermediate stop, destination.
pub fn sample_route_options() -> RouteOptions {
    RouteOptions {
        profile: "driving-traffic".to_string(),
        coordinates: vec![
            Point::new(13.3777, 52.5163),
            Point::new(13.4050, 52.5200),
            Point::new(13.4541, 52.5034),
        ],
        waypoint_names: vec![
            Some("gate".to_string()),
            Some("square".to_string()),
            Some("bridge".to_string()),
        ],
        alternatives: true,
        ..Default::default()
    }
}

/// Progress of a traveler who passed the intermediate stop.
pub fn off_route_progress() -> RouteProgress {
    RouteProgress {
        remaining_waypoints: 1,
        distance_remaining: 4_200.0,
        duration_remaining: 540.0,
    }
}

pub fn off_route_location() -> Location {
    Location {
        bearing: Some(112.0),
        accuracy: Some(4.0),
        ..Location::new(13.4213, 52.5121)
    }
}

pub fn sample_routes() -> Vec<DirectionsRoute> {
    vec![
        DirectionsRoute {
            route_index: 0,
            distance: 4_350.0,
            duration: 560.0,
            geometry: "_p~iF~ps|U_ulLnnqC".to_string(),
        },
        DirectionsRoute {
            route_index: 1,
            distance: 4_900.0,
            duration: 610.0,
            geometry: "_mqNvxq`@".to_string(),
        },
    ]
}

/// Inputs one [`FixedOptionsProvider::update`] call received.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderCall {
    pub route_options: Option<RouteOptions>,
    pub route_progress: Option<RouteProgress>,
    pub location: Option<Location>,
}

/// Options provider returning a fixed result and recording its inputs.
pub struct FixedOptionsProvider {
    result: Option<RouteOptions>,
    calls: Mutex<Vec<ProviderCall>>,
}

impl FixedOptionsProvider {
    pub fn returning(result: RouteOptions) -> Self {
        Self {
            result: Some(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn cannot_combine() -> Self {
        Self {
            result: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RouteOptionsProvider for FixedOptionsProvider {
    fn update(
        &self,
        route_options: Option<&RouteOptions>,
        route_progress: Option<&RouteProgress>,
        location: Option<&Location>,
    ) -> Option<RouteOptions> {
        self.calls.lock().unwrap().push(ProviderCall {
            route_options: route_options.cloned(),
            route_progress: route_progress.cloned(),
            location: location.cloned(),
        });
        self.result.clone()
    }
}
