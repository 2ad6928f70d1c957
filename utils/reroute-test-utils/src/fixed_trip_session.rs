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

use reroute_core::{Location, RouteProgress, TripSession};
use std::sync::Mutex;

/// Trip session returning whatever snapshots the test put in.
#[derive(Default)]
pub struct FixedTripSession {
    route_progress: Mutex<Option<RouteProgress>>,
    location: Mutex<Option<Location>>,
}

impl FixedTripSession {
    pub fn new(route_progress: Option<RouteProgress>, location: Option<Location>) -> Self {
        Self {
            route_progress: Mutex::new(route_progress),
            location: Mutex::new(location),
        }
    }

    pub fn set_route_progress(&self, route_progress: Option<RouteProgress>) {
        *self.route_progress.lock().unwrap() = route_progress;
    }

    pub fn set_location(&self, location: Option<Location>) {
        *self.location.lock().unwrap() = location;
    }
}

impl TripSession for FixedTripSession {
    fn route_progress(&self) -> Option<RouteProgress> {
        self.route_progress.lock().unwrap().clone()
    }

    fn enhanced_location(&self) -> Option<Location> {
        self.location.lock().unwrap().clone()
    }
}
