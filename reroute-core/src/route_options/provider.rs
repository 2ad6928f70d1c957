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

use crate::route_options::model::{Location, RouteOptions, RouteProgress};

/// Combines the active route options with the traveler's progress and location into the
/// options of a new route request.
///
/// Used every time the traveler leaves the active route. Returning `None` means no valid
/// request can be built from the given inputs, and no route is fetched.
pub trait RouteOptionsProvider: Send + Sync {
    fn update(
        &self,
        route_options: Option<&RouteOptions>,
        route_progress: Option<&RouteProgress>,
        location: Option<&Location>,
    ) -> Option<RouteOptions>;
}

