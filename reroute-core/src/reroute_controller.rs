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

use crate::observers::RerouteStateObserver;
use crate::reroute_state::RerouteState;
use crate::route_options::model::DirectionsRoute;
use std::sync::Arc;

/// Drives the reroute process.
///
/// Hosts may supply their own implementation to replace the reroute logic entirely;
/// [`DefaultRerouteController`](crate::DefaultRerouteController) is the stock one.
pub trait RerouteController: Send + Sync {
    /// State of the reroute process.
    fn current_state(&self) -> RerouteState;

    /// Invoked whenever a reroute is needed, for instance right after an off-route event.
    fn reroute(&self, routes_callback: Arc<dyn RoutesCallback>);

    /// Invoked when the reroute is not needed anymore, for instance when the traveler
    /// returned to the previous route. Ignored unless a route is being fetched.
    fn interrupt(&self);

    /// Adds an observer and immediately delivers the current state to it.
    ///
    /// Returns `true` if the observer has been added, `false` if it was already present.
    fn add_reroute_state_observer(&self, observer: Arc<dyn RerouteStateObserver>) -> bool;

    /// Returns `true` if the observer has been removed, `false` if it was not present.
    fn remove_reroute_state_observer(&self, observer: &Arc<dyn RerouteStateObserver>) -> bool;
}

/// Receives new routes found by a reroute.
///
/// The default controller never calls it: its directions session applies new routes
/// itself. Custom controllers can use it to hand routes back to the host.
pub trait RoutesCallback: Send + Sync {
    fn on_new_routes(&self, routes: Vec<DirectionsRoute>);
}
