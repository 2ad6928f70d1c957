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

//! Control-plane layer.
//!
//! Owns the reroute state machine: the serial command queue every state-changing
//! operation goes through, the single in-flight request slot, the state cell that
//! broadcasts transitions, and the lifecycle handlers that tie them to the directions
//! and trip sessions.
//!
//! ```
//! use std::sync::Arc;
//! use reroute_core::{
//!     DefaultRerouteController, DirectionsSession, Location, RemainingWaypointsOptionsProvider,
//!     RerouteController, RerouteState, RouteOptions, RouteProgress, RouteRequestId,
//!     RoutesCallback, RoutesRequestCallback, TripSession, DirectionsRoute,
//! };
//!
//! # struct NoRouteSession;
//! #
//! # impl DirectionsSession for NoRouteSession {
//! #     fn route_options(&self) -> Option<RouteOptions> {
//! #         None
//! #     }
//! #
//! #     fn request_routes(
//! #         &self,
//! #         _options: RouteOptions,
//! #         _callback: RoutesRequestCallback,
//! #     ) -> RouteRequestId {
//! #         unreachable!("options never combine in this doctest")
//! #     }
//! #
//! #     fn cancel(&self) {}
//! # }
//! #
//! # struct NoTrip;
//! #
//! # impl TripSession for NoTrip {
//! #     fn route_progress(&self) -> Option<RouteProgress> {
//! #         None
//! #     }
//! #
//! #     fn enhanced_location(&self) -> Option<Location> {
//! #         None
//! #     }
//! # }
//! #
//! # struct IgnoreRoutes;
//! #
//! # impl RoutesCallback for IgnoreRoutes {
//! #     fn on_new_routes(&self, _routes: Vec<DirectionsRoute>) {}
//! # }
//! let controller = DefaultRerouteController::new(
//!     "control-plane-doc",
//!     Arc::new(NoRouteSession),
//!     Arc::new(NoTrip),
//!     Arc::new(RemainingWaypointsOptionsProvider::new()),
//! );
//!
//! // Without an active route nothing can be combined; the cycle fails and settles.
//! controller.reroute(Arc::new(IgnoreRoutes));
//! assert_eq!(controller.current_state(), RerouteState::Idle);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) mod command_queue;
pub(crate) mod in_flight;
pub(crate) mod reroute_lifecycle;
pub(crate) mod state_cell;

/// Locks a control-plane mutex. State guarded here stays consistent across observer
/// panics, so poisoning is ignored.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
