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

//! # reroute-core
//!
//! `reroute-core` coordinates rerouting for a turn-by-turn navigation session: when the
//! traveler leaves the planned route, the controller derives new request options from
//! the current progress and location, asks the directions session for a replacement
//! route, and reports every step to registered observers.
//!
//! Typical usage is API-first and centered on [`DefaultRerouteController`] behind the
//! [`RerouteController`] contract.
//!
//! ## Reroute cycle
//!
//! | From | Event | To |
//! |---|---|---|
//! | `Idle` | `reroute()` | `FetchingRoute` |
//! | `FetchingRoute` | options cannot be combined | `Failed` then `Idle` |
//! | `FetchingRoute` | request succeeds | `RouteFetched` then `Idle` |
//! | `FetchingRoute` | request fails | `Failed` then `Idle` |
//! | `FetchingRoute` | request canceled | `Interrupted` then `Idle` |
//! | `FetchingRoute` | `interrupt()` | cancellation forwarded to the directions session |
//!
//! Assigning the state the controller is already in is a no-op and notifies nobody.
//!
//! ```
//! use std::sync::Arc;
//! use reroute_core::{
//!     ChannelStateObserver, DefaultRerouteController, DirectionsRoute, DirectionsSession,
//!     Location, Point, RemainingWaypointsOptionsProvider, RerouteController, RerouteState,
//!     RouteOptions, RouteProgress, RouteRequestId, RoutesCallback, RoutesRequestCallback,
//!     RoutesRequestOutcome, TripSession,
//! };
//!
//! # struct CancelingSession;
//! #
//! # impl DirectionsSession for CancelingSession {
//! #     fn route_options(&self) -> Option<RouteOptions> {
//! #         Some(RouteOptions::new(
//! #             "driving",
//! #             vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
//! #         ))
//! #     }
//! #
//! #     fn request_routes(
//! #         &self,
//! #         options: RouteOptions,
//! #         callback: RoutesRequestCallback,
//! #     ) -> RouteRequestId {
//! #         callback(RoutesRequestOutcome::Canceled { options });
//! #         RouteRequestId(1)
//! #     }
//! #
//! #     fn cancel(&self) {}
//! # }
//! #
//! # struct OffRouteTrip;
//! #
//! # impl TripSession for OffRouteTrip {
//! #     fn route_progress(&self) -> Option<RouteProgress> {
//! #         Some(RouteProgress {
//! #             remaining_waypoints: 1,
//! #             ..Default::default()
//! #         })
//! #     }
//! #
//! #     fn enhanced_location(&self) -> Option<Location> {
//! #         Some(Location::new(0.2, 0.3))
//! #     }
//! # }
//! #
//! # struct IgnoreRoutes;
//! #
//! # impl RoutesCallback for IgnoreRoutes {
//! #     fn on_new_routes(&self, _routes: Vec<DirectionsRoute>) {}
//! # }
//! let controller = DefaultRerouteController::new(
//!     "quick-start",
//!     Arc::new(CancelingSession),
//!     Arc::new(OffRouteTrip),
//!     Arc::new(RemainingWaypointsOptionsProvider::new()),
//! );
//!
//! let (observer, mut states) = ChannelStateObserver::new();
//! controller.add_reroute_state_observer(Arc::new(observer));
//! controller.reroute(Arc::new(IgnoreRoutes));
//!
//! let mut seen = Vec::new();
//! while let Ok(state) = states.try_recv() {
//!     seen.push(state);
//! }
//! assert_eq!(
//!     seen,
//!     vec![
//!         RerouteState::Idle,
//!         RerouteState::FetchingRoute,
//!         RerouteState::Interrupted,
//!         RerouteState::Idle,
//!     ]
//! );
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: [`RerouteController`] contract and [`DefaultRerouteController`]
//! - Control plane: serial command queue, in-flight request slot, state cell, lifecycle
//! - Observers: observer capability, identity-keyed registry, channel and closure adapters
//! - Route options: request/progress/location model and the options combiner
//! - Sessions: directions and trip session contracts
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber` initialization
//! at process boundaries.

mod control_plane;

mod default_reroute_controller;
pub use default_reroute_controller::DefaultRerouteController;

#[doc(hidden)]
pub mod observability;

mod observers;
pub use observers::channel_observer::ChannelStateObserver;
pub use observers::fn_observer::FnStateObserver;
pub use observers::RerouteStateObserver;

mod reroute_controller;
pub use reroute_controller::{RerouteController, RoutesCallback};

mod reroute_state;
pub use reroute_state::{
    RerouteCause, RerouteState, CANNOT_COMBINE_ROUTE_OPTIONS, ROUTE_REQUEST_FAILED,
};

mod route_options;
pub use route_options::model::{
    Bearing, DirectionsRoute, Location, Point, RouteOptions, RouteProgress,
};
pub use route_options::provider::RouteOptionsProvider;
pub use route_options::remaining_waypoints::{
    RemainingWaypointsOptionsProvider, DEFAULT_ORIGIN_BEARING_TOLERANCE,
};

mod sessions;
pub use sessions::directions_session::{
    DirectionsSession, RouteRequestId, RoutesRequestCallback, RoutesRequestError,
    RoutesRequestOutcome,
};
pub use sessions::trip_session::TripSession;
