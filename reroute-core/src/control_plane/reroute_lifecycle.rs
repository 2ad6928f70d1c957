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

//! Reroute lifecycle orchestration for control-plane state transitions.

use crate::control_plane::in_flight::{InFlightSlot, RequestTicket};
use crate::control_plane::lock;
use crate::control_plane::state_cell::StateCell;
use crate::observability::{events, fields};
use crate::reroute_state::{RerouteState, CANNOT_COMBINE_ROUTE_OPTIONS, ROUTE_REQUEST_FAILED};
use crate::route_options::provider::RouteOptionsProvider;
use crate::sessions::directions_session::{
    DirectionsSession, RoutesRequestCallback, RoutesRequestOutcome,
};
use crate::sessions::trip_session::TripSession;
use std::sync::Mutex;
use tracing::{debug, error, info, warn, Level};

const COMPONENT: &str = "reroute_lifecycle";

/// Orchestrates one reroute command across the state cell, the in-flight slot and the
/// collaborating sessions.
///
/// Every method runs inside the controller's command queue, so no two of them overlap.
/// No lock is held while a session is called: sessions may answer synchronously, and
/// that answer is queued behind the running command.
pub(crate) struct RerouteLifecycle<'a> {
    controller: &'a str,
    state_cell: &'a StateCell,
    in_flight: &'a Mutex<InFlightSlot>,
    directions_session: &'a dyn DirectionsSession,
    trip_session: &'a dyn TripSession,
    route_options_provider: &'a dyn RouteOptionsProvider,
}

impl<'a> RerouteLifecycle<'a> {
    /// Creates a lifecycle coordinator using existing controller owners.
    pub(crate) fn new(
        controller: &'a str,
        state_cell: &'a StateCell,
        in_flight: &'a Mutex<InFlightSlot>,
        directions_session: &'a dyn DirectionsSession,
        trip_session: &'a dyn TripSession,
        route_options_provider: &'a dyn RouteOptionsProvider,
    ) -> Self {
        Self {
            controller,
            state_cell,
            in_flight,
            directions_session,
            trip_session,
            route_options_provider,
        }
    }

    /// Starts a reroute cycle.
    ///
    /// A request still in flight is released and canceled first; its outcome becomes
    /// stale and the new request takes over.
    pub(crate) fn reroute<F>(&mut self, completion: F)
    where
        F: FnOnce(RequestTicket) -> RoutesRequestCallback,
    {
        info!(
            event = events::REROUTE_START,
            component = COMPONENT,
            controller = self.controller,
            "reroute has been started"
        );

        self.state_cell.transition(RerouteState::FetchingRoute);

        let superseded = lock(self.in_flight).release();
        if let Some(superseded) = superseded {
            info!(
                event = events::REROUTE_REQUEST_SUPERSEDED,
                component = COMPONENT,
                controller = self.controller,
                ticket = superseded.ticket.value(),
                request_id = ?superseded.request_id,
                "canceling superseded route request"
            );
            self.directions_session.cancel();
        }

        let route_options = self.directions_session.route_options();
        let route_progress = self.trip_session.route_progress();
        let location = self.trip_session.enhanced_location();

        let Some(new_options) = self.route_options_provider.update(
            route_options.as_ref(),
            route_progress.as_ref(),
            location.as_ref(),
        ) else {
            warn!(
                event = events::REROUTE_OPTIONS_COMBINE_FAILED,
                component = COMPONENT,
                controller = self.controller,
                has_route_options = route_options.is_some(),
                has_route_progress = route_progress.is_some(),
                has_location = location.is_some(),
                "unable to combine route options"
            );
            self.state_cell
                .transition(RerouteState::failed(CANNOT_COMBINE_ROUTE_OPTIONS));
            self.state_cell.transition(RerouteState::Idle);
            return;
        };

        let coordinates =
            tracing::enabled!(Level::DEBUG).then(|| fields::format_coordinates(&new_options));

        let ticket = lock(self.in_flight).issue();
        let request_id = self
            .directions_session
            .request_routes(new_options, completion(ticket));
        lock(self.in_flight).bind_request_id(ticket, request_id);

        info!(
            event = events::REROUTE_REQUEST_SUBMITTED,
            component = COMPONENT,
            controller = self.controller,
            ticket = ticket.value(),
            request_id = request_id.0,
            "route request has been submitted"
        );
        if let Some(coordinates) = coordinates {
            debug!(
                event = events::REROUTE_REQUEST_SUBMITTED,
                component = COMPONENT,
                controller = self.controller,
                ticket = ticket.value(),
                coordinates = coordinates.as_str(),
                "route request coordinates"
            );
        }
    }

    /// Forwards a cancellation request to the directions session while fetching.
    ///
    /// The state is left alone: `Interrupted` follows from the session's cancellation
    /// outcome. A fetching state with no request in flight settles immediately.
    pub(crate) fn interrupt(&mut self) {
        if !self.state_cell.current().is_fetching() {
            debug!(
                event = events::REROUTE_INTERRUPT_IGNORED,
                component = COMPONENT,
                controller = self.controller,
                reason = "not_fetching",
                "nothing to interrupt"
            );
            return;
        }

        let in_flight = lock(self.in_flight).current();
        let Some(in_flight) = in_flight else {
            // Left behind by a reroute command that panicked before submitting.
            warn!(
                event = events::REROUTE_CYCLE_ABANDONED,
                component = COMPONENT,
                controller = self.controller,
                "no route request in flight, settling the abandoned cycle"
            );
            self.state_cell.transition(RerouteState::Interrupted);
            self.state_cell.transition(RerouteState::Idle);
            return;
        };

        info!(
            event = events::REROUTE_INTERRUPT_REQUESTED,
            component = COMPONENT,
            controller = self.controller,
            ticket = in_flight.ticket.value(),
            "route fetching has been interrupted"
        );
        self.directions_session.cancel();
    }

    /// Applies the outcome of the request identified by `ticket`. Stale outcomes are
    /// dropped.
    pub(crate) fn settle(&mut self, ticket: RequestTicket, outcome: RoutesRequestOutcome) {
        let settled = lock(self.in_flight).settle(ticket);
        let Some(settled) = settled else {
            debug!(
                event = events::REROUTE_OUTCOME_STALE,
                component = COMPONENT,
                controller = self.controller,
                ticket = ticket.value(),
                outcome = outcome.label(),
                "ignoring outcome of a request that is no longer in flight"
            );
            return;
        };

        match outcome {
            RoutesRequestOutcome::Ready { routes } => {
                info!(
                    event = events::REROUTE_REQUEST_READY,
                    component = COMPONENT,
                    controller = self.controller,
                    ticket = ticket.value(),
                    request_id = ?settled.request_id,
                    route_count = routes.len(),
                    "route request has been finished successfully"
                );
                self.state_cell.transition(RerouteState::RouteFetched);
            }
            RoutesRequestOutcome::Failed { cause, .. } => {
                error!(
                    event = events::REROUTE_REQUEST_FAILED,
                    component = COMPONENT,
                    controller = self.controller,
                    ticket = ticket.value(),
                    request_id = ?settled.request_id,
                    err = %cause,
                    "route request has failed"
                );
                self.state_cell
                    .transition(RerouteState::failed_with_cause(ROUTE_REQUEST_FAILED, cause));
            }
            RoutesRequestOutcome::Canceled { .. } => {
                info!(
                    event = events::REROUTE_REQUEST_CANCELED,
                    component = COMPONENT,
                    controller = self.controller,
                    ticket = ticket.value(),
                    request_id = ?settled.request_id,
                    "route request has been canceled"
                );
                self.state_cell.transition(RerouteState::Interrupted);
            }
        }

        self.state_cell.transition(RerouteState::Idle);
    }
}
