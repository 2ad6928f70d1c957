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

use crate::control_plane::command_queue::{Admission, Command, CommandQueue};
use crate::control_plane::in_flight::{InFlightSlot, RequestTicket};
use crate::control_plane::lock;
use crate::control_plane::reroute_lifecycle::RerouteLifecycle;
use crate::control_plane::state_cell::StateCell;
use crate::observability::events;
use crate::observers::RerouteStateObserver;
use crate::reroute_controller::{RerouteController, RoutesCallback};
use crate::reroute_state::RerouteState;
use crate::route_options::provider::RouteOptionsProvider;
use crate::sessions::directions_session::{DirectionsSession, RoutesRequestCallback};
use crate::sessions::trip_session::TripSession;
use std::sync::{Arc, Condvar, Mutex, PoisonError, Weak};
use std::thread;
use tracing::{debug, info, warn};

const COMPONENT: &str = "default_reroute_controller";

struct ControllerShared {
    name: String,
    directions_session: Arc<dyn DirectionsSession>,
    trip_session: Arc<dyn TripSession>,
    route_options_provider: Arc<dyn RouteOptionsProvider>,
    state_cell: StateCell,
    in_flight: Mutex<InFlightSlot>,
    commands: Mutex<CommandQueue>,
    // Signalled whenever a command completes or a drain ends.
    progress: Condvar,
}

/// Releases the drain if a command panics, so later commands are not stranded.
///
/// The state is left as the panicking command put it. A cycle abandoned in
/// `FetchingRoute` with no request in flight is settled by the next `interrupt()` or
/// replaced by the next `reroute()`.
struct DrainGuard<'a> {
    shared: &'a ControllerShared,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            let pending = lock(&self.shared.commands).abort_drain();
            self.shared.progress.notify_all();
            warn!(
                event = events::COMMAND_DRAIN_ABORTED,
                component = COMPONENT,
                controller = self.shared.name.as_str(),
                pending,
                "command panicked, remaining commands run on the next drain"
            );
        }
    }
}

impl ControllerShared {
    /// Runs `command` after every command submitted before it.
    ///
    /// Drains inline when the queue is idle. A call made from inside a running command
    /// (an observer or a synchronous session reply) only queues. A greeting submitted
    /// from another thread while a drain is running blocks until it has been delivered;
    /// every other command from another thread only queues.
    fn submit(self: &Arc<Self>, command: Command) {
        let label = command.label();
        let await_completion = matches!(command, Command::Greet(_));
        let submission = lock(&self.commands).enqueue(command);

        match submission.admission {
            Admission::Drain => self.drain(),
            Admission::Reentrant | Admission::Queued => {
                let reentrant = submission.admission == Admission::Reentrant;
                debug!(
                    event = events::COMMAND_QUEUED_BEHIND_DRAIN,
                    component = COMPONENT,
                    controller = self.name.as_str(),
                    command = label,
                    reentrant,
                    "command queued behind the running drain"
                );
                if !reentrant && await_completion {
                    self.wait_for(submission.seq);
                }
            }
        }
    }

    fn drain(self: &Arc<Self>) {
        let _guard = DrainGuard { shared: self };
        loop {
            let next = lock(&self.commands).next();
            let Some((seq, command)) = next else {
                break;
            };
            self.execute(command);
            lock(&self.commands).complete(seq);
            self.progress.notify_all();
        }
        self.progress.notify_all();
    }

    /// Blocks until the command numbered `seq` has run. Takes over the drain if the
    /// drainer gave it up before getting there.
    fn wait_for(self: &Arc<Self>, seq: u64) {
        let mut commands = lock(&self.commands);
        loop {
            if commands.is_complete(seq) {
                return;
            }
            if commands.claim_drain() {
                drop(commands);
                self.drain();
                return;
            }
            commands = self
                .progress
                .wait(commands)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn lifecycle(&self) -> RerouteLifecycle<'_> {
        RerouteLifecycle::new(
            &self.name,
            &self.state_cell,
            &self.in_flight,
            self.directions_session.as_ref(),
            self.trip_session.as_ref(),
            self.route_options_provider.as_ref(),
        )
    }

    fn execute(self: &Arc<Self>, command: Command) {
        match command {
            Command::Reroute => self
                .lifecycle()
                .reroute(|ticket| self.completion_callback(ticket)),
            Command::Interrupt => self.lifecycle().interrupt(),
            Command::Settle { ticket, outcome } => self.lifecycle().settle(ticket, outcome),
            Command::Greet(observer) => {
                self.state_cell.greet(&observer);
            }
        }
    }

    fn completion_callback(self: &Arc<Self>, ticket: RequestTicket) -> RoutesRequestCallback {
        let shared: Weak<ControllerShared> = Arc::downgrade(self);
        let controller = self.name.clone();

        Box::new(move |outcome| match shared.upgrade() {
            Some(shared) => shared.submit(Command::Settle { ticket, outcome }),
            None => debug!(
                event = events::REROUTE_OUTCOME_AFTER_SHUTDOWN,
                component = COMPONENT,
                controller = controller.as_str(),
                ticket = ticket.value(),
                outcome = outcome.label(),
                "controller dropped before the route request finished"
            ),
        })
    }
}

/// Stock [`RerouteController`].
///
/// Asks the [`RouteOptionsProvider`] for new request options, submits them to the
/// [`DirectionsSession`] and reports progress through observers. Every cycle settles
/// back to [`RerouteState::Idle`]. Routes are applied by the directions session, so the
/// [`RoutesCallback`] given to `reroute` is never invoked.
///
/// State-changing operations (`reroute`, `interrupt`, request outcomes, observer
/// greetings) are serialized through one command queue. A call made from inside an
/// observer or a synchronous session reply returns immediately and runs right after the
/// command in progress. `reroute` and `interrupt` from another thread behave the same
/// while a drain is running, but `add_reroute_state_observer` waits until the new
/// observer has received the current state. An observer must therefore not block on a
/// thread that is adding an observer to the same controller.
///
/// Calling `reroute` while a request is in flight cancels that request and replaces it;
/// its late outcome is ignored.
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use reroute_core::{
///     DefaultRerouteController, DirectionsRoute, DirectionsSession, FnStateObserver, Location,
///     Point, RemainingWaypointsOptionsProvider, RerouteController, RerouteState,
///     RerouteStateObserver, RouteOptions, RouteProgress, RouteRequestId, RoutesCallback,
///     RoutesRequestCallback, RoutesRequestOutcome, TripSession,
/// };
///
/// # struct InstantSession;
/// #
/// # impl DirectionsSession for InstantSession {
/// #     fn route_options(&self) -> Option<RouteOptions> {
/// #         Some(RouteOptions::new(
/// #             "driving",
/// #             vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
/// #         ))
/// #     }
/// #
/// #     fn request_routes(
/// #         &self,
/// #         _options: RouteOptions,
/// #         callback: RoutesRequestCallback,
/// #     ) -> RouteRequestId {
/// #         callback(RoutesRequestOutcome::Ready {
/// #             routes: vec![DirectionsRoute::default()],
/// #         });
/// #         RouteRequestId(1)
/// #     }
/// #
/// #     fn cancel(&self) {}
/// # }
/// #
/// # struct OffRouteTrip;
/// #
/// # impl TripSession for OffRouteTrip {
/// #     fn route_progress(&self) -> Option<RouteProgress> {
/// #         Some(RouteProgress {
/// #             remaining_waypoints: 1,
/// #             ..Default::default()
/// #         })
/// #     }
/// #
/// #     fn enhanced_location(&self) -> Option<Location> {
/// #         Some(Location::new(0.4, 0.5))
/// #     }
/// # }
/// #
/// # struct IgnoreRoutes;
/// #
/// # impl RoutesCallback for IgnoreRoutes {
/// #     fn on_new_routes(&self, _routes: Vec<DirectionsRoute>) {}
/// # }
/// let controller = DefaultRerouteController::new(
///     "doc",
///     Arc::new(InstantSession),
///     Arc::new(OffRouteTrip),
///     Arc::new(RemainingWaypointsOptionsProvider::new()),
/// );
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// let observer: Arc<dyn RerouteStateObserver> = Arc::new(FnStateObserver::new(
///     move |state: &RerouteState| sink.lock().unwrap().push(state.clone()),
/// ));
/// assert!(controller.add_reroute_state_observer(observer.clone()));
///
/// controller.reroute(Arc::new(IgnoreRoutes));
///
/// assert_eq!(
///     *seen.lock().unwrap(),
///     vec![
///         RerouteState::Idle,
///         RerouteState::FetchingRoute,
///         RerouteState::RouteFetched,
///         RerouteState::Idle,
///     ]
/// );
/// assert!(controller.remove_reroute_state_observer(&observer));
/// ```
#[derive(Clone)]
pub struct DefaultRerouteController {
    shared: Arc<ControllerShared>,
}

impl DefaultRerouteController {
    pub fn new(
        name: &str,
        directions_session: Arc<dyn DirectionsSession>,
        trip_session: Arc<dyn TripSession>,
        route_options_provider: Arc<dyn RouteOptionsProvider>,
    ) -> Self {
        debug!(
            event = events::CONTROLLER_CREATED,
            component = COMPONENT,
            controller = name,
            "reroute controller created"
        );

        Self {
            shared: Arc::new(ControllerShared {
                name: name.to_string(),
                directions_session,
                trip_session,
                route_options_provider,
                state_cell: StateCell::new(name),
                in_flight: Mutex::new(InFlightSlot::new()),
                commands: Mutex::new(CommandQueue::new()),
                progress: Condvar::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }
}

impl RerouteController for DefaultRerouteController {
    fn current_state(&self) -> RerouteState {
        self.shared.state_cell.current()
    }

    // Routes are applied by the directions session, the callback is not used.
    fn reroute(&self, _routes_callback: Arc<dyn RoutesCallback>) {
        self.shared.submit(Command::Reroute);
    }

    fn interrupt(&self) {
        self.shared.submit(Command::Interrupt);
    }

    fn add_reroute_state_observer(&self, observer: Arc<dyn RerouteStateObserver>) -> bool {
        if !self.shared.state_cell.register(observer.clone()) {
            debug!(
                event = events::OBSERVER_ADD_DUPLICATE,
                component = COMPONENT,
                controller = self.shared.name.as_str(),
                "observer already registered"
            );
            return false;
        }

        info!(
            event = events::OBSERVER_ADDED,
            component = COMPONENT,
            controller = self.shared.name.as_str(),
            observer_count = self.shared.state_cell.observer_count(),
            "reroute state observer added"
        );
        self.shared.submit(Command::Greet(observer));
        true
    }

    fn remove_reroute_state_observer(&self, observer: &Arc<dyn RerouteStateObserver>) -> bool {
        let removed = self.shared.state_cell.unregister(observer);
        let event = if removed {
            events::OBSERVER_REMOVED
        } else {
            events::OBSERVER_REMOVE_MISSING
        };
        debug!(
            event,
            component = COMPONENT,
            controller = self.shared.name.as_str(),
            observer_count = self.shared.state_cell.observer_count(),
            "reroute state observer removal"
        );
        removed
    }
}
