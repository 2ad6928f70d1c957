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

//! Directions service stand-in answering from tokio worker threads.

use crate::config::PlannedOutcome;
use reroute_core::{
    DirectionsRoute, DirectionsSession, Point, RouteOptions, RouteRequestId,
    RoutesRequestCallback, RoutesRequestError, RoutesRequestOutcome,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const COMPONENT: &str = "simulated_directions";

// Rough meters per degree; good enough for synthesized route lengths.
const METERS_PER_DEGREE: f64 = 111_320.0;
const SIMULATED_SPEED_MPS: f64 = 11.0;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct PendingReply {
    options: RouteOptions,
    callback: RoutesRequestCallback,
    task: Option<JoinHandle<()>>,
}

struct Inner {
    route_options: Mutex<Option<RouteOptions>>,
    next_outcome: Mutex<PlannedOutcome>,
    pending: Mutex<HashMap<RouteRequestId, PendingReply>>,
}

impl Inner {
    /// Delivers the planned outcome unless the request was canceled meanwhile.
    fn finish(&self, id: RouteRequestId, planned: PlannedOutcome) {
        let Some(pending) = lock(&self.pending).remove(&id) else {
            return;
        };

        let outcome = match planned {
            PlannedOutcome::Ready => {
                let routes = vec![synthesize_route(&pending.options)];
                *lock(&self.route_options) = Some(pending.options);
                RoutesRequestOutcome::Ready { routes }
            }
            PlannedOutcome::Failed => RoutesRequestOutcome::Failed {
                cause: Arc::new(RoutesRequestError::Network(
                    "simulated upstream timeout".to_string(),
                )),
                options: pending.options,
            },
            PlannedOutcome::Canceled => RoutesRequestOutcome::Canceled {
                options: pending.options,
            },
        };

        info!(
            component = COMPONENT,
            request_id = id.0,
            outcome = outcome.label(),
            "simulated route request finished"
        );
        (pending.callback)(outcome);
    }
}

fn synthesize_route(options: &RouteOptions) -> DirectionsRoute {
    let distance: f64 = options
        .coordinates
        .windows(2)
        .map(|leg| approximate_distance(&leg[0], &leg[1]))
        .sum();

    DirectionsRoute {
        route_index: 0,
        distance,
        duration: distance / SIMULATED_SPEED_MPS,
        geometry: String::new(),
    }
}

fn approximate_distance(from: &Point, to: &Point) -> f64 {
    let mean_latitude = ((from.latitude + to.latitude) / 2.0).to_radians();
    let dx = (to.longitude - from.longitude) * mean_latitude.cos();
    let dy = to.latitude - from.latitude;
    (dx * dx + dy * dy).sqrt() * METERS_PER_DEGREE
}

/// [`DirectionsSession`] that answers each request after a fixed delay on a tokio
/// runtime. Successful routes become the active route options.
pub struct SimulatedDirectionsSession {
    runtime: Handle,
    response_delay: Duration,
    next_id: AtomicU64,
    inner: Arc<Inner>,
}

impl SimulatedDirectionsSession {
    pub fn new(
        runtime: Handle,
        route_options: Option<RouteOptions>,
        response_delay: Duration,
    ) -> Self {
        Self {
            runtime,
            response_delay,
            next_id: AtomicU64::new(1),
            inner: Arc::new(Inner {
                route_options: Mutex::new(route_options),
                next_outcome: Mutex::new(PlannedOutcome::default()),
                pending: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Outcome for the next submitted request. Reset to `Ready` once used.
    pub fn plan_next_outcome(&self, outcome: PlannedOutcome) {
        *lock(&self.inner.next_outcome) = outcome;
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.inner.pending).len()
    }
}

impl DirectionsSession for SimulatedDirectionsSession {
    fn route_options(&self) -> Option<RouteOptions> {
        lock(&self.inner.route_options).clone()
    }

    fn request_routes(
        &self,
        options: RouteOptions,
        callback: RoutesRequestCallback,
    ) -> RouteRequestId {
        let id = RouteRequestId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let planned = std::mem::take(&mut *lock(&self.inner.next_outcome));

        debug!(
            component = COMPONENT,
            request_id = id.0,
            planned = ?planned,
            coordinates = options.coordinates.len(),
            "simulated route request accepted"
        );
        lock(&self.inner.pending).insert(
            id,
            PendingReply {
                options,
                callback,
                task: None,
            },
        );

        let inner = self.inner.clone();
        let delay = self.response_delay;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            inner.finish(id, planned);
        });

        match lock(&self.inner.pending).get_mut(&id) {
            Some(pending) => pending.task = Some(task),
            None => drop(task),
        }

        id
    }

    fn cancel(&self) {
        let canceled: Vec<(RouteRequestId, PendingReply)> =
            lock(&self.inner.pending).drain().collect();

        for (id, pending) in canceled {
            if let Some(task) = pending.task {
                task.abort();
            }
            info!(
                component = COMPONENT,
                request_id = id.0,
                "simulated route request canceled"
            );
            (pending.callback)(RoutesRequestOutcome::Canceled {
                options: pending.options,
            });
        }
    }
}
