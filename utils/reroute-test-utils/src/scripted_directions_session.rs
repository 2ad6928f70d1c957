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
    DirectionsRoute, DirectionsSession, RerouteCause, RouteOptions, RouteRequestId,
    RoutesRequestCallback, RoutesRequestOutcome,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// What a scripted request is answered with.
#[derive(Clone)]
pub enum ScriptedReply {
    Ready(Vec<DirectionsRoute>),
    Failed(RerouteCause),
    Canceled,
}

/// What `cancel()` does.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CancelBehavior {
    /// Only count the call; the test answers requests itself.
    RecordOnly,
    /// Answer every outstanding request with `Canceled`, synchronously.
    ReportCanceled,
}

/// A request the session received.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmittedRequest {
    pub id: RouteRequestId,
    pub options: RouteOptions,
}

struct PendingRequest {
    id: RouteRequestId,
    options: RouteOptions,
    callback: RoutesRequestCallback,
}

/// Directions session whose requests stay outstanding until the test answers them.
///
/// Answers can be given from any thread; callbacks always run outside the session's
/// locks.
pub struct ScriptedDirectionsSession {
    route_options: Mutex<Option<RouteOptions>>,
    cancel_behavior: CancelBehavior,
    next_id: AtomicU64,
    pending: Mutex<VecDeque<PendingRequest>>,
    submitted: Mutex<Vec<SubmittedRequest>>,
    cancel_calls: AtomicUsize,
}

impl ScriptedDirectionsSession {
    pub fn new(route_options: Option<RouteOptions>) -> Self {
        Self::with_cancel_behavior(route_options, CancelBehavior::RecordOnly)
    }

    pub fn with_cancel_behavior(
        route_options: Option<RouteOptions>,
        cancel_behavior: CancelBehavior,
    ) -> Self {
        Self {
            route_options: Mutex::new(route_options),
            cancel_behavior,
            next_id: AtomicU64::new(1),
            pending: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            cancel_calls: AtomicUsize::new(0),
        }
    }

    pub fn submitted(&self) -> Vec<SubmittedRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }

    /// Answers the most recent outstanding request. Returns `false` if none is outstanding.
    pub fn reply_latest(&self, reply: ScriptedReply) -> bool {
        let pending = self.pending.lock().unwrap().pop_back();
        match pending {
            Some(pending) => {
                Self::answer(pending, reply);
                true
            }
            None => false,
        }
    }

    /// Answers the request with the given id. Returns `false` if it is not outstanding.
    pub fn reply_to(&self, id: RouteRequestId, reply: ScriptedReply) -> bool {
        let pending = {
            let mut pending = self.pending.lock().unwrap();
            pending
                .iter()
                .position(|request| request.id == id)
                .and_then(|index| pending.remove(index))
        };
        match pending {
            Some(pending) => {
                Self::answer(pending, reply);
                true
            }
            None => false,
        }
    }

    fn answer(pending: PendingRequest, reply: ScriptedReply) {
        let outcome = match reply {
            ScriptedReply::Ready(routes) => RoutesRequestOutcome::Ready { routes },
            ScriptedReply::Failed(cause) => RoutesRequestOutcome::Failed {
                cause,
                options: pending.options,
            },
            ScriptedReply::Canceled => RoutesRequestOutcome::Canceled {
                options: pending.options,
            },
        };
        debug!(
            "scripted session answering request {} with {}",
            pending.id,
            outcome.label()
        );
        (pending.callback)(outcome);
    }
}

impl DirectionsSession for ScriptedDirectionsSession {
    fn route_options(&self) -> Option<RouteOptions> {
        self.route_options.lock().unwrap().clone()
    }

    fn request_routes(
        &self,
        options: RouteOptions,
        callback: RoutesRequestCallback,
    ) -> RouteRequestId {
        let id = RouteRequestId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.submitted.lock().unwrap().push(SubmittedRequest {
            id,
            options: options.clone(),
        });
        self.pending.lock().unwrap().push_back(PendingRequest {
            id,
            options,
            callback,
        });
        id
    }

    fn cancel(&self) {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        if self.cancel_behavior != CancelBehavior::ReportCanceled {
            return;
        }

        let canceled: Vec<PendingRequest> = self.pending.lock().unwrap().drain(..).collect();
        for pending in canceled {
            Self::answer(pending, ScriptedReply::Canceled);
        }
    }
}
