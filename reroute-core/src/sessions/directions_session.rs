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

//! Route-fetching collaborator contract.

use crate::reroute_state::RerouteCause;
use crate::route_options::model::{DirectionsRoute, RouteOptions};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Identifier assigned by a [`DirectionsSession`] to a submitted request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RouteRequestId(pub u64);

impl Display for RouteRequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal result of a route request. Exactly one is delivered per request.
#[derive(Clone)]
pub enum RoutesRequestOutcome {
    Ready {
        routes: Vec<DirectionsRoute>,
    },
    Failed {
        cause: RerouteCause,
        options: RouteOptions,
    },
    Canceled {
        options: RouteOptions,
    },
}

impl RoutesRequestOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RoutesRequestOutcome::Ready { .. } => "ready",
            RoutesRequestOutcome::Failed { .. } => "failed",
            RoutesRequestOutcome::Canceled { .. } => "canceled",
        }
    }
}

impl Debug for RoutesRequestOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutesRequestOutcome::Ready { routes } => f
                .debug_struct("Ready")
                .field("routes", &routes.len())
                .finish(),
            RoutesRequestOutcome::Failed { cause, options } => f
                .debug_struct("Failed")
                .field("cause", &cause.to_string())
                .field("options", options)
                .finish(),
            RoutesRequestOutcome::Canceled { options } => f
                .debug_struct("Canceled")
                .field("options", options)
                .finish(),
        }
    }
}

/// Completion callback handed to [`DirectionsSession::request_routes`].
pub type RoutesRequestCallback = Box<dyn FnOnce(RoutesRequestOutcome) + Send + 'static>;

/// Session that fetches routes and applies them to the active trip.
///
/// Implementations may run the request on any thread and may invoke the callback from
/// any thread, including synchronously from inside `request_routes` or `cancel`.
pub trait DirectionsSession: Send + Sync {
    /// Options of the currently active route, if any.
    fn route_options(&self) -> Option<RouteOptions>;

    /// Submits a route request. `callback` is invoked exactly once with the outcome.
    ///
    /// Successful routes are applied by the session itself.
    fn request_routes(
        &self,
        options: RouteOptions,
        callback: RoutesRequestCallback,
    ) -> RouteRequestId;

    /// Requests cancellation of the outstanding request. No-op when nothing is outstanding.
    fn cancel(&self);
}

/// Failures a directions session reports through [`RoutesRequestOutcome::Failed`].
#[derive(Debug)]
pub enum RoutesRequestError {
    Network(String),
    NoRoutesFound,
    InvalidResponse(String),
}

impl Display for RoutesRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutesRequestError::Network(reason) => write!(f, "network error: {reason}"),
            RoutesRequestError::NoRoutesFound => write!(f, "no routes found"),
            RoutesRequestError::InvalidResponse(reason) => {
                write!(f, "invalid directions response: {reason}")
            }
        }
    }
}

impl Error for RoutesRequestError {}
