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

//! Reroute process state reported to observers.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Underlying error attached to a failed reroute cycle.
pub type RerouteCause = Arc<dyn Error + Send + Sync + 'static>;

/// Message carried by [`RerouteState::Failed`] when no request options could be combined.
pub const CANNOT_COMBINE_ROUTE_OPTIONS: &str = "cannot combine route options";

/// Message carried by [`RerouteState::Failed`] when the directions session reports an error.
pub const ROUTE_REQUEST_FAILED: &str = "route request has failed";

/// State of the reroute process.
///
/// `Idle` is both the initial state and the state every cycle settles back into.
/// All other states are transient and are followed by `Idle` within the same cycle.
#[derive(Clone, Default)]
pub enum RerouteState {
    /// No reroute in progress.
    #[default]
    Idle,
    /// A route request has been submitted and is outstanding.
    FetchingRoute,
    /// The route request succeeded.
    RouteFetched,
    /// The route request was canceled, either through
    /// [`interrupt`](crate::RerouteController::interrupt) or by the directions session.
    Interrupted,
    /// The reroute cycle failed.
    Failed {
        message: String,
        cause: Option<RerouteCause>,
    },
}

impl RerouteState {
    pub fn failed(message: impl Into<String>) -> Self {
        RerouteState::Failed {
            message: message.into(),
            cause: None,
        }
    }

    pub fn failed_with_cause(message: impl Into<String>, cause: RerouteCause) -> Self {
        RerouteState::Failed {
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RerouteState::Idle)
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, RerouteState::FetchingRoute)
    }

    /// Stable label used in structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            RerouteState::Idle => "idle",
            RerouteState::FetchingRoute => "fetching_route",
            RerouteState::RouteFetched => "route_fetched",
            RerouteState::Interrupted => "interrupted",
            RerouteState::Failed { .. } => "failed",
        }
    }
}

// Causes compare by allocation identity, not by rendered text.
impl PartialEq for RerouteState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RerouteState::Idle, RerouteState::Idle)
            | (RerouteState::FetchingRoute, RerouteState::FetchingRoute)
            | (RerouteState::RouteFetched, RerouteState::RouteFetched)
            | (RerouteState::Interrupted, RerouteState::Interrupted) => true,
            (
                RerouteState::Failed {
                    message: left_message,
                    cause: left_cause,
                },
                RerouteState::Failed {
                    message: right_message,
                    cause: right_cause,
                },
            ) => {
                left_message == right_message
                    && match (left_cause, right_cause) {
                        (None, None) => true,
                        (Some(left), Some(right)) => Arc::ptr_eq(left, right),
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

impl Eq for RerouteState {}

impl Debug for RerouteState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RerouteState::Idle => write!(f, "Idle"),
            RerouteState::FetchingRoute => write!(f, "FetchingRoute"),
            RerouteState::RouteFetched => write!(f, "RouteFetched"),
            RerouteState::Interrupted => write!(f, "Interrupted"),
            RerouteState::Failed { message, cause } => f
                .debug_struct("Failed")
                .field("message", message)
                .field("cause", &cause.as_ref().map(|cause| cause.to_string()))
                .finish(),
        }
    }
}

impl Display for RerouteState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RerouteState::Failed {
                message,
                cause: Some(cause),
            } => write!(f, "failed: {message}: {cause}"),
            RerouteState::Failed {
                message,
                cause: None,
            } => write!(f, "failed: {message}"),
            state => write!(f, "{}", state.label()),
        }
    }
}
