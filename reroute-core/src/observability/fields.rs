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

//! Value-format helpers for structured event fields.

use crate::reroute_state::RerouteState;
use crate::route_options::model::RouteOptions;

pub const NONE: &str = "none";

/// Renders a state with its failure message, without the cause chain.
pub fn format_state(state: &RerouteState) -> String {
    match state {
        RerouteState::Failed { message, .. } => format!("{}({message})", state.label()),
        _ => state.label().to_string(),
    }
}

pub fn format_cause(state: &RerouteState) -> String {
    match state {
        RerouteState::Failed {
            cause: Some(cause), ..
        } => cause.to_string(),
        _ => NONE.to_string(),
    }
}

/// Compact `lon,lat;lon,lat` rendering of the request coordinates.
pub fn format_coordinates(options: &RouteOptions) -> String {
    if options.coordinates.is_empty() {
        return NONE.to_string();
    }

    options
        .coordinates
        .iter()
        .map(|point| format!("{:.6},{:.6}", point.longitude, point.latitude))
        .collect::<Vec<_>>()
        .join(";")
}
