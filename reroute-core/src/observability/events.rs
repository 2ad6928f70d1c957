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

//! Canonical structured event names used across `reroute-core`.

// Reroute lifecycle events.
pub const CONTROLLER_CREATED: &str = "controller_created";
pub const REROUTE_START: &str = "reroute_start";
pub const REROUTE_OPTIONS_COMBINE_FAILED: &str = "reroute_options_combine_failed";
pub const REROUTE_REQUEST_SUBMITTED: &str = "reroute_request_submitted";
pub const REROUTE_REQUEST_SUPERSEDED: &str = "reroute_request_superseded";
pub const REROUTE_REQUEST_READY: &str = "reroute_request_ready";
pub const REROUTE_REQUEST_FAILED: &str = "reroute_request_failed";
pub const REROUTE_REQUEST_CANCELED: &str = "reroute_request_canceled";
pub const REROUTE_OUTCOME_STALE: &str = "reroute_outcome_stale";
pub const REROUTE_OUTCOME_AFTER_SHUTDOWN: &str = "reroute_outcome_after_shutdown";
pub const REROUTE_INTERRUPT_REQUESTED: &str = "reroute_interrupt_requested";
pub const REROUTE_INTERRUPT_IGNORED: &str = "reroute_interrupt_ignored";
pub const REROUTE_CYCLE_ABANDONED: &str = "reroute_cycle_abandoned";

// State and observer events.
pub const STATE_TRANSITION: &str = "state_transition";
pub const STATE_TRANSITION_SKIPPED: &str = "state_transition_skipped";
pub const OBSERVER_ADDED: &str = "observer_added";
pub const OBSERVER_ADD_DUPLICATE: &str = "observer_add_duplicate";
pub const OBSERVER_REMOVED: &str = "observer_removed";
pub const OBSERVER_REMOVE_MISSING: &str = "observer_remove_missing";
pub const OBSERVER_CHANNEL_CLOSED: &str = "observer_channel_closed";

// Command queue events.
pub const COMMAND_QUEUED_BEHIND_DRAIN: &str = "command_queued_behind_drain";
pub const COMMAND_DRAIN_ABORTED: &str = "command_drain_aborted";

// Options provider events.
pub const ROUTE_OPTIONS_REJECTED: &str = "route_options_rejected";
