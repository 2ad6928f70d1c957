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

//! Observer layer.
//!
//! Defines the single-method observer capability and owns the identity-keyed registry
//! the controller broadcasts through. Observers are held only for their registration
//! lifetime.

use crate::reroute_state::RerouteState;

pub(crate) mod channel_observer;
pub(crate) mod fn_observer;
pub(crate) mod observer_identity;
pub(crate) mod observer_registry;

/// Receives reroute state changes.
///
/// Called synchronously, in assignment order, from whichever thread drives the
/// controller. Implementations may call back into the controller; such calls are queued
/// and run after this callback returns.
pub trait RerouteStateObserver: Send + Sync {
    fn on_new_state(&self, state: &RerouteState);
}
