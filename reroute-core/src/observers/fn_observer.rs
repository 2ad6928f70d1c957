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

use crate::observers::RerouteStateObserver;
use crate::reroute_state::RerouteState;

/// Closure-backed observer.
pub struct FnStateObserver<F> {
    on_new_state: F,
}

impl<F> FnStateObserver<F>
where
    F: Fn(&RerouteState) + Send + Sync,
{
    pub fn new(on_new_state: F) -> Self {
        Self { on_new_state }
    }
}

impl<F> RerouteStateObserver for FnStateObserver<F>
where
    F: Fn(&RerouteState) + Send + Sync,
{
    fn on_new_state(&self, state: &RerouteState) {
        (self.on_new_state)(state)
    }
}
