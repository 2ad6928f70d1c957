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

use reroute_core::{DirectionsRoute, RerouteState, RerouteStateObserver, RoutesCallback};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Observer that keeps every state it receives, in order.
#[derive(Default)]
pub struct RecordingObserver {
    states: Mutex<Vec<RerouteState>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn states(&self) -> Vec<RerouteState> {
        self.states.lock().unwrap().clone()
    }

    pub fn count_of(&self, state: &RerouteState) -> usize {
        self.states
            .lock()
            .unwrap()
            .iter()
            .filter(|seen| *seen == state)
            .count()
    }

    pub fn clear(&self) {
        self.states.lock().unwrap().clear();
    }
}

impl RerouteStateObserver for RecordingObserver {
    fn on_new_state(&self, state: &RerouteState) {
        debug!("within recording_observer! state: {state}");
        self.states.lock().unwrap().push(state.clone());
    }
}

/// Routes callback that counts its invocations.
#[derive(Default)]
pub struct RecordingRoutesCallback {
    calls: AtomicUsize,
}

impl RecordingRoutesCallback {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutesCallback for RecordingRoutesCallback {
    fn on_new_routes(&self, routes: Vec<DirectionsRoute>) {
        debug!("within recording_routes_callback! routes: {}", routes.len());
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
