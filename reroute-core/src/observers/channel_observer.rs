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

//! Observer adapter that feeds reroute states into an async channel.

use crate::observability::events;
use crate::observers::RerouteStateObserver;
use crate::reroute_state::RerouteState;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

const COMPONENT: &str = "channel_observer";

/// Forwards every state, in order, to an unbounded `tokio` channel.
///
/// Useful for async code that wants to `await` a particular state, such as the `Idle`
/// that ends a reroute cycle.
///
/// ```
/// use reroute_core::{ChannelStateObserver, RerouteState, RerouteStateObserver};
///
/// let (observer, mut states) = ChannelStateObserver::new();
/// observer.on_new_state(&RerouteState::FetchingRoute);
///
/// assert_eq!(states.try_recv().unwrap(), RerouteState::FetchingRoute);
/// ```
pub struct ChannelStateObserver {
    sender: UnboundedSender<RerouteState>,
    closed_logged: AtomicBool,
}

impl ChannelStateObserver {
    pub fn new() -> (Self, UnboundedReceiver<RerouteState>) {
        let (sender, receiver) = unbounded_channel();
        (
            Self {
                sender,
                closed_logged: AtomicBool::new(false),
            },
            receiver,
        )
    }
}

impl RerouteStateObserver for ChannelStateObserver {
    fn on_new_state(&self, state: &RerouteState) {
        if self.sender.send(state.clone()).is_err()
            && !self.closed_logged.swap(true, Ordering::Relaxed)
        {
            debug!(
                event = events::OBSERVER_CHANNEL_CLOSED,
                component = COMPONENT,
                "receiver dropped, further states are discarded"
            );
        }
    }
}
