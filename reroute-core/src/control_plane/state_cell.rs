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

//! Current reroute state and its broadcast to registered observers.

use crate::control_plane::lock;
use crate::observability::{events, fields};
use crate::observers::observer_registry::ObserverRegistry;
use crate::observers::RerouteStateObserver;
use crate::reroute_state::RerouteState;
use std::sync::{Arc, Mutex};
use tracing::{debug, Level};

const COMPONENT: &str = "state_cell";

/// Owner of the current state and the observer registry.
///
/// Callers must serialize `transition` and `greet`; the controller does so through its
/// command queue. Neither lock is held while observers run.
pub(crate) struct StateCell {
    controller: String,
    state: Mutex<RerouteState>,
    registry: Mutex<ObserverRegistry>,
}

impl StateCell {
    pub(crate) fn new(controller: &str) -> Self {
        Self {
            controller: controller.to_string(),
            state: Mutex::new(RerouteState::Idle),
            registry: Mutex::new(ObserverRegistry::new()),
        }
    }

    pub(crate) fn current(&self) -> RerouteState {
        lock(&self.state).clone()
    }

    /// Assigns `new_state` and notifies every greeted observer.
    ///
    /// Assigning the current state is a no-op. Returns whether the state changed.
    pub(crate) fn transition(&self, new_state: RerouteState) -> bool {
        let previous = {
            let mut state = lock(&self.state);
            if *state == new_state {
                drop(state);
                debug!(
                    event = events::STATE_TRANSITION_SKIPPED,
                    component = COMPONENT,
                    controller = self.controller.as_str(),
                    to_state = fields::format_state(&new_state).as_str(),
                    "state unchanged, observers not notified"
                );
                return false;
            }
            std::mem::replace(&mut *state, new_state.clone())
        };

        let targets = lock(&self.registry).broadcast_targets();

        if tracing::enabled!(Level::DEBUG) {
            debug!(
                event = events::STATE_TRANSITION,
                component = COMPONENT,
                controller = self.controller.as_str(),
                from_state = fields::format_state(&previous).as_str(),
                to_state = fields::format_state(&new_state).as_str(),
                err = fields::format_cause(&new_state).as_str(),
                observer_count = targets.len(),
                "reroute state changed"
            );
        }

        for observer in targets {
            observer.on_new_state(&new_state);
        }

        true
    }

    /// Registers an observer pending its greeting. Returns `true` only when first added.
    pub(crate) fn register(&self, observer: Arc<dyn RerouteStateObserver>) -> bool {
        lock(&self.registry).insert(observer)
    }

    /// Returns `true` only when the observer was registered.
    pub(crate) fn unregister(&self, observer: &Arc<dyn RerouteStateObserver>) -> bool {
        lock(&self.registry).remove(observer)
    }

    /// Delivers the current state to a freshly registered observer and admits it to
    /// broadcasts. Skipped when the observer was removed in the meantime.
    pub(crate) fn greet(&self, observer: &Arc<dyn RerouteStateObserver>) -> bool {
        if !lock(&self.registry).mark_greeted(observer) {
            return false;
        }

        let current = self.current();
        observer.on_new_state(&current);
        true
    }

    pub(crate) fn observer_count(&self) -> usize {
        lock(&self.registry).len()
    }
}

#[cfg(test)]
mod tests {
    use super::StateCell;
    use crate::observers::RerouteStateObserver;
    use crate::reroute_state::RerouteState;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StateLog {
        states: Mutex<Vec<RerouteState>>,
    }

    impl StateLog {
        fn states(&self) -> Vec<RerouteState> {
            self.states.lock().unwrap().clone()
        }
    }

    impl RerouteStateObserver for StateLog {
        fn on_new_state(&self, state: &RerouteState) {
            self.states.lock().unwrap().push(state.clone());
        }
    }

    fn registered(cell: &StateCell) -> (Arc<StateLog>, Arc<dyn RerouteStateObserver>) {
        let log = Arc::new(StateLog::default());
        let observer: Arc<dyn RerouteStateObserver> = log.clone();
        assert!(cell.register(observer.clone()));
        assert!(cell.greet(&observer));
        (log, observer)
    }

    #[test]
    fn starts_idle() {
        let cell = StateCell::new("test");

        assert_eq!(cell.current(), RerouteState::Idle);
        assert_eq!(cell.observer_count(), 0);
    }

    #[test]
    fn equal_assignment_is_a_no_op() {
        let cell = StateCell::new("test");
        let (log, _observer) = registered(&cell);

        assert!(cell.transition(RerouteState::FetchingRoute));
        assert!(!cell.transition(RerouteState::FetchingRoute));

        assert_eq!(
            log.states(),
            vec![RerouteState::Idle, RerouteState::FetchingRoute]
        );
    }

    #[test]
    fn observers_see_transitions_in_assignment_order() {
        let cell = StateCell::new("test");
        let (log, _observer) = registered(&cell);

        cell.transition(RerouteState::FetchingRoute);
        cell.transition(RerouteState::Interrupted);
        cell.transition(RerouteState::Idle);

        assert_eq!(
            log.states(),
            vec![
                RerouteState::Idle,
                RerouteState::FetchingRoute,
                RerouteState::Interrupted,
                RerouteState::Idle
            ]
        );
        assert_eq!(cell.current(), RerouteState::Idle);
    }

    #[test]
    fn ungreeted_observer_misses_broadcasts_until_greeted() {
        let cell = StateCell::new("test");
        let log = Arc::new(StateLog::default());
        let observer: Arc<dyn RerouteStateObserver> = log.clone();

        cell.register(observer.clone());
        cell.transition(RerouteState::FetchingRoute);
        assert!(log.states().is_empty());

        cell.greet(&observer);
        cell.transition(RerouteState::RouteFetched);

        assert_eq!(
            log.states(),
            vec![RerouteState::FetchingRoute, RerouteState::RouteFetched]
        );
    }

    #[test]
    fn removed_observer_is_not_greeted_or_notified() {
        let cell = StateCell::new("test");
        let log = Arc::new(StateLog::default());
        let observer: Arc<dyn RerouteStateObserver> = log.clone();

        cell.register(observer.clone());
        assert!(cell.unregister(&observer));
        assert!(!cell.greet(&observer));
        cell.transition(RerouteState::FetchingRoute);

        assert!(log.states().is_empty());
        assert!(!cell.unregister(&observer));
    }
}
