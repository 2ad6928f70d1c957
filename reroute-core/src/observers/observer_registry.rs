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

//! Observer set owned by the controller.

use crate::observers::observer_identity::ObserverIdentityKey;
use crate::observers::RerouteStateObserver;
use std::collections::HashMap;
use std::sync::Arc;

struct ObserverEntry {
    observer: Arc<dyn RerouteStateObserver>,
    greeted: bool,
}

/// Identity-keyed observer set.
///
/// Newly inserted observers stay out of broadcasts until they have been greeted with the
/// current state, so the first state an observer sees is always its greeting.
pub(crate) struct ObserverRegistry {
    entries: HashMap<ObserverIdentityKey, ObserverEntry>,
}

impl ObserverRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts an observer pending its greeting. Returns `true` only when first inserted.
    pub(crate) fn insert(&mut self, observer: Arc<dyn RerouteStateObserver>) -> bool {
        let key = ObserverIdentityKey::new(observer.clone());
        if self.entries.contains_key(&key) {
            return false;
        }

        self.entries.insert(
            key,
            ObserverEntry {
                observer,
                greeted: false,
            },
        );
        true
    }

    /// Removes an observer. Returns `true` only when the observer was present.
    pub(crate) fn remove(&mut self, observer: &Arc<dyn RerouteStateObserver>) -> bool {
        self.entries
            .remove(&ObserverIdentityKey::new(observer.clone()))
            .is_some()
    }

    /// Admits an observer to broadcasts. Returns `false` when it was removed before its
    /// greeting ran.
    pub(crate) fn mark_greeted(&mut self, observer: &Arc<dyn RerouteStateObserver>) -> bool {
        match self
            .entries
            .get_mut(&ObserverIdentityKey::new(observer.clone()))
        {
            Some(entry) => {
                entry.greeted = true;
                true
            }
            None => false,
        }
    }

    /// Snapshot of the observers that take part in broadcasts.
    pub(crate) fn broadcast_targets(&self) -> Vec<Arc<dyn RerouteStateObserver>> {
        self.entries
            .values()
            .filter(|entry| entry.greeted)
            .map(|entry| entry.observer.clone())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::ObserverRegistry;
    use crate::observers::RerouteStateObserver;
    use crate::reroute_state::RerouteState;
    use std::sync::Arc;

    struct SilentObserver;

    impl RerouteStateObserver for SilentObserver {
        fn on_new_state(&self, _state: &RerouteState) {}
    }

    #[test]
    fn observer_registry_insert_and_remove_are_idempotent() {
        let mut registry = ObserverRegistry::new();
        let observer: Arc<dyn RerouteStateObserver> = Arc::new(SilentObserver);

        assert!(registry.insert(observer.clone()));
        assert!(!registry.insert(observer.clone()));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(&observer));
        assert!(!registry.remove(&observer));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn pending_observers_are_excluded_from_broadcasts() {
        let mut registry = ObserverRegistry::new();
        let first: Arc<dyn RerouteStateObserver> = Arc::new(SilentObserver);
        let second: Arc<dyn RerouteStateObserver> = Arc::new(SilentObserver);

        registry.insert(first.clone());
        registry.insert(second.clone());
        assert!(registry.broadcast_targets().is_empty());

        assert!(registry.mark_greeted(&first));
        let targets = registry.broadcast_targets();
        assert_eq!(targets.len(), 1);
        assert!(Arc::ptr_eq(&targets[0], &first));
    }

    #[test]
    fn greeting_a_removed_observer_is_rejected() {
        let mut registry = ObserverRegistry::new();
        let observer: Arc<dyn RerouteStateObserver> = Arc::new(SilentObserver);

        registry.insert(observer.clone());
        registry.remove(&observer);

        assert!(!registry.mark_greeted(&observer));
        assert!(registry.broadcast_targets().is_empty());
    }
}
