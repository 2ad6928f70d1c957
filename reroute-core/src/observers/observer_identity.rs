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

//! Identity keying for registered observers.

use crate::observers::RerouteStateObserver;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Observer identity: two clones of the same `Arc` are the same observer.
#[derive(Clone)]
pub(crate) struct ObserverIdentityKey {
    observer: Arc<dyn RerouteStateObserver>,
}

impl ObserverIdentityKey {
    pub(crate) fn new(observer: Arc<dyn RerouteStateObserver>) -> Self {
        Self { observer }
    }

    // Data pointer only; vtable pointers are not unique per type.
    fn address(&self) -> *const () {
        Arc::as_ptr(&self.observer) as *const ()
    }
}

impl Hash for ObserverIdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl PartialEq for ObserverIdentityKey {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for ObserverIdentityKey {}

impl Debug for ObserverIdentityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverIdentityKey")
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ObserverIdentityKey;
    use crate::observers::RerouteStateObserver;
    use crate::reroute_state::RerouteState;
    use std::sync::Arc;

    struct SilentObserver;

    impl RerouteStateObserver for SilentObserver {
        fn on_new_state(&self, _state: &RerouteState) {}
    }

    #[test]
    fn observer_key_uses_arc_identity() {
        let observer: Arc<dyn RerouteStateObserver> = Arc::new(SilentObserver);
        let same_observer = observer.clone();
        let another_observer: Arc<dyn RerouteStateObserver> = Arc::new(SilentObserver);

        assert_eq!(
            ObserverIdentityKey::new(observer.clone()),
            ObserverIdentityKey::new(same_observer)
        );
        assert_ne!(
            ObserverIdentityKey::new(observer),
            ObserverIdentityKey::new(another_observer)
        );
    }
}
