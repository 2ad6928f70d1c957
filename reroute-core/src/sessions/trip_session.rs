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

use crate::route_options::model::{Location, RouteProgress};

/// Source of the traveler's progress and location snapshots.
pub trait TripSession: Send + Sync {
    fn route_progress(&self) -> Option<RouteProgress>;

    fn enhanced_location(&self) -> Option<Location>;
}
