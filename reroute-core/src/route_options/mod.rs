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

//! Route-options layer.
//!
//! Holds the request/progress/location snapshot model and the contract for deriving a new
//! route request from the traveler's current situation. Combination is pure: providers
//! never touch controller state.

pub(crate) mod model;
pub(crate) mod provider;
pub(crate) mod remaining_waypoints;
