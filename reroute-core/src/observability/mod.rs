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

//! Observability vocabulary.
//!
//! Library code emits `tracing` events keyed by the names in [`events`], rendering
//! states, causes and coordinates with the helpers in [`fields`]. It never installs a global subscriber; binaries and tests do that
//! once at the process boundary.

pub mod events;
pub mod fields;
