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

mod fixed_trip_session;
pub use fixed_trip_session::FixedTripSession;
mod fixtures;
pub use fixtures::{
    off_route_location, off_route_progress, sample_route_options, sample_routes,
    FixedOptionsProvider, ProviderCall,
};
mod logging;
pub use logging::init_logging;
mod recording_observer;
pub use recording_observer::{RecordingObserver, RecordingRoutesCallback};
mod scripted_directions_session;
pub use scripted_directions_session::{
    CancelBehavior, ScriptedDirectionsSession, ScriptedReply, SubmittedRequest,
};
