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

//! Snapshot types exchanged with the trip and directions sessions.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Heading constraint for one coordinate, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Bearing {
    pub angle: f64,
    pub tolerance: f64,
}

/// Parameters of a route request.
///
/// `bearings`, `radiuses` and `waypoint_names` are per-coordinate: each list is either
/// empty or holds exactly one entry per coordinate, origin first.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteOptions {
    pub profile: String,
    pub coordinates: Vec<Point>,
    #[serde(default)]
    pub bearings: Vec<Option<Bearing>>,
    #[serde(default)]
    pub radiuses: Vec<Option<f64>>,
    #[serde(default)]
    pub waypoint_names: Vec<Option<String>>,
    #[serde(default)]
    pub alternatives: bool,
}

impl RouteOptions {
    pub fn new(profile: &str, coordinates: Vec<Point>) -> Self {
        Self {
            profile: profile.to_string(),
            coordinates,
            ..Default::default()
        }
    }

    pub fn origin(&self) -> Option<&Point> {
        self.coordinates.first()
    }

    pub fn destination(&self) -> Option<&Point> {
        self.coordinates.last()
    }
}

/// How far along the active route the traveler is.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteProgress {
    /// Waypoints still ahead of the traveler, destination included.
    pub remaining_waypoints: usize,
    /// Meters.
    #[serde(default)]
    pub distance_remaining: f64,
    /// Seconds.
    #[serde(default)]
    pub duration_remaining: f64,
}

/// Map-matched location of the traveler.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
    /// Direction of travel in degrees, when known.
    #[serde(default)]
    pub bearing: Option<f64>,
    /// Horizontal accuracy in meters, when known.
    #[serde(default)]
    pub accuracy: Option<f64>,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            ..Default::default()
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// A route returned by the directions session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct DirectionsRoute {
    pub route_index: usize,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    /// Encoded polyline.
    #[serde(default)]
    pub geometry: String,
}
