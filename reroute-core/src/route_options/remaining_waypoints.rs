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

//! Default options combiner: re-plans from the current location through the waypoints
//! that are still ahead.

use crate::observability::events;
use crate::route_options::model::{Bearing, Location, RouteOptions, RouteProgress};
use crate::route_options::provider::RouteOptionsProvider;
use std::iter;
use tracing::debug;

const COMPONENT: &str = "remaining_waypoints_provider";

/// Tolerance, in degrees, applied to the heading-derived origin bearing.
pub const DEFAULT_ORIGIN_BEARING_TOLERANCE: f64 = 90.0;

/// [`RouteOptionsProvider`] that replaces the origin with the current location and keeps
/// only the waypoints the traveler has not reached yet.
///
/// # Examples
///
/// ```
/// use reroute_core::{
///     Location, Point, RemainingWaypointsOptionsProvider, RouteOptions, RouteOptionsProvider,
///     RouteProgress,
/// };
///
/// let options = RouteOptions::new(
///     "driving-traffic",
///     vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
/// );
/// let progress = RouteProgress {
///     remaining_waypoints: 1,
///     ..Default::default()
/// };
/// let location = Location::new(1.5, 1.4);
///
/// let provider = RemainingWaypointsOptionsProvider::new();
/// let rerouted = provider
///     .update(Some(&options), Some(&progress), Some(&location))
///     .unwrap();
///
/// assert_eq!(
///     rerouted.coordinates,
///     vec![Point::new(1.5, 1.4), Point::new(2.0, 2.0)]
/// );
/// assert!(provider.update(None, Some(&progress), Some(&location)).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct RemainingWaypointsOptionsProvider {
    bearing_tolerance: f64,
}

impl RemainingWaypointsOptionsProvider {
    pub fn new() -> Self {
        Self::with_bearing_tolerance(DEFAULT_ORIGIN_BEARING_TOLERANCE)
    }

    pub fn with_bearing_tolerance(bearing_tolerance: f64) -> Self {
        Self { bearing_tolerance }
    }

    fn reject(reason: &'static str) -> Option<RouteOptions> {
        debug!(
            event = events::ROUTE_OPTIONS_REJECTED,
            component = COMPONENT,
            reason,
            "unable to combine route options"
        );
        None
    }
}

impl Default for RemainingWaypointsOptionsProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuilds one per-coordinate list for the new request.
///
/// Empty lists stay empty. Returns `None` when the list does not line up with the
/// coordinates.
fn rebase_per_coordinate<T: Clone>(
    values: &[T],
    coordinate_count: usize,
    first_kept: usize,
    origin: T,
) -> Option<Vec<T>> {
    if values.is_empty() {
        return Some(Vec::new());
    }
    if values.len() != coordinate_count {
        return None;
    }

    Some(
        iter::once(origin)
            .chain(values[first_kept..].iter().cloned())
            .collect(),
    )
}

impl RouteOptionsProvider for RemainingWaypointsOptionsProvider {
    fn update(
        &self,
        route_options: Option<&RouteOptions>,
        route_progress: Option<&RouteProgress>,
        location: Option<&Location>,
    ) -> Option<RouteOptions> {
        let (Some(route_options), Some(route_progress), Some(location)) =
            (route_options, route_progress, location)
        else {
            return Self::reject("missing_input");
        };

        let coordinate_count = route_options.coordinates.len();
        if coordinate_count < 2 {
            return Self::reject("too_few_coordinates");
        }

        let remaining = route_progress.remaining_waypoints;
        if remaining == 0 {
            return Self::reject("no_remaining_waypoints");
        }
        if remaining > coordinate_count - 1 {
            return Self::reject("remaining_waypoints_out_of_range");
        }

        let first_kept = coordinate_count - remaining;
        let origin_bearing = location.bearing.map(|angle| Bearing {
            angle,
            tolerance: self.bearing_tolerance,
        });

        let bearings = if route_options.bearings.is_empty() && origin_bearing.is_some() {
            iter::once(origin_bearing)
                .chain(iter::repeat(None).take(remaining))
                .collect()
        } else {
            match rebase_per_coordinate(
                &route_options.bearings,
                coordinate_count,
                first_kept,
                origin_bearing,
            ) {
                Some(bearings) => bearings,
                None => return Self::reject("bearings_length_mismatch"),
            }
        };

        let Some(radiuses) =
            rebase_per_coordinate(&route_options.radiuses, coordinate_count, first_kept, None)
        else {
            return Self::reject("radiuses_length_mismatch");
        };

        let Some(waypoint_names) = rebase_per_coordinate(
            &route_options.waypoint_names,
            coordinate_count,
            first_kept,
            None,
        ) else {
            return Self::reject("waypoint_names_length_mismatch");
        };

        let coordinates = iter::once(location.point())
            .chain(route_options.coordinates[first_kept..].iter().copied())
            .collect();

        Some(RouteOptions {
            profile: route_options.profile.clone(),
            coordinates,
            bearings,
            radiuses,
            waypoint_names,
            alternatives: route_options.alternatives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{RemainingWaypointsOptionsProvider, DEFAULT_ORIGIN_BEARING_TOLERANCE};
    use crate::route_options::model::{Bearing, Location, Point, RouteOptions, RouteProgress};
    use crate::route_options::provider::RouteOptionsProvider;

    fn four_stop_options() -> RouteOptions {
        RouteOptions {
            profile: "driving".to_string(),
            coordinates: vec![
                Point::new(10.0, 50.0),
                Point::new(10.1, 50.1),
                Point::new(10.2, 50.2),
                Point::new(10.3, 50.3),
            ],
            radiuses: vec![None, Some(25.0), Some(30.0), None],
            waypoint_names: vec![
                Some("home".to_string()),
                Some("bakery".to_string()),
                Some("school".to_string()),
                Some("office".to_string()),
            ],
            alternatives: true,
            ..Default::default()
        }
    }

    fn progress(remaining_waypoints: usize) -> RouteProgress {
        RouteProgress {
            remaining_waypoints,
            ..Default::default()
        }
    }

    fn heading_location(bearing: Option<f64>) -> Location {
        Location {
            bearing,
            ..Location::new(10.15, 50.12)
        }
    }

    #[test]
    fn missing_inputs_cannot_be_combined() {
        let provider = RemainingWaypointsOptionsProvider::new();
        let options = four_stop_options();
        let location = heading_location(None);

        assert!(provider
            .update(None, Some(&progress(2)), Some(&location))
            .is_none());
        assert!(provider
            .update(Some(&options), None, Some(&location))
            .is_none());
        assert!(provider
            .update(Some(&options), Some(&progress(2)), None)
            .is_none());
    }

    #[test]
    fn remaining_waypoints_must_fit_the_route() {
        let provider = RemainingWaypointsOptionsProvider::new();
        let options = four_stop_options();
        let location = heading_location(None);

        assert!(provider
            .update(Some(&options), Some(&progress(0)), Some(&location))
            .is_none());
        assert!(provider
            .update(Some(&options), Some(&progress(4)), Some(&location))
            .is_none());
        assert!(provider
            .update(Some(&options), Some(&progress(3)), Some(&location))
            .is_some());
    }

    #[test]
    fn single_coordinate_route_cannot_be_combined() {
        let provider = RemainingWaypointsOptionsProvider::new();
        let options = RouteOptions::new("walking", vec![Point::new(1.0, 1.0)]);

        assert!(provider
            .update(
                Some(&options),
                Some(&progress(1)),
                Some(&heading_location(None))
            )
            .is_none());
    }

    #[test]
    fn origin_is_replaced_and_passed_waypoints_are_dropped() {
        let provider = RemainingWaypointsOptionsProvider::new();
        let options = four_stop_options();

        let rerouted = provider
            .update(
                Some(&options),
                Some(&progress(2)),
                Some(&heading_location(None)),
            )
            .expect("options should combine");

        assert_eq!(
            rerouted.coordinates,
            vec![
                Point::new(10.15, 50.12),
                Point::new(10.2, 50.2),
                Point::new(10.3, 50.3)
            ]
        );
        assert_eq!(rerouted.radiuses, vec![None, Some(30.0), None]);
        assert_eq!(
            rerouted.waypoint_names,
            vec![None, Some("school".to_string()), Some("office".to_string())]
        );
        assert!(rerouted.bearings.is_empty());
        assert_eq!(rerouted.profile, "driving");
        assert!(rerouted.alternatives);
    }

    #[test]
    fn heading_becomes_origin_bearing() {
        let provider = RemainingWaypointsOptionsProvider::with_bearing_tolerance(45.0);
        let options = four_stop_options();

        let rerouted = provider
            .update(
                Some(&options),
                Some(&progress(1)),
                Some(&heading_location(Some(270.0))),
            )
            .expect("options should combine");

        assert_eq!(
            rerouted.bearings,
            vec![
                Some(Bearing {
                    angle: 270.0,
                    tolerance: 45.0
                }),
                None
            ]
        );
    }

    #[test]
    fn existing_bearings_keep_destination_entries() {
        let provider = RemainingWaypointsOptionsProvider::default();
        let destination_bearing = Bearing {
            angle: 10.0,
            tolerance: 20.0,
        };
        let options = RouteOptions {
            bearings: vec![None, None, None, Some(destination_bearing)],
            ..four_stop_options()
        };

        let rerouted = provider
            .update(
                Some(&options),
                Some(&progress(1)),
                Some(&heading_location(Some(90.0))),
            )
            .expect("options should combine");

        assert_eq!(
            rerouted.bearings,
            vec![
                Some(Bearing {
                    angle: 90.0,
                    tolerance: DEFAULT_ORIGIN_BEARING_TOLERANCE
                }),
                Some(destination_bearing)
            ]
        );
    }

    #[test]
    fn mismatched_per_coordinate_lists_cannot_be_combined() {
        let provider = RemainingWaypointsOptionsProvider::new();
        let options = RouteOptions {
            radiuses: vec![Some(5.0)],
            ..four_stop_options()
        };

        assert!(provider
            .update(
                Some(&options),
                Some(&progress(2)),
                Some(&heading_location(None))
            )
            .is_none());
    }
}
