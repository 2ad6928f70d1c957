use reroute_core::{
    DefaultRerouteController, RemainingWaypointsOptionsProvider, RerouteController,
    RouteOptionsProvider,
};
use reroute_test_utils::{
    off_route_location, off_route_progress, sample_route_options, CancelBehavior,
    FixedTripSession, RecordingObserver, ScriptedDirectionsSession,
};
use std::sync::Arc;

#[allow(dead_code)]
pub(crate) struct Harness {
    pub(crate) controller: DefaultRerouteController,
    pub(crate) session: Arc<ScriptedDirectionsSession>,
    pub(crate) trip: Arc<FixedTripSession>,
    pub(crate) observer: Arc<RecordingObserver>,
}

/// Controller wired to a scripted session, an off-route trip and the given provider, with
/// a recording observer already registered and its greeting cleared.
#[allow(dead_code)]
pub(crate) fn make_harness(
    name: &str,
    cancel_behavior: CancelBehavior,
    provider: Arc<dyn RouteOptionsProvider>,
) -> Harness {
    reroute_test_utils::init_logging();

    let session = Arc::new(ScriptedDirectionsSession::with_cancel_behavior(
        Some(sample_route_options()),
        cancel_behavior,
    ));
    let trip = Arc::new(FixedTripSession::new(
        Some(off_route_progress()),
        Some(off_route_location()),
    ));
    let controller = DefaultRerouteController::new(name, session.clone(), trip.clone(), provider);

    let observer = RecordingObserver::new();
    assert!(controller.add_reroute_state_observer(observer.clone()));
    observer.clear();

    Harness {
        controller,
        session,
        trip,
        observer,
    }
}

#[allow(dead_code)]
pub(crate) fn make_default_harness(name: &str, cancel_behavior: CancelBehavior) -> Harness {
    make_harness(
        name,
        cancel_behavior,
        Arc::new(RemainingWaypointsOptionsProvider::new()),
    )
}
