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

mod support;

use reroute_core::{
    ChannelStateObserver, DefaultRerouteController, RerouteCause, RerouteController,
    RerouteState, RerouteStateObserver, RoutesRequestError, ROUTE_REQUEST_FAILED,
};
use reroute_test_utils::{
    sample_routes, CancelBehavior, RecordingObserver, RecordingRoutesCallback, ScriptedReply,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;
use support::make_default_harness;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

const STATE_WAIT: Duration = Duration::from_secs(5);

/// Parks the first thread that delivers `FetchingRoute` until released.
struct FetchingGate {
    entered: Mutex<Option<mpsc::Sender<()>>>,
    release: Mutex<Option<mpsc::Receiver<()>>>,
}

impl FetchingGate {
    fn new() -> (Arc<Self>, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let gate = Arc::new(Self {
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(Some(release_rx)),
        });
        (gate, entered_rx, release_tx)
    }
}

impl RerouteStateObserver for FetchingGate {
    fn on_new_state(&self, state: &RerouteState) {
        if *state != RerouteState::FetchingRoute {
            return;
        }
        if let Some(entered) = self.entered.lock().unwrap().take() {
            let _ = entered.send(());
        }
        let release = self.release.lock().unwrap().take();
        if let Some(release) = release {
            let _ = release.recv_timeout(STATE_WAIT);
        }
    }
}

/// Calls `reroute` again the first time a cycle fails.
struct RetryOnFailure {
    controller: Mutex<Option<DefaultRerouteController>>,
}

impl RerouteStateObserver for RetryOnFailure {
    fn on_new_state(&self, state: &RerouteState) {
        if !matches!(state, RerouteState::Failed { .. }) {
            return;
        }
        let controller = self.controller.lock().unwrap().take();
        if let Some(controller) = controller {
            controller.reroute(RecordingRoutesCallback::new());
        }
    }
}

async fn next_state(states: &mut UnboundedReceiver<RerouteState>) -> RerouteState {
    timeout(STATE_WAIT, states.recv())
        .await
        .expect("state should arrive in time")
        .expect("state channel should stay open")
}

#[test]
fn reroute_while_fetching_cancels_and_replaces() {
    let harness = make_default_harness("replace", CancelBehavior::RecordOnly);

    harness.controller.reroute(RecordingRoutesCallback::new());
    harness.controller.reroute(RecordingRoutesCallback::new());

    let submitted = harness.session.submitted();
    assert_eq!(submitted.len(), 2);
    assert_eq!(harness.session.cancel_count(), 1);

    // The superseded request's cancellation is stale.
    assert!(harness
        .session
        .reply_to(submitted[0].id, ScriptedReply::Canceled));
    assert_eq!(harness.observer.states(), vec![RerouteState::FetchingRoute]);
    assert_eq!(
        harness.controller.current_state(),
        RerouteState::FetchingRoute
    );

    assert!(harness
        .session
        .reply_to(submitted[1].id, ScriptedReply::Ready(sample_routes())));
    assert_eq!(
        harness.observer.states(),
        vec![
            RerouteState::FetchingRoute,
            RerouteState::RouteFetched,
            RerouteState::Idle,
        ]
    );
}

#[test]
fn synchronous_cancel_of_superseded_request_is_ignored() {
    let harness = make_default_harness("replace-sync", CancelBehavior::ReportCanceled);

    harness.controller.reroute(RecordingRoutesCallback::new());
    harness.controller.reroute(RecordingRoutesCallback::new());

    assert_eq!(harness.session.request_count(), 2);
    assert_eq!(harness.session.pending_count(), 1);
    assert_eq!(harness.observer.states(), vec![RerouteState::FetchingRoute]);

    assert!(harness
        .session
        .reply_latest(ScriptedReply::Ready(sample_routes())));
    assert_eq!(harness.controller.current_state(), RerouteState::Idle);
    assert_eq!(harness.observer.count_of(&RerouteState::Interrupted), 0);
}

#[test]
fn late_success_of_superseded_request_is_ignored() {
    let harness = make_default_harness("late-ready", CancelBehavior::RecordOnly);
    let cause: RerouteCause = Arc::new(RoutesRequestError::NoRoutesFound);

    harness.controller.reroute(RecordingRoutesCallback::new());
    harness.controller.reroute(RecordingRoutesCallback::new());
    let submitted = harness.session.submitted();

    assert!(harness
        .session
        .reply_to(submitted[0].id, ScriptedReply::Ready(sample_routes())));
    assert_eq!(harness.observer.count_of(&RerouteState::RouteFetched), 0);

    assert!(harness
        .session
        .reply_to(submitted[1].id, ScriptedReply::Failed(cause.clone())));
    assert_eq!(
        harness.observer.states(),
        vec![
            RerouteState::FetchingRoute,
            RerouteState::failed_with_cause(ROUTE_REQUEST_FAILED, cause),
            RerouteState::Idle,
        ]
    );
}

#[test]
fn observer_can_retry_from_a_failure_notification() {
    let harness = make_default_harness("retry", CancelBehavior::RecordOnly);
    let retry = Arc::new(RetryOnFailure {
        controller: Mutex::new(Some(harness.controller.clone())),
    });
    assert!(harness.controller.add_reroute_state_observer(retry));
    let cause: RerouteCause = Arc::new(RoutesRequestError::InvalidResponse(
        "truncated body".to_string(),
    ));

    harness.controller.reroute(RecordingRoutesCallback::new());
    assert!(harness
        .session
        .reply_latest(ScriptedReply::Failed(cause.clone())));

    // The retry runs after the failed cycle has settled.
    assert_eq!(
        harness.observer.states(),
        vec![
            RerouteState::FetchingRoute,
            RerouteState::failed_with_cause(ROUTE_REQUEST_FAILED, cause),
            RerouteState::Idle,
            RerouteState::FetchingRoute,
        ]
    );
    assert_eq!(harness.session.request_count(), 2);

    assert!(harness
        .session
        .reply_latest(ScriptedReply::Ready(sample_routes())));
    assert_eq!(harness.controller.current_state(), RerouteState::Idle);
}

#[tokio::test(flavor = "multi_thread")]
async fn completion_from_worker_thread_settles_idle() {
    let harness = make_default_harness("worker-completion", CancelBehavior::RecordOnly);
    let (observer, mut states) = ChannelStateObserver::new();
    assert!(harness
        .controller
        .add_reroute_state_observer(Arc::new(observer)));
    assert_eq!(next_state(&mut states).await, RerouteState::Idle);

    harness.controller.reroute(RecordingRoutesCallback::new());
    assert_eq!(next_state(&mut states).await, RerouteState::FetchingRoute);

    let session = harness.session.clone();
    let reply = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.reply_latest(ScriptedReply::Ready(sample_routes()))
    });

    assert_eq!(next_state(&mut states).await, RerouteState::RouteFetched);
    assert_eq!(next_state(&mut states).await, RerouteState::Idle);
    assert!(reply.await.expect("reply task should not panic"));
    assert_eq!(harness.controller.current_state(), RerouteState::Idle);
}

#[test]
fn interrupt_from_another_thread_does_not_wait_for_a_blocked_drain() {
    let harness = make_default_harness("blocked-interrupt", CancelBehavior::ReportCanceled);
    let (gate, entered, release) = FetchingGate::new();
    assert!(harness.controller.add_reroute_state_observer(gate));

    let drainer = harness.controller.clone();
    let rerouting = thread::spawn(move || drainer.reroute(RecordingRoutesCallback::new()));
    entered
        .recv_timeout(STATE_WAIT)
        .expect("reroute should reach FetchingRoute");

    let interrupter = harness.controller.clone();
    thread::spawn(move || interrupter.interrupt())
        .join()
        .expect("interrupt thread should not panic");
    assert_eq!(harness.controller.current_state(), RerouteState::FetchingRoute);
    assert_eq!(harness.session.cancel_count(), 0);

    release.send(()).expect("gate should still be waiting");
    rerouting.join().expect("reroute thread should not panic");

    assert_eq!(
        harness.observer.states(),
        vec![
            RerouteState::FetchingRoute,
            RerouteState::Interrupted,
            RerouteState::Idle,
        ]
    );
    assert_eq!(harness.session.cancel_count(), 1);
    assert_eq!(harness.session.request_count(), 1);
}

#[test]
fn observer_added_from_another_thread_is_greeted_before_add_returns() {
    let harness = make_default_harness("blocked-greeting", CancelBehavior::RecordOnly);
    let (gate, entered, release) = FetchingGate::new();
    assert!(harness.controller.add_reroute_state_observer(gate));

    let drainer = harness.controller.clone();
    let rerouting = thread::spawn(move || drainer.reroute(RecordingRoutesCallback::new()));
    entered
        .recv_timeout(STATE_WAIT)
        .expect("reroute should reach FetchingRoute");

    let adder = harness.controller.clone();
    let adding = thread::spawn(move || {
        let late = RecordingObserver::new();
        let handle: Arc<dyn RerouteStateObserver> = late.clone();
        let added = adder.add_reroute_state_observer(handle.clone());
        let greeted = late.states();
        let removed = adder.remove_reroute_state_observer(&handle);
        (added, greeted, removed)
    });

    // The greeting is queued behind the parked drain.
    thread::sleep(Duration::from_millis(50));
    assert!(!adding.is_finished());

    release.send(()).expect("gate should still be waiting");
    rerouting.join().expect("reroute thread should not panic");
    let (added, greeted, removed) = adding.join().expect("adding thread should not panic");

    assert!(added);
    assert_eq!(greeted, vec![RerouteState::FetchingRoute]);
    assert!(removed);
    assert_eq!(harness.session.request_count(), 1);
}

#[test]
fn concurrent_callers_never_repeat_a_state() {
    let harness = make_default_harness("many-callers", CancelBehavior::RecordOnly);
    let stop = Arc::new(AtomicBool::new(false));

    let answering = {
        let session = harness.session.clone();
        let stop = stop.clone();
        thread::spawn(move || {
            while !stop.load(Ordering::SeqCst) {
                session.reply_latest(ScriptedReply::Ready(Vec::new()));
                thread::yield_now();
            }
        })
    };

    let callers: Vec<_> = (0..4)
        .map(|_| {
            let controller = harness.controller.clone();
            thread::spawn(move || {
                for round in 0..25 {
                    controller.reroute(RecordingRoutesCallback::new());
                    if round % 5 == 0 {
                        controller.interrupt();
                    }
                }
            })
        })
        .collect();
    for caller in callers {
        caller.join().expect("caller thread should not panic");
    }
    stop.store(true, Ordering::SeqCst);
    answering.join().expect("answering thread should not panic");

    while harness.session.reply_latest(ScriptedReply::Canceled) {}

    assert_eq!(harness.controller.current_state(), RerouteState::Idle);
    let observed = harness.observer.states();
    assert!(observed.windows(2).all(|pair| pair[0] != pair[1]));
    assert_eq!(observed.last(), Some(&RerouteState::Idle));
}

#[test]
fn late_observer_is_greeted_with_the_settled_state() {
    let harness = make_default_harness("late-observer", CancelBehavior::RecordOnly);
    harness.controller.reroute(RecordingRoutesCallback::new());

    let session = harness.session.clone();
    thread::spawn(move || session.reply_latest(ScriptedReply::Canceled))
        .join()
        .expect("reply thread should not panic");

    let late = RecordingObserver::new();
    assert!(harness.controller.add_reroute_state_observer(late.clone()));
    assert_eq!(late.states(), vec![RerouteState::Idle]);
}
