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

//! Serial command queue for state-changing controller operations.

use crate::control_plane::in_flight::RequestTicket;
use crate::observers::RerouteStateObserver;
use crate::sessions::directions_session::RoutesRequestOutcome;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, ThreadId};

/// A state-changing operation, executed one at a time in submission order.
pub(crate) enum Command {
    Reroute,
    Interrupt,
    Greet(Arc<dyn RerouteStateObserver>),
    Settle {
        ticket: RequestTicket,
        outcome: RoutesRequestOutcome,
    },
}

impl Command {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Command::Reroute => "reroute",
            Command::Interrupt => "interrupt",
            Command::Greet(_) => "greet",
            Command::Settle { .. } => "settle",
        }
    }
}

/// How a submitted command will be run, from the submitting thread's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Admission {
    /// The queue was idle; the caller drains it.
    Drain,
    /// The caller is the drainer, calling back in from an observer or a session.
    Reentrant,
    /// Another thread is draining and will run the command.
    Queued,
}

/// Where a submitted command sits in the queue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Submission {
    pub(crate) seq: u64,
    pub(crate) admission: Admission,
}

/// Pending commands plus the thread currently draining them.
///
/// The caller that enqueues into an idle queue becomes the drainer and runs every
/// command, including ones enqueued while it runs, until the queue is empty. Commands
/// are numbered in submission order, so `is_complete` tells a waiting thread whether
/// its own command has run.
pub(crate) struct CommandQueue {
    pending: VecDeque<(u64, Command)>,
    next_seq: u64,
    completed: u64,
    drainer: Option<ThreadId>,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            next_seq: 1,
            completed: 0,
            drainer: None,
        }
    }

    /// Appends a command and elects the calling thread as drainer if nobody drains.
    pub(crate) fn enqueue(&mut self, command: Command) -> Submission {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push_back((seq, command));

        let current = thread::current().id();
        let admission = match self.drainer {
            None => {
                self.drainer = Some(current);
                Admission::Drain
            }
            Some(drainer) if drainer == current => Admission::Reentrant,
            Some(_) => Admission::Queued,
        };

        Submission { seq, admission }
    }

    /// Next command to run. Ends the drain when the queue is empty.
    pub(crate) fn next(&mut self) -> Option<(u64, Command)> {
        let next = self.pending.pop_front();
        if next.is_none() {
            self.drainer = None;
        }
        next
    }

    /// Records that the command numbered `seq` has run.
    pub(crate) fn complete(&mut self, seq: u64) {
        self.completed = self.completed.max(seq);
    }

    pub(crate) fn is_complete(&self, seq: u64) -> bool {
        self.completed >= seq
    }

    /// Makes the calling thread the drainer when nobody drains. Returns `false` when
    /// another thread holds the drain.
    pub(crate) fn claim_drain(&mut self) -> bool {
        let current = thread::current().id();
        match self.drainer {
            None => {
                self.drainer = Some(current);
                true
            }
            Some(drainer) => drainer == current,
        }
    }

    /// Releases the drain without running the remaining commands. They run on the next
    /// drain.
    pub(crate) fn abort_drain(&mut self) -> usize {
        self.drainer = None;
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{Admission, Command, CommandQueue};
    use std::thread;

    fn label(next: Option<(u64, Command)>) -> Option<&'static str> {
        next.map(|(_, command)| command.label())
    }

    #[test]
    fn first_enqueue_elects_the_drainer() {
        let mut queue = CommandQueue::new();

        assert_eq!(queue.enqueue(Command::Reroute).admission, Admission::Drain);
        assert_eq!(
            queue.enqueue(Command::Interrupt).admission,
            Admission::Reentrant
        );
    }

    #[test]
    fn other_threads_are_queued_behind_the_drainer() {
        let mut queue = CommandQueue::new();
        queue.enqueue(Command::Reroute);

        let admission = thread::scope(|scope| {
            scope
                .spawn(|| queue.enqueue(Command::Interrupt).admission)
                .join()
                .expect("enqueue thread should not panic")
        });

        assert_eq!(admission, Admission::Queued);
    }

    #[test]
    fn commands_come_out_in_submission_order() {
        let mut queue = CommandQueue::new();
        let first = queue.enqueue(Command::Reroute);
        let second = queue.enqueue(Command::Interrupt);

        assert!(second.seq > first.seq);
        assert_eq!(label(queue.next()), Some("reroute"));
        assert_eq!(label(queue.next()), Some("interrupt"));
        assert!(queue.next().is_none());
        assert_eq!(queue.enqueue(Command::Reroute).admission, Admission::Drain);
    }

    #[test]
    fn completion_is_tracked_by_sequence() {
        let mut queue = CommandQueue::new();
        let first = queue.enqueue(Command::Reroute);
        let second = queue.enqueue(Command::Interrupt);

        let (seq, _) = queue.next().expect("first command should be pending");
        queue.complete(seq);

        assert!(queue.is_complete(first.seq));
        assert!(!queue.is_complete(second.seq));
    }

    #[test]
    fn aborted_drain_can_be_claimed() {
        let mut queue = CommandQueue::new();
        queue.enqueue(Command::Reroute);
        queue.enqueue(Command::Interrupt);
        queue.next();

        assert_eq!(queue.abort_drain(), 1);
        assert!(queue.claim_drain());
        assert_eq!(label(queue.next()), Some("interrupt"));
    }
}
