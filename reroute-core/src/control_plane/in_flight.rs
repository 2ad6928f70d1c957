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

//! Ownership of the single outstanding route request.

use crate::sessions::directions_session::RouteRequestId;
use std::fmt::{Display, Formatter};

/// Controller-side handle of a submitted request, captured by its completion callback.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct RequestTicket(u64);

impl RequestTicket {
    pub(crate) fn value(&self) -> u64 {
        self.0
    }
}

impl Display for RequestTicket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct InFlightRequest {
    pub(crate) ticket: RequestTicket,
    pub(crate) request_id: Option<RouteRequestId>,
}

/// Holds at most one in-flight request. Outcomes are accepted only for the ticket
/// currently held.
pub(crate) struct InFlightSlot {
    next_ticket: u64,
    current: Option<InFlightRequest>,
}

impl InFlightSlot {
    pub(crate) fn new() -> Self {
        Self {
            next_ticket: 1,
            current: None,
        }
    }

    /// Issues a fresh ticket and makes it the in-flight request.
    pub(crate) fn issue(&mut self) -> RequestTicket {
        let ticket = RequestTicket(self.next_ticket);
        self.next_ticket += 1;
        self.current = Some(InFlightRequest {
            ticket,
            request_id: None,
        });
        ticket
    }

    /// Records the session's identifier for a ticket that is still in flight.
    pub(crate) fn bind_request_id(&mut self, ticket: RequestTicket, request_id: RouteRequestId) {
        if let Some(current) = self.current.as_mut() {
            if current.ticket == ticket {
                current.request_id = Some(request_id);
            }
        }
    }

    /// Gives up ownership of the in-flight request, if any.
    pub(crate) fn release(&mut self) -> Option<InFlightRequest> {
        self.current.take()
    }

    /// Settles `ticket`. Returns `None` for stale tickets, leaving the slot untouched.
    pub(crate) fn settle(&mut self, ticket: RequestTicket) -> Option<InFlightRequest> {
        match self.current {
            Some(current) if current.ticket == ticket => self.current.take(),
            _ => None,
        }
    }

    pub(crate) fn current(&self) -> Option<InFlightRequest> {
        self.current
    }
}
