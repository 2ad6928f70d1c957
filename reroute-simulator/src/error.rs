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

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

#[derive(Debug)]
pub enum SimulatorError {
    ConfigRead { path: String, source: io::Error },
    ConfigParse(json5::Error),
    InvalidScenario(String),
    SettleTimeout { waited_ms: u64 },
}

impl Display for SimulatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::ConfigRead { path, source } => {
                write!(f, "unable to read config file {path}: {source}")
            }
            SimulatorError::ConfigParse(source) => {
                write!(f, "unable to parse config file: {source}")
            }
            SimulatorError::InvalidScenario(reason) => write!(f, "invalid scenario: {reason}"),
            SimulatorError::SettleTimeout { waited_ms } => {
                write!(f, "controller did not settle to idle within {waited_ms} ms")
            }
        }
    }
}

impl Error for SimulatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimulatorError::ConfigRead { source, .. } => Some(source),
            SimulatorError::ConfigParse(source) => Some(source),
            SimulatorError::InvalidScenario(_) | SimulatorError::SettleTimeout { .. } => None,
        }
    }
}
