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

mod config;
mod error;
mod scenario;
mod simulated_directions;

use crate::config::Config;
use crate::error::SimulatorError;
use clap::Parser;
use std::fs;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Runs a reroute scenario against a simulated directions service")]
struct SimulatorArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), SimulatorError> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    info!("Started reroute-simulator");

    let args = SimulatorArgs::parse();
    let contents = fs::read_to_string(&args.config).map_err(|source| SimulatorError::ConfigRead {
        path: args.config.clone(),
        source,
    })?;
    let config = Config::from_json5(&contents)?;

    let report = scenario::run(config).await.map_err(|err| {
        error!("Scenario did not complete: {err}");
        err
    })?;

    info!(
        fetched = report.fetched,
        failed = report.failed,
        interrupted = report.interrupted,
        transitions = report.states.len(),
        "Scenario finished"
    );

    Ok(())
}
