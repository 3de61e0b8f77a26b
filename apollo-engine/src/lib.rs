// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Apollo-Proprietary
// See LICENSE in the repository root for full license terms.

//! Apollo forecasting engine
//!
//! Echo-state-network time series forecasting:
//! 1. `TimeSeries` — timestamps + multi-column value matrix, CSV in/out
//! 2. `Reservoir` — fixed random recurrent state with leaky-tanh updates
//! 3. `RidgeRegression` / `LinearReadout` — closed-form readout training
//! 4. `EchoStateNetwork` — train on a series, predict a horizon
//!
//! The one entry point most callers need is [`forecast`]: build a fresh
//! model from a [`ForecastRequest`], fit it to the series, and run it
//! forward for the requested number of steps.

pub mod config;
pub mod forecaster;
pub mod metrics;
pub mod readout;
pub mod reservoir;
pub mod series;

pub use config::{EsnConfig, ForecastRequest};
pub use forecaster::{forecast, EchoStateNetwork};
pub use metrics::{nmse, rmse};
pub use readout::{LinearReadout, RidgeRegression};
pub use reservoir::Reservoir;
pub use series::TimeSeries;
