//! Forecast a synthetic sine series and print the result.
//!
//! Run with: `cargo run -p apollo-engine --example forecast_demo`

use anyhow::Result;
use apollo_engine::{forecast, ForecastRequest, TimeSeries};

fn main() -> Result<()> {
    // Synthesize the kind of CSV a user would upload
    let mut csv = String::from("t,signal\n");
    for i in 0..200 {
        let t = i as f64 * 0.1;
        csv.push_str(&format!("{t},{}\n", t.sin()));
    }

    let series = TimeSeries::from_csv_str(&csv)?;
    println!(
        "Loaded series: {} samples × {} column(s) ({})",
        series.len(),
        series.num_dims(),
        series.names().join(", ")
    );

    let request = ForecastRequest {
        horizon: 15,
        reservoir_dimensionality: 100,
        regularization_exponent: -6,
    };
    println!(
        "Forecasting {} steps (reservoir {}, λ = {:e})...",
        request.horizon,
        request.reservoir_dimensionality,
        request.lambda()
    );

    let predictions = forecast(&series, &request)?;

    println!("\n{:>10}  {:>12}  {:>12}", "time", "predicted", "actual");
    for (i, &t) in predictions.times().iter().enumerate() {
        println!("{t:>10.2}  {:>12.5}  {:>12.5}", predictions.row(i)[0], t.sin());
    }

    Ok(())
}
