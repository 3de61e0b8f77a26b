//! Time series data model and CSV ingestion.
//!
//! A [`TimeSeries`] pairs an ordered timestamp sequence with a row-major
//! value matrix of `len × num_dims` entries and one label per column.
//! The CSV contract: a header row whose first column is the time label and
//! whose remaining columns name the series, followed by numeric rows.

use std::io;

use anyhow::{ensure, Context, Result};
use csv::{ReaderBuilder, Trim, Writer};
use serde::{Deserialize, Serialize};

/// Ordered timestamps with one or more dependent-variable columns.
///
/// Values are stored row-major: `values[i * num_dims + j]` is column `j`
/// at timestamp `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    times: Vec<f64>,
    values: Vec<f64>,
    names: Vec<String>,
}

impl TimeSeries {
    /// Build a series from parts, checking the shape invariants:
    /// `values.len() == times.len() * names.len()`, at least one column,
    /// and strictly increasing timestamps.
    pub fn new(times: Vec<f64>, values: Vec<f64>, names: Vec<String>) -> Result<Self> {
        ensure!(!names.is_empty(), "time series needs at least one value column");
        ensure!(
            values.len() == times.len() * names.len(),
            "value matrix shape mismatch: {} timestamps × {} columns != {} values",
            times.len(),
            names.len(),
            values.len()
        );
        for pair in times.windows(2) {
            ensure!(
                pair[1] > pair[0],
                "timestamps must be strictly increasing ({} followed by {})",
                pair[0],
                pair[1]
            );
        }
        Ok(Self { times, values, names })
    }

    /// Parse a series from CSV bytes.
    ///
    /// The header's first column is the time label; every remaining header
    /// field names one value column. Every data row must carry exactly one
    /// numeric timestamp plus one numeric value per column.
    pub fn from_csv<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().context("reading CSV header")?.clone();
        ensure!(
            headers.len() >= 2,
            "CSV header needs a time column and at least one value column, got {} field(s)",
            headers.len()
        );
        let names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        let num_dims = names.len();

        let mut times = Vec::new();
        let mut values = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let line = idx + 2; // 1-based, after the header
            let record = record.with_context(|| format!("reading CSV line {line}"))?;
            ensure!(
                record.len() == num_dims + 1,
                "CSV line {line}: expected {} fields, got {}",
                num_dims + 1,
                record.len()
            );
            let t: f64 = record[0]
                .parse()
                .with_context(|| format!("CSV line {line}: invalid timestamp {:?}", &record[0]))?;
            times.push(t);
            for field in record.iter().skip(1) {
                let v: f64 = field
                    .parse()
                    .with_context(|| format!("CSV line {line}: invalid value {field:?}"))?;
                values.push(v);
            }
        }
        ensure!(!times.is_empty(), "CSV contains a header but no data rows");

        Self::new(times, values, names)
    }

    /// Parse a series from an in-memory CSV string.
    pub fn from_csv_str(csv: &str) -> Result<Self> {
        Self::from_csv(csv.as_bytes())
    }

    /// Write the series back out as CSV with the given time label.
    pub fn to_csv<W: io::Write>(&self, writer: W, time_label: &str) -> Result<()> {
        let mut wtr = Writer::from_writer(writer);
        let mut header = Vec::with_capacity(self.names.len() + 1);
        header.push(time_label.to_string());
        header.extend(self.names.iter().cloned());
        wtr.write_record(&header).context("writing CSV header")?;

        for i in 0..self.len() {
            let mut record = Vec::with_capacity(self.names.len() + 1);
            record.push(self.times[i].to_string());
            record.extend(self.row(i).iter().map(f64::to_string));
            wtr.write_record(&record)
                .with_context(|| format!("writing CSV row {i}"))?;
        }
        wtr.flush().context("flushing CSV output")?;
        Ok(())
    }

    /// Number of timestamps (rows).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series holds no rows.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of value columns.
    pub fn num_dims(&self) -> usize {
        self.names.len()
    }

    /// Column labels, in matrix order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The timestamp sequence.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The full row-major value matrix.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// One row of the value matrix (all columns at timestamp `i`).
    pub fn row(&self, i: usize) -> &[f64] {
        let d = self.num_dims();
        &self.values[i * d..(i + 1) * d]
    }

    /// One column of the value matrix, copied out.
    pub fn column(&self, j: usize) -> Vec<f64> {
        let d = self.num_dims();
        self.values.iter().skip(j).step_by(d).copied().collect()
    }

    /// Sample spacing inferred from the last two timestamps.
    ///
    /// The series is treated as uniformly sampled; a single-row series has
    /// no spacing to infer.
    pub fn timestep(&self) -> Result<f64> {
        ensure!(
            self.len() >= 2,
            "cannot infer a timestep from {} sample(s)",
            self.len()
        );
        Ok(self.times[self.len() - 1] - self.times[self.len() - 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_CSV: &str = "t,alpha,beta\n0,1.0,10.0\n1,2.0,20.0\n2,3.0,30.0\n";

    #[test]
    fn test_from_csv_shape() {
        let series = TimeSeries::from_csv_str(BASIC_CSV).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.num_dims(), 2);
        assert_eq!(series.names(), &["alpha".to_string(), "beta".to_string()]);
        assert_eq!(series.times(), &[0.0, 1.0, 2.0]);
        assert_eq!(series.row(1), &[2.0, 20.0]);
    }

    #[test]
    fn test_column_extraction() {
        let series = TimeSeries::from_csv_str(BASIC_CSV).unwrap();
        assert_eq!(series.column(0), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.column(1), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_timestep_inference() {
        let series = TimeSeries::from_csv_str(BASIC_CSV).unwrap();
        assert!((series.timestep().unwrap() - 1.0).abs() < 1e-12);

        let single = TimeSeries::new(vec![0.0], vec![1.0], vec!["x".into()]).unwrap();
        assert!(single.timestep().is_err());
    }

    #[test]
    fn test_rejects_non_numeric_value() {
        let err = TimeSeries::from_csv_str("t,x\n0,1.0\n1,oops\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_rejects_ragged_row() {
        let result = TimeSeries::from_csv_str("t,x,y\n0,1.0,2.0\n1,3.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_and_headerless_input() {
        assert!(TimeSeries::from_csv_str("").is_err());
        assert!(TimeSeries::from_csv_str("t,x\n").is_err());
        // A lone time column has nothing to forecast.
        assert!(TimeSeries::from_csv_str("t\n0\n1\n").is_err());
    }

    #[test]
    fn test_rejects_non_increasing_times() {
        assert!(TimeSeries::from_csv_str("t,x\n0,1.0\n0,2.0\n").is_err());
        assert!(TimeSeries::from_csv_str("t,x\n1,1.0\n0,2.0\n").is_err());
    }

    #[test]
    fn test_shape_invariant_checked() {
        let result = TimeSeries::new(vec![0.0, 1.0], vec![1.0, 2.0, 3.0], vec!["x".into()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_csv_round_trip() {
        let series = TimeSeries::from_csv_str(BASIC_CSV).unwrap();
        let mut out = Vec::new();
        series.to_csv(&mut out, "t").unwrap();
        let restored = TimeSeries::from_csv(out.as_slice()).unwrap();
        assert_eq!(restored, series);
    }
}
