//! Timing-statistics sink.
//!
//! A passive, caller-owned collector for timing samples. Callers register
//! named series with a target sample count, feed values as they are measured,
//! and export a tabular summary when enough data has arrived. The recorder
//! never touches the filesystem on its own; export goes to any
//! [`std::io::Write`].

use serde::Serialize;
use std::io;
use thiserror::Error;
use tracing::debug;

/// Errors from the statistics recorder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A value was recorded for a series that was never registered.
    #[error("unknown series: {name}")]
    UnknownSeries {
        /// The unregistered series name.
        name: String,
    },

    /// A series name was registered twice.
    #[error("series already registered: {name}")]
    DuplicateSeries {
        /// The already-registered series name.
        name: String,
    },
}

/// One named series of samples with a target count.
#[derive(Debug, Clone)]
struct Series {
    name: String,
    target_count: usize,
    values: Vec<f64>,
}

impl Series {
    fn is_complete(&self) -> bool {
        self.values.len() >= self.target_count
    }
}

/// Accumulates timing samples into named series and summarizes them.
///
/// Series are reported in registration order. A series stops accumulating
/// once its target count is reached; further values for it are ignored.
#[derive(Debug, Clone, Default)]
pub struct StatsRecorder {
    series: Vec<Series>,
}

impl StatsRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series that will collect up to `target_count` samples.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::DuplicateSeries`] if the name is already taken.
    pub fn add_series(&mut self, name: &str, target_count: usize) -> Result<(), StatsError> {
        if self.series.iter().any(|s| s.name == name) {
            return Err(StatsError::DuplicateSeries { name: name.into() });
        }
        self.series.push(Series {
            name: name.into(),
            target_count,
            values: Vec::with_capacity(target_count),
        });
        Ok(())
    }

    /// Record one sample for a registered series.
    ///
    /// Values arriving after the series reached its target count are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::UnknownSeries`] if the series was never
    /// registered.
    pub fn record(&mut self, name: &str, value: f64) -> Result<(), StatsError> {
        let series = self
            .series
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| StatsError::UnknownSeries { name: name.into() })?;

        if !series.is_complete() {
            series.values.push(value);
            if series.is_complete() {
                debug!(series = %series.name, count = series.values.len(), "series complete");
            }
        }
        Ok(())
    }

    /// Number of registered series.
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// True once every registered series has reached its target count.
    ///
    /// An empty recorder is trivially complete.
    #[must_use]
    pub fn all_complete(&self) -> bool {
        self.series.iter().all(Series::is_complete)
    }

    /// Summarize every series, in registration order.
    #[must_use]
    pub fn summarize(&self) -> Vec<SeriesSummary> {
        self.series.iter().map(SeriesSummary::from_series).collect()
    }

    /// Write all summaries as CSV: `name,count,max,min,mean,stdev`.
    ///
    /// Statistics that are undefined for a series (no samples, or a single
    /// sample for the standard deviation) are written as empty fields.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_csv<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "name,count,max,min,mean,stdev")?;
        for summary in self.summarize() {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                summary.name,
                summary.count,
                fmt_opt(summary.max),
                fmt_opt(summary.min),
                fmt_opt(summary.mean),
                fmt_opt(summary.stdev),
            )?;
        }
        Ok(())
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Immutable summary of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Series name.
    pub name: String,
    /// Number of samples actually recorded.
    pub count: usize,
    /// Largest sample.
    pub max: Option<f64>,
    /// Smallest sample.
    pub min: Option<f64>,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// Sample standard deviation (n − 1 denominator); requires two samples.
    pub stdev: Option<f64>,
}

impl SeriesSummary {
    fn from_series(series: &Series) -> Self {
        let values = &series.values;
        let count = values.len();

        let (max, min, mean) = if count == 0 {
            (None, None, None)
        } else {
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let mean = values.iter().sum::<f64>() / count as f64;
            (Some(max), Some(min), Some(mean))
        };

        let stdev = if count >= 2 {
            let m = mean.unwrap_or(0.0);
            let variance =
                values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (count - 1) as f64;
            Some(variance.sqrt())
        } else {
            None
        };

        Self {
            name: series.name.clone(),
            count,
            max,
            min,
            mean,
            stdev,
        }
    }
}
