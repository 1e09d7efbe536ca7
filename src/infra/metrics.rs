// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Metrics recorded per epoch:
//   - epoch:    the epoch number (1, 2, 3, ...)
//   - loss:     average cross-entropy loss over the epoch
//   - accuracy: fraction of next words predicted exactly
//
// Output file: artifacts/metrics.csv
//
// Example CSV output:
//   epoch,loss,accuracy
//   1,6.124500,0.083000
//   2,5.390100,0.114000
//
// The header is written once; rows append across runs, so a
// resumed training run continues the same log.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average cross-entropy loss over all batches.
    /// Random initialisation gives ~ln(vocab_size)
    pub loss: f64,

    /// Fraction of targets predicted exactly, range [0.0, 1.0]
    pub accuracy: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, loss: f64, accuracy: f64) -> Self {
        Self { epoch, loss, accuracy }
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,loss,accuracy")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.loss, m.accuracy)?;

        tracing::debug!(
            "Logged epoch {} metrics: loss={:.4}, accuracy={:.4}",
            m.epoch,
            m.loss,
            m.accuracy,
        );

        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_written_once_and_rows_append() {
        let dir = std::env::temp_dir().join(format!("rnw-metrics-{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();

        let logger = MetricsLogger::new(&dir).unwrap();
        logger.log(&EpochMetrics::new(1, 5.5, 0.1)).unwrap();

        // A second logger on the same directory must not rewrite
        // the header or clobber existing rows
        let logger2 = MetricsLogger::new(&dir).unwrap();
        logger2.log(&EpochMetrics::new(2, 4.2, 0.2)).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "epoch,loss,accuracy");
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("2,"));

        fs::remove_dir_all(&dir).ok();
    }
}
