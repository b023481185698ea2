//! Diagnostics sink.

/// Receives named metric values for offline diagnostics.
///
/// The search never reads anything back from a collector.
pub trait Collector {
    /// Records one row of metrics.
    fn record(&mut self, metrics: &[(&str, f64)]);
}

/// In-memory collector keeping every recorded row.
///
/// # Examples
///
/// ```
/// use u_lkh::search::{Collector, MetricsHistory};
///
/// let mut history = MetricsHistory::new();
/// history.record(&[("length", 10.0), ("gain", 0.0)]);
/// history.record(&[("length", 8.5), ("gain", 1.5)]);
/// assert_eq!(history.column("length"), vec![10.0, 8.5]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsHistory {
    rows: Vec<Vec<(String, f64)>>,
}

impl MetricsHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded rows in order.
    pub fn rows(&self) -> &[Vec<(String, f64)>] {
        &self.rows
    }

    /// Number of recorded rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of metric `name`, skipping rows that do not carry it.
    pub fn column(&self, name: &str) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.iter().find(|(k, _)| k == name).map(|&(_, v)| v))
            .collect()
    }
}

impl Collector for MetricsHistory {
    fn record(&mut self, metrics: &[(&str, f64)]) {
        self.rows
            .push(metrics.iter().map(|&(k, v)| (k.to_string(), v)).collect());
    }
}
