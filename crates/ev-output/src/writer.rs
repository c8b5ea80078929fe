//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, PrototypeSummaryRow, TickSummaryRow, VehicleResultRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of per-tick fleet summaries.
    fn write_tick_summaries(&mut self, rows: &[TickSummaryRow]) -> OutputResult<()>;

    /// Write the final per-vehicle results.
    fn write_vehicle_results(&mut self, rows: &[VehicleResultRow]) -> OutputResult<()>;

    /// Write the final per-prototype aggregates.
    fn write_prototype_summaries(&mut self, rows: &[PrototypeSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
