//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use ev_core::{SimTime, TickSpan};
use ev_fleet::{Vehicle, VehicleState};
use ev_sim::{FleetReport, SimObserver, TickStats};
use ev_station::ChargingStation;
use tracing::debug;

use crate::row::{PrototypeSummaryRow, TickSummaryRow, VehicleResultRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Tick summaries are buffered and handed to the writer in batches of this
/// many rows (one Parquet record batch per flush).
const SUMMARY_BATCH: usize = 1_024;

/// A [`SimObserver`] that writes tick summaries at every snapshot and the
/// final vehicle and prototype results at the end of the run, to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_stats: TickStats,
    pending:    Vec<TickSummaryRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_stats: TickStats::default(),
            pending:    Vec::with_capacity(SUMMARY_BATCH),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_tick_summaries(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _span: TickSpan, stats: &TickStats) {
        self.last_stats = *stats;
    }

    fn on_snapshot(&mut self, span: TickSpan, vehicles: &[Vehicle], station: &ChargingStation) {
        let count = |s: VehicleState| vehicles.iter().filter(|v| v.state() == s).count() as u32;
        self.pending.push(TickSummaryRow {
            tick:          span.index,
            sim_time_ms:   span.cur.as_millis(),
            flying:        count(VehicleState::Flying),
            waiting:       count(VehicleState::Waiting),
            charging:      count(VehicleState::Charging),
            bays_occupied: station.occupied().len() as u32,
            queue_len:     station.waiting().len() as u32,
            admitted:      self.last_stats.admitted as u32,
            released:      self.last_stats.released as u32,
        });
        if self.pending.len() >= SUMMARY_BATCH {
            self.flush_pending();
        }
    }

    fn on_sim_end(&mut self, final_time: SimTime, vehicles: &[Vehicle]) {
        self.flush_pending();

        let report = FleetReport::from_vehicles(vehicles);
        let vehicle_rows: Vec<VehicleResultRow> =
            report.vehicles.iter().map(VehicleResultRow::from).collect();
        let result = self.writer.write_vehicle_results(&vehicle_rows);
        self.store_err(result);

        let proto_rows: Vec<PrototypeSummaryRow> =
            report.prototypes.iter().map(PrototypeSummaryRow::from).collect();
        let result = self.writer.write_prototype_summaries(&proto_rows);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
        debug!(
            %final_time,
            vehicles = vehicle_rows.len(),
            prototypes = proto_rows.len(),
            ok = self.last_error.is_none(),
            "results written"
        );
    }
}
