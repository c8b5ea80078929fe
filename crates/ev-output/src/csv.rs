//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `tick_summaries.csv`
//! - `vehicle_results.csv`
//! - `prototype_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, PrototypeSummaryRow, TickSummaryRow, VehicleResultRow};

fn open(dir: &Path, file: &str) -> OutputResult<Writer<File>> {
    let path = dir.join(file);
    let file = File::create(&path).map_err(OutputError::create(path))?;
    Ok(Writer::from_writer(file))
}

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    summaries:  Writer<File>,
    vehicles:   Writer<File>,
    prototypes: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = open(dir, "tick_summaries.csv")?;
        summaries.write_record([
            "tick", "sim_time_ms", "flying", "waiting", "charging",
            "bays_occupied", "queue_len", "admitted", "released",
        ])?;

        let mut vehicles = open(dir, "vehicle_results.csv")?;
        vehicles.write_record([
            "vehicle_id", "name", "flight_ms", "charge_ms", "wait_ms",
            "state", "charge_pct", "faults", "passengers",
        ])?;

        let mut prototypes = open(dir, "prototype_summaries.csv")?;
        prototypes.write_record([
            "name", "vehicles", "avg_flight_minutes", "avg_charge_minutes",
            "avg_wait_minutes", "max_faults", "passenger_miles",
        ])?;

        Ok(Self {
            summaries,
            vehicles,
            prototypes,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summaries(&mut self, rows: &[TickSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summaries.write_record(&[
                row.tick.to_string(),
                row.sim_time_ms.to_string(),
                row.flying.to_string(),
                row.waiting.to_string(),
                row.charging.to_string(),
                row.bays_occupied.to_string(),
                row.queue_len.to_string(),
                row.admitted.to_string(),
                row.released.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_vehicle_results(&mut self, rows: &[VehicleResultRow]) -> OutputResult<()> {
        for row in rows {
            self.vehicles.write_record(&[
                row.vehicle_id.to_string(),
                row.name.clone(),
                row.flight_ms.to_string(),
                row.charge_ms.to_string(),
                row.wait_ms.to_string(),
                row.state.to_owned(),
                format!("{:.2}", row.charge_pct),
                row.faults.to_string(),
                row.passengers.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_prototype_summaries(&mut self, rows: &[PrototypeSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.prototypes.write_record(&[
                row.name.clone(),
                row.vehicles.to_string(),
                format!("{:.2}", row.avg_flight_minutes),
                format!("{:.2}", row.avg_charge_minutes),
                format!("{:.2}", row.avg_wait_minutes),
                row.max_faults.to_string(),
                format!("{:.2}", row.passenger_miles),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.vehicles.flush()?;
        self.prototypes.flush()?;
        Ok(())
    }
}
