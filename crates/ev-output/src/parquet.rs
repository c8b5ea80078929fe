//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `tick_summaries.parquet`
//! - `vehicle_results.parquet`
//! - `prototype_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, PrototypeSummaryRow, TickSummaryRow, VehicleResultRow};

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",          DataType::UInt64, false),
        Field::new("sim_time_ms",   DataType::UInt64, false),
        Field::new("flying",        DataType::UInt32, false),
        Field::new("waiting",       DataType::UInt32, false),
        Field::new("charging",      DataType::UInt32, false),
        Field::new("bays_occupied", DataType::UInt32, false),
        Field::new("queue_len",     DataType::UInt32, false),
        Field::new("admitted",      DataType::UInt32, false),
        Field::new("released",      DataType::UInt32, false),
    ]))
}

fn vehicle_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("vehicle_id", DataType::UInt32,  false),
        Field::new("name",       DataType::Utf8,    false),
        Field::new("flight_ms",  DataType::UInt64,  false),
        Field::new("charge_ms",  DataType::UInt64,  false),
        Field::new("wait_ms",    DataType::UInt64,  false),
        Field::new("state",      DataType::Utf8,    false),
        Field::new("charge_pct", DataType::Float64, false),
        Field::new("faults",     DataType::UInt32,  false),
        Field::new("passengers", DataType::UInt32,  false),
    ]))
}

fn prototype_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("name",               DataType::Utf8,    false),
        Field::new("vehicles",           DataType::UInt32,  false),
        Field::new("avg_flight_minutes", DataType::Float64, false),
        Field::new("avg_charge_minutes", DataType::Float64, false),
        Field::new("avg_wait_minutes",   DataType::Float64, false),
        Field::new("max_faults",         DataType::UInt32,  false),
        Field::new("passenger_miles",    DataType::Float64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, file: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let path = dir.join(file);
    let file = File::create(&path).map_err(OutputError::create(path))?;
    Ok(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?)
}

/// Writes simulation output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    summaries:    Option<ArrowWriter<File>>,
    vehicles:     Option<ArrowWriter<File>>,
    prototypes:   Option<ArrowWriter<File>>,
    summ_schema:  Arc<Schema>,
    veh_schema:   Arc<Schema>,
    proto_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create all three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let summ_schema  = summary_schema();
        let veh_schema   = vehicle_schema();
        let proto_schema = prototype_schema();

        Ok(Self {
            summaries:  Some(open(dir, "tick_summaries.parquet", &summ_schema)?),
            vehicles:   Some(open(dir, "vehicle_results.parquet", &veh_schema)?),
            prototypes: Some(open(dir, "prototype_summaries.parquet", &proto_schema)?),
            summ_schema,
            veh_schema,
            proto_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_tick_summaries(&mut self, rows: &[TickSummaryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks     = UInt64Builder::new();
        let mut times     = UInt64Builder::new();
        let mut flying    = UInt32Builder::new();
        let mut waiting   = UInt32Builder::new();
        let mut charging  = UInt32Builder::new();
        let mut occupied  = UInt32Builder::new();
        let mut queue_len = UInt32Builder::new();
        let mut admitted  = UInt32Builder::new();
        let mut released  = UInt32Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            times.append_value(row.sim_time_ms);
            flying.append_value(row.flying);
            waiting.append_value(row.waiting);
            charging.append_value(row.charging);
            occupied.append_value(row.bays_occupied);
            queue_len.append_value(row.queue_len);
            admitted.append_value(row.admitted);
            released.append_value(row.released);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(flying.finish()),
                Arc::new(waiting.finish()),
                Arc::new(charging.finish()),
                Arc::new(occupied.finish()),
                Arc::new(queue_len.finish()),
                Arc::new(admitted.finish()),
                Arc::new(released.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_vehicle_results(&mut self, rows: &[VehicleResultRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.vehicles.as_mut() else {
            return Ok(());
        };

        let mut ids        = UInt32Builder::new();
        let mut names      = StringBuilder::new();
        let mut flight     = UInt64Builder::new();
        let mut charge     = UInt64Builder::new();
        let mut wait       = UInt64Builder::new();
        let mut states     = StringBuilder::new();
        let mut charge_pct = Float64Builder::new();
        let mut faults     = UInt32Builder::new();
        let mut passengers = UInt32Builder::new();

        for row in rows {
            ids.append_value(row.vehicle_id);
            names.append_value(&row.name);
            flight.append_value(row.flight_ms);
            charge.append_value(row.charge_ms);
            wait.append_value(row.wait_ms);
            states.append_value(row.state);
            charge_pct.append_value(row.charge_pct);
            faults.append_value(row.faults);
            passengers.append_value(row.passengers);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.veh_schema),
            vec![
                Arc::new(ids.finish()),
                Arc::new(names.finish()),
                Arc::new(flight.finish()),
                Arc::new(charge.finish()),
                Arc::new(wait.finish()),
                Arc::new(states.finish()),
                Arc::new(charge_pct.finish()),
                Arc::new(faults.finish()),
                Arc::new(passengers.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_prototype_summaries(&mut self, rows: &[PrototypeSummaryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.prototypes.as_mut() else {
            return Ok(());
        };

        let mut names      = StringBuilder::new();
        let mut vehicles   = UInt32Builder::new();
        let mut avg_flight = Float64Builder::new();
        let mut avg_charge = Float64Builder::new();
        let mut avg_wait   = Float64Builder::new();
        let mut max_faults = UInt32Builder::new();
        let mut miles      = Float64Builder::new();

        for row in rows {
            names.append_value(&row.name);
            vehicles.append_value(row.vehicles);
            avg_flight.append_value(row.avg_flight_minutes);
            avg_charge.append_value(row.avg_charge_minutes);
            avg_wait.append_value(row.avg_wait_minutes);
            max_faults.append_value(row.max_faults);
            miles.append_value(row.passenger_miles);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.proto_schema),
            vec![
                Arc::new(names.finish()),
                Arc::new(vehicles.finish()),
                Arc::new(avg_flight.finish()),
                Arc::new(avg_charge.finish()),
                Arc::new(avg_wait.finish()),
                Arc::new(max_faults.finish()),
                Arc::new(miles.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        for slot in [&mut self.summaries, &mut self.vehicles, &mut self.prototypes] {
            if let Some(w) = slot.take() {
                w.close()?;
            }
        }
        Ok(())
    }
}
