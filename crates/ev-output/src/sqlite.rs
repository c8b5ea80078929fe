//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `tick_summaries`, `vehicle_results`, and
//! `prototype_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, PrototypeSummaryRow, TickSummaryRow, VehicleResultRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick          INTEGER PRIMARY KEY,
                 sim_time_ms   INTEGER NOT NULL,
                 flying        INTEGER NOT NULL,
                 waiting       INTEGER NOT NULL,
                 charging      INTEGER NOT NULL,
                 bays_occupied INTEGER NOT NULL,
                 queue_len     INTEGER NOT NULL,
                 admitted      INTEGER NOT NULL,
                 released      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS vehicle_results (
                 vehicle_id INTEGER PRIMARY KEY,
                 name       TEXT    NOT NULL,
                 flight_ms  INTEGER NOT NULL,
                 charge_ms  INTEGER NOT NULL,
                 wait_ms    INTEGER NOT NULL,
                 state      TEXT    NOT NULL,
                 charge_pct REAL    NOT NULL,
                 faults     INTEGER NOT NULL,
                 passengers INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS prototype_summaries (
                 name               TEXT PRIMARY KEY,
                 vehicles           INTEGER NOT NULL,
                 avg_flight_minutes REAL    NOT NULL,
                 avg_charge_minutes REAL    NOT NULL,
                 avg_wait_minutes   REAL    NOT NULL,
                 max_faults         INTEGER NOT NULL,
                 passenger_miles    REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_summaries(&mut self, rows: &[TickSummaryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO tick_summaries \
                 (tick, sim_time_ms, flying, waiting, charging, bays_occupied, queue_len, admitted, released) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.sim_time_ms,
                    row.flying,
                    row.waiting,
                    row.charging,
                    row.bays_occupied,
                    row.queue_len,
                    row.admitted,
                    row.released,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_vehicle_results(&mut self, rows: &[VehicleResultRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicle_results \
                 (vehicle_id, name, flight_ms, charge_ms, wait_ms, state, charge_pct, faults, passengers) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.vehicle_id,
                    row.name,
                    row.flight_ms,
                    row.charge_ms,
                    row.wait_ms,
                    row.state,
                    row.charge_pct,
                    row.faults,
                    row.passengers,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_prototype_summaries(&mut self, rows: &[PrototypeSummaryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO prototype_summaries \
                 (name, vehicles, avg_flight_minutes, avg_charge_minutes, avg_wait_minutes, max_faults, passenger_miles) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.name,
                    row.vehicles,
                    row.avg_flight_minutes,
                    row.avg_charge_minutes,
                    row.avg_wait_minutes,
                    row.max_faults,
                    row.passenger_miles,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
