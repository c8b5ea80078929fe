//! `ev-output`: result writers for the evtol-sim fleet simulator.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                                        |
//! |-----------|-------------|----------------------------------------------------------------------|
//! | *(none)*  | CSV         | `tick_summaries.csv`, `vehicle_results.csv`, `prototype_summaries.csv` |
//! | `sqlite`  | SQLite      | `output.db`                                                          |
//! | `parquet` | Parquet     | `tick_summaries.parquet`, `vehicle_results.parquet`, `prototype_summaries.parquet` |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ev_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use ev_output::{CsvWriter, SimOutputObserver};
//! use ev_sim::{FleetConfig, SimBuilder};
//!
//! let mut sim = SimBuilder::from_fleet_config(FleetConfig::reference().unwrap()).build().unwrap();
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{PrototypeSummaryRow, TickSummaryRow, VehicleResultRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
