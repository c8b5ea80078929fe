//! fleet: run the eVTOL fleet simulation from the command line.
//!
//! Without `--config` the five built-in prototypes are used with the default
//! parameters: 20 vehicles, 3 bays, three simulated hours compressed 60:1.
//! Pass `--virtual` to skip the real-time pacing and finish immediately.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ev_core::{FaultSampling, MS_PER_SECOND, Pacing, SimTime, TickSpan};
use ev_fleet::Vehicle;
use ev_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ev_sim::{FleetConfig, FleetReport, SimBuilder, SimObserver, TickStats};
use ev_station::ChargingStation;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Sampling {
    Bernoulli,
    Expected,
}

impl From<Sampling> for FaultSampling {
    fn from(s: Sampling) -> Self {
        match s {
            Sampling::Bernoulli => FaultSampling::Bernoulli,
            Sampling::Expected => FaultSampling::Expected,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fleet")]
#[command(about = "Simulate an eVTOL fleet sharing a charging station", long_about = None)]
struct Args {
    /// JSON fleet configuration (simulation parameters and prototypes)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of vehicles
    #[arg(long)]
    vehicles: Option<usize>,

    /// Number of charging bays
    #[arg(long)]
    bays: Option<usize>,

    /// Simulated duration in minutes
    #[arg(short, long)]
    minutes: Option<u64>,

    /// Simulated milliseconds per tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Simulated time units per real time unit
    #[arg(long)]
    compression: Option<u32>,

    /// Master seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run as fast as possible instead of in compressed real time
    #[arg(long = "virtual")]
    virtual_time: bool,

    /// How hourly fault probabilities become faults
    #[arg(long, value_enum)]
    fault_sampling: Option<Sampling>,

    /// Write CSV results to this directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn fleet_config(&self) -> Result<FleetConfig> {
        let mut fleet = match &self.config {
            Some(path) => load_config(path)?,
            None => FleetConfig::reference()?,
        };

        let sim = &mut fleet.sim;
        if let Some(n) = self.vehicles {
            sim.vehicle_count = n;
        }
        if let Some(n) = self.bays {
            sim.bay_count = n;
        }
        if let Some(m) = self.minutes {
            sim.total_minutes = m;
        }
        if let Some(ms) = self.tick_ms {
            sim.tick_ms = ms;
        }
        if let Some(c) = self.compression {
            sim.compression = c;
        }
        if let Some(s) = self.seed {
            sim.seed = s;
        }
        if self.virtual_time {
            sim.pacing = Pacing::Virtual;
        }
        if let Some(f) = self.fault_sampling {
            sim.fault_sampling = f.into();
        }
        Ok(fleet)
    }
}

fn load_config(path: &Path) -> Result<FleetConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs progress once per real second of a paced run (one simulated minute
/// at the default 60:1 compression) and forwards everything to the optional
/// result observer.
struct FleetObserver<W: OutputWriter> {
    output:      Option<SimOutputObserver<W>>,
    interval_ms: u64,
    next_report: SimTime,
}

impl<W: OutputWriter> FleetObserver<W> {
    fn new(output: Option<SimOutputObserver<W>>, compression: u32) -> Self {
        let interval_ms = u64::from(compression) * MS_PER_SECOND;
        Self {
            output,
            interval_ms,
            next_report: SimTime(interval_ms),
        }
    }

    /// Fail with the first result-writer error seen during the run.
    fn finish_output(&mut self) -> Result<()> {
        match self.output.as_mut().and_then(SimOutputObserver::take_error) {
            Some(e) => Err(e).context("writing simulation results"),
            None => Ok(()),
        }
    }
}

impl<W: OutputWriter> SimObserver for FleetObserver<W> {
    fn on_tick_start(&mut self, span: TickSpan) {
        if let Some(out) = self.output.as_mut() {
            out.on_tick_start(span);
        }
    }

    fn on_tick_end(&mut self, span: TickSpan, stats: &TickStats) {
        if span.cur >= self.next_report {
            info!(
                sim_time = %span.cur,
                flying = stats.flying,
                waiting = stats.waiting,
                charging = stats.charging,
                "progress"
            );
            while self.next_report <= span.cur {
                self.next_report = self.next_report + self.interval_ms;
            }
        }
        if let Some(out) = self.output.as_mut() {
            out.on_tick_end(span, stats);
        }
    }

    fn on_snapshot(&mut self, span: TickSpan, vehicles: &[Vehicle], station: &ChargingStation) {
        if let Some(out) = self.output.as_mut() {
            out.on_snapshot(span, vehicles, station);
        }
    }

    fn on_sim_end(&mut self, final_time: SimTime, vehicles: &[Vehicle]) {
        if let Some(out) = self.output.as_mut() {
            out.on_sim_end(final_time, vehicles);
        }
    }
}

// ── Tables ────────────────────────────────────────────────────────────────────

fn print_parameters(fleet: &FleetConfig) {
    let sim = &fleet.sim;
    println!("Vehicles: {}  |  Bays: {}  |  Minutes: {}  |  Seed: {}",
        sim.vehicle_count, sim.bay_count, sim.total_minutes, sim.seed);
    println!("Tick: {} ms  |  Compression: {}:1  |  Pacing: {:?}  |  Faults: {:?}",
        sim.tick_ms, sim.compression, sim.pacing, sim.fault_sampling);
    println!();
    println!(
        "{:<20}{:>8}{:>8}{:>10}{:>10}{:>6}{:>10}",
        "PROTOTYPE", "MPH", "KWH", "CHARGE H", "KWH/MILE", "PAX", "FAULTS/H"
    );
    println!("{}", "-".repeat(72));
    for p in &fleet.prototypes {
        println!(
            "{:<20}{:>8.1}{:>8.1}{:>10.2}{:>10.2}{:>6}{:>10.2}",
            p.name(),
            p.cruise_speed_mph(),
            p.battery_kwh(),
            p.charge_hours(),
            p.energy_kwh_per_mile(),
            p.passengers(),
            p.fault_prob_per_hour(),
        );
    }
    println!();
}

fn print_report(report: &FleetReport) {
    println!("Individual vehicle stats (minutes)");
    println!(
        "{:<5}{:<20}{:>10}{:>10}{:>10}{:>11}{:>8}{:>10}",
        "ID", "PROTOTYPE", "FLIGHT", "CHARGE", "WAIT", "REMAINING", "FAULTS", "STATE"
    );
    println!("{}", "-".repeat(84));
    for v in &report.vehicles {
        println!(
            "{:<5}{:<20}{:>10.2}{:>10.2}{:>10.2}{:>10.2}%{:>8}{:>10}",
            v.id.0,
            v.name,
            v.flight_minutes(),
            v.charge_minutes(),
            v.wait_minutes(),
            v.charge_pct,
            v.faults,
            v.state.as_str(),
        );
    }
    println!();

    println!("Prototype stats (average minutes)");
    println!(
        "{:<20}{:>7}{:>10}{:>10}{:>10}{:>11}{:>14}",
        "PROTOTYPE", "COUNT", "FLIGHT", "CHARGE", "WAIT", "MAX FAULTS", "PAX MILES"
    );
    println!("{}", "-".repeat(82));
    for p in &report.prototypes {
        println!(
            "{:<20}{:>7}{:>10.2}{:>10.2}{:>10.2}{:>11}{:>14.2}",
            p.name,
            p.vehicles,
            p.avg_flight_minutes,
            p.avg_charge_minutes,
            p.avg_wait_minutes,
            p.max_faults,
            p.passenger_miles,
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let fleet = args.fleet_config()?;
    print_parameters(&fleet);

    let output = match &args.output {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            Some(SimOutputObserver::new(CsvWriter::new(dir)?))
        }
        None => None,
    };
    let mut obs = FleetObserver::new(output, fleet.sim.compression);

    let mut sim = SimBuilder::from_fleet_config(fleet).build()?;

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    info!(
        sim_time = %sim.elapsed(),
        real_secs = t0.elapsed().as_secs_f64(),
        "simulation finished"
    );

    obs.finish_output()?;
    if let Some(dir) = &args.output {
        println!("Results written to {}", dir.display());
    }

    println!();
    print_report(&sim.report());
    Ok(())
}
