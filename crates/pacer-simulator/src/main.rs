//! Desktop simulator for the pacer board demos.
//!
//! Runs the `pacer-core` drivers against simulated peripherals so the demos
//! can be exercised without hardware. Console output goes to stdout, pin and
//! radio activity to the log, and pixel frames to stderr as coloured blocks.
//!
//! # Usage
//!
//! ```text
//! pacer-simulator <demo> [--steps <n>] [--fast]
//! ```
//!
//! | Demo           | Driver                       |
//! |----------------|------------------------------|
//! | `blink`        | on/off blink, 1000 ms        |
//! | `blink-toggle` | toggle blink, 500 ms         |
//! | `wifi-scan`    | access point scan, 5000 ms   |
//! | `rgb-cycle`    | RGB pixel cycle, 1000 ms     |
//! | `hello-world`  | countdown then restart       |
//!
//! `--steps` stops after that many steps instead of running forever.
//! `--fast` skips the real sleeping between steps.

mod peripherals;

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use embassy_futures::block_on;
use log::{error, info};

use pacer_core::demos::{Blink, BlinkStyle, HelloWorld, RgbCycle, WifiScan};
use pacer_core::strip::SmartLedStrip;
use pacer_core::{PeriodicDriver, Runner};

use peripherals::{SimBoard, SimPin, SimSystem, SimWifi, StdDelay, StdoutConsole, TerminalLeds};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// On/off blink on GPIO2 every 1000 ms
    Blink,
    /// Read-back toggle blink on GPIO2 every 500 ms
    BlinkToggle,
    /// Access point scan every 5000 ms
    WifiScan,
    /// Red, green, blue, white on one pixel every 1000 ms
    RgbCycle,
    /// Greeting, chip banner and restart countdown
    HelloWorld,
}

/// Run a pacer board demo against simulated peripherals
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Demo to run
    #[arg(value_enum)]
    demo: Demo,

    /// Stop after this many steps instead of running forever
    #[arg(long)]
    steps: Option<u32>,

    /// Do not sleep between steps
    #[arg(long)]
    fast: bool,
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

fn simulate<D: PeriodicDriver>(driver: D, args: &Args) -> ExitCode {
    let mut runner = Runner::new(driver, StdDelay { fast: args.fast }, SimSystem);

    let Some(steps) = args.steps else {
        block_on(runner.run())
    };

    match block_on(runner.run_for(steps)) {
        Ok(report) if report.restart_requested => {
            info!("Device restart requested after {} steps", report.steps);
            ExitCode::SUCCESS
        }
        Ok(report) => {
            info!("Stopped after {} steps", report.steps);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("Simulating {:?}", args.demo);

    match args.demo {
        Demo::Blink => simulate(Blink::new(SimPin::new("GPIO2"), BlinkStyle::OnOff), &args),
        Demo::BlinkToggle => {
            simulate(Blink::new(SimPin::new("GPIO2"), BlinkStyle::Toggle), &args)
        }
        Demo::WifiScan => simulate(WifiScan::new(SimWifi::default(), StdoutConsole), &args),
        Demo::RgbCycle => {
            let strip: SmartLedStrip<TerminalLeds, 1> = SmartLedStrip::new(TerminalLeds);
            simulate(RgbCycle::new(strip, SimBoard, StdoutConsole), &args)
        }
        Demo::HelloWorld => simulate(HelloWorld::new(SimBoard, StdoutConsole), &args),
    }
}
