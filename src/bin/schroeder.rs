//! Offline reverb for WAV files.
//!
//! Usage: schroeder <in.wav> <out.wav> [dry/wet 0..100] [room size 0..100]
//!
//! Dry/wet defaults to 0 (input passes through). Without a room size the
//! delay lengths are left at their defaults.

use std::env;
use std::process;

use log::{Level, LevelFilter, Log, Metadata, Record};

use schroeder::wav::process_file;
use schroeder::Controls;

/// Prints log records on stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match record.level() {
            Level::Info => eprintln!("{}", record.args()),
            level => eprintln!("{}: {}", level, record.args()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn usage(name: &str) {
    eprintln!(
        "Usage: {} <in.wav> <out.wav> [dry/wet 0..100 percent] [room size 0..100 percent]",
        name
    );
}

fn parse_percent(arg: Option<&String>, name: &str) -> Option<f32> {
    let arg = arg?;

    match arg.parse::<f32>() {
        Ok(v) => Some(v),
        Err(e) => {
            eprintln!("Error: {} '{}' is not a number: {}", name, arg, e);
            process::exit(1);
        }
    }
}

fn main() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let args: Vec<String> = env::args().collect();
    let name = args.first().map(String::as_str).unwrap_or("schroeder");

    if args.len() < 3 {
        eprintln!("Error: not enough parameters provided");
        usage(name);
        process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];

    let dry_wet = parse_percent(args.get(3), "dry/wet").unwrap_or(0.0);
    let room_size = parse_percent(args.get(4), "room size");

    let controls = Controls::from_percent(dry_wet, room_size);

    match process_file(input, output, controls) {
        Ok(summary) => {
            log::info!(
                "{} -> {}: {} frames, {} ch, {} Hz",
                input,
                output,
                summary.frames,
                summary.spec.channels,
                summary.spec.sample_rate
            );
        }
        Err(e) => {
            eprintln!("Error: {}: {}", input, e);
            process::exit(1);
        }
    }
}
