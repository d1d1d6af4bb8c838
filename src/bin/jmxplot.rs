#![allow(unknown_lints)]

extern crate chrono;
extern crate fern;
extern crate jmxplot;

#[macro_use]
extern crate log;

use chrono::Utc;
use jmxplot::config::{self, Args};
use jmxplot::pipeline;
use jmxplot::sink::{Csv, Plot, Sink};
use std::process;

fn setup_logging(verbose: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}][{}] {}",
                record.module_path().unwrap_or("jmxplot"),
                record.line().unwrap_or(0),
                Utc::now().to_rfc3339(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn sinks(args: &Args) -> Vec<Box<dyn Sink>> {
    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    if let Some(ref config) = args.csv {
        sinks.push(Box::new(Csv::new(config.clone())));
    }
    if args.plot.enabled {
        sinks.push(Box::new(Plot::stdout(&args.plot)));
    }
    sinks
}

fn main() {
    let args = match config::parse_args() {
        Ok(args) => args,
        Err(config::Error::Info(msg)) => {
            println!("{}", msg);
            process::exit(0);
        }
        Err(config::Error::Usage(msg)) => {
            eprintln!("{}\n\n{}", msg, config::USAGE);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = setup_logging(args.verbose) {
        eprintln!("could not set up logging: {}", e);
        process::exit(1);
    }

    info!("jmxplot - {}", args.version);

    let mut sinks = sinks(&args);
    match pipeline::run(&args.input, &args.metrics, &mut sinks) {
        Ok(report) => debug!(
            "Reported {} metrics over {} snapshots",
            report.series.len(),
            report.timeline.len()
        ),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
