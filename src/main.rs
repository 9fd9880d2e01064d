// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate mandelpar;

use clap::{App, Arg, ArgMatches};
use mandelpar::{Config, Encoding, Schedule};
use std::path::PathBuf;
use std::str::FromStr;

/// Given a string and a separator, returns the two values
/// separated by the separator.
fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr + Ord>(
    s: &str,
    separator: char,
    low: T,
    high: T,
    err: &str,
) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some((l, r)) => {
            if l >= low && l <= high && r >= low && r <= high {
                Ok(())
            } else {
                Err(err.to_string())
            }
        }
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const TRIALS: &str = "trials";
const THREADS: &str = "threads";
const SCHEDULE: &str = "schedule";
const RAW: &str = "raw";

const MAX_THREADS: usize = 1024;

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelpar")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Parallel Mandelbrot renderer and benchmark")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(mandelpar::config::OUTPUT)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("640x480")
                .validator(|s| {
                    validate_pair::<usize>(
                        &s,
                        'x',
                        1,
                        16_384,
                        "Image size must be WIDTHxHEIGHT, each between 1 and 16384",
                    )
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("255")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        65_535,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 65535",
                    )
                })
                .help("Maximum iterations per pixel, also the maximum gray value"),
        )
        .arg(
            Arg::with_name(TRIALS)
                .long(TRIALS)
                .short("n")
                .takes_value(true)
                .default_value("10")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000,
                        "Could not parse trial count",
                        "Trial count must be between 1 and 10000",
                    )
                })
                .help("Number of timed renders"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_THREADS,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", MAX_THREADS),
                    )
                })
                .help("Number of threads to use in renderer [default: number of CPUs]"),
        )
        .arg(
            Arg::with_name(SCHEDULE)
                .long(SCHEDULE)
                .takes_value(true)
                .possible_values(&["dynamic", "static"])
                .default_value("dynamic")
                .help("How rows are distributed among threads"),
        )
        .arg(
            Arg::with_name(RAW)
                .long(RAW)
                .help("Write a binary (P5) graymap; requires at most 255 iterations"),
        )
        .get_matches()
}

// Every value has a default or has passed its validator by the time we
// get here, so failures to parse are not expected; they still surface as
// a configuration error rather than a panic.
fn config(matches: &ArgMatches) -> Result<Config, String> {
    let defaults = Config::default();
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<usize>(s, 'x'))
        .ok_or("Error parsing image dimensions")?;
    let number = |name: &str| -> Result<usize, String> {
        matches
            .value_of(name)
            .and_then(|s| usize::from_str(s).ok())
            .ok_or(format!("Error parsing {}", name))
    };
    let max_iter = number(ITERATIONS)? as u32;
    let trials = number(TRIALS)?;
    let threads = match matches.value_of(THREADS) {
        Some(_) => number(THREADS)?,
        None => defaults.threads,
    };
    let schedule = Schedule::from_str(matches.value_of(SCHEDULE).unwrap_or("dynamic"))
        .map_err(|e| e.to_string())?;
    let encoding = if matches.is_present(RAW) {
        Encoding::Raw
    } else {
        Encoding::Plain
    };
    Ok(Config {
        width,
        height,
        max_iter,
        trials,
        threads,
        output: PathBuf::from(matches.value_of(OUTPUT).unwrap_or(mandelpar::config::OUTPUT)),
        schedule,
        encoding,
    })
}

fn main() {
    env_logger::init();
    let matches = args();
    let config = match config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration failure: {}", e);
            std::process::exit(1);
        }
    };

    match mandelpar::run(&config) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(report) => {
            println!("{}", report);
        }
    }
}
