// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run configuration, and the one function that turns a configuration
//! into timed renders and an image file.

use std::path::PathBuf;

use num_cpus;

use errors::{Error, Result};
use pgm::{self, Encoding, PLAIN_MAXVAL, RAW_MAXVAL};
use render::{Renderer, Schedule};
use trials::{run_trials, TrialReport};

/// Default image width, in pixels.
pub const WIDTH: usize = 640;
/// Default image height, in pixels.
pub const HEIGHT: usize = 480;
/// Default iteration cap.
pub const MAX_ITER: u32 = 255;
/// Default number of timed repetitions.
pub const TRIAL_COUNT: usize = 10;
/// Default output file.
pub const OUTPUT: &str = "mandelbrot.pgm";

/// Everything a run needs.  Fixed for the lifetime of the run, so every
/// trial renders exactly the same image.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Image columns.
    pub width: usize,
    /// Image rows.
    pub height: usize,
    /// Escape-time cap, and the maximum gray value of the output.
    pub max_iter: u32,
    /// Number of timed repetitions.
    pub trials: usize,
    /// Worker threads per render.
    pub threads: usize,
    /// Where the final image goes.
    pub output: PathBuf,
    /// How rows are handed to workers.
    pub schedule: Schedule,
    /// Which PGM flavor to write.
    pub encoding: Encoding,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: WIDTH,
            height: HEIGHT,
            max_iter: MAX_ITER,
            trials: TRIAL_COUNT,
            threads: num_cpus::get(),
            output: PathBuf::from(OUTPUT),
            schedule: Schedule::default(),
            encoding: Encoding::default(),
        }
    }
}

impl Config {
    /// Reject any configuration that could not produce a well-formed
    /// image.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("iteration limit", self.max_iter as usize),
            ("trial count", self.trials),
            ("thread count", self.threads),
        ];
        if let Some(&(name, _)) = positive.iter().find(|&&(_, value)| value == 0) {
            return Err(Error::Config(format!("{} must be positive", name)));
        }
        let ceiling = match self.encoding {
            Encoding::Plain => PLAIN_MAXVAL,
            Encoding::Raw => RAW_MAXVAL,
        };
        if self.max_iter > ceiling {
            return Err(Error::Config(format!(
                "iteration limit {} exceeds {} for {:?} output",
                self.max_iter, ceiling, self.encoding
            )));
        }
        Ok(())
    }
}

/// Validate, render `trials` times, then write the last image.  Nothing
/// is written unless every trial completed.
pub fn run(config: &Config) -> Result<TrialReport> {
    config.validate()?;
    info!(
        "{}x{}, {} iterations, {} trials on {} {} worker(s)",
        config.width,
        config.height,
        config.max_iter,
        config.trials,
        config.threads,
        config.schedule
    );
    let renderer = Renderer::new(config.width, config.height, config.max_iter)?;
    let mut grid = renderer.grid()?;
    let report = run_trials(
        &renderer,
        &mut grid,
        config.threads,
        config.schedule,
        config.trials,
    )?;
    pgm::save(&config.output, &grid, config.max_iter, config.encoding)?;
    Ok(report)
}
