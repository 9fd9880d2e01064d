// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Repeated, timed renders of the same image.

use std::fmt;
use std::time::{Duration, Instant};

use errors::{Error, Result};
use grid::IterationGrid;
use render::{Renderer, Schedule};

/// Wall-clock durations of a series of full-grid renders, in the order
/// they ran.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialReport {
    durations: Vec<Duration>,
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs() as f64 * 1_000.0 + f64::from(duration.subsec_nanos()) / 1_000_000.0
}

impl TrialReport {
    /// Wrap a list of measurements.
    pub fn new(durations: Vec<Duration>) -> Self {
        TrialReport { durations }
    }

    /// Per-trial durations.
    pub fn durations(&self) -> &[Duration] {
        &self.durations
    }

    /// The number of trials run.
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// True if no trial was run.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// The mean in fractional milliseconds.
    pub fn mean_millis(&self) -> f64 {
        if self.durations.is_empty() {
            return 0.0;
        }
        self.durations.iter().cloned().map(millis).sum::<f64>() / self.durations.len() as f64
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (trial, duration) in self.durations().iter().enumerate() {
            writeln!(
                f,
                "Execution time of trial [{}]: {:.3} ms",
                trial,
                millis(*duration)
            )?;
        }
        write!(
            f,
            "Average execution time of {} trials: {:.3} ms",
            self.durations.len(),
            self.mean_millis()
        )
    }
}

/// Render once into `grid` and report how long it took.
pub fn time_render(
    renderer: &Renderer,
    grid: &mut IterationGrid,
    threads: usize,
    schedule: Schedule,
) -> Result<Duration> {
    let start = Instant::now();
    renderer.render(grid, threads, schedule)?;
    Ok(start.elapsed())
}

/// Render `count` times into the same grid.  Each pass completely
/// overwrites the last, so on return the grid holds a full image.
pub fn run_trials(
    renderer: &Renderer,
    grid: &mut IterationGrid,
    threads: usize,
    schedule: Schedule,
    count: usize,
) -> Result<TrialReport> {
    if count == 0 {
        return Err(Error::Config("at least one trial is required".to_string()));
    }
    let mut durations = Vec::with_capacity(count);
    for trial in 0..count {
        let elapsed = time_render(renderer, grid, threads, schedule)?;
        debug!("trial {} took {:.3} ms", trial, millis(elapsed));
        durations.push(elapsed);
    }
    Ok(TrialReport::new(durations))
}
