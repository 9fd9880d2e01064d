// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives the escape-time kernel over every pixel of the viewport.
//!
//! The cost of a pixel is anything from two iterations (well outside
//! the set) to the full limit (inside it), and whole rows through the
//! heart of the set are far slower than rows along the top and bottom
//! edges.  Splitting the image into one fixed band per thread leaves
//! the threads that drew the edge bands idle while the middle bands are
//! still grinding, so the default schedule hands out one row at a time
//! to whichever worker asks next.

use std::fmt;
use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crossbeam;

use escape::escape_time;
use errors::{Error, Result};
use grid::IterationGrid;
use planes::{Pixel, Viewport};

type RowQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, u32>>>>;

/// How rows are distributed among worker threads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Rows are claimed one at a time from a shared queue.
    Dynamic,
    /// Rows are split into one contiguous band per worker up front.
    Static,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Dynamic
    }
}

impl FromStr for Schedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Schedule> {
        match s {
            "dynamic" => Ok(Schedule::Dynamic),
            "static" => Ok(Schedule::Static),
            _ => Err(Error::Config(format!("unknown schedule '{}'", s))),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Schedule::Dynamic => write!(f, "dynamic"),
            Schedule::Static => write!(f, "static"),
        }
    }
}

/// The viewport and iteration limit from which a Mandelbrot image is
/// rendered.  Once built it is immutable and can be shared by any number
/// of workers.
#[derive(Copy, Clone, Debug)]
pub struct Renderer {
    viewport: Viewport,
    limit: u32,
}

impl Renderer {
    /// Requires the width and height of the image and the maximum number
    /// of iterations to perform per pixel.
    pub fn new(width: usize, height: usize, limit: u32) -> Result<Self> {
        if limit == 0 {
            return Err(Error::Config("the iteration limit must be positive".to_string()));
        }
        let viewport = Viewport::new(width, height)?;
        Ok(Renderer { viewport, limit })
    }

    /// The iteration cap, which is also the largest value a cell can hold.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// A zeroed grid of the right shape for this renderer.
    pub fn grid(&self) -> Result<IterationGrid> {
        IterationGrid::new(self.viewport.width(), self.viewport.height())
    }

    /// Fill one row, left to right.
    pub fn render_row(&self, row: usize, cells: &mut [u32]) {
        for (column, cell) in cells.iter_mut().enumerate() {
            let point = self.viewport.pixel_to_point(&Pixel(column, row));
            *cell = escape_time(point, self.limit);
        }
    }

    /// The single-threaded pass.  Every other schedule must agree with it.
    pub fn render_single(&self, grid: &mut IterationGrid) -> Result<()> {
        self.check(grid)?;
        for (index, row) in grid.rows_mut().enumerate() {
            self.render_row(index, row);
        }
        Ok(())
    }

    /// Render the whole grid with `threads` workers.  Returns only once
    /// every row has been written; if any worker dies the grid must be
    /// treated as garbage.
    pub fn render(&self, grid: &mut IterationGrid, threads: usize, schedule: Schedule) -> Result<()> {
        self.check(grid)?;
        if threads == 0 {
            return Err(Error::Config("at least one worker thread is required".to_string()));
        }
        // More workers than rows would only idle.
        let threads = threads.min(grid.height());
        debug!(
            "rendering {}x{} with {} {} worker(s)",
            grid.width(),
            grid.height(),
            threads,
            schedule
        );
        match schedule {
            Schedule::Dynamic => self.render_dynamic(grid, threads),
            Schedule::Static => self.render_static(grid, threads),
        }
    }

    fn check(&self, grid: &IterationGrid) -> Result<()> {
        if grid.width() != self.viewport.width() || grid.height() != self.viewport.height() {
            return Err(Error::Config(format!(
                "a {}x{} grid cannot hold a {}x{} render",
                grid.width(),
                grid.height(),
                self.viewport.width(),
                self.viewport.height()
            )));
        }
        Ok(())
    }

    // Each row slice leaves the queue exactly once, so no two workers
    // can ever hold the same row.
    fn render_dynamic(&self, grid: &mut IterationGrid, threads: usize) -> Result<()> {
        let rows: RowQueue = Arc::new(Mutex::new(grid.rows_mut().enumerate()));
        crossbeam::scope(|spawner| {
            for worker in 0..threads {
                let rows = rows.clone();
                spawner.spawn(move |_| {
                    let mut rendered = 0;
                    loop {
                        let row = { rows.lock().ok().and_then(|mut queue| queue.next()) };
                        match row {
                            Some((index, row)) => {
                                self.render_row(index, row);
                                rendered += 1;
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    trace!("worker {} rendered {} rows", worker, rendered);
                });
            }
        })
        .map_err(|_| Error::Worker)
    }

    fn render_static(&self, grid: &mut IterationGrid, threads: usize) -> Result<()> {
        let width = grid.width();
        let zonesize = (grid.height() - 1) / threads + 1;
        crossbeam::scope(|spawner| {
            for (zone, band) in grid.bands_mut(zonesize).enumerate() {
                spawner.spawn(move |_| {
                    let start = zone * zonesize;
                    for (offset, row) in band.chunks_mut(width).enumerate() {
                        self.render_row(start + offset, row);
                    }
                    let end = start + band.len() / width;
                    trace!("worker {} rendered rows {}..{}", zone, start, end);
                });
            }
        })
        .map_err(|_| Error::Worker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(width: usize, height: usize, limit: u32) -> IterationGrid {
        let renderer = Renderer::new(width, height, limit).unwrap();
        let mut grid = renderer.grid().unwrap();
        renderer.render_single(&mut grid).unwrap();
        grid
    }

    #[test]
    fn renderer_rejects_bad_configuration() {
        assert!(Renderer::new(0, 10, 10).is_err());
        assert!(Renderer::new(10, 10, 0).is_err());
    }

    #[test]
    fn every_schedule_matches_the_single_threaded_pass() {
        let expected = reference(37, 23, 64);
        let renderer = Renderer::new(37, 23, 64).unwrap();
        for &schedule in &[Schedule::Dynamic, Schedule::Static] {
            for &threads in &[1, 2, 3, 8, 40] {
                let mut grid = renderer.grid().unwrap();
                renderer.render(&mut grid, threads, schedule).unwrap();
                assert_eq!(grid, expected, "{} schedule, {} threads", schedule, threads);
            }
        }
    }

    #[test]
    fn every_cell_is_written_and_in_range() {
        let renderer = Renderer::new(64, 48, 100).unwrap();
        let mut grid = renderer.grid().unwrap();
        renderer.render(&mut grid, 4, Schedule::Dynamic).unwrap();
        assert!(grid.cells().iter().all(|&c| c >= 1 && c <= 100));
        assert_eq!(grid.get(24, 32), Some(100));
    }

    #[test]
    fn rerendering_into_a_used_grid_overwrites_it() {
        let renderer = Renderer::new(16, 12, 30).unwrap();
        let mut grid = IterationGrid::from_cells(16, 12, vec![9999; 16 * 12]).unwrap();
        renderer.render(&mut grid, 3, Schedule::Dynamic).unwrap();
        assert_eq!(grid, reference(16, 12, 30));
    }

    #[test]
    fn absurd_thread_counts_are_capped_at_the_row_count() {
        let expected = reference(9, 5, 20);
        let renderer = Renderer::new(9, 5, 20).unwrap();
        for &schedule in &[Schedule::Dynamic, Schedule::Static] {
            let mut grid = renderer.grid().unwrap();
            renderer.render(&mut grid, usize::max_value(), schedule).unwrap();
            assert_eq!(grid, expected, "{} schedule", schedule);
        }
    }

    #[test]
    fn zero_threads_is_an_error() {
        let renderer = Renderer::new(4, 4, 10).unwrap();
        let mut grid = renderer.grid().unwrap();
        assert!(renderer.render(&mut grid, 0, Schedule::Dynamic).is_err());
    }

    #[test]
    fn mismatched_grids_are_rejected() {
        let renderer = Renderer::new(4, 4, 10).unwrap();
        let mut grid = IterationGrid::new(5, 4).unwrap();
        assert!(renderer.render(&mut grid, 2, Schedule::Static).is_err());
        assert!(renderer.render_single(&mut grid).is_err());
    }

    #[test]
    fn schedules_parse_and_print() {
        assert_eq!("dynamic".parse::<Schedule>().unwrap(), Schedule::Dynamic);
        assert_eq!("static".parse::<Schedule>().unwrap(), Schedule::Static);
        assert!("guided".parse::<Schedule>().is_err());
        assert_eq!(Schedule::default().to_string(), "dynamic");
    }
}
